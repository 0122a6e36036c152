use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use lib_p4::image::ImageError;
use lib_p4::{IndexedImage, Rgb888};
use log::debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("PNG decoding error: {0}")]
    Png(#[from] png::DecodingError),

    #[error("Image is not indexed (color type {0:?})")]
    NotIndexed(png::ColorType),

    #[error("Indexed image has no palette")]
    MissingPalette,

    #[error("Image is too large ({0}x{1})")]
    TooLarge(u32, u32),

    #[error("Invalid image data")]
    Image(#[from] ImageError),
}

pub fn open_png(path: &Path) -> Result<IndexedImage, SourceError> {
    read_png(BufReader::new(File::open(path)?))
}

/// Reads an indexed PNG without expanding the palette.
///
/// Trailing palette entries that no pixel references are dropped, since many
/// writers pad the palette to 256 colors.
pub fn read_png<R: Read>(input: R) -> Result<IndexedImage, SourceError> {
    let mut decoder = png::Decoder::new(input);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let mut buffer = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buffer)?;

    if frame.color_type != png::ColorType::Indexed {
        return Err(SourceError::NotIndexed(frame.color_type));
    }

    let (width, height) = match (u16::try_from(frame.width), u16::try_from(frame.height)) {
        (Ok(width), Ok(height)) => (width, height),
        _ => return Err(SourceError::TooLarge(frame.width, frame.height)),
    };

    let depth = frame.bit_depth as usize;
    let mut indices = Vec::with_capacity(width as usize * height as usize);
    for row in buffer.chunks(frame.line_size).take(height as usize) {
        indices.extend((0..width as usize).map(|x| sample(row, x, depth)));
    }

    let mut palette: Vec<Rgb888> = reader
        .info()
        .palette
        .as_ref()
        .ok_or(SourceError::MissingPalette)?
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    let used = indices.iter().copied().max().map_or(0, |max| max as usize + 1);
    if palette.len() > used {
        debug!(
            "Dropping {} unused trailing palette entries",
            palette.len() - used
        );
        palette.truncate(used);
    }

    debug!(
        "Read {}x{} PNG at {} bits per pixel with {} palette colors",
        width,
        height,
        depth,
        palette.len()
    );

    Ok(IndexedImage::new(width, height, indices, palette)?)
}

/// Extracts the `x`th sample of a packed row, most significant bits first.
fn sample(row: &[u8], x: usize, depth: usize) -> u8 {
    let bit = x * depth;
    let shift = 8 - depth - bit % 8;
    let mask = ((1u16 << depth) - 1) as u8;
    (row[bit / 8] >> shift) & mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_p4::SourceImage;

    fn write_png(width: u32, height: u32, depth: png::BitDepth, palette: &[u8], data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(depth);
            encoder.set_palette(palette.to_vec());
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_sample_depths() {
        assert_eq!(sample(&[0b1010_0000], 0, 1), 1);
        assert_eq!(sample(&[0b1010_0000], 1, 1), 0);
        assert_eq!(sample(&[0b1110_0100], 1, 2), 0b10);
        assert_eq!(sample(&[0x37], 0, 4), 3);
        assert_eq!(sample(&[0x37], 1, 4), 7);
        assert_eq!(sample(&[0x00, 0xAB], 1, 8), 0xAB);
    }

    #[test]
    fn test_read_4bit_png() {
        let palette = [0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255];
        let png = write_png(4, 2, png::BitDepth::Four, &palette, &[0x01, 0x22, 0x10, 0x02]);
        let image = read_png(png.as_slice()).unwrap();
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 2);
        assert_eq!(image.indices(), &[0, 1, 2, 2, 1, 0, 0, 2]);
        assert_eq!(image.palette(), &[[0u8, 0, 0], [255, 0, 0], [0, 255, 0]]);
    }

    #[test]
    fn test_read_8bit_png_trims_palette() {
        let palette: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
        let png = write_png(2, 1, png::BitDepth::Eight, &palette, &[1, 3]);
        let image = read_png(png.as_slice()).unwrap();
        assert_eq!(image.indices(), &[1, 3]);
        assert_eq!(image.palette().len(), 4);
    }

    #[test]
    fn test_read_rgb_png_rejected() {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, 1, 1);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[1, 2, 3]).unwrap();
        }
        assert!(matches!(
            read_png(out.as_slice()),
            Err(SourceError::NotIndexed(png::ColorType::Rgb))
        ));
    }
}
