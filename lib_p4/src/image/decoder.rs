use log::{debug, error, info};
use thiserror::Error;

use super::format::SourceImage;
use crate::codec::header::{parse_header, HeaderError, ImageHeader};
use crate::codec::palette::parse_palette;
use crate::codec::{rgb565_to_rgb888, unpack_pixels, Rgb888};
use crate::constants::{DATA_OFFSET, HEADER_SIZE, MAX_COLORS, PALETTE_SIZE};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid header")]
    InvalidHeader(#[from] HeaderError),
    #[error("Unexpected end of data while reading palette ({0} bytes available)")]
    TruncatedPalette(usize),
    #[error("Pixel data is {actual} bytes, expected {expected}")]
    DataLength { expected: usize, actual: usize },
    #[error("Unpacked {actual} pixels, header describes {expected}")]
    PixelCount { expected: usize, actual: usize },
}

/// An encoded image read back into header, palette and one index per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    header: ImageHeader,
    palette: [u16; MAX_COLORS],
    indices: Vec<u8>,
    palette_rgb: Vec<Rgb888>,
}

impl DecodedImage {
    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    /// Palette as stored, in RGB565.
    pub fn palette(&self) -> &[u16; MAX_COLORS] {
        &self.palette
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }
}

impl SourceImage for DecodedImage {
    fn width(&self) -> u16 {
        self.header.width
    }

    fn height(&self) -> u16 {
        self.header.height
    }

    fn pixel_index(&self, x: u16, y: u16) -> u8 {
        self.indices[y as usize * self.header.width as usize + x as usize]
    }

    fn palette_entries(&self) -> &[Rgb888] {
        &self.palette_rgb
    }
}

pub fn decode(encoded_data: &[u8]) -> Result<DecodedImage, DecodeError> {
    info!("Starting decoding");

    // Step 1: Header
    let header = parse_header(encoded_data).map_err(|e| {
        error!("Invalid header: {}", e);
        e
    })?;
    debug!(
        "Header read: width={} height={}",
        header.width, header.height
    );

    // Step 2: Palette
    let palette_block: &[u8; PALETTE_SIZE] = encoded_data
        .get(HEADER_SIZE..DATA_OFFSET)
        .and_then(|block| block.try_into().ok())
        .ok_or_else(|| {
            error!("Unexpected end of data while reading palette");
            DecodeError::TruncatedPalette(encoded_data.len().saturating_sub(HEADER_SIZE))
        })?;
    let palette = parse_palette(palette_block);
    debug!("Palette: {:04x?}", palette);

    // Step 3: Pixels
    let data = &encoded_data[DATA_OFFSET..];
    let expected = header.data_len();
    if data.len() != expected {
        error!(
            "Pixel data is {} bytes, expected {}",
            data.len(),
            expected
        );
        return Err(DecodeError::DataLength {
            expected,
            actual: data.len(),
        });
    }
    let indices = unpack_pixels(data);
    let pixel_count = header.width as usize * header.height as usize;
    if indices.len() != pixel_count {
        error!(
            "Unpacked {} pixels, header describes {}",
            indices.len(),
            pixel_count
        );
        return Err(DecodeError::PixelCount {
            expected: pixel_count,
            actual: indices.len(),
        });
    }

    info!("Decoding completed successfully");
    Ok(DecodedImage {
        header,
        palette,
        indices,
        palette_rgb: palette.iter().map(|&c| rgb565_to_rgb888(c)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::build_header;

    fn minimal() -> Vec<u8> {
        let mut data = build_header(2, 1).to_vec();
        data.extend_from_slice(&[0u8; PALETTE_SIZE]);
        data.push(0x5A);
        data
    }

    #[test]
    fn test_decode_minimal() {
        let decoded = decode(&minimal()).unwrap();
        assert_eq!(decoded.indices(), &[5, 10]);
        assert_eq!(decoded.palette(), &[0u16; MAX_COLORS]);
    }

    #[test]
    fn test_decode_truncated_palette() {
        let data = minimal();
        assert!(matches!(
            decode(&data[..20]),
            Err(DecodeError::TruncatedPalette(8))
        ));
    }

    #[test]
    fn test_decode_data_length() {
        let mut data = minimal();
        data.push(0);
        assert!(matches!(
            decode(&data),
            Err(DecodeError::DataLength {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_decode_bad_header() {
        let mut data = minimal();
        data[1] = 0x01;
        assert!(matches!(
            decode(&data),
            Err(DecodeError::InvalidHeader(HeaderError::UnexpectedFlags(0x01)))
        ));
    }

    #[test]
    fn test_decode_odd_width_rejected() {
        let mut data = build_header(3, 1).to_vec();
        data.extend_from_slice(&[0u8; PALETTE_SIZE]);
        data.push(0x12);
        assert!(matches!(
            decode(&data),
            Err(DecodeError::InvalidHeader(HeaderError::OddWidth(3)))
        ));
    }
}
