use std::fmt;
use std::str::FromStr;

use log::{debug, error, info};
use thiserror::Error;

use super::format::{EncodedImage, SourceImage};
use crate::codec::{build_header, pack_pixels, reduce_palette, PackError};
use crate::constants::{MAX_COLORS, MAX_INDEX};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Palette overflow: {declared} colors declared, {used} distinct indices used, at most 16 supported")]
    PaletteOverflow { declared: usize, used: usize },
    #[error("Image width {0} is odd")]
    OddWidth(u16),
    #[error("Image has no pixels ({0}x{1})")]
    EmptyImage(u16, u16),
    #[error("Index {index} is used but the palette only has {palette_len} colors")]
    UnmappedIndex { index: u8, palette_len: usize },
    #[error("Failed to pack pixels")]
    Packing(#[from] PackError),
}

impl EncodingError {
    pub fn is_pixel_range(&self) -> bool {
        matches!(self, EncodingError::Packing(PackError::PixelRange { .. }))
    }

    pub fn is_odd_width(&self) -> bool {
        matches!(
            self,
            EncodingError::OddWidth(_) | EncodingError::Packing(PackError::OddWidth(_))
        )
    }

    pub fn is_palette_overflow(&self) -> bool {
        matches!(self, EncodingError::PaletteOverflow { .. })
    }
}

/// Checks everything that can be rejected before any bytes are produced.
///
/// Indices above 15 are left to the packer unless they push the number of
/// distinct indices past 16.
pub fn validate<S: SourceImage + ?Sized>(image: &S) -> Result<(), EncodingError> {
    let width = image.width();
    let height = image.height();
    let declared = image.palette_entries().len();

    if width == 0 || height == 0 {
        error!("Image has no pixels ({}x{})", width, height);
        return Err(EncodingError::EmptyImage(width, height));
    }

    let mut seen = [false; 256];
    for y in 0..height {
        for x in 0..width {
            seen[image.pixel_index(x, y) as usize] = true;
        }
    }
    let used = seen.iter().filter(|&&s| s).count();
    debug!("{} palette colors declared, {} distinct indices used", declared, used);

    if declared > MAX_COLORS || used > MAX_COLORS {
        error!(
            "Palette overflow: {} colors declared, {} indices used",
            declared, used
        );
        return Err(EncodingError::PaletteOverflow { declared, used });
    }

    if width % 2 != 0 {
        error!("Image width {} is odd", width);
        return Err(EncodingError::OddWidth(width));
    }

    if let Some(index) = (declared..=MAX_INDEX as usize).find(|&i| seen[i]) {
        error!(
            "Index {} is used but the palette only has {} colors",
            index, declared
        );
        return Err(EncodingError::UnmappedIndex {
            index: index as u8,
            palette_len: declared,
        });
    }

    Ok(())
}

/// Encodes an indexed image as header, RGB565 palette and packed 4-bit pixels.
pub fn encode<S: SourceImage + ?Sized>(image: &S) -> Result<EncodedImage, EncodingError> {
    info!("Starting encoding");

    // Step 1: Validate before doing any work
    validate(image)?;

    // Step 2: Header
    let header = build_header(image.width(), image.height());
    debug!(
        "Header written: width={} height={}",
        image.width(),
        image.height()
    );

    // Step 3: Palette
    let palette = reduce_palette(image.palette_entries());
    debug!(
        "Palette reduced to RGB565 from {} colors",
        image.palette_entries().len()
    );

    // Step 4: Pixels
    let pixels = pack_pixels(image)?;
    debug!("Packed {} pixel bytes", pixels.len());

    let encoded = EncodedImage::from_parts(&header, &palette, &pixels);
    info!("Encoding completed successfully: {} bytes", encoded.len());
    Ok(encoded)
}

/// A conversion from an indexed source image into one output format.
pub trait Converter: Send + Sync {
    fn name(&self) -> &'static str;
    fn encode(&self, image: &dyn SourceImage) -> Result<EncodedImage, EncodingError>;
}

/// 4-bit indexed pixels with a 16 color RGB565 palette.
#[derive(Debug, Default, Clone, Copy)]
pub struct P4Rgb565;

impl Converter for P4Rgb565 {
    fn name(&self) -> &'static str {
        "p4-rgb565"
    }

    fn encode(&self, image: &dyn SourceImage) -> Result<EncodedImage, EncodingError> {
        encode(image)
    }
}

/// Every converter this crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    P4Rgb565,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unrecognized image type '{0}'")]
pub struct UnknownFormat(pub String);

impl Format {
    pub const ALL: [Format; 1] = [Format::P4Rgb565];

    pub fn converter(self) -> &'static dyn Converter {
        match self {
            Format::P4Rgb565 => &P4Rgb565,
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Format::P4Rgb565 => &["celeste-bmp"],
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.converter().name())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.converter().name() == s || format.aliases().contains(&s))
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}
