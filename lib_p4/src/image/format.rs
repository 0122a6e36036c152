use std::ops::Range;

use thiserror::Error;

use crate::codec::Rgb888;
use crate::constants::{DATA_OFFSET, HEADER_SIZE, PALETTE_SIZE};

/// Read access to a decoded indexed image.
///
/// Whatever decodes the source file (PNG, BMP, a test fixture) sits behind this trait.
pub trait SourceImage {
    fn width(&self) -> u16;
    fn height(&self) -> u16;

    /// Palette index of the pixel at `(x, y)`. Callers stay within the dimensions.
    fn pixel_index(&self, x: u16, y: u16) -> u8;

    /// Palette in index order.
    fn palette_entries(&self) -> &[Rgb888];
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    #[error("Expected {expected} pixel indices for the given dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// An owned indexed image with row-major pixel indices.
///
/// Only built through [`IndexedImage::new`], so `indices` always covers the dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: u16,
    height: u16,
    indices: Vec<u8>,
    palette: Vec<Rgb888>,
}

impl IndexedImage {
    pub fn new(
        width: u16,
        height: u16,
        indices: Vec<u8>,
        palette: Vec<Rgb888>,
    ) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize;
        if indices.len() != expected {
            return Err(ImageError::DimensionMismatch {
                expected,
                actual: indices.len(),
            });
        }

        Ok(Self {
            width,
            height,
            indices,
            palette,
        })
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn palette(&self) -> &[Rgb888] {
        &self.palette
    }
}

impl SourceImage for IndexedImage {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn pixel_index(&self, x: u16, y: u16) -> u8 {
        self.indices[y as usize * self.width as usize + x as usize]
    }

    fn palette_entries(&self) -> &[Rgb888] {
        &self.palette
    }
}

/// Encoded output: header, then palette, then packed pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
}

impl EncodedImage {
    pub const HEADER_RANGE: Range<usize> = 0..HEADER_SIZE;
    pub const PALETTE_RANGE: Range<usize> = HEADER_SIZE..DATA_OFFSET;

    pub(crate) fn from_parts(
        header: &[u8; HEADER_SIZE],
        palette: &[u8; PALETTE_SIZE],
        pixels: &[u8],
    ) -> Self {
        let mut bytes = Vec::with_capacity(DATA_OFFSET + pixels.len());
        bytes.extend_from_slice(header);
        bytes.extend_from_slice(palette);
        bytes.extend_from_slice(pixels);
        Self { bytes }
    }

    pub fn header(&self) -> &[u8] {
        &self.bytes[Self::HEADER_RANGE]
    }

    pub fn palette(&self) -> &[u8] {
        &self.bytes[Self::PALETTE_RANGE]
    }

    pub fn pixels(&self) -> &[u8] {
        &self.bytes[DATA_OFFSET..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for EncodedImage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
