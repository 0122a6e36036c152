use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{COLOR_COUNT, FLAGS, FORMAT_TAG, HEADER_SIZE, STRIDE};

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("Header needs 12 bytes, got {0}")]
    Truncated(usize),
    #[error("Malformed header")]
    Malformed(#[from] bincode::Error),
    #[error("Unknown format tag {0:#04x}")]
    UnknownFormat(u8),
    #[error("Unexpected flags {0:#04x}")]
    UnexpectedFlags(u8),
    #[error("Unexpected color count {0}")]
    UnexpectedColorCount(i16),
    #[error("Stride is reserved and must be zero, got {0}")]
    NonZeroStride(i32),
    #[error("Width {0} is odd, pixels are stored in pairs")]
    OddWidth(u16),
}

/// Fixed 12-byte image header. Field order is the wire order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub format: u8,
    pub flags: u8,
    pub color_count: i16,
    pub width: u16,
    pub height: u16,
    pub stride: i32,
}

impl ImageHeader {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            format: FORMAT_TAG,
            flags: FLAGS,
            color_count: COLOR_COUNT,
            width,
            height,
            stride: STRIDE,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0] = self.format;
        bytes[1] = self.flags;
        bytes[2..4].copy_from_slice(&self.color_count.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.width.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.height.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.stride.to_le_bytes());
        bytes
    }

    /// Number of packed pixel bytes that follow the palette.
    pub fn data_len(&self) -> usize {
        self.width as usize * self.height as usize / 2
    }
}

/// Builds the header for an image of the given dimensions.
///
/// Dimensions are expected to be validated by the caller already.
pub fn build_header(width: u16, height: u16) -> [u8; HEADER_SIZE] {
    ImageHeader::new(width, height).to_bytes()
}

/// Parses and checks the header at the start of `data`.
pub fn parse_header(data: &[u8]) -> Result<ImageHeader, HeaderError> {
    if data.len() < HEADER_SIZE {
        return Err(HeaderError::Truncated(data.len()));
    }

    let header: ImageHeader = bincode::deserialize(&data[..HEADER_SIZE])?;

    if header.format != FORMAT_TAG {
        return Err(HeaderError::UnknownFormat(header.format));
    }
    if header.flags != FLAGS {
        return Err(HeaderError::UnexpectedFlags(header.flags));
    }
    if header.color_count != COLOR_COUNT {
        return Err(HeaderError::UnexpectedColorCount(header.color_count));
    }
    if header.stride != STRIDE {
        return Err(HeaderError::NonZeroStride(header.stride));
    }
    if header.width % 2 != 0 {
        return Err(HeaderError::OddWidth(header.width));
    }

    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_8x4() {
        assert_eq!(
            build_header(8, 4),
            [0x03, 0x03, 0x10, 0x00, 0x08, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_header_wide_dimensions_little_endian() {
        let bytes = build_header(0x1234, 0xABCD);
        assert_eq!(&bytes[4..8], &[0x34, 0x12, 0xCD, 0xAB]);
    }

    #[test]
    fn test_header_matches_bincode_layout() {
        let header = ImageHeader::new(128, 64);
        let serialized = bincode::serialize(&header).unwrap();
        assert_eq!(serialized, header.to_bytes());
    }

    #[test]
    fn test_parse_header() {
        let header = parse_header(&build_header(320, 240)).unwrap();
        assert_eq!(header, ImageHeader::new(320, 240));
        assert_eq!(header.data_len(), 320 * 240 / 2);
    }

    #[test]
    fn test_parse_header_truncated() {
        let bytes = build_header(2, 2);
        assert!(matches!(
            parse_header(&bytes[..7]),
            Err(HeaderError::Truncated(7))
        ));
    }

    #[test]
    fn test_parse_header_wrong_tag() {
        let mut bytes = build_header(2, 2);
        bytes[0] = 0x04;
        assert!(matches!(
            parse_header(&bytes),
            Err(HeaderError::UnknownFormat(0x04))
        ));
    }

    #[test]
    fn test_parse_header_nonzero_stride() {
        let mut bytes = build_header(2, 2);
        bytes[8] = 1;
        assert!(matches!(
            parse_header(&bytes),
            Err(HeaderError::NonZeroStride(1))
        ));
    }

    #[test]
    fn test_parse_header_odd_width() {
        assert!(matches!(
            parse_header(&build_header(3, 1)),
            Err(HeaderError::OddWidth(3))
        ));
    }
}
