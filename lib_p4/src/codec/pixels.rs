use log::error;
use thiserror::Error;

use crate::constants::MAX_INDEX;
use crate::image::SourceImage;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PackError {
    #[error("Pixel ({x}, {y}) has index {index}, outside the 4-bit range 0..=15")]
    PixelRange { x: u16, y: u16, index: u8 },
    #[error("Image width {0} is odd, pixels cannot be paired into bytes")]
    OddWidth(u16),
}

/// Packs two horizontally adjacent 4-bit indices per byte, row-major.
///
/// The even-x pixel lands in the high nibble, the odd-x pixel in the low nibble.
///
/// # Errors
/// - Returns `PackError::OddWidth` if the width is odd
/// - Returns `PackError::PixelRange` on the first index above 15
pub fn pack_pixels<S: SourceImage + ?Sized>(image: &S) -> Result<Vec<u8>, PackError> {
    let width = image.width();
    let height = image.height();

    if width % 2 != 0 {
        error!("Cannot pack image with odd width {}", width);
        return Err(PackError::OddWidth(width));
    }

    let mut packed = Vec::with_capacity(width as usize * height as usize / 2);

    for y in 0..height {
        for x in (0..width).step_by(2) {
            let p1 = checked_index(image, x, y)?;
            let p2 = checked_index(image, x + 1, y)?;
            packed.push((p1 << 4) | p2);
        }
    }

    Ok(packed)
}

fn checked_index<S: SourceImage + ?Sized>(image: &S, x: u16, y: u16) -> Result<u8, PackError> {
    let index = image.pixel_index(x, y);
    if index > MAX_INDEX {
        error!("Pixel ({}, {}) has out of range index {}", x, y, index);
        return Err(PackError::PixelRange { x, y, index });
    }
    Ok(index)
}

/// Splits packed bytes back into one index per pixel, high nibble first.
pub fn unpack_pixels(packed: &[u8]) -> Vec<u8> {
    packed
        .iter()
        .flat_map(|&byte| [byte >> 4, byte & 0x0F])
        .collect()
}
