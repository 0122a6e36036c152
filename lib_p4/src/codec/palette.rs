use crate::constants::{MAX_COLORS, PALETTE_SIZE};

/// One source palette color as `[r, g, b]`.
pub type Rgb888 = [u8; 3];

/// Reduces an RGB888 color to RGB565 by truncating the low bits of each channel.
pub fn rgb888_to_rgb565([r, g, b]: Rgb888) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | ((b as u16 & 0xF8) >> 3)
}

/// Expands an RGB565 color back to RGB888. The truncated low bits come back as zero.
pub fn rgb565_to_rgb888(color: u16) -> Rgb888 {
    [
        ((color >> 11) as u8 & 0x1F) << 3,
        ((color >> 5) as u8 & 0x3F) << 2,
        (color as u8 & 0x1F) << 3,
    ]
}

/// Reduces up to 16 palette entries to RGB565, padding unused slots with zero.
///
/// Entries past the 16th are ignored.
pub fn palette565(entries: &[Rgb888]) -> [u16; MAX_COLORS] {
    let mut palette = [0u16; MAX_COLORS];
    for (slot, &color) in palette.iter_mut().zip(entries) {
        *slot = rgb888_to_rgb565(color);
    }
    palette
}

/// Serializes the reduced palette as 16 little-endian RGB565 values.
///
/// # Parameters
/// - `entries`: source palette, at most 16 colors are used.
///
/// # Returns
/// A 32-byte block, independent of how many entries were passed.
pub fn reduce_palette(entries: &[Rgb888]) -> [u8; PALETTE_SIZE] {
    let mut block = [0u8; PALETTE_SIZE];
    for (chunk, color) in block.chunks_exact_mut(2).zip(palette565(entries)) {
        chunk.copy_from_slice(&color.to_le_bytes());
    }
    block
}

/// Reads a 32-byte palette block back into RGB565 values.
pub fn parse_palette(block: &[u8; PALETTE_SIZE]) -> [u16; MAX_COLORS] {
    let mut palette = [0u16; MAX_COLORS];
    for (slot, chunk) in palette.iter_mut().zip(block.chunks_exact(2)) {
        *slot = u16::from_le_bytes([chunk[0], chunk[1]]);
    }
    palette
}
