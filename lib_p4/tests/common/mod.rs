#![allow(dead_code)]

use lib_p4::{IndexedImage, Rgb888};

/// The 16 color PICO-8 palette.
pub const PICO8_PALETTE: [Rgb888; 16] = [
    [0x00, 0x00, 0x00],
    [0x1d, 0x2b, 0x53],
    [0x7e, 0x25, 0x53],
    [0x00, 0x87, 0x51],
    [0xab, 0x52, 0x36],
    [0x5f, 0x57, 0x4f],
    [0xc2, 0xc3, 0xc7],
    [0xff, 0xf1, 0xe8],
    [0xff, 0x00, 0x4d],
    [0xff, 0xa3, 0x00],
    [0xff, 0xec, 0x27],
    [0x00, 0xe4, 0x36],
    [0x29, 0xad, 0xff],
    [0x83, 0x76, 0x9c],
    [0xff, 0x77, 0xa8],
    [0xff, 0xcc, 0xaa],
];

pub const SHEET_WIDTH: u16 = 16;
pub const SHEET_HEIGHT: u16 = 8;

/// Every palette color in a diagonal pattern.
pub fn color_sheet() -> IndexedImage {
    let indices = (0..SHEET_HEIGHT)
        .flat_map(|y| (0..SHEET_WIDTH).map(move |x| ((x + y) % 16) as u8))
        .collect();
    IndexedImage::new(SHEET_WIDTH, SHEET_HEIGHT, indices, PICO8_PALETTE.to_vec()).unwrap()
}

/// Two color checkerboard using a two entry palette.
pub fn checkerboard(width: u16, height: u16) -> IndexedImage {
    let indices = (0..height)
        .flat_map(|y| (0..width).map(move |x| ((x + y) % 2) as u8))
        .collect();
    IndexedImage::new(
        width,
        height,
        indices,
        vec![[0x00, 0x00, 0x00], [0xff, 0xff, 0xff]],
    )
    .unwrap()
}
