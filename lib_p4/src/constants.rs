pub const FILE_EXT: &str = "bin";

/// 4-bit indexed pixels, RGB565 palette, alpha-capable.
pub const FORMAT_TAG: u8 = 0x03;

pub const FLAG_RO_DATA: u8 = 0x01;
pub const FLAG_PALETTE: u8 = 0x02;
pub const FLAGS: u8 = FLAG_RO_DATA | FLAG_PALETTE;

pub const COLOR_COUNT: i16 = 16;
pub const MAX_COLORS: usize = COLOR_COUNT as usize;

/// Reserved, always zero.
pub const STRIDE: i32 = 0;

pub const HEADER_SIZE: usize = 12;
pub const PALETTE_SIZE: usize = MAX_COLORS * std::mem::size_of::<u16>();
pub const DATA_OFFSET: usize = HEADER_SIZE + PALETTE_SIZE;

pub const MAX_INDEX: u8 = 0x0F;
