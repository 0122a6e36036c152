pub mod header;
pub mod palette;
pub mod pixels;

pub use header::{build_header, parse_header, HeaderError, ImageHeader};
pub use palette::{reduce_palette, rgb565_to_rgb888, rgb888_to_rgb565, Rgb888};
pub use pixels::{pack_pixels, unpack_pixels, PackError};
