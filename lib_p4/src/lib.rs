pub mod codec;
pub mod constants;
pub mod image;

use log::*;
use std::io::Write;

pub use crate::codec::{build_header, pack_pixels, reduce_palette, Rgb888};
pub use crate::image::{
    decode, encode, Converter, DecodedImage, EncodedImage, EncodingError, Format, IndexedImage,
    SourceImage,
};

/// Sets up `env_logger` for this crate and the converter binary.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter(Some("lib_p4"), level)
        .filter(Some("p4_conv"), level)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
