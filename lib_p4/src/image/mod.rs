pub mod decoder;
pub mod encoder;
pub mod format;

pub use decoder::{decode, DecodeError, DecodedImage};
pub use encoder::{encode, Converter, EncodingError, Format, P4Rgb565};
pub use format::{EncodedImage, ImageError, IndexedImage, SourceImage};
