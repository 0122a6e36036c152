use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use lib_p4::{EncodingError, Format};
use log::{debug, info};
use thiserror::Error;

use crate::png_source::{open_png, SourceError};
use crate::sink::{symbol_name, AssetSink};

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid file path")]
    InvalidPath,

    #[error("Several inputs would be written as {0}")]
    DuplicateSymbol(String),

    #[error("Could not read source image: {0}")]
    Source(#[from] SourceError),

    #[error("Encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Could not write asset: {0}")]
    Sink(#[from] io::Error),
}

/// Symbol an input is exported under. The name defaults to the file stem.
pub fn asset_symbol(path: &Path, name: Option<&str>) -> Result<String, ConvertError> {
    let name = match name {
        Some(name) => name,
        None => path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or(ConvertError::InvalidPath)?,
    };
    Ok(symbol_name(name))
}

/// Fails if two inputs map to the same symbol, and so to the same output file.
pub fn check_unique_symbols(inputs: &[PathBuf], name: Option<&str>) -> Result<(), ConvertError> {
    let mut seen = HashSet::new();
    for path in inputs {
        let symbol = asset_symbol(path, name)?;
        if !seen.insert(symbol.clone()) {
            return Err(ConvertError::DuplicateSymbol(symbol));
        }
    }
    Ok(())
}

/// Converts one image file and hands the result to `sink`.
pub fn convert_file(
    path: &Path,
    name: Option<&str>,
    format: Format,
    sink: &dyn AssetSink,
) -> Result<PathBuf, ConvertError> {
    let symbol = asset_symbol(path, name)?;
    info!("Converting '{}' as {} to {}", path.display(), format, symbol);

    let image = open_png(path)?;
    let encoded = format.converter().encode(&image)?;
    debug!("Encoded {} bytes", encoded.len());

    Ok(sink.emit(&symbol, encoded.as_bytes())?)
}
