use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use log::debug;

/// Receives the encoded bytes of one asset under its symbol name.
pub trait AssetSink: Sync {
    fn emit(&self, symbol: &str, payload: &[u8]) -> io::Result<PathBuf>;
}

/// Kind of file written for each asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    Bin,
    C,
}

impl FromStr for Emit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bin" => Ok(Emit::Bin),
            "c" => Ok(Emit::C),
            _ => Err(format!("unknown output kind '{}', expected 'bin' or 'c'", s)),
        }
    }
}

/// Builds the exported symbol for an asset: `_` followed by the name, with
/// anything that is not a C identifier character replaced by `_`.
pub fn symbol_name(name: &str) -> String {
    let mut symbol = String::with_capacity(name.len() + 1);
    symbol.push('_');
    symbol.extend(
        name.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }),
    );
    symbol
}

/// Drops the underscore `symbol_name` prepends, keeping any that came from the name.
fn file_stem(symbol: &str) -> &str {
    symbol.strip_prefix('_').unwrap_or(symbol)
}

/// Writes the raw payload to `<dir>/<name>.bin`.
pub struct BinSink {
    pub dir: PathBuf,
}

impl AssetSink for BinSink {
    fn emit(&self, symbol: &str, payload: &[u8]) -> io::Result<PathBuf> {
        let path = self
            .dir
            .join(file_stem(symbol))
            .with_extension(lib_p4::constants::FILE_EXT);
        fs::write(&path, payload)?;
        debug!("Wrote {} bytes to {}", payload.len(), path.display());
        Ok(path)
    }
}

/// Writes `<dir>/<name>.c` defining the payload as a byte array plus its size.
pub struct CArraySink {
    pub dir: PathBuf,
    pub section: Option<String>,
}

impl CArraySink {
    pub fn render(&self, symbol: &str, payload: &[u8]) -> String {
        let attributes = match &self.section {
            Some(section) => format!("aligned(4), section(\"{}\")", section),
            None => String::from("aligned(4)"),
        };

        let mut source = String::from("#include <stddef.h>\n\n");
        source.push_str(&format!(
            "const unsigned char {}[] __attribute__(({})) = {{\n",
            symbol, attributes
        ));
        for line in payload.chunks(12) {
            let bytes: Vec<String> = line.iter().map(|byte| format!(" 0x{:02x},", byte)).collect();
            source.push_str(&format!("   {}\n", bytes.concat()));
        }
        source.push_str("};\n");
        source.push_str(&format!(
            "const size_t {}_size = {};\n",
            symbol,
            payload.len()
        ));
        source
    }
}

impl AssetSink for CArraySink {
    fn emit(&self, symbol: &str, payload: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.join(file_stem(symbol)).with_extension("c");
        fs::write(&path, self.render(symbol, payload))?;
        debug!("Wrote {} byte array to {}", payload.len(), path.display());
        Ok(path)
    }
}
