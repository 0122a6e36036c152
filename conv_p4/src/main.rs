mod convert;
mod png_source;
mod sink;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;

use argh::FromArgs;
use lib_p4::Format;
use log::{error, info, LevelFilter};

use convert::{check_unique_symbols, convert_file};
use sink::{AssetSink, BinSink, CArraySink, Emit};

#[derive(FromArgs)]
/// Convert indexed PNG images into 4-bit RGB565 image assets
struct Args {
    /// input image path, repeat for several images
    #[argh(option, short = 'i')]
    input: Vec<PathBuf>,

    /// output directory
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output: PathBuf,

    /// asset name, only valid with a single input (default: file stem)
    #[argh(option, short = 'n')]
    name: Option<String>,

    /// image type (default: p4-rgb565)
    #[argh(option, short = 't', long = "type", default = "Format::P4Rgb565")]
    format: Format,

    /// output kind, 'bin' or 'c' (default: bin)
    #[argh(option, default = "Emit::Bin")]
    emit: Emit,

    /// linker section for the array in C output
    #[argh(option)]
    section: Option<String>,

    /// print debug output
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    lib_p4::init_logging(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    if args.input.is_empty() {
        error!("No input images given, use -i <path>");
        return ExitCode::FAILURE;
    }
    if args.name.is_some() && args.input.len() > 1 {
        error!("-n can only be used with a single input");
        return ExitCode::FAILURE;
    }

    if let Err(e) = check_unique_symbols(&args.input, args.name.as_deref()) {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let sink: Box<dyn AssetSink> = match args.emit {
        Emit::Bin => Box::new(BinSink {
            dir: args.output.clone(),
        }),
        Emit::C => Box::new(CArraySink {
            dir: args.output.clone(),
            section: args.section.clone(),
        }),
    };

    let failed = convert_all(&args.input, args.name.as_deref(), args.format, sink.as_ref());

    if failed > 0 {
        error!("{} of {} images failed", failed, args.input.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Converts every input on its own thread. Returns the number of failures.
fn convert_all(inputs: &[PathBuf], name: Option<&str>, format: Format, sink: &dyn AssetSink) -> usize {
    thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|path| scope.spawn(move || report(path, convert_file(path, name, format, sink))))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(false))
            .filter(|ok| !ok)
            .count()
    })
}

fn report(path: &Path, result: Result<PathBuf, convert::ConvertError>) -> bool {
    match result {
        Ok(written) => {
            info!("{} -> {}", path.display(), written.display());
            true
        }
        Err(e) => {
            error!("{}: {}", path.display(), e);
            false
        }
    }
}
