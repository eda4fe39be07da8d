use std::path::PathBuf;

use clap::Parser;
use strings2csv::{Codec, DEFAULT_OUTPUT};
use tracing_subscriber::EnvFilter;

/// Export every `<lang>.lproj/*.strings` file under a directory into one CSV,
/// one row per string and one column per language.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The CSV file to write
    #[arg(short = 'f', long = "file", default_value = DEFAULT_OUTPUT)]
    file: PathBuf,

    /// The directory to scan for language directories
    #[arg(short = 'd', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Log every file that is scanned and merged
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let result = Codec::scan(&args.dir).and_then(|codec| codec.export_to_file(&args.file));
    match result {
        Ok(rows) => println!("Wrote {} rows to {}", rows, args.file.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
