#![warn(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use chrono::Datelike;
use clap::{error::ErrorKind, Parser};
use flexi_logger::{Logger, LoggerHandle};
use lcdgfx_license::{Stamp, Stamper};

#[derive(Parser, Debug)]
#[command(version, about = "Adds or refreshes MIT license headers.", long_about = None)]
struct Cli {
    #[arg(help = "Root of the source tree.", default_value = ".")]
    root: PathBuf,

    #[arg(help = "Copyright holder written into new headers.", long)]
    holder: String,

    #[arg(help = "Rewrite headers of unmodified files too.", long)]
    force: bool,

    #[arg(help = "Hash database, defaults to <ROOT>/.hash_db.", long)]
    hash_db: Option<PathBuf>,

    #[arg(help = "Enable debug logging.", short = 'v', long)]
    verbose: bool,
}

fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = i32::from(!matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion));
            let _ = err.print();
            std::process::exit(code);
        }
    };
    let _logger = start_logger(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn start_logger(verbose: bool) -> Option<LoggerHandle> {
    let spec = if verbose { "debug" } else { "info" };
    match Logger::try_with_env_or_str(spec).and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let stamp = Stamp {
        holder: args.holder,
        year: chrono::Local::now().year(),
        force: args.force,
    };
    let mut stamper = Stamper::new(&args.root, stamp);
    if let Some(hash_db) = args.hash_db {
        stamper = stamper.with_hash_db(hash_db);
    }
    let report = stamper.run()?;
    log::info!(
        "{} files scanned, {} updated, {} skipped",
        report.scanned,
        report.updated.len(),
        report.skipped.len()
    );
    Ok(())
}
