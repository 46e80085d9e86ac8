#![warn(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{error::ErrorKind, Parser};
use flexi_logger::{Logger, LoggerHandle};
use lcdgfx_codegen::Generator;

#[derive(Parser, Debug)]
#[command(version, about = "Generates lcdgfx display controller sources.", long_about = None)]
struct Cli {
    #[arg(help = "Template directory.", short = 't', long, default_value = "templates")]
    templates: PathBuf,

    #[arg(help = "Output directory, one sub directory per controller.", short = 'o', long, default_value = "../src/v2/lcd")]
    output: PathBuf,

    #[arg(help = "Controller to generate, or 'all'.", short = 'c', long, default_value = "all")]
    controller: String,

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

    if let Err(err) = run(&args) {
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

fn run(args: &Cli) -> anyhow::Result<()> {
    let only = (!args.controller.eq_ignore_ascii_case("all")).then_some(args.controller.as_str());
    let generator = Generator::new(&args.templates, &args.output);
    let written = generator.generate_all(only)?;
    log::info!("{} controllers written to {}", written.len(), generator.output().display());
    Ok(())
}
