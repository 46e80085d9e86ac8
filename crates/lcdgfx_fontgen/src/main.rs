#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::struct_excessive_bools)]

use std::path::PathBuf;

use anyhow::Context;
use clap::{error::ErrorKind, ArgGroup, Parser, ValueEnum};
use flexi_logger::{Logger, LoggerHandle};
use lcdgfx_fontgen::{
    source::{GlcdSource, GlyphSource, TtfSource},
    CharRange, FontFormat, FontSet, OutputSink,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Fixed size glyphs, single group
    Old,
    /// Variable size glyphs with jump tables
    New,
}

impl From<FormatArg> for FontFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Old => FontFormat::Legacy,
            FormatArg::New => FontFormat::Free,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Converts TrueType and GLCD fonts into lcdgfx font arrays.", long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["ttf", "glcd"])))]
struct Cli {
    #[arg(help = "TrueType / OpenType font to rasterize.", long, value_name = "FILE")]
    ttf: Option<PathBuf>,

    #[arg(help = "GLCD Font Creator source file.", long, value_name = "FILE")]
    glcd: Option<PathBuf>,

    #[arg(help = "Font size in pixels per em (TrueType only).", short = 's', long, default_value_t = 8)]
    size: u32,

    #[arg(help = "Limit the font height to N pixel rows, rows below are cut.", short = 'b', long, alias = "SB", value_name = "N")]
    limit_bottom: Option<usize>,

    #[arg(help = "Use the full line height of the font instead of the tight glyph bounds.", long = "fh", alias = "fixed-height")]
    fixed_height: bool,

    #[arg(help = "Pad all glyphs to the width of the widest glyph.", long = "fw", alias = "fixed-width")]
    fixed_width: bool,

    #[arg(
        help = "Add a character group. START: character, decimal code (2+ digits) or 0x hex code. END: number of following characters or the last character.",
        short = 'g',
        long = "group",
        num_args = 2,
        value_names = ["START", "END"],
        allow_hyphen_values = true,
        action = clap::ArgAction::Append
    )]
    groups: Vec<String>,

    #[arg(help = "Output format.", short = 'f', long, value_enum, default_value_t = FormatArg::New)]
    format: FormatArg,

    #[arg(help = "Prepend a preview of the demo text to the output.", short = 'd', long)]
    demo: bool,

    #[arg(help = "Demo text.", short = 't', long, default_value = "World!q01")]
    text: String,

    #[arg(help = "Print the demo text preview only.", long)]
    demo_only: bool,

    #[arg(help = "Write the generated source to this file instead of stdout.", long, value_name = "PATH")]
    output_file: Option<PathBuf>,

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
    let ranges = parse_groups(&args.groups)?;

    let source: Box<dyn GlyphSource> = match (&args.ttf, &args.glcd) {
        (Some(path), _) => Box::new(TtfSource::load(path, args.size, &ranges, args.fixed_height)?),
        (None, Some(path)) => Box::new(GlcdSource::load(path)?),
        (None, None) => anyhow::bail!("either --ttf or --glcd is required"),
    };

    let mut font = FontSet::load(source.as_ref(), &ranges)?;
    if let Some(limit) = args.limit_bottom {
        font.limit_height(limit);
    }
    if args.fixed_width {
        font.expand_width();
    }
    let metrics = font.metrics();
    log::info!(
        "Font '{}' {}x{}, {} glyphs in {} groups",
        font.name(),
        metrics.width,
        metrics.height,
        font.glyph_count(),
        font.groups().len()
    );

    let demo = if args.demo || args.demo_only { font.demo_lines(&args.text) } else { Vec::new() };
    if args.demo_only {
        let mut text = demo.join("\n");
        text.push('\n');
        OutputSink::Stdout.write(&text)?;
        return Ok(());
    }

    let image = FontFormat::from(args.format).pack(&font)?;
    let sink = OutputSink::from_path(args.output_file.clone());
    sink.write(&image.to_source(&demo))?;
    if let OutputSink::File(path) = &sink {
        println!("The file {} was created successfully", path.display());
    }
    Ok(())
}

fn parse_groups(values: &[String]) -> anyhow::Result<Vec<CharRange>> {
    values
        .chunks(2)
        .map(|pair| match pair {
            [start, end] => CharRange::parse(start, end).with_context(|| format!("invalid group '-g {start} {end}'")),
            _ => anyhow::bail!("a group needs a START and an END value"),
        })
        .collect()
}
