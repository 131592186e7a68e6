//! latexdown - Markdown to LaTeX converter

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use latexdown::{default_output_path, LatexOptions, LatexService, ParseOptions};

#[derive(Parser)]
#[command(name = "latexdown")]
#[command(version, about = "Convert Markdown to a LaTeX body fragment", long_about = None)]
#[command(after_help = "EXAMPLES:
    latexdown notes.md              Write notes.tex
    latexdown notes.md out/body.tex Write to an explicit path
    latexdown --no-math notes.md    Treat dollar signs as plain text")]
struct Cli {
    /// Input Markdown file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output LaTeX file (defaults to INPUT with a .tex extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Do not parse $...$ and $$...$$ as math
    #[arg(long)]
    no_math: bool,

    /// Do not parse pipe tables
    #[arg(long)]
    no_tables: bool,

    /// Do not parse ~~strikethrough~~
    #[arg(long)]
    no_strikethrough: bool,

    /// Float placement for figures and tables
    #[arg(long, value_name = "SPEC", default_value = "h")]
    placement: String,

    /// Log conversion details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn options(&self) -> LatexOptions {
        LatexOptions {
            parse: ParseOptions {
                tables: !self.no_tables,
                strikethrough: !self.no_strikethrough,
                math: !self.no_math,
            },
            float_placement: self.placement.clone(),
            ..Default::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<PathBuf> {
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    convert(cli, &cli.input, &output)?;

    if !cli.quiet {
        println!("{}", report(&cli.input, &output));
    }
    Ok(output)
}

fn convert(cli: &Cli, input: &Path, output: &Path) -> Result<()> {
    let service = LatexService::with_options(cli.options());
    info!(input = %input.display(), output = %output.display(), "converting");

    service
        .convert_file(input, output)
        .with_context(|| format!("failed to convert {}", input.display()))
}

fn report(input: &Path, output: &Path) -> String {
    format!("Converted {} -> {}", input.display(), output.display())
}
