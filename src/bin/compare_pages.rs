//! Compare a batch of pages against the first one and print a report.
//!
//! Input is a text file of `url<TAB>brand name` lines; the first line is the
//! template.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use rs_pagematch::report::render_table;
use rs_pagematch::{analyze_batch, read_batch_file, validate_entries, FileRenderer, Options, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "compare_pages")]
#[command(about = "Score how closely each page in a batch mimics the first (template) page")]
#[command(version)]
struct Cli {
    /// Batch file of `url<TAB>brand name` lines, template first
    #[arg(default_value = "ListURLs.txt")]
    input: PathBuf,

    /// Wait after each page load for client-side rendering, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 5000)]
    settle_ms: u64,

    /// Navigation timeout, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Override the browser user agent
    #[arg(long)]
    user_agent: Option<String>,

    /// Chrome/Chromium binary
    #[arg(long, env = "CHROME_PATH")]
    chrome_path: Option<PathBuf>,

    /// Read pages as saved HTML snapshots instead of launching a browser
    #[arg(long)]
    offline: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,

    /// Verbose logging (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_session(cli: &Cli) -> anyhow::Result<Box<dyn Renderer>> {
    if cli.offline {
        let root = cli.input.parent().map(PathBuf::from).unwrap_or_default();
        return Ok(Box::new(FileRenderer::with_root(root)));
    }

    let options = Options {
        settle_delay: Duration::from_millis(cli.settle_ms),
        navigation_timeout: Duration::from_secs(cli.timeout_secs),
        user_agent: cli.user_agent.clone(),
        chrome_path: cli.chrome_path.clone(),
        ..Options::default()
    };

    launch_browser(&options)
}

#[cfg(feature = "chrome")]
fn launch_browser(options: &Options) -> anyhow::Result<Box<dyn Renderer>> {
    let renderer = rs_pagematch::render::ChromeRenderer::launch(options)?;
    Ok(Box::new(renderer))
}

#[cfg(not(feature = "chrome"))]
fn launch_browser(_options: &Options) -> anyhow::Result<Box<dyn Renderer>> {
    bail!("built without the `chrome` feature; use --offline to compare saved snapshots")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let entries = read_batch_file(&cli.input)
        .with_context(|| format!("Failed to load batch file {}", cli.input.display()))?;
    if entries.is_empty() {
        bail!("Batch file {} has no entries", cli.input.display());
    }
    if !cli.offline {
        validate_entries(&entries)?;
    }

    let mut renderer = open_session(&cli)?;
    let results = analyze_batch(&mut renderer, &entries)?;
    // Release the browser before printing.
    drop(renderer);

    match cli.format {
        Format::Table => print!("{}", render_table(&entries[0].url, &results)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }

    Ok(())
}
