//! HTTP service exposing `POST /analyze`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rs_pagematch::server::{serve, RendererFactory, ServerState};
use rs_pagematch::{FileRenderer, Options, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pagematch_server")]
#[command(about = "Serve page similarity analysis over HTTP")]
#[command(version)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Wait after each page load for client-side rendering, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 5000)]
    settle_ms: u64,

    /// Navigation timeout, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Maximum concurrent browser sessions
    #[arg(long, default_value_t = 4)]
    max_sessions: usize,

    /// Override the browser user agent (defaults to a desktop Chrome UA)
    #[arg(long)]
    user_agent: Option<String>,

    /// Chrome/Chromium binary
    #[arg(long, env = "CHROME_PATH")]
    chrome_path: Option<PathBuf>,

    /// Serve saved HTML snapshots from this directory instead of launching a browser
    #[arg(long, value_name = "DIR")]
    snapshots: Option<PathBuf>,

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
        .with_target(true)
        .init();
}

fn snapshot_state(root: PathBuf, max_sessions: usize) -> ServerState {
    let factory: RendererFactory =
        Arc::new(move || Ok(Box::new(FileRenderer::with_root(root.clone())) as Box<dyn Renderer>));
    ServerState::new(factory, max_sessions)
}

#[cfg(feature = "chrome")]
fn browser_state(options: Options) -> anyhow::Result<ServerState> {
    Ok(ServerState::chrome(options))
}

#[cfg(not(feature = "chrome"))]
fn browser_state(_options: Options) -> anyhow::Result<ServerState> {
    anyhow::bail!("built without the `chrome` feature; use --snapshots to serve saved pages")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", cli.host, cli.port))?;

    let state = match cli.snapshots {
        Some(root) => snapshot_state(root, cli.max_sessions),
        None => browser_state(Options {
            settle_delay: Duration::from_millis(cli.settle_ms),
            navigation_timeout: Duration::from_secs(cli.timeout_secs),
            user_agent: cli.user_agent,
            chrome_path: cli.chrome_path,
            max_sessions: cli.max_sessions,
            ..Options::default()
        })?,
    };

    serve(addr, state).await.context("Server failed")
}
