mod cli;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{RenderArgs, run_render};

const LOG_ENV: &str = "GENINFO_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() {
    if let Err(err) = dispatch() {
        eprintln!("\u{001b}[31merror:\u{001b}[0m {err:?}");
        std::process::exit(1);
    }
}

fn dispatch() -> Result<()> {
    let args = RenderArgs::parse();
    init_logging(args.quiet);
    run_render(args)
}

fn init_logging(quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(LOG_ENV).ok().as_deref()))
        .with_ansi(!quiet)
        .with_writer(io::stderr)
        .init();
}

/// Directives from `GENINFO_LOG`, or `warn` when unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
