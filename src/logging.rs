use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::prelude::Result;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,hyper=warn"))
}

/// Server subcommands log to stdout.
pub fn init_stdout() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

/// The board owns the terminal, so its logs go to a file instead.
pub fn init_file(path: &str) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
