use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Where log lines go. The terminal UI owns stdout, so it logs to a file instead.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Install the global subscriber. `filter` (from `--log`, a comma separated directive list)
/// replaces `RUST_LOG`; without it `RUST_LOG` is layered over `default_directive`.
pub fn init_tracing(filter: Option<&str>, default_directive: &str, target: LogTarget) -> Result<()> {
    let env_filter = build_filter(filter, default_directive)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact();

    let _ = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    Ok(())
}

fn build_filter(filter: Option<&str>, default_directive: &str) -> Result<EnvFilter> {
    let directive: Directive = default_directive
        .parse()
        .context("invalid log directive")?;
    let builder = EnvFilter::builder().with_default_directive(directive);
    match filter {
        Some(filter) => builder
            .parse(filter)
            .with_context(|| format!("invalid log directive '{}'", filter)),
        None => Ok(builder.from_env_lossy()),
    }
}
