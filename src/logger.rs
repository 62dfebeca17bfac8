//! Tracing setup for the `pixmatch` binary.

use std::io::IsTerminal;

pub use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "info";

/// Installs the global subscriber from `RUST_LOG` (default `info`).
///
/// Log lines go to stderr so that stdout only ever carries comparison
/// results; colors are used only when stderr is a terminal.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let span_events = span_events_for(&filter);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Pair-loading and batch spans report their busy time on close, but only
/// once the filter lets debug output through.
fn span_events_for(filter: &EnvFilter) -> FmtSpan {
    match filter.max_level_hint() {
        Some(level) if level >= LevelFilter::DEBUG => FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    }
}
