//! roofquote: metal roof material estimates and printable quotes
//!
//! Turns roof measurements into purchasable material quantities, prices them
//! for 24 and 26 gauge panels side by side, saves quotes locally, and lays out
//! a customer-facing quote document.

pub mod cli;
pub mod core;
pub mod document;
pub mod entities;
pub mod pricing;
pub mod yaml;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "ROOFQUOTE_LOG";

/// Install the global tracing subscriber, logging to stderr.
///
/// `ROOFQUOTE_LOG` wins when set; otherwise `verbose` selects `debug`
/// over the default `warn`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("roofquote={}", default_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
