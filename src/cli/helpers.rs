//! Shared helper functions for CLI commands
//!
//! Settings, price book, and quote store are resolved here once per command
//! from the global options, then passed down explicitly.

use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::config::Settings;
use crate::core::store::{QuoteStore, SqliteStore};
use crate::pricing::{coerce_str, PriceBook};

/// Value parser for measurement flags: anything unparseable becomes 0
pub fn lenient_number(raw: &str) -> std::result::Result<f64, String> {
    Ok(coerce_str(raw))
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Settings file in effect: `--config`, else the platform default
pub fn settings_path(global: &GlobalOpts) -> Result<PathBuf> {
    match &global.config {
        Some(path) => Ok(path.clone()),
        None => Ok(Settings::default_path()?),
    }
}

pub fn load_settings(global: &GlobalOpts) -> Result<Settings> {
    let path = settings_path(global)?;
    Ok(Settings::load_from(&path)?)
}

/// Price book in effect: `--price-book`, else the configured one, else built-in
pub fn load_price_book(global: &GlobalOpts, settings: &Settings) -> Result<PriceBook> {
    let book = match &global.price_book {
        Some(path) => PriceBook::load(path)?,
        None => settings.load_price_book()?,
    };
    Ok(book)
}

/// Open the quote store named by `--store`, else the platform default
pub fn open_store(global: &GlobalOpts) -> Result<QuoteStore<SqliteStore>> {
    let path = match &global.store {
        Some(path) => path.clone(),
        None => SqliteStore::default_path()?,
    };
    let store = SqliteStore::open(&path)?;
    Ok(QuoteStore::new(store))
}

/// Remember the markup just used as the default for the next estimate
pub fn remember_markup(global: &GlobalOpts, settings: &mut Settings, markup_pct: f64) -> Result<()> {
    if settings.markup_pct == markup_pct {
        return Ok(());
    }
    settings.markup_pct = markup_pct;
    let path = settings_path(global)?;
    settings.save_to(&path)?;
    Ok(())
}

/// Write JSON to stdout, pretty-printed
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

/// Write YAML to stdout
pub fn print_yaml<T: serde::Serialize>(value: &T) -> Result<()> {
    print!("{}", serde_yml::to_string(value).into_diagnostic()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_number() {
        assert_eq!(lenient_number("12.5"), Ok(12.5));
        assert_eq!(lenient_number(" 40 "), Ok(40.0));
        assert_eq!(lenient_number("abc"), Ok(0.0));
        assert_eq!(lenient_number("-3"), Ok(0.0));
        assert_eq!(lenient_number("NaN"), Ok(0.0));
        assert_eq!(lenient_number(""), Ok(0.0));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let global = GlobalOpts {
            config: Some(PathBuf::from("/tmp/roofquote-test/config.yaml")),
            ..Default::default()
        };
        assert_eq!(
            settings_path(&global).unwrap(),
            PathBuf::from("/tmp/roofquote-test/config.yaml")
        );
    }
}
