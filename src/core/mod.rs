//! Core module - identity, settings, and persistence

pub mod config;
pub mod identity;
pub mod store;

pub use config::{ConfigError, Settings, SETTING_KEYS};
pub use identity::{IdParseError, QuoteId, QUOTE_PREFIX};
pub use store::{KeyValueStore, MemoryStore, QuoteStore, SqliteStore, StoreError, QUOTES_KEY};
