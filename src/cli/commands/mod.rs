//! CLI command implementations

pub mod calc;
pub mod completions;
pub mod config;
pub mod doc;
pub mod prices;
pub mod quote;
