//! Entity type definitions

pub mod quote;

pub use quote::{JobDetails, QuoteData, QuoteRecord, QuoteSummary, APP_VERSION};
