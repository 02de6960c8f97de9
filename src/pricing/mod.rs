//! Pricing - price book, quantity derivation, and the per-gauge pricing engine

pub mod engine;
pub mod measurements;
pub mod options;
pub mod price_book;
pub mod quantity;

pub use engine::{
    compute_gauge_result, Category, Estimator, GaugeComparison, GaugeResult, LineItem, Totals,
    MAX_UNIT_PRICE,
};
pub use measurements::{coerce, coerce_str, MeasurementSet, MAX_MEASUREMENT, MAX_PERCENT};
pub use options::{Fastener, Gauge, OptionSelections, RuleSet, SeamStyle, Underlayment};
pub use price_book::{PriceBook, PANEL_SQFT_PER_LF, PIECE_LENGTH_LF, TAX_PCT};
pub use quantity::{panel_length, pieces_no_spare, pieces_with_spare, Quantities, MAX_UNITS};
