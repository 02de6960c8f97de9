//! Quote record - one saved estimate
//!
//! A record stores inputs only. Gauge results are recomputed on load so a
//! record never carries stale derived figures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::QuoteId;
use crate::pricing::{Estimator, GaugeComparison, MeasurementSet, OptionSelections, PriceBook, RuleSet};

/// Version stamped on newly saved records
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

fn default_app_version() -> String {
    APP_VERSION.to_string()
}

/// Customer-facing job details printed on the quote header
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDetails {
    pub customer: String,
    /// Purchase order number
    pub po: String,
    pub notes: String,
}

/// Everything needed to reproduce both gauge results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteData {
    pub measurements: MeasurementSet,
    pub options: OptionSelections,
    /// Quantity rules in force when the quote was saved
    pub rules: RuleSet,
    pub job: JobDetails,
}

/// A saved quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    /// Unique identifier
    #[serde(default)]
    pub id: QuoteId,

    /// Display name chosen when saving
    #[serde(default)]
    pub name: String,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Version of the tool that saved the record
    #[serde(default = "default_app_version")]
    pub app_version: String,

    #[serde(default)]
    pub data: QuoteData,
}

impl QuoteRecord {
    /// Create a new record with a fresh id and the current time
    pub fn new(name: impl Into<String>, data: QuoteData) -> Self {
        Self {
            id: QuoteId::new(),
            name: name.into(),
            created_at: Utc::now(),
            app_version: APP_VERSION.to_string(),
            data,
        }
    }

    /// Name for lists and headers, falling back to the customer
    pub fn display_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            &self.name
        } else if !self.data.job.customer.trim().is_empty() {
            &self.data.job.customer
        } else {
            "Untitled quote"
        }
    }

    /// Price both gauges from the stored inputs and rules
    pub fn recompute(&self, book: &PriceBook) -> GaugeComparison {
        Estimator::new(book, self.data.rules).compare(&self.data.measurements, &self.data.options)
    }

    pub fn summary(&self) -> QuoteSummary {
        QuoteSummary {
            id: self.id,
            name: self.display_name().to_string(),
            created_at: self.created_at,
            customer: self.data.job.customer.clone(),
            po: self.data.job.po.clone(),
            area: self.data.measurements.area,
        }
    }
}

/// Lightweight listing entry for a saved quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub id: QuoteId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub customer: String,
    pub po: String,
    pub area: f64,
}
