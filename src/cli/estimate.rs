//! Estimate inputs shared by `calc`, `quote save`, and `doc`

use crate::cli::helpers::lenient_number;
use crate::core::config::Settings;
use crate::entities::quote::{JobDetails, QuoteData};
use crate::pricing::{Fastener, MeasurementSet, OptionSelections, SeamStyle, Underlayment};

/// Roof measurements. Anything that is not a non-negative number counts as 0.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct MeasurementArgs {
    /// Roof area in square feet
    #[arg(long, short = 'a', default_value = "0", value_parser = lenient_number, allow_negative_numbers = true)]
    pub area: f64,

    /// Panel waste allowance in percent
    #[arg(long, short = 'w', default_value = "0", value_parser = lenient_number, allow_negative_numbers = true)]
    pub waste: f64,

    /// Hip length (lf)
    #[arg(long, default_value = "0", value_parser = lenient_number, allow_negative_numbers = true)]
    pub hips: f64,

    /// Ridge length (lf)
    #[arg(long, default_value = "0", value_parser = lenient_number, allow_negative_numbers = true)]
    pub ridges: f64,

    /// Gable rake length (lf)
    #[arg(long, default_value = "0", value_parser = lenient_number, allow_negative_numbers = true)]
    pub gables: f64,

    /// Eave length (lf), bought as drip edge
    #[arg(long, default_value = "0", value_parser = lenient_number, allow_negative_numbers = true)]
    pub eaves: f64,

    /// Valley length (lf)
    #[arg(long, default_value = "0", value_parser = lenient_number, allow_negative_numbers = true)]
    pub valleys: f64,

    /// Sidewall flashing length (lf)
    #[arg(long, default_value = "0", value_parser = lenient_number, allow_negative_numbers = true)]
    pub sidewalls: f64,

    /// Endwall flashing length (lf)
    #[arg(long, default_value = "0", value_parser = lenient_number, allow_negative_numbers = true)]
    pub endwalls: f64,

    /// Pitch transition length (lf)
    #[arg(long, default_value = "0", value_parser = lenient_number, allow_negative_numbers = true)]
    pub transitions: f64,
}

impl MeasurementArgs {
    pub fn to_measurements(&self) -> MeasurementSet {
        MeasurementSet {
            area: self.area,
            waste_pct: self.waste,
            hips: self.hips,
            ridges: self.ridges,
            gables: self.gables,
            eaves: self.eaves,
            valleys: self.valleys,
            sidewalls: self.sidewalls,
            endwalls: self.endwalls,
            transitions: self.transitions,
        }
        .sanitized()
    }
}

/// Material options
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Underlayment product
    #[arg(long, short = 'u', value_enum, default_value_t = Underlayment::Standard)]
    pub underlayment: Underlayment,

    /// Underlayment fastener
    #[arg(long, short = 'f', value_enum, default_value_t = Fastener::Staples)]
    pub fastener: Fastener,

    /// Panel seam profile
    #[arg(long, value_enum, default_value_t = SeamStyle::SnapLock)]
    pub seam: SeamStyle,

    /// Markup percent (defaults to the last one used)
    #[arg(long, short = 'm', value_parser = lenient_number, allow_negative_numbers = true)]
    pub markup: Option<f64>,
}

impl OptionArgs {
    /// Selections, falling back to the persisted markup
    pub fn to_selections(&self, settings: &Settings) -> OptionSelections {
        OptionSelections {
            underlayment: self.underlayment,
            fastener: self.fastener,
            seam_style: self.seam,
            markup_pct: self.markup.unwrap_or(settings.markup_pct),
        }
    }
}

/// Measurements plus options
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub measurements: MeasurementArgs,

    #[command(flatten)]
    pub options: OptionArgs,
}

impl EstimateArgs {
    pub fn resolve(&self, settings: &Settings) -> (MeasurementSet, OptionSelections) {
        (
            self.measurements.to_measurements(),
            self.options.to_selections(settings),
        )
    }
}

/// Customer details printed on the quote
#[derive(clap::Args, Debug, Clone, Default)]
pub struct JobArgs {
    /// Customer name
    #[arg(long, short = 'c', default_value = "")]
    pub customer: String,

    /// Purchase order number
    #[arg(long, default_value = "")]
    pub po: String,

    /// Free-form notes for the quote header
    #[arg(long, short = 'n', default_value = "")]
    pub notes: String,
}

impl JobArgs {
    pub fn to_job(&self) -> JobDetails {
        JobDetails {
            customer: self.customer.trim().to_string(),
            po: self.po.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }
}

/// Bundle estimate and job inputs into savable quote data
pub fn quote_data(estimate: &EstimateArgs, job: &JobArgs, settings: &Settings) -> QuoteData {
    let (measurements, options) = estimate.resolve(settings);
    QuoteData {
        measurements,
        options,
        rules: settings.rules,
        job: job.to_job(),
    }
}
