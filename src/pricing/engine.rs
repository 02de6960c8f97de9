//! Pricing engine - quantities times unit prices, rolled up with markup and tax

use serde::{Deserialize, Serialize};

use crate::pricing::measurements::{coerce, MeasurementSet, MAX_PERCENT};
use crate::pricing::options::{Gauge, OptionSelections, RuleSet};
use crate::pricing::price_book::{PriceBook, TAX_PCT};
use crate::pricing::quantity::Quantities;

/// Material category of a line item, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Panels,
    Hip,
    Ridge,
    GableRake,
    DripEdge,
    Valley,
    Sidewall,
    Endwall,
    Transition,
    Underlayment,
    PanelClips,
    PancakeScrews,
    ZMetal,
    PerforatedZMetal,
    StaplePack,
    CapNails,
}

impl Category {
    pub const ALL: [Category; 16] = [
        Category::Panels,
        Category::Hip,
        Category::Ridge,
        Category::GableRake,
        Category::DripEdge,
        Category::Valley,
        Category::Sidewall,
        Category::Endwall,
        Category::Transition,
        Category::Underlayment,
        Category::PanelClips,
        Category::PancakeScrews,
        Category::ZMetal,
        Category::PerforatedZMetal,
        Category::StaplePack,
        Category::CapNails,
    ];

    /// Snake-case key, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Panels => "panels",
            Category::Hip => "hip",
            Category::Ridge => "ridge",
            Category::GableRake => "gable_rake",
            Category::DripEdge => "drip_edge",
            Category::Valley => "valley",
            Category::Sidewall => "sidewall",
            Category::Endwall => "endwall",
            Category::Transition => "transition",
            Category::Underlayment => "underlayment",
            Category::PanelClips => "panel_clips",
            Category::PancakeScrews => "pancake_screws",
            Category::ZMetal => "z_metal",
            Category::PerforatedZMetal => "perforated_z_metal",
            Category::StaplePack => "staple_pack",
            Category::CapNails => "cap_nails",
        }
    }

    /// Purchasable unit label
    pub fn unit(&self) -> &'static str {
        match self {
            Category::Panels => "lf",
            Category::Hip
            | Category::Ridge
            | Category::GableRake
            | Category::DripEdge
            | Category::Valley
            | Category::Sidewall
            | Category::Endwall
            | Category::Transition
            | Category::ZMetal
            | Category::PerforatedZMetal => "10' pcs",
            Category::Underlayment => "rolls",
            Category::PanelClips | Category::StaplePack => "box",
            Category::PancakeScrews => "bag",
            Category::CapNails => "pail",
        }
    }
}

/// One priced row of the materials list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub category: Category,
    pub label: String,
    /// Purchasable units; fractional only for panels
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
    pub total: f64,
}

/// Largest unit price taken from a price book
pub const MAX_UNIT_PRICE: f64 = 1.0e9;

impl LineItem {
    fn new(category: Category, label: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        let quantity = coerce(quantity);
        let unit_price = coerce(unit_price).min(MAX_UNIT_PRICE);
        Self {
            category,
            label: label.into(),
            quantity,
            unit: category.unit().to_string(),
            unit_price,
            total: quantity * unit_price,
        }
    }

    /// Zero-quantity and zero-cost lines are computed but never shown
    pub fn is_displayed(&self) -> bool {
        self.quantity > 0.0 && self.total > 0.0
    }
}

/// Rolled-up figures for one gauge
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: f64,
    pub markup_pct: f64,
    pub markup_amt: f64,
    /// Subtotal plus markup; tax is levied on this
    pub taxable_base: f64,
    pub tax_pct: f64,
    pub tax_amt: f64,
    pub grand_total: f64,
}

impl Totals {
    /// Roll a subtotal up through markup and tax
    pub fn from_subtotal(subtotal: f64, markup_pct: f64, tax_pct: f64) -> Self {
        let subtotal = coerce(subtotal);
        let markup_pct = coerce(markup_pct).min(MAX_PERCENT);
        let tax_pct = coerce(tax_pct).min(MAX_PERCENT);
        let markup_amt = subtotal * markup_pct / 100.0;
        let taxable_base = subtotal + markup_amt;
        let tax_amt = taxable_base * tax_pct / 100.0;
        Self {
            subtotal,
            markup_pct,
            markup_amt,
            taxable_base,
            tax_pct,
            tax_amt,
            grand_total: taxable_base + tax_amt,
        }
    }
}

/// Priced materials list for one gauge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeResult {
    pub gauge: Gauge,
    /// Unrounded panel length in linear feet
    pub panel_lf: f64,
    /// Every category, in [`Category::ALL`] order
    pub lines: Vec<LineItem>,
    pub totals: Totals,
}

impl GaugeResult {
    /// Lines worth printing
    pub fn displayed_lines(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.iter().filter(|l| l.is_displayed())
    }

    pub fn line(&self, category: Category) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.category == category)
    }
}

/// Both gauges priced from the same inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeComparison {
    pub heavy: GaugeResult,
    pub light: GaugeResult,
}

impl GaugeComparison {
    pub fn results(&self) -> [&GaugeResult; 2] {
        [&self.heavy, &self.light]
    }
}

/// Price one gauge.
///
/// Pure: the result depends only on the arguments.
pub fn compute_gauge_result(
    measurements: &MeasurementSet,
    options: &OptionSelections,
    gauge: Gauge,
    book: &PriceBook,
    rules: &RuleSet,
) -> GaugeResult {
    let q = Quantities::derive(measurements, options, book, rules);
    let prices = book.gauge(gauge);
    let trim = &prices.trim;

    let (underlayment_label, underlayment_price) = match book.underlayment(options.underlayment) {
        Some(entry) => (entry.label.clone(), entry.price),
        None => ("Ice & Water".to_string(), 0.0),
    };

    let lines = vec![
        LineItem::new(
            Category::Panels,
            format!("Panels ({:.0} lf)", q.panel_lf),
            q.panel_lf,
            prices.panel_lf,
        ),
        LineItem::new(Category::Hip, "Hip", q.hip, trim.hip),
        LineItem::new(Category::Ridge, "Ridge", q.ridge, trim.ridge),
        LineItem::new(Category::GableRake, "Gable Rake", q.gable, trim.gable),
        LineItem::new(Category::DripEdge, "Drip Edge", q.drip_edge, trim.drip_edge),
        LineItem::new(Category::Valley, "S-Valley", q.valley, trim.valley),
        LineItem::new(Category::Sidewall, "Sidewall", q.sidewall, trim.sidewall),
        LineItem::new(Category::Endwall, "Endwall", q.endwall, trim.endwall),
        LineItem::new(Category::Transition, "Transition", q.transition, trim.transition),
        LineItem::new(
            Category::Underlayment,
            underlayment_label,
            q.underlayment,
            underlayment_price,
        ),
        LineItem::new(Category::PanelClips, "Panel Clips", q.clips, book.clips.price),
        LineItem::new(
            Category::PancakeScrews,
            "Pancake Screws",
            q.screws,
            book.screws.price,
        ),
        LineItem::new(Category::ZMetal, "Z Metal", q.z_metal, prices.z_metal),
        LineItem::new(
            Category::PerforatedZMetal,
            "Perforated Z Metal",
            q.perforated_z_metal,
            prices.perforated_z_metal,
        ),
        LineItem::new(
            Category::StaplePack,
            book.staples.label.clone(),
            q.staples,
            book.staples.price,
        ),
        LineItem::new(
            Category::CapNails,
            book.cap_nails.label.clone(),
            q.cap_nails,
            book.cap_nails.price,
        ),
    ];

    let subtotal: f64 = lines.iter().map(|l| l.total).sum();
    let totals = Totals::from_subtotal(subtotal, options.effective_markup_pct(), TAX_PCT);

    tracing::trace!(
        gauge = %gauge,
        subtotal = totals.subtotal,
        grand_total = totals.grand_total,
        "priced gauge"
    );

    GaugeResult {
        gauge,
        panel_lf: q.panel_lf,
        lines,
        totals,
    }
}

/// Pricing context: a price book plus the active rule flags
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    book: &'a PriceBook,
    rules: RuleSet,
}

impl<'a> Estimator<'a> {
    pub fn new(book: &'a PriceBook, rules: RuleSet) -> Self {
        Self { book, rules }
    }

    pub fn book(&self) -> &'a PriceBook {
        self.book
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn gauge_result(
        &self,
        measurements: &MeasurementSet,
        options: &OptionSelections,
        gauge: Gauge,
    ) -> GaugeResult {
        compute_gauge_result(measurements, options, gauge, self.book, &self.rules)
    }

    /// Price both gauges, each computed independently
    pub fn compare(
        &self,
        measurements: &MeasurementSet,
        options: &OptionSelections,
    ) -> GaugeComparison {
        GaugeComparison {
            heavy: self.gauge_result(measurements, options, Gauge::G24),
            light: self.gauge_result(measurements, options, Gauge::G26),
        }
    }
}
