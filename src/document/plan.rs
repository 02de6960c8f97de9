//! Document assembly - an ordered, format-agnostic description of a printed quote

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::document::filename::build_file_name;
use crate::document::format::format_quantity;
use crate::entities::quote::{JobDetails, APP_VERSION};
use crate::pricing::{Gauge, GaugeResult, MeasurementSet};

pub const DOCUMENT_TITLE: &str = "Metal Roofing Quote";

/// Header inputs supplied by the caller
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentHeader {
    pub generated_at: DateTime<Utc>,
    pub customer: String,
    pub po: String,
    pub notes: String,
    pub waste_pct: f64,
    pub effective_area: f64,
    pub logo: Option<PathBuf>,
}

impl DocumentHeader {
    /// Header for a job, stamped with `generated_at`
    pub fn for_job(
        job: &JobDetails,
        measurements: &MeasurementSet,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let m = measurements.sanitized();
        Self {
            generated_at,
            customer: job.customer.clone(),
            po: job.po.clone(),
            notes: job.notes.clone(),
            waste_pct: m.waste_pct,
            effective_area: m.effective_area(),
            logo: None,
        }
    }

    pub fn with_logo(mut self, logo: Option<PathBuf>) -> Self {
        self.logo = logo;
        self
    }
}

/// Presentation switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentOptions {
    /// Suppress unit and extended prices, markup and taxable base
    pub hide_prices: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBlock {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    /// `generated_at` as printed
    pub generated: String,
    pub customer: Option<String>,
    pub po: Option<String>,
    pub waste_note: Option<String>,
    pub effective_area: f64,
    pub logo: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesBlock {
    pub text: String,
}

/// One printed line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    pub label: String,
    /// Quantity with unit, e.g. "7 rolls"
    pub quantity: String,
    pub unit_price: Option<f64>,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkupLine {
    pub pct: f64,
    pub amount: f64,
}

/// Totals as printed under an item list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollupBlock {
    /// Includes the markup when prices are hidden
    pub subtotal: f64,
    pub markup: Option<MarkupLine>,
    pub taxable_base: Option<f64>,
    pub tax_pct: f64,
    pub tax: f64,
    pub grand_total: f64,
}

/// One gauge's column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemListBlock {
    pub gauge: Gauge,
    pub title: String,
    /// e.g. "750 lf"
    pub panels: String,
    pub rows: Vec<ItemRow>,
    pub rollup: RollupBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterBlock {
    pub app_version: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Header(HeaderBlock),
    Notes(NotesBlock),
    Items(ItemListBlock),
    Footer(FooterBlock),
}

/// Everything a renderer needs, in print order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPlan {
    /// Suggested download name
    pub file_name: String,
    pub blocks: Vec<Block>,
}

impl DocumentPlan {
    pub fn header(&self) -> Option<&HeaderBlock> {
        self.blocks.iter().find_map(|b| match b {
            Block::Header(h) => Some(h),
            _ => None,
        })
    }

    pub fn item_lists(&self) -> impl Iterator<Item = &ItemListBlock> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Items(items) => Some(items),
            _ => None,
        })
    }

    /// File name with the suggested `.pdf` suffix swapped for `extension`
    pub fn file_name_with_extension(&self, extension: &str) -> String {
        let stem = self
            .file_name
            .strip_suffix(".pdf")
            .unwrap_or(&self.file_name);
        format!("{}.{}", stem, extension)
    }
}

/// Lay out a quote comparing two gauge results
pub fn assemble(
    heavy: &GaugeResult,
    light: &GaugeResult,
    header: &DocumentHeader,
    options: &DocumentOptions,
) -> DocumentPlan {
    let date = header.generated_at.format("%Y-%m-%d").to_string();
    let mut blocks = vec![Block::Header(header_block(header))];

    let notes = header.notes.trim();
    if !notes.is_empty() {
        blocks.push(Block::Notes(NotesBlock {
            text: notes.to_string(),
        }));
    }

    blocks.push(Block::Items(item_list(heavy, options)));
    blocks.push(Block::Items(item_list(light, options)));
    blocks.push(Block::Footer(FooterBlock {
        app_version: APP_VERSION.to_string(),
        text: format!(
            "Tax of {}% is applied after markup. Quantities include standard spare allowances.",
            heavy.totals.tax_pct
        ),
    }));

    DocumentPlan {
        file_name: build_file_name(&header.customer, &header.po, &date),
        blocks,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn header_block(header: &DocumentHeader) -> HeaderBlock {
    let waste_note = (header.waste_pct > 0.0).then(|| {
        format!(
            "Panels include {}% waste ({} sqft effective)",
            header.waste_pct,
            format_quantity(header.effective_area, "").trim()
        )
    });

    HeaderBlock {
        title: DOCUMENT_TITLE.to_string(),
        generated_at: header.generated_at,
        generated: header.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        customer: non_empty(&header.customer),
        po: non_empty(&header.po),
        waste_note,
        effective_area: header.effective_area,
        logo: header.logo.clone(),
    }
}

fn item_list(result: &GaugeResult, options: &DocumentOptions) -> ItemListBlock {
    let rows = result
        .displayed_lines()
        .map(|line| ItemRow {
            label: line.label.clone(),
            quantity: format_quantity(line.quantity, &line.unit),
            unit_price: (!options.hide_prices).then_some(line.unit_price),
            total: (!options.hide_prices).then_some(line.total),
        })
        .collect();

    let t = &result.totals;
    let rollup = if options.hide_prices {
        RollupBlock {
            subtotal: t.subtotal + t.markup_amt,
            markup: None,
            taxable_base: None,
            tax_pct: t.tax_pct,
            tax: t.tax_amt,
            grand_total: t.grand_total,
        }
    } else {
        RollupBlock {
            subtotal: t.subtotal,
            markup: Some(MarkupLine {
                pct: t.markup_pct,
                amount: t.markup_amt,
            }),
            taxable_base: Some(t.taxable_base),
            tax_pct: t.tax_pct,
            tax: t.tax_amt,
            grand_total: t.grand_total,
        }
    };

    ItemListBlock {
        gauge: result.gauge,
        title: result.gauge.title(),
        panels: format_quantity(result.panel_lf, "lf"),
        rows,
        rollup,
    }
}
