//! `roofquote calc` command - price both gauges for a set of measurements

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::estimate::EstimateArgs;
use crate::cli::helpers::{load_price_book, load_settings, print_json, print_yaml, remember_markup};
use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::document::{format_currency, format_quantity};
use crate::pricing::{Category, Estimator, GaugeComparison, GaugeResult, MeasurementSet};

#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    #[command(flatten)]
    pub estimate: EstimateArgs,

    /// Include zero-quantity lines in the table
    #[arg(long)]
    pub all: bool,
}

/// Run the calc command
pub fn run(args: CalcArgs, global: &GlobalOpts) -> Result<()> {
    let mut settings = load_settings(global)?;
    let book = load_price_book(global, &settings)?;
    let (measurements, options) = args.estimate.resolve(&settings);

    let estimator = Estimator::new(&book, settings.rules);
    let comparison = estimator.compare(&measurements, &options);

    if args.estimate.options.markup.is_some() {
        remember_markup(global, &mut settings, options.effective_markup_pct())?;
    }

    print_comparison(&comparison, &measurements, global.output, args.all)
}

/// Print a gauge comparison in the requested format
pub fn print_comparison(
    comparison: &GaugeComparison,
    measurements: &MeasurementSet,
    format: OutputFormat,
    show_all: bool,
) -> Result<()> {
    match effective_format(format, true) {
        OutputFormat::Json => print_json(comparison),
        OutputFormat::Yaml => print_yaml(comparison),
        OutputFormat::Csv => write_csv(comparison),
        OutputFormat::Table | OutputFormat::Auto => {
            print_table(comparison, measurements, show_all);
            Ok(())
        }
    }
}

fn print_table(comparison: &GaugeComparison, measurements: &MeasurementSet, show_all: bool) {
    let heavy = &comparison.heavy;
    let light = &comparison.light;

    let m = measurements.sanitized();
    println!(
        "{} {} sqft{}",
        style("Area:").bold(),
        format_quantity(m.area, "").trim(),
        if m.waste_pct > 0.0 {
            format!(
                " ({}% waste, {} sqft effective)",
                m.waste_pct,
                format_quantity(m.effective_area(), "").trim()
            )
        } else {
            String::new()
        }
    );
    println!(
        "{} {}",
        style("Panels:").bold(),
        format_quantity(heavy.panel_lf, "lf")
    );
    println!();

    let mut builder = Builder::default();
    builder.push_record(vec![
        "Item".to_string(),
        "Qty".to_string(),
        format!("{} Unit", heavy.gauge.title()),
        format!("{} Total", heavy.gauge.title()),
        format!("{} Unit", light.gauge.title()),
        format!("{} Total", light.gauge.title()),
    ]);

    for category in Category::ALL {
        let (Some(h), Some(l)) = (heavy.line(category), light.line(category)) else {
            continue;
        };
        if !show_all && !h.is_displayed() && !l.is_displayed() {
            continue;
        }
        builder.push_record(vec![
            h.label.clone(),
            format_quantity(h.quantity, &h.unit),
            format_currency(h.unit_price),
            format_currency(h.total),
            format_currency(l.unit_price),
            format_currency(l.total),
        ]);
    }

    for (label, h, l) in rollup_rows(heavy, light) {
        builder.push_record(vec![
            label,
            String::new(),
            String::new(),
            format_currency(h),
            String::new(),
            format_currency(l),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);

    let diff = heavy.totals.grand_total - light.totals.grand_total;
    println!(
        "{} {} over {}",
        style("Difference:").bold(),
        style(format_currency(diff)).yellow(),
        light.gauge.title()
    );
}

fn rollup_rows(heavy: &GaugeResult, light: &GaugeResult) -> Vec<(String, f64, f64)> {
    let (h, l) = (&heavy.totals, &light.totals);
    vec![
        ("Subtotal".to_string(), h.subtotal, l.subtotal),
        (format!("Markup ({}%)", h.markup_pct), h.markup_amt, l.markup_amt),
        ("Taxable".to_string(), h.taxable_base, l.taxable_base),
        (format!("Tax ({}%)", h.tax_pct), h.tax_amt, l.tax_amt),
        ("Grand Total".to_string(), h.grand_total, l.grand_total),
    ]
}

fn write_csv(comparison: &GaugeComparison) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record([
        "gauge",
        "category",
        "item",
        "quantity",
        "unit",
        "unit_price",
        "total",
    ])
    .into_diagnostic()?;

    for result in comparison.results() {
        let gauge = result.gauge.as_str();
        for line in result.displayed_lines() {
            wtr.write_record([
                gauge.to_string(),
                line.category.as_str().to_string(),
                line.label.clone(),
                format!("{:.4}", line.quantity),
                line.unit.clone(),
                format!("{:.2}", line.unit_price),
                format!("{:.2}", line.total),
            ])
            .into_diagnostic()?;
        }
        let t = &result.totals;
        for (key, amount) in [
            ("subtotal", t.subtotal),
            ("markup", t.markup_amt),
            ("tax", t.tax_amt),
            ("grand_total", t.grand_total),
        ] {
            wtr.write_record([
                gauge.to_string(),
                key.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                format!("{:.2}", amount),
            ])
            .into_diagnostic()?;
        }
    }

    wtr.flush().into_diagnostic()?;
    Ok(())
}
