//! `roofquote quote` command - saved quote management

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::commands::calc::print_comparison;
use crate::cli::estimate::{quote_data, EstimateArgs, JobArgs};
use crate::cli::helpers::{
    load_price_book, load_settings, open_store, print_json, print_yaml, remember_markup,
    truncate_str,
};
use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::document::format_quantity;
use crate::entities::quote::{QuoteRecord, QuoteSummary};
use crate::pricing::GaugeComparison;

#[derive(Subcommand, Debug)]
pub enum QuoteCommands {
    /// Save an estimate under a name
    Save(SaveArgs),

    /// List saved quotes, newest first
    List(ListArgs),

    /// Show a saved quote, repriced with the current price book
    Show(ShowArgs),

    /// Delete a saved quote
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct SaveArgs {
    /// Name for the saved quote (defaults to the customer)
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub estimate: EstimateArgs,

    #[command(flatten)]
    pub job: JobArgs,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Quote ID, unique ID prefix, or exact name
    pub quote: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Quote ID, unique ID prefix, or exact name
    pub quote: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run a quote subcommand
pub fn run(cmd: QuoteCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        QuoteCommands::Save(args) => run_save(args, global),
        QuoteCommands::List(args) => run_list(args, global),
        QuoteCommands::Show(args) => run_show(args, global),
        QuoteCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_save(args: SaveArgs, global: &GlobalOpts) -> Result<()> {
    let mut settings = load_settings(global)?;
    let data = quote_data(&args.estimate, &args.job, &settings);
    let markup_pct = data.options.effective_markup_pct();

    let record = QuoteRecord::new(args.name.unwrap_or_default().trim(), data);
    let mut store = open_store(global)?;
    let id = store.save(&record)?;

    remember_markup(global, &mut settings, markup_pct)?;

    match global.output {
        OutputFormat::Json => print_json(&record),
        OutputFormat::Yaml => print_yaml(&record),
        _ => {
            println!(
                "{} Saved quote {} ({})",
                style("✓").green(),
                style(id.to_string()).cyan(),
                record.display_name()
            );
            Ok(())
        }
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let quotes = store.list()?;

    if args.count {
        println!("{}", quotes.len());
        return Ok(());
    }

    match effective_format(global.output, true) {
        OutputFormat::Json => print_json(&quotes),
        OutputFormat::Yaml => print_yaml(&quotes),
        OutputFormat::Csv => write_list_csv(&quotes),
        OutputFormat::Table | OutputFormat::Auto => {
            if quotes.is_empty() {
                println!("No saved quotes.");
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(vec![
                "ID".to_string(),
                "Name".to_string(),
                "Customer".to_string(),
                "PO".to_string(),
                "Area".to_string(),
                "Saved".to_string(),
            ]);
            for q in &quotes {
                builder.push_record(vec![
                    q.id.to_string(),
                    truncate_str(&q.name, 30),
                    truncate_str(&q.customer, 24),
                    q.po.clone(),
                    format_quantity(q.area, "sqft"),
                    q.created_at.format("%Y-%m-%d %H:%M").to_string(),
                ]);
            }
            let mut table = builder.build();
            table.with(Style::rounded());
            println!("{}", table);
            println!(
                "\n{} quote(s) found",
                style(quotes.len().to_string()).cyan()
            );
            Ok(())
        }
    }
}

fn write_list_csv(quotes: &[QuoteSummary]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record(["id", "name", "customer", "po", "area", "created_at"])
        .into_diagnostic()?;
    for q in quotes {
        wtr.write_record([
            q.id.to_string(),
            q.name.clone(),
            q.customer.clone(),
            q.po.clone(),
            q.area.to_string(),
            q.created_at.to_rfc3339(),
        ])
        .into_diagnostic()?;
    }
    wtr.flush().into_diagnostic()?;
    Ok(())
}

/// A saved record with freshly computed results
#[derive(Serialize)]
struct QuoteView<'a> {
    record: &'a QuoteRecord,
    results: &'a GaugeComparison,
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let settings = load_settings(global)?;
    let book = load_price_book(global, &settings)?;
    let store = open_store(global)?;

    let id = store.resolve(&args.quote)?;
    let record = store.load(id)?;
    let results = record.recompute(&book);

    match global.output {
        OutputFormat::Json => print_json(&QuoteView {
            record: &record,
            results: &results,
        }),
        OutputFormat::Yaml => print_yaml(&QuoteView {
            record: &record,
            results: &results,
        }),
        OutputFormat::Csv => {
            print_comparison(&results, &record.data.measurements, OutputFormat::Csv, false)
        }
        format => {
            let job = &record.data.job;
            println!("{} {}", style("ID:").bold(), style(record.id.to_string()).cyan());
            println!("{} {}", style("Name:").bold(), record.display_name());
            println!(
                "{} {}",
                style("Saved:").bold(),
                record.created_at.format("%Y-%m-%d %H:%M UTC")
            );
            if !job.customer.is_empty() {
                println!("{} {}", style("Customer:").bold(), job.customer);
            }
            if !job.po.is_empty() {
                println!("{} {}", style("PO:").bold(), job.po);
            }
            if !job.notes.is_empty() {
                println!("{} {}", style("Notes:").bold(), job.notes);
            }
            println!();
            print_comparison(&results, &record.data.measurements, format, false)
        }
    }
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let id = store.resolve(&args.quote)?;
    let record = store.load(id)?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete {} ({})?", id, record.display_name()))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.delete(id)?;
    println!(
        "{} Deleted quote {} ({})",
        style("✓").green(),
        style(id.to_string()).cyan(),
        record.display_name()
    );
    Ok(())
}
