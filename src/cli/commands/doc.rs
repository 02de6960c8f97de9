//! `roofquote doc` command - produce a printable quote
//!
//! Prices come from a saved quote (`--quote`) or from measurement flags. With
//! `--out` the rendered document is written into that directory under its
//! suggested file name; otherwise it goes to stdout.

use chrono::Utc;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::estimate::{quote_data, EstimateArgs, JobArgs};
use crate::cli::helpers::{load_price_book, load_settings, open_store, print_json, print_yaml};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::document::{
    assemble, DocumentFormat, DocumentHeader, DocumentOptions, DocumentRenderer, TemplateRenderer,
};
use crate::entities::quote::{JobDetails, QuoteData};
use crate::pricing::Estimator;

#[derive(clap::Args, Debug)]
pub struct DocArgs {
    /// Saved quote to print (ID, unique ID prefix, or exact name)
    #[arg(long, short = 'q')]
    pub quote: Option<String>,

    #[command(flatten)]
    pub estimate: EstimateArgs,

    #[command(flatten)]
    pub job: JobArgs,

    /// Omit unit prices, line totals, and markup
    #[arg(long)]
    pub hide_prices: bool,

    /// Document format
    #[arg(long, value_enum, default_value_t = DocumentFormat::Text)]
    pub format: DocumentFormat,

    /// Logo for the header (overrides the configured one)
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Directory to write the document into
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Run the doc command
pub fn run(args: DocArgs, global: &GlobalOpts) -> Result<()> {
    let settings = load_settings(global)?;
    let book = load_price_book(global, &settings)?;

    let data = match &args.quote {
        Some(reference) => {
            let store = open_store(global)?;
            let id = store.resolve(reference)?;
            let mut data = store.load(id)?.data;
            data.job = merge_job(&data.job, &args.job.to_job());
            data
        }
        None => quote_data(&args.estimate, &args.job, &settings),
    };
    let QuoteData {
        measurements,
        options,
        rules,
        job,
    } = data;

    let comparison = Estimator::new(&book, rules).compare(&measurements, &options);
    let header = DocumentHeader::for_job(&job, &measurements, Utc::now())
        .with_logo(args.logo.clone().or_else(|| settings.logo.clone()));
    let doc_options = DocumentOptions {
        hide_prices: args.hide_prices || settings.hide_prices,
    };
    let plan = assemble(&comparison.heavy, &comparison.light, &header, &doc_options);

    match global.output {
        OutputFormat::Json => return print_json(&plan),
        OutputFormat::Yaml => return print_yaml(&plan),
        _ => {}
    }

    let renderer = TemplateRenderer::new(args.format).into_diagnostic()?;
    let bytes = renderer.render(&plan).into_diagnostic()?;

    match &args.out {
        Some(dir) => {
            fs::create_dir_all(dir).into_diagnostic()?;
            let path = dir.join(plan.file_name_with_extension(renderer.extension()));
            fs::write(&path, &bytes).into_diagnostic()?;
            tracing::debug!(path = %path.display(), "wrote quote document");
            println!(
                "{} Wrote {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => print!("{}", String::from_utf8_lossy(&bytes)),
    }
    Ok(())
}

/// Job details from the command line replace the saved ones field by field
fn merge_job(saved: &JobDetails, overrides: &JobDetails) -> JobDetails {
    let pick = |over: &str, saved: &str| {
        if over.is_empty() {
            saved.to_string()
        } else {
            over.to_string()
        }
    };
    JobDetails {
        customer: pick(&overrides.customer, &saved.customer),
        po: pick(&overrides.po, &saved.po),
        notes: pick(&overrides.notes, &saved.notes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_job_overrides_non_empty_fields() {
        let saved = JobDetails {
            customer: "Jones".to_string(),
            po: "100".to_string(),
            notes: "Back gate".to_string(),
        };
        let overrides = JobDetails {
            po: "200".to_string(),
            ..Default::default()
        };
        let merged = merge_job(&saved, &overrides);
        assert_eq!(merged.customer, "Jones");
        assert_eq!(merged.po, "200");
        assert_eq!(merged.notes, "Back gate");
    }
}
