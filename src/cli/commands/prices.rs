//! `roofquote prices` command - print the active price book
//!
//! The YAML output is the same shape `--price-book` and the `price_book`
//! setting accept, so it doubles as a starting point for a custom book.

use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{load_price_book, load_settings, print_json};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::pricing::PriceBook;

#[derive(clap::Args, Debug)]
pub struct PricesArgs {
    /// Print the built-in prices, ignoring any configured price book
    #[arg(long)]
    pub builtin: bool,
}

/// Run the prices command
pub fn run(args: PricesArgs, global: &GlobalOpts) -> Result<()> {
    let book = if args.builtin {
        PriceBook::builtin()
    } else {
        let settings = load_settings(global)?;
        load_price_book(global, &settings)?
    };

    match global.output {
        OutputFormat::Json => print_json(&book),
        _ => {
            print!("{}", book.to_yaml().into_diagnostic()?);
            Ok(())
        }
    }
}
