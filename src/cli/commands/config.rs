//! `roofquote config` command - persisted settings

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{load_settings, print_json, print_yaml, settings_path};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::SETTING_KEYS;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the current settings
    Show,

    /// Change one setting
    Set(SetArgs),

    /// Print the settings file location
    Path,

    /// List the settings that can be changed
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Setting name, e.g. markup_pct or rules.z_metal_wall_addend
    pub key: String,

    /// New value; "none" clears a path setting
    pub value: String,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let settings = load_settings(global)?;
            match global.output {
                OutputFormat::Json => print_json(&settings),
                _ => print_yaml(&settings),
            }
        }
        ConfigCommands::Set(args) => {
            let path = settings_path(global)?;
            let mut settings = load_settings(global)?;
            settings.set(&args.key, &args.value)?;
            settings.save_to(&path)?;
            println!(
                "{} Set {} = {}",
                style("✓").green(),
                style(&args.key).cyan(),
                args.value
            );
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", settings_path(global)?.display());
            Ok(())
        }
        ConfigCommands::Keys => {
            for key in SETTING_KEYS {
                println!("{}", key);
            }
            Ok(())
        }
    }
}
