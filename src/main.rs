use clap::Parser;
use miette::Result;
use roofquote::cli::{Cli, Commands};

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    roofquote::init_tracing(cli.global.verbose);

    let global = &cli.global;
    match cli.command {
        Commands::Calc(args) => roofquote::cli::commands::calc::run(args, global),
        Commands::Quote(cmd) => roofquote::cli::commands::quote::run(cmd, global),
        Commands::Doc(args) => roofquote::cli::commands::doc::run(args, global),
        Commands::Config(cmd) => roofquote::cli::commands::config::run(cmd, global),
        Commands::Prices(args) => roofquote::cli::commands::prices::run(args, global),
        Commands::Completions(args) => roofquote::cli::commands::completions::run(args),
    }
}
