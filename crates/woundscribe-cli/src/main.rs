//! WoundScribe CLI - split scanned wound notes by patient and clinic.

mod cli;
mod commands;
mod prompt;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Process {
            pdf,
            output,
            page_text,
            threshold,
            marker,
            no_auto_review,
        } => commands::process::run(commands::process::ProcessArgs {
            pdf,
            output,
            page_text,
            threshold,
            marker,
            auto_review: !no_auto_review,
            registry: cli.registry,
            verbose: cli.verbose,
        }),

        Commands::Assign { name, clinic } => commands::assign::run(name, clinic, cli.registry),

        Commands::List { json } => commands::list::run(json, cli.registry),

        Commands::Remove { name } => commands::remove::run(name, cli.registry),

        Commands::Rename { old_name, new_name } => {
            commands::rename::run(old_name, new_name, cli.registry)
        }

        Commands::Review { decisions } => commands::review::run(decisions, cli.registry),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "woundscribe=debug,woundscribe_cli=debug"
    } else {
        "woundscribe=warn,woundscribe_cli=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
