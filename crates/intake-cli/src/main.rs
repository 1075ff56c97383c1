//! Intake CLI - log daily calorie intake and chart it.
//!
//! Command handlers live in `commands`; they share an `AppContext` that
//! resolves the config file and ledger path lazily.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::errors::exit_code_for;
use crate::ui::{print_error, UiContext};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        let ui = UiContext::from_env(false, None, cli.no_color, false);
        print_error(&ui, &format!("{:#}", err), None);
        std::process::exit(exit_code_for(&err));
    }
}

/// Logs go to stderr. `INTAKE_LOG` takes an EnvFilter directive.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("INTAKE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli);

    match &cli.command {
        Some(Commands::Init(args)) => commands::init::handle_init(&ctx, args),
        Some(Commands::Add(args)) => commands::entries::handle_add(&ctx, args),
        Some(Commands::List(args)) => commands::entries::handle_list(&ctx, args),
        Some(Commands::Chart(args)) => commands::entries::handle_chart(&ctx, args),
        Some(Commands::Check) => commands::maintenance::handle_check(&ctx),
        Some(Commands::Backup(args)) => commands::maintenance::handle_backup(&ctx, args),
        Some(Commands::Completions(args)) => commands::misc::handle_completions(args),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
