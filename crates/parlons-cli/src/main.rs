//! CLI entry point - the composition root.
//!
//! Infrastructure is wired together only in `bootstrap`; every command
//! handler works through the resulting `CliContext`.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use console::style;
use tracing_subscriber::EnvFilter;

use parlons_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables: working directory first, then the data dir
    dotenvy::dotenv().ok();
    if let Ok(path) = parlons_core::paths::env_file_path() {
        dotenvy::from_path(path).ok();
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold());
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

/// Logs go to stderr so they never tear the drill display on stdout.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(CliConfig::with_defaults()?).await?;

    match command {
        Commands::Drill { start } => handlers::drill::execute(&ctx, start).await?,
        Commands::Sentences { command } => handlers::sentences::execute(&ctx, command).await?,
        Commands::Settings { command } => handlers::settings::execute(&ctx, command).await?,
        Commands::Cache { command } => handlers::cache::execute(&ctx, command).await?,
        Commands::Voices { recommended } => handlers::voices::execute(&ctx, recommended).await?,
    }

    Ok(())
}
