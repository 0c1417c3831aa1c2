//! Aegis CLI entry point

use clap::Parser;
use tracing::error;

use aegis_cli::cli::{Cli, Commands};
use aegis_cli::commands;
use aegis_cli::error::CliError;
use aegis_cli::logging;
use aegis_cli::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => {}
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Logging settings come from the [general] section; a broken config
    // falls back to defaults here so `config validate` can still run and
    // report the real error.
    let general = commands::load_config(&cli.config)
        .await
        .map(|c| c.general)
        .unwrap_or_default();
    logging::init(&general, cli.log_level.as_deref());

    aegis_core::metrics::describe_all();

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Scan(args) => commands::scan::execute(args, &cli.config, &writer).await,
        Commands::Sbom(args) => commands::sbom::execute(args, &cli.config, &writer).await,
        Commands::Rules(args) => commands::rules::execute(args, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
