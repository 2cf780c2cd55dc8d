//! migrun CLI - apply SQL migrations through a hosted database's RPC endpoint

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::common::ExitCode;
use commands::{ls, run};

fn init_logging(verbose: bool) {
    // "mr" also matches the mr_core, mr_db and mr_run targets
    let default_filter = if verbose { "warn,mr=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        cli::Commands::Run(args) => run::execute(args, &cli.global).await,
        cli::Commands::Ls(args) => ls::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        if let Some(code) = err.downcast_ref::<ExitCode>() {
            std::process::exit(code.0);
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
