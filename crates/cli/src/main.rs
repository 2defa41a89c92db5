//! Build parameterized lookups and run them against PostgreSQL inside a transaction.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use sqltx_cli::{run, Command, Context};
use sqltx_configuration::environment::ProcessEnvironment;

/// The command-line arguments.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The directory holding `configuration.json`. Defaults to the current directory.
    #[arg(
        long = "configuration",
        env = "SQLTX_CONFIGURATION_DIRECTORY",
        value_name = "DIRECTORY"
    )]
    configuration: Option<PathBuf>,
    /// Connection string, overriding the one in the configuration.
    #[arg(long, env = "CONNECTION_URI", value_name = "URI")]
    connection_uri: Option<String>,
    /// The command to invoke.
    #[command(subcommand)]
    subcommand: Command,
}

#[tokio::main]
pub async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let context_path = match args.configuration {
        Some(path) => path,
        None => match std::env::current_dir() {
            Ok(path) => path,
            Err(error) => {
                eprintln!("unable to read the current directory: {error}");
                return ExitCode::FAILURE;
            }
        },
    };
    let context = Context {
        context_path,
        environment: ProcessEnvironment,
        connection_uri: args.connection_uri,
    };

    match run(args.subcommand, context, &mut std::io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
