mod cli;
mod client;
mod commands;
mod config;
mod directory;
mod error;
#[cfg(test)]
mod fake;
mod output;
mod responses;
mod transport;
mod types;
mod validation;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use client::UserClient;
use config::Config;
use directory::UserDirectory;
use error::Result;
use std::error::Error;
use transport::HttpTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = std::error::Error::source(cause);
            }
        }

        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Set global output format
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "users", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        // Commands that talk to the backend
        command => {
            let config = Config::load()?;
            let base_url = config.base_url(cli.base_url.as_deref());
            let transport = HttpTransport::new(&base_url, config.demo_token.clone())?;
            let validate = config.validate && !cli.no_validate;
            let mut directory = UserDirectory::new(UserClient::new(transport), validate);

            match command {
                Commands::List(args) => {
                    commands::users::list(&mut directory, args).await?;
                }
                Commands::Show { id } => {
                    commands::users::show(&mut directory, id).await?;
                }
                Commands::Create(args) => {
                    commands::users::create(&mut directory, args).await?;
                }
                Commands::Update(args) => {
                    commands::users::update(&mut directory, args).await?;
                }
                Commands::Delete(args) => {
                    commands::users::delete(&mut directory, args).await?;
                }
                Commands::Shell => {
                    commands::shell::run(&mut directory).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
