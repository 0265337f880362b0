use clap::{Args, Subcommand};

use super::config::Config;

mod migrate;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate,
}

pub(crate) async fn run(command: DbCommand, config: &Config) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate => migrate::run(&config.database_url).await,
    }
}
