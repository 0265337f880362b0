use carthorse_app::money::Money;
use clap::{Parser, Subcommand};
use rusty_money::iso::Currency;

mod cart;
mod config;
mod db;
mod logging;
mod product;
mod shipping;
mod user;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "carthorse", about = "Carthorse shopping cart CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Product(product::ProductCommand),
    Shipping(shipping::ShippingCommand),
    Cart(cart::CartCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        logging::init(&self.config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Db(command) => db::run(command, &self.config).await,
            Commands::User(command) => user::run(command, &self.config.context().await?).await,
            Commands::Product(command) => {
                product::run(command, &self.config.context().await?).await
            }
            Commands::Shipping(command) => {
                shipping::run(command, &self.config.context().await?).await
            }
            Commands::Cart(command) => cart::run(command, &self.config.context().await?).await,
        }
    }
}

/// Format a stored minor-unit amount for display.
fn format_amount(amount: u64, currency: &'static Currency) -> String {
    i64::try_from(amount).map_or_else(
        |_| amount.to_string(),
        |amount| Money::from_minor(amount, currency).formatted(),
    )
}
