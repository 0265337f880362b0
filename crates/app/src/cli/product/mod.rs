use carthorse_app::context::AppContext;
use clap::{Args, Subcommand};

mod create;
mod stock;
mod variation;
mod withdraw;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// Create a product with a base price
    Create(create::CreateProductArgs),

    /// Create a purchasable variation of a product
    Variation(variation::CreateVariationArgs),

    /// Record a stock movement for a variation
    Stock(stock::AddStockArgs),

    /// Withdraw a variation from sale
    Withdraw(withdraw::WithdrawVariationArgs),
}

pub(crate) async fn run(command: ProductCommand, ctx: &AppContext) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => create::run(args, ctx).await,
        ProductSubcommand::Variation(args) => variation::run(args, ctx).await,
        ProductSubcommand::Stock(args) => stock::run(args, ctx).await,
        ProductSubcommand::Withdraw(args) => withdraw::run(args, ctx).await,
    }
}
