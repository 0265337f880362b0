use carthorse_app::context::AppContext;
use clap::{Args, Subcommand};

mod add;
mod empty;
mod remove;
mod show;
mod sync;
mod update;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Print a cart's line items and totals
    Show(show::ShowCartArgs),

    /// Add a quantity of a variation, merging with any existing line
    Add(add::AddToCartArgs),

    /// Set the quantity of an existing line
    Update(update::UpdateCartArgs),

    /// Remove a line
    Remove(remove::RemoveFromCartArgs),

    /// Remove every line
    Empty(empty::EmptyCartArgs),

    /// Reconcile line quantities with stock and availability
    Sync(sync::SyncCartArgs),
}

pub(crate) async fn run(command: CartCommand, ctx: &AppContext) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show(args) => show::run(args, ctx).await,
        CartSubcommand::Add(args) => add::run(args, ctx).await,
        CartSubcommand::Update(args) => update::run(args, ctx).await,
        CartSubcommand::Remove(args) => remove::run(args, ctx).await,
        CartSubcommand::Empty(args) => empty::run(args, ctx).await,
        CartSubcommand::Sync(args) => sync::run(args, ctx).await,
    }
}
