use carthorse_app::context::AppContext;
use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct ShippingCommand {
    #[command(subcommand)]
    command: ShippingSubcommand,
}

#[derive(Debug, Subcommand)]
enum ShippingSubcommand {
    /// Create a shipping method
    Create(create::CreateShippingMethodArgs),
}

pub(crate) async fn run(command: ShippingCommand, ctx: &AppContext) -> Result<(), String> {
    match command.command {
        ShippingSubcommand::Create(args) => create::run(args, ctx).await,
    }
}
