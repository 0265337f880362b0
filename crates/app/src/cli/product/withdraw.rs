use carthorse_app::{
    context::AppContext,
    domain::products::{ProductsService, records::VariationUuid},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct WithdrawVariationArgs {
    /// Variation UUID
    #[arg(long)]
    variation: VariationUuid,
}

pub(crate) async fn run(args: WithdrawVariationArgs, ctx: &AppContext) -> Result<(), String> {
    ctx.products
        .delete_variation(args.variation)
        .await
        .map_err(|error| format!("failed to withdraw variation: {error}"))?;

    println!("withdrawn variation: {}", args.variation);

    Ok(())
}
