use carthorse_app::{
    context::AppContext,
    domain::{products::records::VariationUuid, users::records::UserUuid},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct RemoveFromCartArgs {
    /// Cart owner UUID
    #[arg(long)]
    user: UserUuid,

    /// Variation UUID of the line to remove
    #[arg(long)]
    variation: VariationUuid,
}

pub(crate) async fn run(args: RemoveFromCartArgs, ctx: &AppContext) -> Result<(), String> {
    ctx.cart_for(args.user)
        .delete(args.variation)
        .await
        .map_err(|error| format!("failed to remove from cart: {error}"))?;

    println!("removed variation: {}", args.variation);

    Ok(())
}
