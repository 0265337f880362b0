use carthorse_app::{
    context::AppContext,
    domain::{products::records::VariationUuid, users::records::UserUuid},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct UpdateCartArgs {
    /// Cart owner UUID
    #[arg(long)]
    user: UserUuid,

    /// Variation UUID of the line to update
    #[arg(long)]
    variation: VariationUuid,

    /// New quantity
    #[arg(long, allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) async fn run(args: UpdateCartArgs, ctx: &AppContext) -> Result<(), String> {
    let item = ctx
        .cart_for(args.user)
        .update(args.variation, args.quantity)
        .await
        .map_err(|error| format!("failed to update cart: {error}"))?;

    println!("variation_uuid: {}", item.variation_uuid);
    println!("quantity: {}", item.quantity);

    Ok(())
}
