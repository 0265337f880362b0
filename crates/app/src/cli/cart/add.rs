use carthorse_app::{
    context::AppContext,
    domain::{carts::CartLine, products::records::VariationUuid, users::records::UserUuid},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct AddToCartArgs {
    /// Cart owner UUID
    #[arg(long)]
    user: UserUuid,

    /// Variation UUID
    #[arg(long)]
    variation: VariationUuid,

    /// Quantity to add
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) async fn run(args: AddToCartArgs, ctx: &AppContext) -> Result<(), String> {
    let items = ctx
        .cart_for(args.user)
        .add(&[CartLine::new(args.variation, args.quantity)])
        .await
        .map_err(|error| format!("failed to add to cart: {error}"))?;

    let quantity = items
        .iter()
        .find(|item| item.variation_uuid == args.variation)
        .map_or(0, |item| item.quantity);

    println!("variation_uuid: {}", args.variation);
    println!("quantity: {quantity}");

    Ok(())
}
