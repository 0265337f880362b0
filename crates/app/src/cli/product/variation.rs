use carthorse_app::{
    context::AppContext,
    domain::products::{
        ProductsService,
        data::NewVariation,
        records::{ProductUuid, VariationUuid},
    },
};
use clap::Args;

use crate::cli::format_amount;

#[derive(Debug, Args)]
pub(crate) struct CreateVariationArgs {
    /// Parent product UUID
    #[arg(long)]
    product: ProductUuid,

    /// Variation display name
    #[arg(long)]
    name: String,

    /// Price override in minor currency units; the product price applies when omitted
    #[arg(long)]
    price: Option<u64>,

    /// Optional variation UUID; generated when omitted
    #[arg(long)]
    variation_uuid: Option<VariationUuid>,
}

pub(crate) async fn run(args: CreateVariationArgs, ctx: &AppContext) -> Result<(), String> {
    let variation = ctx
        .products
        .create_variation(NewVariation {
            uuid: args.variation_uuid.unwrap_or_default(),
            product_uuid: args.product,
            name: args.name,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create variation: {error}"))?;

    println!("variation_uuid: {}", variation.uuid);
    println!("product_uuid: {}", variation.product_uuid);
    println!("variation_name: {}", variation.name);
    println!("price: {}", format_amount(variation.price, ctx.currency));

    Ok(())
}
