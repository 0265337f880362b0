use carthorse_app::{
    context::AppContext,
    domain::products::{ProductsService, data::NewProduct, records::ProductUuid},
};
use clap::Args;

use crate::cli::format_amount;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Base price in minor currency units
    #[arg(long)]
    price: u64,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<ProductUuid>,
}

pub(crate) async fn run(args: CreateProductArgs, ctx: &AppContext) -> Result<(), String> {
    let product = ctx
        .products
        .create_product(NewProduct {
            uuid: args.product_uuid.unwrap_or_default(),
            name: args.name,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_name: {}", product.name);
    println!("price: {}", format_amount(product.price, ctx.currency));

    Ok(())
}
