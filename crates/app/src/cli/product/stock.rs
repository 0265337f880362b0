use carthorse_app::{
    context::AppContext,
    domain::products::{
        ProductsService,
        data::NewStock,
        records::{StockUuid, VariationUuid},
    },
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct AddStockArgs {
    /// Variation UUID
    #[arg(long)]
    variation: VariationUuid,

    /// Stock movement; negative values record stock leaving
    #[arg(long, allow_negative_numbers = true)]
    quantity: i32,
}

pub(crate) async fn run(args: AddStockArgs, ctx: &AppContext) -> Result<(), String> {
    ctx.products
        .add_stock(NewStock {
            uuid: StockUuid::new(),
            variation_uuid: args.variation,
            quantity: args.quantity,
        })
        .await
        .map_err(|error| format!("failed to record stock: {error}"))?;

    let variation = ctx
        .products
        .get_variation(args.variation)
        .await
        .map_err(|error| format!("failed to load variation: {error}"))?;

    println!("variation_uuid: {}", variation.uuid);
    println!("stock: {}", variation.stock);

    Ok(())
}
