use carthorse_app::{
    context::AppContext,
    domain::shipping::{ShippingService, data::NewShippingMethod, records::ShippingMethodUuid},
};
use clap::Args;

use crate::cli::format_amount;

#[derive(Debug, Args)]
pub(crate) struct CreateShippingMethodArgs {
    /// Shipping method display name
    #[arg(long)]
    name: String,

    /// Price in minor currency units
    #[arg(long)]
    price: u64,

    /// Optional shipping method UUID; generated when omitted
    #[arg(long)]
    shipping_method_uuid: Option<ShippingMethodUuid>,
}

pub(crate) async fn run(args: CreateShippingMethodArgs, ctx: &AppContext) -> Result<(), String> {
    let method = ctx
        .shipping
        .create_shipping_method(NewShippingMethod {
            uuid: args.shipping_method_uuid.unwrap_or_default(),
            name: args.name,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create shipping method: {error}"))?;

    println!("shipping_method_uuid: {}", method.uuid);
    println!("shipping_method_name: {}", method.name);
    println!("price: {}", format_amount(method.price, ctx.currency));

    Ok(())
}
