use std::io::{self, Write};

use carthorse_app::{
    context::AppContext,
    domain::{
        carts::{CartSummary, CartSummaryLine},
        shipping::{ShippingService, records::ShippingMethodUuid},
        users::records::UserUuid,
    },
    money::Money,
};
use clap::Args;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

/// Cart output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Bordered table with totals underneath.
    Table,

    /// A single JSON document.
    Json,
}

#[derive(Debug, Args)]
pub(crate) struct ShowCartArgs {
    /// Cart owner UUID
    #[arg(long)]
    user: UserUuid,

    /// Shipping method to include in the total
    #[arg(long)]
    shipping: Option<ShippingMethodUuid>,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

pub(crate) async fn run(args: ShowCartArgs, ctx: &AppContext) -> Result<(), String> {
    let mut cart = ctx.cart_for(args.user);

    if let Some(shipping) = args.shipping {
        let method = ctx
            .shipping
            .get_shipping_method(shipping)
            .await
            .map_err(|error| format!("failed to load shipping method: {error}"))?;

        cart = cart.with_shipping(&method);
    }

    let summary = cart
        .summary()
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;

    let mut out = io::stdout().lock();

    match args.format {
        OutputFormat::Table => write_table(&mut out, &summary),
        OutputFormat::Json => write_json(&mut out, cart.user(), &summary),
    }
    .map_err(|error| format!("failed to write cart: {error}"))
}

fn write_table(out: &mut impl Write, summary: &CartSummary) -> io::Result<()> {
    if summary.lines.is_empty() {
        return writeln!(out, "cart is empty");
    }

    let mut builder = Builder::default();

    builder.push_record(["Variation", "Item", "Unit Price", "Quantity", "Line Total"]);

    for line in &summary.lines {
        builder.push_record([
            line.item.variation_uuid.to_string(),
            line.item.name.clone(),
            line.unit_price.formatted(),
            line.item.quantity.to_string(),
            line.line_total.formatted(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "Subtotal: {}", summary.subtotal)?;

    if let Some(shipping) = summary.shipping {
        writeln!(out, "Shipping: {shipping}")?;
    }

    writeln!(out, "Total: {}", summary.total)
}

#[derive(Debug, Serialize)]
struct AmountView {
    minor_units: i64,
    formatted: String,
}

impl From<Money> for AmountView {
    fn from(money: Money) -> Self {
        Self {
            minor_units: money.amount(),
            formatted: money.formatted(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CartLineView {
    variation_uuid: String,
    product_uuid: String,
    name: String,
    quantity: u32,
    stock: u64,
    purchasable: bool,
    unit_price: AmountView,
    line_total: AmountView,
}

impl From<&CartSummaryLine> for CartLineView {
    fn from(line: &CartSummaryLine) -> Self {
        Self {
            variation_uuid: line.item.variation_uuid.to_string(),
            product_uuid: line.item.product_uuid.to_string(),
            name: line.item.name.clone(),
            quantity: line.item.quantity,
            stock: line.item.stock,
            purchasable: line.item.purchasable,
            unit_price: line.unit_price.into(),
            line_total: line.line_total.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CartView {
    user_uuid: String,
    currency: &'static str,
    is_empty: bool,
    items: Vec<CartLineView>,
    subtotal: AmountView,
    shipping: Option<AmountView>,
    total: AmountView,
}

fn write_json(out: &mut impl Write, user: UserUuid, summary: &CartSummary) -> io::Result<()> {
    let view = CartView {
        user_uuid: user.to_string(),
        currency: summary.total.currency().iso_alpha_code,
        is_empty: summary.is_empty(),
        items: summary.lines.iter().map(CartLineView::from).collect(),
        subtotal: summary.subtotal.into(),
        shipping: summary.shipping.map(AmountView::from),
        total: summary.total.into(),
    };

    serde_json::to_writer_pretty(&mut *out, &view)?;

    writeln!(out)
}

#[cfg(test)]
mod tests {
    use carthorse_app::domain::{
        carts::records::CartItemRecord,
        products::records::{ProductUuid, VariationUuid},
    };
    use jiff::Timestamp;
    use rusty_money::iso::GBP;
    use serde_json::Value;
    use testresult::TestResult;

    use super::*;

    fn summary(shipping: Option<i64>) -> CartSummary {
        let item = CartItemRecord {
            user_uuid: UserUuid::new(),
            variation_uuid: VariationUuid::new(),
            product_uuid: ProductUuid::new(),
            name: "Espresso Beans".to_string(),
            unit_price: 1000,
            quantity: 2,
            stock: 5,
            purchasable: true,
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        };

        let subtotal = Money::from_minor(2000, GBP);
        let shipping = shipping.map(|amount| Money::from_minor(amount, GBP));
        let total = Money::from_minor(2000 + shipping.map_or(0, |s| s.amount()), GBP);

        CartSummary {
            lines: vec![CartSummaryLine {
                item,
                unit_price: Money::from_minor(1000, GBP),
                line_total: subtotal,
            }],
            subtotal,
            shipping,
            total,
        }
    }

    #[test]
    fn table_lists_lines_and_totals() -> TestResult {
        let mut out = Vec::new();

        write_table(&mut out, &summary(Some(500)))?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Espresso Beans"), "{rendered}");
        assert!(rendered.contains("Line Total"), "{rendered}");
        assert!(rendered.contains("Shipping:"), "{rendered}");
        assert!(rendered.contains("Total: £25.00"), "{rendered}");

        Ok(())
    }

    #[test]
    fn table_for_cart_without_lines() -> TestResult {
        let mut out = Vec::new();

        let empty = CartSummary {
            lines: Vec::new(),
            subtotal: Money::zero(GBP),
            shipping: None,
            total: Money::zero(GBP),
        };

        write_table(&mut out, &empty)?;

        assert_eq!(String::from_utf8(out)?, "cart is empty\n");

        Ok(())
    }

    #[test]
    fn json_reports_minor_units() -> TestResult {
        let mut out = Vec::new();
        let user = UserUuid::new();

        write_json(&mut out, user, &summary(None))?;

        let value: Value = serde_json::from_slice(&out)?;

        assert_eq!(value["user_uuid"], user.to_string());
        assert_eq!(value["currency"], "GBP");
        assert_eq!(value["is_empty"], false);
        assert_eq!(value["items"][0]["quantity"], 2);
        assert_eq!(value["subtotal"]["minor_units"], 2000);
        assert_eq!(value["shipping"], Value::Null);
        assert_eq!(value["total"]["minor_units"], 2000);

        Ok(())
    }
}
