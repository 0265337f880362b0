//! Products Data

use crate::domain::products::records::{ProductUuid, StockUuid, VariationUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
}

/// New Variation Data
///
/// A `price` of `None` means the variation sells at its product's price.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVariation {
    pub uuid: VariationUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub price: Option<u64>,
}

/// New Stock Movement Data
///
/// Negative quantities record stock leaving.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStock {
    pub uuid: StockUuid,
    pub variation_uuid: VariationUuid,
    pub quantity: i32,
}
