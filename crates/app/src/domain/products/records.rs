//! Product Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Variation UUID
pub type VariationUuid = TypedUuid<VariationRecord>;

/// Variation Record
///
/// `price` is already resolved against the parent product and `stock` is the
/// summed stock ledger, floored at zero.
#[derive(Debug, Clone)]
pub struct VariationRecord {
    pub uuid: VariationUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub stock: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl VariationRecord {
    /// Whether any stock is available.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Stock UUID
pub type StockUuid = TypedUuid<StockRecord>;

/// Stock Movement Record
#[derive(Debug, Clone)]
pub struct StockRecord {
    pub uuid: StockUuid,
    pub variation_uuid: VariationUuid,
    pub quantity: i32,
    pub created_at: Timestamp,
}
