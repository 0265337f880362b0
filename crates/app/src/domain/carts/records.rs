//! Cart Records

use jiff::Timestamp;

use crate::domain::{
    products::records::{ProductUuid, VariationUuid},
    users::records::UserUuid,
};

/// Cart Item Record
///
/// One `(user, variation)` line with the variation's current unit price and
/// stock joined in at read time.
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub user_uuid: UserUuid,
    pub variation_uuid: VariationUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub stock: u64,
    pub purchasable: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    /// Quantity the catalog can currently supply for this line.
    pub fn available(&self) -> u32 {
        if !self.purchasable {
            return 0;
        }

        u32::try_from(self.stock).unwrap_or(u32::MAX)
    }

    /// The quantity this line should hold after a sync.
    pub fn synced_quantity(&self) -> u32 {
        self.quantity.min(self.available())
    }

    /// Whether a sync would change the stored quantity.
    pub fn needs_sync(&self) -> bool {
        self.synced_quantity() != self.quantity
    }
}

/// Outcome of reconciling a cart against the catalog.
#[derive(Debug, Clone)]
pub struct CartSyncReport {
    /// At least one line item's quantity was changed.
    pub changed: bool,

    /// The cart's line items after reconciliation.
    pub items: Vec<CartItemRecord>,
}
