//! Cart Data

use crate::domain::products::records::VariationUuid;

/// New Cart Item Data
///
/// Adding an item that is already in the cart increments its quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub variation_uuid: VariationUuid,
    pub quantity: u32,
}
