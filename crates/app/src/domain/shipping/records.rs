//! Shipping Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Shipping Method UUID
pub type ShippingMethodUuid = TypedUuid<ShippingMethodRecord>;

/// Shipping Method Record
#[derive(Debug, Clone)]
pub struct ShippingMethodRecord {
    pub uuid: ShippingMethodUuid,
    pub name: String,
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
