//! Shipping Data

use crate::domain::shipping::records::ShippingMethodUuid;

/// New Shipping Method Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewShippingMethod {
    pub uuid: ShippingMethodUuid,
    pub name: String,
    pub price: u64,
}
