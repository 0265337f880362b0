//! Carthorse Domain Concerns

pub mod carts;
pub mod products;
pub mod shipping;
pub mod users;
