//! Shopping cart domain, persistence and money handling.

pub mod context;
pub mod database;
pub mod domain;
pub mod money;

#[cfg(all(test, feature = "database-tests"))]
mod test;

mod uuids;

pub use uuids::TypedUuid;
