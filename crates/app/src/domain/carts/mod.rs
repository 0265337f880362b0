//! Carts

pub mod cart;
pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use cart::{Cart, CartError, CartLine, CartSummary, CartSummaryLine};
pub use errors::CartsServiceError;
pub use service::*;
