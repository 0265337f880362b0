//! Cart
//!
//! A request-scoped view over one user's cart. Mutations go straight through
//! to the [`CartsService`]; totals are computed from the line items as stored,
//! and [`Cart::has_changed`] remembers the outcome of the most recent
//! [`Cart::sync`].

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::info;

use crate::{
    domain::{
        carts::{
            data::NewCartItem, errors::CartsServiceError, records::CartItemRecord,
            service::CartsService,
        },
        products::records::VariationUuid,
        shipping::records::ShippingMethodRecord,
        users::records::UserUuid,
    },
    money::Money,
};

/// Errors raised by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Wrapped persistence error, including `NotFound` for unknown users,
    /// variations or line items.
    #[error(transparent)]
    Service(CartsServiceError),

    /// A quantity was zero, negative or too large to store.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A line or cart total does not fit in the money representation.
    #[error("cart amount overflowed")]
    AmountOverflow,
}

impl From<CartsServiceError> for CartError {
    fn from(error: CartsServiceError) -> Self {
        match error {
            CartsServiceError::InvalidQuantity(quantity) => Self::InvalidQuantity(quantity),
            error => Self::Service(error),
        }
    }
}

impl CartError {
    /// Whether the user, variation or line item does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Service(CartsServiceError::NotFound))
    }
}

/// A variation and quantity to add to a cart, as supplied by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub variation: VariationUuid,
    pub quantity: i64,
}

impl CartLine {
    #[must_use]
    pub fn new(variation: VariationUuid, quantity: i64) -> Self {
        Self {
            variation,
            quantity,
        }
    }
}

/// A priced line item.
#[derive(Debug, Clone)]
pub struct CartSummaryLine {
    pub item: CartItemRecord,
    pub unit_price: Money,
    pub line_total: Money,
}

/// A cart's lines and totals as of one read.
#[derive(Debug, Clone)]
pub struct CartSummary {
    pub lines: Vec<CartSummaryLine>,
    pub subtotal: Money,
    pub shipping: Option<Money>,
    pub total: Money,
}

impl CartSummary {
    /// Whether every line has a quantity of zero.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.item.quantity == 0)
    }
}

/// One user's cart.
pub struct Cart {
    service: Arc<dyn CartsService>,
    user: UserUuid,
    currency: &'static Currency,
    shipping: Option<u64>,
    changed: bool,
}

impl Cart {
    #[must_use]
    pub fn new(
        service: Arc<dyn CartsService>,
        user: UserUuid,
        currency: &'static Currency,
    ) -> Self {
        Self {
            service,
            user,
            currency,
            shipping: None,
            changed: false,
        }
    }

    /// Include the given shipping method's price in [`Cart::total`].
    #[must_use]
    pub fn with_shipping(mut self, method: &ShippingMethodRecord) -> Self {
        self.shipping = Some(method.price);
        self
    }

    /// The cart owner.
    pub fn user(&self) -> UserUuid {
        self.user
    }

    /// Currency used for totals.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The cart's current line items.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Service`] when the user does not exist or storage fails.
    pub async fn items(&self) -> Result<Vec<CartItemRecord>, CartError> {
        Ok(self.service.get_items(self.user).await?)
    }

    /// Add lines to the cart. Lines for variations already in the cart
    /// increase the stored quantity; duplicate variations within `lines` are
    /// merged first.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: a quantity, or a line's new total, is
    ///   not a positive storable integer.
    /// - [`CartError::Service`]: the user or a variation does not exist, or storage failed.
    pub async fn add(&self, lines: &[CartLine]) -> Result<Vec<CartItemRecord>, CartError> {
        let items = merge_lines(lines)?;

        Ok(self.service.add_items(self.user, items).await?)
    }

    /// Set the quantity of a line already in the cart.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: the quantity is not a positive storable integer.
    /// - [`CartError::Service`]: the line item does not exist, or storage failed.
    pub async fn update(
        &self,
        variation: VariationUuid,
        quantity: i64,
    ) -> Result<CartItemRecord, CartError> {
        let quantity = validate_quantity(quantity)?;

        Ok(self
            .service
            .update_item(self.user, variation, quantity)
            .await?)
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Service`] when the line item does not exist or storage fails.
    pub async fn delete(&self, variation: VariationUuid) -> Result<(), CartError> {
        Ok(self.service.remove_item(self.user, variation).await?)
    }

    /// Remove every line, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Service`] when the user does not exist or storage fails.
    pub async fn empty(&self) -> Result<u64, CartError> {
        Ok(self.service.empty_cart(self.user).await?)
    }

    /// Whether the cart holds nothing, counting zero-quantity lines as absent.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Service`] when the user does not exist or storage fails.
    pub async fn is_empty(&self) -> Result<bool, CartError> {
        Ok(is_empty(&self.items().await?))
    }

    /// Sum of unit price times quantity over every line.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when loading items fails or the sum overflows.
    pub async fn subtotal(&self) -> Result<Money, CartError> {
        Ok(self.summary().await?.subtotal)
    }

    /// Subtotal plus shipping, when a shipping method has been chosen.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when loading items fails or the sum overflows.
    pub async fn total(&self) -> Result<Money, CartError> {
        Ok(self.summary().await?.total)
    }

    /// Lines and totals priced from a single read of the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when loading items fails or a sum overflows.
    pub async fn summary(&self) -> Result<CartSummary, CartError> {
        let items = self.items().await?;

        let mut lines = Vec::with_capacity(items.len());
        let mut subtotal = Money::zero(self.currency);

        for item in items {
            let (unit_price, line_total) = price_line(&item, self.currency)?;

            subtotal = checked_sum(subtotal, line_total)?;

            lines.push(CartSummaryLine {
                item,
                unit_price,
                line_total,
            });
        }

        let shipping = self
            .shipping
            .map(|price| to_money(price, self.currency))
            .transpose()?;

        let total = match shipping {
            Some(shipping) => checked_sum(subtotal, shipping)?,
            None => subtotal,
        };

        Ok(CartSummary {
            lines,
            subtotal,
            shipping,
            total,
        })
    }

    /// Reconcile line quantities with the catalog, returning whether any
    /// line changed. The result is also available from [`Cart::has_changed`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Service`] when the user does not exist or storage fails.
    pub async fn sync(&mut self) -> Result<bool, CartError> {
        let report = self.service.sync_cart(self.user).await?;

        self.changed = report.changed;

        if report.changed {
            info!(user_uuid = %self.user, "cart quantities changed during sync");
        }

        Ok(report.changed)
    }

    /// Whether the most recent [`Cart::sync`] altered any line.
    pub fn has_changed(&self) -> bool {
        self.changed
    }
}

impl Debug for Cart {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Cart")
            .field("user", &self.user)
            .field("currency", &self.currency.iso_alpha_code)
            .field("shipping", &self.shipping)
            .field("changed", &self.changed)
            .finish_non_exhaustive()
    }
}

/// Whether the sum of line quantities is zero.
pub fn is_empty(items: &[CartItemRecord]) -> bool {
    items.iter().all(|item| item.quantity == 0)
}

/// Unit price and line total for one line item.
fn price_line(
    item: &CartItemRecord,
    currency: &'static Currency,
) -> Result<(Money, Money), CartError> {
    let unit_price = to_money(item.unit_price, currency)?;

    let line_total = unit_price
        .times(item.quantity)
        .ok_or(CartError::AmountOverflow)?;

    Ok((unit_price, line_total))
}

fn checked_sum(acc: Money, amount: Money) -> Result<Money, CartError> {
    acc.checked_add(amount).ok_or(CartError::AmountOverflow)
}

fn to_money(amount: u64, currency: &'static Currency) -> Result<Money, CartError> {
    let amount = i64::try_from(amount).map_err(|_err| CartError::AmountOverflow)?;

    Ok(Money::from_minor(amount, currency))
}

/// Check a caller-supplied quantity is positive and fits the storage column.
fn validate_quantity(quantity: i64) -> Result<u32, CartError> {
    if quantity <= 0 {
        return Err(CartError::InvalidQuantity(quantity));
    }

    i32::try_from(quantity)
        .ok()
        .and_then(|quantity| u32::try_from(quantity).ok())
        .ok_or(CartError::InvalidQuantity(quantity))
}

fn merge_lines(lines: &[CartLine]) -> Result<Vec<NewCartItem>, CartError> {
    let mut merged: Vec<NewCartItem> = Vec::with_capacity(lines.len());

    for line in lines {
        let quantity = validate_quantity(line.quantity)?;

        match merged
            .iter_mut()
            .find(|item| item.variation_uuid == line.variation)
        {
            Some(existing) => {
                let combined = i64::from(existing.quantity) + i64::from(quantity);

                existing.quantity = validate_quantity(combined)?;
            }
            None => merged.push(NewCartItem {
                variation_uuid: line.variation,
                quantity,
            }),
        }
    }

    Ok(merged)
}
