//! Money

use std::fmt::{Display, Formatter, Result as FmtResult};

use rusty_money::{Findable, Money as RustyMoney, MoneyError, iso::Currency};

/// An exact amount in minor currency units (e.g. pence).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Money(RustyMoney<'static, Currency>);

impl Money {
    /// Create an amount from minor units.
    #[must_use]
    pub fn from_minor(amount: i64, currency: &'static Currency) -> Self {
        Self(RustyMoney::from_minor(amount, currency))
    }

    /// Zero in the given currency.
    #[must_use]
    pub fn zero(currency: &'static Currency) -> Self {
        Self::from_minor(0, currency)
    }

    /// Amount in minor units.
    #[must_use]
    pub fn amount(&self) -> i64 {
        self.0.to_minor_units()
    }

    /// Currency of this amount.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.0.currency()
    }

    /// Add two amounts, returning `None` when the currencies differ or the
    /// sum does not fit in minor units.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.currency() != other.currency() {
            return None;
        }

        self.amount()
            .checked_add(other.amount())
            .map(|amount| Self::from_minor(amount, self.currency()))
    }

    /// Multiply by a quantity, returning `None` on overflow.
    #[must_use]
    pub fn times(self, quantity: u32) -> Option<Self> {
        self.amount()
            .checked_mul(i64::from(quantity))
            .map(|amount| Self::from_minor(amount, self.currency()))
    }

    /// Human readable amount using the currency's symbol and separators.
    #[must_use]
    pub fn formatted(&self) -> String {
        self.0.to_string()
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Look up an ISO currency by its alpha code.
///
/// # Errors
///
/// Returns [`MoneyError::InvalidCurrency`] for unknown codes.
pub fn find_currency(code: &str) -> Result<&'static Currency, MoneyError> {
    Currency::find(&code.trim().to_ascii_uppercase()).ok_or(MoneyError::InvalidCurrency)
}
