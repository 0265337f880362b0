//! App Context

use std::sync::Arc;

use rusty_money::{MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{Cart, CartsService, PgCartsService},
        products::{PgProductsService, ProductsService},
        shipping::{PgShippingService, ShippingService},
        users::{PgUsersService, UsersService, records::UserUuid},
    },
    money::find_currency,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("unknown currency code: {0}")]
    Currency(String, #[source] MoneyError),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub products: Arc<dyn ProductsService>,
    pub shipping: Arc<dyn ShippingService>,
    pub carts: Arc<dyn CartsService>,
    pub currency: &'static Currency,
}

impl AppContext {
    /// Build application context from a database URL and ISO currency code.
    ///
    /// # Errors
    ///
    /// Returns an error when the currency code is unknown or establishing a
    /// database connection fails.
    pub async fn from_database_url(url: &str, currency: &str) -> Result<Self, AppInitError> {
        let currency = find_currency(currency)
            .map_err(|error| AppInitError::Currency(currency.to_string(), error))?;

        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(&Db::new(pool), currency))
    }

    #[must_use]
    pub fn from_db(db: &Db, currency: &'static Currency) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            shipping: Arc::new(PgShippingService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            currency,
        }
    }

    /// A cart session for the given user in the configured currency.
    #[must_use]
    pub fn cart_for(&self, user: UserUuid) -> Cart {
        Cart::new(Arc::clone(&self.carts), user, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::MockCartsService, products::MockProductsService,
            shipping::MockShippingService, users::MockUsersService,
        },
        money::Money,
    };

    use super::*;

    fn context(carts: MockCartsService, currency: &'static Currency) -> AppContext {
        AppContext {
            users: Arc::new(MockUsersService::new()),
            products: Arc::new(MockProductsService::new()),
            shipping: Arc::new(MockShippingService::new()),
            carts: Arc::new(carts),
            currency,
        }
    }

    #[tokio::test]
    async fn cart_for_uses_context_currency() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_get_items().returning(|_| Ok(Vec::new()));

        let cart = context(carts, iso::EUR).cart_for(UserUuid::new());

        assert_eq!(cart.currency(), iso::EUR);
        assert_eq!(cart.total().await?, Money::zero(iso::EUR));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_currency_is_rejected_before_connecting() {
        let result = AppContext::from_database_url("postgres://localhost:1/none", "ZZZ").await;

        assert!(
            matches!(result, Err(AppInitError::Currency(ref code, _)) if code == "ZZZ"),
            "expected an unknown currency error"
        );
    }
}
