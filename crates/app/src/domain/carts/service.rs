//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemRecord, CartSyncReport},
            repository::PgCartItemsRepository,
        },
        products::{records::VariationUuid, repository::PgProductsRepository},
        users::{records::UserUuid, repository::PgUsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items: PgCartItemsRepository,
    users: PgUsersRepository,
    products: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items: PgCartItemsRepository::new(),
            users: PgUsersRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    async fn ensure_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), CartsServiceError> {
        if self.users.user_exists(tx, user).await? {
            Ok(())
        } else {
            Err(CartsServiceError::NotFound)
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_items(&self, user: UserUuid) -> Result<Vec<CartItemRecord>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.ensure_user(&mut tx, user).await?;

        let items = self.items.get_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(items)
    }

    #[tracing::instrument(
        name = "carts.service.add_items",
        skip(self, items),
        fields(user_uuid = %user, item_count = items.len()),
        err
    )]
    async fn add_items(
        &self,
        user: UserUuid,
        items: Vec<NewCartItem>,
    ) -> Result<Vec<CartItemRecord>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.ensure_user(&mut tx, user).await?;

        for item in &items {
            if !self
                .products
                .variation_exists(&mut tx, item.variation_uuid)
                .await?
            {
                return Err(CartsServiceError::NotFound);
            }

            let existing = self
                .items
                .get_cart_item_quantity(&mut tx, user, item.variation_uuid)
                .await?
                .unwrap_or(0);

            let combined = i64::from(existing) + i64::from(item.quantity);

            if combined > i64::from(i32::MAX) {
                return Err(CartsServiceError::InvalidQuantity(combined));
            }

            self.items.add_cart_item(&mut tx, user, item).await?;
        }

        let cart = self.items.get_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        info!(user_uuid = %user, lines = cart.len(), "added items to cart");

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.update_item",
        skip_all,
        fields(user_uuid = %user, variation_uuid = %variation, quantity),
        err
    )]
    async fn update_item(
        &self,
        user: UserUuid,
        variation: VariationUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.ensure_user(&mut tx, user).await?;

        let rows_affected = self
            .items
            .update_cart_item(&mut tx, user, variation, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let item = self.items.get_cart_item(&mut tx, user, variation).await?;

        tx.commit().await?;

        Ok(item)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip_all,
        fields(user_uuid = %user, variation_uuid = %variation),
        err
    )]
    async fn remove_item(
        &self,
        user: UserUuid,
        variation: VariationUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.ensure_user(&mut tx, user).await?;

        let rows_affected = self.items.delete_cart_item(&mut tx, user, variation).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.empty_cart",
        skip_all,
        fields(user_uuid = %user),
        err
    )]
    async fn empty_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.ensure_user(&mut tx, user).await?;

        let removed = self.items.empty_cart(&mut tx, user).await?;

        tx.commit().await?;

        info!(user_uuid = %user, removed, "emptied cart");

        Ok(removed)
    }

    #[tracing::instrument(
        name = "carts.service.sync_cart",
        skip_all,
        fields(user_uuid = %user, changed_lines = tracing::field::Empty),
        err
    )]
    async fn sync_cart(&self, user: UserUuid) -> Result<CartSyncReport, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.ensure_user(&mut tx, user).await?;

        let items = self.items.get_cart_items(&mut tx, user).await?;

        let mut changed_lines = 0_usize;

        for item in items.iter().filter(|item| item.needs_sync()) {
            self.items
                .update_cart_item(&mut tx, user, item.variation_uuid, item.synced_quantity())
                .await?;

            changed_lines += 1;
        }

        Span::current().record("changed_lines", changed_lines);

        let items = if changed_lines > 0 {
            self.items.get_cart_items(&mut tx, user).await?
        } else {
            items
        };

        tx.commit().await?;

        Ok(CartSyncReport {
            changed: changed_lines > 0,
            items,
        })
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve every line item in the user's cart.
    async fn get_items(&self, user: UserUuid) -> Result<Vec<CartItemRecord>, CartsServiceError>;

    /// Add items to the user's cart, incrementing lines that already exist.
    async fn add_items(
        &self,
        user: UserUuid,
        items: Vec<NewCartItem>,
    ) -> Result<Vec<CartItemRecord>, CartsServiceError>;

    /// Set the quantity of an existing line item.
    async fn update_item(
        &self,
        user: UserUuid,
        variation: VariationUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove a line item from the cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        variation: VariationUuid,
    ) -> Result<(), CartsServiceError>;

    /// Remove every line item, returning how many were removed.
    async fn empty_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError>;

    /// Cap line quantities at what the catalog can supply.
    async fn sync_cart(&self, user: UserUuid) -> Result<CartSyncReport, CartsServiceError>;
}

#[cfg(all(test, feature = "database-tests"))]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{ProductsService, data::NewStock, records::StockUuid},
        test::TestContext,
    };

    use super::*;

    fn line(variation: VariationUuid, quantity: u32) -> NewCartItem {
        NewCartItem {
            variation_uuid: variation,
            quantity,
        }
    }

    #[tokio::test]
    async fn adding_an_item_creates_a_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("one@example.com").await;
        let variation = ctx.create_variation(1000).await;

        let items = ctx
            .carts
            .add_items(user.uuid, vec![line(variation.uuid, 1)])
            .await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|item| item.quantity), Some(1));
        assert_eq!(items.first().map(|item| item.unit_price), Some(1000));

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_variation_twice_increments_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("twice@example.com").await;
        let variation = ctx.create_variation(1000).await;

        ctx.carts
            .add_items(user.uuid, vec![line(variation.uuid, 1)])
            .await?;

        let items = ctx
            .carts
            .add_items(user.uuid, vec![line(variation.uuid, 1)])
            .await?;

        assert_eq!(items.len(), 1, "should not duplicate the line");
        assert_eq!(items.first().map(|item| item.quantity), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn adding_unknown_variation_returns_not_found_and_persists_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("unknown@example.com").await;
        let variation = ctx.create_variation(1000).await;

        let result = ctx
            .carts
            .add_items(
                user.uuid,
                vec![line(variation.uuid, 1), line(VariationUuid::new(), 1)],
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE user_uuid = $1")
            .bind(user.uuid.into_uuid())
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(rows, 0, "failed add should roll back");

        Ok(())
    }

    #[tokio::test]
    async fn adding_past_the_storable_quantity_returns_invalid_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("overflow@example.com").await;
        let variation = ctx.create_variation(1000).await;

        ctx.carts
            .add_items(user.uuid, vec![line(variation.uuid, 2_000_000_000)])
            .await?;

        let result = ctx
            .carts
            .add_items(user.uuid, vec![line(variation.uuid, 200_000_000)])
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity(2_200_000_000))),
            "expected InvalidQuantity, got {result:?}"
        );

        let items = ctx.carts.get_items(user.uuid).await?;

        assert_eq!(
            items.first().map(|item| item.quantity),
            Some(2_000_000_000),
            "rejected add should leave the line unchanged"
        );

        Ok(())
    }

    #[tokio::test]
    async fn adding_withdrawn_variation_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("withdrawn@example.com").await;
        let variation = ctx.create_variation(1000).await;

        ctx.products.delete_variation(variation.uuid).await?;

        let result = ctx
            .carts
            .add_items(user.uuid, vec![line(variation.uuid, 1)])
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.get_items(UserUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_overwrites_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("update@example.com").await;
        let variation = ctx.create_variation(1000).await;

        ctx.carts
            .add_items(user.uuid, vec![line(variation.uuid, 1)])
            .await?;

        let item = ctx.carts.update_item(user.uuid, variation.uuid, 2).await?;

        assert_eq!(item.quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_line_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("missing@example.com").await;
        let variation = ctx.create_variation(1000).await;

        let result = ctx.carts.update_item(user.uuid, variation.uuid, 2).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_deletes_the_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("remove@example.com").await;
        let keep = ctx.create_variation(1000).await;
        let drop = ctx.create_variation(500).await;

        ctx.carts
            .add_items(user.uuid, vec![line(keep.uuid, 1), line(drop.uuid, 1)])
            .await?;

        ctx.carts.remove_item(user.uuid, drop.uuid).await?;

        let items = ctx.carts.get_items(user.uuid).await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|item| item.variation_uuid), Some(keep.uuid));

        let again = ctx.carts.remove_item(user.uuid, drop.uuid).await;

        assert!(
            matches!(again, Err(CartsServiceError::NotFound)),
            "expected NotFound on second removal, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_removes_all_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("empty@example.com").await;
        let a = ctx.create_variation(1000).await;
        let b = ctx.create_variation(500).await;

        ctx.carts
            .add_items(user.uuid, vec![line(a.uuid, 1), line(b.uuid, 3)])
            .await?;

        let removed = ctx.carts.empty_cart(user.uuid).await?;
        let items = ctx.carts.get_items(user.uuid).await?;

        assert_eq!(removed, 2);
        assert!(items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn carts_are_scoped_to_their_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = ctx.create_user("alice@example.com").await;
        let bob = ctx.create_user("bob@example.com").await;
        let variation = ctx.create_variation(1000).await;

        ctx.carts
            .add_items(alice.uuid, vec![line(variation.uuid, 1)])
            .await?;

        let items = ctx.carts.get_items(bob.uuid).await?;

        assert!(items.is_empty(), "bob should not see alice's cart");

        Ok(())
    }

    #[tokio::test]
    async fn sync_zeroes_out_of_stock_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("sync@example.com").await;
        let variation = ctx.create_variation(1000).await;

        ctx.carts
            .add_items(user.uuid, vec![line(variation.uuid, 1)])
            .await?;

        let report = ctx.carts.sync_cart(user.uuid).await?;

        assert!(report.changed);
        assert_eq!(report.items.first().map(|item| item.quantity), Some(0));

        Ok(())
    }

    #[tokio::test]
    async fn sync_caps_lines_at_stock_and_reports_no_change_when_reconciled() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("capped@example.com").await;
        let variation = ctx.create_variation(1000).await;

        ctx.products
            .add_stock(NewStock {
                uuid: StockUuid::new(),
                variation_uuid: variation.uuid,
                quantity: 2,
            })
            .await?;

        ctx.carts
            .add_items(user.uuid, vec![line(variation.uuid, 5)])
            .await?;

        let first = ctx.carts.sync_cart(user.uuid).await?;
        let second = ctx.carts.sync_cart(user.uuid).await?;

        assert!(first.changed);
        assert_eq!(first.items.first().map(|item| item.quantity), Some(2));
        assert!(!second.changed, "second sync should be a no-op");

        Ok(())
    }

    #[tokio::test]
    async fn sync_zeroes_withdrawn_variations() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("gone@example.com").await;
        let variation = ctx.create_variation(1000).await;

        ctx.products
            .add_stock(NewStock {
                uuid: StockUuid::new(),
                variation_uuid: variation.uuid,
                quantity: 10,
            })
            .await?;

        ctx.carts
            .add_items(user.uuid, vec![line(variation.uuid, 1)])
            .await?;

        ctx.products.delete_variation(variation.uuid).await?;

        let report = ctx.carts.sync_cart(user.uuid).await?;

        assert!(report.changed);
        assert_eq!(report.items.first().map(|item| item.quantity), Some(0));
        assert_eq!(report.items.first().map(|item| item.purchasable), Some(false));

        Ok(())
    }
}
