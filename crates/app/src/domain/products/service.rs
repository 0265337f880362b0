//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, NewStock, NewVariation},
        errors::ProductsServiceError,
        records::{ProductRecord, StockRecord, VariationRecord, VariationUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_uuid = %product.uuid, price = product.price),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        info!(product_uuid = %created.uuid, "created product");

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.create_variation",
        skip(self, variation),
        fields(
            variation_uuid = %variation.uuid,
            product_uuid = %variation.product_uuid,
            has_price_override = variation.price.is_some()
        ),
        err
    )]
    async fn create_variation(
        &self,
        variation: NewVariation,
    ) -> Result<VariationRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let uuid = self.repository.create_variation(&mut tx, variation).await?;
        let created = self.repository.get_variation(&mut tx, uuid).await?;

        tx.commit().await?;

        info!(variation_uuid = %created.uuid, "created variation");

        Ok(created)
    }

    async fn get_variation(
        &self,
        variation: VariationUuid,
    ) -> Result<VariationRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let variation = self.repository.get_variation(&mut tx, variation).await?;

        tx.commit().await?;

        Ok(variation)
    }

    #[tracing::instrument(
        name = "products.service.add_stock",
        skip(self, stock),
        fields(variation_uuid = %stock.variation_uuid, quantity = stock.quantity),
        err
    )]
    async fn add_stock(&self, stock: NewStock) -> Result<StockRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        if !self
            .repository
            .variation_exists(&mut tx, stock.variation_uuid)
            .await?
        {
            return Err(ProductsServiceError::NotFound);
        }

        let created = self.repository.create_stock(&mut tx, stock).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.delete_variation",
        skip_all,
        fields(variation_uuid = %variation),
        err
    )]
    async fn delete_variation(&self, variation: VariationUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_variation(&mut tx, variation).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(variation_uuid = %variation, "deleted variation");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Creates a new product with the given UUID, name and price.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a purchasable variation of an existing product.
    async fn create_variation(
        &self,
        variation: NewVariation,
    ) -> Result<VariationRecord, ProductsServiceError>;

    /// Retrieve a single purchasable variation with its resolved price and stock.
    async fn get_variation(
        &self,
        variation: VariationUuid,
    ) -> Result<VariationRecord, ProductsServiceError>;

    /// Records a stock movement for a variation.
    async fn add_stock(&self, stock: NewStock) -> Result<StockRecord, ProductsServiceError>;

    /// Withdraws a variation from sale.
    async fn delete_variation(&self, variation: VariationUuid) -> Result<(), ProductsServiceError>;
}
