//! Shipping service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::shipping::{
        data::NewShippingMethod,
        errors::ShippingServiceError,
        records::{ShippingMethodRecord, ShippingMethodUuid},
        repository::PgShippingRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgShippingService {
    db: Db,
    repository: PgShippingRepository,
}

impl PgShippingService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgShippingRepository::new(),
        }
    }
}

#[async_trait]
impl ShippingService for PgShippingService {
    #[tracing::instrument(
        name = "shipping.service.create_shipping_method",
        skip(self, method),
        fields(shipping_method_uuid = %method.uuid, price = method.price),
        err
    )]
    async fn create_shipping_method(
        &self,
        method: NewShippingMethod,
    ) -> Result<ShippingMethodRecord, ShippingServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_shipping_method(&mut tx, method)
            .await?;

        tx.commit().await?;

        info!(shipping_method_uuid = %created.uuid, "created shipping method");

        Ok(created)
    }

    async fn get_shipping_method(
        &self,
        method: ShippingMethodUuid,
    ) -> Result<ShippingMethodRecord, ShippingServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let method = self.repository.get_shipping_method(&mut tx, method).await?;

        tx.commit().await?;

        Ok(method)
    }
}

#[automock]
#[async_trait]
pub trait ShippingService: Send + Sync {
    /// Creates a new shipping method.
    async fn create_shipping_method(
        &self,
        method: NewShippingMethod,
    ) -> Result<ShippingMethodRecord, ShippingServiceError>;

    /// Retrieve a single shipping method.
    async fn get_shipping_method(
        &self,
        method: ShippingMethodUuid,
    ) -> Result<ShippingMethodRecord, ShippingServiceError>;
}
