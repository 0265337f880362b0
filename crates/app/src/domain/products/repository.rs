//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
};
use uuid::Uuid;

use crate::{
    database::{encode_amount, try_get_amount},
    domain::products::{
        data::{NewProduct, NewStock, NewVariation},
        records::{
            ProductRecord, ProductUuid, StockRecord, StockUuid, VariationRecord, VariationUuid,
        },
    },
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const CREATE_VARIATION_SQL: &str = include_str!("sql/create_variation.sql");
const GET_VARIATION_SQL: &str = include_str!("sql/get_variation.sql");
const VARIATION_EXISTS_SQL: &str = include_str!("sql/variation_exists.sql");
const CREATE_STOCK_SQL: &str = include_str!("sql/create_stock.sql");
const DELETE_VARIATION_SQL: &str = include_str!("sql/delete_variation.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(encode_amount(product.price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_variation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variation: NewVariation,
    ) -> Result<VariationUuid, sqlx::Error> {
        let price = variation.price.map(encode_amount).transpose()?;

        let created = query_scalar::<Postgres, Uuid>(CREATE_VARIATION_SQL)
            .bind(variation.uuid.into_uuid())
            .bind(variation.product_uuid.into_uuid())
            .bind(variation.name)
            .bind(price)
            .fetch_one(&mut **tx)
            .await?;

        Ok(VariationUuid::from_uuid(created))
    }

    pub(crate) async fn get_variation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variation: VariationUuid,
    ) -> Result<VariationRecord, sqlx::Error> {
        query_as::<Postgres, VariationRecord>(GET_VARIATION_SQL)
            .bind(variation.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Whether the variation exists and is still purchasable.
    pub(crate) async fn variation_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variation: VariationUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(VARIATION_EXISTS_SQL)
            .bind(variation.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        stock: NewStock,
    ) -> Result<StockRecord, sqlx::Error> {
        query_as::<Postgres, StockRecord>(CREATE_STOCK_SQL)
            .bind(stock.uuid.into_uuid())
            .bind(stock.variation_uuid.into_uuid())
            .bind(stock.quantity)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_variation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variation: VariationUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_VARIATION_SQL)
            .bind(variation.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VariationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VariationUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_amount(row, "stock")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StockRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: StockUuid::from_uuid(row.try_get("uuid")?),
            variation_uuid: VariationUuid::from_uuid(row.try_get("variation_uuid")?),
            quantity: row.try_get("quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
