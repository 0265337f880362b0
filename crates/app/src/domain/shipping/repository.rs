//! Shipping Methods Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{encode_amount, try_get_amount},
    domain::shipping::{
        data::NewShippingMethod,
        records::{ShippingMethodRecord, ShippingMethodUuid},
    },
};

const CREATE_SHIPPING_METHOD_SQL: &str = include_str!("sql/create_shipping_method.sql");
const GET_SHIPPING_METHOD_SQL: &str = include_str!("sql/get_shipping_method.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgShippingRepository;

impl PgShippingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_shipping_method(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        method: NewShippingMethod,
    ) -> Result<ShippingMethodRecord, sqlx::Error> {
        query_as::<Postgres, ShippingMethodRecord>(CREATE_SHIPPING_METHOD_SQL)
            .bind(method.uuid.into_uuid())
            .bind(method.name)
            .bind(encode_amount(method.price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_shipping_method(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        method: ShippingMethodUuid,
    ) -> Result<ShippingMethodRecord, sqlx::Error> {
        query_as::<Postgres, ShippingMethodRecord>(GET_SHIPPING_METHOD_SQL)
            .bind(method.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ShippingMethodRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ShippingMethodUuid::from_uuid(row.try_get("uuid")?),
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
