//! Customers Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    customers::{
        data::{CustomerUpdate, NewCustomer},
        records::{CustomerRecord, CustomerUuid},
    },
    users::records::UserUuid,
};

const CREATE_CUSTOMER_SQL: &str = include_str!("sql/create_customer.sql");
const LIST_CUSTOMERS_SQL: &str = include_str!("sql/list_customers.sql");
const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const LOCK_CUSTOMER_SQL: &str = include_str!("sql/lock_customer.sql");
const FIND_CUSTOMER_BY_USER_SQL: &str = include_str!("sql/find_customer_by_user.sql");
const UPDATE_CUSTOMER_SQL: &str = include_str!("sql/update_customer.sql");
const DELETE_CUSTOMER_SQL: &str = include_str!("sql/delete_customer.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(CREATE_CUSTOMER_SQL)
            .bind(customer.uuid.into_uuid())
            .bind(customer.user_uuid.into_uuid())
            .bind(customer.phone_number)
            .bind(customer.birth_date.map(SqlxDate::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CustomerRecord>, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(LIST_CUSTOMERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(GET_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a customer and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(LOCK_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_customer_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CustomerRecord>, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(FIND_CUSTOMER_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        update: CustomerUpdate,
    ) -> Result<CustomerRecord, sqlx::Error> {
        let birth_date = update.birth_date;

        query_as::<Postgres, CustomerRecord>(UPDATE_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .bind(update.phone_number)
            .bind(birth_date.is_some())
            .bind(birth_date.flatten().map(SqlxDate::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CustomerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CustomerUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            phone_number: row.try_get("phone_number")?,
            birth_date: row
                .try_get::<Option<SqlxDate>, _>("birth_date")?
                .map(SqlxDate::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
