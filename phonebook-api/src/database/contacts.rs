use async_trait::async_trait;
use shared_types::Contact;
use sqlx::postgres::PgPool;
use sqlx::FromRow;

use crate::database::{ContactStore, StoreResult};

#[derive(Debug, FromRow)]
struct ContactRow {
    phonenumber: String,
    fullname: String,
    address: String,
    email: String,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            phone_number: row.phonenumber,
            full_name: row.fullname,
            address: row.address,
            email: row.email,
        }
    }
}

/// Postgres-backed store over a shared connection pool.
#[derive(Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        let rows: Vec<ContactRow> =
            sqlx::query_as("SELECT phonenumber, fullname, address, email FROM contacts")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn insert_contact(&self, contact: &Contact) -> StoreResult<i64> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO contacts (phonenumber, fullname, address, email)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&contact.phone_number)
        .bind(&contact.full_name)
        .bind(&contact.address)
        .bind(&contact.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(i64::from(id))
    }

    async fn delete_contacts_by_phone_number(&self, phone_number: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM contacts WHERE phonenumber = $1")
            .bind(phone_number)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_contacts_by_full_name(&self, full_name: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM contacts WHERE fullname = $1")
            .bind(full_name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_all_contacts(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM contacts")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn search_contacts_by_full_name(&self, pattern: &str) -> StoreResult<Vec<Contact>> {
        // ~* is Postgres' case-insensitive POSIX regex match
        let rows: Vec<ContactRow> = sqlx::query_as(
            "SELECT phonenumber, fullname, address, email FROM contacts WHERE fullname ~* $1",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
