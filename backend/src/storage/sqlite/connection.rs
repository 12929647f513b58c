use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use super::{
    account_repository::AccountRepository, customer_repository::CustomerRepository,
    recipient_repository::RecipientRepository,
};
use crate::storage::traits::Connection;

/// SqliteConnection owns the connection pool shared by the SQLite repositories
#[derive(Clone)]
pub struct SqliteConnection {
    pool: Arc<SqlitePool>,
}

impl SqliteConnection {
    /// Open (creating if needed) the database at `url` and set up the schema
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid SQLite database URL: {}", url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open SQLite database {}", url))?;

        Self::setup_schema(&pool).await?;
        info!("SQLite storage ready at {}", url);

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Private in-memory database, gone once the connection is dropped
    ///
    /// The pool is pinned to a single connection that never expires, since
    /// every new SQLite memory connection would see an empty database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS customers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Accounts are not cascaded: a customer owning accounts cannot be deleted
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                customer_id INTEGER NOT NULL,
                account_type TEXT NOT NULL CHECK (account_type IN ('CHECKING', 'SAVINGS')),
                balance_cents INTEGER NOT NULL,
                FOREIGN KEY (customer_id) REFERENCES customers (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_accounts_customer_id
            ON accounts(customer_id);
            "#,
        )
        .execute(pool)
        .await?;

        // account_number is deliberately not a foreign key, the target account may be closed later
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS recipients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                customer_id INTEGER NOT NULL,
                account_number INTEGER NOT NULL,
                name TEXT NOT NULL,
                email TEXT,
                phone TEXT,
                description TEXT,
                FOREIGN KEY (customer_id) REFERENCES customers (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_recipients_customer_id
            ON recipients(customer_id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for SqliteConnection {
    type CustomerRepository = CustomerRepository;
    type AccountRepository = AccountRepository;
    type RecipientRepository = RecipientRepository;

    fn create_customer_repository(&self) -> Self::CustomerRepository {
        CustomerRepository::new(self.clone())
    }

    fn create_account_repository(&self) -> Self::AccountRepository {
        AccountRepository::new(self.clone())
    }

    fn create_recipient_repository(&self) -> Self::RecipientRepository {
        RecipientRepository::new(self.clone())
    }
}
