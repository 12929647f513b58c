use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};
use std::collections::HashMap;

use super::{account_repository::account_from_row, recipient_repository::recipient_from_row, SqliteConnection};
use crate::domain::models::{
    account::Account,
    customer::{Customer, CustomerDetails},
    recipient::Recipient,
};
use crate::storage::traits::CustomerStorage;

/// Repository for customer operations
#[derive(Clone)]
pub struct CustomerRepository {
    db: SqliteConnection,
}

impl CustomerRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

fn customer_from_row(row: &SqliteRow, accounts: Vec<Account>, recipients: Vec<Recipient>) -> Result<Customer> {
    Ok(Customer {
        id: row.try_get("id")?,
        details: CustomerDetails {
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
        },
        accounts,
        recipients,
    })
}

#[async_trait]
impl CustomerStorage for CustomerRepository {
    async fn insert_customer(&self, details: &CustomerDetails) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (first_name, last_name, email, phone)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&details.first_name)
        .bind(&details.last_name)
        .bind(&details.email)
        .bind(&details.phone)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_customer(&self, customer_id: i64) -> Result<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, phone
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(customer_id)
        .fetch_optional(self.db.pool())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let accounts = sqlx::query(
            "SELECT id, customer_id, account_type, balance_cents FROM accounts WHERE customer_id = ? ORDER BY id ASC",
        )
        .bind(customer_id)
        .fetch_all(self.db.pool())
        .await?
        .iter()
        .map(account_from_row)
        .collect::<Result<Vec<_>>>()?;

        let recipients = sqlx::query(
            r#"
            SELECT id, customer_id, account_number, name, email, phone, description
            FROM recipients
            WHERE customer_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(self.db.pool())
        .await?
        .iter()
        .map(recipient_from_row)
        .collect::<Result<Vec<_>>>()?;

        customer_from_row(&row, accounts, recipients).map(Some)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, phone
            FROM customers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let mut accounts_by_customer: HashMap<i64, Vec<Account>> = HashMap::new();
        for row in sqlx::query("SELECT id, customer_id, account_type, balance_cents FROM accounts ORDER BY id ASC")
            .fetch_all(self.db.pool())
            .await?
        {
            let account = account_from_row(&row)?;
            accounts_by_customer.entry(account.customer_id).or_default().push(account);
        }

        let mut recipients_by_customer: HashMap<i64, Vec<Recipient>> = HashMap::new();
        for row in sqlx::query(
            "SELECT id, customer_id, account_number, name, email, phone, description FROM recipients ORDER BY id ASC",
        )
        .fetch_all(self.db.pool())
        .await?
        {
            let recipient = recipient_from_row(&row)?;
            recipients_by_customer.entry(recipient.customer_id).or_default().push(recipient);
        }

        rows.iter()
            .map(|row| {
                let id: i64 = row.try_get("id")?;
                customer_from_row(
                    row,
                    accounts_by_customer.remove(&id).unwrap_or_default(),
                    recipients_by_customer.remove(&id).unwrap_or_default(),
                )
            })
            .collect()
    }

    async fn update_customer(&self, customer_id: i64, details: &CustomerDetails) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET first_name = ?, last_name = ?, email = ?, phone = ?
            WHERE id = ?
            "#,
        )
        .bind(&details.first_name)
        .bind(&details.last_name)
        .bind(&details.email)
        .bind(&details.phone)
        .bind(customer_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_customer(&self, customer_id: i64) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query("DELETE FROM recipients WHERE customer_id = ?")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
