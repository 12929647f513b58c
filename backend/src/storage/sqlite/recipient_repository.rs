use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use super::SqliteConnection;
use crate::domain::models::recipient::{Recipient, RecipientDetails};
use crate::storage::traits::RecipientStorage;

/// Repository for recipient operations
#[derive(Clone)]
pub struct RecipientRepository {
    db: SqliteConnection,
}

impl RecipientRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

pub(super) fn recipient_from_row(row: &SqliteRow) -> Result<Recipient> {
    Ok(Recipient {
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        account_number: row.try_get("account_number")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        description: row.try_get("description")?,
    })
}

#[async_trait]
impl RecipientStorage for RecipientRepository {
    async fn insert_recipient(&self, customer_id: i64, details: &RecipientDetails) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO recipients (customer_id, account_number, name, email, phone, description)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(customer_id)
        .bind(details.account_number)
        .bind(&details.name)
        .bind(&details.email)
        .bind(&details.phone)
        .bind(&details.description)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_recipient(&self, recipient_id: i64) -> Result<Option<Recipient>> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, account_number, name, email, phone, description
            FROM recipients
            WHERE id = ?
            "#,
        )
        .bind(recipient_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(recipient_from_row).transpose()
    }

    async fn list_recipients(&self, customer_id: i64) -> Result<Vec<Recipient>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, account_number, name, email, phone, description
            FROM recipients
            WHERE customer_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(recipient_from_row).collect()
    }

    async fn update_recipient(&self, recipient: &Recipient) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE recipients
            SET account_number = ?, name = ?, email = ?, phone = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(recipient.account_number)
        .bind(&recipient.name)
        .bind(&recipient.email)
        .bind(&recipient.phone)
        .bind(&recipient.description)
        .bind(recipient.id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Recipient {} does not exist", recipient.id));
        }
        Ok(())
    }

    async fn delete_recipient(&self, recipient_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM recipients WHERE id = ?")
            .bind(recipient_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
