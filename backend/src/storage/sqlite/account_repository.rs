use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row};

use super::{from_cents, to_cents, SqliteConnection};
use crate::domain::models::account::{Account, AccountType};
use crate::storage::traits::AccountStorage;

/// Repository for account operations
#[derive(Clone)]
pub struct AccountRepository {
    db: SqliteConnection,
}

impl AccountRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

pub(super) fn account_from_row(row: &SqliteRow) -> Result<Account> {
    let account_type: String = row.try_get("account_type")?;
    Ok(Account {
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        account_type: account_type.parse::<AccountType>()?,
        balance: from_cents(row.try_get("balance_cents")?),
    })
}

#[async_trait]
impl AccountStorage for AccountRepository {
    async fn insert_account(&self, customer_id: i64, account_type: AccountType, balance: Decimal) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (customer_id, account_type, balance_cents)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(customer_id)
        .bind(account_type.as_str())
        .bind(to_cents(balance)?)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_account(&self, account_id: i64) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, account_type, balance_cents
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(account_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn list_accounts(&self, customer_id: i64) -> Result<Vec<Account>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, account_type, balance_cents
            FROM accounts
            WHERE customer_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(account_from_row).collect()
    }

    async fn update_balance(&self, account_id: i64, balance: Decimal) -> Result<()> {
        self.update_balances(&[(account_id, balance)]).await
    }

    async fn update_balances(&self, updates: &[(i64, Decimal)]) -> Result<()> {
        let rows = updates
            .iter()
            .map(|(account_id, balance)| Ok((*account_id, to_cents(*balance)?)))
            .collect::<Result<Vec<(i64, i64)>>>()?;

        let mut tx = self.db.pool().begin().await?;

        for (account_id, cents) in rows {
            let result = sqlx::query("UPDATE accounts SET balance_cents = ? WHERE id = ?")
                .bind(cents)
                .bind(account_id)
                .execute(&mut *tx)
                .await?;
            // Dropping the transaction rolls back earlier updates
            if result.rows_affected() == 0 {
                return Err(anyhow!("Account {} does not exist", account_id));
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_account(&self, account_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(account_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
