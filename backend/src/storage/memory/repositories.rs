use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;

use super::connection::{MemoryConnection, MemoryStore};
use crate::domain::models::{
    account::{Account, AccountType},
    customer::{Customer, CustomerDetails},
    recipient::{Recipient, RecipientDetails},
};
use crate::storage::traits::{AccountStorage, CustomerStorage, RecipientStorage};

fn load_customer(store: &MemoryStore, customer_id: i64, details: &CustomerDetails) -> Customer {
    Customer {
        id: customer_id,
        details: details.clone(),
        accounts: store
            .accounts
            .values()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect(),
        recipients: store
            .recipients
            .values()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect(),
    }
}

fn ensure_customer(store: &MemoryStore, customer_id: i64) -> Result<()> {
    if store.customers.contains_key(&customer_id) {
        Ok(())
    } else {
        Err(anyhow!("Customer {} does not exist", customer_id))
    }
}

#[derive(Clone)]
pub struct MemoryCustomerRepository {
    conn: MemoryConnection,
}

impl MemoryCustomerRepository {
    pub fn new(conn: MemoryConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CustomerStorage for MemoryCustomerRepository {
    async fn insert_customer(&self, details: &CustomerDetails) -> Result<i64> {
        let mut store = self.conn.store().write().await;
        let id = store.next_id();
        store.customers.insert(id, details.clone());
        Ok(id)
    }

    async fn get_customer(&self, customer_id: i64) -> Result<Option<Customer>> {
        let store = self.conn.store().read().await;
        Ok(store
            .customers
            .get(&customer_id)
            .map(|details| load_customer(&store, customer_id, details)))
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let store = self.conn.store().read().await;
        Ok(store
            .customers
            .iter()
            .map(|(id, details)| load_customer(&store, *id, details))
            .collect())
    }

    async fn update_customer(&self, customer_id: i64, details: &CustomerDetails) -> Result<bool> {
        let mut store = self.conn.store().write().await;
        match store.customers.get_mut(&customer_id) {
            Some(existing) => {
                *existing = details.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_customer(&self, customer_id: i64) -> Result<bool> {
        let mut store = self.conn.store().write().await;
        if !store.customers.contains_key(&customer_id) {
            return Ok(false);
        }
        if store.accounts.values().any(|a| a.customer_id == customer_id) {
            return Err(anyhow!("Customer {} still owns accounts", customer_id));
        }
        store.recipients.retain(|_, r| r.customer_id != customer_id);
        store.customers.remove(&customer_id);
        Ok(true)
    }
}

#[derive(Clone)]
pub struct MemoryAccountRepository {
    conn: MemoryConnection,
}

impl MemoryAccountRepository {
    pub fn new(conn: MemoryConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl AccountStorage for MemoryAccountRepository {
    async fn insert_account(&self, customer_id: i64, account_type: AccountType, balance: Decimal) -> Result<i64> {
        let mut store = self.conn.store().write().await;
        ensure_customer(&store, customer_id)?;
        let id = store.next_id();
        store.accounts.insert(
            id,
            Account {
                id,
                customer_id,
                account_type,
                balance,
            },
        );
        Ok(id)
    }

    async fn get_account(&self, account_id: i64) -> Result<Option<Account>> {
        let store = self.conn.store().read().await;
        Ok(store.accounts.get(&account_id).cloned())
    }

    async fn list_accounts(&self, customer_id: i64) -> Result<Vec<Account>> {
        let store = self.conn.store().read().await;
        Ok(store
            .accounts
            .values()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn update_balance(&self, account_id: i64, balance: Decimal) -> Result<()> {
        self.update_balances(&[(account_id, balance)]).await
    }

    async fn update_balances(&self, updates: &[(i64, Decimal)]) -> Result<()> {
        let mut store = self.conn.store().write().await;
        if let Some((missing, _)) = updates.iter().find(|(id, _)| !store.accounts.contains_key(id)) {
            return Err(anyhow!("Account {} does not exist", missing));
        }
        for (account_id, balance) in updates {
            if let Some(account) = store.accounts.get_mut(account_id) {
                account.balance = *balance;
            }
        }
        Ok(())
    }

    async fn delete_account(&self, account_id: i64) -> Result<bool> {
        let mut store = self.conn.store().write().await;
        Ok(store.accounts.remove(&account_id).is_some())
    }
}

#[derive(Clone)]
pub struct MemoryRecipientRepository {
    conn: MemoryConnection,
}

impl MemoryRecipientRepository {
    pub fn new(conn: MemoryConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RecipientStorage for MemoryRecipientRepository {
    async fn insert_recipient(&self, customer_id: i64, details: &RecipientDetails) -> Result<i64> {
        let mut store = self.conn.store().write().await;
        ensure_customer(&store, customer_id)?;
        let id = store.next_id();
        store
            .recipients
            .insert(id, Recipient::from_details(id, customer_id, details.clone()));
        Ok(id)
    }

    async fn get_recipient(&self, recipient_id: i64) -> Result<Option<Recipient>> {
        let store = self.conn.store().read().await;
        Ok(store.recipients.get(&recipient_id).cloned())
    }

    async fn list_recipients(&self, customer_id: i64) -> Result<Vec<Recipient>> {
        let store = self.conn.store().read().await;
        Ok(store
            .recipients
            .values()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn update_recipient(&self, recipient: &Recipient) -> Result<()> {
        let mut store = self.conn.store().write().await;
        let existing = store
            .recipients
            .get_mut(&recipient.id)
            .ok_or_else(|| anyhow!("Recipient {} does not exist", recipient.id))?;
        *existing = recipient.clone();
        Ok(())
    }

    async fn delete_recipient(&self, recipient_id: i64) -> Result<bool> {
        let mut store = self.conn.store().write().await;
        Ok(store.recipients.remove(&recipient_id).is_some())
    }
}
