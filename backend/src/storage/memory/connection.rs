use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::repositories::{MemoryAccountRepository, MemoryCustomerRepository, MemoryRecipientRepository};
use crate::domain::models::{account::Account, customer::CustomerDetails, recipient::Recipient};
use crate::storage::traits::Connection;

/// Tables of the in-memory store. Ids come from one shared sequence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    last_id: i64,
    pub(crate) customers: BTreeMap<i64, CustomerDetails>,
    pub(crate) accounts: BTreeMap<i64, Account>,
    pub(crate) recipients: BTreeMap<i64, Recipient>,
}

impl MemoryStore {
    pub(crate) fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// Handle on a shared in-memory store; clones see the same data
#[derive(Clone, Default)]
pub struct MemoryConnection {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn store(&self) -> &RwLock<MemoryStore> {
        &self.store
    }
}

impl Connection for MemoryConnection {
    type CustomerRepository = MemoryCustomerRepository;
    type AccountRepository = MemoryAccountRepository;
    type RecipientRepository = MemoryRecipientRepository;

    fn create_customer_repository(&self) -> Self::CustomerRepository {
        MemoryCustomerRepository::new(self.clone())
    }

    fn create_account_repository(&self) -> Self::AccountRepository {
        MemoryAccountRepository::new(self.clone())
    }

    fn create_recipient_repository(&self) -> Self::RecipientRepository {
        MemoryRecipientRepository::new(self.clone())
    }
}
