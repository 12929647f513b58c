//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::models::{
    account::{Account, AccountType},
    customer::{Customer, CustomerDetails},
    recipient::{Recipient, RecipientDetails},
};

/// Trait defining the interface for customer storage operations
///
/// Customers are returned fully loaded: their accounts and recipients are
/// part of the returned value.
#[async_trait]
pub trait CustomerStorage: Send + Sync {
    /// Store a new customer and return its generated id
    async fn insert_customer(&self, details: &CustomerDetails) -> Result<i64>;

    /// Retrieve a customer by ID, with its accounts and recipients
    async fn get_customer(&self, customer_id: i64) -> Result<Option<Customer>>;

    /// List all customers ordered by id
    async fn list_customers(&self) -> Result<Vec<Customer>>;

    /// Replace the profile of an existing customer
    /// Returns false if the customer does not exist
    async fn update_customer(&self, customer_id: i64, details: &CustomerDetails) -> Result<bool>;

    /// Delete a customer together with its recipients
    /// Returns true if the customer was found and deleted
    async fn delete_customer(&self, customer_id: i64) -> Result<bool>;
}

/// Trait defining the interface for account storage operations
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Store a new account for a customer and return its generated id
    async fn insert_account(&self, customer_id: i64, account_type: AccountType, balance: Decimal) -> Result<i64>;

    /// Retrieve an account by ID
    async fn get_account(&self, account_id: i64) -> Result<Option<Account>>;

    /// List the accounts of a customer ordered by id
    async fn list_accounts(&self, customer_id: i64) -> Result<Vec<Account>>;

    /// Overwrite the balance of a single account
    /// Fails if the account does not exist
    async fn update_balance(&self, account_id: i64, balance: Decimal) -> Result<()>;

    /// Overwrite several balances atomically
    /// Either every update is applied or none is; an unknown account fails the batch
    async fn update_balances(&self, updates: &[(i64, Decimal)]) -> Result<()>;

    /// Delete an account
    /// Returns true if the account was found and deleted
    async fn delete_account(&self, account_id: i64) -> Result<bool>;
}

/// Trait defining the interface for recipient storage operations
#[async_trait]
pub trait RecipientStorage: Send + Sync {
    /// Store a new recipient for a customer and return its generated id
    async fn insert_recipient(&self, customer_id: i64, details: &RecipientDetails) -> Result<i64>;

    /// Retrieve a recipient by ID
    async fn get_recipient(&self, recipient_id: i64) -> Result<Option<Recipient>>;

    /// List the recipients of a customer ordered by id
    async fn list_recipients(&self, customer_id: i64) -> Result<Vec<Recipient>>;

    /// Update an existing recipient
    /// Fails if the recipient does not exist
    async fn update_recipient(&self, recipient: &Recipient) -> Result<()>;

    /// Delete a recipient
    /// Returns true if the recipient was found and deleted
    async fn delete_recipient(&self, recipient_id: i64) -> Result<bool>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type (SQLite, in-memory)
/// and provides factory methods for creating repositories. This allows the domain
/// layer to work with any storage backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone + 'static {
    type CustomerRepository: CustomerStorage + Clone + 'static;
    type AccountRepository: AccountStorage + Clone + 'static;
    type RecipientRepository: RecipientStorage + Clone + 'static;

    fn create_customer_repository(&self) -> Self::CustomerRepository;

    fn create_account_repository(&self) -> Self::AccountRepository;

    fn create_recipient_repository(&self) -> Self::RecipientRepository;
}
