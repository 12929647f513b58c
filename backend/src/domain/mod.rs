//! # Domain Module
//!
//! Contains the business logic of the back-office: customers, the accounts
//! they own and the recipients they pay.
//!
//! The services are generic over a storage [`Connection`](crate::storage::Connection)
//! and never see SQL or in-memory maps directly.
//!
//! ## Module Organization
//!
//! - **customer_service**: customer profiles, opening and closing accounts, recipients
//! - **account_service**: deposits, withdrawals and transfers
//! - **models**: customer, account and recipient entities and their rules
//! - **commands**: inputs accepted by the services
//! - **error**: [`BankError`], the error every service call returns
//!
//! ## Business Rules
//!
//! - Savings accounts never hold less than the savings minimum balance
//! - Savings accounts cannot be withdrawn from
//! - An account can only be closed once its balance is zero
//! - A customer still owning accounts cannot be deleted
//! - Recipients point at existing accounts of other customers, each at most once
//! - Mutating calls run one at a time under the [`LedgerLock`]

pub mod account_service;
pub mod commands;
pub mod customer_service;
pub mod error;
pub mod ledger_lock;
pub mod models;

pub use account_service::AccountService;
pub use customer_service::CustomerService;
pub use error::{BankError, BankResult};
pub use ledger_lock::LedgerLock;
