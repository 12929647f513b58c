//! # REST API Interface Layer
//!
//! HTTP endpoints of the back-office, all nested under `/api/customer`.
//!
//! - **customer_apis**: customer CRUD and the total balance
//! - **account_apis**: opening and closing accounts, deposits, withdrawals and transfers
//! - **recipient_apis**: saved payment recipients
//! - **error**: [`BankError`](crate::domain::BankError) to status code translation
//! - **mappers**: DTO <-> domain conversions

pub mod account_apis;
pub mod customer_apis;
pub mod error;
pub mod mappers;
pub mod recipient_apis;

use axum::Router;

use crate::storage::Connection;
use crate::AppState;

/// Every customer-scoped route, to be nested under `/api/customer`
pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .merge(customer_apis::router())
        .merge(account_apis::router())
        .merge(recipient_apis::router())
}
