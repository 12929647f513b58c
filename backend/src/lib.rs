//! # Bank Back-Office Backend
//!
//! Customers, their checking and savings accounts, and the recipients they
//! pay, exposed as a REST API under `/api/customer`.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (CustomerService, AccountService)
//!     ↓
//! Storage Layer (SQLite or in-memory, behind the Connection trait)
//! ```
//!
//! The application state is generic over the storage [`Connection`], so the
//! same router runs on either backend.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

#[cfg(test)]
mod test_utils;

use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::domain::{AccountService, CustomerService, LedgerLock};
use crate::storage::Connection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState<C: Connection> {
    pub customer_service: CustomerService<C>,
    pub account_service: AccountService<C>,
}

/// Build the services over one storage connection
pub fn initialize_backend<C: Connection>(connection: C) -> AppState<C> {
    info!("Setting up domain services");
    let connection = Arc::new(connection);
    let lock = LedgerLock::new();

    AppState {
        customer_service: CustomerService::new(connection.clone(), lock.clone()),
        account_service: AccountService::new(connection, lock),
    }
}

/// Create the Axum router with all routes configured
pub fn create_router<C: Connection>(app_state: AppState<C>, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .nest("/api/customer", io::rest::router())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(app_state)
}
