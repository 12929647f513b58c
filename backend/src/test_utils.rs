//! Shared fixtures for unit tests.
//!
//! Service and API tests are written once as generic functions over a
//! [`Connection`] and instantiated for every storage backend with
//! [`backend_tests!`].

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt;

use crate::domain::{
    commands::customer::CreateCustomerCommand, models::customer::CustomerDetails, AccountService,
    CustomerService, LedgerLock,
};
use crate::storage::Connection;

pub fn customer_details(first_name: &str) -> CustomerDetails {
    CustomerDetails {
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        phone: "+351 912 345 678".to_string(),
    }
}

/// Build both services over one connection sharing one ledger lock
pub fn services<C: Connection>(connection: C) -> (CustomerService<C>, AccountService<C>) {
    let connection = Arc::new(connection);
    let lock = LedgerLock::new();
    (
        CustomerService::new(connection.clone(), lock.clone()),
        AccountService::new(connection, lock),
    )
}

/// Create a customer and return its id
pub async fn create_customer<C: Connection>(service: &CustomerService<C>, first_name: &str) -> i64 {
    service
        .create_customer(CreateCustomerCommand {
            details: customer_details(first_name),
        })
        .await
        .expect("Failed to create customer")
        .id
}

/// Full application router over `connection`
pub fn test_app<C: Connection>(connection: C) -> Router {
    crate::create_router(
        crate::initialize_backend(connection),
        HeaderValue::from_static("http://localhost:8080"),
    )
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, `Value::Null` when the body is empty
    pub body: Value,
}

/// Send one request through the router with `oneshot`
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse { status, headers, body }
}

/// Generate one `#[tokio::test]` per backend for each generic test function.
///
/// Every listed function must be `async fn name<C: Connection>(conn: C)`.
macro_rules! backend_tests {
    ($($name:ident),* $(,)?) => {
        mod sqlite_backend {
            $(
                #[tokio::test]
                async fn $name() {
                    let conn = $crate::storage::SqliteConnection::in_memory()
                        .await
                        .expect("Failed to create test database");
                    super::$name(conn).await;
                }
            )*
        }

        mod memory_backend {
            $(
                #[tokio::test]
                async fn $name() {
                    super::$name($crate::storage::MemoryConnection::new()).await;
                }
            )*
        }
    };
}

pub(crate) use backend_tests;
