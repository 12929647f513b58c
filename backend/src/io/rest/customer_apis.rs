//! # REST API for Customer Management
//!
//! Endpoints for creating, retrieving, updating and deleting customers, plus
//! the total balance over a customer's accounts.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use super::mappers::CustomerMapper;
use crate::storage::Connection;
use crate::AppState;
use shared::{CustomerBalanceResponse, CustomerDto};

/// Create the customer API router
pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/", get(list_customers::<C>).post(create_customer::<C>))
        .route(
            "/:id",
            get(get_customer::<C>)
                .put(update_customer::<C>)
                .delete(delete_customer::<C>),
        )
        .route("/:id/balance", get(get_balance::<C>))
}

/// List all customers
pub async fn list_customers<C: Connection>(State(state): State<AppState<C>>) -> impl IntoResponse {
    info!("GET /api/customer");

    match state.customer_service.list_customers().await {
        Ok(customers) => (StatusCode::OK, Json(CustomerMapper::to_dto_list(customers))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a customer by ID
pub async fn get_customer<C: Connection>(
    State(state): State<AppState<C>>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/customer/{}", customer_id);

    match state.customer_service.get_customer(customer_id).await {
        Ok(customer) => (StatusCode::OK, Json(CustomerMapper::to_dto(customer))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new customer
pub async fn create_customer<C: Connection>(
    State(state): State<AppState<C>>,
    Json(request): Json<CustomerDto>,
) -> impl IntoResponse {
    info!("POST /api/customer - request: {:?}", request);

    let command = match CustomerMapper::to_create_command(request) {
        Ok(command) => command,
        Err(e) => return e.into_response(),
    };

    match state.customer_service.create_customer(command).await {
        Ok(customer) => {
            let location = format!("/api/customer/{}", customer.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(CustomerMapper::to_dto(customer)),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Replace a customer's profile
pub async fn update_customer<C: Connection>(
    State(state): State<AppState<C>>,
    Path(customer_id): Path<i64>,
    Json(request): Json<CustomerDto>,
) -> impl IntoResponse {
    info!("PUT /api/customer/{} - request: {:?}", customer_id, request);

    let command = CustomerMapper::to_update_command(request);
    match state.customer_service.update_customer(customer_id, command).await {
        Ok(customer) => (StatusCode::OK, Json(CustomerMapper::to_dto(customer))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a customer without accounts
pub async fn delete_customer<C: Connection>(
    State(state): State<AppState<C>>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/customer/{}", customer_id);

    match state.customer_service.delete_customer(customer_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Total balance over all of a customer's accounts
pub async fn get_balance<C: Connection>(
    State(state): State<AppState<C>>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/customer/{}/balance", customer_id);

    match state.customer_service.get_balance(customer_id).await {
        Ok(balance) => (
            StatusCode::OK,
            Json(CustomerBalanceResponse { customer_id, balance }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{header, Method, StatusCode};
    use serde_json::json;

    use crate::storage::Connection;
    use crate::test_utils::{backend_tests, send, test_app};

    fn ada() -> serde_json::Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": "+44 20 7946 0958"
        })
    }

    async fn test_create_and_get_customer<C: Connection>(conn: C) {
        let app = test_app(conn);

        let created = send(&app, Method::POST, "/api/customer", Some(ada())).await;
        assert_eq!(created.status, StatusCode::CREATED);
        let id = created.body["id"].as_i64().expect("Created customer has an id");
        assert_eq!(
            created.headers.get(header::LOCATION).unwrap(),
            &format!("/api/customer/{}", id)
        );

        let fetched = send(&app, Method::GET, &format!("/api/customer/{}", id), None).await;
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body["firstName"], "Ada");
        assert_eq!(fetched.body["email"], "ada@example.com");

        let listed = send(&app, Method::GET, "/api/customer", None).await;
        assert_eq!(listed.status, StatusCode::OK);
        assert_eq!(listed.body.as_array().unwrap().len(), 1);
    }

    async fn test_create_customer_rejections<C: Connection>(conn: C) {
        let app = test_app(conn);

        let mut with_id = ada();
        with_id["id"] = json!(7);
        let response = send(&app, Method::POST, "/api/customer", Some(with_id)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "validation_failed");

        let mut bad_email = ada();
        bad_email["email"] = json!("nope");
        let response = send(&app, Method::POST, "/api/customer", Some(bad_email)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);

        let listed = send(&app, Method::GET, "/api/customer", None).await;
        assert_eq!(listed.body, json!([]));
    }

    async fn test_get_missing_customer<C: Connection>(conn: C) {
        let app = test_app(conn);

        let response = send(&app, Method::GET, "/api/customer/99", None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["error"], "customer_not_found");
    }

    async fn test_update_customer<C: Connection>(conn: C) {
        let app = test_app(conn);
        let id = send(&app, Method::POST, "/api/customer", Some(ada())).await.body["id"]
            .as_i64()
            .unwrap();
        let uri = format!("/api/customer/{}", id);

        let mut renamed = ada();
        renamed["id"] = json!(id);
        renamed["lastName"] = json!("King");
        let response = send(&app, Method::PUT, &uri, Some(renamed)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["lastName"], "King");

        let mut mismatched = ada();
        mismatched["id"] = json!(id + 1);
        let response = send(&app, Method::PUT, &uri, Some(mismatched)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);

        let response = send(&app, Method::PUT, "/api/customer/999", Some(ada())).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    async fn test_delete_customer<C: Connection>(conn: C) {
        let app = test_app(conn);
        let id = send(&app, Method::POST, "/api/customer", Some(ada())).await.body["id"]
            .as_i64()
            .unwrap();
        let uri = format!("/api/customer/{}", id);

        let account = send(
            &app,
            Method::POST,
            &format!("{}/account", uri),
            Some(json!({ "type": "CHECKING", "initialAmount": "0" })),
        )
        .await;
        let account_uri = format!("{}/account/{}", uri, account.body["id"]);

        let refused = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(refused.status, StatusCode::BAD_REQUEST);
        assert_eq!(refused.body["error"], "association_exists");

        assert_eq!(send(&app, Method::DELETE, &account_uri, None).await.status, StatusCode::NO_CONTENT);
        assert_eq!(send(&app, Method::DELETE, &uri, None).await.status, StatusCode::NO_CONTENT);
        assert_eq!(send(&app, Method::GET, &uri, None).await.status, StatusCode::NOT_FOUND);
        assert_eq!(send(&app, Method::DELETE, &uri, None).await.status, StatusCode::NOT_FOUND);
    }

    async fn test_get_balance<C: Connection>(conn: C) {
        let app = test_app(conn);
        let id = send(&app, Method::POST, "/api/customer", Some(ada())).await.body["id"]
            .as_i64()
            .unwrap();
        let uri = format!("/api/customer/{}", id);

        for body in [
            json!({ "type": "CHECKING", "initialAmount": "$12.25" }),
            json!({ "type": "SAVINGS", "initialAmount": "150" }),
        ] {
            let opened = send(&app, Method::POST, &format!("{}/account", uri), Some(body)).await;
            assert_eq!(opened.status, StatusCode::CREATED);
        }

        let response = send(&app, Method::GET, &format!("{}/balance", uri), None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "customerId": id, "balance": 162.25 }));

        let missing = send(&app, Method::GET, "/api/customer/999/balance", None).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
    }

    backend_tests!(
        test_create_and_get_customer,
        test_create_customer_rejections,
        test_get_missing_customer,
        test_update_customer,
        test_delete_customer,
        test_get_balance,
    );
}
