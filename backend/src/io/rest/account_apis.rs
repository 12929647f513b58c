//! # REST API for Accounts
//!
//! Endpoints for opening, inspecting and closing a customer's accounts, and
//! for moving money: deposits, withdrawals and transfers.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::info;

use super::mappers::AccountMapper;
use crate::domain::commands::account::{MoneyCommand, TransferCommand};
use crate::storage::Connection;
use crate::AppState;
use shared::{AccountDto, MoneyOperationRequest, TransferRequest};

/// Create the account API router
pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/:id/account", get(list_accounts::<C>).post(open_account::<C>))
        .route(
            "/:id/account/:account_id",
            get(get_account::<C>).delete(close_account::<C>),
        )
        .route("/:id/account/:account_id/deposit", post(deposit::<C>))
        .route("/:id/account/:account_id/withdraw", post(withdraw::<C>))
        .route("/:id/transfer", post(transfer::<C>))
}

/// List a customer's accounts
pub async fn list_accounts<C: Connection>(
    State(state): State<AppState<C>>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/customer/{}/account", customer_id);

    match state.customer_service.list_accounts(customer_id).await {
        Ok(accounts) => (StatusCode::OK, Json(AccountMapper::to_dto_list(accounts))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Open a new account with an initial amount
pub async fn open_account<C: Connection>(
    State(state): State<AppState<C>>,
    Path(customer_id): Path<i64>,
    Json(request): Json<AccountDto>,
) -> impl IntoResponse {
    info!("POST /api/customer/{}/account - request: {:?}", customer_id, request);

    let command = AccountMapper::to_open_command(request);
    match state.customer_service.open_account(customer_id, command).await {
        Ok(account) => {
            let location = format!("/api/customer/{}/account/{}", customer_id, account.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(AccountMapper::to_dto(account)),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn get_account<C: Connection>(
    State(state): State<AppState<C>>,
    Path((customer_id, account_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    info!("GET /api/customer/{}/account/{}", customer_id, account_id);

    match state.customer_service.get_account(customer_id, account_id).await {
        Ok(account) => (StatusCode::OK, Json(AccountMapper::to_dto(account))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Close an account with a zero balance
pub async fn close_account<C: Connection>(
    State(state): State<AppState<C>>,
    Path((customer_id, account_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    info!("DELETE /api/customer/{}/account/{}", customer_id, account_id);

    match state.customer_service.close_account(customer_id, account_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn deposit<C: Connection>(
    State(state): State<AppState<C>>,
    Path((customer_id, account_id)): Path<(i64, i64)>,
    Json(request): Json<MoneyOperationRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/customer/{}/account/{}/deposit - amount: {}",
        customer_id, account_id, request.amount
    );

    let command = MoneyCommand {
        account_id,
        customer_id,
        amount: request.amount,
    };
    match state.account_service.deposit(command).await {
        Ok(account) => (StatusCode::OK, Json(AccountMapper::to_dto(account))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn withdraw<C: Connection>(
    State(state): State<AppState<C>>,
    Path((customer_id, account_id)): Path<(i64, i64)>,
    Json(request): Json<MoneyOperationRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/customer/{}/account/{}/withdraw - amount: {}",
        customer_id, account_id, request.amount
    );

    let command = MoneyCommand {
        account_id,
        customer_id,
        amount: request.amount,
    };
    match state.account_service.withdraw(command).await {
        Ok(account) => (StatusCode::OK, Json(AccountMapper::to_dto(account))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Transfer money to an own account or a saved recipient
pub async fn transfer<C: Connection>(
    State(state): State<AppState<C>>,
    Path(customer_id): Path<i64>,
    Json(request): Json<TransferRequest>,
) -> impl IntoResponse {
    info!("POST /api/customer/{}/transfer - request: {:?}", customer_id, request);

    let command = TransferCommand {
        customer_id,
        source_account_id: request.source_account_id,
        destination_account_id: request.destination_account_id,
        amount: request.amount,
    };
    match state.account_service.transfer(command).await {
        Ok(source) => {
            let response =
                AccountMapper::to_transfer_response(source, request.destination_account_id, request.amount);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{header, Method, StatusCode};
    use serde_json::{json, Value};

    use crate::storage::Connection;
    use crate::test_utils::{backend_tests, send, test_app, TestResponse};
    use axum::Router;

    async fn new_customer(app: &Router, first_name: &str) -> String {
        let response = send(
            app,
            Method::POST,
            "/api/customer",
            Some(json!({
                "firstName": first_name,
                "lastName": "Tester",
                "email": format!("{}@example.com", first_name.to_lowercase()),
                "phone": "912345678"
            })),
        )
        .await;
        assert_eq!(response.status, StatusCode::CREATED);
        format!("/api/customer/{}", response.body["id"])
    }

    async fn open(app: &Router, customer_uri: &str, body: Value) -> TestResponse {
        send(app, Method::POST, &format!("{}/account", customer_uri), Some(body)).await
    }

    async fn test_open_and_get_account<C: Connection>(conn: C) {
        let app = test_app(conn);
        let customer = new_customer(&app, "Opener").await;

        let opened = open(&app, &customer, json!({ "type": "CHECKING", "initialAmount": "$25.50" })).await;
        assert_eq!(opened.status, StatusCode::CREATED);
        assert_eq!(opened.body["type"], "CHECKING");
        assert_eq!(opened.body["balance"], json!(25.5));
        assert!(opened.body.get("initialAmount").is_none());

        let account_uri = format!("{}/account/{}", customer, opened.body["id"]);
        assert_eq!(
            opened.headers.get(header::LOCATION).unwrap().to_str().unwrap(),
            account_uri
        );

        let fetched = send(&app, Method::GET, &account_uri, None).await;
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body, opened.body);

        let listed = send(&app, Method::GET, &format!("{}/account", customer), None).await;
        assert_eq!(listed.body, json!([opened.body]));
    }

    async fn test_open_account_rejections<C: Connection>(conn: C) {
        let app = test_app(conn);
        let customer = new_customer(&app, "Opener").await;

        let below_minimum = open(&app, &customer, json!({ "type": "SAVINGS", "initialAmount": "99" })).await;
        assert_eq!(below_minimum.status, StatusCode::BAD_REQUEST);
        assert_eq!(below_minimum.body["error"], "transaction_invalid");

        let malformed = open(&app, &customer, json!({ "type": "CHECKING", "initialAmount": "1.234" })).await;
        assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

        let unknown_type = open(&app, &customer, json!({ "type": "LOAN", "initialAmount": "1" })).await;
        assert!(unknown_type.status.is_client_error());

        let no_customer = open(&app, "/api/customer/999", json!({ "type": "CHECKING" })).await;
        assert_eq!(no_customer.status, StatusCode::NOT_FOUND);
    }

    async fn test_close_account<C: Connection>(conn: C) {
        let app = test_app(conn);
        let customer = new_customer(&app, "Closer").await;
        let opened = open(&app, &customer, json!({ "type": "CHECKING", "initialAmount": "5" })).await;
        let account_uri = format!("{}/account/{}", customer, opened.body["id"]);

        let not_empty = send(&app, Method::DELETE, &account_uri, None).await;
        assert_eq!(not_empty.status, StatusCode::BAD_REQUEST);

        let withdrawn = send(&app, Method::POST, &format!("{}/withdraw", account_uri), Some(json!({ "amount": 5 }))).await;
        assert_eq!(withdrawn.status, StatusCode::OK);

        assert_eq!(send(&app, Method::DELETE, &account_uri, None).await.status, StatusCode::NO_CONTENT);
        assert_eq!(send(&app, Method::GET, &account_uri, None).await.status, StatusCode::NOT_FOUND);
    }

    async fn test_deposit_and_withdraw<C: Connection>(conn: C) {
        let app = test_app(conn);
        let customer = new_customer(&app, "Mover").await;
        let checking = open(&app, &customer, json!({ "type": "CHECKING", "initialAmount": "10" })).await;
        let savings = open(&app, &customer, json!({ "type": "SAVINGS", "initialAmount": "200" })).await;
        let checking_uri = format!("{}/account/{}", customer, checking.body["id"]);
        let savings_uri = format!("{}/account/{}", customer, savings.body["id"]);

        let deposited = send(&app, Method::POST, &format!("{}/deposit", checking_uri), Some(json!({ "amount": "2.50" }))).await;
        assert_eq!(deposited.status, StatusCode::OK);
        assert_eq!(deposited.body["balance"], json!(12.5));

        let withdrawn = send(&app, Method::POST, &format!("{}/withdraw", checking_uri), Some(json!({ "amount": 12 }))).await;
        assert_eq!(withdrawn.status, StatusCode::OK);
        assert_eq!(withdrawn.body["balance"], json!(0.5));

        let overdraft = send(&app, Method::POST, &format!("{}/withdraw", checking_uri), Some(json!({ "amount": 1 }))).await;
        assert_eq!(overdraft.status, StatusCode::BAD_REQUEST);

        let from_savings = send(&app, Method::POST, &format!("{}/withdraw", savings_uri), Some(json!({ "amount": 1 }))).await;
        assert_eq!(from_savings.status, StatusCode::BAD_REQUEST);
        assert_eq!(from_savings.body["error"], "transaction_invalid");

        let negative = send(&app, Method::POST, &format!("{}/deposit", savings_uri), Some(json!({ "amount": -3 }))).await;
        assert_eq!(negative.status, StatusCode::BAD_REQUEST);

        let missing = send(&app, Method::POST, &format!("{}/account/999/deposit", customer), Some(json!({ "amount": 1 }))).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.body["error"], "account_not_found");
    }

    async fn test_transfer<C: Connection>(conn: C) {
        let app = test_app(conn);
        let payer = new_customer(&app, "Payer").await;
        let payee = new_customer(&app, "Payee").await;
        let source = open(&app, &payer, json!({ "type": "CHECKING", "initialAmount": "100" })).await;
        let target = open(&app, &payee, json!({ "type": "CHECKING", "initialAmount": "0" })).await;
        let source_id = source.body["id"].as_i64().unwrap();
        let target_id = target.body["id"].as_i64().unwrap();
        let transfer_uri = format!("{}/transfer", payer);
        let body = json!({ "sourceAccountId": source_id, "destinationAccountId": target_id, "amount": 40 });

        let unsaved = send(&app, Method::POST, &transfer_uri, Some(body.clone())).await;
        assert_eq!(unsaved.status, StatusCode::NOT_FOUND);
        assert_eq!(unsaved.body["error"], "recipient_not_found");

        let saved = send(
            &app,
            Method::POST,
            &format!("{}/recipient", payer),
            Some(json!({ "accountNumber": target_id, "name": "Payee" })),
        )
        .await;
        assert_eq!(saved.status, StatusCode::CREATED);

        let done = send(&app, Method::POST, &transfer_uri, Some(body)).await;
        assert_eq!(done.status, StatusCode::OK);
        assert_eq!(done.body["sourceAccount"]["balance"], json!(60.0));
        assert_eq!(done.body["destinationAccountId"], json!(target_id));
        assert_eq!(done.body["amount"], json!(40.0));

        let target_after = send(&app, Method::GET, &format!("{}/account/{}", payee, target_id), None).await;
        assert_eq!(target_after.body["balance"], json!(40.0));

        let same_account = send(
            &app,
            Method::POST,
            &transfer_uri,
            Some(json!({ "sourceAccountId": source_id, "destinationAccountId": source_id, "amount": 1 })),
        )
        .await;
        assert_eq!(same_account.status, StatusCode::BAD_REQUEST);
    }

    backend_tests!(
        test_open_and_get_account,
        test_open_account_rejections,
        test_close_account,
        test_deposit_and_withdraw,
        test_transfer,
    );
}
