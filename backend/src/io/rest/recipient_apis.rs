//! # REST API for Recipients
//!
//! Endpoints managing the payees a customer can transfer money to.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use tracing::info;

use super::mappers::RecipientMapper;
use crate::domain::BankError;
use crate::storage::Connection;
use crate::AppState;
use shared::RecipientDto;

/// Create the recipient API router
pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/:id/recipient", get(list_recipients::<C>).post(add_recipient::<C>))
        .route(
            "/:id/recipient/:recipient_id",
            put(update_recipient::<C>).delete(remove_recipient::<C>),
        )
}

pub async fn list_recipients<C: Connection>(
    State(state): State<AppState<C>>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/customer/{}/recipient", customer_id);

    match state.customer_service.list_recipients(customer_id).await {
        Ok(recipients) => (StatusCode::OK, Json(RecipientMapper::to_dto_list(recipients))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Save a new recipient
pub async fn add_recipient<C: Connection>(
    State(state): State<AppState<C>>,
    Path(customer_id): Path<i64>,
    Json(request): Json<RecipientDto>,
) -> impl IntoResponse {
    info!("POST /api/customer/{}/recipient - request: {:?}", customer_id, request);

    if let Some(id) = request.id {
        return BankError::validation(format!("A new recipient cannot already have an id ({})", id))
            .into_response();
    }

    let command = RecipientMapper::to_command(request);
    match state.customer_service.add_recipient(customer_id, command).await {
        Ok(recipient) => {
            let location = format!("/api/customer/{}/recipient/{}", customer_id, recipient.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(RecipientMapper::to_dto(recipient)),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn update_recipient<C: Connection>(
    State(state): State<AppState<C>>,
    Path((customer_id, recipient_id)): Path<(i64, i64)>,
    Json(request): Json<RecipientDto>,
) -> impl IntoResponse {
    info!(
        "PUT /api/customer/{}/recipient/{} - request: {:?}",
        customer_id, recipient_id, request
    );

    if request.id.is_some_and(|id| id != recipient_id) {
        return BankError::validation(format!(
            "Recipient id {:?} does not match path id {}",
            request.id, recipient_id
        ))
        .into_response();
    }

    let command = RecipientMapper::to_command(request);
    match state
        .customer_service
        .update_recipient(customer_id, recipient_id, command)
        .await
    {
        Ok(recipient) => (StatusCode::OK, Json(RecipientMapper::to_dto(recipient))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn remove_recipient<C: Connection>(
    State(state): State<AppState<C>>,
    Path((customer_id, recipient_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    info!("DELETE /api/customer/{}/recipient/{}", customer_id, recipient_id);

    match state.customer_service.remove_recipient(customer_id, recipient_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
