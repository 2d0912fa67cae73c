use std::sync::Arc;

use axum::{extract::{Path, State}, http::StatusCode, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use service::errors::ServiceError;
use service::orders::domain::OrderRecord;
use service::orders::repository::SeaOrmOrderRepository;
use service::orders::service::OrderService;

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerState {
    pub orders: Arc<OrderService<SeaOrmOrderRepository>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmOrderRepository { db });
        Self { orders: Arc::new(OrderService::new(repo)) }
    }
}

/// Serde's `Uuid` parsing is the well-formedness guarantee for both
/// references; malformed or absent ids are rejected before the service runs.
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateOrderInput {
    pub product_id: Uuid,
    pub client_id: Uuid,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateOrderInput {
    pub product_id: Uuid,
    pub client_id: Uuid,
}

#[utoipa::path(
    get, path = "/orders", tag = "orders",
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<OrderRecord>>, JsonApiError> {
    match state.orders.list().await {
        Ok(list) => {
            info!(count = list.len(), "list orders");
            Ok(Json(list))
        }
        Err(e) => Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string()))),
    }
}

#[utoipa::path(
    get, path = "/orders/{id}", tag = "orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<OrderRecord>, StatusCode> {
    match state.orders.get_by_id(id).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    post, path = "/orders", tag = "orders",
    request_body = crate::openapi::CreateOrderInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Product or Client doesn't exist"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateOrderInput>,
) -> Result<Json<OrderRecord>, JsonApiError> {
    info!(product_id = %input.product_id, client_id = %input.client_id, "order_create_request");
    match state.orders.create(input.product_id, input.client_id).await {
        Ok(record) => {
            info!(id = %record.order.id, "created order");
            Ok(Json(record))
        }
        Err(e) => match e {
            ServiceError::RelationMissing | ServiceError::Validation(_) | ServiceError::Model(_) => {
                Err(JsonApiError::new(StatusCode::BAD_REQUEST, e.to_string(), None))
            }
            _ => {
                error!(err = %e, "create order failed");
                Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Create Failed", Some(e.to_string())))
            }
        },
    }
}

#[utoipa::path(
    put, path = "/orders/{id}", tag = "orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = crate::openapi::UpdateOrderInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateOrderInput>,
) -> Result<Json<OrderRecord>, JsonApiError> {
    match state.orders.update_by_id(id, input.product_id, input.client_id).await {
        Ok(record) => {
            info!(id = %record.order.id, "updated order");
            Ok(Json(record))
        }
        Err(e) => match e {
            ServiceError::NotFound(_) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))),
            ServiceError::Validation(_) | ServiceError::Model(_) => {
                Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
            }
            _ => {
                error!(err = %e, "update order failed");
                Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", Some(e.to_string())))
            }
        },
    }
}

#[utoipa::path(
    delete, path = "/orders/{id}", tag = "orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::order::Model>, JsonApiError> {
    match state.orders.delete_by_id(id).await {
        Ok(prior) => {
            info!(id = %prior.id, "deleted order");
            Ok(Json(prior))
        }
        Err(e) => match e {
            ServiceError::NotFound(_) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))),
            _ => {
                error!(err = %e, "delete order failed");
                Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Delete Failed", Some(e.to_string())))
            }
        },
    }
}
