//! Order handlers.
//!
//! All routes here sit behind the auth middleware; the caller identity
//! arrives as a request extension and is handed to the service as an
//! explicit argument.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::Order;
use crate::errors::AppResult;

/// Order creation request.
///
/// Only the product and amount are bindable from the client. The owner
/// and creation time are set server-side; extra fields in the payload
/// are dropped during deserialization.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    /// Free-text product label
    #[validate(length(min = 1, message = "Product is required"))]
    #[schema(example = "Book")]
    pub product: String,
    /// Ordered quantity
    #[validate(range(min = 1, message = "Amount must be positive"))]
    #[schema(example = 2, minimum = 1)]
    pub amount: i32,
}

/// Create order routes
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order).delete(delete_order))
}

/// List all orders
#[utoipa::path(
    get,
    path = "/api/order",
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All orders, regardless of owner", body = [Order]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.order_service.list_orders().await?;
    Ok(Json(orders))
}

/// Get one order by id
#[utoipa::path(
    get,
    path = "/api/order/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Order),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such order")
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    let order = state.order_service.get_order(id).await?;
    Ok(Json(order))
}

/// Create an order owned by the caller
#[utoipa::path(
    post,
    path = "/api/order",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = Order,
            headers(("Location" = String, description = "URL of the created order"))),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<Order>)> {
    let order = state
        .order_service
        .create_order(payload.product, payload.amount, user.id)
        .await?;

    let location = format!("/api/order/{}", order.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(order),
    ))
}

/// Delete an order; only its owner may do this
#[utoipa::path(
    delete,
    path = "/api/order/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "The removed order", body = Order),
        (status = 401, description = "Caller is not the owner"),
        (status = 404, description = "No such order")
    )
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    let order = state.order_service.delete_order(id, user.id).await?;
    Ok(Json(order))
}
