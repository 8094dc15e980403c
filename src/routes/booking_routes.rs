use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::booking_controller::BookingController;
use crate::dto::common_dto::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::dto::booking_dto::BookingRequest;
use crate::models::Booking;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{json_body, path_id};

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/:id", put(update_booking).delete(delete_booking))
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<Booking>>, AppError> {
    let controller = BookingController::new(state.bookings.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), AppError> {
    let request = json_body(payload)?;
    let controller = BookingController::new(state.bookings.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_booking(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let id = path_id(id)?;
    let request = json_body(payload)?;
    let controller = BookingController::new(state.bookings.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_booking(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = path_id(id)?;
    let controller = BookingController::new(state.bookings.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
