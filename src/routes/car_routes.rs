use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::car_controller::CarController;
use crate::dto::common_dto::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::dto::car_dto::CarRequest;
use crate::models::Car;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{json_body, path_id};

pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/:id", put(update_car).delete(delete_car))
}

async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<Car>>, AppError> {
    let controller = CarController::new(state.cars.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn create_car(
    State(state): State<AppState>,
    payload: Result<Json<CarRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Car>>), AppError> {
    let request = json_body(payload)?;
    let controller = CarController::new(state.cars.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_car(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CarRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Car>>, AppError> {
    let id = path_id(id)?;
    let request = json_body(payload)?;
    let controller = CarController::new(state.cars.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_car(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = path_id(id)?;
    let controller = CarController::new(state.cars.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
