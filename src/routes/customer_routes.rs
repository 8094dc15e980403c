use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::customer_controller::CustomerController;
use crate::dto::common_dto::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::dto::customer_dto::{CreateCustomerRequest, CustomerPatch};
use crate::models::Customer;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{json_body, path_id};

pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/:id", put(update_customer).delete(delete_customer))
}

async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<Customer>>, AppError> {
    let controller = CustomerController::new(state.customers.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Customer>>), AppError> {
    let request = json_body(payload)?;
    let controller = CustomerController::new(state.customers.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_customer(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CustomerPatch>, JsonRejection>,
) -> Result<Json<ApiResponse<Customer>>, AppError> {
    let id = path_id(id)?;
    let patch = json_body(payload)?;
    let controller = CustomerController::new(state.customers.clone());
    let response = controller.update(id, patch).await?;
    Ok(Json(response))
}

async fn delete_customer(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = path_id(id)?;
    let controller = CustomerController::new(state.customers.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
