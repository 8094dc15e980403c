use std::sync::Arc;

use crate::dto::car_dto::CarRequest;
use crate::dto::common_dto::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::models::{Car, NewCar};
use crate::repositories::CarRepository;
use crate::utils::errors::{bad_request_error, not_found_error, AppResult};
use crate::utils::pagination::PageRules;
use crate::utils::validation::{validate_not_empty, validate_positive};

pub struct CarController {
    repository: Arc<dyn CarRepository>,
}

/// Validar nombre, stock y tarifa diaria, en ese orden
fn validate_car(request: CarRequest) -> AppResult<NewCar> {
    if validate_not_empty(&request.name).is_err() {
        return Err(bad_request_error("Car name is required"));
    }
    if validate_positive(request.stock).is_err() {
        return Err(bad_request_error("Stock must be greater than zero"));
    }
    if !(request.daily_rent.is_finite() && request.daily_rent > 0.0) {
        return Err(bad_request_error("Daily Rent must be greater than zero"));
    }

    Ok(NewCar {
        name: request.name.trim().to_string(),
        stock: request.stock,
        daily_rent: request.daily_rent,
    })
}

impl CarController {
    pub fn new(repository: Arc<dyn CarRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: PaginationQuery) -> AppResult<PaginatedResponse<Car>> {
        let page = query.resolve(PageRules::CARS);
        let cars = self.repository.list(page).await?;
        let total = self.repository.count().await?;

        tracing::debug!(page = page.page, limit = page.limit, total, "cars fetched");
        Ok(PaginatedResponse::new(page, total, cars))
    }

    pub async fn create(&self, request: CarRequest) -> AppResult<ApiResponse<Car>> {
        let car = self.repository.create(validate_car(request)?).await?;

        tracing::info!(car_id = car.id, "car created");
        Ok(ApiResponse::success_with_message(car, "Car created successfully"))
    }

    pub async fn update(&self, id: i32, request: CarRequest) -> AppResult<ApiResponse<Car>> {
        let car = self
            .repository
            .update(id, validate_car(request)?)
            .await?
            .ok_or_else(|| not_found_error("Car"))?;

        Ok(ApiResponse::success_with_message(car, "Car updated successfully"))
    }

    pub async fn delete(&self, id: i32) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Car"));
        }
        tracing::info!(car_id = id, "car deleted");
        Ok(ApiResponse::message("Car deleted successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    fn request(name: &str, stock: i32, daily_rent: f64) -> CarRequest {
        CarRequest {
            name: name.to_string(),
            stock,
            daily_rent,
        }
    }

    fn message(result: AppResult<NewCar>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_car_order() {
        assert_eq!(message(validate_car(request(" ", 0, 0.0))), "Car name is required");
        assert_eq!(message(validate_car(request("Xenia", 0, 0.0))), "Stock must be greater than zero");
        assert_eq!(
            message(validate_car(request("Xenia", 2, -1.0))),
            "Daily Rent must be greater than zero"
        );
        assert_eq!(
            message(validate_car(request("Xenia", 2, f64::NAN))),
            "Daily Rent must be greater than zero"
        );
    }

    #[test]
    fn test_validate_car_ok() {
        let car = validate_car(request(" Xenia ", 2, 300_000.0)).unwrap();
        assert_eq!(car.name, "Xenia");
        assert_eq!(car.stock, 2);
    }
}
