use std::sync::Arc;

use crate::dto::booking_dto::BookingRequest;
use crate::dto::common_dto::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::models::Booking;
use crate::repositories::BookingRepository;
use crate::services::pricing_service::validate_booking;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::pagination::PageRules;

pub struct BookingController {
    repository: Arc<dyn BookingRepository>,
}

impl BookingController {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: PaginationQuery) -> AppResult<PaginatedResponse<Booking>> {
        let page = query.resolve(PageRules::BOOKINGS);
        let bookings = self.repository.list(page).await?;
        let total = self.repository.count().await?;

        tracing::debug!(page = page.page, limit = page.limit, total, "bookings fetched");
        Ok(PaginatedResponse::new(page, total, bookings))
    }

    pub async fn create(&self, request: BookingRequest) -> AppResult<ApiResponse<Booking>> {
        // Validación local antes de tocar el almacén
        let plan = validate_booking(&request)?;
        let booking = self.repository.create(plan).await?;

        tracing::info!(
            booking_id = booking.id,
            total_cost = booking.total_cost,
            total_driver_cost = booking.total_driver_cost,
            "booking created"
        );
        Ok(ApiResponse::success_with_message(booking, "Booking created successfully"))
    }

    pub async fn update(&self, id: i32, request: BookingRequest) -> AppResult<ApiResponse<Booking>> {
        let plan = validate_booking(&request)?;
        let booking = self.repository.update(id, plan).await?;

        tracing::info!(booking_id = id, total_cost = booking.total_cost, "booking updated");
        Ok(ApiResponse::success_with_message(booking, "Booking updated successfully"))
    }

    pub async fn delete(&self, id: i32) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Booking"));
        }
        tracing::info!(booking_id = id, "booking deleted");
        Ok(ApiResponse::message("Booking deleted successfully"))
    }
}
