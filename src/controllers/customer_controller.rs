use std::sync::Arc;
use validator::Validate;

use crate::dto::common_dto::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::dto::customer_dto::{CreateCustomerRequest, CustomerPatch};
use crate::models::{Customer, NewCustomer};
use crate::repositories::CustomerRepository;
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};
use crate::utils::pagination::PageRules;

pub struct CustomerController {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerController {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: PaginationQuery) -> AppResult<PaginatedResponse<Customer>> {
        let page = query.resolve(PageRules::CUSTOMERS);
        let customers = self.repository.list(page).await?;
        let total = self.repository.count().await?;

        tracing::debug!(page = page.page, limit = page.limit, total, "customers fetched");
        Ok(PaginatedResponse::new(page, total, customers))
    }

    pub async fn create(&self, request: CreateCustomerRequest) -> AppResult<ApiResponse<Customer>> {
        request.validate()?;

        // Verificar que el NIK no esté registrado
        if self.repository.nik_exists(&request.nik, None).await? {
            return Err(AppError::Conflict("NIK already registered".to_string()));
        }

        let customer = self
            .repository
            .create(NewCustomer {
                name: request.name,
                nik: request.nik,
                phone_number: request.phone_number,
                membership_id: request.membership_id,
            })
            .await?;

        tracing::info!(customer_id = customer.id, "customer created");
        Ok(ApiResponse::success_with_message(customer, "Customer created successfully"))
    }

    pub async fn update(&self, id: i32, patch: CustomerPatch) -> AppResult<ApiResponse<Customer>> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer"))?;

        if patch.is_empty() {
            return Err(bad_request_error("No valid fields to update"));
        }
        patch.validate()?;
        if let Some(Some(membership_id)) = patch.membership_id {
            if membership_id <= 0 {
                return Err(bad_request_error("Invalid membership ID"));
            }
        }

        // El NIK sólo choca si pertenece a otro cliente
        if let Some(nik) = &patch.nik {
            if self.repository.nik_exists(nik, Some(id)).await? {
                return Err(AppError::Conflict("NIK already registered".to_string()));
            }
        }

        let merged = Customer {
            id,
            name: patch.name.unwrap_or(current.name),
            nik: patch.nik.unwrap_or(current.nik),
            phone_number: patch.phone_number.unwrap_or(current.phone_number),
            membership_id: patch.membership_id.unwrap_or(current.membership_id),
        };

        let customer = self
            .repository
            .update(merged)
            .await?
            .ok_or_else(|| not_found_error("Customer"))?;

        Ok(ApiResponse::success_with_message(customer, "Customer updated successfully"))
    }

    pub async fn delete(&self, id: i32) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Customer"));
        }
        tracing::info!(customer_id = id, "customer deleted");
        Ok(ApiResponse::message("Customer deleted successfully"))
    }
}
