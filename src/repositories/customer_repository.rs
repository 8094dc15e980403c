use async_trait::async_trait;
use sqlx::PgPool;

use super::CustomerRepository;
use crate::models::{Customer, NewCustomer};
use crate::utils::errors::{constraint_violation, not_found_error, AppError, AppResult, ConstraintViolation};
use crate::utils::pagination::PageRequest;

const CUSTOMER_COLUMNS: &str = "id, name, nik, phone, membership_id";

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Traducir violaciones de restricciones en escrituras de clientes
fn map_write_error(error: sqlx::Error) -> AppError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique) => AppError::Conflict("NIK already registered".to_string()),
        Some(ConstraintViolation::ForeignKey) => not_found_error("Membership"),
        None => AppError::Database(error),
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn list(&self, page: PageRequest) -> AppResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers ORDER BY id LIMIT $1 OFFSET $2",
            CUSTOMER_COLUMNS
        ))
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    async fn count(&self) -> AppResult<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers WHERE id = $1",
            CUSTOMER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn nik_exists(&self, nik: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE nik = $1 AND ($2::INT IS NULL OR id <> $2))",
        )
        .bind(nik)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, customer: NewCustomer) -> AppResult<Customer> {
        let created = sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (name, nik, phone, membership_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(customer.name)
        .bind(customer.nik)
        .bind(customer.phone_number)
        .bind(customer.membership_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(created)
    }

    async fn update(&self, customer: Customer) -> AppResult<Option<Customer>> {
        let updated = sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers
            SET name = $2, nik = $3, phone = $4, membership_id = $5
            WHERE id = $1
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(customer.id)
        .bind(customer.name)
        .bind(customer.nik)
        .bind(customer.phone_number)
        .bind(customer.membership_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::ForeignKey) => {
                    AppError::Conflict("Customer has existing bookings".to_string())
                }
                _ => AppError::Database(e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
