use async_trait::async_trait;
use sqlx::PgPool;

use super::CarRepository;
use crate::models::{Car, NewCar};
use crate::utils::errors::{constraint_violation, AppError, AppResult, ConstraintViolation};
use crate::utils::pagination::PageRequest;

pub struct PgCarRepository {
    pool: PgPool,
}

impl PgCarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn list(&self, page: PageRequest) -> AppResult<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, name, stock, daily_rent FROM cars ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    async fn count(&self) -> AppResult<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn create(&self, car: NewCar) -> AppResult<Car> {
        let created = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (name, stock, daily_rent)
            VALUES ($1, $2, $3)
            RETURNING id, name, stock, daily_rent
            "#,
        )
        .bind(car.name)
        .bind(car.stock)
        .bind(car.daily_rent)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: i32, car: NewCar) -> AppResult<Option<Car>> {
        let updated = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET name = $2, stock = $3, daily_rent = $4
            WHERE id = $1
            RETURNING id, name, stock, daily_rent
            "#,
        )
        .bind(id)
        .bind(car.name)
        .bind(car.stock)
        .bind(car.daily_rent)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::ForeignKey) => {
                    AppError::Conflict("Car has existing bookings".to_string())
                }
                _ => AppError::Database(e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
