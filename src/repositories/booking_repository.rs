//! Repositorio de reservas (PostgreSQL)
//!
//! El cálculo de precio y la escritura comparten una misma transacción:
//! si falla cualquier consulta, no se crea ni modifica ninguna reserva.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::BookingRepository;
use crate::models::Booking;
use crate::services::pricing_service::{quote, BookingPlan, PricingLookup};
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::pagination::PageRequest;

const BOOKING_COLUMNS: &str = "id, customer_id, car_id, start_rent, end_rent, total_cost, \
     driver_id, total_driver_cost, finished, discount, booking_type_id";

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Las filas leídas para el precio quedan bloqueadas FOR SHARE hasta el commit,
// así un DELETE concurrente espera en vez de romper la clave foránea del INSERT.
const CAR_RENT_SQL: &str = "SELECT daily_rent FROM cars WHERE id = $1 FOR SHARE";
const CUSTOMER_DISCOUNT_SQL: &str = r#"
    SELECT m.discount
    FROM customers c
    LEFT JOIN membership m ON m.id = c.membership_id
    WHERE c.id = $1
    FOR SHARE OF c
"#;
const DRIVER_COST_SQL: &str = "SELECT daily_cost FROM drivers WHERE id = $1 FOR SHARE";
const BOOKING_TYPE_SQL: &str = "SELECT id FROM booking_type WHERE id = $1 FOR SHARE";

/// Consultas de tarifas sobre la conexión de la transacción en curso
struct TxPricingLookup<'c> {
    conn: &'c mut PgConnection,
}

#[async_trait]
impl<'c> PricingLookup for TxPricingLookup<'c> {
    async fn car_daily_rent(&mut self, car_id: i32) -> AppResult<Option<f64>> {
        let rent = sqlx::query_scalar::<_, f64>(CAR_RENT_SQL)
            .bind(car_id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(rent)
    }

    async fn customer_discount(&mut self, customer_id: i32) -> AppResult<Option<f64>> {
        let row = sqlx::query_scalar::<_, Option<f64>>(CUSTOMER_DISCOUNT_SQL)
            .bind(customer_id)
            .fetch_optional(&mut *self.conn)
            .await?;

        // Cliente sin membresía: sin descuento
        Ok(row.map(|discount| discount.unwrap_or(0.0)))
    }

    async fn driver_daily_cost(&mut self, driver_id: i32) -> AppResult<Option<f64>> {
        let cost = sqlx::query_scalar::<_, f64>(DRIVER_COST_SQL)
            .bind(driver_id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(cost)
    }

    async fn booking_type_exists(&mut self, booking_type_id: i32) -> AppResult<bool> {
        let found = sqlx::query_scalar::<_, i32>(BOOKING_TYPE_SQL)
            .bind(booking_type_id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(found.is_some())
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn list(&self, page: PageRequest) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {} FROM bookings ORDER BY id LIMIT $1 OFFSET $2",
            BOOKING_COLUMNS
        ))
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn count(&self) -> AppResult<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn create(&self, plan: BookingPlan) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let priced = quote(&mut TxPricingLookup { conn: &mut *tx }, plan).await?;

        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (customer_id, car_id, start_rent, end_rent, total_cost,
                                  driver_id, total_driver_cost, finished, discount, booking_type_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(priced.plan.customer_id)
        .bind(priced.plan.car_id)
        .bind(priced.plan.start_rent)
        .bind(priced.plan.end_rent)
        .bind(priced.total_cost)
        .bind(priced.plan.driver_id)
        .bind(priced.total_driver_cost)
        .bind(priced.plan.finished)
        .bind(priced.discount)
        .bind(priced.plan.booking_type_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(booking)
    }

    async fn update(&self, id: i32, plan: BookingPlan) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        // Bloquear la fila para que no desaparezca entre la comprobación y el UPDATE
        let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM bookings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_none() {
            return Err(not_found_error("Booking"));
        }

        let priced = quote(&mut TxPricingLookup { conn: &mut *tx }, plan).await?;

        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET customer_id = $2, car_id = $3, start_rent = $4, end_rent = $5, total_cost = $6,
                driver_id = $7, total_driver_cost = $8, finished = $9, discount = $10,
                booking_type_id = $11
            WHERE id = $1
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(id)
        .bind(priced.plan.customer_id)
        .bind(priced.plan.car_id)
        .bind(priced.plan.start_rent)
        .bind(priced.plan.end_rent)
        .bind(priced.total_cost)
        .bind(priced.plan.driver_id)
        .bind(priced.total_driver_cost)
        .bind(priced.plan.finished)
        .bind(priced.discount)
        .bind(priced.plan.booking_type_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(booking)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
