//! Modelo de Booking
//! 
//! Los campos de coste son una instantánea calculada al crear o actualizar
//! la reserva; no se recalculan si luego cambia la tarifa o el descuento.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Reserva - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i32,
    pub customer_id: i32,
    pub car_id: i32,
    pub start_rent: NaiveDate,
    pub end_rent: NaiveDate,
    pub total_cost: f64,
    pub driver_id: Option<i32>,
    pub total_driver_cost: f64,
    pub finished: bool,
    /// Descuento de membresía aplicado en el momento del cálculo
    pub discount: f64,
    pub booking_type_id: Option<i32>,
}
