//! Modelo de Driver

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Conductor contratable junto a una reserva
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: i32,
    pub name: String,
    pub nik: String,
    pub phone_number: String,
    /// Coste del conductor por día
    pub daily_cost: f64,
}
