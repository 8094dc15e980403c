//! Modelo de Car
//! 
//! Mapea la tabla `cars`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Coche disponible para alquiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: i32,
    pub name: String,
    pub stock: i32,
    /// Tarifa diaria
    pub daily_rent: f64,
}

/// Datos de un coche sin id, para insertar o reemplazar
#[derive(Debug, Clone)]
pub struct NewCar {
    pub name: String,
    pub stock: i32,
    pub daily_rent: f64,
}
