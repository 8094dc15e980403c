//! Modelo de Membership

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Nivel de membresía con su porcentaje de descuento [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Membership {
    pub id: i32,
    #[serde(rename = "membership_name")]
    pub name: String,
    pub discount: f64,
}
