//! Modelo de Customer
//! 
//! Mapea la tabla `customers`. El NIK es único entre clientes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Cliente - mapea exactamente a la tabla customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub nik: String,
    #[sqlx(rename = "phone")]
    pub phone_number: String,
    pub membership_id: Option<i32>,
}

/// Datos para insertar un cliente nuevo
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub nik: String,
    pub phone_number: String,
    pub membership_id: Option<i32>,
}
