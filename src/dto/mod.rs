//! DTOs de entrada y salida de la API

pub mod booking_dto;
pub mod car_dto;
pub mod common_dto;
pub mod customer_dto;
