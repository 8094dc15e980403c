use serde::Deserialize;

// Request para crear o reemplazar una reserva.
// Las fechas llegan como texto "YYYY-MM-DD" y se validan en el servicio de precios.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub customer_id: i32,
    #[serde(default)]
    pub car_id: i32,
    pub driver_id: Option<i32>,
    #[serde(default)]
    pub start_rent: String,
    #[serde(default)]
    pub end_rent: String,
    pub booking_type_id: Option<i32>,
    #[serde(default)]
    pub finished: bool,
}
