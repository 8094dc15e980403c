use serde::Deserialize;

// Request para crear o reemplazar un coche
#[derive(Debug, Clone, Deserialize)]
pub struct CarRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub daily_rent: f64,
}
