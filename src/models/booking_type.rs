use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookingType {
    pub id: i32,
    pub name: String,
    pub description: String,
}
