use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::pagination::{PageRequest, PageRules};

// Response genérica para operaciones de escritura
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: None,
        }
    }
}

// Query de paginación; se guardan los valores crudos para tolerar basura
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PaginationQuery {
    pub fn resolve(&self, rules: PageRules) -> PageRequest {
        PageRequest::from_params(self.page.as_deref(), self.limit.as_deref(), rules)
    }
}

// Envelope de listados paginados
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub total_results: i64,
    pub data: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn new(request: PageRequest, total_results: i64, data: Vec<T>) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total_pages: request.total_pages(total_results),
            total_results,
            data,
        }
    }
}

/// Distinguir entre campo ausente (`None`) y `null` explícito (`Some(None)`).
/// Se usa junto a `#[serde(default)]`.
pub fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
