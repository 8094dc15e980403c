//! Paginación de listados
//!
//! Los parámetros `page` y `limit` se interpretan de forma tolerante:
//! valores ausentes, no numéricos o no positivos vuelven al valor por defecto.

/// Reglas de paginación de un recurso
#[derive(Debug, Clone, Copy)]
pub struct PageRules {
    pub default_limit: i64,
    pub max_limit: Option<i64>,
}

impl PageRules {
    pub const CUSTOMERS: PageRules = PageRules { default_limit: 10, max_limit: None };
    pub const CARS: PageRules = PageRules { default_limit: 5, max_limit: Some(5) };
    pub const BOOKINGS: PageRules = PageRules { default_limit: 5, max_limit: None };
}

/// Página solicitada, ya normalizada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Normalizar los parámetros crudos de la query
    pub fn from_params(page: Option<&str>, limit: Option<&str>, rules: PageRules) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let mut limit = parse_positive(limit).unwrap_or(rules.default_limit);
        if let Some(max) = rules.max_limit {
            limit = limit.min(max);
        }
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// ceil(total / limit)
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total - 1) / self.limit + 1
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
}
