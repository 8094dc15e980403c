//! Conversión de rechazos de extractores de axum a `AppError`
//!
//! Así los cuerpos JSON mal formados y los ids no numéricos responden con
//! el mismo envelope `{message}` que el resto de errores.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;

use super::errors::{AppError, AppResult};

/// Extraer el cuerpo JSON o devolver 400 "Invalid input"
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!("JSON body rejected: {}", rejection.body_text());
            Err(AppError::BadRequest("Invalid input".to_string()))
        }
    }
}

/// Extraer el id de la ruta o devolver 400 "Invalid ID"
pub fn path_id(path: Result<Path<i32>, PathRejection>) -> AppResult<i32> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!("Path id rejected: {}", rejection.body_text());
            Err(AppError::BadRequest("Invalid ID".to_string()))
        }
    }
}
