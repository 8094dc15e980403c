//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! paginación y extracción de peticiones.

pub mod errors;
pub mod extract;
pub mod pagination;
pub mod validation;
