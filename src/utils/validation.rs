//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::NaiveDate;
use validator::ValidationError;

/// Formato de fecha aceptado en las reservas
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validar y convertir string a fecha (YYYY-MM-DD)
/// chrono acepta signos, espacios y meses o días de un dígito, así que antes
/// se exige la forma exacta `dddd-dd-dd`.
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    };

    let well_formed = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un número sea positivo
pub fn validate_positive<T: PartialOrd + Default + serde::Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::default() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(validate_date("2024/01/15").is_err());
        assert!(validate_date("2024-02-30").is_err());
        assert!(validate_date("").is_err());
    }

    #[test]
    fn test_validate_date_is_strict() {
        assert!(validate_date("2024-1-4").is_err());
        assert!(validate_date("2024-01-4").is_err());
        assert!(validate_date(" 2024-01-15").is_err());
        assert!(validate_date("2024-01-15 ").is_err());
        assert!(validate_date("+2024-1-15").is_err());
        assert!(validate_date("2024-12-31").is_ok());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Avanza").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
        assert!(validate_positive(0.5).is_ok());
        assert!(validate_positive(0.0).is_err());
    }
}
