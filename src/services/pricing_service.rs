//! Servicio de precios de reservas
//!
//! Valida una petición de reserva, calcula la duración del alquiler y deriva
//! el coste total (con descuento de membresía) y el coste del conductor.
//! No persiste nada: las consultas de tarifas van a través de [`PricingLookup`]
//! y el repositorio decide dentro de qué transacción se ejecutan.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::dto::booking_dto::BookingRequest;
use crate::utils::errors::{bad_request_error, internal_error, not_found_error, AppResult};
use crate::utils::validation::{validate_date, validate_positive};

/// Consultas que necesita el cálculo de precios.
///
/// Cada método devuelve `Ok(None)` si la entidad referenciada no existe,
/// y `Err` sólo ante fallos del almacén.
#[async_trait]
pub trait PricingLookup: Send {
    /// Tarifa diaria del coche
    async fn car_daily_rent(&mut self, car_id: i32) -> AppResult<Option<f64>>;

    /// Descuento de la membresía del cliente; 0 si el cliente no tiene membresía
    async fn customer_discount(&mut self, customer_id: i32) -> AppResult<Option<f64>>;

    /// Coste diario del conductor
    async fn driver_daily_cost(&mut self, driver_id: i32) -> AppResult<Option<f64>>;

    async fn booking_type_exists(&mut self, booking_type_id: i32) -> AppResult<bool>;
}

/// Reserva validada, con fechas ya interpretadas
#[derive(Debug, Clone, PartialEq)]
pub struct BookingPlan {
    pub customer_id: i32,
    pub car_id: i32,
    pub driver_id: Option<i32>,
    pub booking_type_id: Option<i32>,
    pub start_rent: NaiveDate,
    pub end_rent: NaiveDate,
    pub duration_days: i64,
    pub finished: bool,
}

/// Reserva con precio calculado, lista para insertar o actualizar
#[derive(Debug, Clone, PartialEq)]
pub struct PricedBooking {
    pub plan: BookingPlan,
    pub total_cost: f64,
    pub total_driver_cost: f64,
    pub discount: f64,
}

/// Validar una petición de reserva. Gana el primer fallo.
pub fn validate_booking(request: &BookingRequest) -> AppResult<BookingPlan> {
    if validate_positive(request.customer_id).is_err() {
        return Err(bad_request_error("Invalid customer ID"));
    }
    if validate_positive(request.car_id).is_err() {
        return Err(bad_request_error("Invalid car ID"));
    }
    if let Some(driver_id) = request.driver_id {
        if validate_positive(driver_id).is_err() {
            return Err(bad_request_error("Invalid driver ID"));
        }
    }
    if let Some(booking_type_id) = request.booking_type_id {
        if validate_positive(booking_type_id).is_err() {
            return Err(bad_request_error("Invalid booking type ID"));
        }
    }

    let (start_rent, end_rent) = match (
        validate_date(&request.start_rent),
        validate_date(&request.end_rent),
    ) {
        (Ok(start), Ok(end)) => (start, end),
        _ => return Err(bad_request_error("Invalid date format, expected YYYY-MM-DD")),
    };

    if start_rent >= end_rent {
        return Err(bad_request_error("Start rent must be before end rent"));
    }

    let duration_days = rental_duration_days(start_rent, end_rent);
    if duration_days < 1 {
        return Err(bad_request_error("Rental duration must be at least one day"));
    }

    Ok(BookingPlan {
        customer_id: request.customer_id,
        car_id: request.car_id,
        driver_id: request.driver_id,
        booking_type_id: request.booking_type_id,
        start_rent,
        end_rent,
        duration_days,
        finished: request.finished,
    })
}

/// Días completos de alquiler: floor(horas / 24)
pub fn rental_duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_hours().div_euclid(24)
}

/// Calcular (coste total, coste del conductor)
pub fn calculate_costs(
    daily_rent: f64,
    discount: f64,
    driver_daily_cost: Option<f64>,
    duration_days: i64,
) -> (f64, f64) {
    let days = duration_days as f64;
    let total_cost = daily_rent * days * (1.0 - discount / 100.0);
    let total_driver_cost = driver_daily_cost.map_or(0.0, |cost| cost * days);
    (total_cost, total_driver_cost)
}

/// Obtener tarifas y calcular el precio de una reserva ya validada
pub async fn quote<L>(lookup: &mut L, plan: BookingPlan) -> AppResult<PricedBooking>
where
    L: PricingLookup + ?Sized,
{
    let daily_rent = lookup
        .car_daily_rent(plan.car_id)
        .await?
        .ok_or_else(|| not_found_error("Car"))?;

    let discount = lookup
        .customer_discount(plan.customer_id)
        .await?
        .ok_or_else(|| not_found_error("Customer"))?;
    if !(0.0..=100.0).contains(&discount) {
        return Err(internal_error(&format!(
            "membership discount {} for customer {} is outside [0, 100]",
            discount, plan.customer_id
        )));
    }

    let driver_daily_cost = match plan.driver_id {
        Some(driver_id) => Some(
            lookup
                .driver_daily_cost(driver_id)
                .await?
                .ok_or_else(|| not_found_error("Driver"))?,
        ),
        None => None,
    };

    if let Some(booking_type_id) = plan.booking_type_id {
        if !lookup.booking_type_exists(booking_type_id).await? {
            return Err(not_found_error("Booking type"));
        }
    }

    let (total_cost, total_driver_cost) =
        calculate_costs(daily_rent, discount, driver_daily_cost, plan.duration_days);

    tracing::debug!(
        car_id = plan.car_id,
        customer_id = plan.customer_id,
        days = plan.duration_days,
        total_cost,
        total_driver_cost,
        "booking priced"
    );

    Ok(PricedBooking {
        plan,
        total_cost,
        total_driver_cost,
        discount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use std::collections::HashMap;

    fn request(start: &str, end: &str) -> BookingRequest {
        BookingRequest {
            customer_id: 1,
            car_id: 1,
            driver_id: None,
            start_rent: start.to_string(),
            end_rent: end.to_string(),
            booking_type_id: None,
            finished: false,
        }
    }

    fn bad_request_message(result: AppResult<BookingPlan>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[derive(Default)]
    struct FakeLookup {
        rents: HashMap<i32, f64>,
        discounts: HashMap<i32, f64>,
        drivers: HashMap<i32, f64>,
        calls: Vec<&'static str>,
    }

    #[async_trait]
    impl PricingLookup for FakeLookup {
        async fn car_daily_rent(&mut self, car_id: i32) -> AppResult<Option<f64>> {
            self.calls.push("car");
            Ok(self.rents.get(&car_id).copied())
        }

        async fn customer_discount(&mut self, customer_id: i32) -> AppResult<Option<f64>> {
            self.calls.push("customer");
            Ok(self.discounts.get(&customer_id).copied())
        }

        async fn driver_daily_cost(&mut self, driver_id: i32) -> AppResult<Option<f64>> {
            self.calls.push("driver");
            Ok(self.drivers.get(&driver_id).copied())
        }

        async fn booking_type_exists(&mut self, booking_type_id: i32) -> AppResult<bool> {
            self.calls.push("booking_type");
            Ok(booking_type_id == 1)
        }
    }

    fn lookup() -> FakeLookup {
        let mut lookup = FakeLookup::default();
        lookup.rents.insert(1, 100_000.0);
        lookup.discounts.insert(1, 10.0);
        lookup.discounts.insert(2, 0.0);
        lookup.drivers.insert(1, 50_000.0);
        lookup
    }

    #[test]
    fn test_validation_order() {
        let mut req = request("2024-01-04", "2024-01-01");
        req.customer_id = 0;
        req.car_id = -1;
        assert_eq!(bad_request_message(validate_booking(&req)), "Invalid customer ID");

        req.customer_id = 1;
        assert_eq!(bad_request_message(validate_booking(&req)), "Invalid car ID");

        req.car_id = 1;
        req.driver_id = Some(0);
        assert_eq!(bad_request_message(validate_booking(&req)), "Invalid driver ID");

        req.driver_id = None;
        req.booking_type_id = Some(-2);
        assert_eq!(bad_request_message(validate_booking(&req)), "Invalid booking type ID");

        req.booking_type_id = None;
        assert_eq!(
            bad_request_message(validate_booking(&req)),
            "Start rent must be before end rent"
        );
    }

    #[test]
    fn test_rejects_same_day_and_malformed_dates() {
        assert_eq!(
            bad_request_message(validate_booking(&request("2024-01-01", "2024-01-01"))),
            "Start rent must be before end rent"
        );
        assert_eq!(
            bad_request_message(validate_booking(&request("01-01-2024", "2024-01-04"))),
            "Invalid date format, expected YYYY-MM-DD"
        );
        assert_eq!(
            bad_request_message(validate_booking(&request("2024-01-01", "2024-01-04T10:00:00"))),
            "Invalid date format, expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_plan_duration() {
        let plan = validate_booking(&request("2024-01-01", "2024-01-04")).unwrap();
        assert_eq!(plan.duration_days, 3);
        assert_eq!(plan.start_rent, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        // Cruza un año bisiesto
        let plan = validate_booking(&request("2024-02-28", "2024-03-01")).unwrap();
        assert_eq!(plan.duration_days, 2);
    }

    #[test]
    fn test_calculate_costs() {
        let (total, driver) = calculate_costs(100_000.0, 10.0, None, 3);
        assert!((total - 270_000.0).abs() < 1e-6);
        assert_eq!(driver, 0.0);

        let (total, driver) = calculate_costs(250_000.0, 0.0, Some(75_000.0), 2);
        assert!((total - 500_000.0).abs() < 1e-6);
        assert!((driver - 150_000.0).abs() < 1e-6);

        let (total, _) = calculate_costs(80_000.0, 100.0, None, 5);
        assert_eq!(total, 0.0);
    }

    #[tokio::test]
    async fn test_quote_with_membership_discount() {
        let mut lookup = lookup();
        let plan = validate_booking(&request("2024-01-01", "2024-01-04")).unwrap();

        let priced = quote(&mut lookup, plan).await.unwrap();
        assert!((priced.total_cost - 270_000.0).abs() < 1e-6);
        assert_eq!(priced.total_driver_cost, 0.0);
        assert_eq!(priced.discount, 10.0);
        assert_eq!(lookup.calls, vec!["car", "customer"]);
    }

    #[tokio::test]
    async fn test_quote_with_driver() {
        let mut lookup = lookup();
        let mut req = request("2024-01-01", "2024-01-03");
        req.customer_id = 2;
        req.driver_id = Some(1);
        req.booking_type_id = Some(1);
        let plan = validate_booking(&req).unwrap();

        let priced = quote(&mut lookup, plan).await.unwrap();
        assert!((priced.total_cost - 200_000.0).abs() < 1e-6);
        assert!((priced.total_driver_cost - 100_000.0).abs() < 1e-6);
        assert_eq!(lookup.calls, vec!["car", "customer", "driver", "booking_type"]);
    }

    #[tokio::test]
    async fn test_quote_missing_references() {
        let plan = validate_booking(&request("2024-01-01", "2024-01-03")).unwrap();

        let mut missing_car = lookup();
        missing_car.rents.clear();
        match quote(&mut missing_car, plan.clone()).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Car not found"),
            other => panic!("unexpected result: {:?}", other),
        }

        let mut missing_customer = lookup();
        missing_customer.discounts.clear();
        match quote(&mut missing_customer, plan.clone()).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Customer not found"),
            other => panic!("unexpected result: {:?}", other),
        }

        let mut with_driver = plan.clone();
        with_driver.driver_id = Some(99);
        match quote(&mut lookup(), with_driver).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Driver not found"),
            other => panic!("unexpected result: {:?}", other),
        }

        let mut with_type = plan;
        with_type.booking_type_id = Some(7);
        match quote(&mut lookup(), with_type).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Booking type not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_quote_rejects_corrupt_discount() {
        let mut lookup = lookup();
        lookup.discounts.insert(1, 150.0);
        let plan = validate_booking(&request("2024-01-01", "2024-01-03")).unwrap();
        assert!(matches!(
            quote(&mut lookup, plan).await,
            Err(AppError::Internal(_))
        ));
    }
}
