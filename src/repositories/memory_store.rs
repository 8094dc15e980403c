//! Almacén en memoria
//!
//! Implementa los tres repositorios sobre tablas en memoria con la misma
//! semántica que PostgreSQL: NIK único, claves foráneas y reservas
//! atómicas (el write lock se mantiene durante todo el cálculo de precio).
//! Permite simular una caída del almacén con [`InMemoryStore::set_available`].

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{BookingRepository, CarRepository, CustomerRepository};
use crate::models::{Booking, BookingType, Car, Customer, Driver, Membership, NewCar, NewCustomer};
use crate::services::pricing_service::{quote, BookingPlan, PricedBooking, PricingLookup};
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::pagination::PageRequest;

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn page(&self, page: PageRequest) -> Vec<T> {
        self.rows
            .values()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(0))
            .cloned()
            .collect()
    }

    fn count(&self) -> i64 {
        self.rows.len() as i64
    }
}

#[derive(Debug, Default)]
struct Tables {
    memberships: Table<Membership>,
    customers: Table<Customer>,
    cars: Table<Car>,
    drivers: Table<Driver>,
    booking_types: Table<BookingType>,
    bookings: Table<Booking>,
}

impl Tables {
    fn check_membership(&self, membership_id: Option<i32>) -> AppResult<()> {
        match membership_id {
            Some(id) if !self.memberships.rows.contains_key(&id) => Err(not_found_error("Membership")),
            _ => Ok(()),
        }
    }

    fn nik_taken(&self, nik: &str, exclude_id: Option<i32>) -> bool {
        self.customers
            .rows
            .values()
            .any(|c| c.nik == nik && Some(c.id) != exclude_id)
    }
}

/// Consultas de tarifas sobre las tablas ya bloqueadas
struct TablesLookup<'t> {
    tables: &'t Tables,
}

#[async_trait]
impl<'t> PricingLookup for TablesLookup<'t> {
    async fn car_daily_rent(&mut self, car_id: i32) -> AppResult<Option<f64>> {
        Ok(self.tables.cars.rows.get(&car_id).map(|car| car.daily_rent))
    }

    async fn customer_discount(&mut self, customer_id: i32) -> AppResult<Option<f64>> {
        Ok(self.tables.customers.rows.get(&customer_id).map(|customer| {
            customer
                .membership_id
                .and_then(|id| self.tables.memberships.rows.get(&id))
                .map_or(0.0, |membership| membership.discount)
        }))
    }

    async fn driver_daily_cost(&mut self, driver_id: i32) -> AppResult<Option<f64>> {
        Ok(self.tables.drivers.rows.get(&driver_id).map(|driver| driver.daily_cost))
    }

    async fn booking_type_exists(&mut self, booking_type_id: i32) -> AppResult<bool> {
        Ok(self.tables.booking_types.rows.contains_key(&booking_type_id))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simular que el almacén deja de responder (o vuelve a hacerlo)
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    pub async fn add_membership(&self, name: &str, discount: f64) -> Membership {
        let mut tables = self.tables.write().await;
        let id = tables.memberships.next_id();
        let membership = Membership {
            id,
            name: name.to_string(),
            discount,
        };
        tables.memberships.rows.insert(id, membership.clone());
        membership
    }

    pub async fn add_driver(&self, name: &str, nik: &str, phone_number: &str, daily_cost: f64) -> Driver {
        let mut tables = self.tables.write().await;
        let id = tables.drivers.next_id();
        let driver = Driver {
            id,
            name: name.to_string(),
            nik: nik.to_string(),
            phone_number: phone_number.to_string(),
            daily_cost,
        };
        tables.drivers.rows.insert(id, driver.clone());
        driver
    }

    pub async fn add_booking_type(&self, name: &str, description: &str) -> BookingType {
        let mut tables = self.tables.write().await;
        let id = tables.booking_types.next_id();
        let booking_type = BookingType {
            id,
            name: name.to_string(),
            description: description.to_string(),
        };
        tables.booking_types.rows.insert(id, booking_type.clone());
        booking_type
    }
}

fn booking_from(id: i32, priced: PricedBooking) -> Booking {
    Booking {
        id,
        customer_id: priced.plan.customer_id,
        car_id: priced.plan.car_id,
        start_rent: priced.plan.start_rent,
        end_rent: priced.plan.end_rent,
        total_cost: priced.total_cost,
        driver_id: priced.plan.driver_id,
        total_driver_cost: priced.total_driver_cost,
        finished: priced.plan.finished,
        discount: priced.discount,
        booking_type_id: priced.plan.booking_type_id,
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn list(&self, page: PageRequest) -> AppResult<Vec<Customer>> {
        self.ensure_available()?;
        Ok(self.tables.read().await.customers.page(page))
    }

    async fn count(&self) -> AppResult<i64> {
        self.ensure_available()?;
        Ok(self.tables.read().await.customers.count())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>> {
        self.ensure_available()?;
        Ok(self.tables.read().await.customers.rows.get(&id).cloned())
    }

    async fn nik_exists(&self, nik: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        self.ensure_available()?;
        Ok(self.tables.read().await.nik_taken(nik, exclude_id))
    }

    async fn create(&self, customer: NewCustomer) -> AppResult<Customer> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        if tables.nik_taken(&customer.nik, None) {
            return Err(AppError::Conflict("NIK already registered".to_string()));
        }
        tables.check_membership(customer.membership_id)?;

        let id = tables.customers.next_id();
        let created = Customer {
            id,
            name: customer.name,
            nik: customer.nik,
            phone_number: customer.phone_number,
            membership_id: customer.membership_id,
        };
        tables.customers.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, customer: Customer) -> AppResult<Option<Customer>> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        if !tables.customers.rows.contains_key(&customer.id) {
            return Ok(None);
        }
        if tables.nik_taken(&customer.nik, Some(customer.id)) {
            return Err(AppError::Conflict("NIK already registered".to_string()));
        }
        tables.check_membership(customer.membership_id)?;

        tables.customers.rows.insert(customer.id, customer.clone());
        Ok(Some(customer))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        if tables.bookings.rows.values().any(|b| b.customer_id == id) {
            return Err(AppError::Conflict("Customer has existing bookings".to_string()));
        }
        Ok(tables.customers.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl CarRepository for InMemoryStore {
    async fn list(&self, page: PageRequest) -> AppResult<Vec<Car>> {
        self.ensure_available()?;
        Ok(self.tables.read().await.cars.page(page))
    }

    async fn count(&self) -> AppResult<i64> {
        self.ensure_available()?;
        Ok(self.tables.read().await.cars.count())
    }

    async fn create(&self, car: NewCar) -> AppResult<Car> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        let id = tables.cars.next_id();
        let created = Car {
            id,
            name: car.name,
            stock: car.stock,
            daily_rent: car.daily_rent,
        };
        tables.cars.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, car: NewCar) -> AppResult<Option<Car>> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.cars.rows.get_mut(&id) else {
            return Ok(None);
        };
        existing.name = car.name;
        existing.stock = car.stock;
        existing.daily_rent = car.daily_rent;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        if tables.bookings.rows.values().any(|b| b.car_id == id) {
            return Err(AppError::Conflict("Car has existing bookings".to_string()));
        }
        Ok(tables.cars.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn list(&self, page: PageRequest) -> AppResult<Vec<Booking>> {
        self.ensure_available()?;
        Ok(self.tables.read().await.bookings.page(page))
    }

    async fn count(&self) -> AppResult<i64> {
        self.ensure_available()?;
        Ok(self.tables.read().await.bookings.count())
    }

    async fn create(&self, plan: BookingPlan) -> AppResult<Booking> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;

        let priced = quote(&mut TablesLookup { tables: &*tables }, plan).await?;

        let id = tables.bookings.next_id();
        let booking = booking_from(id, priced);
        tables.bookings.rows.insert(id, booking.clone());
        Ok(booking)
    }

    async fn update(&self, id: i32, plan: BookingPlan) -> AppResult<Booking> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        if !tables.bookings.rows.contains_key(&id) {
            return Err(not_found_error("Booking"));
        }

        let priced = quote(&mut TablesLookup { tables: &*tables }, plan).await?;

        let booking = booking_from(id, priced);
        tables.bookings.rows.insert(id, booking.clone());
        Ok(booking)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        self.ensure_available()?;
        Ok(self.tables.write().await.bookings.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::booking_dto::BookingRequest;
    use crate::services::pricing_service::validate_booking;

    fn plan(customer_id: i32, car_id: i32, start: &str, end: &str) -> BookingPlan {
        validate_booking(&BookingRequest {
            customer_id,
            car_id,
            driver_id: None,
            start_rent: start.to_string(),
            end_rent: end.to_string(),
            booking_type_id: None,
            finished: false,
        })
        .unwrap()
    }

    async fn seeded() -> (InMemoryStore, Customer, Car) {
        let store = InMemoryStore::new();
        let gold = store.add_membership("Gold", 10.0).await;
        let customer = CustomerRepository::create(
            &store,
            NewCustomer {
                name: "Budi".to_string(),
                nik: "3201010101010001".to_string(),
                phone_number: "081234567890".to_string(),
                membership_id: Some(gold.id),
            },
        )
        .await
        .unwrap();
        let car = CarRepository::create(
            &store,
            NewCar {
                name: "Toyota Avanza".to_string(),
                stock: 3,
                daily_rent: 100_000.0,
            },
        )
        .await
        .unwrap();
        (store, customer, car)
    }

    #[tokio::test]
    async fn test_create_booking_snapshot() {
        let (store, customer, car) = seeded().await;
        let booking = BookingRepository::create(&store, plan(customer.id, car.id, "2024-01-01", "2024-01-04"))
            .await
            .unwrap();

        assert_eq!(booking.id, 1);
        assert!((booking.total_cost - 270_000.0).abs() < 1e-6);
        assert_eq!(booking.discount, 10.0);

        // Cambiar la tarifa no altera la instantánea guardada
        CarRepository::update(
            &store,
            car.id,
            NewCar {
                name: car.name.clone(),
                stock: car.stock,
                daily_rent: 999_000.0,
            },
        )
        .await
        .unwrap();
        let stored = BookingRepository::list(&store, PageRequest { page: 1, limit: 5 })
            .await
            .unwrap();
        assert!((stored[0].total_cost - 270_000.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_failed_pricing_leaves_no_booking() {
        let (store, customer, _) = seeded().await;
        let result = BookingRepository::create(&store, plan(customer.id, 42, "2024-01-01", "2024-01-02")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(BookingRepository::count(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_booking() {
        let (store, customer, car) = seeded().await;
        let result = BookingRepository::update(&store, 7, plan(customer.id, car.id, "2024-01-01", "2024-01-02")).await;
        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Booking not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_referenced_rows_cannot_be_deleted() {
        let (store, customer, car) = seeded().await;
        BookingRepository::create(&store, plan(customer.id, car.id, "2024-01-01", "2024-01-02"))
            .await
            .unwrap();

        assert!(matches!(
            CustomerRepository::delete(&store, customer.id).await,
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            CarRepository::delete(&store, car.id).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_nik_exists_excludes_self() {
        let (store, customer, _) = seeded().await;
        assert!(store.nik_exists(&customer.nik, None).await.unwrap());
        assert!(!store.nik_exists(&customer.nik, Some(customer.id)).await.unwrap());
        assert!(!store.nik_exists("9999", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let (store, _, _) = seeded().await;
        store.set_available(false);
        assert!(matches!(
            CarRepository::count(&store).await,
            Err(AppError::Database(_))
        ));
        store.set_available(true);
        assert_eq!(CarRepository::count(&store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_pages_are_ordered_by_id() {
        let (store, _, _) = seeded().await;
        for i in 0..6 {
            CarRepository::create(
                &store,
                NewCar {
                    name: format!("Car {}", i),
                    stock: 1,
                    daily_rent: 50_000.0,
                },
            )
            .await
            .unwrap();
        }
        let second = CarRepository::list(&store, PageRequest { page: 2, limit: 5 }).await.unwrap();
        let ids: Vec<i32> = second.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![6, 7]);
    }
}
