//! Repositorios
//!
//! Cada recurso expone un trait de acceso a datos. La implementación
//! PostgreSQL vive en `*_repository.rs`; `memory_store` ofrece una versión
//! en memoria con la misma semántica para tests.

pub mod booking_repository;
pub mod car_repository;
pub mod customer_repository;
pub mod memory_store;

use async_trait::async_trait;

use crate::models::{Booking, Car, Customer, NewCar, NewCustomer};
use crate::services::pricing_service::BookingPlan;
use crate::utils::errors::AppResult;
use crate::utils::pagination::PageRequest;

pub use booking_repository::PgBookingRepository;
pub use car_repository::PgCarRepository;
pub use customer_repository::PgCustomerRepository;
pub use memory_store::InMemoryStore;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> AppResult<Vec<Customer>>;

    async fn count(&self) -> AppResult<i64>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>>;

    /// ¿Existe otro cliente con este NIK? `exclude_id` ignora al propio cliente.
    async fn nik_exists(&self, nik: &str, exclude_id: Option<i32>) -> AppResult<bool>;

    async fn create(&self, customer: NewCustomer) -> AppResult<Customer>;

    /// Reemplaza todos los campos; `Ok(None)` si el cliente no existe
    async fn update(&self, customer: Customer) -> AppResult<Option<Customer>>;

    /// `Ok(false)` si no se borró ninguna fila
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> AppResult<Vec<Car>>;

    async fn count(&self) -> AppResult<i64>;

    async fn create(&self, car: NewCar) -> AppResult<Car>;

    /// `Ok(None)` si el coche no existe
    async fn update(&self, id: i32, car: NewCar) -> AppResult<Option<Car>>;

    async fn delete(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> AppResult<Vec<Booking>>;

    async fn count(&self) -> AppResult<i64>;

    /// Calcula el precio e inserta la reserva de forma atómica
    async fn create(&self, plan: BookingPlan) -> AppResult<Booking>;

    /// Comprueba existencia, recalcula el precio y actualiza de forma atómica.
    /// Devuelve `NotFound` si la reserva no existe.
    async fn update(&self, id: i32, plan: BookingPlan) -> AppResult<Booking>;

    async fn delete(&self, id: i32) -> AppResult<bool>;
}
