//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los repositorios se inyectan como trait
//! objects para poder sustituir PostgreSQL por el almacén en memoria.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    BookingRepository, CarRepository, CustomerRepository, InMemoryStore, PgBookingRepository,
    PgCarRepository, PgCustomerRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub customers: Arc<dyn CustomerRepository>,
    pub cars: Arc<dyn CarRepository>,
    pub bookings: Arc<dyn BookingRepository>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        customers: Arc<dyn CustomerRepository>,
        cars: Arc<dyn CarRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            config,
            customers,
            cars,
            bookings,
        }
    }

    /// Estado respaldado por PostgreSQL
    pub fn with_pool(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self::new(
            config,
            Arc::new(PgCustomerRepository::new(pool.clone())),
            Arc::new(PgCarRepository::new(pool.clone())),
            Arc::new(PgBookingRepository::new(pool)),
        )
    }

    /// Estado respaldado por un almacén en memoria
    pub fn in_memory(store: InMemoryStore, config: EnvironmentConfig) -> Self {
        Self::new(
            config,
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        )
    }
}
