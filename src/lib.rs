//! Backend de alquiler de coches
//!
//! CRUD de clientes, coches y reservas sobre PostgreSQL, con cálculo de
//! precio de reservas (duración, descuento de membresía y conductor).

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
