//! Servicios de negocio

pub mod pricing_service;
