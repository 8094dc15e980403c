//! Modelos del sistema
//! 
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL.

pub mod booking;
pub mod booking_type;
pub mod car;
pub mod customer;
pub mod driver;
pub mod membership;

pub use booking::Booking;
pub use booking_type::BookingType;
pub use car::{Car, NewCar};
pub use customer::{Customer, NewCustomer};
pub use driver::Driver;
pub use membership::Membership;
