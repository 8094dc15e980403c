pub mod booking_controller;
pub mod car_controller;
pub mod customer_controller;
