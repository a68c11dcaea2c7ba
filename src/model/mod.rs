//! Domain data shared by the shop's tasks.

pub mod barber;
pub mod customer;

pub use barber::Barber;
pub use customer::Customer;
