//! # Barbershop
//!
//! A concurrency simulation: barbers, a waiting room with a fixed number of
//! chairs, and a stream of customers who are seated, served, or turned away.
//! Every state change is audited by the [`shop_registry`] actor, and a run that
//! ends with zero complaints certifies the synchronization protocol.
//!
//! ## Components
//!
//! - **[waiting_room]**: the bounded seat allocator ([`SeatAllocator`](waiting_room::SeatAllocator)
//!   and its implementation [`WaitingRoom`](waiting_room::WaitingRoom)).
//! - **[barber_pool]**: one worker task per barber.
//! - **[customer_actor]**: one short-lived task per customer.
//! - **[arrivals]**: the randomized arrival generator.
//! - **[lifecycle]**: [`ShopSystem`](lifecycle::ShopSystem), which opens and closes
//!   the shop in order.
//! - **[config]**: command line options.

pub mod arrivals;
pub mod barber_pool;
pub mod config;
pub mod customer_actor;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod names;
pub mod waiting_room;

pub use error::ShopError;
