//! # Shop Registry
//!
//! The authoritative record of every customer in a barbershop simulation, and
//! the oracle that certifies the synchronization protocol driving it.
//!
//! Seat allocators, barbers and customers each run in their own task. None of
//! them owns customer state. Instead, every state change goes through the
//! registry, which checks it against the customer state machine:
//!
//! ```text
//! PENDING -> WAITING -> CUTTING -> DONE
//!    |
//!    +-----> REJECTED
//! ```
//!
//! Legal transitions are applied. Illegal ones are refused and tallied as a
//! [`Complaint`]; the run continues either way. The closing [`ShopReport`] lists
//! the tallies, and a report with zero complaints certifies the protocol for
//! that run.
//!
//! ## Architecture
//!
//! 1. **State** ([`Shop`]): plain data and synchronous transitions, time injected.
//! 2. **Runtime** ([`RegistryActor`]): owns the `Shop`, processes one request at a
//!    time, logs every event and returns the report when its channel closes.
//! 3. **Interface** ([`RegistryClient`]): cloneable async handle.
//!
//! The actor's sequential loop is the shop-wide lock: counters, occupancy and
//! complaint tallies are updated in the same message as the transition that
//! triggered them.
//!
//! ## Errors
//!
//! Complaints are not errors. [`RegistryError`] is reserved for broken contracts
//! (unknown customer, room out of range, too many arrivals) and for a registry
//! that has gone away.
//!
//! ## Testing
//!
//! The [`mock`] module hands out real clients backed by scripted answers, for
//! testing protocol code without a running registry.

pub mod actor;
pub mod client;
pub mod complaint;
pub mod error;
pub mod message;
pub mod mock;
pub mod report;
pub mod shop;
pub mod tracing;

pub use actor::RegistryActor;
pub use client::RegistryClient;
pub use complaint::{Complaint, Complaints};
pub use error::RegistryError;
pub use message::{RegistryRequest, Response};
pub use report::ShopReport;
pub use shop::{
    cutting_time, CustomerId, CustomerRecord, CustomerStatus, NewCustomer, Outcome, Shop, ShopLimits,
};
