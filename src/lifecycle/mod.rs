//! # Shop Lifecycle & Orchestration
//!
//! Individual tasks in the shop are simple; wiring them together and taking them
//! down in the right order is where the care goes. [`ShopSystem`] is the
//! conductor.
//!
//! ## Opening
//!
//! 1. **Registry** - spawn the [`RegistryActor`](shop_registry::RegistryActor); the
//!    shop clock starts
//! 2. **Waiting room** - build the seat allocator around a registry client
//! 3. **Barbers** - spawn one worker per room
//!
//! ## Arrivals
//!
//! For each generated arrival: sleep for its delay, spawn the customer task,
//! register the customer with that task's id, then hand the task its record.
//! Registering after spawning is what lets the registry recognise a customer
//! task that tries to serve itself.
//!
//! ## Closing
//!
//! 1. **Customers** - join every customer task; every one of them leaves either
//!    served or turned away
//! 2. **Waiting room** - close it; idle barbers see the room drained
//! 3. **Barbers** - join every worker
//! 4. **Registry** - drop the last clients; the actor's channel closes and its
//!    run loop returns the [`ShopReport`](shop_registry::ShopReport)
//!
//! A barber failing while customers are still inside aborts the close with that
//! error instead of waiting for customers who will never be called.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber; see
//! [`shop_registry::tracing`] for the event fields.

pub mod shop_system;

pub use shop_registry::tracing::setup_tracing;
pub use shop_system::*;
