//! # Waiting Room
//!
//! The bounded seat allocator between arriving customers and the barbers.
//!
//! ## Protocol
//!
//! The room has a door lock (a `tokio::sync::Mutex` around the seat queue) and a
//! counting semaphore holding one permit per seated customer.
//!
//! - **Arrival** ([`SeatAllocator::request_seat`]): under the door lock, the
//!   customer is either admitted (registry `admit`, enqueued, one permit added) or
//!   turned away (registry `reject`). The decision is immediate.
//! - **Pickup** ([`SeatAllocator::take_next`]): an idle barber takes a permit,
//!   then the door lock, and dequeues the customer at the front. The returned
//!   [`Pickup`] keeps the door locked until the barber has told the registry that
//!   service started and calls [`Pickup::free_seat`].
//! - **Closing** ([`SeatAllocator::close`]): no more arrivals. Seated customers
//!   are still served; once the queue drains the semaphore closes and idle
//!   barbers get `None`.
//!
//! Holding the door across `start_service` means that whenever the door is
//! unlocked, the registry's count of waiting customers equals the queue length.
//! Arrivals therefore never see a seat the registry still considers taken, and
//! never get turned away from one the registry considers free.

mod room;
mod visit;

pub use room::WaitingRoom;
pub use visit::{Dismissal, InChair, Ticket, Visit};

use crate::model::Customer;
use async_trait::async_trait;
use shop_registry::RegistryError;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatDecision {
    Accepted,
    Rejected,
}

/// A seat allocation protocol. [`WaitingRoom`] is the correct one; others can be
/// plugged into the same shop and audited by the same registry.
#[async_trait]
pub trait SeatAllocator: Send + Sync {
    /// Seats the customer or turns them away, without waiting for a seat.
    async fn request_seat(&self, visit: Visit) -> Result<SeatDecision, RegistryError>;

    /// Waits for a seated customer. `None` once closed and drained.
    async fn take_next(&self) -> Option<Pickup>;

    /// Marks `room` busy with `customer`.
    async fn occupy(&self, room: usize, customer: &Arc<Customer>);

    /// Marks `room` idle.
    async fn release(&self, room: usize);

    /// Stops admitting customers.
    async fn close(&self);
}

struct Seats {
    queue: VecDeque<Visit>,
    open: bool,
}

/// A customer taken off the queue whose seat is still held.
pub struct Pickup {
    visit: Visit,
    door: Option<OwnedMutexGuard<Seats>>,
}

impl Pickup {
    /// A pickup that holds no lock, for allocators without a door.
    pub fn unlocked(visit: Visit) -> Self {
        Self { visit, door: None }
    }

    fn locked(visit: Visit, door: OwnedMutexGuard<Seats>) -> Self {
        Self {
            visit,
            door: Some(door),
        }
    }

    pub fn customer(&self) -> &Arc<Customer> {
        self.visit.customer()
    }

    /// Gives the seat back and unlocks the door.
    pub fn free_seat(self) -> Visit {
        let Pickup { visit, door } = self;
        drop(door);
        visit
    }
}
