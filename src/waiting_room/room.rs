use super::{Pickup, SeatAllocator, SeatDecision, Seats, Visit};
use crate::model::{Barber, Customer};
use async_trait::async_trait;
use shop_registry::{Outcome, RegistryClient, RegistryError};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::debug;

/// `chairs` seats in FIFO order, one room per barber.
pub struct WaitingRoom {
    chairs: usize,
    registry: RegistryClient,
    door: Arc<Mutex<Seats>>,
    queued: Semaphore,
    barbers: Mutex<Vec<Barber>>,
}

impl WaitingRoom {
    pub fn new(chairs: usize, barbers: usize, registry: RegistryClient) -> Self {
        Self {
            chairs,
            registry,
            door: Arc::new(Mutex::new(Seats {
                queue: VecDeque::with_capacity(chairs),
                open: true,
            })),
            queued: Semaphore::new(0),
            barbers: Mutex::new((0..barbers).map(Barber::new).collect()),
        }
    }

    /// Customers currently seated.
    pub async fn seated(&self) -> usize {
        self.door.lock().await.queue.len()
    }

    /// Snapshot of the barber working `room`.
    pub async fn barber(&self, room: usize) -> Option<Barber> {
        self.barbers.lock().await.get(room).cloned()
    }
}

#[async_trait]
impl SeatAllocator for WaitingRoom {
    async fn request_seat(&self, visit: Visit) -> Result<SeatDecision, RegistryError> {
        let id = visit.customer().id;
        let mut seats = self.door.lock().await;

        if !seats.open || seats.queue.len() >= self.chairs {
            self.registry.reject(id).await?;
            return Ok(SeatDecision::Rejected);
        }

        match self.registry.admit(id).await? {
            Outcome::Applied { .. } => {
                seats.queue.push_back(visit);
                self.queued.add_permits(1);
                debug!(id, seated = seats.queue.len(), chairs = self.chairs, "Seat taken");
                Ok(SeatDecision::Accepted)
            }
            Outcome::Refused(_) => Ok(SeatDecision::Rejected),
        }
    }

    async fn take_next(&self) -> Option<Pickup> {
        let permit = self.queued.acquire().await.ok()?;
        permit.forget();

        let mut seats = self.door.clone().lock_owned().await;
        let visit = seats.queue.pop_front()?;
        if !seats.open && seats.queue.is_empty() {
            self.queued.close();
        }
        Some(Pickup::locked(visit, seats))
    }

    async fn occupy(&self, room: usize, customer: &Arc<Customer>) {
        if let Some(barber) = self.barbers.lock().await.get_mut(room) {
            barber.occupy(customer);
        }
    }

    async fn release(&self, room: usize) {
        if let Some(barber) = self.barbers.lock().await.get_mut(room) {
            barber.release();
        }
    }

    async fn close(&self) {
        let mut seats = self.door.lock().await;
        seats.open = false;
        if seats.queue.is_empty() {
            self.queued.close();
        }
        debug!(seated = seats.queue.len(), "Waiting room closed");
    }
}
