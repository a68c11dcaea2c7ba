//! # Barber Pool
//!
//! One long-lived task per barber:
//!
//! ```text
//! IDLE --take_next--> SERVING --cut finished--> IDLE
//!   |
//!   +--room closed and drained--> stop
//! ```
//!
//! Serving a customer is: occupy the room, record the start of service (while the
//! pickup still holds the door), free the seat, call the customer in, cut, record
//! the end of service, release the room, dismiss the customer. A cut in progress
//! always completes.

use crate::error::ShopError;
use crate::names::barber_name;
use crate::waiting_room::SeatAllocator;
use shop_registry::RegistryClient;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// One barber's day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub room: usize,
    pub served: usize,
}

pub struct BarberPool {
    workers: JoinSet<Result<Shift, ShopError>>,
    finished: Vec<Shift>,
}

impl BarberPool {
    /// Starts `barbers` workers, one per room.
    pub fn spawn(barbers: usize, room: Arc<dyn SeatAllocator>, registry: RegistryClient) -> Self {
        let mut workers = JoinSet::new();
        for seat in 0..barbers {
            workers.spawn(work(seat, room.clone(), registry.clone()));
        }
        Self {
            workers,
            finished: Vec::with_capacity(barbers),
        }
    }

    /// Barbers still at work.
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Resolves with the first barber failure. Pending forever while every
    /// barber is healthy, so it can be raced against other work.
    pub async fn failure(&mut self) -> ShopError {
        while let Some(result) = self.workers.join_next().await {
            match result {
                Ok(Ok(shift)) => self.finished.push(shift),
                Ok(Err(e)) => return e,
                Err(e) => return ShopError::TaskFailed(e),
            }
        }
        std::future::pending().await
    }

    /// Waits for every barber to go home. Shifts come back ordered by room.
    pub async fn join(mut self) -> Result<Vec<Shift>, ShopError> {
        while let Some(result) = self.workers.join_next().await {
            self.finished.push(result??);
        }
        self.finished.sort_by_key(|shift| shift.room);
        Ok(self.finished)
    }
}

/// The worker loop of the barber in `room`.
pub async fn work(
    room: usize,
    allocator: Arc<dyn SeatAllocator>,
    registry: RegistryClient,
) -> Result<Shift, ShopError> {
    let barber = barber_name(room);
    debug!(barber, room, "Barber ready");

    let mut served = 0;
    while let Some(pickup) = allocator.take_next().await {
        let customer = pickup.customer().clone();

        allocator.occupy(room, &customer).await;
        registry.start_service(customer.id, room).await?;
        let chair = pickup.free_seat().call_in(room);

        debug!(barber, room, id = customer.id, customer = %customer.name, "Cutting");
        tokio::time::sleep(customer.cutting_time()).await;

        registry.end_service(customer.id, room).await?;
        allocator.release(room).await;
        chair.dismiss();
        served += 1;
    }

    info!(barber, room, served, "Barber went home");
    Ok(Shift { room, served })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Customer;
    use crate::waiting_room::{SeatDecision, Visit, WaitingRoom};
    use shop_registry::mock::MockRegistry;
    use shop_registry::RegistryError;
    use tokio::time::Instant;

    fn visit(id: usize, hair_length: u32) -> (Visit, crate::waiting_room::Ticket) {
        Visit::new(Arc::new(Customer {
            id,
            name: format!("Customer {id}"),
            hair_length,
            hair_goal: 50,
            arrived_at: Instant::now(),
        }))
    }

    #[tokio::test(start_paused = true)]
    async fn test_barber_serves_then_goes_home() {
        let mock = MockRegistry::new();
        mock.expect_admit(0).return_applied();
        mock.expect_start_service(0, 0).return_applied();
        mock.expect_end_service(0, 0).return_applied();
        let room = Arc::new(WaitingRoom::new(1, 1, mock.client()));

        let (seat, ticket) = visit(0, 70);
        assert_eq!(room.request_seat(seat).await.unwrap(), SeatDecision::Accepted);

        let pool = BarberPool::spawn(1, room.clone(), mock.client());
        assert_eq!(pool.len(), 1);

        let started = Instant::now();
        let (called_to, dismissal) = ticket.called_in().await.unwrap();
        assert_eq!(called_to, 0);
        assert!(dismissal.wait().await);
        assert!(started.elapsed() >= std::time::Duration::from_millis(100));
        assert!(!room.barber(0).await.unwrap().is_busy());

        room.close().await;
        assert_eq!(pool.join().await.unwrap(), vec![Shift { room: 0, served: 1 }]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_idle_barbers_go_home_on_close() {
        let mock = MockRegistry::new();
        let room = Arc::new(WaitingRoom::new(1, 3, mock.client()));
        let pool = BarberPool::spawn(3, room.clone(), mock.client());

        room.close().await;
        let shifts = pool.join().await.unwrap();
        let rooms: Vec<_> = shifts.iter().map(|shift| shift.room).collect();
        assert_eq!(rooms, vec![0, 1, 2]);
        assert!(shifts.iter().all(|shift| shift.served == 0));
    }

    #[tokio::test]
    async fn test_registry_failure_stops_the_barber() {
        let mock = MockRegistry::new();
        mock.expect_admit(0).return_applied();
        mock.expect_start_service(0, 0)
            .return_err(RegistryError::RoomOutOfRange { room: 0, barbers: 0 });
        let room = Arc::new(WaitingRoom::new(1, 1, mock.client()));
        room.request_seat(visit(0, 70).0).await.unwrap();

        let mut pool = BarberPool::spawn(1, room.clone(), mock.client());
        let failure = pool.failure().await;
        assert!(matches!(
            failure,
            ShopError::Registry(RegistryError::RoomOutOfRange { .. })
        ));
        assert!(pool.is_empty());
    }
}
