//! # Customer Actor
//!
//! One short-lived task per arriving customer. The task is spawned before its
//! customer is registered, so the registry can be told the task's id; the
//! customer record itself arrives over a oneshot once registration is done.

use crate::error::ShopError;
use crate::model::Customer;
use crate::waiting_room::{SeatAllocator, SeatDecision, Visit};
use shop_registry::RegistryClient;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info};

/// How a visit ended, from the customer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    /// Served in this room.
    Served(usize),
    TurnedAway,
    /// Seated, but the shop closed without calling them in.
    Stranded,
    /// Never registered.
    NoShow,
}

/// Runs one customer's visit. Every path that got registered ends with a
/// `depart` audit.
pub async fn visit(
    arrival: oneshot::Receiver<Arc<Customer>>,
    allocator: Arc<dyn SeatAllocator>,
    registry: RegistryClient,
) -> Result<VisitOutcome, ShopError> {
    let Ok(customer) = arrival.await else {
        return Ok(VisitOutcome::NoShow);
    };
    let id = customer.id;

    let (seat, ticket) = Visit::new(customer.clone());
    let outcome = match allocator.request_seat(seat).await? {
        SeatDecision::Rejected => {
            info!(id, customer = %customer.name, "Leaves without a haircut");
            VisitOutcome::TurnedAway
        }
        SeatDecision::Accepted => {
            debug!(id, customer = %customer.name, "Waiting to be called");
            match ticket.called_in().await {
                Some((room, dismissal)) => {
                    dismissal.wait().await;
                    debug!(id, room, customer = %customer.name, "Leaves with a haircut");
                    VisitOutcome::Served(room)
                }
                None => VisitOutcome::Stranded,
            }
        }
    };

    registry.depart(id).await?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waiting_room::WaitingRoom;
    use shop_registry::mock::MockRegistry;
    use tokio::time::Instant;

    fn customer(id: usize) -> Arc<Customer> {
        Arc::new(Customer {
            id,
            name: "Agnes".to_string(),
            hair_length: 120,
            hair_goal: 60,
            arrived_at: Instant::now(),
        })
    }

    #[tokio::test]
    async fn test_turned_away_customer_departs() {
        let mock = MockRegistry::new();
        mock.expect_admit(0).return_applied();
        mock.expect_reject(1).return_applied();
        mock.expect_depart(1).return_applied();
        let room = Arc::new(WaitingRoom::new(1, 1, mock.client()));
        room.request_seat(Visit::new(customer(0)).0).await.unwrap();

        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(visit(rx, room.clone(), mock.client()));
        tx.send(customer(1)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), VisitOutcome::TurnedAway);
        mock.verify();
    }

    #[tokio::test]
    async fn test_unregistered_customer_is_a_no_show() {
        let mock = MockRegistry::new();
        let room = Arc::new(WaitingRoom::new(1, 1, mock.client()));

        let (tx, rx) = oneshot::channel();
        drop(tx);
        let outcome = visit(rx, room, mock.client()).await.unwrap();
        assert_eq!(outcome, VisitOutcome::NoShow);
    }

    #[tokio::test]
    async fn test_served_customer_waits_for_dismissal() {
        let mock = MockRegistry::new();
        mock.expect_admit(0).return_applied();
        mock.expect_depart(0).return_applied();
        let room = Arc::new(WaitingRoom::new(1, 1, mock.client()));

        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(visit(rx, room.clone(), mock.client()));
        tx.send(customer(0)).unwrap();

        let pickup = room.take_next().await.unwrap();
        let chair = pickup.free_seat().call_in(0);
        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        chair.dismiss();
        assert_eq!(task.await.unwrap().unwrap(), VisitOutcome::Served(0));
        mock.verify();
    }
}
