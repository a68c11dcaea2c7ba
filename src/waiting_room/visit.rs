//! The hand-off between a customer task and the barber who serves it.
//!
//! A [`Visit`] travels through the waiting room to a barber; the matching
//! [`Ticket`] stays with the customer, who waits on it to be called in and,
//! later, dismissed.

use crate::model::Customer;
use std::sync::Arc;
use tokio::sync::oneshot;

#[derive(Debug)]
pub struct Visit {
    customer: Arc<Customer>,
    called: oneshot::Sender<usize>,
    dismissed: oneshot::Sender<()>,
}

impl Visit {
    pub fn new(customer: Arc<Customer>) -> (Self, Ticket) {
        let (called, called_rx) = oneshot::channel();
        let (dismissed, dismissed_rx) = oneshot::channel();
        let visit = Self {
            customer,
            called,
            dismissed,
        };
        let ticket = Ticket {
            called: called_rx,
            dismissed: dismissed_rx,
        };
        (visit, ticket)
    }

    pub fn customer(&self) -> &Arc<Customer> {
        &self.customer
    }

    /// Tells the customer which room to walk into.
    pub fn call_in(self, room: usize) -> InChair {
        let _ = self.called.send(room);
        InChair {
            dismissed: self.dismissed,
        }
    }
}

/// A customer sitting in a barber's chair.
#[derive(Debug)]
pub struct InChair {
    dismissed: oneshot::Sender<()>,
}

impl InChair {
    pub fn dismiss(self) {
        let _ = self.dismissed.send(());
    }
}

/// The customer's side of a [`Visit`].
#[derive(Debug)]
pub struct Ticket {
    called: oneshot::Receiver<usize>,
    dismissed: oneshot::Receiver<()>,
}

impl Ticket {
    /// Waits to be called in. `None` if the visit was dropped instead.
    pub async fn called_in(self) -> Option<(usize, Dismissal)> {
        let room = self.called.await.ok()?;
        Some((room, Dismissal(self.dismissed)))
    }
}

#[derive(Debug)]
pub struct Dismissal(oneshot::Receiver<()>);

impl Dismissal {
    /// Waits for the barber to finish. `false` if the barber vanished.
    pub async fn wait(self) -> bool {
        self.0.await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn customer() -> Arc<Customer> {
        Arc::new(Customer {
            id: 0,
            name: "Agnes".to_string(),
            hair_length: 120,
            hair_goal: 60,
            arrived_at: Instant::now(),
        })
    }

    #[tokio::test]
    async fn test_call_in_then_dismiss() {
        let (visit, ticket) = Visit::new(customer());
        let waiting = tokio::spawn(async move {
            let (room, dismissal) = ticket.called_in().await?;
            Some((room, dismissal.wait().await))
        });

        let chair = visit.call_in(2);
        chair.dismiss();

        assert_eq!(waiting.await.unwrap(), Some((2, true)));
    }

    #[tokio::test]
    async fn test_dropped_visit_is_seen_by_the_customer() {
        let (visit, ticket) = Visit::new(customer());
        drop(visit);
        assert!(ticket.called_in().await.is_none());

        let (visit, ticket) = Visit::new(customer());
        drop(visit.call_in(0));
        let (_, dismissal) = ticket.called_in().await.unwrap();
        assert!(!dismissal.wait().await);
    }
}
