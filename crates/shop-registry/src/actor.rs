//! # Registry Actor
//!
//! The `RegistryActor` is the server half of the registry. It owns the [`Shop`]
//! aggregate and the receiver end of the channel, and processes requests one at a
//! time. That sequential loop is the shop-wide lock: every transition together
//! with its counters and complaint tallies happens inside a single message.
//!
//! # Usage Pattern
//!
//! 1. **Create**: `RegistryActor::new()` returns the actor and its client.
//! 2. **Run**: spawn `actor.run()`; hand clones of the client to every task.
//! 3. **Close**: drop every client. `run` then returns the final [`ShopReport`].
//!
//! ```rust
//! use shop_registry::{NewCustomer, RegistryActor, ShopLimits};
//!
//! #[tokio::main]
//! async fn main() {
//!     let limits = ShopLimits { barbers: 1, chairs: 1, visitors: 1 };
//!     let (actor, client) = RegistryActor::new(limits, 16);
//!     let registry = tokio::spawn(actor.run());
//!
//!     let customer = NewCustomer {
//!         name: "Ada".to_string(),
//!         hair_length: 120,
//!         hair_goal: 60,
//!         task: None,
//!     };
//!     let id = client.register(customer).await.unwrap();
//!     client.reject(id).await.unwrap();
//!     drop(client);
//!
//!     let report = registry.await.unwrap();
//!     assert_eq!(report.rejected, 1);
//! }
//! ```

use crate::client::RegistryClient;
use crate::error::RegistryError;
use crate::message::RegistryRequest;
use crate::report::ShopReport;
use crate::shop::{CustomerId, Outcome, Shop, ShopLimits};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub struct RegistryActor {
    receiver: mpsc::Receiver<RegistryRequest>,
    shop: Shop,
}

impl RegistryActor {
    /// Creates the actor and its client. The shop's clock starts now.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full,
    /// client calls wait for space.
    pub fn new(limits: ShopLimits, buffer_size: usize) -> (Self, RegistryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            shop: Shop::new(limits, Instant::now()),
        };
        (actor, RegistryClient::new(sender))
    }

    /// Runs the event loop until every client is dropped, then returns the
    /// closing report.
    pub async fn run(mut self) -> ShopReport {
        let limits = self.shop.limits();
        info!(
            barbers = limits.barbers,
            chairs = limits.chairs,
            visitors = limits.visitors,
            "Registry started"
        );

        while let Some(msg) = self.receiver.recv().await {
            let now = Instant::now();
            match msg {
                RegistryRequest::Register {
                    customer,
                    respond_to,
                } => {
                    debug!(?customer, "Register");
                    let name = customer.name.clone();
                    let (length, goal) = (customer.hair_length, customer.hair_goal);
                    let result = self.shop.register(customer, now);
                    match &result {
                        Ok(id) => info!(
                            at = self.at(now),
                            id,
                            customer = %name,
                            hair = length,
                            goal,
                            "Customer arrived"
                        ),
                        Err(e) => warn!(customer = %name, error = %e, "Register failed"),
                    }
                    let _ = respond_to.send(result);
                }
                RegistryRequest::Admit { id, respond_to } => {
                    let result = self.shop.admit(id);
                    self.audit("Customer seated", id, None, now, &result);
                    let _ = respond_to.send(result);
                }
                RegistryRequest::Reject { id, respond_to } => {
                    let result = self.shop.reject(id);
                    self.audit("Customer turned away", id, None, now, &result);
                    let _ = respond_to.send(result);
                }
                RegistryRequest::StartService {
                    id,
                    room,
                    caller,
                    respond_to,
                } => {
                    let result = self.shop.start_service(id, room, caller, now);
                    self.audit("Service started", id, Some(room), now, &result);
                    let _ = respond_to.send(result);
                }
                RegistryRequest::EndService {
                    id,
                    room,
                    caller,
                    respond_to,
                } => {
                    let result = self.shop.end_service(id, room, caller, now);
                    self.audit("Service finished", id, Some(room), now, &result);
                    let _ = respond_to.send(result);
                }
                RegistryRequest::Depart { id, respond_to } => {
                    let result = self.shop.depart(id);
                    match &result {
                        Ok(Outcome::Applied { .. }) => debug!(at = self.at(now), id, "Customer left"),
                        _ => self.audit("Customer left", id, None, now, &result),
                    }
                    let _ = respond_to.send(result);
                }
                RegistryRequest::Status { id, respond_to } => {
                    let status = self.shop.customer(id).map(|c| c.status);
                    debug!(id, ?status, "Status");
                    let _ = respond_to.send(Ok(status));
                }
                RegistryRequest::Report { respond_to } => {
                    let _ = respond_to.send(Ok(self.shop.report()));
                }
            }
        }

        let report = self.shop.report();
        info!(
            served = report.served,
            rejected = report.rejected,
            complaints = report.total_complaints(),
            "Registry stopped"
        );
        report
    }

    fn at(&self, now: Instant) -> f64 {
        self.shop.since_open(now).as_secs_f64()
    }

    fn audit(
        &self,
        event: &str,
        id: CustomerId,
        room: Option<usize>,
        now: Instant,
        result: &Result<Outcome, RegistryError>,
    ) {
        let at = self.at(now);
        let customer = self.shop.customer(id).map_or("?", |c| c.name.as_str());
        match result {
            Ok(Outcome::Applied { complaints }) => {
                info!(at, id, customer, room, "{}", event);
                for complaint in complaints {
                    warn!(at, id, customer, room, %complaint, "Complaint");
                }
            }
            Ok(Outcome::Refused(complaint)) => {
                warn!(at, id, customer, room, %complaint, "{} refused", event);
            }
            Err(e) => warn!(id, room, error = %e, "{} failed", event),
        }
    }
}
