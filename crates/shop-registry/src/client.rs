//! # Registry Client
//!
//! Cheap to clone; holds only the sender half of the registry channel.

use crate::error::RegistryError;
use crate::message::RegistryRequest;
use crate::report::ShopReport;
use crate::shop::{CustomerId, CustomerStatus, NewCustomer, Outcome};
use tokio::sync::{mpsc, oneshot};
use tokio::task;

/// Async handle to a [`RegistryActor`](crate::RegistryActor).
///
/// Every method resolves once the actor has applied (or refused) the request.
/// `start_service` and `end_service` tag the request with the calling task's id.
#[derive(Clone)]
pub struct RegistryClient {
    sender: mpsc::Sender<RegistryRequest>,
}

impl RegistryClient {
    pub fn new(sender: mpsc::Sender<RegistryRequest>) -> Self {
        Self { sender }
    }

    pub async fn register(&self, customer: NewCustomer) -> Result<CustomerId, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Register {
                customer,
                respond_to,
            })
            .await
            .map_err(|_| RegistryError::ActorClosed)?;
        response.await.map_err(|_| RegistryError::ActorDropped)?
    }

    pub async fn admit(&self, id: CustomerId) -> Result<Outcome, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Admit { id, respond_to })
            .await
            .map_err(|_| RegistryError::ActorClosed)?;
        response.await.map_err(|_| RegistryError::ActorDropped)?
    }

    pub async fn reject(&self, id: CustomerId) -> Result<Outcome, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Reject { id, respond_to })
            .await
            .map_err(|_| RegistryError::ActorClosed)?;
        response.await.map_err(|_| RegistryError::ActorDropped)?
    }

    pub async fn start_service(&self, id: CustomerId, room: usize) -> Result<Outcome, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::StartService {
                id,
                room,
                caller: task::try_id(),
                respond_to,
            })
            .await
            .map_err(|_| RegistryError::ActorClosed)?;
        response.await.map_err(|_| RegistryError::ActorDropped)?
    }

    pub async fn end_service(&self, id: CustomerId, room: usize) -> Result<Outcome, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::EndService {
                id,
                room,
                caller: task::try_id(),
                respond_to,
            })
            .await
            .map_err(|_| RegistryError::ActorClosed)?;
        response.await.map_err(|_| RegistryError::ActorDropped)?
    }

    /// Reports that a customer's task is finishing.
    pub async fn depart(&self, id: CustomerId) -> Result<Outcome, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Depart { id, respond_to })
            .await
            .map_err(|_| RegistryError::ActorClosed)?;
        response.await.map_err(|_| RegistryError::ActorDropped)?
    }

    pub async fn status(&self, id: CustomerId) -> Result<Option<CustomerStatus>, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Status { id, respond_to })
            .await
            .map_err(|_| RegistryError::ActorClosed)?;
        response.await.map_err(|_| RegistryError::ActorDropped)?
    }

    /// Snapshot of the running totals.
    pub async fn report(&self) -> Result<ShopReport, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Report { respond_to })
            .await
            .map_err(|_| RegistryError::ActorClosed)?;
        response.await.map_err(|_| RegistryError::ActorDropped)?
    }
}
