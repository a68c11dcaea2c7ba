//! # Registry Messages
//!
//! The requests a [`RegistryClient`](crate::RegistryClient) sends to the
//! [`RegistryActor`](crate::RegistryActor).

use crate::error::RegistryError;
use crate::report::ShopReport;
use crate::shop::{CustomerId, CustomerStatus, NewCustomer, Outcome};
use tokio::sync::oneshot;
use tokio::task;

/// Type alias for the one-shot response channel used by the registry.
pub type Response<T> = oneshot::Sender<Result<T, RegistryError>>;

/// One variant per registry operation.
///
/// `caller` on the service transitions is the id of the task that issued the
/// request (if it runs inside a tokio task), so the registry can tell a barber
/// from a customer serving themselves.
#[derive(Debug)]
pub enum RegistryRequest {
    Register {
        customer: NewCustomer,
        respond_to: Response<CustomerId>,
    },
    Admit {
        id: CustomerId,
        respond_to: Response<Outcome>,
    },
    Reject {
        id: CustomerId,
        respond_to: Response<Outcome>,
    },
    StartService {
        id: CustomerId,
        room: usize,
        caller: Option<task::Id>,
        respond_to: Response<Outcome>,
    },
    EndService {
        id: CustomerId,
        room: usize,
        caller: Option<task::Id>,
        respond_to: Response<Outcome>,
    },
    Depart {
        id: CustomerId,
        respond_to: Response<Outcome>,
    },
    Status {
        id: CustomerId,
        respond_to: Response<Option<CustomerStatus>>,
    },
    Report {
        respond_to: Response<ShopReport>,
    },
}
