//! # Mock Registry & Testing Guide
//!
//! Seat allocators and barbers talk to the registry only through a
//! [`RegistryClient`]. These helpers hand out a real client whose other end is
//! controlled by the test, so protocol code can be exercised without running a
//! [`RegistryActor`](crate::RegistryActor).
//!
//! | | [`MockRegistry`] | [`create_mock_client`] | Real actor |
//! |---|---|---|---|
//! | **Answers** | Scripted, in order | Whatever the test sends, whenever it sends it | Computed |
//! | **Interleaving control** | None | Full: hold a response to keep the caller suspended | Scheduler |
//! | **Use case** | Call sequences | Atomicity / blocking behaviour | End-to-end audits |
//!
//! ```rust
//! use shop_registry::mock::MockRegistry;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockRegistry::new();
//!     mock.expect_admit(0).return_applied();
//!     mock.expect_reject(1).return_applied();
//!
//!     let client = mock.client();
//!     assert!(client.admit(0).await.unwrap().is_applied());
//!     assert!(client.reject(1).await.unwrap().is_applied());
//!     mock.verify();
//! }
//! ```
//!
//! An unexpected request panics the mock's background task; the caller then sees
//! [`RegistryError::ActorDropped`].

use crate::client::RegistryClient;
use crate::error::RegistryError;
use crate::message::{RegistryRequest, Response};
use crate::shop::{CustomerId, Outcome};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

#[derive(Debug)]
enum Expectation {
    Register {
        response: Result<CustomerId, RegistryError>,
    },
    Admit {
        id: CustomerId,
        response: Result<Outcome, RegistryError>,
    },
    Reject {
        id: CustomerId,
        response: Result<Outcome, RegistryError>,
    },
    StartService {
        id: CustomerId,
        room: usize,
        response: Result<Outcome, RegistryError>,
    },
    EndService {
        id: CustomerId,
        room: usize,
        response: Result<Outcome, RegistryError>,
    },
    Depart {
        id: CustomerId,
        response: Result<Outcome, RegistryError>,
    },
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

fn lock(expectations: &Expectations) -> MutexGuard<'_, VecDeque<Expectation>> {
    expectations.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A registry stand-in that answers requests from a queue of expectations.
pub struct MockRegistry {
    client: RegistryClient,
    expectations: Expectations,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRegistry {
    /// Creates a mock with no expectations. Must be called inside a runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<RegistryRequest>(100);
        let expectations: Expectations = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();
                match (request, expectation) {
                    (
                        RegistryRequest::Register { respond_to, .. },
                        Some(Expectation::Register { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        RegistryRequest::Admit { id, respond_to },
                        Some(Expectation::Admit { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        RegistryRequest::Reject { id, respond_to },
                        Some(Expectation::Reject { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        RegistryRequest::StartService {
                            id, room, respond_to, ..
                        },
                        Some(Expectation::StartService {
                            id: expected_id,
                            room: expected_room,
                            response,
                        }),
                    ) if (id, room) == (expected_id, expected_room) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        RegistryRequest::EndService {
                            id, room, respond_to, ..
                        },
                        Some(Expectation::EndService {
                            id: expected_id,
                            room: expected_room,
                            response,
                        }),
                    ) if (id, room) == (expected_id, expected_room) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        RegistryRequest::Depart { id, respond_to },
                        Some(Expectation::Depart { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        panic!("Unexpected registry request {request:?}, expected {expectation:?}");
                    }
                }
            }
        });

        Self {
            client: RegistryClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    pub fn client(&self) -> RegistryClient {
        self.client.clone()
    }

    pub fn expect_register(&self) -> RegisterExpectationBuilder {
        RegisterExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_admit(&self, id: CustomerId) -> OutcomeExpectationBuilder {
        self.outcome(move |response| Expectation::Admit { id, response })
    }

    pub fn expect_reject(&self, id: CustomerId) -> OutcomeExpectationBuilder {
        self.outcome(move |response| Expectation::Reject { id, response })
    }

    pub fn expect_start_service(&self, id: CustomerId, room: usize) -> OutcomeExpectationBuilder {
        self.outcome(move |response| Expectation::StartService { id, room, response })
    }

    pub fn expect_end_service(&self, id: CustomerId, room: usize) -> OutcomeExpectationBuilder {
        self.outcome(move |response| Expectation::EndService { id, room, response })
    }

    pub fn expect_depart(&self, id: CustomerId) -> OutcomeExpectationBuilder {
        self.outcome(move |response| Expectation::Depart { id, response })
    }

    /// Panics if any expectation is still queued.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn outcome(
        &self,
        make: impl FnOnce(Result<Outcome, RegistryError>) -> Expectation + Send + 'static,
    ) -> OutcomeExpectationBuilder {
        OutcomeExpectationBuilder {
            expectations: self.expectations.clone(),
            make: Box::new(make),
        }
    }
}

/// Builder for `register` expectations.
pub struct RegisterExpectationBuilder {
    expectations: Expectations,
}

impl RegisterExpectationBuilder {
    pub fn return_ok(self, id: CustomerId) {
        lock(&self.expectations).push_back(Expectation::Register { response: Ok(id) });
    }

    pub fn return_err(self, error: RegistryError) {
        lock(&self.expectations).push_back(Expectation::Register {
            response: Err(error),
        });
    }
}

/// Builder for expectations answered with an [`Outcome`].
pub struct OutcomeExpectationBuilder {
    expectations: Expectations,
    make: Box<dyn FnOnce(Result<Outcome, RegistryError>) -> Expectation + Send>,
}

impl OutcomeExpectationBuilder {
    pub fn return_ok(self, outcome: Outcome) {
        let expectation = (self.make)(Ok(outcome));
        lock(&self.expectations).push_back(expectation);
    }

    /// Answers with a clean `Applied` outcome.
    pub fn return_applied(self) {
        self.return_ok(Outcome::Applied {
            complaints: Vec::new(),
        });
    }

    pub fn return_err(self, error: RegistryError) {
        let expectation = (self.make)(Err(error));
        lock(&self.expectations).push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test answers each request itself through the returned responder, which
/// keeps the calling task suspended for as long as the test likes.
pub fn create_mock_client(buffer_size: usize) -> (RegistryClient, mpsc::Receiver<RegistryRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RegistryClient::new(sender), receiver)
}

/// Next request, if it is an `admit`.
pub async fn expect_admit(
    receiver: &mut mpsc::Receiver<RegistryRequest>,
) -> Option<(CustomerId, Response<Outcome>)> {
    match receiver.recv().await {
        Some(RegistryRequest::Admit { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a `reject`.
pub async fn expect_reject(
    receiver: &mut mpsc::Receiver<RegistryRequest>,
) -> Option<(CustomerId, Response<Outcome>)> {
    match receiver.recv().await {
        Some(RegistryRequest::Reject { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a `start_service`.
pub async fn expect_start_service(
    receiver: &mut mpsc::Receiver<RegistryRequest>,
) -> Option<(CustomerId, usize, Response<Outcome>)> {
    match receiver.recv().await {
        Some(RegistryRequest::StartService {
            id, room, respond_to, ..
        }) => Some((id, room, respond_to)),
        _ => None,
    }
}
