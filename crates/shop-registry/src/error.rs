//! # Registry Errors
//!
//! Errors returned by the registry itself. Protocol violations are *not* errors:
//! they are recorded as [`Complaint`](crate::Complaint)s and execution continues.
//! Everything in here means the caller broke the registry's own contract (or the
//! actor is gone), and callers treat it as fatal.

use crate::shop::CustomerId;

/// Errors that can occur when talking to the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Registry actor closed")]
    ActorClosed,
    #[error("Registry actor dropped response channel")]
    ActorDropped,
    #[error("Unknown customer: {0}")]
    UnknownCustomer(CustomerId),
    #[error("Room {room} out of range (shop has {barbers} barbers)")]
    RoomOutOfRange { room: usize, barbers: usize },
    #[error("Population exceeded: all {0} visitors already registered")]
    PopulationExceeded(usize),
    #[error("Invalid hair: length {length} must exceed goal {goal} > 0")]
    InvalidHair { length: u32, goal: u32 },
}
