use shop_registry::{cutting_time, CustomerId};
use tokio::time::{Duration, Instant};

/// The immutable part of a customer, shared between its own task, the waiting
/// room and (weakly) the barber cutting its hair. Status lives in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub hair_length: u32,
    pub hair_goal: u32,
    pub arrived_at: Instant,
}

impl Customer {
    pub fn cutting_time(&self) -> Duration {
        cutting_time(self.hair_length, self.hair_goal)
    }
}
