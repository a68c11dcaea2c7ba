//! # The Shop Aggregate
//!
//! [`Shop`] is the whole simulation state the registry audits: configured limits,
//! every customer's record, room occupancy, the running counts and the complaint
//! tally. It is plain synchronous data; the [`RegistryActor`](crate::RegistryActor)
//! owns it and feeds it one request at a time, which is what serializes the
//! transitions. Time is passed in by the caller so the transitions can be tested
//! on a fixed clock.
//!
//! ## Customer state machine
//!
//! ```text
//! PENDING --admit--> WAITING --start_service--> CUTTING --end_service--> DONE
//!    |
//!    +--reject--> REJECTED
//! ```
//!
//! Any other requested transition is refused with a [`Complaint`] and leaves the
//! state untouched.

use crate::complaint::{Complaint, Complaints};
use crate::error::RegistryError;
use crate::report::ShopReport;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::task;
use tokio::time::{Duration, Instant};

/// Sequential customer identifier, assigned at registration.
pub type CustomerId = usize;

/// Simulated cutting speed: one millimetre of hair every 5 ms.
pub const MILLIS_PER_MM: u64 = 5;

/// How long cutting `hair_length` down to `hair_goal` is supposed to take.
pub fn cutting_time(hair_length: u32, hair_goal: u32) -> Duration {
    Duration::from_millis(MILLIS_PER_MM * u64::from(hair_length.saturating_sub(hair_goal)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Pending,
    Waiting,
    Cutting,
    Done,
    Rejected,
}

impl CustomerStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, CustomerStatus::Done | CustomerStatus::Rejected)
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CustomerStatus::Pending => "PENDING",
            CustomerStatus::Waiting => "WAITING",
            CustomerStatus::Cutting => "CUTTING",
            CustomerStatus::Done => "DONE",
            CustomerStatus::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

/// Fixed dimensions of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopLimits {
    pub barbers: usize,
    pub chairs: usize,
    /// Total population expected for the day.
    pub visitors: usize,
}

/// Registration payload.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub hair_length: u32,
    pub hair_goal: u32,
    /// The customer's own task, used to catch customers serving themselves.
    pub task: Option<task::Id>,
}

/// The registry's view of one customer.
#[derive(Debug, Clone)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub name: String,
    pub hair_length: u32,
    pub hair_goal: u32,
    pub status: CustomerStatus,
    pub room: Option<usize>,
    pub arrived_at: Instant,
    pub service_started: Option<Instant>,
    pub task: Option<task::Id>,
}

impl CustomerRecord {
    fn is_own_task(&self, caller: Option<task::Id>) -> bool {
        matches!((self.task, caller), (Some(own), Some(caller)) if own == caller)
    }
}

/// Result of a requested transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The transition happened. `complaints` lists anything suspicious that was
    /// recorded alongside it (e.g. a cut that was too fast).
    Applied { complaints: Vec<Complaint> },
    /// The transition was illegal; nothing changed.
    Refused(Complaint),
}

impl Outcome {
    fn clean() -> Self {
        Outcome::Applied { complaints: Vec::new() }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }

    /// Every complaint this transition raised.
    pub fn complaints(&self) -> Vec<Complaint> {
        match self {
            Outcome::Applied { complaints } => complaints.clone(),
            Outcome::Refused(complaint) => vec![*complaint],
        }
    }
}

pub struct Shop {
    limits: ShopLimits,
    opened_at: Instant,
    customers: Vec<CustomerRecord>,
    occupancy: Vec<Option<CustomerId>>,
    num_pending: usize,
    num_waiting: usize,
    num_cutting: usize,
    complaints: Complaints,
}

impl Shop {
    pub fn new(limits: ShopLimits, opened_at: Instant) -> Self {
        Self {
            limits,
            opened_at,
            customers: Vec::with_capacity(limits.visitors),
            occupancy: vec![None; limits.barbers],
            num_pending: 0,
            num_waiting: 0,
            num_cutting: 0,
            complaints: Complaints::default(),
        }
    }

    pub fn limits(&self) -> ShopLimits {
        self.limits
    }

    pub fn since_open(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.opened_at)
    }

    pub fn customer(&self, id: CustomerId) -> Option<&CustomerRecord> {
        self.customers.get(id)
    }

    pub fn occupant(&self, room: usize) -> Option<CustomerId> {
        self.occupancy.get(room).copied().flatten()
    }

    pub fn num_pending(&self) -> usize {
        self.num_pending
    }

    pub fn num_waiting(&self) -> usize {
        self.num_waiting
    }

    pub fn num_cutting(&self) -> usize {
        self.num_cutting
    }

    pub fn complaints(&self) -> &Complaints {
        &self.complaints
    }

    pub fn register(&mut self, new: NewCustomer, now: Instant) -> Result<CustomerId, RegistryError> {
        if new.hair_goal == 0 || new.hair_length <= new.hair_goal {
            return Err(RegistryError::InvalidHair {
                length: new.hair_length,
                goal: new.hair_goal,
            });
        }
        if self.customers.len() >= self.limits.visitors {
            return Err(RegistryError::PopulationExceeded(self.limits.visitors));
        }

        let id = self.customers.len();
        self.customers.push(CustomerRecord {
            id,
            name: new.name,
            hair_length: new.hair_length,
            hair_goal: new.hair_goal,
            status: CustomerStatus::Pending,
            room: None,
            arrived_at: now,
            service_started: None,
            task: new.task,
        });
        self.num_pending += 1;
        Ok(id)
    }

    pub fn admit(&mut self, id: CustomerId) -> Result<Outcome, RegistryError> {
        let status = self.record(id)?.status;
        let outcome = match status {
            CustomerStatus::Pending => {
                let mut complaints = Vec::new();
                if self.num_waiting >= self.limits.chairs {
                    complaints.push(Complaint::AcceptFull);
                }
                self.set_status(id, CustomerStatus::Waiting);
                self.num_waiting += 1;
                self.num_pending -= 1;
                Outcome::Applied { complaints }
            }
            CustomerStatus::Waiting => Outcome::Refused(Complaint::AcceptWait),
            CustomerStatus::Cutting => Outcome::Refused(Complaint::AcceptCut),
            CustomerStatus::Done => Outcome::Refused(Complaint::AcceptDone),
            CustomerStatus::Rejected => Outcome::Refused(Complaint::AcceptReject),
        };
        Ok(self.tally(outcome))
    }

    pub fn reject(&mut self, id: CustomerId) -> Result<Outcome, RegistryError> {
        let status = self.record(id)?.status;
        let outcome = match status {
            CustomerStatus::Pending => {
                let mut complaints = Vec::new();
                if self.num_waiting < self.limits.chairs {
                    complaints.push(Complaint::RejectAvail);
                }
                self.set_status(id, CustomerStatus::Rejected);
                self.num_pending -= 1;
                Outcome::Applied { complaints }
            }
            CustomerStatus::Waiting => Outcome::Refused(Complaint::RejectWait),
            CustomerStatus::Cutting => Outcome::Refused(Complaint::RejectCut),
            CustomerStatus::Done => Outcome::Refused(Complaint::RejectDone),
            CustomerStatus::Rejected => Outcome::Refused(Complaint::RejectAgain),
        };
        Ok(self.tally(outcome))
    }

    pub fn start_service(
        &mut self,
        id: CustomerId,
        room: usize,
        caller: Option<task::Id>,
        now: Instant,
    ) -> Result<Outcome, RegistryError> {
        self.check_room(room)?;
        let record = self.record(id)?;
        let own_task = record.is_own_task(caller);
        let status = record.status;

        let occupant = self.occupancy[room];
        if matches!(occupant, Some(other) if other != id) {
            return Ok(self.tally(Outcome::Refused(Complaint::PrepareBusy)));
        }

        let outcome = match status {
            CustomerStatus::Pending => Outcome::Refused(Complaint::PreparePending),
            CustomerStatus::Waiting if occupant.is_some() => Outcome::Refused(Complaint::PrepareBusy),
            CustomerStatus::Waiting => {
                let mut complaints = Vec::new();
                if own_task {
                    complaints.push(Complaint::PrepareSelf);
                }
                self.occupancy[room] = Some(id);
                let record = &mut self.customers[id];
                record.status = CustomerStatus::Cutting;
                record.room = Some(room);
                record.service_started = Some(now);
                self.num_cutting += 1;
                self.num_waiting -= 1;
                Outcome::Applied { complaints }
            }
            CustomerStatus::Cutting => Outcome::Refused(Complaint::PrepareAgain),
            CustomerStatus::Done => Outcome::Refused(Complaint::PrepareDone),
            CustomerStatus::Rejected => Outcome::Refused(Complaint::PrepareReject),
        };
        Ok(self.tally(outcome))
    }

    pub fn end_service(
        &mut self,
        id: CustomerId,
        room: usize,
        caller: Option<task::Id>,
        now: Instant,
    ) -> Result<Outcome, RegistryError> {
        self.check_room(room)?;
        let record = self.record(id)?;
        let own_task = record.is_own_task(caller);
        let status = record.status;
        let expected = cutting_time(record.hair_length, record.hair_goal);
        let started = record.service_started;

        if self.occupancy[room] != Some(id) {
            return Ok(self.tally(Outcome::Refused(Complaint::DismissRoom)));
        }

        let outcome = match status {
            CustomerStatus::Pending => Outcome::Refused(Complaint::DismissPending),
            CustomerStatus::Waiting => Outcome::Refused(Complaint::DismissWait),
            CustomerStatus::Cutting => {
                let mut complaints = Vec::new();
                if own_task {
                    complaints.push(Complaint::DismissSelf);
                }
                let elapsed = started.map_or(Duration::ZERO, |t| now.saturating_duration_since(t));
                if elapsed < expected {
                    complaints.push(Complaint::CutFast);
                }
                if elapsed >= expected * 2 {
                    complaints.push(Complaint::CutSlow);
                }
                self.occupancy[room] = None;
                self.set_status(id, CustomerStatus::Done);
                self.num_cutting -= 1;
                Outcome::Applied { complaints }
            }
            CustomerStatus::Done => Outcome::Refused(Complaint::DismissDone),
            CustomerStatus::Rejected => Outcome::Refused(Complaint::DismissReject),
        };
        Ok(self.tally(outcome))
    }

    /// Audits a customer task that has finished. Leaving mid-cut is a complaint;
    /// nothing else changes.
    pub fn depart(&mut self, id: CustomerId) -> Result<Outcome, RegistryError> {
        let outcome = match self.record(id)?.status {
            CustomerStatus::Cutting => Outcome::Refused(Complaint::DismissEarly),
            _ => Outcome::clean(),
        };
        Ok(self.tally(outcome))
    }

    pub fn report(&self) -> ShopReport {
        let count = |status| self.customers.iter().filter(|c| c.status == status).count();
        ShopReport {
            limits: self.limits,
            arrived: self.customers.len(),
            served: count(CustomerStatus::Done),
            rejected: count(CustomerStatus::Rejected),
            pending: self.num_pending,
            waiting: self.num_waiting,
            cutting: self.num_cutting,
            complaints: self.complaints.clone(),
        }
    }

    fn record(&self, id: CustomerId) -> Result<&CustomerRecord, RegistryError> {
        self.customers.get(id).ok_or(RegistryError::UnknownCustomer(id))
    }

    fn check_room(&self, room: usize) -> Result<(), RegistryError> {
        if room < self.limits.barbers {
            Ok(())
        } else {
            Err(RegistryError::RoomOutOfRange {
                room,
                barbers: self.limits.barbers,
            })
        }
    }

    fn set_status(&mut self, id: CustomerId, status: CustomerStatus) {
        self.customers[id].status = status;
    }

    fn tally(&mut self, outcome: Outcome) -> Outcome {
        for complaint in outcome.complaints() {
            self.complaints.record(complaint);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop(barbers: usize, chairs: usize, visitors: usize) -> (Shop, Instant) {
        let now = Instant::now();
        let limits = ShopLimits {
            barbers,
            chairs,
            visitors,
        };
        (Shop::new(limits, now), now)
    }

    fn customer(name: &str, hair_length: u32, hair_goal: u32) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            hair_length,
            hair_goal,
            task: None,
        }
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let (mut shop, now) = shop(1, 1, 3);
        assert_eq!(shop.register(customer("Ada", 120, 60), now).unwrap(), 0);
        assert_eq!(shop.register(customer("Bo", 120, 60), now).unwrap(), 1);
        assert_eq!(shop.num_pending(), 2);
        assert_eq!(shop.customer(1).unwrap().status, CustomerStatus::Pending);
    }

    #[test]
    fn test_register_enforces_population_and_hair() {
        let (mut shop, now) = shop(1, 1, 1);
        assert_eq!(
            shop.register(customer("Ada", 60, 60), now),
            Err(RegistryError::InvalidHair { length: 60, goal: 60 })
        );
        shop.register(customer("Ada", 120, 60), now).unwrap();
        assert_eq!(
            shop.register(customer("Bo", 120, 60), now),
            Err(RegistryError::PopulationExceeded(1))
        );
    }

    #[test]
    fn test_full_happy_path() {
        let (mut shop, now) = shop(2, 2, 1);
        let id = shop.register(customer("Ada", 120, 100), now).unwrap();

        assert!(shop.admit(id).unwrap().is_applied());
        assert_eq!(shop.num_waiting(), 1);
        assert_eq!(shop.num_pending(), 0);

        assert!(shop.start_service(id, 1, None, now).unwrap().is_applied());
        assert_eq!(shop.occupant(1), Some(id));
        assert_eq!(shop.customer(id).unwrap().room, Some(1));
        assert_eq!(shop.num_cutting(), 1);
        assert_eq!(shop.num_waiting(), 0);

        let done_at = now + cutting_time(120, 100);
        assert_eq!(
            shop.end_service(id, 1, None, done_at).unwrap(),
            Outcome::Applied { complaints: vec![] }
        );
        assert_eq!(shop.occupant(1), None);
        assert_eq!(shop.customer(id).unwrap().status, CustomerStatus::Done);
        assert!(shop.complaints().is_empty());

        let report = shop.report();
        assert_eq!(report.served, 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_reject_from_pending_only() {
        let (mut shop, now) = shop(1, 1, 2);
        let waiting = shop.register(customer("Ada", 120, 60), now).unwrap();
        let turned = shop.register(customer("Bo", 120, 60), now).unwrap();
        shop.admit(waiting).unwrap();

        assert_eq!(shop.reject(turned).unwrap(), Outcome::Applied { complaints: vec![] });
        assert_eq!(shop.reject(turned).unwrap(), Outcome::Refused(Complaint::RejectAgain));
        assert_eq!(shop.reject(waiting).unwrap(), Outcome::Refused(Complaint::RejectWait));
        assert_eq!(shop.customer(waiting).unwrap().status, CustomerStatus::Waiting);
        assert_eq!(shop.complaints().total(), 2);
    }

    #[test]
    fn test_reject_with_free_seat_still_applies() {
        let (mut shop, now) = shop(1, 1, 1);
        let id = shop.register(customer("Ada", 120, 60), now).unwrap();
        assert_eq!(
            shop.reject(id).unwrap(),
            Outcome::Applied {
                complaints: vec![Complaint::RejectAvail]
            }
        );
        assert_eq!(shop.customer(id).unwrap().status, CustomerStatus::Rejected);
    }

    #[test]
    fn test_admit_beyond_capacity_is_recorded() {
        let (mut shop, now) = shop(1, 1, 2);
        let a = shop.register(customer("Ada", 120, 60), now).unwrap();
        let b = shop.register(customer("Bo", 120, 60), now).unwrap();
        shop.admit(a).unwrap();
        assert_eq!(
            shop.admit(b).unwrap(),
            Outcome::Applied {
                complaints: vec![Complaint::AcceptFull]
            }
        );
        assert_eq!(shop.num_waiting(), 2);
    }

    #[test]
    fn test_readmission_is_always_a_complaint() {
        let (mut shop, now) = shop(1, 2, 3);
        let waiting = shop.register(customer("Ada", 120, 60), now).unwrap();
        let rejected = shop.register(customer("Bo", 120, 60), now).unwrap();
        let cutting = shop.register(customer("Cy", 120, 60), now).unwrap();
        shop.admit(waiting).unwrap();
        shop.reject(rejected).unwrap();
        shop.admit(cutting).unwrap();
        shop.start_service(cutting, 0, None, now).unwrap();

        assert_eq!(shop.admit(waiting).unwrap(), Outcome::Refused(Complaint::AcceptWait));
        assert_eq!(shop.admit(rejected).unwrap(), Outcome::Refused(Complaint::AcceptReject));
        assert_eq!(shop.admit(cutting).unwrap(), Outcome::Refused(Complaint::AcceptCut));
        assert_eq!(shop.num_waiting(), 1);
    }

    #[test]
    fn test_start_service_requires_waiting_and_free_room() {
        let (mut shop, now) = shop(1, 2, 3);
        let pending = shop.register(customer("Ada", 120, 60), now).unwrap();
        let first = shop.register(customer("Bo", 120, 60), now).unwrap();
        let second = shop.register(customer("Cy", 120, 60), now).unwrap();
        shop.admit(first).unwrap();
        shop.admit(second).unwrap();

        assert_eq!(
            shop.start_service(pending, 0, None, now).unwrap(),
            Outcome::Refused(Complaint::PreparePending)
        );
        assert!(shop.start_service(first, 0, None, now).unwrap().is_applied());
        assert_eq!(
            shop.start_service(second, 0, None, now).unwrap(),
            Outcome::Refused(Complaint::PrepareBusy)
        );
        assert_eq!(
            shop.start_service(first, 0, None, now).unwrap(),
            Outcome::Refused(Complaint::PrepareAgain)
        );
        assert_eq!(shop.customer(second).unwrap().status, CustomerStatus::Waiting);
        assert_eq!(shop.num_cutting(), 1);
    }

    #[test]
    fn test_end_service_checks_room_first() {
        let (mut shop, now) = shop(2, 1, 2);
        let id = shop.register(customer("Ada", 120, 60), now).unwrap();
        let other = shop.register(customer("Bo", 120, 60), now).unwrap();
        shop.admit(id).unwrap();
        shop.start_service(id, 0, None, now).unwrap();

        let later = now + cutting_time(120, 60);
        assert_eq!(
            shop.end_service(id, 1, None, later).unwrap(),
            Outcome::Refused(Complaint::DismissRoom)
        );
        assert_eq!(
            shop.end_service(other, 0, None, later).unwrap(),
            Outcome::Refused(Complaint::DismissRoom)
        );
        assert_eq!(shop.customer(id).unwrap().status, CustomerStatus::Cutting);

        assert!(shop.end_service(id, 0, None, later).unwrap().is_applied());
        assert_eq!(
            shop.end_service(id, 0, None, later).unwrap(),
            Outcome::Refused(Complaint::DismissRoom)
        );
    }

    #[test]
    fn test_cut_timing_bounds() {
        let (mut shop, now) = shop(1, 3, 3);
        let expected = cutting_time(150, 50);
        assert_eq!(expected, Duration::from_millis(500));

        let fast = shop.register(customer("Ada", 150, 50), now).unwrap();
        shop.admit(fast).unwrap();
        shop.start_service(fast, 0, None, now).unwrap();
        let outcome = shop
            .end_service(fast, 0, None, now + expected - Duration::from_millis(1))
            .unwrap();
        assert_eq!(outcome.complaints(), vec![Complaint::CutFast]);

        let exact = shop.register(customer("Bo", 150, 50), now).unwrap();
        shop.admit(exact).unwrap();
        shop.start_service(exact, 0, None, now).unwrap();
        let outcome = shop.end_service(exact, 0, None, now + expected).unwrap();
        assert!(outcome.complaints().is_empty());

        let slow = shop.register(customer("Cy", 150, 50), now).unwrap();
        shop.admit(slow).unwrap();
        shop.start_service(slow, 0, None, now).unwrap();
        let outcome = shop.end_service(slow, 0, None, now + expected * 2).unwrap();
        assert_eq!(outcome.complaints(), vec![Complaint::CutSlow]);

        assert_eq!(shop.complaints().count(Complaint::CutFast), 1);
        assert_eq!(shop.complaints().count(Complaint::CutSlow), 1);
    }

    #[test]
    fn test_terminal_customers_refuse_service() {
        let (mut shop, now) = shop(1, 1, 2);
        let done = shop.register(customer("Ada", 120, 60), now).unwrap();
        let rejected = shop.register(customer("Bo", 120, 60), now).unwrap();
        shop.admit(done).unwrap();
        shop.start_service(done, 0, None, now).unwrap();
        shop.end_service(done, 0, None, now + cutting_time(120, 60)).unwrap();
        shop.reject(rejected).unwrap();

        assert_eq!(
            shop.start_service(done, 0, None, now).unwrap(),
            Outcome::Refused(Complaint::PrepareDone)
        );
        assert_eq!(
            shop.start_service(rejected, 0, None, now).unwrap(),
            Outcome::Refused(Complaint::PrepareReject)
        );
        assert_eq!(shop.reject(done).unwrap(), Outcome::Refused(Complaint::RejectDone));
        assert_eq!(shop.admit(done).unwrap(), Outcome::Refused(Complaint::AcceptDone));
    }

    #[test]
    fn test_depart_mid_cut_is_recorded() {
        let (mut shop, now) = shop(1, 1, 1);
        let id = shop.register(customer("Ada", 120, 60), now).unwrap();
        shop.admit(id).unwrap();
        shop.start_service(id, 0, None, now).unwrap();

        assert_eq!(shop.depart(id).unwrap(), Outcome::Refused(Complaint::DismissEarly));

        let report = shop.report();
        assert_eq!(report.cutting, 1);
        assert_eq!(report.total_complaints(), 2);
    }

    #[test]
    fn test_contract_violations_are_errors() {
        let (mut shop, now) = shop(1, 1, 1);
        assert_eq!(shop.admit(7), Err(RegistryError::UnknownCustomer(7)));
        let id = shop.register(customer("Ada", 120, 60), now).unwrap();
        assert_eq!(
            shop.start_service(id, 1, None, now),
            Err(RegistryError::RoomOutOfRange { room: 1, barbers: 1 })
        );
        assert!(shop.complaints().is_empty());
    }
}
