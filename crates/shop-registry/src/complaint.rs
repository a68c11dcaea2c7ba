//! # Complaint Catalogue
//!
//! Every way a synchronization protocol can misuse the registry has a
//! [`Complaint`] category. The registry never refuses to keep running when it
//! sees one; it tallies it in [`Complaints`] and the final report lists them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A protocol-violation category, named after the operation that was misused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complaint {
    /// Rejected although a seat was free.
    RejectAvail,
    RejectWait,
    RejectCut,
    RejectDone,
    RejectAgain,
    /// Admitted although every seat was taken.
    AcceptFull,
    AcceptWait,
    AcceptCut,
    AcceptDone,
    AcceptReject,
    PreparePending,
    /// The room already holds somebody else.
    PrepareBusy,
    PrepareAgain,
    PrepareDone,
    PrepareReject,
    /// Service started from the customer's own task.
    PrepareSelf,
    DismissPending,
    DismissWait,
    DismissDone,
    DismissReject,
    /// The room does not hold this customer.
    DismissRoom,
    /// Service ended from the customer's own task.
    DismissSelf,
    /// The customer's task finished while still being cut.
    DismissEarly,
    CutFast,
    CutSlow,
}

impl Complaint {
    pub const ALL: [Complaint; 25] = [
        Complaint::RejectAvail,
        Complaint::RejectWait,
        Complaint::RejectCut,
        Complaint::RejectDone,
        Complaint::RejectAgain,
        Complaint::AcceptFull,
        Complaint::AcceptWait,
        Complaint::AcceptCut,
        Complaint::AcceptDone,
        Complaint::AcceptReject,
        Complaint::PreparePending,
        Complaint::PrepareBusy,
        Complaint::PrepareAgain,
        Complaint::PrepareDone,
        Complaint::PrepareReject,
        Complaint::PrepareSelf,
        Complaint::DismissPending,
        Complaint::DismissWait,
        Complaint::DismissDone,
        Complaint::DismissReject,
        Complaint::DismissRoom,
        Complaint::DismissSelf,
        Complaint::DismissEarly,
        Complaint::CutFast,
        Complaint::CutSlow,
    ];

    /// One report line for `count` occurrences of this complaint.
    pub fn describe(self, count: usize) -> String {
        let was = if count == 1 { "was" } else { "were" };
        match self {
            Complaint::RejectAvail => format!(
                "{count} {was} turned away while a seat stood empty (harmless if this is the only complaint)"
            ),
            Complaint::RejectWait => format!("{count} {was} turned away while already waiting for a barber"),
            Complaint::RejectCut => format!("{count} {was} turned away halfway through a haircut"),
            Complaint::RejectDone => format!("{count} {was} turned away after already getting a haircut"),
            Complaint::RejectAgain => format!("{count} {was} turned away more than once"),
            Complaint::AcceptFull => format!("{count} found no free chair and waited in the hallway"),
            Complaint::AcceptWait => format!("{count} {was} asked in while already sitting in the waiting room"),
            Complaint::AcceptCut => format!("{count} {was} asked in while already in the barber's chair"),
            Complaint::AcceptDone => format!("{count} {was} asked in after already getting a haircut"),
            Complaint::AcceptReject => format!("{count} {was} asked in after being turned away"),
            Complaint::PreparePending => format!("{count} got a haircut out on the street"),
            Complaint::PrepareBusy => format!("{count} {was} called to a barber who was busy with someone else"),
            Complaint::PrepareAgain => format!("{count} {was} called in while already being cut"),
            Complaint::PrepareDone => format!("{count} {was} called in after already getting a haircut"),
            Complaint::PrepareReject => format!("{count} {was} called in after being turned away"),
            Complaint::PrepareSelf => format!("{count} had to cut their own hair"),
            Complaint::DismissPending => format!("{count} {was} sent off with a haircut before entering the shop"),
            Complaint::DismissWait => format!("{count} {was} sent off with a haircut from the waiting room"),
            Complaint::DismissDone => format!("{count} {was} sent off more than once"),
            Complaint::DismissReject => format!("{count} {was} sent off with a haircut after being turned away"),
            Complaint::DismissRoom => {
                let s = if count == 1 { "" } else { "s" };
                format!("a barber dismissed somebody who was not in the room on {count} occasion{s}")
            }
            Complaint::DismissSelf => format!("{count} had to show themselves out"),
            Complaint::DismissEarly => format!("{count} walked out in the middle of a haircut"),
            Complaint::CutFast => format!("{count} {was} cut far too quickly"),
            Complaint::CutSlow => format!("{count} {was} cut too slowly (expected under heavy load)"),
        }
    }
}

impl fmt::Display for Complaint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Occurrence count per complaint category. Categories never seen are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Complaints(BTreeMap<Complaint, usize>);

impl Complaints {
    pub fn record(&mut self, complaint: Complaint) {
        *self.0.entry(complaint).or_insert(0) += 1;
    }

    pub fn count(&self, complaint: Complaint) -> usize {
        self.0.get(&complaint).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero categories in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (Complaint, usize)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n)).filter(|(_, n)| *n > 0)
    }
}
