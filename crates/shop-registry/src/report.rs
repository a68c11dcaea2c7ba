//! # Closing Report
//!
//! The snapshot the registry hands back when it shuts down.

use crate::complaint::Complaints;
use crate::shop::ShopLimits;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopReport {
    pub limits: ShopLimits,
    pub arrived: usize,
    pub served: usize,
    pub rejected: usize,
    /// Never greeted.
    pub pending: usize,
    /// Still in the waiting room at closing time.
    pub waiting: usize,
    /// Still in a barber's chair at closing time.
    pub cutting: usize,
    pub complaints: Complaints,
}

impl ShopReport {
    pub fn stranded(&self) -> usize {
        self.pending + self.waiting + self.cutting
    }

    /// Recorded complaints plus one per stranded customer.
    pub fn total_complaints(&self) -> usize {
        self.complaints.total() + self.stranded()
    }

    /// `true` when the run certifies the protocol.
    pub fn is_clean(&self) -> bool {
        self.total_complaints() == 0
    }
}

impl fmt::Display for ShopReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Closing time: {} visitors served, {} turned away ({} barbers, {} chairs)",
            self.served, self.rejected, self.limits.barbers, self.limits.chairs
        )?;

        for (complaint, count) in self.complaints.iter() {
            writeln!(f, "  {}", complaint.describe(count))?;
        }
        if self.pending > 0 {
            writeln!(f, "  {} never got a greeting", self.pending)?;
        }
        if self.waiting + self.cutting > 0 {
            writeln!(f, "  {} got locked inside overnight", self.waiting + self.cutting)?;
        }

        match self.total_complaints() {
            0 => write!(f, "No complaints. Well done!"),
            1 => write!(f, "1 complaint."),
            n => write!(f, "{n} complaints."),
        }
    }
}
