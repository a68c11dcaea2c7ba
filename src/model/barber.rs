use super::customer::Customer;
use crate::names::barber_name;
use std::sync::{Arc, Weak};

/// A barber and the room they work in.
#[derive(Debug, Clone)]
pub struct Barber {
    pub room: usize,
    pub name: &'static str,
    customer: Weak<Customer>,
    busy: bool,
}

impl Barber {
    pub fn new(room: usize) -> Self {
        Self {
            room,
            name: barber_name(room),
            customer: Weak::new(),
            busy: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The customer in the chair, if still around.
    pub fn customer(&self) -> Option<Arc<Customer>> {
        self.customer.upgrade()
    }

    pub fn occupy(&mut self, customer: &Arc<Customer>) {
        self.customer = Arc::downgrade(customer);
        self.busy = true;
    }

    pub fn release(&mut self) {
        self.customer = Weak::new();
        self.busy = false;
    }
}
