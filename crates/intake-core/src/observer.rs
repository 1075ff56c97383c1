//! Change notification for the ledger.
//!
//! Observers are told *that* the ledger changed, never *what* changed; they
//! re-query through the [`RecordSource`] they are handed. Delivery is
//! synchronous and happens after the write has committed.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::storage::IntakeRecord;

/// Read access to the ledger's current contents.
pub trait RecordSource {
    /// All records, oldest first. A fresh snapshot on every call.
    fn all_records_ascending(&self) -> Result<Vec<IntakeRecord>>;
}

/// Receives ledger-changed notifications.
pub trait ChangeObserver {
    /// Called once per successful add, after the record is durable.
    fn on_ledger_changed(&mut self, ledger: &dyn RecordSource);
}

/// Shared observers stay readable by their owner while the ledger holds a
/// handle to them.
impl<O: ChangeObserver> ChangeObserver for Rc<RefCell<O>> {
    fn on_ledger_changed(&mut self, ledger: &dyn RecordSource) {
        self.borrow_mut().on_ledger_changed(ledger);
    }
}

/// Adapter turning a closure into an observer.
pub struct FnObserver<F>(pub F);

impl<F> ChangeObserver for FnObserver<F>
where
    F: FnMut(&dyn RecordSource),
{
    fn on_ledger_changed(&mut self, ledger: &dyn RecordSource) {
        (self.0)(ledger)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Subscriber list owned by a ledger.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn ChangeObserver>)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, observer: Box<dyn ChangeObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver one notification to every observer, in subscription order.
    pub fn notify(&mut self, ledger: &dyn RecordSource) {
        for (_, observer) in self.entries.iter_mut() {
            observer.on_ledger_changed(ledger);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("next_id", &self.next_id)
            .field("len", &self.entries.len())
            .finish()
    }
}
