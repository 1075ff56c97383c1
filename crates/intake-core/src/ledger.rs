//! The intake ledger: durable append-only records plus change notification.

use std::path::Path;

use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::observer::{ChangeObserver, FnObserver, Observers, RecordSource, SubscriptionId};
use crate::storage::{IntakeRecord, IntakeStore, LedgerMetadata, NewRecord, SqliteStore};

/// Durable, time-ordered store of intake records with subscribers.
///
/// The ledger is constructed explicitly and handed to whoever needs it.
/// It is single-threaded: observers run inline on the thread calling
/// [`IntakeLedger::add`].
pub struct IntakeLedger<S: IntakeStore = SqliteStore> {
    store: S,
    observers: Observers,
}

impl IntakeLedger<SqliteStore> {
    /// Create a new ledger file at `path`.
    ///
    /// Returns the device ID written to the ledger's metadata. Open the
    /// ledger with [`IntakeLedger::open`] to use it.
    pub fn create(path: &Path) -> Result<Uuid> {
        SqliteStore::create(path)
    }

    /// Open an existing ledger file.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(SqliteStore::open(path)?))
    }

    /// A ledger that lives only in memory.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(SqliteStore::open_in_memory()?))
    }
}

impl<S: IntakeStore> IntakeLedger<S> {
    /// Wrap a store. The ledger starts with no subscribers.
    pub fn new(store: S) -> Self {
        Self {
            store,
            observers: Observers::new(),
        }
    }

    /// Log `calories` now.
    ///
    /// Every current subscriber is notified exactly once, after the record
    /// is durable. Nothing is published if the write fails.
    pub fn add(&mut self, calories: i64) -> Result<IntakeRecord> {
        self.add_record(&NewRecord::new(calories))
    }

    /// Append a prepared record and notify subscribers.
    pub fn add_record(&mut self, record: &NewRecord) -> Result<IntakeRecord> {
        let stored = self.store.append(record)?;

        debug!(subscribers = self.observers.len(), "publishing ledger change");
        self.observers.notify(&StoreView(&self.store));

        Ok(stored)
    }

    /// Register a closure to run after every add.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&dyn RecordSource) + 'static,
    {
        self.subscribe_observer(FnObserver(handler))
    }

    /// Register an observer to run after every add.
    pub fn subscribe_observer<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: ChangeObserver + 'static,
    {
        self.observers.insert(Box::new(observer))
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    /// Number of current subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    pub fn len(&self) -> Result<usize> {
        self.store.record_count()
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn metadata(&self) -> Result<LedgerMetadata> {
        self.store.metadata()
    }

    pub fn check_integrity(&self) -> Result<()> {
        self.store.check_integrity()
    }

    /// Write a consistent copy of the ledger to `destination`.
    pub fn backup_to(&self, destination: &Path) -> Result<()> {
        self.store.backup_to(destination)
    }
}

impl<S: IntakeStore> RecordSource for IntakeLedger<S> {
    fn all_records_ascending(&self) -> Result<Vec<IntakeRecord>> {
        self.store.records_ascending()
    }
}

/// Read-only view handed to observers. It borrows only the store, so the
/// subscriber list stays in place while observers run.
struct StoreView<'a, S>(&'a S);

impl<S: IntakeStore> RecordSource for StoreView<'_, S> {
    fn all_records_ascending(&self) -> Result<Vec<IntakeRecord>> {
        self.0.records_ascending()
    }
}
