//! Chart projection: the ledger as a plottable series.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::ledger::IntakeLedger;
use crate::observer::{ChangeObserver, RecordSource, SubscriptionId};
use crate::storage::{IntakeRecord, IntakeStore};

/// A projection shared between the ledger's subscriber list and its reader.
pub type SharedProjection = Rc<RefCell<ChartProjection>>;

/// Calorie values in chronological order, rebuilt in full on every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartProjection {
    series: Vec<f64>,
    rebuilds: u64,
}

impl ChartProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map records to plot values, preserving order.
    pub fn project(records: &[IntakeRecord]) -> Vec<f64> {
        records.iter().map(|r| r.calories as f64).collect()
    }

    /// Discard the current series and derive a new one from `source`.
    ///
    /// A failed query yields an empty series rather than an error.
    pub fn rebuild(&mut self, source: &dyn RecordSource) -> &[f64] {
        self.series = match source.all_records_ascending() {
            Ok(records) => Self::project(&records),
            Err(err) => {
                warn!(error = %err, "chart rebuild could not read the ledger");
                Vec::new()
            }
        };
        self.rebuilds += 1;
        &self.series
    }

    /// Build a projection of `ledger` and subscribe it to future changes.
    pub fn attach<S: IntakeStore>(
        ledger: &mut IntakeLedger<S>,
    ) -> (SharedProjection, SubscriptionId) {
        let mut projection = Self::new();
        projection.rebuild(&*ledger);
        let shared = Rc::new(RefCell::new(projection));
        let id = ledger.subscribe_observer(Rc::clone(&shared));
        (shared, id)
    }

    /// The most recent series.
    pub fn series(&self) -> &[f64] {
        &self.series
    }

    /// How many times the series has been rebuilt.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Smallest and largest value, or `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let mut values = self.series.iter().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

impl ChangeObserver for ChartProjection {
    fn on_ledger_changed(&mut self, ledger: &dyn RecordSource) {
        self.rebuild(ledger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IntakeError, Result};

    struct FailingSource;

    impl RecordSource for FailingSource {
        fn all_records_ascending(&self) -> Result<Vec<IntakeRecord>> {
            Err(IntakeError::Storage("database is locked".to_string()))
        }
    }

    #[test]
    fn test_rebuild_on_empty_ledger_is_empty() {
        let ledger = IntakeLedger::open_in_memory().unwrap();
        let mut projection = ChartProjection::new();

        assert!(projection.rebuild(&ledger).is_empty());
        assert_eq!(projection.bounds(), None);
    }

    #[test]
    fn test_rebuild_maps_calories_in_order() {
        let mut ledger = IntakeLedger::open_in_memory().unwrap();
        for calories in [500, 300, 700] {
            ledger.add(calories).unwrap();
        }

        let mut projection = ChartProjection::new();
        assert_eq!(projection.rebuild(&ledger), &[500.0, 300.0, 700.0]);
        assert_eq!(projection.bounds(), Some((300.0, 700.0)));
    }

    #[test]
    fn test_attached_projection_tracks_every_add() {
        let mut ledger = IntakeLedger::open_in_memory().unwrap();
        ledger.add(120).unwrap();

        let (projection, _id) = ChartProjection::attach(&mut ledger);
        assert_eq!(projection.borrow().series(), &[120.0]);

        ledger.add(80).unwrap();
        ledger.add(0).unwrap();

        let projection = projection.borrow();
        assert_eq!(projection.series(), &[120.0, 80.0, 0.0]);
        assert_eq!(
            projection.series().len(),
            ledger.all_records_ascending().unwrap().len()
        );
        assert_eq!(projection.rebuilds(), 3);
    }

    #[test]
    fn test_detached_projection_goes_stale() {
        let mut ledger = IntakeLedger::open_in_memory().unwrap();
        let (projection, id) = ChartProjection::attach(&mut ledger);
        ledger.add(10).unwrap();
        assert!(ledger.unsubscribe(id));
        ledger.add(20).unwrap();

        assert_eq!(projection.borrow().series(), &[10.0]);
    }

    #[test]
    fn test_failed_query_clears_series() {
        let mut ledger = IntakeLedger::open_in_memory().unwrap();
        ledger.add(900).unwrap();

        let mut projection = ChartProjection::new();
        projection.rebuild(&ledger);
        assert_eq!(projection.series(), &[900.0]);

        assert!(projection.rebuild(&FailingSource).is_empty());
    }
}
