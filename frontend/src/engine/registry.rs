//! Ordered list of upload records, newest first.
//!
//! Every mutation goes through [`UploadRegistry::apply`], which merges a
//! partial [`UploadPatch`] onto one record and refuses anything that would
//! move a record backwards in its lifecycle.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{UploadId, UploadPatch, UploadRecord, UploadStatus};

/// What happened to a patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// At least one field was written.
    Applied,
    /// No record with that id (removed by the user, or never existed).
    Missing,
    /// Record exists but the patch was refused or changed nothing.
    Stale,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UploadRegistry<F> {
    records: Vec<UploadRecord<F>>,
}

impl<F> Default for UploadRegistry<F> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<F> UploadRegistry<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-filled with records from an earlier session, kept as given.
    pub fn seeded(records: Vec<UploadRecord<F>>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[UploadRecord<F>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &UploadId) -> Option<&UploadRecord<F>> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &UploadId) -> bool {
        self.get(id).is_some()
    }

    /// Insert at the front; the newest attempt is always first.
    pub fn prepend(&mut self, record: UploadRecord<F>) {
        self.records.insert(0, record);
    }

    pub fn remove(&mut self, id: &UploadId) -> Option<UploadRecord<F>> {
        let pos = self.records.iter().position(|r| &r.id == id)?;
        Some(self.records.remove(pos))
    }

    /// Merge `patch` onto the record with `id`.
    ///
    /// Rules:
    /// - a terminal record accepts nothing
    /// - status never moves to a lower rank
    /// - percent is only written while loading, never lowered, never above 100
    /// - response and error are written once, and only with the matching
    ///   terminal status
    pub fn apply(&mut self, id: &UploadId, patch: UploadPatch) -> ApplyOutcome {
        let Some(record) = self.records.iter_mut().find(|r| &r.id == id) else {
            return ApplyOutcome::Missing;
        };

        if record.status.is_terminal() {
            return ApplyOutcome::Stale;
        }

        let mut changed = false;

        if let Some(status) = patch.status {
            if status.rank() < record.status.rank() {
                return ApplyOutcome::Stale;
            }
            if status != record.status {
                record.status = status;
                changed = true;
            }
        }

        if let Some(percent) = patch.percent {
            if record.status == UploadStatus::Loading
                && percent <= 100
                && percent > record.percent
            {
                record.percent = percent;
                changed = true;
            }
        }

        match record.status {
            UploadStatus::Success => {
                if let Some(response) = patch.response {
                    record.response = Some(response);
                    changed = true;
                }
            }
            UploadStatus::Fail => {
                if let Some(error) = patch.error {
                    record.error = Some(error);
                    changed = true;
                }
            }
            _ => {}
        }

        if changed {
            ApplyOutcome::Applied
        } else {
            ApplyOutcome::Stale
        }
    }
}

// =============================================================================
// Stores
// =============================================================================

/// Somewhere the controller can read and mutate the registry.
///
/// `with_registry` is a whole read-modify-write step; implementations must
/// not let another mutation interleave with it. On the single-threaded event
/// loop a `RefCell` borrow or a signal update gives that for free. A store that
/// has gone away (unmounted component) just skips the closure.
pub trait RegistryStore<F> {
    fn with_registry(&self, f: &mut dyn FnMut(&mut UploadRegistry<F>));
}

impl<F> RegistryStore<F> for Rc<RefCell<UploadRegistry<F>>> {
    fn with_registry(&self, f: &mut dyn FnMut(&mut UploadRegistry<F>)) {
        f(&mut self.borrow_mut());
    }
}

impl<F: 'static> RegistryStore<F> for leptos::RwSignal<UploadRegistry<F>> {
    fn with_registry(&self, f: &mut dyn FnMut(&mut UploadRegistry<F>)) {
        use leptos::SignalUpdate;
        if self.try_update(|registry| f(registry)).is_none() {
            log::debug!("registry signal disposed, dropping update");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UploadError;
    use serde_json::json;

    fn record(id: &str) -> UploadRecord<()> {
        UploadRecord::seeded(UploadId::new(id), format!("{id}.txt"), 10, UploadStatus::Ready)
    }

    #[test]
    fn test_prepend_keeps_newest_first() {
        let mut reg = UploadRegistry::new();
        reg.prepend(record("a"));
        reg.prepend(record("b"));
        reg.prepend(record("c"));
        let order: Vec<&str> = reg.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_progress_moves_to_loading() {
        let mut reg = UploadRegistry::new();
        reg.prepend(record("a"));
        let id = UploadId::new("a");

        assert_eq!(reg.apply(&id, UploadPatch::progress(30)), ApplyOutcome::Applied);
        let r = reg.get(&id).unwrap();
        assert_eq!(r.status, UploadStatus::Loading);
        assert_eq!(r.percent, 30);
    }

    #[test]
    fn test_percent_never_decreases() {
        let mut reg = UploadRegistry::new();
        reg.prepend(record("a"));
        let id = UploadId::new("a");

        reg.apply(&id, UploadPatch::progress(60));
        assert_eq!(reg.apply(&id, UploadPatch::progress(40)), ApplyOutcome::Stale);
        assert_eq!(reg.get(&id).unwrap().percent, 60);
        reg.apply(&id, UploadPatch::progress(60));
        assert_eq!(reg.get(&id).unwrap().percent, 60);
    }

    #[test]
    fn test_percent_above_hundred_is_ignored() {
        let mut reg = UploadRegistry::new();
        reg.prepend(record("a"));
        let id = UploadId::new("a");

        reg.apply(&id, UploadPatch::progress(20));
        reg.apply(&id, UploadPatch::progress(140));
        assert_eq!(reg.get(&id).unwrap().percent, 20);
    }

    #[test]
    fn test_terminal_record_rejects_everything() {
        let mut reg = UploadRegistry::new();
        reg.prepend(record("a"));
        let id = UploadId::new("a");

        reg.apply(&id, UploadPatch::progress(50));
        assert_eq!(
            reg.apply(&id, UploadPatch::success(json!({"url": "/f/a"}))),
            ApplyOutcome::Applied
        );
        assert_eq!(reg.apply(&id, UploadPatch::progress(90)), ApplyOutcome::Stale);
        assert_eq!(
            reg.apply(&id, UploadPatch::fail(UploadError::Network("late".into()))),
            ApplyOutcome::Stale
        );

        let r = reg.get(&id).unwrap();
        assert_eq!(r.status, UploadStatus::Success);
        assert_eq!(r.percent, 50);
        assert_eq!(r.response, Some(json!({"url": "/f/a"})));
        assert!(r.error.is_none());
    }

    #[test]
    fn test_ready_can_finish_without_progress() {
        let mut reg = UploadRegistry::new();
        reg.prepend(record("a"));
        let id = UploadId::new("a");

        let err = UploadError::Status {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(reg.apply(&id, UploadPatch::fail(err.clone())), ApplyOutcome::Applied);
        let r = reg.get(&id).unwrap();
        assert_eq!(r.status, UploadStatus::Fail);
        assert_eq!(r.error, Some(err));
        assert!(r.response.is_none());
    }

    #[test]
    fn test_patch_for_removed_record_is_missing() {
        let mut reg = UploadRegistry::new();
        reg.prepend(record("a"));
        reg.prepend(record("b"));
        let removed = reg.remove(&UploadId::new("a")).unwrap();
        assert_eq!(removed.id.as_str(), "a");

        assert_eq!(
            reg.apply(&UploadId::new("a"), UploadPatch::progress(10)),
            ApplyOutcome::Missing
        );
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(&UploadId::new("b")).unwrap().status, UploadStatus::Ready);
    }

    #[test]
    fn test_updates_to_different_records_do_not_interfere() {
        let mut reg = UploadRegistry::new();
        reg.prepend(record("a"));
        reg.prepend(record("b"));

        reg.apply(&UploadId::new("a"), UploadPatch::progress(10));
        reg.apply(&UploadId::new("b"), UploadPatch::progress(80));
        reg.apply(&UploadId::new("a"), UploadPatch::success(json!("ok")));

        assert_eq!(reg.get(&UploadId::new("a")).unwrap().status, UploadStatus::Success);
        assert_eq!(reg.get(&UploadId::new("a")).unwrap().percent, 10);
        assert_eq!(reg.get(&UploadId::new("b")).unwrap().status, UploadStatus::Loading);
        assert_eq!(reg.get(&UploadId::new("b")).unwrap().percent, 80);
    }

    #[test]
    fn test_refcell_store_applies_in_place() {
        let store = Rc::new(RefCell::new(UploadRegistry::new()));
        store.with_registry(&mut |reg| reg.prepend(record("a")));
        let mut outcome = ApplyOutcome::Missing;
        store.with_registry(&mut |reg| {
            outcome = reg.apply(&UploadId::new("a"), UploadPatch::progress(5));
        });
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(store.borrow().records()[0].percent, 5);
    }

    #[test]
    fn test_signal_store_applies_and_survives_disposal() {
        use leptos::{create_runtime, create_rw_signal, SignalDispose, SignalWithUntracked};

        let runtime = create_runtime();
        let store = create_rw_signal(UploadRegistry::<()>::new());
        store.with_registry(&mut |reg| reg.prepend(record("a")));
        let mut outcome = ApplyOutcome::Missing;
        store.with_registry(&mut |reg| {
            outcome = reg.apply(&UploadId::new("a"), UploadPatch::progress(30));
        });
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(store.with_untracked(|reg| reg.records()[0].percent), 30);

        store.dispose();
        let mut ran = false;
        store.with_registry(&mut |reg| {
            ran = true;
            reg.prepend(record("b"));
        });
        assert!(!ran);
        runtime.dispose();
    }
}
