//! Upload orchestration.
//!
//! ```text
//! select(files) ──▶ one UploadTask per file
//!                     │
//!                     ├─ before_upload ── Reject / Err ──▶ (nothing)
//!                     │
//!                     ├─ admit: Ready record prepended
//!                     ├─ transport.submit ── ticks ──▶ Loading, percent
//!                     └─ Ok ▶ Success + on_success │ Err ▶ Fail + on_error
//!                                  └──────────▶ on_change
//! ```
//!
//! Tasks never wait on each other; the caller spawns each one on the local
//! executor. Every registry write is a single [`RegistryStore::with_registry`]
//! step keyed by record id.

use std::cell::Cell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde_json::Value;

use crate::engine::ids::IdGenerator;
use crate::engine::interceptor::{intercept, BeforeUpload};
use crate::engine::progress::accepted_percent;
use crate::engine::registry::{ApplyOutcome, RegistryStore};
use crate::engine::request::UploadOptions;
use crate::engine::transport::{ProgressFn, Transport};
use crate::types::{
    ProgressTick, UploadError, UploadFile, UploadId, UploadPatch, UploadRecord, UploadResult,
};

/// One file's pipeline, ready to be spawned.
pub type UploadTask = LocalBoxFuture<'static, ()>;

/// Lifecycle hooks. All optional.
pub struct UploadCallbacks<F> {
    pub on_change: Option<Rc<dyn Fn(&F)>>,
    /// Not called for ticks that would not move the record's percent forward.
    pub on_progress: Option<Rc<dyn Fn(u8, &F)>>,
    pub on_success: Option<Rc<dyn Fn(&Value, &F)>>,
    pub on_error: Option<Rc<dyn Fn(&UploadError, &F)>>,
    pub on_remove: Option<Rc<dyn Fn(&UploadRecord<F>)>>,
    pub on_preview: Option<Rc<dyn Fn(&UploadRecord<F>)>>,
}

impl<F> Default for UploadCallbacks<F> {
    fn default() -> Self {
        Self {
            on_change: None,
            on_progress: None,
            on_success: None,
            on_error: None,
            on_remove: None,
            on_preview: None,
        }
    }
}

impl<F> UploadCallbacks<F> {
    pub fn on_change(mut self, f: impl Fn(&F) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    pub fn on_progress(mut self, f: impl Fn(u8, &F) + 'static) -> Self {
        self.on_progress = Some(Rc::new(f));
        self
    }

    pub fn on_success(mut self, f: impl Fn(&Value, &F) + 'static) -> Self {
        self.on_success = Some(Rc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&UploadError, &F) + 'static) -> Self {
        self.on_error = Some(Rc::new(f));
        self
    }

    pub fn on_remove(mut self, f: impl Fn(&UploadRecord<F>) + 'static) -> Self {
        self.on_remove = Some(Rc::new(f));
        self
    }

    pub fn on_preview(mut self, f: impl Fn(&UploadRecord<F>) + 'static) -> Self {
        self.on_preview = Some(Rc::new(f));
        self
    }
}

/// Drives every upload of one widget instance.
///
/// Cheap to clone; clones share the registry, transport, and id counter.
pub struct UploadController<F> {
    options: Rc<UploadOptions>,
    transport: Rc<dyn Transport<F>>,
    store: Rc<dyn RegistryStore<F>>,
    before_upload: Option<BeforeUpload<F>>,
    callbacks: Rc<UploadCallbacks<F>>,
    ids: Rc<IdGenerator>,
}

impl<F> Clone for UploadController<F> {
    fn clone(&self) -> Self {
        Self {
            options: Rc::clone(&self.options),
            transport: Rc::clone(&self.transport),
            store: Rc::clone(&self.store),
            before_upload: self.before_upload.clone(),
            callbacks: Rc::clone(&self.callbacks),
            ids: Rc::clone(&self.ids),
        }
    }
}

impl<F: UploadFile> UploadController<F> {
    pub fn new(
        options: UploadOptions,
        transport: impl Transport<F> + 'static,
        store: impl RegistryStore<F> + 'static,
    ) -> Self {
        Self {
            options: Rc::new(options),
            transport: Rc::new(transport),
            store: Rc::new(store),
            before_upload: None,
            callbacks: Rc::new(UploadCallbacks::default()),
            ids: Rc::new(IdGenerator::new()),
        }
    }

    pub fn before_upload(mut self, hook: BeforeUpload<F>) -> Self {
        self.before_upload = Some(hook);
        self
    }

    pub fn callbacks(mut self, callbacks: UploadCallbacks<F>) -> Self {
        self.callbacks = Rc::new(callbacks);
        self
    }

    pub fn options(&self) -> &UploadOptions {
        &self.options
    }

    /// One independent task per selected file. An empty selection yields none.
    pub fn select(&self, files: impl IntoIterator<Item = F>) -> Vec<UploadTask> {
        let tasks: Vec<UploadTask> = files
            .into_iter()
            .map(|file| self.clone().run(file).boxed_local())
            .collect();

        if !tasks.is_empty() {
            log::debug!("dispatching {} upload(s) to {}", tasks.len(), self.options.action);
        }
        tasks
    }

    /// Drop a record. The transfer behind it, if any, keeps running and its
    /// later updates are discarded.
    pub fn remove(&self, id: &UploadId) -> Option<UploadRecord<F>> {
        let mut removed = None;
        self.store
            .with_registry(&mut |registry| removed = registry.remove(id));

        match &removed {
            Some(record) => {
                log::debug!("removed {} ({})", record.id, record.name);
                if let Some(cb) = &self.callbacks.on_remove {
                    cb(record);
                }
            }
            None => log::debug!("remove: {} not tracked", id),
        }
        removed
    }

    pub fn preview(&self, record: &UploadRecord<F>) {
        if let Some(cb) = &self.callbacks.on_preview {
            cb(record);
        }
    }

    async fn run(self, file: F) {
        let Some(file) = intercept(self.before_upload.as_ref(), file).await else {
            return;
        };

        let id = self.admit(&file);
        let request = self.options.request_for(file.clone());

        let settled = Rc::new(Cell::new(false));
        let on_progress: ProgressFn = {
            let this = self.clone();
            let id = id.clone();
            let file = file.clone();
            let settled = Rc::clone(&settled);
            Rc::new(move |tick| this.on_tick(&id, &file, tick, &settled))
        };

        let result = self.transport.submit(request, on_progress).await;
        settled.set(true);
        self.finish(&id, &file, result);
    }

    /// Create the `Ready` record before anything goes on the wire.
    fn admit(&self, file: &F) -> UploadId {
        let mut id = self.ids.next_id();
        let ids = &self.ids;
        self.store.with_registry(&mut |registry| {
            // seeded records may already use the counter's format
            while registry.contains(&id) {
                id = ids.next_id();
            }
            registry.prepend(UploadRecord::from_file(id.clone(), file));
        });
        log::debug!("{} -> {} ({} bytes)", file.name(), id, file.size());
        id
    }

    fn on_tick(&self, id: &UploadId, file: &F, tick: ProgressTick, settled: &Cell<bool>) {
        if settled.get() {
            log::debug!("{}: progress after completion ignored", id);
            return;
        }
        let Some(percent) = accepted_percent(tick) else {
            return;
        };

        if self.patch(id, UploadPatch::progress(percent)) == ApplyOutcome::Stale {
            return;
        }
        if let Some(cb) = &self.callbacks.on_progress {
            cb(percent, file);
        }
    }

    fn finish(&self, id: &UploadId, file: &F, result: UploadResult<Value>) {
        match result {
            Ok(response) => {
                log::info!("✅ {} uploaded ({})", file.name(), id);
                self.patch(id, UploadPatch::success(response.clone()));
                if let Some(cb) = &self.callbacks.on_success {
                    cb(&response, file);
                }
            }
            Err(error) => {
                log::warn!("❌ {} failed ({}): {}", file.name(), id, error);
                self.patch(id, UploadPatch::fail(error.clone()));
                if let Some(cb) = &self.callbacks.on_error {
                    cb(&error, file);
                }
            }
        }

        if let Some(cb) = &self.callbacks.on_change {
            cb(file);
        }
    }

    fn patch(&self, id: &UploadId, patch: UploadPatch) -> ApplyOutcome {
        let mut patch = Some(patch);
        let mut outcome = ApplyOutcome::Missing;
        self.store.with_registry(&mut |registry| {
            if let Some(patch) = patch.take() {
                outcome = registry.apply(id, patch);
            }
        });
        if outcome == ApplyOutcome::Missing {
            log::debug!("{} is no longer tracked, update dropped", id);
        }
        outcome
    }
}
