//! Background catalog builds.
//!
//! `CatalogIndex::build` is the one expensive operation, proportional to the
//! total name-character count for the trie. A handle lets the caller start
//! the build on a worker thread and keep going; queries that arrive before
//! the build completes fail with `IndexNotReady` instead of ever observing a
//! partial structure.

use crate::catalog::CatalogIndex;
use crate::error::{Result, SearchError};
use mealscore_core::Record;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use tracing::debug;

enum BuildState {
    Building,
    Done(Result<Arc<CatalogIndex>>),
}

struct Shared {
    state: Mutex<BuildState>,
    ready: Condvar,
}

/// Handle to a catalog index that may still be under construction.
///
/// Build completes or fails atomically; once `Done`, the index behind the
/// handle is read-only and cheaply cloneable via `Arc`.
pub struct IndexHandle {
    shared: Arc<Shared>,
}

impl IndexHandle {
    /// Start building on a worker thread and return immediately.
    pub fn spawn(records: Vec<Record>, max_results: usize) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(BuildState::Building),
            ready: Condvar::new(),
        });

        let worker = Arc::clone(&shared);
        thread::spawn(move || {
            debug!(records = records.len(), "background index build started");
            let result =
                CatalogIndex::build(records).map(|i| Arc::new(i.with_max_results(max_results)));
            let mut state = worker.state.lock().unwrap_or_else(|e| e.into_inner());
            *state = BuildState::Done(result);
            worker.ready.notify_all();
        });

        Self { shared }
    }

    /// Wrap an already-built index.
    pub fn ready(index: CatalogIndex) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(BuildState::Done(Ok(Arc::new(index)))),
                ready: Condvar::new(),
            }),
        }
    }

    /// Get the index if the build has completed, `IndexNotReady` otherwise.
    pub fn try_get(&self) -> Result<Arc<CatalogIndex>> {
        let state = self.shared.state.lock().unwrap_or_else(|e| e.into_inner());
        match &*state {
            BuildState::Building => Err(SearchError::IndexNotReady),
            BuildState::Done(result) => result.clone(),
        }
    }

    /// Block until the build completes and return its outcome.
    pub fn wait(&self) -> Result<Arc<CatalogIndex>> {
        let mut state = self.shared.state.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            match &*state {
                BuildState::Done(result) => return result.clone(),
                BuildState::Building => {
                    state = self
                        .shared
                        .ready
                        .wait(state)
                        .unwrap_or_else(|e| e.into_inner());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_yields_built_index() {
        let handle = IndexHandle::spawn(vec![Record::zeroed("Apple")], 20);
        let index = handle.wait().unwrap();
        assert_eq!(index.records().len(), 1);
        // After wait, try_get never reports not-ready
        assert!(handle.try_get().is_ok());
    }

    #[test]
    fn test_try_get_reports_not_ready_until_build_completes() {
        // Hold the worker on a channel so the handle is observably in the
        // building state before and until the gate is released.
        let shared = Arc::new(Shared {
            state: Mutex::new(BuildState::Building),
            ready: Condvar::new(),
        });
        let handle = IndexHandle {
            shared: Arc::clone(&shared),
        };
        assert_eq!(handle.try_get().unwrap_err(), SearchError::IndexNotReady);

        let (gate, gated) = std::sync::mpsc::channel();
        let worker = Arc::clone(&shared);
        thread::spawn(move || {
            gated.recv().unwrap();
            let result =
                CatalogIndex::build(vec![Record::zeroed("Apple")]).map(Arc::new);
            let mut state = worker.state.lock().unwrap_or_else(|e| e.into_inner());
            *state = BuildState::Done(result);
            worker.ready.notify_all();
        });

        // Worker is still gated, so the state cannot have advanced.
        assert_eq!(handle.try_get().unwrap_err(), SearchError::IndexNotReady);

        gate.send(()).unwrap();
        let index = handle.wait().unwrap();
        assert_eq!(index.records().len(), 1);
        assert!(handle.try_get().is_ok());
    }

    #[test]
    fn test_empty_catalog_build_fails_through_handle() {
        let handle = IndexHandle::spawn(Vec::new(), 20);
        assert_eq!(handle.wait().unwrap_err(), SearchError::EmptyCatalog);
    }

    #[test]
    fn test_ready_wrapper_is_immediately_available() {
        let index = CatalogIndex::build(vec![Record::zeroed("Apple")]).unwrap();
        let handle = IndexHandle::ready(index);
        assert!(handle.try_get().is_ok());
    }
}
