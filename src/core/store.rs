use crate::core::event::AppEvent;
use crate::core::reducer::reduce;
use crate::core::state::AppState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Owns the application state; all mutation is serialized through
/// `dispatch`, which runs the reducer under the lock. The reducer never
/// blocks or performs I/O, so a plain mutex is enough.
#[derive(Default)]
pub struct AppStore {
    state: Mutex<AppState>,
    generations: AtomicU64,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, event: AppEvent) {
        tracing::trace!(?event, "dispatch");
        let mut state = self.lock_state();
        reduce(&mut state, event);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.lock_state().clone()
    }

    /// Read a value out of the state without cloning all of it.
    pub fn with_state<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&self.lock_state())
    }

    /// Allocate a generation for a venue-detail fetch. The completion event
    /// must carry it back so the reducer can discard late responses from a
    /// superseded fetch.
    pub fn allocate_generation(&self) -> u64 {
        self.generations.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn lock_state(&self) -> MutexGuard<'_, AppState> {
        // A poisoned lock means a reducer panicked; the state itself is
        // still structurally valid, so keep serving it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
