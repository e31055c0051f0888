use std::sync::Arc;

use tokio::sync::Mutex;

use sf_core::wizard::WizardState;

/// Shared wizard context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: serializes `dispatch` calls so the whole
///   transition + execute_actions + state_update sequence runs atomically.
/// - `state`: used for reads (`get_state`) and writes (during `dispatch`).
#[derive(Clone)]
pub struct WizardContext {
    state: Arc<Mutex<WizardState>>,
    /// Only acquired during `dispatch`, NOT during `get_state`.
    dispatch_lock: Arc<Mutex<()>>,
}

impl WizardContext {
    pub fn new(initial_state: WizardState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Lightweight read that does NOT take the dispatch lock.
    pub async fn get_state(&self) -> WizardState {
        self.state.lock().await.clone()
    }

    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Only call after acquiring the dispatch lock.
    pub async fn set_state(&self, state: WizardState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }
}

impl Default for WizardContext {
    fn default() -> Self {
        Self::new(WizardState::default())
    }
}
