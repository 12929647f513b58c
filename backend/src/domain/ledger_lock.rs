//! Serialises mutating service calls.
//!
//! Every operation that checks state and then writes holds the ledger lock
//! for its whole duration, which gives each call transaction semantics on
//! any storage backend. Reads never take it.
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Clone, Default)]
pub struct LedgerLock {
    inner: Arc<Mutex<()>>,
}

impl LedgerLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
