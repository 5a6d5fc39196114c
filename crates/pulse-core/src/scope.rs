//! Request Scopes
//!
//! Binds outbound requests to the lifetime of the view that issued them.
//! Cancelling the scope (explicitly, or by dropping the owning
//! [`RequestScope`]) aborts every request still in flight, and a result that
//! settles after cancellation is discarded instead of reaching view state.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{AbortHandle, Abortable};

#[derive(Debug, Default)]
struct ScopeInner {
    cancelled: bool,
    next_id: u64,
    in_flight: HashMap<u64, AbortHandle>,
}

/// Cheap, cloneable access to a scope. Dropping a handle does not cancel.
#[derive(Clone, Debug, Default)]
pub struct ScopeHandle {
    inner: Arc<Mutex<ScopeInner>>,
}

impl ScopeHandle {
    fn lock(&self) -> MutexGuard<'_, ScopeInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `fut` inside the scope.
    ///
    /// Returns `None` when the scope was cancelled before, during, or right
    /// after the request.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        let (handle, registration) = AbortHandle::new_pair();

        let id = {
            let mut inner = self.lock();
            if inner.cancelled {
                return None;
            }
            let id = inner.next_id;
            inner.next_id += 1;
            inner.in_flight.insert(id, handle);
            id
        };

        let outcome = Abortable::new(fut, registration).await;

        let cancelled = {
            let mut inner = self.lock();
            inner.in_flight.remove(&id);
            inner.cancelled
        };

        match outcome {
            Ok(value) if !cancelled => Some(value),
            Ok(_) => {
                tracing::debug!("Discarding result that settled after scope cancellation");
                None
            }
            Err(_aborted) => None,
        }
    }

    /// Abort everything in flight and refuse new work
    pub fn cancel(&self) {
        let handles: Vec<AbortHandle> = {
            let mut inner = self.lock();
            if inner.cancelled {
                return;
            }
            inner.cancelled = true;
            inner.in_flight.drain().map(|(_, handle)| handle).collect()
        };

        if !handles.is_empty() {
            tracing::debug!(aborted = handles.len(), "Request scope cancelled");
        }
        for handle in handles {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// Requests currently running in this scope
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }
}

/// Owning side of a scope; cancels on drop.
#[derive(Debug, Default)]
pub struct RequestScope {
    handle: ScopeHandle,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> ScopeHandle {
        self.handle.clone()
    }

    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        self.handle.run(fut).await
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled()
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}
