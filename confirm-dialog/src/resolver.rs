//! One-shot settle guard.
//!
//! A `Resolver` is the sending half of a pending answer. It can be cloned
//! freely, but only the first `resolve` call delivers a value.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

pub struct Resolver<R> {
    result_tx: Arc<Mutex<Option<oneshot::Sender<R>>>>,
    settled: Arc<AtomicBool>,
}

impl<R> Resolver<R> {
    /// Create a resolver with the given result sender.
    pub fn new(result_tx: oneshot::Sender<R>) -> Self {
        Self {
            result_tx: Arc::new(Mutex::new(Some(result_tx))),
            settled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Deliver the result. Returns false (and drops `result`) if this
    /// resolver, or any clone of it, already settled.
    pub fn resolve(&self, result: R) -> bool {
        let tx = self
            .result_tx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        self.settled.store(true, Ordering::SeqCst);

        match tx {
            Some(tx) => {
                // The receiver may be gone if the caller stopped waiting
                let _ = tx.send(result);
                true
            }
            None => {
                log::warn!("[resolver] already settled, ignoring second result");
                false
            }
        }
    }

    /// Check if a result has been delivered.
    pub fn is_settled(&self) -> bool {
        self.settled.load(Ordering::SeqCst)
    }
}

impl<R> Clone for Resolver<R> {
    fn clone(&self) -> Self {
        Self {
            result_tx: Arc::clone(&self.result_tx),
            settled: Arc::clone(&self.settled),
        }
    }
}

impl<R> std::fmt::Debug for Resolver<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("settled", &self.is_settled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_first_resolve_delivers() {
        let (tx, mut rx) = oneshot::channel();
        let resolver = Resolver::new(tx);
        let clone = resolver.clone();

        assert!(resolver.resolve(true));
        assert!(!clone.resolve(false));
        assert!(clone.is_settled());
        assert_eq!(rx.try_recv(), Ok(true));
    }

    #[test]
    fn test_resolve_after_receiver_dropped() {
        let (tx, rx) = oneshot::channel::<bool>();
        drop(rx);
        let resolver = Resolver::new(tx);

        assert!(resolver.resolve(true));
        assert!(resolver.is_settled());
    }
}
