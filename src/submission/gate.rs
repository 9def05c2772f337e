use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The "submit enabled" flag shared between a trigger and the pipeline.
///
/// A submission takes the gate with [`SubmitGate::try_acquire`]; while the
/// returned guard lives, the gate reports disabled and further acquisitions
/// fail. Dropping the guard re-enables it on every exit path.
#[derive(Debug, Clone)]
pub struct SubmitGate {
    enabled: Arc<AtomicBool>,
}

impl Default for SubmitGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitGate {
    pub fn new() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether a new submission may start
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Disable the gate for the lifetime of the returned guard, or `None`
    /// when a submission is already in flight.
    pub fn try_acquire(&self) -> Option<SubmitGuard> {
        self.enabled
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SubmitGuard {
                enabled: Arc::clone(&self.enabled),
            })
    }
}

/// Holds the gate disabled until dropped.
#[derive(Debug)]
pub struct SubmitGuard {
    enabled: Arc<AtomicBool>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.enabled.store(true, Ordering::SeqCst);
    }
}
