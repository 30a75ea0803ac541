//! Per-session running flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag shared by one producer and one consumer.
///
/// Cloning shares the flag. Each session creates its own, so stopping one
/// pool never touches another. The flag lives outside the pool mutex and is
/// cheap to poll on every iteration.
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    /// A new flag in the running state
    #[must_use]
    pub fn running() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Whether the session should keep going
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear the flag.
    ///
    /// Returns `true` if this call was the one that cleared it.
    pub fn stop(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_shared_between_clones() {
        let flag = RunFlag::running();
        let other = flag.clone();
        assert!(other.is_running());

        assert!(flag.stop());
        assert!(!other.is_running());
        assert!(!other.stop());
    }

    #[test]
    fn separate_flags_are_independent() {
        let normal = RunFlag::running();
        let vip = RunFlag::running();
        normal.stop();
        assert!(vip.is_running());
    }
}
