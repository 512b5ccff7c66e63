//! Cooperative cancellation for a discovery run.
//!
//! The run checks the token between CSS sources and between variant decodes;
//! an in-flight request is never interrupted.

use crate::utils::error::{FontGrabError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(FontGrabError::Cancelled)
        } else {
            Ok(())
        }
    }
}
