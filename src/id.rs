//! Element identifiers for pickers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out identifiers for picker instances.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// `{prefix}-0`, `{prefix}-1`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next:   AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            next:   AtomicU64::new(0),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("datepick")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
