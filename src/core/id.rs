//! Per-instance identifiers for log tagging.
//!
//! Every module instance takes the next value of a process-wide counter.
//! The id has no gameplay meaning; it only tells log lines of different
//! instances apart.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_MODULE_ID: AtomicU32 = AtomicU32::new(1);

/// Identifier of one puzzle instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(pub u32);

impl ModuleId {
    /// Allocate the next process-wide id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_MODULE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let a = ModuleId::next();
        let b = ModuleId::next();
        assert!(b > a);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ModuleId(12)), "#12");
    }
}
