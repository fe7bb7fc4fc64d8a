//! Key-value persistence port.
//!
//! The planner only ever reads a handful of string values at startup and
//! writes one back after each change, so a storage backend is nothing more
//! than `load` and `save` by key.

mod file;

pub use file::FileStorage;

use std::collections::HashMap;

use crate::error::PlannerResult;

pub trait Storage {
    /// Stored value for `key`, or `None` if it was never written.
    fn load(&self, key: &str) -> PlannerResult<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> PlannerResult<()>;
}

/// Storage held in memory. Used for tests and for embedding without a disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> PlannerResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> PlannerResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
