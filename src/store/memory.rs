use std::collections::HashMap;

use super::Storage;
use crate::error::StoreError;

/// In-memory fake with switchable read/write failures
#[derive(Debug, Default)]
pub(crate) struct MemoryStorage {
    items: HashMap<String, String>,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStorage {
    pub(crate) fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub(crate) fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful `set_item` calls
    pub(crate) fn writes(&self) -> usize {
        self.writes
    }

    pub(crate) fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::io(
                "memory",
                std::io::Error::other("simulated read failure"),
            ));
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Rejected {
                key: key.to_string(),
            });
        }
        self.items.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
