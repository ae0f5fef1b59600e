use std::borrow::Cow;

use crate::cache::DEFAULT_CHUNK_CAPACITY;

/// Settings for one memoizing source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Size of the cache's first bucket; later buckets double.
    pub chunk_capacity: usize,
    /// Name attached to this source's log events.
    pub label: Option<Cow<'static, str>>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            label: None,
        }
    }
}

impl SourceConfig {
    pub(crate) fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}
