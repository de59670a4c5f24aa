//! Processor limits

/// Ceilings that catch runaway caller loops and bound the edit queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Bookmarks that may exist at the same time
    pub max_bookmarks: usize,
    /// Calls to `seek` over the lifetime of a processor
    pub max_seek_ops: usize,
    /// Queued edits before the processor flushes on its own
    pub max_pending_updates: usize,
}

impl ProcessorConfig {
    pub const DEFAULT_MAX_BOOKMARKS: usize = 10;
    pub const DEFAULT_MAX_SEEK_OPS: usize = 1000;
    pub const DEFAULT_MAX_PENDING_UPDATES: usize = 1000;

    pub fn with_max_bookmarks(mut self, max: usize) -> Self {
        self.max_bookmarks = max;
        self
    }

    pub fn with_max_seek_ops(mut self, max: usize) -> Self {
        self.max_seek_ops = max;
        self
    }

    pub fn with_max_pending_updates(mut self, max: usize) -> Self {
        self.max_pending_updates = max;
        self
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            max_bookmarks: Self::DEFAULT_MAX_BOOKMARKS,
            max_seek_ops: Self::DEFAULT_MAX_SEEK_OPS,
            max_pending_updates: Self::DEFAULT_MAX_PENDING_UPDATES,
        }
    }
}
