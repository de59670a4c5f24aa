//! ResourceArc Wrappers
//!
//! Persistent processor state held by the BEAM between NIF calls.

use crate::core::XmlTagProcessor;
use rustler::ResourceArc;
use std::sync::Mutex;

/// Wrapper for XmlTagProcessor that can be stored in a ResourceArc
pub struct TagProcessorResource {
    pub inner: Mutex<XmlTagProcessor>,
}

impl TagProcessorResource {
    pub fn new(xml: String) -> Self {
        TagProcessorResource {
            inner: Mutex::new(XmlTagProcessor::new(xml)),
        }
    }

    /// Run `f` with exclusive access to the processor.
    ///
    /// # Errors
    ///
    /// Returns `"mutex_poisoned"` if an earlier call panicked while holding
    /// the lock.
    pub fn with_processor<F, R>(&self, f: F) -> Result<R, &'static str>
    where
        F: FnOnce(&mut XmlTagProcessor) -> R,
    {
        let mut guard = self.inner.lock().map_err(|_| "mutex_poisoned")?;
        Ok(f(&mut guard))
    }
}

#[rustler::resource_impl]
impl rustler::Resource for TagProcessorResource {}

/// Type alias for the ResourceArc
pub type TagProcessorRef = ResourceArc<TagProcessorResource>;
