//!
//! Ownership of the native handle behind a message.
//!
//! A `HandleSlot` holds the raw value. `take` clears the slot with a single atomic exchange and hands out a
//! `LiveHandle`, which releases the native resource when dropped. Only one caller can ever observe a non-zero value,
//! so a handle is destroyed at most once no matter how many threads race on `take`.
//!
use crate::status::Encoding;
use crate::transport::{Handle, Transport};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Debug)]
pub(crate) struct HandleSlot {
    raw: AtomicU64,
}

impl HandleSlot {
    pub(crate) fn new(raw: u64) -> Self {
        Self {
            raw: AtomicU64::new(raw),
        }
    }

    pub(crate) fn peek(&self) -> Option<Handle> {
        Handle::new(self.raw.load(Ordering::Acquire))
    }

    pub(crate) fn take<'a>(&self, transport: &'a dyn Transport) -> Option<LiveHandle<'a>> {
        Handle::new(self.raw.swap(0, Ordering::AcqRel)).map(|handle| LiveHandle { handle, transport })
    }

    /// Returns true if this call released the handle.
    pub(crate) fn release(&self, transport: &dyn Transport) -> bool {
        self.take(transport).is_some()
    }
}

/// Exclusive owner of a live handle. Dropping it destroys the native resource.
pub(crate) struct LiveHandle<'a> {
    handle: Handle,
    transport: &'a dyn Transport,
}

impl<'a> LiveHandle<'a> {
    pub(crate) fn log_enabled(&self) -> bool {
        self.transport.log_enabled(self.handle)
    }

    pub(crate) fn reply(&self, data: &[u8], encoding: Encoding, log: Option<&str>) -> bool {
        self.transport.reply(self.handle, data, encoding, log)
    }

    pub(crate) fn broadcast(
        &self,
        code: i32,
        topic: Option<&str>,
        data: &[u8],
        encoding: Encoding,
        log: Option<&str>,
    ) -> bool {
        self.transport
            .broadcast(self.handle, code, topic, data, encoding, log)
    }
}

impl<'a> Drop for LiveHandle<'a> {
    fn drop(&mut self) {
        debug!(handle = self.handle.get(), "Releasing native handle");
        self.transport.destroy(self.handle);
    }
}
