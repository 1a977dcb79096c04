//!
//! This module defines the boundary to the native delivery engine.
//!
use crate::status::Encoding;
use std::num::NonZeroU64;

/// A live native handle. Zero is reserved for "no resource attached" and cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(NonZeroU64);

impl Handle {
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Handle)
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

/// Primitives of the native message-delivery engine.
///
/// Every call is blocking from the caller's perspective. `destroy` is invoked at most once per handle.
pub trait Transport: Send + Sync {
    fn reply(&self, handle: Handle, data: &[u8], encoding: Encoding, log: Option<&str>) -> bool;

    fn broadcast(
        &self,
        handle: Handle,
        code: i32,
        topic: Option<&str>,
        data: &[u8],
        encoding: Encoding,
        log: Option<&str>,
    ) -> bool;

    fn destroy(&self, handle: Handle);

    fn log_enabled(&self, handle: Handle) -> bool;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::{Handle, Transport};
    use crate::status::Encoding;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Reply {
            handle: u64,
            data: Vec<u8>,
            encoding: Encoding,
            log: Option<String>,
        },
        Broadcast {
            handle: u64,
            code: i32,
            topic: Option<String>,
            data: Vec<u8>,
            encoding: Encoding,
            log: Option<String>,
        },
        Destroy(u64),
        LogEnabled(u64),
    }

    /// Records every primitive invocation in order.
    pub(crate) struct RecordingTransport {
        pub(crate) accept: bool,
        pub(crate) logging: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingTransport {
        pub(crate) fn new() -> Self {
            Self {
                accept: true,
                logging: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> Vec<Call> {
            self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
        }

        pub(crate) fn destroyed(&self) -> usize {
            self.calls()
                .iter()
                .filter(|call| matches!(call, Call::Destroy(_)))
                .count()
        }

        pub(crate) fn sends(&self) -> usize {
            self.calls()
                .iter()
                .filter(|call| matches!(call, Call::Reply { .. } | Call::Broadcast { .. }))
                .count()
        }

        fn record(&self, call: Call) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
        }
    }

    impl Transport for RecordingTransport {
        fn reply(&self, handle: Handle, data: &[u8], encoding: Encoding, log: Option<&str>) -> bool {
            self.record(Call::Reply {
                handle: handle.get(),
                data: data.to_vec(),
                encoding,
                log: log.map(str::to_owned),
            });
            self.accept
        }

        fn broadcast(
            &self,
            handle: Handle,
            code: i32,
            topic: Option<&str>,
            data: &[u8],
            encoding: Encoding,
            log: Option<&str>,
        ) -> bool {
            self.record(Call::Broadcast {
                handle: handle.get(),
                code,
                topic: topic.map(str::to_owned),
                data: data.to_vec(),
                encoding,
                log: log.map(str::to_owned),
            });
            self.accept
        }

        fn destroy(&self, handle: Handle) {
            self.record(Call::Destroy(handle.get()));
        }

        fn log_enabled(&self, handle: Handle) -> bool {
            self.record(Call::LogEnabled(handle.get()));
            self.logging
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Handle;

    #[test]
    fn test_zero_is_not_a_handle() {
        assert_eq!(Handle::new(0), None);
        assert_eq!(Handle::new(17).map(|h| h.get()), Some(17));
    }
}
