//!
//! Pluggable encoding boundary between application payloads and wire bytes.
//!
use crate::error::MessageError;
use crate::status::Encoding;
use bytes::Bytes;
use serde::Serialize;
use std::sync::{Arc, OnceLock};

/// Turns a payload of type `M` into wire bytes and into human readable text.
///
/// An encoder implements this once per payload type it understands, so a transaction on a payload the encoder
/// cannot handle is rejected at compile time. Failures for a given value are reported as errors, never as
/// partial data.
pub trait MessageEncoder<M: ?Sized>: Send + Sync {
    fn serialize(&self, msg: &M, encoding: Encoding) -> Result<Bytes, MessageError>;

    fn to_string(&self, msg: &M, encoding: Encoding) -> Result<String, MessageError>;
}

/// Initialize-once home of the encoder used by every message of an endpoint.
#[derive(Debug)]
pub struct EncoderSlot<E> {
    encoder: OnceLock<Arc<E>>,
}

impl<E> EncoderSlot<E> {
    pub fn new() -> Self {
        Self {
            encoder: OnceLock::new(),
        }
    }

    /// # Errors
    /// Raise MessageError::EncoderAlreadyInstalled if an encoder was installed before.
    pub fn install(&self, encoder: E) -> Result<(), MessageError> {
        self.encoder
            .set(Arc::new(encoder))
            .map_err(|_e| MessageError::EncoderAlreadyInstalled)
    }

    pub fn get(&self) -> Option<&Arc<E>> {
        self.encoder.get()
    }

    pub fn is_installed(&self) -> bool {
        self.encoder.get().is_some()
    }
}

impl<E> Default for EncoderSlot<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> From<E> for EncoderSlot<E> {
    fn from(encoder: E) -> Self {
        Self {
            encoder: OnceLock::from(Arc::new(encoder)),
        }
    }
}

/// Encodes any `serde::Serialize` payload as JSON. Only `Encoding::Json` is accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonEncoder;

impl JsonEncoder {
    fn check(encoding: Encoding) -> Result<(), MessageError> {
        match encoding {
            Encoding::Json => Ok(()),
            other => Err(MessageError::UnsupportedEncoding(other)),
        }
    }
}

impl<M: Serialize + ?Sized> MessageEncoder<M> for JsonEncoder {
    fn serialize(&self, msg: &M, encoding: Encoding) -> Result<Bytes, MessageError> {
        JsonEncoder::check(encoding)?;
        let data =
            serde_json::to_vec(msg).map_err(|e| MessageError::Encode(e.to_string()))?;
        Ok(Bytes::from(data))
    }

    fn to_string(&self, msg: &M, encoding: Encoding) -> Result<String, MessageError> {
        JsonEncoder::check(encoding)?;
        serde_json::to_string(msg).map_err(|e| MessageError::Encode(e.to_string()))
    }
}

/// Passes already-encoded bytes and text through unchanged, whatever the tag.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawEncoder;

impl MessageEncoder<[u8]> for RawEncoder {
    fn serialize(&self, msg: &[u8], _encoding: Encoding) -> Result<Bytes, MessageError> {
        Ok(Bytes::copy_from_slice(msg))
    }

    fn to_string(&self, msg: &[u8], _encoding: Encoding) -> Result<String, MessageError> {
        Ok(String::from_utf8_lossy(msg).into_owned())
    }
}

impl MessageEncoder<str> for RawEncoder {
    fn serialize(&self, msg: &str, _encoding: Encoding) -> Result<Bytes, MessageError> {
        Ok(Bytes::copy_from_slice(msg.as_bytes()))
    }

    fn to_string(&self, msg: &str, _encoding: Encoding) -> Result<String, MessageError> {
        Ok(msg.to_owned())
    }
}

impl MessageEncoder<Bytes> for RawEncoder {
    fn serialize(&self, msg: &Bytes, _encoding: Encoding) -> Result<Bytes, MessageError> {
        Ok(msg.clone())
    }

    fn to_string(&self, msg: &Bytes, encoding: Encoding) -> Result<String, MessageError> {
        self.to_string(&msg[..], encoding)
    }
}
