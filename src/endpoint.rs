//!
//! This module defines `Endpoint`, which wires a transport, an encoder and transaction options together and
//! constructs the messages that use them.
//!
use crate::encoder::EncoderSlot;
use crate::error::MessageError;
use crate::message::{Message, UserData};
use crate::options::MessageOptions;
use crate::status::{Encoding, Status};
use crate::transport::Transport;
use bytes::Bytes;
use std::sync::Arc;

pub struct Endpoint<E> {
    transport: Arc<dyn Transport>,
    encoder: EncoderSlot<E>,
    options: MessageOptions,
}

impl<E> Endpoint<E> {
    /// Create an endpoint without an encoder. Install one with `install_encoder` before the first transaction.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            encoder: EncoderSlot::new(),
            options: MessageOptions::default(),
        }
    }

    pub fn with_encoder(transport: Arc<dyn Transport>, encoder: E) -> Self {
        Self {
            transport,
            encoder: EncoderSlot::from(encoder),
            options: MessageOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MessageOptions) -> Self {
        self.options = options;
        self
    }

    pub fn install_encoder(&self, encoder: E) -> Result<(), MessageError> {
        self.encoder.install(encoder)
    }

    pub fn encoder(&self) -> Option<&Arc<E>> {
        self.encoder.get()
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Start building a locally constructed message. It carries no native handle.
    pub fn outgoing(self: &Arc<Self>, sid: i32, code: i32) -> MessageBuilder<E> {
        MessageBuilder::new(Arc::clone(self), 0, sid, code)
    }

    /// Start building a message delivered by the transport, taking ownership of `handle`.
    pub fn incoming(self: &Arc<Self>, handle: u64, sid: i32, code: i32) -> MessageBuilder<E> {
        MessageBuilder::new(Arc::clone(self), handle, sid, code)
    }
}

/// Collects the optional fields of a message. Omitted fields default to no payload, raw encoding, no user data
/// and `Status::Ok`.
pub struct MessageBuilder<E> {
    endpoint: Arc<Endpoint<E>>,
    handle: u64,
    sid: i32,
    code: i32,
    payload: Option<Bytes>,
    encoding: Encoding,
    user_data: Option<UserData>,
    status: Status,
}

impl<E> MessageBuilder<E> {
    fn new(endpoint: Arc<Endpoint<E>>, handle: u64, sid: i32, code: i32) -> Self {
        Self {
            endpoint,
            handle,
            sid,
            code,
            payload: None,
            encoding: Encoding::Raw,
            user_data: None,
            status: Status::Ok,
        }
    }

    pub fn payload(mut self, payload: impl Into<Bytes>, encoding: Encoding) -> Self {
        self.payload = Some(payload.into());
        self.encoding = encoding;
        self
    }

    pub fn user_data(mut self, user_data: UserData) -> Self {
        self.user_data = Some(user_data);
        self
    }

    pub fn status(mut self, status: impl Into<Status>) -> Self {
        self.status = status.into();
        self
    }

    pub fn build(self) -> Message<E> {
        Message::new(
            self.endpoint,
            self.handle,
            self.sid,
            self.code,
            self.payload,
            self.encoding,
            self.user_data,
            self.status,
        )
    }
}
