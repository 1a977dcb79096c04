//!
//! This module defines `Message`, the unit that carries a request, a reply or an event across the transport.
//!
//! A message optionally owns one native handle. The handle ends its life in exactly one of three ways: a terminal
//! transaction (`reply` or `broadcast`), an explicit `destroy`, or dropping the message. Whichever comes first
//! releases it; the others find the slot empty and do nothing.
//!
use crate::encoder::MessageEncoder;
use crate::endpoint::Endpoint;
use crate::error::MessageError;
use crate::handle::{HandleSlot, LiveHandle};
use crate::options::MessageOptions;
use crate::status::{Encoding, Status};
use bytes::Bytes;
use std::any::Any;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Opaque value handed over from an asynchronous invocation to its reply handler. Never transmitted.
pub type UserData = Arc<dyn Any + Send + Sync>;

pub struct Message<E> {
    endpoint: Arc<Endpoint<E>>,

    handle: HandleSlot,

    /// Identifies the connection between client and server.
    sid: i32,

    /// Identifies the message within the client/server contract.
    code: i32,

    /// Raw bytes received from the remote side. Absent when the message is used to send a structured payload.
    payload: Option<Bytes>,

    encoding: Encoding,

    user_data: Option<UserData>,

    /// Only populated on the broadcast path.
    topic: OnceLock<String>,

    status: Status,
}

impl<E> Message<E> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        endpoint: Arc<Endpoint<E>>,
        handle: u64,
        sid: i32,
        code: i32,
        payload: Option<Bytes>,
        encoding: Encoding,
        user_data: Option<UserData>,
        status: Status,
    ) -> Self {
        Message {
            endpoint,
            handle: HandleSlot::new(handle),
            sid,
            code,
            payload,
            encoding,
            user_data,
            topic: OnceLock::new(),
            status,
        }
    }

    pub fn byte_array(&self) -> Option<&Bytes> {
        self.payload.as_ref()
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn sid(&self) -> i32 {
        self.sid
    }

    pub fn user_data(&self) -> Option<&UserData> {
        self.user_data.as_ref()
    }

    /// Borrow the user data as `T`, or `None` if absent or of another type.
    pub fn user_data_as<T: Any>(&self) -> Option<&T> {
        self.user_data.as_deref()?.downcast_ref::<T>()
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.get().map(String::as_str)
    }

    /// Attach the topic of a received broadcast.
    ///
    /// # Errors
    /// Raise MessageError::TopicAlreadySet on every call after the first.
    pub fn set_topic(&self, topic: impl Into<String>) -> Result<(), MessageError> {
        self.topic
            .set(topic.into())
            .map_err(|_e| MessageError::TopicAlreadySet)
    }

    pub fn return_value(&self) -> Status {
        self.status
    }

    pub fn has_handle(&self) -> bool {
        self.handle.peek().is_some()
    }

    /// Whether the transport has diagnostic logging enabled for this message's channel.
    ///
    /// Meaningful only before a terminal transaction; once the handle is gone this is always false.
    pub fn log_enabled(&self) -> bool {
        match self.handle.peek() {
            Some(handle) => self.endpoint.transport().log_enabled(handle),
            None => false,
        }
    }

    /// Release the native handle. Calling it again, or after a terminal transaction, does nothing.
    pub fn destroy(&self) {
        if !self.handle.release(self.endpoint.transport()) {
            debug!(sid = self.sid, code = self.code, "Message handle already released");
        }
    }

    fn begin(&self, transaction: &'static str) -> Result<(LiveHandle<'_>, &E), MessageError> {
        let encoder = match self.endpoint.encoder() {
            Some(encoder) => encoder.as_ref(),
            None => {
                warn!(
                    sid = self.sid,
                    code = self.code,
                    "Cannot {}: no message encoder installed",
                    transaction
                );
                self.destroy();
                return Err(MessageError::NoEncoder);
            }
        };
        let live = self
            .handle
            .take(self.endpoint.transport())
            .ok_or(MessageError::Released)?;
        Ok((live, encoder))
    }

    fn render<M: ?Sized>(
        live: &LiveHandle<'_>,
        encoder: &E,
        msg: &M,
        options: &MessageOptions,
    ) -> Option<String>
    where
        E: MessageEncoder<M>,
    {
        if !options.render_log || !live.log_enabled() {
            return None;
        }
        match MessageEncoder::<M>::to_string(encoder, msg, options.encoding) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(error = %e, "Skip log rendering");
                None
            }
        }
    }

    fn encode<M: ?Sized>(&self, encoder: &E, msg: &M, encoding: Encoding) -> Result<Bytes, MessageError>
    where
        E: MessageEncoder<M>,
    {
        MessageEncoder::<M>::serialize(encoder, msg, encoding).map_err(|e| {
            warn!(sid = self.sid, code = self.code, error = %e, "Failed to encode message");
            e
        })
    }

    /// Send `msg` as the reply to the invoke this message carries, then release the handle.
    ///
    /// # Errors
    /// - MessageError::NoEncoder if the endpoint has no encoder; the handle is still released.
    /// - MessageError::Released if the handle was already released; nothing is sent.
    /// - Any encoder error; the handle is still released.
    /// - MessageError::Transport if the transport rejected the reply.
    pub fn reply<M: ?Sized>(&self, msg: &M) -> Result<(), MessageError>
    where
        E: MessageEncoder<M>,
    {
        let options = *self.endpoint.options();
        let (live, encoder) = self.begin("reply")?;
        let log = Self::render(&live, encoder, msg, &options);
        let data = self.encode(encoder, msg, options.encoding)?;
        let log = log.as_deref().filter(|_| options.forward_reply_log);
        if live.reply(&data, options.encoding, log) {
            Ok(())
        } else {
            warn!(sid = self.sid, code = self.code, "Transport rejected reply");
            Err(MessageError::Transport("reply"))
        }
    }

    /// Broadcast `msg` under `code` and `topic`, then release the handle.
    ///
    /// Used on the server side to send the initial value of a subscribed event, or to publish an event.
    /// Fails the same way `reply` does.
    pub fn broadcast<M: ?Sized>(&self, code: i32, topic: Option<&str>, msg: &M) -> Result<(), MessageError>
    where
        E: MessageEncoder<M>,
    {
        let options = *self.endpoint.options();
        let (live, encoder) = self.begin("broadcast")?;
        let log = Self::render(&live, encoder, msg, &options);
        let data = self.encode(encoder, msg, options.encoding)?;
        let log = log.as_deref().filter(|_| options.forward_broadcast_log);
        if live.broadcast(code, topic, &data, options.encoding, log) {
            Ok(())
        } else {
            warn!(code, topic, "Transport rejected broadcast");
            Err(MessageError::Transport("broadcast"))
        }
    }

    /// Broadcast without a topic.
    pub fn broadcast_all<M: ?Sized>(&self, code: i32, msg: &M) -> Result<(), MessageError>
    where
        E: MessageEncoder<M>,
    {
        self.broadcast(code, None, msg)
    }
}

impl<E> Drop for Message<E> {
    fn drop(&mut self) {
        self.handle.release(self.endpoint.transport());
    }
}
