//!
//! Configuration of reply and broadcast transactions.
//!
use crate::error::MessageError;
use crate::status::Encoding;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageOptions {
    /// Tag used to serialize payloads of both transactions.
    pub encoding: Encoding,

    /// Ask the encoder for a human readable rendering when the transport has logging enabled.
    pub render_log: bool,

    /// Forward the rendering to the transport on reply.
    pub forward_reply_log: bool,

    /// Forward the rendering to the transport on broadcast.
    pub forward_broadcast_log: bool,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::Protobuf,
            render_log: true,
            forward_reply_log: false,
            forward_broadcast_log: true,
        }
    }
}

impl MessageOptions {
    pub fn from_json(json: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, MessageError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}
