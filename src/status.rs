//!
//! Integer codes carried by a message: the outcome `Status` and the payload `Encoding` tag.
//!
use serde::{Deserialize, Serialize};

/// Outcome of the transaction that produced a message.
///
/// Codes are passed through untouched; values this crate does not name are kept in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ok,
    Timeout,
    Unavailable,
    InvalidId,
    Rejected,
    UnableToSend,
    Other(i32),
}

impl Status {
    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        match code {
            0 => Status::Ok,
            -1 => Status::Timeout,
            -2 => Status::Unavailable,
            -3 => Status::InvalidId,
            -4 => Status::Rejected,
            -5 => Status::UnableToSend,
            other => Status::Other(other),
        }
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> i32 {
        match status {
            Status::Ok => 0,
            Status::Timeout => -1,
            Status::Unavailable => -2,
            Status::InvalidId => -3,
            Status::Rejected => -4,
            Status::UnableToSend => -5,
            Status::Other(code) => code,
        }
    }
}

/// How a payload is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Encoding {
    Raw,
    #[default]
    Protobuf,
    Json,
    Custom(i32),
}

impl From<i32> for Encoding {
    fn from(tag: i32) -> Self {
        match tag {
            0 => Encoding::Raw,
            1 => Encoding::Protobuf,
            2 => Encoding::Json,
            other => Encoding::Custom(other),
        }
    }
}

impl From<Encoding> for i32 {
    fn from(encoding: Encoding) -> i32 {
        match encoding {
            Encoding::Raw => 0,
            Encoding::Protobuf => 1,
            Encoding::Json => 2,
            Encoding::Custom(tag) => tag,
        }
    }
}
