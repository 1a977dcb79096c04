//! This crate provides the message object of a process-to-process publish/subscribe and request/reply bus.
//!
//! A [`message::Message`] wraps one native handle owned by the delivery engine behind [`transport::Transport`].
//! Replies and broadcasts serialize their payload through a pluggable [`encoder::MessageEncoder`] and always
//! release the handle afterwards, exactly once.
pub mod encoder;
pub mod endpoint;
pub mod error;
mod handle;
pub mod logging;
pub mod message;
pub mod options;
pub mod status;
pub mod transport;

pub use encoder::{EncoderSlot, JsonEncoder, MessageEncoder, RawEncoder};
pub use endpoint::{Endpoint, MessageBuilder};
pub use error::MessageError;
pub use message::{Message, UserData};
pub use options::MessageOptions;
pub use status::{Encoding, Status};
pub use transport::{Handle, Transport};
