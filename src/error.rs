use crate::status::Encoding;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("No message encoder is installed")]
    NoEncoder,

    #[error("A message encoder is already installed")]
    EncoderAlreadyInstalled,

    #[error("Encoding `{0:?}` is not supported by the installed encoder")]
    UnsupportedEncoding(Encoding),

    #[error("Failed to encode message: {0}")]
    Encode(String),

    #[error("Transport primitive `{0}` reported failure")]
    Transport(&'static str),

    #[error("Message handle is already released")]
    Released,

    #[error("Topic is already set")]
    TopicAlreadySet,

    #[error("Invalid message options")]
    InvalidOptions(#[from] serde_json::Error),
}
