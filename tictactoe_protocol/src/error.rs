// Errors raised while sending or receiving protocol messages.
//
// Two families: transport failures (the socket broke or closed between
// messages) and framing failures (a message arrived but did not match the
// expected shape). Neither is recovered from inside a session.

use std::io;

use derive_more::{Display, Error, From};

/// Failure while encoding, sending, receiving or decoding a message.
#[derive(Debug, Display, Error, From)]
pub enum ProtocolError {
    /// The connection failed or closed while sending or between messages.
    #[display("transport error: {_0}")]
    Transport(io::Error),

    /// The stream ended before the declared payload length was read.
    #[display("connection closed after {received} of {declared} payload bytes")]
    #[from(ignore)]
    Truncated { declared: u32, received: usize },

    /// A length prefix or outgoing payload exceeds `MAX_MESSAGE_SIZE`.
    #[display("message too large: {len} bytes")]
    #[from(ignore)]
    Oversized { len: usize },

    /// The payload is not a `{x, y}` object.
    #[display("malformed move payload: {_0}")]
    Malformed(serde_json::Error),

    /// A scalar announcement carried a value outside the protocol.
    #[display("unexpected scalar value {value}")]
    #[from(ignore)]
    UnknownScalar { value: u32 },
}

impl ProtocolError {
    /// True for errors where bytes arrived but did not form a valid message.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            ProtocolError::Truncated { .. }
                | ProtocolError::Oversized { .. }
                | ProtocolError::Malformed(_)
                | ProtocolError::UnknownScalar { .. }
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ProtocolError::Transport(_))
    }
}
