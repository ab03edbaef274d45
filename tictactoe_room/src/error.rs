// Error types for sessions and rooms.
//
// Nothing here is retried: a session error ends the game, and a room that
// sees one stops serving (after closing both player connections).

use std::io;

use derive_more::{Display, Error, From};
use tictactoe_protocol::ProtocolError;

/// A game could not continue.
#[derive(Debug, Display, Error, From)]
pub enum SessionError {
    #[display("protocol failure: {_0}")]
    Protocol(ProtocolError),
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        SessionError::Protocol(ProtocolError::Transport(err))
    }
}

/// A room stopped serving.
#[derive(Debug, Display, Error, From)]
pub enum RoomError {
    #[display("failed to bind room socket: {_0}")]
    #[from(ignore)]
    Bind(io::Error),

    #[display("failed to accept player connection: {_0}")]
    #[from(ignore)]
    Accept(io::Error),

    #[display("game aborted: {_0}")]
    Session(SessionError),
}
