// Blocking TCP client for a tic-tac-toe room.
//
// Mirrors the room's message order from one player's side:
// - `connect()` opens the socket and reads the role scalar.
// - Each half-turn: `next_turn()`, then either `play()` (own turn) or
//   `recv_opponent_move()` (other player's turn), then `recv_verdict()`.
//
// The client keeps no board of its own and does not enforce the order; a
// caller that reads out of order will decode the wrong message. Used by the
// integration tests and usable by any Rust front end.

use std::io::{BufReader, BufWriter};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use tictactoe_protocol::message::{recv_move, recv_role, recv_turn, recv_verdict, send_move};
use tictactoe_protocol::{Move, PlayerId, ProtocolError, Verdict};

/// One player's connection to a room.
pub struct RoomClient {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    player_id: PlayerId,
}

impl RoomClient {
    /// Connect and wait for the room to assign a seat. Blocks until a second
    /// player joins if this is the first connection of a pair.
    pub fn connect(addr: SocketAddr, read_timeout: Option<Duration>) -> Result<Self, ProtocolError> {
        Self::from_stream(TcpStream::connect(addr)?, read_timeout)
    }

    /// Wait for a seat on an already-connected stream. Connecting first and
    /// handing the stream over later lets a caller fix the pairing order.
    pub fn from_stream(
        stream: TcpStream,
        read_timeout: Option<Duration>,
    ) -> Result<Self, ProtocolError> {
        stream.set_read_timeout(read_timeout)?;
        let mut reader = BufReader::new(stream.try_clone()?);
        let writer = BufWriter::new(stream);
        let player_id = recv_role(&mut reader)?;
        Ok(Self {
            reader,
            writer,
            player_id,
        })
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Read the turn announcement for the next half-turn.
    pub fn next_turn(&mut self) -> Result<PlayerId, ProtocolError> {
        recv_turn(&mut self.reader)
    }

    /// Send this player's move.
    pub fn play(&mut self, mv: Move) -> Result<(), ProtocolError> {
        send_move(&mut self.writer, &mv)
    }

    /// Read the move the room relays from the other player.
    pub fn recv_opponent_move(&mut self) -> Result<Move, ProtocolError> {
        recv_move(&mut self.reader)
    }

    pub fn recv_verdict(&mut self) -> Result<Verdict, ProtocolError> {
        recv_verdict(&mut self.reader)
    }
}
