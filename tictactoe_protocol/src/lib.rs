// tictactoe_protocol — wire protocol between a tic-tac-toe room and its players.
//
// Shared by the room server (`tictactoe_room`) and any client. Has no
// dependency on board logic or sockets beyond `std::io::Read`/`Write`.
//
// Module overview:
// - `types.rs`:    `PlayerId`, `Verdict`, `Move`.
// - `framing.rs`:  4-byte big-endian scalars and length-delimited frames.
// - `message.rs`:  Typed send/receive helpers for roles, turns, verdicts and
//                  JSON move payloads.
// - `error.rs`:    `ProtocolError` (transport vs framing failures).
//
// Design decisions:
// - **JSON move payloads.** A move is `{"x": int, "y": int}`; any JSON
//   producer can talk to the room.
// - **No async runtime.** Everything is blocking `std::io`, one room per
//   thread.

pub mod error;
pub mod framing;
pub mod message;
pub mod types;

pub use error::ProtocolError;
pub use framing::{MAX_MESSAGE_SIZE, read_message, read_scalar, write_message, write_scalar};
pub use message::{
    decode_move, encode_move, recv_move, recv_role, recv_turn, recv_verdict, send_move,
    send_role, send_turn, send_verdict,
};
pub use types::{Move, PlayerId, Verdict};
