// tictactoe_room — two-player tic-tac-toe room server.
//
// A room listens on one TCP port, pairs the next two connections, referees a
// single game between them over the `tictactoe_protocol` wire format, closes
// both connections, and waits for the next pair.
//
// Module overview:
// - `board.rs`:     N×N board of cells; `ClassicBoard` is 3×3.
// - `evaluate.rs`:  Win detection (rows, columns, diagonals).
// - `session.rs`:   `GameSession` — one game's turn state machine over two
//                   connections.
// - `server.rs`:    `RoomServer` — bind, accept pairs, run sessions, loop.
//                   `start_room` runs a room on its own thread.
// - `address.rs`:   Bind address discovery behind `AddressResolver`.
// - `client.rs`:    Blocking `RoomClient` for the player side.
// - `error.rs`:     `SessionError`, `RoomError`.
//
// The room can run as a standalone binary (`main.rs`, one thread per room)
// or be embedded via the library API.

pub mod address;
pub mod board;
pub mod client;
pub mod error;
pub mod evaluate;
pub mod server;
pub mod session;

pub use address::{AddressResolver, FixedAddress, SystemResolver};
pub use board::{Board, Cell, ClassicBoard};
pub use client::RoomClient;
pub use error::{RoomError, SessionError};
pub use evaluate::evaluate;
pub use server::{RoomConfig, RoomHandle, RoomServer, start_room};
pub use session::{GameOutcome, GameSession, SessionState};
