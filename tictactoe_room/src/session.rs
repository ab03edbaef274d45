// One game between two connected players.
//
// `GameSession` owns a fresh board and both player connections for the
// lifetime of a single game, and drives the turn protocol as an explicit
// state machine:
//
//   AssigningRoles
//     -> AwaitingMove(current)
//     -> BroadcastingMove { actor, mv }
//     -> Evaluating { actor }
//     -> AwaitingMove(actor.other()) | Terminal(winner)
//
// Message order per half-turn:
// 1. Turn scalar (the player about to move) to both connections.
// 2. One move read from the acting connection only, applied to the board.
// 3. The same move relayed to the other connection.
// 4. The turn passes to the other player, the board is evaluated, and the
//    verdict scalar goes to both connections.
//
// A full board with no line is not terminal: the next half-turn begins with
// another turn announcement and waits for a move. Moves are never refused.
// One that lands off the board changes nothing but is still relayed and
// followed by a verdict.
//
// All I/O is blocking. Errors are returned to the caller (`server.rs`), which
// closes both connections; nothing is retried here. Each connection is split
// into a buffered reader and a buffered writer via `try_clone`.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, SocketAddr, TcpStream};

use tictactoe_protocol::message::{recv_move, send_move, send_role, send_turn, send_verdict};
use tictactoe_protocol::{Move, PlayerId, Verdict};
use tracing::{debug, info, instrument, warn};

use crate::board::ClassicBoard;
use crate::error::SessionError;
use crate::evaluate::evaluate;

/// Where a session is in its protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    AssigningRoles,
    AwaitingMove(PlayerId),
    BroadcastingMove { actor: PlayerId, mv: Move },
    Evaluating { actor: PlayerId },
    Terminal(PlayerId),
}

/// Result of a game that reached a terminal verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: PlayerId,
    pub half_turns: u64,
}

struct Peer {
    addr: Option<SocketAddr>,
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Peer {
    fn new(stream: TcpStream) -> Result<Self, SessionError> {
        let reader = BufReader::new(stream.try_clone()?);
        let writer = BufWriter::new(stream.try_clone()?);
        Ok(Self {
            addr: stream.peer_addr().ok(),
            stream,
            reader,
            writer,
        })
    }
}

/// A single game between the players on two connections.
pub struct GameSession {
    board: ClassicBoard,
    one: Peer,
    two: Peer,
    state: SessionState,
    half_turns: u64,
}

impl GameSession {
    /// Take ownership of two connections. `first` plays as `PlayerId::One`.
    pub fn new(first: TcpStream, second: TcpStream) -> Result<Self, SessionError> {
        Ok(Self {
            board: ClassicBoard::new(),
            one: Peer::new(first)?,
            two: Peer::new(second)?,
            state: SessionState::AssigningRoles,
            half_turns: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn board(&self) -> &ClassicBoard {
        &self.board
    }

    /// Completed half-turns so far.
    pub fn half_turns(&self) -> u64 {
        self.half_turns
    }

    /// Drive the session until a player wins.
    #[instrument(skip(self), fields(one = ?self.one.addr, two = ?self.two.addr))]
    pub fn run(&mut self) -> Result<GameOutcome, SessionError> {
        loop {
            if let SessionState::Terminal(winner) = self.step()? {
                let outcome = GameOutcome {
                    winner,
                    half_turns: self.half_turns,
                };
                info!(?winner, half_turns = self.half_turns, "game over");
                debug!("final board:\n{}", self.board);
                return Ok(outcome);
            }
        }
    }

    /// Perform the work of the current state and move to the next one.
    /// Stepping a terminal session is a no-op.
    pub fn step(&mut self) -> Result<SessionState, SessionError> {
        let next = match self.state {
            SessionState::AssigningRoles => {
                send_role(&mut self.one.writer, PlayerId::One)?;
                send_role(&mut self.two.writer, PlayerId::Two)?;
                SessionState::AwaitingMove(PlayerId::One)
            }
            SessionState::AwaitingMove(current) => {
                send_turn(&mut self.one.writer, current)?;
                send_turn(&mut self.two.writer, current)?;

                let mv = recv_move(&mut self.peer_mut(current).reader)?;
                debug!(player = ?current, x = mv.x, y = mv.y, "move received");
                if self.board.mark(mv, current).is_none() {
                    warn!(
                        player = ?current,
                        x = mv.x,
                        y = mv.y,
                        "move is off the board, ignored"
                    );
                }
                SessionState::BroadcastingMove { actor: current, mv }
            }
            SessionState::BroadcastingMove { actor, mv } => {
                send_move(&mut self.peer_mut(actor.other()).writer, &mv)?;
                SessionState::Evaluating { actor }
            }
            SessionState::Evaluating { actor } => {
                self.half_turns = self.half_turns.saturating_add(1);
                let current = actor.other();
                let verdict = evaluate(&self.board);
                send_verdict(&mut self.one.writer, verdict)?;
                send_verdict(&mut self.two.writer, verdict)?;

                match verdict {
                    Verdict::NoWinner => {
                        if self.board.is_full() {
                            debug!(
                                half_turns = self.half_turns,
                                "board full without a line, play continues"
                            );
                        }
                        SessionState::AwaitingMove(current)
                    }
                    Verdict::Win(winner) => SessionState::Terminal(winner),
                }
            }
            SessionState::Terminal(winner) => SessionState::Terminal(winner),
        };
        self.state = next;
        Ok(next)
    }

    /// Shut down both connections. Safe to call after a failed `run`.
    pub fn close(&mut self) {
        for peer in [&self.one, &self.two] {
            if let Err(e) = peer.stream.shutdown(Shutdown::Both) {
                // Already-closed sockets report NotConnected here.
                if e.kind() != std::io::ErrorKind::NotConnected {
                    warn!(addr = ?peer.addr, error = %e, "failed to shut down connection");
                }
            }
        }
    }

    fn peer_mut(&mut self, player: PlayerId) -> &mut Peer {
        match player {
            PlayerId::One => &mut self.one,
            PlayerId::Two => &mut self.two,
        }
    }
}
