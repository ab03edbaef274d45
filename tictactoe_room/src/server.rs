// TCP listener and pairing loop for a single room.
//
// A room binds once and then serves games back to back:
//
//   accept (player one) -> accept (player two) -> GameSession::run -> close both
//
// The listening socket is built with `socket2` so SO_REUSEADDR is set before
// bind and the backlog is exactly 2 (one pending pair). A restarted room can
// then rebind its port while old player connections sit in TIME_WAIT.
//
// Accepts are strictly sequential and blocking. While a game is in progress
// the listener is not serviced, so further clients wait in the OS backlog.
// The listening socket and port are reused for every game; only the player
// connections are recycled.
//
// There is no concurrency inside a room. Running several rooms in one
// process means one thread per room (`start_room`), each with its own
// listener and no shared state.
//
// Errors are not retried. Connections are shut down after every session
// whether it finished or failed, and a failed session ends the room.

use std::io;
use std::net::{IpAddr, SocketAddr, TcpListener};
use std::thread;

use socket2::{Domain, Protocol, Socket, Type};
use tracing::{error, info, info_span, instrument};

use crate::address::AddressResolver;
use crate::error::RoomError;
use crate::session::{GameOutcome, GameSession};

/// Listen backlog for a room: one waiting pair at most.
pub const ROOM_BACKLOG: i32 = 2;

/// Configuration for starting a room.
#[derive(Clone, Debug)]
pub struct RoomConfig {
    /// Room number, used only to label log output.
    pub index: usize,
    /// Bind address. `None` asks the resolver.
    pub host: Option<IpAddr>,
    /// Bind port. 0 lets the OS pick one.
    pub port: u16,
    pub backlog: i32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            index: 0,
            host: None,
            port: 0,
            backlog: ROOM_BACKLOG,
        }
    }
}

/// A bound room, ready to pair players.
pub struct RoomServer {
    index: usize,
    listener: TcpListener,
    games_played: u64,
}

impl RoomServer {
    /// Bind the room's listening socket.
    pub fn bind(config: &RoomConfig, resolver: &dyn AddressResolver) -> Result<Self, RoomError> {
        let host = match config.host {
            Some(host) => host,
            None => resolver.resolve_bind_address().map_err(RoomError::Bind)?,
        };
        let listener =
            listen(SocketAddr::new(host, config.port), config.backlog).map_err(RoomError::Bind)?;

        let room = Self {
            index: config.index,
            listener,
            games_played: 0,
        };
        let addr = room.local_addr().map_err(RoomError::Bind)?;
        info!(room = room.index, "waiting for connections");
        info!(room = room.index, host = %addr.ip(), port = addr.port(), "room bound");
        Ok(room)
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    /// Serve games forever. Returns only when a game or accept fails.
    pub fn run(&mut self) -> Result<(), RoomError> {
        loop {
            self.play_one()?;
        }
    }

    /// Serve exactly `games` games, then return.
    pub fn serve(&mut self, games: u64) -> Result<(), RoomError> {
        for _ in 0..games {
            self.play_one()?;
        }
        Ok(())
    }

    /// Pair the next two connections and play one game to completion.
    #[instrument(skip(self), fields(room = self.index, game = self.games_played + 1))]
    pub fn play_one(&mut self) -> Result<GameOutcome, RoomError> {
        let (first, first_addr) = self.listener.accept().map_err(RoomError::Accept)?;
        info!(addr = %first_addr.ip(), "player 1 connected");
        let (second, second_addr) = self.listener.accept().map_err(RoomError::Accept)?;
        info!(addr = %second_addr.ip(), "player 2 connected");

        info!("preparing new game");
        let mut session = GameSession::new(first, second)?;
        let result = session.run();
        session.close();
        self.games_played += 1;

        match result {
            Ok(outcome) => {
                info!(winner = ?outcome.winner, "game finished");
                Ok(outcome)
            }
            Err(e) => {
                error!(error = %e, "game aborted");
                Err(e.into())
            }
        }
    }
}

/// Handle to a room running on its own thread.
pub struct RoomHandle {
    thread: thread::JoinHandle<Result<(), RoomError>>,
}

impl RoomHandle {
    /// Wait for the room thread to finish and return its result.
    pub fn join(self) -> Result<(), RoomError> {
        match self.thread.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }
}

/// Bind a room and run it on a background thread. `games` bounds the number
/// of games served; `None` serves forever. Returns the bound address so
/// callers using port 0 can find the room.
pub fn start_room(
    config: RoomConfig,
    resolver: &dyn AddressResolver,
    games: Option<u64>,
) -> Result<(RoomHandle, SocketAddr), RoomError> {
    let mut room = RoomServer::bind(&config, resolver)?;
    let addr = room.local_addr().map_err(RoomError::Bind)?;
    let index = config.index;

    let thread = thread::Builder::new()
        .name(format!("room-{index}"))
        .spawn(move || {
            let _span = info_span!("room", index).entered();
            match games {
                Some(n) => room.serve(n),
                None => room.run(),
            }
        })
        .map_err(RoomError::Bind)?;

    Ok((RoomHandle { thread }, addr))
}

/// Open a listening TCP socket with address reuse and the given backlog.
fn listen(addr: SocketAddr, backlog: i32) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(backlog)?;
    Ok(socket.into())
}
