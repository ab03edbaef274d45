// CLI entry point for the tic-tac-toe room server.
//
// Starts one or more independent rooms, each on its own thread with its own
// listening socket, and waits for them. A room only stops if a game fails;
// the others keep serving.
//
// Usage:
//   room [OPTIONS]
//     --rooms <N>     Number of rooms (default: 1)
//     --host <IP>     Bind address (default: discovered local address)
//     --port <PORT>   First port; room i uses PORT+i (default: 0, OS-assigned)
//     --games <N>     Stop each room after N games (default: unbounded)
//
// Log verbosity follows RUST_LOG (default: info).

use std::net::IpAddr;
use std::process::ExitCode;

use clap::Parser;
use tictactoe_room::address::{AddressResolver, FixedAddress, SystemResolver};
use tictactoe_room::server::{RoomConfig, start_room};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Two-player tic-tac-toe room server
#[derive(Parser, Debug)]
#[command(name = "room", version, about, long_about = None)]
struct Cli {
    /// Number of independent rooms to open
    #[arg(long, default_value_t = 1)]
    rooms: usize,

    /// Address to bind; skips local address discovery
    #[arg(long)]
    host: Option<IpAddr>,

    /// First port to bind; 0 lets the OS pick a port per room
    #[arg(long, default_value_t = 0)]
    port: u16,

    /// Stop each room after this many games
    #[arg(long)]
    games: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let resolver: Box<dyn AddressResolver> = match cli.host {
        Some(host) => Box::new(FixedAddress(host)),
        None => Box::new(SystemResolver),
    };
    // Resolve once so every room binds the same interface.
    let host = match resolver.resolve_bind_address() {
        Ok(host) => host,
        Err(e) => {
            error!(error = %e, "could not determine a bind address");
            return ExitCode::FAILURE;
        }
    };

    let mut handles = Vec::with_capacity(cli.rooms);
    for index in 0..cli.rooms {
        let port = match cli.port {
            0 => 0,
            base => match u16::try_from(index).ok().and_then(|i| base.checked_add(i)) {
                Some(port) => port,
                None => {
                    error!(room = index, "port range exhausted");
                    return ExitCode::FAILURE;
                }
            },
        };
        let config = RoomConfig {
            index,
            host: Some(host),
            port,
            ..RoomConfig::default()
        };
        match start_room(config, resolver.as_ref(), cli.games) {
            Ok((handle, addr)) => {
                info!(room = index, %addr, "room started");
                handles.push((index, handle));
            }
            Err(e) => {
                error!(room = index, error = %e, "failed to start room");
                return ExitCode::FAILURE;
            }
        }
    }

    let mut failed = false;
    for (index, handle) in handles {
        match handle.join() {
            Ok(()) => info!(room = index, "room closed"),
            Err(e) => {
                error!(room = index, error = %e, "room stopped");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
