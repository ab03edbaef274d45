// Choosing the local address a room binds to.
//
// Rooms advertise a host/port pair for players on the same network, so they
// bind to a routable interface rather than loopback. `SystemResolver` asks
// for the machine's hostname and resolves it; if that fails or lands on a
// loopback address, it connects a UDP socket towards a public host and reads
// back the local address the OS picked for that route. Connecting a UDP
// socket sends no packets.
//
// Tests and the `--host` flag use `FixedAddress` to skip discovery entirely.

use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs, UdpSocket};

use tracing::{debug, warn};

/// Public host used only to select an outbound interface.
pub const PROBE_TARGET: &str = "8.8.8.8:80";

/// Source of the address a room binds to.
pub trait AddressResolver {
    fn resolve_bind_address(&self) -> io::Result<IpAddr>;
}

/// A caller-chosen address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedAddress(pub IpAddr);

impl AddressResolver for FixedAddress {
    fn resolve_bind_address(&self) -> io::Result<IpAddr> {
        Ok(self.0)
    }
}

/// Hostname lookup with a UDP-route fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemResolver;

impl AddressResolver for SystemResolver {
    fn resolve_bind_address(&self) -> io::Result<IpAddr> {
        match hostname_address() {
            Ok(addr) if !addr.is_loopback() => {
                debug!(%addr, "resolved bind address from hostname");
                return Ok(addr);
            }
            Ok(addr) => debug!(%addr, "hostname resolves to loopback, probing route"),
            Err(e) => warn!(error = %e, "hostname lookup failed, probing route"),
        }
        let addr = probe_route_address(PROBE_TARGET)?;
        debug!(%addr, "resolved bind address from outbound route");
        Ok(addr)
    }
}

/// Resolve the machine's hostname to its first IPv4 address.
fn hostname_address() -> io::Result<IpAddr> {
    let name = local_hostname()?;
    (name.as_str(), 0)
        .to_socket_addrs()?
        .map(|sa| sa.ip())
        .find(IpAddr::is_ipv4)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("hostname {name} has no IPv4 address"),
            )
        })
}

fn local_hostname() -> io::Result<String> {
    hostname::get()?.into_string().map_err(|name| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("hostname {name:?} is not valid UTF-8"),
        )
    })
}

/// Local address the OS would use to reach `target`.
pub fn probe_route_address(target: &str) -> io::Result<IpAddr> {
    let socket = UdpSocket::bind(SocketAddr::from(([0, 0, 0, 0], 0)))?;
    socket.connect(target)?;
    Ok(socket.local_addr()?.ip())
}
