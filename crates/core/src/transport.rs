//! UDP transport for encoded OSC packets.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

/// Resolves the configured destination strings into a socket address.
///
/// The port must parse as a 16-bit integer; the address may be a
/// dotted-decimal IP or a resolvable host name.
pub fn resolve_destination(address: &str, port: &str) -> Result<SocketAddr, SendError> {
    let port: u16 = port
        .trim()
        .parse()
        .map_err(|_| SendError::InvalidPort(port.to_string()))?;

    (address, port)
        .to_socket_addrs()
        .map_err(|e| SendError::UnresolvableAddress(format!("{}: {}", address, e)))?
        .next()
        .ok_or_else(|| SendError::UnresolvableAddress(address.to_string()))
}

/// A UDP sender bound to an ephemeral local port. One packet per send,
/// no retries: a failure is surfaced once to the caller.
pub struct OscTransport {
    socket: UdpSocket,
}

impl OscTransport {
    pub fn new() -> io::Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        Ok(OscTransport { socket })
    }

    pub fn send(&self, packet: &[u8], dest: SocketAddr) -> Result<(), SendError> {
        self.socket
            .send_to(packet, dest)
            .map_err(|e| SendError::Transport(e.to_string()))?;
        log::debug!("Sent {} byte OSC packet to {}", packet.len(), dest);
        Ok(())
    }
}

/// Send error types, split between validation failures (the packet is never
/// built) and transport failures (the packet was built but not delivered).
#[derive(Debug)]
pub enum SendError {
    InvalidPort(String),
    UnresolvableAddress(String),
    EmptyAddress,
    Transport(String),
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::InvalidPort(port) => write!(f, "Invalid port number: {}", port),
            SendError::UnresolvableAddress(addr) => {
                write!(f, "Cannot resolve destination address: {}", addr)
            }
            SendError::EmptyAddress => {
                write!(f, "The message has no usable OSC address pattern")
            }
            SendError::Transport(msg) => write!(f, "Failed to send OSC message: {}", msg),
        }
    }
}

impl std::error::Error for SendError {}
