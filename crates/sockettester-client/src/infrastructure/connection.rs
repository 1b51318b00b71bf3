//! TCP connection to the peer under test.
//!
//! The host name is resolved once and only the *first* resolved address is
//! tried.  There is no fallback to other addresses, no retry and no timeout:
//! if the peer is not reachable the tester should say so immediately.

use std::net::SocketAddr;

use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{lookup_host, TcpStream};
use tracing::debug;

use crate::error::TesterError;

/// Resolves `host` and returns its first address with `port` applied.
///
/// `host` may be a DNS name or an IP literal.
///
/// # Errors
///
/// - [`TesterError::Resolution`] if the resolver fails.
/// - [`TesterError::NoAddress`] if the resolver returns an empty list.
pub async fn resolve_peer(host: &str, port: u16) -> Result<SocketAddr, TesterError> {
    let mut addrs = lookup_host((host, port))
        .await
        .map_err(|source| TesterError::Resolution {
            host: host.to_string(),
            source,
        })?;

    let addr = addrs.next().ok_or_else(|| TesterError::NoAddress {
        host: host.to_string(),
    })?;
    debug!("resolved {host} to {addr}");
    Ok(addr)
}

/// An established connection, already split into independent halves.
///
/// The sender owns `write_half` and the receiver owns `read_half`; they
/// operate on opposite directions of the stream and never need a lock.
pub struct PeerConnection {
    /// The address actually connected to.
    pub peer_addr: SocketAddr,
    /// Read half of the TCP stream.
    pub read_half: OwnedReadHalf,
    /// Write half of the TCP stream.
    ///
    /// Dropping it shuts down the write direction (the peer reads EOF).
    pub write_half: OwnedWriteHalf,
}

impl PeerConnection {
    /// Resolves `host` and opens a TCP connection to its first address.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`resolve_peer`], or [`TesterError::Connect`] if
    /// the connection is refused or the address is unreachable.
    pub async fn connect(host: &str, port: u16) -> Result<Self, TesterError> {
        let addr = resolve_peer(host, port).await?;
        Self::connect_addr(addr).await
    }

    /// Opens a TCP connection to an already resolved address.
    ///
    /// # Errors
    ///
    /// Returns [`TesterError::Connect`] if the connection cannot be
    /// established.
    pub async fn connect_addr(addr: SocketAddr) -> Result<Self, TesterError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|source| TesterError::Connect { addr, source })?;

        // Split into independent read and write halves so we can pass each to
        // a separate async task without shared ownership.
        let (read_half, write_half) = stream.into_split();

        Ok(Self {
            peer_addr: addr,
            read_half,
            write_half,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
