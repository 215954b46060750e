//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). The TC bit is not inspected and
//! there is no TCP fallback.

use async_trait::async_trait;
use iterdns_application::ports::{DnsTransport, TransportConnector};
use iterdns_domain::{ResolverConfig, TransportError};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// A UDP socket connected to one server. Replies from any other source are
/// filtered by the OS.
pub struct UdpTransport {
    server_addr: SocketAddr,
    socket: UdpSocket,
    timeout: Duration,
}

impl UdpTransport {
    pub async fn connect(
        server_addr: SocketAddr,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr = if server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| TransportError::Bind {
                server: server_addr.to_string(),
                message: e.to_string(),
            })?;
        socket
            .connect(server_addr)
            .await
            .map_err(|e| TransportError::Connect {
                server: server_addr.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            server_addr,
            socket,
            timeout,
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn timed_out(&self, operation: &str) -> TransportError {
        warn!(
            server = %self.server_addr,
            timeout_ms = self.timeout.as_millis() as u64,
            operation,
            "UDP exchange timed out"
        );
        TransportError::Timeout {
            server: self.server_addr.to_string(),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(&self, bytes: &[u8]) -> Result<(), TransportError> {
        let bytes_sent = tokio::time::timeout(self.timeout, self.socket.send(bytes))
            .await
            .map_err(|_| self.timed_out("send"))?
            .map_err(|e| TransportError::Send {
                server: self.server_addr.to_string(),
                message: e.to_string(),
            })?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );
        Ok(())
    }

    async fn receive(&self, max_len: usize) -> Result<Vec<u8>, TransportError> {
        let mut recv_buf = vec![0u8; max_len];

        let bytes_received = tokio::time::timeout(self.timeout, self.socket.recv(&mut recv_buf))
            .await
            .map_err(|_| self.timed_out("receive"))?
            .map_err(|e| TransportError::Receive {
                server: self.server_addr.to_string(),
                message: e.to_string(),
            })?;

        recv_buf.truncate(bytes_received);

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );
        Ok(recv_buf)
    }
}

/// Opens one [`UdpTransport`] per exchange.
#[derive(Debug, Clone)]
pub struct UdpConnector {
    timeout: Duration,
}

impl UdpConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(Duration::from_millis(config.query_timeout_ms))
    }
}

#[async_trait]
impl TransportConnector for UdpConnector {
    async fn connect(&self, server: SocketAddr) -> Result<Box<dyn DnsTransport>, TransportError> {
        let transport = UdpTransport::connect(server, self.timeout).await?;
        Ok(Box::new(transport))
    }
}
