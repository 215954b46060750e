use async_trait::async_trait;
use iterdns_domain::TransportError;
use std::net::SocketAddr;

/// One exchange channel to a single server.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(&self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Waits for one datagram of at most `max_len` bytes.
    async fn receive(&self, max_len: usize) -> Result<Vec<u8>, TransportError>;
}

#[async_trait]
pub trait TransportConnector: Send + Sync {
    async fn connect(&self, server: SocketAddr) -> Result<Box<dyn DnsTransport>, TransportError>;
}
