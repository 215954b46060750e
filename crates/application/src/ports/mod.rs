mod transport;

pub use transport::{DnsTransport, TransportConnector};
