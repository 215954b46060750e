pub mod transport;

pub use transport::{UdpConnector, UdpTransport};
