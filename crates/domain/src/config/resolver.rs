use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Smallest receive buffer that holds a classic UDP DNS message.
pub const MIN_RECEIVE_BUFFER: usize = 512;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Where every resolution starts (a.root-servers.net).
    #[serde(default = "default_root_server")]
    pub root_server: SocketAddr,

    /// Per send/receive timeout in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_receive_buffer_size")]
    pub receive_buffer_size: usize,

    /// Queries one `resolve` call may send, nested NS lookups included.
    #[serde(default = "default_max_referrals")]
    pub max_referrals: usize,

    #[serde(default = "default_max_cname_hops")]
    pub max_cname_hops: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_server: default_root_server(),
            query_timeout_ms: default_query_timeout_ms(),
            receive_buffer_size: default_receive_buffer_size(),
            max_referrals: default_max_referrals(),
            max_cname_hops: default_max_cname_hops(),
        }
    }
}

fn default_root_server() -> SocketAddr {
    SocketAddr::from(([198, 41, 0, 4], 53))
}

fn default_query_timeout_ms() -> u64 {
    5000
}

fn default_receive_buffer_size() -> usize {
    MIN_RECEIVE_BUFFER
}

fn default_max_referrals() -> usize {
    30
}

fn default_max_cname_hops() -> usize {
    10
}
