use super::exchange::exchange;
use crate::ports::TransportConnector;
use iterdns_domain::{Message, RecordType, ResolutionError, ResolverConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Asks a single server one recursive question and hands back the whole
/// response.
pub struct LookupUseCase {
    connector: Arc<dyn TransportConnector>,
    receive_buffer_size: usize,
}

impl LookupUseCase {
    pub fn new(connector: Arc<dyn TransportConnector>, config: &ResolverConfig) -> Self {
        Self {
            connector,
            receive_buffer_size: config.receive_buffer_size,
        }
    }

    pub async fn execute(
        &self,
        server: SocketAddr,
        name: &str,
        rtype: RecordType,
    ) -> Result<Message, ResolutionError> {
        let query = Message::query(fastrand::u16(..), name, rtype, true)
            .map_err(ResolutionError::InvalidHostname)?;

        let response = exchange(
            self.connector.as_ref(),
            server,
            &query,
            self.receive_buffer_size,
        )
        .await?;

        info!(
            server = %server,
            name = %name,
            record_type = %rtype,
            rcode = response.header.response_code(),
            answers = response.answers.len(),
            "Lookup complete"
        );
        Ok(response)
    }
}
