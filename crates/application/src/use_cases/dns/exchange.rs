use crate::ports::TransportConnector;
use iterdns_domain::{DomainError, Message, ResolutionError};
use std::net::SocketAddr;
use tracing::debug;

/// Sends `query` to `server` over a fresh transport and parses the reply.
///
/// The transport is dropped on return, whatever the outcome.
pub(crate) async fn exchange(
    connector: &dyn TransportConnector,
    server: SocketAddr,
    query: &Message,
    max_len: usize,
) -> Result<Message, ResolutionError> {
    let transport = connector.connect(server).await?;
    transport.send(query.as_bytes()).await?;
    let bytes = transport.receive(max_len).await?;

    let response = Message::parse(&bytes)?;
    if response.header.id != query.header.id {
        return Err(DomainError::IdMismatch {
            expected: query.header.id,
            actual: response.header.id,
        }
        .into());
    }

    debug!(
        server = %server,
        bytes = bytes.len(),
        answers = response.answers.len(),
        authority = response.authority.len(),
        additional = response.additional.len(),
        "Response received"
    );
    Ok(response)
}
