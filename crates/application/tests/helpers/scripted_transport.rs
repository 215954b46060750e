#![allow(dead_code)]

use async_trait::async_trait;
use iterdns_application::ports::{DnsTransport, TransportConnector};
use iterdns_domain::{Message, TransportError};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub enum Reply {
    /// Response bytes; the query ID is written into the first two bytes.
    Packet(Vec<u8>),
    /// Response bytes whose ID is deliberately off by one.
    WrongId(Vec<u8>),
    /// Bytes returned exactly as given.
    Raw(Vec<u8>),
    Fail(TransportError),
}

/// A query the resolver sent, as seen by the scripted network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentQuery {
    pub server: SocketAddr,
    pub qname: String,
    pub qtype: u16,
    pub recursion_desired: bool,
}

#[derive(Default)]
struct Script {
    replies: HashMap<(SocketAddr, String), Reply>,
    sent: Vec<SentQuery>,
}

/// In-memory network: replies are keyed by server address and query name.
/// Unscripted queries time out.
#[derive(Clone, Default)]
pub struct ScriptedConnector {
    script: Arc<Mutex<Script>>,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, server: SocketAddr, qname: &str, reply: Reply) -> &Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .insert((server, qname.to_ascii_lowercase()), reply);
        self
    }

    pub fn sent(&self) -> Vec<SentQuery> {
        self.script.lock().unwrap().sent.clone()
    }

    pub fn servers(&self) -> Vec<SocketAddr> {
        self.sent().into_iter().map(|q| q.server).collect()
    }

    pub fn qnames(&self) -> Vec<String> {
        self.sent().into_iter().map(|q| q.qname).collect()
    }
}

#[async_trait]
impl TransportConnector for ScriptedConnector {
    async fn connect(&self, server: SocketAddr) -> Result<Box<dyn DnsTransport>, TransportError> {
        Ok(Box::new(ScriptedTransport {
            server,
            script: Arc::clone(&self.script),
            pending: Mutex::new(None),
        }))
    }
}

struct ScriptedTransport {
    server: SocketAddr,
    script: Arc<Mutex<Script>>,
    pending: Mutex<Option<Result<Vec<u8>, TransportError>>>,
}

#[async_trait]
impl DnsTransport for ScriptedTransport {
    async fn send(&self, bytes: &[u8]) -> Result<(), TransportError> {
        let query = Message::parse(bytes).expect("resolver sent an unparseable query");
        let question = &query.questions[0];
        let qname = question
            .name
            .resolve_full_text(bytes)
            .expect("query name resolves")
            .to_ascii_lowercase();

        let mut script = self.script.lock().unwrap();
        script.sent.push(SentQuery {
            server: self.server,
            qname: qname.clone(),
            qtype: question.qtype,
            recursion_desired: query.header.recursion_desired(),
        });

        let id = query.header.id;
        let reply = match script.replies.get(&(self.server, qname)) {
            Some(Reply::Packet(bytes)) => Ok(with_id(bytes, id)),
            Some(Reply::WrongId(bytes)) => Ok(with_id(bytes, id.wrapping_add(1))),
            Some(Reply::Raw(bytes)) => Ok(bytes.clone()),
            Some(Reply::Fail(e)) => Err(e.clone()),
            None => Err(TransportError::Timeout {
                server: self.server.to_string(),
            }),
        };
        *self.pending.lock().unwrap() = Some(reply);
        Ok(())
    }

    async fn receive(&self, max_len: usize) -> Result<Vec<u8>, TransportError> {
        let reply = self.pending.lock().unwrap().take();
        match reply {
            Some(Ok(mut bytes)) => {
                bytes.truncate(max_len);
                Ok(bytes)
            }
            Some(Err(e)) => Err(e),
            None => Err(TransportError::Receive {
                server: self.server.to_string(),
                message: "receive before send".to_string(),
            }),
        }
    }
}

fn with_id(bytes: &[u8], id: u16) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out[..2].copy_from_slice(&id.to_be_bytes());
    out
}
