use super::exchange::exchange;
use crate::ports::TransportConnector;
use futures::future::{BoxFuture, FutureExt};
use iterdns_domain::wire::same_name;
use iterdns_domain::{
    DomainName, HopKind, Message, RData, RecordType, ResolutionError, ResolverConfig,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Counters for one `resolve` call. Nested nameserver resolutions draw from
/// the same budget.
#[derive(Debug, Default)]
struct Budget {
    queries: usize,
    cname_hops: usize,
    /// Names whose resolution is in progress along the current chain.
    chain: Vec<String>,
}

/// Outcome of inspecting one response.
#[derive(Debug)]
enum Step {
    Done(Vec<Ipv4Addr>),
    Requery(SocketAddr),
    Rechase(String),
    /// Delegation without usable glue: NS hostnames in authority order.
    MissingGlue(Vec<String>),
}

/// Iterative A-record resolution, starting at the configured root server and
/// following referrals and CNAMEs one query at a time.
pub struct ResolveHostnameUseCase {
    connector: Arc<dyn TransportConnector>,
    config: ResolverConfig,
}

impl ResolveHostnameUseCase {
    pub fn new(connector: Arc<dyn TransportConnector>, config: ResolverConfig) -> Self {
        Self { connector, config }
    }

    /// IPv4 addresses of `hostname` in the order the final answer listed them.
    pub async fn resolve(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, ResolutionError> {
        DomainName::from_text(hostname).map_err(ResolutionError::InvalidHostname)?;

        let mut budget = Budget {
            chain: vec![hostname.to_string()],
            ..Budget::default()
        };
        let result = self.resolve_from_root(hostname.to_string(), &mut budget).await;

        match &result {
            Ok(addresses) => info!(
                hostname = %hostname,
                addresses = addresses.len(),
                queries = budget.queries,
                "Resolution complete"
            ),
            Err(e) => warn!(
                hostname = %hostname,
                error = %e,
                queries = budget.queries,
                "Resolution failed"
            ),
        }
        result
    }

    fn resolve_from_root<'a>(
        &'a self,
        target: String,
        budget: &'a mut Budget,
    ) -> BoxFuture<'a, Result<Vec<Ipv4Addr>, ResolutionError>> {
        async move {
            let mut server = self.config.root_server;
            let mut target = target;

            loop {
                let response = self.query(server, &target, budget).await?;

                match self.inspect(&response, &target, budget)? {
                    Step::Done(addresses) => return Ok(addresses),
                    Step::Requery(next) => {
                        debug!(server = %next, target = %target, "Following referral");
                        server = next;
                    }
                    Step::Rechase(next) => {
                        debug!(server = %server, from = %target, to = %next, "Chasing CNAME");
                        target = next;
                    }
                    Step::MissingGlue(nameservers) => {
                        server = self.resolve_nameserver(&nameservers, budget).await?;
                        debug!(server = %server, target = %target, "Following glueless referral");
                    }
                }
            }
        }
        .boxed()
    }

    async fn query(
        &self,
        server: SocketAddr,
        target: &str,
        budget: &mut Budget,
    ) -> Result<Message, ResolutionError> {
        if budget.queries >= self.config.max_referrals {
            return Err(ResolutionError::TooManyHops {
                limit: self.config.max_referrals,
                kind: HopKind::Referral,
            });
        }
        budget.queries += 1;

        let query = Message::query(fastrand::u16(..), target, RecordType::A, false)
            .map_err(ResolutionError::InvalidHostname)?;
        debug!(
            server = %server,
            target = %target,
            id = query.header.id,
            query = budget.queries,
            "Querying nameserver"
        );

        exchange(
            self.connector.as_ref(),
            server,
            &query,
            self.config.receive_buffer_size,
        )
        .await
    }

    fn inspect(
        &self,
        response: &Message,
        target: &str,
        budget: &mut Budget,
    ) -> Result<Step, ResolutionError> {
        if !response.answers.is_empty() {
            return self.inspect_answers(response, target, budget);
        }

        let mut nameservers = Vec::new();
        for record in &response.authority {
            if record.rtype != RecordType::NS {
                continue;
            }
            let Some(ns) = response.record_full_rdata_name(record)? else {
                continue;
            };

            for glue in response.records_of_domain_name(&ns)? {
                if let RData::A(ip) = glue.rdata {
                    debug!(nameserver = %ns, glue = %ip, "Glue found");
                    return Ok(Step::Requery(self.server_at(ip)));
                }
            }
            nameservers.push(ns);
        }

        if nameservers.is_empty() {
            Err(ResolutionError::NoGlueRecord {
                zone_ns: target.to_string(),
            })
        } else {
            Ok(Step::MissingGlue(nameservers))
        }
    }

    fn inspect_answers(
        &self,
        response: &Message,
        target: &str,
        budget: &mut Budget,
    ) -> Result<Step, ResolutionError> {
        let mut addresses = Vec::new();
        let mut chase = target.to_string();

        for record in &response.answers {
            match &record.rdata {
                RData::A(ip) => addresses.push(*ip),
                RData::Cname(_) => {
                    if !same_name(&response.record_full_name(record)?, &chase) {
                        continue;
                    }
                    if let Some(alias) = response.record_full_rdata_name(record)? {
                        budget.cname_hops += 1;
                        if budget.cname_hops > self.config.max_cname_hops {
                            return Err(ResolutionError::TooManyHops {
                                limit: self.config.max_cname_hops,
                                kind: HopKind::Cname,
                            });
                        }
                        chase = alias;
                    }
                }
                RData::Aaaa(_) | RData::Ns(_) => {}
            }
        }

        if !addresses.is_empty() {
            Ok(Step::Done(addresses))
        } else if chase != target {
            Ok(Step::Rechase(chase))
        } else {
            Err(ResolutionError::NoAnswer {
                name: target.to_string(),
            })
        }
    }

    /// Resolves the first nameserver hostname that yields an address,
    /// skipping names already being resolved further up the chain.
    async fn resolve_nameserver(
        &self,
        nameservers: &[String],
        budget: &mut Budget,
    ) -> Result<SocketAddr, ResolutionError> {
        for ns in nameservers {
            if budget.chain.iter().any(|pending| same_name(pending, ns)) {
                debug!(nameserver = %ns, "Nameserver already being resolved, skipping");
                continue;
            }

            debug!(nameserver = %ns, depth = budget.chain.len(), "Resolving glueless nameserver");
            budget.chain.push(ns.clone());
            let result = self.resolve_from_root(ns.clone(), budget).await;
            budget.chain.pop();

            match result {
                Ok(addresses) => {
                    if let Some(ip) = addresses.first() {
                        return Ok(self.server_at(*ip));
                    }
                }
                Err(e @ ResolutionError::TooManyHops { .. }) => return Err(e),
                Err(e) => {
                    debug!(nameserver = %ns, error = %e, "Nameserver resolution failed");
                }
            }
        }

        Err(ResolutionError::NoGlueRecord {
            zone_ns: nameservers.first().cloned().unwrap_or_default(),
        })
    }

    /// Delegated servers are reached on the same port as the root.
    fn server_at(&self, ip: Ipv4Addr) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(ip), self.config.root_server.port())
    }
}
