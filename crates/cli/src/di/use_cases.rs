use iterdns_application::ports::TransportConnector;
use iterdns_application::use_cases::{LookupUseCase, ResolveHostnameUseCase};
use iterdns_domain::Config;
use iterdns_infrastructure::dns::UdpConnector;
use std::sync::Arc;

pub struct UseCases {
    pub resolve: Arc<ResolveHostnameUseCase>,
    pub lookup: Arc<LookupUseCase>,
}

impl UseCases {
    pub fn new(config: &Config) -> Self {
        let connector: Arc<dyn TransportConnector> =
            Arc::new(UdpConnector::from_config(&config.resolver));

        Self {
            resolve: Arc::new(ResolveHostnameUseCase::new(
                connector.clone(),
                config.resolver.clone(),
            )),
            lookup: Arc::new(LookupUseCase::new(connector, &config.resolver)),
        }
    }
}
