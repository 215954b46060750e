mod logging;

use iterdns_domain::{CliOverrides, Config, ResolverConfig};
use std::time::Duration;

pub use logging::init_logging;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    Ok(config)
}

/// Upper bound for a whole `resolve`: every allowed query timing out.
pub fn overall_timeout(config: &ResolverConfig) -> Duration {
    let per_query = Duration::from_millis(config.query_timeout_ms);
    per_query.saturating_mul(config.max_referrals.min(u32::MAX as usize) as u32)
}
