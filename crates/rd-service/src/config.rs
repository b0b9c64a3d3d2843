//! Service configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use rd_cache::DEFAULT_TTL;

use crate::{ServiceError, ServiceResult};

/// Environment variable overriding [`ServiceConfig::cache_ttl`], in seconds.
pub const CACHE_TTL_ENV: &str = "PROXIMITY_CACHE_TTL_SECS";

/// Tunables for [`ProximityService`](crate::ProximityService).
///
/// Deserializes from e.g. `{"cache_ttl_secs": 120}`; missing fields keep
/// their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Lifetime of a cached nearest-unit answer.  Default: 300 s.
    #[serde(rename = "cache_ttl_secs", deserialize_with = "secs")]
    pub cache_ttl: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { cache_ttl: DEFAULT_TTL }
    }
}

impl ServiceConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> ServiceResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ServiceResult<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(CACHE_TTL_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ServiceError::Config(format!("{CACHE_TTL_ENV}={raw:?} is not a whole number of seconds"))
            })?;
            config.cache_ttl = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn secs<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
    u64::deserialize(d).map(Duration::from_secs)
}
