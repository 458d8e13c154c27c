use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;
pub const DEFAULT_RESELLER_DOMAIN: &str = "pubmatic.com";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidatorConfig {
    pub fetch_timeout_ms: u64,
    pub max_concurrency: usize,
    pub reseller_domain: String,
    pub user_agent: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            reseller_domain: DEFAULT_RESELLER_DOMAIN.to_string(),
            user_agent: format!("schain-validator/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ValidatorConfig {
    /// Reads a JSON config file (missing keys fall back to defaults), then
    /// applies `SCHAIN_*` environment overrides.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let mut cfg = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p).map_err(|e| {
                    CoreError::Config(format!("cannot read {}: {}", p.display(), e))
                })?;
                serde_json::from_str::<ValidatorConfig>(&raw).map_err(|e| {
                    CoreError::Config(format!("invalid config {}: {}", p.display(), e))
                })?
            }
            None => ValidatorConfig::default(),
        };
        cfg.apply_env_overrides(|k| std::env::var(k).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> CoreResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SCHAIN_FETCH_TIMEOUT_MS") {
            self.fetch_timeout_ms = v.trim().parse().map_err(|_| {
                CoreError::Config(format!("SCHAIN_FETCH_TIMEOUT_MS is not a number: {}", v))
            })?;
        }
        if let Some(v) = lookup("SCHAIN_MAX_CONCURRENCY") {
            self.max_concurrency = v.trim().parse().map_err(|_| {
                CoreError::Config(format!("SCHAIN_MAX_CONCURRENCY is not a number: {}", v))
            })?;
        }
        if let Some(v) = lookup("SCHAIN_RESELLER_DOMAIN") {
            let v = v.trim();
            if !v.is_empty() {
                self.reseller_domain = v.to_ascii_lowercase();
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.fetch_timeout_ms == 0 {
            return Err(CoreError::Config(
                "fetch_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_concurrency == 0 {
            return Err(CoreError::Config(
                "max_concurrency must be greater than zero".to_string(),
            ));
        }
        if self.reseller_domain.trim().is_empty() {
            return Err(CoreError::Config(
                "reseller_domain must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
