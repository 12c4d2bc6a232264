//! C8 — ambient configuration, read from the environment.
//!
//! No config-file format is mandated; every knob has a sane default so the
//! gateway runs out of the box in a dev environment and is fully
//! overridable in a real deployment.

use std::env;
use std::time::Duration;

use xgw_ring::RingPaths;

/// Runtime configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Directory the three ring files live under.
    pub spool_dir: String,
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// HMAC secret used to sign/verify bearer JWTs.
    pub jwt_secret: String,
    /// Lifetime of an issued bearer token.
    pub jwt_ttl: Duration,
}

impl GatewayConfig {
    /// Reads configuration from the environment, falling back to
    /// development-friendly defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            spool_dir: env::var("XGW_SPOOL_DIR").unwrap_or_else(|_| "/tmp/xgw-spool".to_string()),
            bind_addr: env::var("XGW_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            jwt_secret: env::var("XGW_JWT_SECRET")
                .unwrap_or_else(|_| "dev-only-insecure-secret".to_string()),
            jwt_ttl: Duration::from_secs(
                env::var("XGW_JWT_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
        }
    }

    pub fn ring_paths(&self) -> RingPaths {
        RingPaths::under(&self.spool_dir)
    }
}
