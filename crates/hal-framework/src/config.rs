//! # Framework Configuration
//!
//! [`HalConfig`] is owned by the [`Registry`](crate::Registry) and fixed at startup.
//! It derives `Deserialize` so an application can embed it in its own config file;
//! [`HalConfig::from_env`] covers the common case of a single environment variable.

use crate::error::{HalError, HalResult};
use serde::Deserialize;

/// Environment variable read by [`HalConfig::from_env`].
pub const MAX_NESTING_ENV: &str = "HAL_MAX_NESTING";

const DEFAULT_MAX_NESTING: u32 = 64;

/// Settings shared by every render of a registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HalConfig {
    /// Hard ceiling on how many levels of embedded documents an unbounded render may nest.
    ///
    /// Requests for unbounded embedding against a cyclic embedding graph (A embeds B
    /// embeds A) would otherwise recurse forever. Exceeding the ceiling fails the
    /// render with [`HalError::NestingLimitExceeded`]. Requests with a finite `embed`
    /// depth are never held to it. `None` removes the ceiling.
    pub max_nesting: Option<u32>,
}

impl Default for HalConfig {
    fn default() -> Self {
        Self {
            max_nesting: Some(DEFAULT_MAX_NESTING),
        }
    }
}

impl HalConfig {
    /// Builds the config from `HAL_MAX_NESTING`, falling back to defaults when unset.
    ///
    /// Accepts a non-negative integer, or `none` / `unbounded` / `off` to disable the ceiling.
    pub fn from_env() -> HalResult<Self> {
        match std::env::var(MAX_NESTING_ENV) {
            Ok(raw) => Ok(Self {
                max_nesting: parse_max_nesting(&raw)?,
            }),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn with_max_nesting(mut self, max_nesting: Option<u32>) -> Self {
        self.max_nesting = max_nesting;
        self
    }
}

fn parse_max_nesting(raw: &str) -> HalResult<Option<u32>> {
    let trimmed = raw.trim();
    if ["none", "unbounded", "off"]
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
    {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| HalError::InvalidConfig {
            key: MAX_NESTING_ENV,
            value: raw.to_string(),
        })
}
