//! Paging policy: host-tunable limits applied before any query is built.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Upper bound on cursor token length, in hex characters.
pub const DEFAULT_MAX_CURSOR_LEN: usize = 8 * 1024;

/// Upper bound on rows per page.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 1_000;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid paging policy: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("paging policy field '{field}' must be greater than zero")]
    Zero { field: &'static str },
}

///
/// PagingPolicy
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagingPolicy {
    pub max_page_size: u32,
    pub max_cursor_len: usize,
}

impl PagingPolicy {
    /// Parse a policy from a flat TOML table; absent keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let policy: Self = toml::from_str(source)?;
        policy.validate()?;

        Ok(policy)
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(ConfigError::Zero {
                field: "max_page_size",
            });
        }
        if self.max_cursor_len == 0 {
            return Err(ConfigError::Zero {
                field: "max_cursor_len",
            });
        }

        Ok(())
    }
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            max_cursor_len: DEFAULT_MAX_CURSOR_LEN,
        }
    }
}

///
/// TESTS
///
