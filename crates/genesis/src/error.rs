//! Genesis configuration error types

use alloy_primitives::B256;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, validating or reading a genesis config
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the overlay file
    #[error("Failed to read genesis file at {path}: {source}")]
    FileRead {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a TOML overlay
    #[error("Failed to parse TOML genesis: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to parse a JSON overlay
    #[error("Failed to parse JSON genesis: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The merged overlay does not map onto the genesis layout
    #[error("Genesis overlay does not match the genesis layout: {0}")]
    Shape(#[source] serde_json::Error),

    /// A decimal amount string is not a non-negative integer
    #[error("Invalid amount for {field}: {value:?}")]
    InvalidAmount {
        /// Config entry holding the amount
        field: String,
        /// Rejected string
        value: String,
    },

    /// An address string is malformed
    #[error("Invalid address for {field}: {value:?}")]
    InvalidAddress {
        /// Config entry holding the address
        field: String,
        /// Rejected string
        value: String,
    },

    /// A hex encoded byte string is malformed
    #[error("Invalid hex for {field}")]
    InvalidHex {
        /// Config entry holding the bytes
        field: String,
    },

    /// A floating point constant is negative or not finite
    #[error("Invalid {field}: must be finite and non-negative, got {value}")]
    InvalidFloat {
        /// Config entry holding the constant
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// A structural parameter is out of range
    #[error("Invalid {field}: {reason}")]
    InvalidParameter {
        /// Config entry
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Two initial balance entries refer to the same account
    #[error("Duplicate initial balance account: {0}")]
    DuplicateAccount(String),

    /// Aggregated result of the validation pass
    #[error("Invalid genesis config: {0}")]
    Invalid(ValidationErrors),

    /// A peer computed a different genesis fingerprint
    #[error("Genesis hash mismatch: local={local}, remote={remote}")]
    GenesisMismatch {
        /// Our fingerprint
        local: B256,
        /// The peer's fingerprint
        remote: B256,
    },
}

/// Every defect found by a single validation pass.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<ConfigError>);

impl ValidationErrors {
    pub(crate) fn push(&mut self, error: ConfigError) {
        self.0.push(error);
    }

    /// Number of defects.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no defect was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the individual defects.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.0.iter()
    }

    /// Records the error of `result`, if any.
    pub(crate) fn check<T>(&mut self, result: ConfigResult<T>) {
        if let Err(e) = result {
            self.push(e);
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} defect(s)", self.0.len())?;
        for (i, error) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}

/// Result type for genesis operations
pub type ConfigResult<T> = Result<T, ConfigError>;
