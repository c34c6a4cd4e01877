//! Genesis timestamp service.
//!
//! Some subsystems need the agreed genesis time without holding the whole
//! genesis. They share a [`GenesisClock`] instead: it is committed once,
//! early at startup, and read-only afterwards.
//!
//! # Example
//!
//! ```rust
//! use meridian_genesis::GenesisClock;
//! use std::sync::Arc;
//!
//! let clock = Arc::new(GenesisClock::new());
//! assert_eq!(clock.timestamp(), 0);
//!
//! assert!(clock.set(100));
//! assert!(!clock.set(200));
//! assert_eq!(clock.timestamp(), 100);
//! ```

use crate::genesis::Genesis;
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

/// Set-once holder of the genesis timestamp.
#[derive(Debug, Default)]
pub struct GenesisClock {
    timestamp: OnceCell<i64>,
}

impl GenesisClock {
    /// Creates an unset clock.
    pub const fn new() -> Self {
        Self {
            timestamp: OnceCell::new(),
        }
    }

    /// Creates a clock committed to the genesis block timestamp.
    pub fn from_genesis(genesis: &Genesis) -> Self {
        let clock = Self::new();
        clock.set(genesis.blockchain.timestamp);
        clock
    }

    /// Commits `timestamp` if the clock is still unset.
    ///
    /// Returns `true` for the single caller whose value was committed. Every
    /// other call, concurrent or later, is a no-op returning `false`.
    pub fn set(&self, timestamp: i64) -> bool {
        match self.timestamp.set(timestamp) {
            Ok(()) => {
                debug!("Genesis timestamp set to {}", timestamp);
                true
            }
            Err(_) => {
                if self.timestamp() != timestamp {
                    warn!(
                        "Ignoring genesis timestamp {}, already set to {}",
                        timestamp,
                        self.timestamp()
                    );
                }
                false
            }
        }
    }

    /// The committed timestamp, or 0 if it was never set.
    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.timestamp.get().copied().unwrap_or(0)
    }

    /// Whether a timestamp has been committed.
    pub fn is_set(&self) -> bool {
        self.timestamp.get().is_some()
    }
}
