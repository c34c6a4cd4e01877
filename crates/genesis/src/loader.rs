//! Genesis overlay loading.
//!
//! An overlay file only lists the fields it changes. Loading serializes the
//! defaults into a key-value tree, merges the parsed file on top of it and
//! deserializes the result back into a [`Genesis`]:
//!
//! - tables are merged key by key, recursively
//! - scalars and arrays in the file replace the default value
//! - keys that do not exist in the genesis layout are rejected
//!
//! Files ending in `.json` are read as JSON, everything else as TOML.
//!
//! TOML integers stop at `i64::MAX`. Fork heights may therefore also be given
//! as decimal strings, which is the only way to write
//! [`UNSCHEDULED_HEIGHT`](crate::UNSCHEDULED_HEIGHT) in TOML:
//!
//! ```toml
//! [blockchain]
//! sumatraHeight = "18446744073709551615"
//! ```
//!
//! Amount and address fields are always strings.
//!
//! ```toml
//! [blockchain]
//! blockGasLimit = 30000000
//! blockInterval = "5s"
//! pacificHeight = 0
//!
//! [account.initBalances]
//! "0x68db92a6a78a39dcaff1745da9e89e230ef49d3d" = "1000000000000000000"
//!
//! [[poll.delegates]]
//! operatorAddr = "0x68db92a6a78a39dcaff1745da9e89e230ef49d3d"
//! votes = "1000000000000000000"
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::genesis::Genesis;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

impl Genesis {
    /// Load a genesis overlay on top of the defaults.
    ///
    /// An empty `path` returns [`Genesis::default`]. The result is validated
    /// before it is returned.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use meridian_genesis::Genesis;
    ///
    /// let genesis = Genesis::load("genesis.toml")?;
    /// println!("genesis hash: {}", genesis.hash());
    /// ```
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            debug!("No genesis file given, using defaults");
            return Ok(Self::default());
        }

        info!("Loading genesis from {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let genesis = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        info!(
            "Genesis loaded: hash={}, delegates={}, initial balances={}",
            genesis.hash(),
            genesis.poll.delegates.len(),
            genesis.account.init_balance_map.len()
        );
        Ok(genesis)
    }

    /// Apply a TOML overlay to the defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let overlay: toml::Value = toml::from_str(content)?;
        Self::from_overlay(serde_json::to_value(overlay)?)
    }

    /// Apply a JSON overlay to the defaults.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        Self::from_overlay(serde_json::from_str(content)?)
    }

    fn from_overlay(overlay: Value) -> ConfigResult<Self> {
        let mut merged = serde_json::to_value(Self::default())?;
        merge(&mut merged, overlay);
        debug!("Genesis overlay merged, mapping onto genesis layout");

        let genesis: Genesis = serde_json::from_value(merged).map_err(ConfigError::Shape)?;
        genesis.validate()?;
        Ok(genesis)
    }
}

/// Recursively merges `overlay` into `base`; overlay values win.
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
