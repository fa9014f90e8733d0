//! Transport and session configuration.
//!
//! [`ConfigValue`] is the tagged "Configurable value" the wire protocol's
//! `Config` frame carries. [`SessionConfig`] wraps a `comm_type`-keyed map
//! of these values; it is built either programmatically or by
//! deserializing an external map (`serde_json`, `toml`, and so on) handed
//! in by the node layer that embeds this crate. This crate never reads a
//! file itself.

use std::collections::HashMap;

use gkc_errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Size in bytes of the on-wire `Configurable` union this type models: a
/// 1-byte tag followed by 31 bytes of payload.
pub const CONFIG_VALUE_WIRE_LEN: usize = 32;

/// A tagged configuration value: string (≤ 31 bytes), signed 64-bit
/// integer, double, or bool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ConfigValue {
    /// A UTF-8 string, at most 31 bytes once null-terminated on the wire.
    String(String),
    /// A signed 64-bit integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// A boolean.
    Bool(bool),
}

impl ConfigValue {
    /// Encodes this value into the 32-byte `Configurable` wire layout used
    /// only by link-layer config keys that must match the original
    /// fixed-size union; the primary [`ConfigValue`]/[`SessionConfig`] API
    /// does not otherwise touch this representation.
    pub fn to_wire32(&self) -> [u8; CONFIG_VALUE_WIRE_LEN] {
        let mut out = [0u8; CONFIG_VALUE_WIRE_LEN];
        match self {
            ConfigValue::String(s) => {
                out[0] = 0;
                let bytes = s.as_bytes();
                // Up to 31 bytes of string content fill the rest of the
                // region; shorter strings leave a trailing zero behind as
                // their null terminator, a 31-byte string has none and is
                // bounded by the region itself.
                let take = bytes.len().min(CONFIG_VALUE_WIRE_LEN - 1);
                out[1..1 + take].copy_from_slice(&bytes[..take]);
            }
            ConfigValue::Int(i) => {
                out[0] = 1;
                out[1..9].copy_from_slice(&i.to_le_bytes());
            }
            ConfigValue::Float(f) => {
                out[0] = 2;
                out[1..9].copy_from_slice(&f.to_le_bytes());
            }
            ConfigValue::Bool(b) => {
                out[0] = 3;
                out[1] = u8::from(*b);
            }
        }
        out
    }

    /// Decodes the 32-byte `Configurable` wire layout back into a tagged
    /// value. Returns `None` if the tag byte is unrecognized.
    pub fn from_wire32(bytes: &[u8; CONFIG_VALUE_WIRE_LEN]) -> Option<Self> {
        match bytes[0] {
            0 => {
                let region = &bytes[1..];
                let nul = region.iter().position(|&b| b == 0).unwrap_or(region.len());
                let s = String::from_utf8_lossy(&region[..nul]).into_owned();
                Some(ConfigValue::String(s))
            }
            1 => Some(ConfigValue::Int(i64::from_le_bytes(bytes[1..9].try_into().ok()?))),
            2 => Some(ConfigValue::Float(f64::from_le_bytes(bytes[1..9].try_into().ok()?))),
            3 => Some(ConfigValue::Bool(bytes[1] != 0)),
            _ => None,
        }
    }

    fn as_str(&self) -> Result<&str, ConfigError> {
        match self {
            ConfigValue::String(s) => Ok(s.as_str()),
            _ => Err(ConfigError::ConfigTypeMismatch {
                key: String::new(),
                reason: "expected a string".to_string(),
            }),
        }
    }

    fn as_int(&self) -> Result<i64, ConfigError> {
        match self {
            ConfigValue::Int(i) => Ok(*i),
            _ => Err(ConfigError::ConfigTypeMismatch {
                key: String::new(),
                reason: "expected an int".to_string(),
            }),
        }
    }

    fn as_float(&self) -> Result<f64, ConfigError> {
        match self {
            ConfigValue::Float(f) => Ok(*f),
            _ => Err(ConfigError::ConfigTypeMismatch {
                key: String::new(),
                reason: "expected a float".to_string(),
            }),
        }
    }

    fn as_bool(&self) -> Result<bool, ConfigError> {
        match self {
            ConfigValue::Bool(b) => Ok(*b),
            _ => Err(ConfigError::ConfigTypeMismatch {
                key: String::new(),
                reason: "expected a bool".to_string(),
            }),
        }
    }
}

/// A `comm_type`-keyed configuration map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    values: HashMap<String, ConfigValue>,
}

impl SessionConfig {
    /// Builds a config from an in-memory map.
    pub fn from_map(values: HashMap<String, ConfigValue>) -> Self {
        Self { values }
    }

    /// Parses a config from a JSON object of `{key: {"type": ..., "value": ...}}`
    /// entries, the shape the node layer's parameter loader hands in.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text)
            .map_err(|e| ConfigError::ConfigTypeMismatch { key: String::new(), reason: e.to_string() })
    }

    /// Serializes this config back to the same JSON shape [`Self::from_json`]
    /// reads, for callers that round-trip a config through a parameter store.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self)
            .map_err(|e| ConfigError::ConfigTypeMismatch { key: String::new(), reason: e.to_string() })
    }

    /// Inserts or overwrites a key.
    pub fn set(&mut self, key: impl Into<String>, value: ConfigValue) {
        self.values.insert(key.into(), value);
    }

    fn get(&self, key: &str) -> Result<&ConfigValue, ConfigError> {
        self.values.get(key).ok_or_else(|| ConfigError::ConfigMissing(key.to_string()))
    }

    /// `comm_type`: the name of the registered link implementation to use.
    pub fn comm_type(&self) -> Result<&str, ConfigError> {
        self.get_string("comm_type")
    }

    /// Reads a required string key.
    pub fn get_string(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key)?.as_str().map_err(|_| ConfigError::ConfigTypeMismatch {
            key: key.to_string(),
            reason: "expected a string".to_string(),
        })
    }

    /// Reads an optional string key.
    pub fn get_string_opt(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str().ok())
    }

    /// Reads a required integer key.
    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        self.get(key)?.as_int().map_err(|_| ConfigError::ConfigTypeMismatch {
            key: key.to_string(),
            reason: "expected an int".to_string(),
        })
    }

    /// Reads an integer key, falling back to `default` if absent.
    pub fn get_int_or(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        match self.values.get(key) {
            Some(v) => v.as_int().map_err(|_| ConfigError::ConfigTypeMismatch {
                key: key.to_string(),
                reason: "expected an int".to_string(),
            }),
            None => Ok(default),
        }
    }

    /// Reads a required float key.
    pub fn get_float(&self, key: &str) -> Result<f64, ConfigError> {
        self.get(key)?.as_float().map_err(|_| ConfigError::ConfigTypeMismatch {
            key: key.to_string(),
            reason: "expected a float".to_string(),
        })
    }

    /// Reads a bool key, falling back to `default` if absent.
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.values.get(key) {
            Some(v) => v.as_bool().map_err(|_| ConfigError::ConfigTypeMismatch {
                key: key.to_string(),
                reason: "expected a bool".to_string(),
            }),
            None => Ok(default),
        }
    }
}
