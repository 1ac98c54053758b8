//! Declarative pipeline configuration
//!
//! A pipeline is described by an ordered list of [`StepSpec`]s. Each spec
//! names a step kind and carries a [`ConfigMap`], the raw string-keyed JSON
//! object the step's settings are parsed from. Byte-valued entries (keys and
//! IVs) are either plain strings, used as their UTF-8 bytes, or a one-entry
//! object `{"hex": "..."}` / `{"base64": "..."}` for binary material.

use crate::error::ConfigError;
use crate::validators::require_config_has_key;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::path::Path;
use zeroize::Zeroizing;

/// Raw configuration of a single step
pub type ConfigMap = Map<String, Value>;

/// Read a string entry
pub(crate) fn config_str<'a>(config: &'a ConfigMap, key: &str) -> Result<&'a str, ConfigError> {
    require_config_has_key(config, key)?
        .as_str()
        .ok_or_else(|| ConfigError::invalid_value(key, "expected a string"))
}

/// Read a byte-valued entry
pub(crate) fn config_bytes(config: &ConfigMap, key: &str) -> Result<Zeroizing<Vec<u8>>, ConfigError> {
    let bytes = match require_config_has_key(config, key)? {
        Value::String(text) => text.as_bytes().to_vec(),
        Value::Object(encoded) if encoded.len() == 1 => match encoded.iter().next() {
            Some((encoding, Value::String(text))) => decode_config_bytes(key, encoding, text)?,
            _ => return Err(ConfigError::invalid_value(key, "encoded value must be a string")),
        },
        _ => {
            return Err(ConfigError::invalid_value(
                key,
                r#"expected a string, {"hex": ...} or {"base64": ...}"#,
            ));
        }
    };
    Ok(Zeroizing::new(bytes))
}

fn decode_config_bytes(key: &str, encoding: &str, text: &str) -> Result<Vec<u8>, ConfigError> {
    match encoding {
        "hex" => hex::decode(text).map_err(|e| ConfigError::invalid_value(key, format!("bad hex: {e}"))),
        "base64" => STANDARD
            .decode(text)
            .map_err(|e| ConfigError::invalid_value(key, format!("bad base64: {e}"))),
        other => Err(ConfigError::invalid_value(
            key,
            format!("unknown byte encoding '{other}'"),
        )),
    }
}

/// Settings of an encryption step
///
/// `key` is the shared secret key, `secret` the IV. Key material is zeroed
/// on drop and never shown by `Debug`.
#[derive(Clone)]
pub struct CipherConfig {
    /// Cipher name, e.g. `"AES-256-CBC"`
    pub cipher: String,
    /// Shared secret key
    pub key: Zeroizing<Vec<u8>>,
    /// Initialization vector
    pub secret: Zeroizing<Vec<u8>>,
}

impl CipherConfig {
    /// Create a cipher configuration
    pub fn new(cipher: impl Into<String>, key: impl AsRef<[u8]>, secret: impl AsRef<[u8]>) -> Self {
        Self {
            cipher: cipher.into(),
            key: Zeroizing::new(key.as_ref().to_vec()),
            secret: Zeroizing::new(secret.as_ref().to_vec()),
        }
    }

    /// Parse from a step's raw config
    ///
    /// Requires the entries `type`, `key` and `secret`. Only checks their
    /// presence and shape; cipher support and IV length are checked when
    /// the step is built.
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingConfigKey` or `ConfigError::InvalidConfigValue`.
    pub fn from_map(config: &ConfigMap) -> Result<Self, ConfigError> {
        for key in ["type", "key", "secret"] {
            require_config_has_key(config, key)?;
        }
        Ok(Self {
            cipher: config_str(config, "type")?.to_string(),
            key: config_bytes(config, "key")?,
            secret: config_bytes(config, "secret")?,
        })
    }
}

impl fmt::Debug for CipherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherConfig")
            .field("cipher", &self.cipher)
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .field("secret", &format_args!("<{} bytes>", self.secret.len()))
            .finish()
    }
}

impl From<CipherConfig> for ConfigMap {
    fn from(config: CipherConfig) -> Self {
        let mut map = ConfigMap::new();
        map.insert("type".into(), Value::String(config.cipher));
        map.insert("key".into(), json!({ "hex": hex::encode(&*config.key) }));
        map.insert("secret".into(), json!({ "hex": hex::encode(&*config.secret) }));
        map
    }
}

/// Settings of a signing step
#[derive(Clone)]
pub struct HmacConfig {
    /// Hash algorithm name, e.g. `"sha256"`
    pub algorithm: String,
    /// HMAC key
    pub key: Zeroizing<Vec<u8>>,
}

impl HmacConfig {
    /// Create an HMAC configuration
    pub fn new(algorithm: impl Into<String>, key: impl AsRef<[u8]>) -> Self {
        Self {
            algorithm: algorithm.into(),
            key: Zeroizing::new(key.as_ref().to_vec()),
        }
    }

    /// Parse from a step's raw config, requiring `type` and `key`
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingConfigKey` or `ConfigError::InvalidConfigValue`.
    pub fn from_map(config: &ConfigMap) -> Result<Self, ConfigError> {
        for key in ["type", "key"] {
            require_config_has_key(config, key)?;
        }
        Ok(Self {
            algorithm: config_str(config, "type")?.to_string(),
            key: config_bytes(config, "key")?,
        })
    }
}

impl fmt::Debug for HmacConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacConfig")
            .field("algorithm", &self.algorithm)
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .finish()
    }
}

impl From<HmacConfig> for ConfigMap {
    fn from(config: HmacConfig) -> Self {
        let mut map = ConfigMap::new();
        map.insert("type".into(), Value::String(config.algorithm));
        map.insert("key".into(), json!({ "hex": hex::encode(&*config.key) }));
        map
    }
}

/// Kind of step a spec builds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// JSON encoding
    Json,
    /// Symmetric encryption
    #[serde(alias = "encrypt")]
    Encrypted,
    /// HMAC signature
    #[serde(alias = "sign")]
    Signed,
    /// Base64 transport encoding
    #[serde(alias = "base64")]
    AsciiSafe,
}

impl StepKind {
    /// Canonical name, as written in pipeline definitions
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Encrypted => "encrypted",
            Self::Signed => "signed",
            Self::AsciiSafe => "ascii_safe",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a pipeline definition
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepSpec {
    /// Step kind
    #[serde(rename = "step")]
    pub kind: StepKind,
    /// Raw step configuration
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub config: ConfigMap,
}

impl StepSpec {
    /// Spec with an explicit raw config
    #[must_use]
    pub fn new(kind: StepKind, config: ConfigMap) -> Self {
        Self { kind, config }
    }

    /// JSON step
    #[must_use]
    pub fn json() -> Self {
        Self::new(StepKind::Json, ConfigMap::new())
    }

    /// Encryption step
    #[must_use]
    pub fn encrypted(config: CipherConfig) -> Self {
        Self::new(StepKind::Encrypted, config.into())
    }

    /// Signing step
    #[must_use]
    pub fn signed(config: HmacConfig) -> Self {
        Self::new(StepKind::Signed, config.into())
    }

    /// Base64 step
    #[must_use]
    pub fn ascii_safe() -> Self {
        Self::new(StepKind::AsciiSafe, ConfigMap::new())
    }
}

impl fmt::Debug for StepSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepSpec")
            .field("kind", &self.kind)
            .field("config_keys", &self.config.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Ordered list of step specs, loadable from JSON
///
/// ```json
/// [
///   {"step": "json"},
///   {"step": "encrypted", "config": {"type": "AES-256-CBC", "key": "...", "secret": "..."}},
///   {"step": "signed", "config": {"type": "sha256", "key": "..."}},
///   {"step": "ascii_safe"}
/// ]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineDefinition {
    /// Steps in transmit order
    pub steps: Vec<StepSpec>,
}

impl PipelineDefinition {
    /// Wrap an ordered list of specs
    #[must_use]
    pub fn new(steps: Vec<StepSpec>) -> Self {
        Self { steps }
    }

    /// Parse a definition from JSON text
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidDefinition` if the text is not a valid definition.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::InvalidDefinition {
            reason: e.to_string(),
        })
    }

    /// Load a definition from a JSON file
    ///
    /// # Errors
    ///
    /// `ConfigError::DefinitionIo` if the file cannot be read,
    /// `ConfigError::InvalidDefinition` if its contents are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::DefinitionIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loading pipeline definition");
        Self::from_json_str(&text)
    }
}
