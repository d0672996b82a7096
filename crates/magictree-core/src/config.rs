//! Configuration for magictree.
//!
//! A configuration file is TOML:
//!
//! ```toml
//! read_limit = 4096
//!
//! [[signatures]]
//! parent = "text/plain"
//! identifier = "text/x-makefile"
//! extension = ".mk"
//! magic = "23 20 4d 61 6b 65"   # "# Make"
//!
//! [[signatures]]
//! identifier = "application/x-custom"
//! aliases = ["application/x-custom-data"]
//! offset = 4
//! magic = "CAFE D00D"
//! ```
//!
//! Each signature is attached, in file order, as the last child of
//! `parent` (default: the root). Later signatures may use earlier ones as
//! their parent.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detector::Signature;
use crate::error::RegistryError;
use crate::mime::OCTET_STREAM;
use crate::node::Node;

/// Bytes read from a reader or file when no limit is configured.
pub const DEFAULT_READ_LIMIT: u32 = 3072;

/// Errors loading or applying a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Signature #{index} has an empty identifier")]
    EmptyIdentifier { index: usize },

    #[error("Signature '{identifier}' has empty magic")]
    EmptyMagic { identifier: String },

    #[error("Signature '{identifier}' has invalid magic '{magic}'")]
    InvalidMagic {
        identifier: String,
        magic: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Bytes read from readers and files before detection.
    pub read_limit: u32,

    /// Extra formats, attached in order.
    pub signatures: Vec<SignatureConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_limit: DEFAULT_READ_LIMIT,
            signatures: Vec::new(),
        }
    }
}

/// A format recognised by a fixed byte sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SignatureConfig {
    /// Identifier of the node to attach under.
    #[serde(default = "default_parent")]
    pub parent: String,

    /// MIME identifier reported on a match.
    pub identifier: String,

    /// Preferred extension, with leading dot.
    #[serde(default)]
    pub extension: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    /// Byte position of `magic` in the input.
    #[serde(default)]
    pub offset: usize,

    /// Hex encoded bytes; whitespace between digits is ignored.
    pub magic: String,
}

fn default_parent() -> String {
    OCTET_STREAM.to_string()
}

impl SignatureConfig {
    /// Decoded `magic`.
    pub fn magic_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        let digits: String = self
            .magic
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if digits.is_empty() {
            return Err(ConfigError::EmptyMagic {
                identifier: self.identifier.clone(),
            });
        }
        decode_hex(&digits).map_err(|source| ConfigError::InvalidMagic {
            identifier: self.identifier.clone(),
            magic: self.magic.clone(),
            source,
        })
    }

    /// Build the tree node for this signature.
    pub fn to_node(&self) -> Result<Node, ConfigError> {
        let detector = Signature::new(self.offset, self.magic_bytes()?);
        Ok(Node::new(&self.identifier, &self.extension, detector).alias(&self.aliases))
    }
}

impl Config {
    /// Read, parse and validate `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            signatures = config.signatures.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every signature: non-empty identifier, decodable non-empty
    /// magic. Parents are only resolved when the signatures are applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, signature) in self.signatures.iter().enumerate() {
            if signature.identifier.trim().is_empty() {
                return Err(ConfigError::EmptyIdentifier { index });
            }
            signature.magic_bytes()?;
        }
        Ok(())
    }

    /// JSON Schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

/// `hex::decode` checks the length in bytes first, so a stray multi-byte
/// character would surface as `OddLength`; report it as what it is.
fn decode_hex(digits: &str) -> Result<Vec<u8>, hex::FromHexError> {
    if let Some((index, c)) = digits.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(hex::FromHexError::InvalidHexCharacter { c, index });
    }
    hex::decode(digits)
}

#[cfg(test)]
mod tests;
