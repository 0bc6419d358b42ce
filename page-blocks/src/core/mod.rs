//! Core block abstractions and types
//!
//! This module defines the block identifier, the typed block model, the shared
//! layout settings and the registry of block definitions that the rest of the
//! crate builds on.

pub mod block;
pub mod registry;
pub mod settings;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub use block::{BlockData, BlockError, BlockType, ContentBlock};
pub use registry::{BlockDefinition, BlockRegistry, RegistryError};
pub use settings::BlockSettings;

/// Unique identifier for a block
///
/// New ids are random UUID v4 strings. Ids read back from stored content are
/// kept verbatim, so older records with non-UUID ids still round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a new random block ID
    pub fn new() -> Self {
        BlockId(Uuid::new_v4().to_string())
    }

    /// Wrap an existing id string
    pub fn from_string(id: impl Into<String>) -> Self {
        BlockId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display language for admin-facing labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Sv,
    En,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sv" | "sv-se" => Ok(Locale::Sv),
            "en" | "en-gb" | "en-us" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_ids_are_unique_uuids() {
        let a = BlockId::new();
        let b = BlockId::new();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_block_id_serializes_as_plain_string() {
        let id = BlockId::from_string("block-1699-legacy");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"block-1699-legacy\"");

        let back: BlockId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("sv".parse::<Locale>().unwrap(), Locale::Sv);
        assert_eq!("EN-gb".parse::<Locale>().unwrap(), Locale::En);
        assert!("de".parse::<Locale>().is_err());
        assert_eq!(Locale::default(), Locale::Sv);
    }
}
