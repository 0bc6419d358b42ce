//! Page Blocks - Content block core for the course site CMS
//!
//! This crate provides the typed block model and registry, the stored block
//! list with legacy migration, block rendering, contact page derivation and
//! the admin operations built on top of a document store.

pub mod admin;
pub mod categories;
pub mod config;
pub mod contact;
pub mod core;
pub mod document;
pub mod render;
pub mod security;
pub mod store;
mod tests;

// Re-export commonly used types
pub use categories::BlockCategory;
pub use crate::core::{BlockData, BlockDefinition, BlockId, BlockRegistry, BlockType, ContentBlock};
pub use document::{BlockList, StoredBlock};
pub use render::{BlockRenderer, RenderedPage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
