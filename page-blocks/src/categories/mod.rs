//! Block categories and classification
//!
//! Categories group block types in the admin block picker.

use serde::{Deserialize, Serialize};

use crate::core::Locale;

/// Block category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockCategory {
    /// Page structure (hero sections)
    Layout,
    /// Text and structured information
    Content,
    /// Image-led blocks
    Media,
    /// Social proof (testimonials, figures)
    Trust,
    /// Blocks that ask the visitor to act
    Conversion,
}

impl BlockCategory {
    pub const ALL: [BlockCategory; 5] = [
        BlockCategory::Layout,
        BlockCategory::Content,
        BlockCategory::Media,
        BlockCategory::Trust,
        BlockCategory::Conversion,
    ];

    /// Get a human-readable name for the category
    pub fn display_name(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (BlockCategory::Layout, Locale::Sv) => "Layout",
            (BlockCategory::Layout, Locale::En) => "Layout",
            (BlockCategory::Content, Locale::Sv) => "Innehåll",
            (BlockCategory::Content, Locale::En) => "Content",
            (BlockCategory::Media, Locale::Sv) => "Media",
            (BlockCategory::Media, Locale::En) => "Media",
            (BlockCategory::Trust, Locale::Sv) => "Förtroende",
            (BlockCategory::Trust, Locale::En) => "Trust",
            (BlockCategory::Conversion, Locale::Sv) => "Konvertering",
            (BlockCategory::Conversion, Locale::En) => "Conversion",
        }
    }
}

impl std::fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name(Locale::En))
    }
}
