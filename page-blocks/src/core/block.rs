//! Typed content blocks
//!
//! A page is built from an ordered list of blocks. Each block has a stable id,
//! a type-specific payload and the shared layout settings. The payload is a
//! closed sum type keyed by the `type` tag, so adding a block type forces every
//! `match` over it (registry defaults, renderer dispatch) to be updated.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::settings::BlockSettings;
use super::BlockId;
use crate::contact::FormPreset;

/// Block type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    /// Full-width page header with image and calls to action
    Hero,
    /// Heading plus free text
    Text,
    /// Text next to an image
    ImageText,
    /// Grid of short selling points
    Features,
    /// Grid of service/course cards
    Services,
    /// Key figures
    Stats,
    /// Customer quotes
    Testimonials,
    /// Question and answer list
    Faq,
    /// Call to action banner
    Cta,
    /// Embedded contact form
    ContactForm,
}

impl BlockType {
    /// Every known block type, in registry order
    pub const ALL: [BlockType; 10] = [
        BlockType::Hero,
        BlockType::Text,
        BlockType::ImageText,
        BlockType::Features,
        BlockType::Services,
        BlockType::Stats,
        BlockType::Testimonials,
        BlockType::Faq,
        BlockType::Cta,
        BlockType::ContactForm,
    ];

    /// The stored `type` tag
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Hero => "hero",
            BlockType::Text => "text",
            BlockType::ImageText => "imageText",
            BlockType::Features => "features",
            BlockType::Services => "services",
            BlockType::Stats => "stats",
            BlockType::Testimonials => "testimonials",
            BlockType::Faq => "faq",
            BlockType::Cta => "cta",
            BlockType::ContactForm => "contactForm",
        }
    }

    /// Map a tag used by older stored content to its current type.
    ///
    /// Only the migration step consults this; regular loading treats these
    /// tags as unknown.
    pub fn from_legacy_tag(tag: &str) -> Option<BlockType> {
        match tag {
            "richText" => Some(BlockType::Text),
            "imageWithText" => Some(BlockType::ImageText),
            "callToAction" => Some(BlockType::Cta),
            "contact" => Some(BlockType::ContactForm),
            "faqs" => Some(BlockType::Faq),
            _ => None,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| BlockError::UnknownBlockType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Shared nested values
// ---------------------------------------------------------------------------

/// Reference to an uploaded media item
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    pub url: String,
    pub alt: String,
}

impl ImageRef {
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
        }
    }
}

/// Button or text link
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-type payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroBlock {
    pub title: String,
    pub subtitle: String,
    pub image: Option<ImageRef>,
    pub primary_cta: Option<Link>,
    pub secondary_cta: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextBlock {
    pub heading: Option<String>,
    /// Paragraphs are separated by blank lines
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageTextBlock {
    pub heading: String,
    pub body: String,
    pub image: Option<ImageRef>,
    pub image_position: ImagePosition,
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturesBlock {
    pub heading: String,
    pub intro: String,
    pub columns: u8,
    pub items: Vec<FeatureItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceCard {
    pub title: String,
    pub description: String,
    pub href: String,
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicesBlock {
    pub heading: String,
    pub intro: String,
    /// Service category slug the cards belong to, if any
    pub category: Option<String>,
    pub items: Vec<ServiceCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatItem {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsBlock {
    pub heading: String,
    pub items: Vec<StatItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialsBlock {
    pub heading: String,
    pub items: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqBlock {
    pub heading: String,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaBlock {
    pub heading: String,
    pub text: String,
    pub button: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFormBlock {
    pub heading: String,
    pub description: String,
    pub preset: FormPreset,
    /// Service category preselected in the form
    pub service: Option<String>,
}

/// Type-specific block payload, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockData {
    Hero(HeroBlock),
    Text(TextBlock),
    ImageText(ImageTextBlock),
    Features(FeaturesBlock),
    Services(ServicesBlock),
    Stats(StatsBlock),
    Testimonials(TestimonialsBlock),
    Faq(FaqBlock),
    Cta(CtaBlock),
    ContactForm(ContactFormBlock),
}

impl BlockData {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockData::Hero(_) => BlockType::Hero,
            BlockData::Text(_) => BlockType::Text,
            BlockData::ImageText(_) => BlockType::ImageText,
            BlockData::Features(_) => BlockType::Features,
            BlockData::Services(_) => BlockType::Services,
            BlockData::Stats(_) => BlockType::Stats,
            BlockData::Testimonials(_) => BlockType::Testimonials,
            BlockData::Faq(_) => BlockType::Faq,
            BlockData::Cta(_) => BlockType::Cta,
            BlockData::ContactForm(_) => BlockType::ContactForm,
        }
    }

    /// Main heading of the block, used for admin outlines
    pub fn heading(&self) -> Option<&str> {
        let heading = match self {
            BlockData::Hero(b) => b.title.as_str(),
            BlockData::Text(b) => b.heading.as_deref().unwrap_or(""),
            BlockData::ImageText(b) => &b.heading,
            BlockData::Features(b) => &b.heading,
            BlockData::Services(b) => &b.heading,
            BlockData::Stats(b) => &b.heading,
            BlockData::Testimonials(b) => &b.heading,
            BlockData::Faq(b) => &b.heading,
            BlockData::Cta(b) => &b.heading,
            BlockData::ContactForm(b) => &b.heading,
        };
        if heading.is_empty() {
            None
        } else {
            Some(heading)
        }
    }
}

// ---------------------------------------------------------------------------
// ContentBlock
// ---------------------------------------------------------------------------

/// A block instance as stored in a page or post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: BlockId,
    #[serde(flatten)]
    pub data: BlockData,
    #[serde(default)]
    pub settings: BlockSettings,
}

impl ContentBlock {
    /// Create a block with a fresh id and default settings
    pub fn new(data: BlockData) -> Self {
        Self {
            id: BlockId::new(),
            data,
            settings: BlockSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: BlockSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn block_type(&self) -> BlockType {
        self.data.block_type()
    }

    /// Copy this block under a new id.
    ///
    /// Nested item lists are owned, so the copy can be edited without touching
    /// the source.
    pub fn duplicate(&self) -> Self {
        Self {
            id: BlockId::new(),
            data: self.data.clone(),
            settings: self.settings.clone(),
        }
    }

    /// Apply a field-level partial update coming from an editing panel.
    ///
    /// `patch` is a JSON object of top-level fields to replace. `settings` is
    /// merged key by key. `id` and `type` cannot be changed. On error the
    /// block is left untouched.
    pub fn apply_patch(&mut self, patch: &Value) -> Result<(), BlockError> {
        let patch = patch
            .as_object()
            .ok_or_else(|| BlockError::InvalidPatch("patch must be a JSON object".into()))?;

        for key in ["id", "type"] {
            if patch.contains_key(key) {
                return Err(BlockError::ImmutableField(key.to_string()));
            }
        }

        let mut current = serde_json::to_value(&*self)?;
        let target = current
            .as_object_mut()
            .ok_or_else(|| BlockError::Serialization("block did not serialize to an object".into()))?;

        for (key, value) in patch {
            if key == "settings" {
                let changes = value
                    .as_object()
                    .ok_or_else(|| BlockError::InvalidPatch("settings must be an object".into()))?;
                let settings = target
                    .entry("settings")
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Some(settings) = settings.as_object_mut() {
                    for (k, v) in changes {
                        if !BlockSettings::FIELDS.contains(&k.as_str()) {
                            return Err(BlockError::InvalidPatch(format!(
                                "unknown settings field '{}'",
                                k
                            )));
                        }
                        settings.insert(k.clone(), v.clone());
                    }
                }
            } else if !target.contains_key(key) {
                return Err(BlockError::InvalidPatch(format!(
                    "unknown field '{}' for block type {}",
                    key,
                    self.block_type()
                )));
            } else {
                target.insert(key.clone(), value.clone());
            }
        }

        let updated: ContentBlock =
            serde_json::from_value(current).map_err(|e| BlockError::InvalidPatch(e.to_string()))?;
        *self = updated;
        Ok(())
    }
}

/// Block errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    /// No block type with this tag
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    /// No block with this id in the list
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    /// Attempted to change `id` or `type`
    #[error("Field cannot be changed: {0}")]
    ImmutableField(String),

    /// Patch was malformed or produced an invalid block
    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    /// Target position outside the list
    #[error("Index {index} out of bounds for {len} blocks")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BlockError {
    fn from(error: serde_json::Error) -> Self {
        BlockError::Serialization(error.to_string())
    }
}
