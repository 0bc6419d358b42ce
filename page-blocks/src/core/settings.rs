//! Shared layout settings
//!
//! Every block carries the same set of layout options regardless of its type.
//! The renderer's wrapper turns them into presentation classes.

use serde::{Deserialize, Serialize};

/// Layout settings shared by all block types
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockSettings {
    /// Section background
    pub background: Background,
    /// Vertical padding
    pub padding: Padding,
    /// Width of the block's content column
    pub max_width: MaxWidth,
    /// Optional in-page anchor (`#id` target)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_id: Option<String>,
    /// Hidden blocks stay in the document but are not rendered
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl BlockSettings {
    /// Serialized field names
    pub const FIELDS: [&'static str; 5] = ["background", "padding", "maxWidth", "anchorId", "hidden"];

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_max_width(mut self, max_width: MaxWidth) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor_id = Some(anchor.into());
        self
    }
}

/// Section background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    White,
    Light,
    Dark,
    Primary,
    Accent,
}

impl Background {
    pub fn class(self) -> &'static str {
        match self {
            Background::White => "bg-white",
            Background::Light => "bg-slate-50",
            Background::Dark => "bg-slate-900 text-white",
            Background::Primary => "bg-primary text-primary-foreground",
            Background::Accent => "bg-accent text-accent-foreground",
        }
    }
}

/// Vertical padding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    None,
    Small,
    #[default]
    Medium,
    Large,
}

impl Padding {
    pub fn class(self) -> &'static str {
        match self {
            Padding::None => "py-0",
            Padding::Small => "py-8",
            Padding::Medium => "py-16",
            Padding::Large => "py-24",
        }
    }
}

/// Width of the content column inside the block container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxWidth {
    Narrow,
    Medium,
    #[default]
    Wide,
    Full,
}

impl MaxWidth {
    pub fn class(self) -> &'static str {
        match self {
            MaxWidth::Narrow => "max-w-3xl",
            MaxWidth::Medium => "max-w-4xl",
            MaxWidth::Wide => "max-w-5xl",
            MaxWidth::Full => "w-full",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_settings_fields_use_defaults() {
        let settings: BlockSettings = serde_json::from_str(r#"{"background":"dark"}"#).unwrap();
        assert_eq!(settings.background, Background::Dark);
        assert_eq!(settings.padding, Padding::Medium);
        assert_eq!(settings.max_width, MaxWidth::Wide);
        assert!(settings.anchor_id.is_none());
        assert!(!settings.hidden);
    }

    #[test]
    fn test_default_settings_serialize_compactly() {
        let json = serde_json::to_value(BlockSettings::default()).unwrap();
        assert!(json.get("anchorId").is_none());
        assert!(json.get("hidden").is_none());
        assert_eq!(json["maxWidth"], "wide");
    }

    #[test]
    fn test_field_names_match_serialized_keys() {
        let settings = BlockSettings {
            hidden: true,
            ..BlockSettings::default().with_anchor("kurser")
        };
        let json = serde_json::to_value(settings).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        let mut fields = BlockSettings::FIELDS.to_vec();
        keys.sort_unstable();
        fields.sort_unstable();
        assert_eq!(keys, fields);
    }
}
