//! Shared layout wrapper
//!
//! Every rendered block is placed in the same section/container/content
//! structure. Background, padding, content width and anchor come from the
//! block's settings. The container width comes from the block type: hero
//! sections get the wide container, every other block the standard one.

use crate::core::settings::BlockSettings;
use crate::core::{BlockType, ContentBlock};

use super::html::escape_html;

/// Outer container width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthTreatment {
    Standard,
    Wide,
}

impl WidthTreatment {
    pub fn for_type(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Hero => WidthTreatment::Wide,
            _ => WidthTreatment::Standard,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            WidthTreatment::Standard => "max-w-6xl",
            WidthTreatment::Wide => "max-w-7xl",
        }
    }
}

/// Resolved layout for one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperLayout {
    pub block_type: BlockType,
    pub background_class: &'static str,
    pub padding_class: &'static str,
    pub container: WidthTreatment,
    pub content_width_class: &'static str,
    pub anchor_id: Option<String>,
}

impl WrapperLayout {
    pub fn new(block_type: BlockType, settings: &BlockSettings) -> Self {
        Self {
            block_type,
            background_class: settings.background.class(),
            padding_class: settings.padding.class(),
            container: WidthTreatment::for_type(block_type),
            content_width_class: settings.max_width.class(),
            anchor_id: settings.anchor_id.as_deref().and_then(sanitize_anchor),
        }
    }

    pub fn for_block(block: &ContentBlock) -> Self {
        Self::new(block.block_type(), &block.settings)
    }

    /// Classes on the outer `<section>`
    pub fn section_class(&self) -> String {
        format!(
            "block block-{} {} {}",
            self.block_type, self.background_class, self.padding_class
        )
    }

    /// Classes on the container inside the section
    pub fn container_class(&self) -> String {
        format!("mx-auto px-4 {}", self.container.class())
    }
}

/// Wraps rendered block markup in the shared layout
pub struct BlockWrapper {
    include_block_ids: bool,
}

impl BlockWrapper {
    pub fn new(include_block_ids: bool) -> Self {
        Self { include_block_ids }
    }

    pub fn wrap(&self, block: &ContentBlock, layout: &WrapperLayout, inner: &str) -> String {
        let mut attrs = String::new();
        if let Some(anchor) = &layout.anchor_id {
            attrs.push_str(&format!(" id=\"{}\"", escape_html(anchor)));
        }
        attrs.push_str(&format!(" class=\"{}\"", layout.section_class()));
        if self.include_block_ids {
            attrs.push_str(&format!(
                " data-block-id=\"{}\" data-block-type=\"{}\"",
                escape_html(block.id.as_str()),
                layout.block_type
            ));
        }

        format!(
            "<section{}><div class=\"{}\"><div class=\"mx-auto {}\">{}</div></div></section>",
            attrs,
            layout.container_class(),
            layout.content_width_class,
            inner
        )
    }
}

/// Turn an editor-entered anchor into a usable element id
///
/// Lowercases, folds å/ä/ö, turns whitespace into `-` and drops anything
/// else outside `[a-z0-9_-]`. Returns `None` when nothing is left.
pub fn sanitize_anchor(anchor: &str) -> Option<String> {
    let mut out = String::with_capacity(anchor.len());
    for c in anchor.trim().trim_start_matches('#').chars() {
        match c.to_lowercase().next().unwrap_or(c) {
            c @ ('a'..='z' | '0'..='9' | '-' | '_') => out.push(c),
            'å' | 'ä' => out.push('a'),
            'ö' => out.push('o'),
            c if c.is_whitespace() && !out.ends_with('-') => out.push('-'),
            _ => {}
        }
    }
    let out = out.trim_matches('-').to_string();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}
