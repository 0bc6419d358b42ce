//! Block render dispatch
//!
//! Turns an ordered block list into page markup. Dispatch is an exhaustive
//! `match` over [`BlockData`], so each known block type has exactly one
//! component. Stored records that could not be read as a known block are
//! skipped and reported instead of failing the page.

pub mod components;
pub mod html;
pub mod wrapper;

use serde::Serialize;

use crate::config::RenderConfig;
use crate::core::{BlockData, BlockId, BlockType, ContentBlock};
use crate::document::StoredBlock;

pub use wrapper::{BlockWrapper, WidthTreatment, WrapperLayout};

/// One block's rendered output
#[derive(Debug, Clone)]
pub struct RenderedBlock {
    pub id: BlockId,
    pub block_type: BlockType,
    pub layout: WrapperLayout,
    pub html: String,
}

/// A stored record that produced no output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedBlock {
    pub id: Option<BlockId>,
    pub type_tag: Option<String>,
    pub reason: String,
}

/// Rendered page body
#[derive(Debug, Clone, Default)]
pub struct RenderedPage {
    /// All block markup in order
    pub html: String,
    pub blocks: Vec<RenderedBlock>,
    /// Unreadable records that were left out
    pub skipped: Vec<SkippedBlock>,
}

/// Renders blocks through their components and the shared wrapper
pub struct BlockRenderer {
    wrapper: BlockWrapper,
}

impl BlockRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            wrapper: BlockWrapper::new(config.include_block_ids),
        }
    }

    /// Render a block list in order
    pub fn render(&self, blocks: &[StoredBlock]) -> RenderedPage {
        let mut page = RenderedPage::default();

        for stored in blocks {
            match stored {
                StoredBlock::Known(block) if block.settings.hidden => {
                    tracing::debug!(block_id = %block.id, block_type = %block.block_type(), "skipping hidden block");
                }
                StoredBlock::Known(block) => {
                    let rendered = self.render_block(block);
                    page.html.push_str(&rendered.html);
                    page.blocks.push(rendered);
                }
                StoredBlock::Unknown(unknown) => {
                    tracing::warn!(
                        block_id = unknown.id.as_ref().map(BlockId::as_str).unwrap_or("<none>"),
                        block_type = unknown.type_tag.as_deref().unwrap_or("<none>"),
                        reason = %unknown.reason,
                        "no component for block, skipping"
                    );
                    page.skipped.push(SkippedBlock {
                        id: unknown.id.clone(),
                        type_tag: unknown.type_tag.clone(),
                        reason: unknown.reason.clone(),
                    });
                }
            }
        }

        page
    }

    /// Render a single known block, wrapped
    pub fn render_block(&self, block: &ContentBlock) -> RenderedBlock {
        let layout = WrapperLayout::for_block(block);
        let inner = render_component(&block.data);
        RenderedBlock {
            id: block.id.clone(),
            block_type: block.block_type(),
            html: self.wrapper.wrap(block, &layout, &inner),
            layout,
        }
    }
}

impl Default for BlockRenderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

/// Inner markup for a block payload
pub fn render_component(data: &BlockData) -> String {
    match data {
        BlockData::Hero(b) => components::hero(b),
        BlockData::Text(b) => components::text(b),
        BlockData::ImageText(b) => components::image_text(b),
        BlockData::Features(b) => components::features(b),
        BlockData::Services(b) => components::services(b),
        BlockData::Stats(b) => components::stats(b),
        BlockData::Testimonials(b) => components::testimonials(b),
        BlockData::Faq(b) => components::faq(b),
        BlockData::Cta(b) => components::cta(b),
        BlockData::ContactForm(b) => components::contact_form(b),
    }
}
