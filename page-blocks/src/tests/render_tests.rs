//! Tests for render dispatch and the layout wrapper

#[cfg(test)]
mod render_tests {
    use serde_json::json;

    use crate::config::RenderConfig;
    use crate::contact::FormPreset;
    use crate::core::block::{BlockData, ContactFormBlock, HeroBlock, Link, TextBlock};
    use crate::core::settings::{BlockSettings, MaxWidth};
    use crate::core::{BlockRegistry, BlockType, ContentBlock};
    use crate::document::{BlockList, StoredBlock};
    use crate::render::{BlockRenderer, WidthTreatment, WrapperLayout};

    fn renderer() -> BlockRenderer {
        BlockRenderer::new(&RenderConfig::default())
    }

    /// One unregistered type between two registered ones: exactly the two
    /// registered blocks are rendered, the third is reported.
    #[test]
    fn test_unknown_block_is_skipped() {
        let list: BlockList = serde_json::from_value(json!([
            { "id": "h", "type": "hero", "title": "Välkommen" },
            { "id": "x", "type": "videoEmbed", "url": "https://example.se/v" },
            { "id": "f", "type": "faq", "heading": "Frågor" },
        ]))
        .unwrap();

        let page = renderer().render(list.as_slice());

        assert_eq!(page.blocks.len(), 2);
        assert_eq!(page.blocks[0].id.as_str(), "h");
        assert_eq!(page.blocks[1].id.as_str(), "f");
        assert_eq!(page.skipped.len(), 1);
        assert_eq!(page.skipped[0].type_tag.as_deref(), Some("videoEmbed"));
        assert!(!page.html.contains("example.se/v"));
        assert_eq!(page.html.matches("<section").count(), 2);
    }

    /// A list made only of unreadable records renders to nothing.
    #[test]
    fn test_all_unknown_renders_empty_page() {
        let list: BlockList =
            serde_json::from_value(json!([{ "type": "a" }, { "foo": 1 }, 42])).unwrap();
        let page = renderer().render(list.as_slice());
        assert!(page.html.is_empty());
        assert_eq!(page.skipped.len(), 3);
    }

    /// Hero is wrapped wide, every other type standard.
    #[test]
    fn test_hero_gets_wide_container() {
        let registry = BlockRegistry::standard();
        let renderer = renderer();

        for block_type in BlockType::ALL {
            let block = registry.create_block(block_type.as_str()).unwrap();
            let rendered = renderer.render_block(&block);

            let expected = if block_type == BlockType::Hero {
                WidthTreatment::Wide
            } else {
                WidthTreatment::Standard
            };
            assert_eq!(rendered.layout.container, expected, "{}", block_type);
            assert!(
                rendered.html.contains(&format!("mx-auto px-4 {}", expected.class())),
                "{}",
                block_type
            );
        }
    }

    /// Hero stays wide even when its own settings ask for a narrow column.
    #[test]
    fn test_hero_wide_regardless_of_settings() {
        let block = ContentBlock::new(BlockData::Hero(HeroBlock::default()))
            .with_settings(BlockSettings::default().with_max_width(MaxWidth::Narrow));
        let layout = WrapperLayout::for_block(&block);
        assert_eq!(layout.container, WidthTreatment::Wide);
        assert_eq!(layout.content_width_class, "max-w-3xl");
    }

    /// Hidden blocks are left out silently.
    #[test]
    fn test_hidden_blocks_not_rendered() {
        let mut hidden = ContentBlock::new(BlockData::Text(TextBlock {
            heading: Some("Dold".into()),
            body: "Syns inte".into(),
        }));
        hidden.settings.hidden = true;
        let shown = ContentBlock::new(BlockData::Text(TextBlock {
            heading: Some("Synlig".into()),
            body: "Syns".into(),
        }));

        let blocks = vec![StoredBlock::from(hidden), StoredBlock::from(shown)];
        let page = renderer().render(&blocks);
        assert_eq!(page.blocks.len(), 1);
        assert!(page.skipped.is_empty());
        assert!(page.html.contains("Synlig"));
        assert!(!page.html.contains("Dold"));
    }

    /// Editor text is escaped and script links neutralized.
    #[test]
    fn test_user_content_is_escaped() {
        let block = ContentBlock::new(BlockData::Hero(HeroBlock {
            title: "<script>alert(1)</script>".into(),
            primary_cta: Some(Link::new("Klicka", "javascript:alert(1)")),
            ..Default::default()
        }));
        let html = renderer().render_block(&block).html;
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("href=\"#\""));
    }

    /// Anchor and block id attributes follow settings and config.
    #[test]
    fn test_section_attributes() {
        let block = ContentBlock::new(BlockData::Text(TextBlock::default()))
            .with_settings(BlockSettings::default().with_anchor("Om oss"));

        let with_ids = renderer().render_block(&block).html;
        assert!(with_ids.starts_with("<section id=\"om-oss\" class=\"block block-text bg-white py-16\""));
        assert!(with_ids.contains(&format!("data-block-id=\"{}\"", block.id)));

        let without_ids = BlockRenderer::new(&RenderConfig {
            include_block_ids: false,
        })
        .render_block(&block)
        .html;
        assert!(!without_ids.contains("data-block-id"));
    }

    /// The contact form block renders its preset's fields.
    #[test]
    fn test_contact_form_block_uses_preset_fields() {
        let block = ContentBlock::new(BlockData::ContactForm(ContactFormBlock {
            heading: String::new(),
            description: String::new(),
            preset: FormPreset::Callback,
            service: Some("hlr".into()),
        }));
        let html = renderer().render_block(&block).html;

        assert!(html.contains("Bli uppringd"));
        assert!(html.contains("name=\"phone\" required"));
        assert!(!html.contains("name=\"email\""));
        assert!(html.contains("Ring upp mig"));
    }

    /// Output order follows list order.
    #[test]
    fn test_render_preserves_order() {
        let registry = BlockRegistry::standard();
        let blocks: BlockList = ["cta", "hero", "stats"]
            .iter()
            .map(|t| registry.create_block(t).unwrap())
            .collect();

        let page = renderer().render(blocks.as_slice());
        let types: Vec<_> = page.blocks.iter().map(|b| b.block_type).collect();
        assert_eq!(types, vec![BlockType::Cta, BlockType::Hero, BlockType::Stats]);

        let cta_pos = page.html.find("block-cta").unwrap();
        let hero_pos = page.html.find("block-hero").unwrap();
        assert!(cta_pos < hero_pos);
    }
}
