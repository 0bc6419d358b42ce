//! Block Registry - Canonical metadata and defaults for every block type
//!
//! The registry is built once from a table of [`BlockDefinition`]s and never
//! changes afterwards. It supports:
//! - Definition lookup by stored tag or by [`BlockType`]
//! - Block creation from a type's defaults
//! - Block duplication
//! - Discovery by category or search query
//!
//! The built-in table comes from [`default_definitions`]; tests and callers
//! that need different defaults pass their own table to [`BlockRegistry::new`].

use std::collections::HashMap;
use std::sync::Arc;

use super::block::{
    BlockData, BlockType, ContactFormBlock, CtaBlock, FaqBlock, FaqItem, FeatureItem,
    FeaturesBlock, HeroBlock, ImageTextBlock, Link, ServicesBlock, StatItem, StatsBlock,
    TestimonialsBlock, TextBlock,
};
use super::settings::{Background, BlockSettings, MaxWidth, Padding};
use super::{ContentBlock, Locale};
use crate::categories::BlockCategory;
use crate::contact::FormPreset;

/// Static metadata and defaults for one block type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDefinition {
    pub block_type: BlockType,
    /// Swedish display label
    pub label_sv: String,
    /// English display label
    pub label_en: String,
    pub description: String,
    pub category: BlockCategory,
    /// Icon name for the block picker
    pub icon: String,
    /// Field values a new block starts with
    pub defaults: BlockData,
    /// Layout settings a new block starts with
    pub default_settings: BlockSettings,
}

impl BlockDefinition {
    pub fn label(&self, locale: Locale) -> &str {
        match locale {
            Locale::Sv => &self.label_sv,
            Locale::En => &self.label_en,
        }
    }
}

/// Block registry holding one definition per block type
///
/// Cloning is cheap; the table is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    definitions: Arc<Vec<BlockDefinition>>,
    by_type: Arc<HashMap<BlockType, usize>>,
}

impl BlockRegistry {
    /// Build a registry from a definition table
    ///
    /// # Returns
    /// * `Ok(BlockRegistry)` if every block type has exactly one definition
    ///   whose defaults match its type
    /// * `Err(RegistryError)` otherwise
    ///
    /// # Example
    /// ```
    /// use page_blocks::core::registry::{default_definitions, BlockRegistry};
    ///
    /// let registry = BlockRegistry::new(default_definitions()).unwrap();
    /// assert!(registry.get_definition("hero").is_some());
    /// ```
    pub fn new(definitions: Vec<BlockDefinition>) -> Result<Self, RegistryError> {
        let mut by_type = HashMap::with_capacity(definitions.len());

        for (index, def) in definitions.iter().enumerate() {
            if def.defaults.block_type() != def.block_type {
                return Err(RegistryError::MismatchedDefaults {
                    block_type: def.block_type.to_string(),
                    defaults_type: def.defaults.block_type().to_string(),
                });
            }
            if by_type.insert(def.block_type, index).is_some() {
                return Err(RegistryError::DuplicateDefinition(def.block_type.to_string()));
            }
        }

        if let Some(missing) = BlockType::ALL.iter().find(|t| !by_type.contains_key(t)) {
            return Err(RegistryError::MissingDefinition(missing.to_string()));
        }

        Ok(Self {
            definitions: Arc::new(definitions),
            by_type: Arc::new(by_type),
        })
    }

    /// Registry over the built-in definition table
    ///
    /// The table is validated like any injected one. A broken built-in table
    /// is logged and yields an empty registry.
    pub fn standard() -> Self {
        Self::new(default_definitions()).unwrap_or_else(|error| {
            tracing::error!(%error, "built-in block definitions are invalid");
            Self::empty()
        })
    }

    fn empty() -> Self {
        Self {
            definitions: Arc::new(Vec::new()),
            by_type: Arc::new(HashMap::new()),
        }
    }

    /// Look up a definition by its stored tag
    ///
    /// Returns `None` for tags that are not block types.
    pub fn get_definition(&self, tag: &str) -> Option<&BlockDefinition> {
        self.definition(tag.parse::<BlockType>().ok()?)
    }

    /// Definition for a block type
    ///
    /// Always `Some` for a registry built by [`new`](Self::new).
    pub fn definition(&self, block_type: BlockType) -> Option<&BlockDefinition> {
        self.by_type
            .get(&block_type)
            .and_then(|&index| self.definitions.get(index))
    }

    /// All definitions in table order
    pub fn definitions(&self) -> &[BlockDefinition] {
        &self.definitions
    }

    /// Create a new block of the given type from the registry defaults
    ///
    /// # Arguments
    /// * `tag` - The stored type tag, e.g. `"hero"`
    ///
    /// # Returns
    /// * `Ok(ContentBlock)` with a fresh id, the type's default fields and settings
    /// * `Err(RegistryError::UnknownBlockType)` if the tag is not a block type
    pub fn create_block(&self, tag: &str) -> Result<ContentBlock, RegistryError> {
        let def = self
            .get_definition(tag)
            .ok_or_else(|| RegistryError::UnknownBlockType(tag.to_string()))?;

        Ok(ContentBlock::new(def.defaults.clone()).with_settings(def.default_settings.clone()))
    }

    /// Copy an existing block under a new id
    pub fn duplicate_block(&self, block: &ContentBlock) -> ContentBlock {
        block.duplicate()
    }

    /// Get definitions filtered by category, in table order
    pub fn blocks_by_category(&self, category: BlockCategory) -> Vec<&BlockDefinition> {
        self.definitions
            .iter()
            .filter(|def| def.category == category)
            .collect()
    }

    /// Search for definitions by query string
    ///
    /// Searches both labels, the description and the tag (case-insensitive).
    pub fn search(&self, query: &str) -> Vec<&BlockDefinition> {
        let query = query.to_lowercase();

        self.definitions
            .iter()
            .filter(|def| {
                def.label_sv.to_lowercase().contains(&query)
                    || def.label_en.to_lowercase().contains(&query)
                    || def.description.to_lowercase().contains(&query)
                    || def.block_type.as_str().to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Get the number of definitions
    pub fn count(&self) -> usize {
        self.definitions.len()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Registry error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Tag does not name a block type
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    /// Two definitions for the same type
    #[error("Duplicate definition for block type: {0}")]
    DuplicateDefinition(String),

    /// A block type has no definition
    #[error("Missing definition for block type: {0}")]
    MissingDefinition(String),

    /// Defaults belong to a different type than the definition
    #[error("Defaults for {block_type} are of type {defaults_type}")]
    MismatchedDefaults {
        block_type: String,
        defaults_type: String,
    },
}

fn definition(
    label_sv: &str,
    label_en: &str,
    description: &str,
    category: BlockCategory,
    icon: &str,
    defaults: BlockData,
) -> BlockDefinition {
    BlockDefinition {
        block_type: defaults.block_type(),
        label_sv: label_sv.into(),
        label_en: label_en.into(),
        description: description.into(),
        category,
        icon: icon.into(),
        defaults,
        default_settings: BlockSettings::default(),
    }
}

/// The built-in block definition table
pub fn default_definitions() -> Vec<BlockDefinition> {
    vec![
        BlockDefinition {
            default_settings: BlockSettings::default()
                .with_background(Background::Dark)
                .with_padding(Padding::Large),
            ..definition(
                "Hero",
                "Hero",
                "Stor sidrubrik med bild och knappar",
                BlockCategory::Layout,
                "layout-template",
                BlockData::Hero(HeroBlock {
                    title: "Trygg arbetsplats med rätt utbildning".into(),
                    subtitle: "Vi utbildar inom brandskydd, HLR och arbetsmiljö i hela Sverige.".into(),
                    image: None,
                    primary_cta: Some(Link::new("Se våra utbildningar", "/utbildningar")),
                    secondary_cta: Some(Link::new("Kontakta oss", "/kontakt")),
                }),
            )
        },
        BlockDefinition {
            default_settings: BlockSettings::default().with_max_width(MaxWidth::Medium),
            ..definition(
                "Text",
                "Text",
                "Rubrik och löptext",
                BlockCategory::Content,
                "type",
                BlockData::Text(TextBlock {
                    heading: Some("Rubrik".into()),
                    body: "Skriv din text här.".into(),
                }),
            )
        },
        definition(
            "Bild och text",
            "Image and text",
            "Text bredvid en bild",
            BlockCategory::Media,
            "image",
            BlockData::ImageText(ImageTextBlock {
                heading: "Rubrik".into(),
                body: "Beskriv innehållet här.".into(),
                ..Default::default()
            }),
        ),
        definition(
            "Fördelar",
            "Features",
            "Rutnät med korta fördelar",
            BlockCategory::Content,
            "sparkles",
            BlockData::Features(FeaturesBlock {
                heading: "Varför välja oss?".into(),
                intro: String::new(),
                columns: 3,
                items: vec![
                    FeatureItem {
                        icon: "award".into(),
                        title: "Certifierade instruktörer".into(),
                        description: "Alla våra instruktörer har lång erfarenhet.".into(),
                    },
                    FeatureItem {
                        icon: "map-pin".into(),
                        title: "Vi kommer till er".into(),
                        description: "Utbildningen hålls på er arbetsplats.".into(),
                    },
                    FeatureItem {
                        icon: "file-check".into(),
                        title: "Intyg direkt".into(),
                        description: "Deltagarna får intyg efter avslutad kurs.".into(),
                    },
                ],
            }),
        ),
        definition(
            "Tjänster",
            "Services",
            "Kort för tjänster och utbildningar",
            BlockCategory::Content,
            "briefcase",
            BlockData::Services(ServicesBlock {
                heading: "Våra utbildningar".into(),
                intro: "Välj den utbildning som passar er verksamhet.".into(),
                category: None,
                items: Vec::new(),
            }),
        ),
        BlockDefinition {
            default_settings: BlockSettings::default().with_background(Background::Light),
            ..definition(
                "Siffror",
                "Statistics",
                "Nyckeltal i stora siffror",
                BlockCategory::Trust,
                "bar-chart",
                BlockData::Stats(StatsBlock {
                    heading: String::new(),
                    items: vec![
                        StatItem {
                            value: "10 000+".into(),
                            label: "utbildade deltagare".into(),
                        },
                        StatItem {
                            value: "20".into(),
                            label: "års erfarenhet".into(),
                        },
                    ],
                }),
            )
        },
        definition(
            "Kundomdömen",
            "Testimonials",
            "Citat från nöjda kunder",
            BlockCategory::Trust,
            "quote",
            BlockData::Testimonials(TestimonialsBlock {
                heading: "Det här säger våra kunder".into(),
                items: Vec::new(),
            }),
        ),
        BlockDefinition {
            default_settings: BlockSettings::default().with_max_width(MaxWidth::Medium),
            ..definition(
                "Vanliga frågor",
                "FAQ",
                "Frågor och svar",
                BlockCategory::Content,
                "help-circle",
                BlockData::Faq(FaqBlock {
                    heading: "Vanliga frågor".into(),
                    items: vec![FaqItem {
                        question: "Fråga".into(),
                        answer: "Svar".into(),
                    }],
                }),
            )
        },
        BlockDefinition {
            default_settings: BlockSettings::default().with_background(Background::Primary),
            ..definition(
                "Uppmaning",
                "Call to action",
                "Banner med knapp",
                BlockCategory::Conversion,
                "megaphone",
                BlockData::Cta(CtaBlock {
                    heading: "Redo att boka en utbildning?".into(),
                    text: "Kontakta oss så hjälper vi er att komma igång.".into(),
                    button: Link::new("Kontakta oss", "/kontakt"),
                }),
            )
        },
        BlockDefinition {
            default_settings: BlockSettings::default().with_max_width(MaxWidth::Narrow),
            ..definition(
                "Kontaktformulär",
                "Contact form",
                "Formulär för förfrågningar",
                BlockCategory::Conversion,
                "mail",
                BlockData::ContactForm(ContactFormBlock {
                    heading: "Kontakta oss".into(),
                    description: String::new(),
                    preset: FormPreset::General,
                    service: None,
                }),
            )
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_covers_every_type() {
        let registry = BlockRegistry::standard();
        assert_eq!(registry.count(), BlockType::ALL.len());

        // Same table must also pass full validation
        assert!(BlockRegistry::new(default_definitions()).is_ok());
    }

    #[test]
    fn test_get_definition() {
        let registry = BlockRegistry::standard();

        let hero = registry.get_definition("hero").unwrap();
        assert_eq!(hero.block_type, BlockType::Hero);
        assert_eq!(hero.label(Locale::Sv), "Hero");

        let faq = registry.get_definition("faq").unwrap();
        assert_eq!(faq.label(Locale::En), "FAQ");
        assert_eq!(faq.label(Locale::Sv), "Vanliga frågor");

        assert!(registry.get_definition("slider").is_none());
        assert!(registry.get_definition("").is_none());
    }

    #[test]
    fn test_create_unknown_type_fails() {
        let registry = BlockRegistry::standard();
        let result = registry.create_block("carousel");
        assert_eq!(
            result.unwrap_err(),
            RegistryError::UnknownBlockType("carousel".into())
        );
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        let mut defs = default_definitions();
        defs.push(defs[0].clone());

        let result = BlockRegistry::new(defs);
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateDefinition("hero".into())
        );
    }

    #[test]
    fn test_missing_definition_rejected() {
        let defs: Vec<_> = default_definitions()
            .into_iter()
            .filter(|d| d.block_type != BlockType::Stats)
            .collect();

        let result = BlockRegistry::new(defs);
        assert_eq!(
            result.unwrap_err(),
            RegistryError::MissingDefinition("stats".into())
        );
    }

    #[test]
    fn test_mismatched_defaults_rejected() {
        let mut defs = default_definitions();
        defs[0].defaults = BlockData::Text(TextBlock::default());

        let result = BlockRegistry::new(defs);
        assert!(matches!(
            result.unwrap_err(),
            RegistryError::MismatchedDefaults { block_type, defaults_type }
                if block_type == "hero" && defaults_type == "text"
        ));
    }

    #[test]
    fn test_injected_defaults_are_used() {
        let mut defs = default_definitions();
        let cta = defs
            .iter_mut()
            .find(|d| d.block_type == BlockType::Cta)
            .unwrap();
        cta.defaults = BlockData::Cta(CtaBlock {
            heading: "Boka nu".into(),
            ..Default::default()
        });

        let registry = BlockRegistry::new(defs).unwrap();
        let block = registry.create_block("cta").unwrap();
        assert_eq!(block.data.heading(), Some("Boka nu"));

        // The standard table is not affected
        let standard = BlockRegistry::standard().create_block("cta").unwrap();
        assert_eq!(standard.data.heading(), Some("Redo att boka en utbildning?"));
    }

    #[test]
    fn test_blocks_by_category() {
        let registry = BlockRegistry::standard();

        let conversion: Vec<_> = registry
            .blocks_by_category(BlockCategory::Conversion)
            .iter()
            .map(|d| d.block_type)
            .collect();
        assert_eq!(conversion, vec![BlockType::Cta, BlockType::ContactForm]);

        let layout = registry.blocks_by_category(BlockCategory::Layout);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout[0].block_type, BlockType::Hero);
    }

    #[test]
    fn test_search() {
        let registry = BlockRegistry::standard();

        let results = registry.search("kund");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].block_type, BlockType::Testimonials);

        let results = registry.search("CONTACTFORM");
        assert_eq!(results.len(), 1);

        assert!(registry.search("zzz").is_empty());
    }

    #[test]
    fn test_standard_matches_validated_table() {
        let standard = BlockRegistry::standard();
        let validated = BlockRegistry::new(default_definitions()).unwrap();
        assert_eq!(standard.definitions(), validated.definitions());

        for block_type in BlockType::ALL {
            assert_eq!(
                standard.definition(block_type).map(|d| d.block_type),
                Some(block_type)
            );
        }
    }

    #[test]
    fn test_empty_registry_lookups_do_not_panic() {
        let registry = BlockRegistry::empty();
        assert!(registry.definition(BlockType::Hero).is_none());
        assert!(registry.get_definition("hero").is_none());
        assert_eq!(
            registry.create_block("hero").unwrap_err(),
            RegistryError::UnknownBlockType("hero".into())
        );
    }

    #[test]
    fn test_clones_share_table() {
        let registry = BlockRegistry::standard();
        let clone = registry.clone();
        assert!(Arc::ptr_eq(&registry.definitions, &clone.definitions));
    }
}
