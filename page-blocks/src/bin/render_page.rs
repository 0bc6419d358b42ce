//! render-page - render stored page content from the command line
//!
//! Used to preview block JSON exported from the admin and to check the copy
//! the contact page shows for a given query string.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use page_blocks::config::SiteConfig;
use page_blocks::contact::{ContactFormConfig, ContactQuery};
use page_blocks::core::Locale;
use page_blocks::{BlockCategory, BlockList, BlockRegistry, BlockRenderer};

/// render-page - block page preview
#[derive(Parser, Debug)]
#[command(name = "render-page")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to site configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a page's block list to HTML
    Render {
        /// JSON file holding a block array or a document with a `blocks` field
        page: PathBuf,

        /// Rewrite legacy block tags before rendering
        #[arg(long)]
        migrate: bool,
    },

    /// Show the contact page copy and form for a query
    Contact {
        /// Form type (quote, callback, booking)
        #[arg(long = "type")]
        form_type: Option<String>,

        /// Service category slug
        #[arg(long)]
        service: Option<String>,

        /// Product or course reference
        #[arg(long)]
        product: Option<String>,
    },

    /// List the available block types
    #[command(alias = "ls")]
    Blocks {
        /// Label language; defaults to the site locale
        #[arg(long)]
        locale: Option<Locale>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SiteConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SiteConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .context("invalid logging filter")?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Render { page, migrate } => render(&config, &page, migrate),
        Commands::Contact {
            form_type,
            service,
            product,
        } => {
            contact(&contact_query(form_type, service, product));
            Ok(())
        }
        Commands::Blocks { locale } => {
            blocks(locale.unwrap_or(config.site.default_locale));
            Ok(())
        }
    }
}

fn load_blocks(path: &Path) -> Result<BlockList> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let blocks = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut doc) => match doc.remove("blocks") {
            Some(blocks) => blocks,
            None => bail!("{} has no `blocks` field", path.display()),
        }
        _ => bail!("{} must hold a block array or a document", path.display()),
    };
    serde_json::from_value(blocks).context("failed to read block list")
}

fn render(config: &SiteConfig, path: &Path, migrate: bool) -> Result<()> {
    let mut blocks = load_blocks(path)?;

    if migrate {
        let report = blocks.migrate();
        tracing::info!(
            migrated = report.migrated.len(),
            remaining = report.remaining.len(),
            "legacy migration finished"
        );
    }

    let page = BlockRenderer::new(&config.render).render(blocks.as_slice());
    println!("{}", page.html);

    if !page.skipped.is_empty() {
        tracing::warn!(
            skipped = page.skipped.len(),
            rendered = page.blocks.len(),
            "page rendered with skipped blocks"
        );
    }
    Ok(())
}

/// Same trimming and blank filtering as a query string
fn contact_query(
    form_type: Option<String>,
    service: Option<String>,
    product: Option<String>,
) -> ContactQuery {
    let pairs = [("type", form_type), ("service", service), ("product", product)];
    ContactQuery::from_pairs(
        pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v))),
    )
}

fn contact(query: &ContactQuery) {
    let form = ContactFormConfig::from_query(query);

    println!("{}", form.heading);
    println!("{}", form.description);
    println!();
    println!("Preset: {}", form.preset);
    if let Some(service) = form.service {
        println!("Service: {}", service.label());
    }
    if let Some(message) = &form.prefilled_message {
        println!("Message: {}", message);
    }
    println!();
    for field in &form.fields {
        let marker = if field.required { "*" } else { " " };
        println!("  {} {:<16} {}", marker, field.field.name(), field.field.label());
    }
}

fn blocks(locale: Locale) {
    let registry = BlockRegistry::standard();

    for category in BlockCategory::ALL {
        let definitions = registry.blocks_by_category(category);
        if definitions.is_empty() {
            continue;
        }
        println!("{}", category.display_name(locale));
        for def in definitions {
            println!("  {:<14} {}", def.block_type.as_str(), def.label(locale));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_blocks::contact::{self, DEFAULT_DESCRIPTION};

    #[test]
    fn test_blank_options_are_ignored() {
        let query = contact_query(None, Some("  ".into()), Some(String::new()));
        assert_eq!(query, ContactQuery::default());
        assert_eq!(contact::description(&query), DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_options_are_trimmed() {
        let query = contact_query(Some(" quote ".into()), None, Some(" HLR-kurs ".into()));
        assert_eq!(query.form_type.as_deref(), Some("quote"));
        assert_eq!(query.product.as_deref(), Some("HLR-kurs"));
    }
}
