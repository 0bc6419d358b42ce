//! Document persistence boundary
//!
//! Pages, posts and service pages own an ordered block list. The rendering
//! core only sees these plain records; [`DocumentStore`] is the seam where a
//! database-backed implementation plugs in. [`InMemoryDocumentStore`] backs
//! tests and the CLI.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::BlockList;

/// Kind of content document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Page,
    Post,
    Service,
}

/// A page, post or service page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub kind: DocumentKind,
    pub slug: String,
    pub title: String,
    pub blocks: BlockList,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub kind: DocumentKind,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub blocks: BlockList,
    #[serde(default)]
    pub published: bool,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentUpdate {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub blocks: Option<BlockList>,
    pub published: Option<bool>,
}

/// Storage for documents
pub trait DocumentStore: Send + Sync {
    /// All documents of a kind, ordered by slug
    fn list(&self, kind: DocumentKind) -> Result<Vec<Document>, StoreError>;

    fn get(&self, id: Uuid) -> Result<Document, StoreError>;

    fn get_by_slug(&self, kind: DocumentKind, slug: &str) -> Result<Document, StoreError>;

    fn create(&self, doc: NewDocument) -> Result<Document, StoreError>;

    fn update(&self, id: Uuid, update: DocumentUpdate) -> Result<Document, StoreError>;

    fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Thread-safe in-memory document store
///
/// Uses `Arc<RwLock<HashMap>>` so clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<Uuid, Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.documents.read().len()
    }

    fn slug_taken(
        documents: &HashMap<Uuid, Document>,
        kind: DocumentKind,
        slug: &str,
        except: Option<Uuid>,
    ) -> bool {
        documents
            .values()
            .any(|d| d.kind == kind && d.slug == slug && Some(d.id) != except)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn list(&self, kind: DocumentKind) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.read();
        let mut docs: Vec<Document> = documents
            .values()
            .filter(|d| d.kind == kind)
            .cloned()
            .collect();
        docs.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(docs)
    }

    fn get(&self, id: Uuid) -> Result<Document, StoreError> {
        self.documents
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id.to_string()))
    }

    fn get_by_slug(&self, kind: DocumentKind, slug: &str) -> Result<Document, StoreError> {
        self.documents
            .read()
            .values()
            .find(|d| d.kind == kind && d.slug == slug)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))
    }

    fn create(&self, doc: NewDocument) -> Result<Document, StoreError> {
        validate_slug(&doc.slug)?;
        validate_title(&doc.title)?;

        let mut documents = self.documents.write();
        if Self::slug_taken(&documents, doc.kind, &doc.slug, None) {
            return Err(StoreError::SlugTaken(doc.slug));
        }

        let now = Utc::now();
        let document = Document {
            id: Uuid::new_v4(),
            kind: doc.kind,
            slug: doc.slug,
            title: doc.title.trim().to_string(),
            blocks: doc.blocks,
            published: doc.published,
            created_at: now,
            updated_at: now,
        };
        documents.insert(document.id, document.clone());
        tracing::info!(id = %document.id, slug = %document.slug, "document created");
        Ok(document)
    }

    fn update(&self, id: Uuid, update: DocumentUpdate) -> Result<Document, StoreError> {
        if let Some(slug) = &update.slug {
            validate_slug(slug)?;
        }
        if let Some(title) = &update.title {
            validate_title(title)?;
        }

        let mut documents = self.documents.write();
        let kind = documents
            .get(&id)
            .map(|d| d.kind)
            .ok_or(StoreError::NotFound(id.to_string()))?;
        if let Some(slug) = &update.slug {
            if Self::slug_taken(&documents, kind, slug, Some(id)) {
                return Err(StoreError::SlugTaken(slug.clone()));
            }
        }

        let document = documents
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id.to_string()))?;
        if let Some(slug) = update.slug {
            document.slug = slug;
        }
        if let Some(title) = update.title {
            document.title = title.trim().to_string();
        }
        if let Some(blocks) = update.blocks {
            document.blocks = blocks;
        }
        if let Some(published) = update.published {
            document.published = published;
        }
        document.updated_at = Utc::now();
        tracing::info!(id = %id, "document updated");
        Ok(document.clone())
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.documents
            .write()
            .remove(&id)
            .ok_or(StoreError::NotFound(id.to_string()))?;
        tracing::info!(id = %id, "document deleted");
        Ok(())
    }
}

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("invalid slug pattern"));

/// Slugs are lowercase ASCII words joined by single hyphens
pub fn validate_slug(slug: &str) -> Result<(), StoreError> {
    if SLUG_PATTERN.is_match(slug) {
        Ok(())
    } else {
        Err(StoreError::InvalidSlug(slug.to_string()))
    }
}

fn validate_title(title: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation("title must not be empty".into()));
    }
    Ok(())
}

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Slug already in use: {0}")]
    SlugTaken(String),

    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend failure
    #[error("Storage error: {0}")]
    Backend(String),
}
