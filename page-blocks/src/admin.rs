//! Admin operations over documents and their blocks
//!
//! Every operation takes the caller's session as reported by the
//! authentication provider. Missing sessions fail with 401, insufficient
//! roles with 403. Nothing is written when a check fails.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::contact::ValidationErrors;
use crate::core::{BlockError, BlockId, BlockRegistry, RegistryError};
use crate::document::BlockList;
use crate::store::{Document, DocumentKind, DocumentStore, DocumentUpdate, NewDocument, StoreError};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Editor,
    Admin,
    SuperAdmin,
}

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role >= Role::Admin
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

/// Errors returned to admin API callers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Form validation failed")]
    InvalidForm(ValidationErrors),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidForm(_) => 400,
            ApiError::Unauthorized => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
        }
    }

    /// JSON response body
    pub fn body(&self) -> Value {
        match self {
            ApiError::InvalidForm(errors) => json!({
                "error": self.to_string(),
                "fields": errors.errors,
            }),
            other => json!({ "error": other.to_string() }),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(what) => ApiError::NotFound(what),
            StoreError::SlugTaken(_) | StoreError::InvalidSlug(_) | StoreError::Validation(_) => {
                ApiError::BadRequest(error.to_string())
            }
            StoreError::Backend(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<BlockError> for ApiError {
    fn from(error: BlockError) -> Self {
        match error {
            BlockError::BlockNotFound(id) => ApiError::NotFound(format!("block {}", id)),
            BlockError::Serialization(msg) => ApiError::Internal(msg),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::UnknownBlockType(_) => ApiError::BadRequest(error.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::InvalidForm(errors)
    }
}

fn require_session(session: Option<&Session>) -> Result<&Session, ApiError> {
    session.ok_or(ApiError::Unauthorized)
}

fn require_admin(session: Option<&Session>) -> Result<&Session, ApiError> {
    let session = require_session(session)?;
    if !session.is_admin() {
        return Err(ApiError::Forbidden("admin role required".into()));
    }
    Ok(session)
}

/// Admin API over a document store
pub struct AdminApi<S: DocumentStore> {
    store: S,
    registry: BlockRegistry,
}

impl<S: DocumentStore> AdminApi<S> {
    pub fn new(store: S, registry: BlockRegistry) -> Self {
        Self { store, registry }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    // ── Documents ───────────────────────────────────────────────────────

    pub fn list(&self, session: Option<&Session>, kind: DocumentKind) -> Result<Vec<Document>, ApiError> {
        require_session(session)?;
        Ok(self.store.list(kind)?)
    }

    pub fn get(&self, session: Option<&Session>, id: Uuid) -> Result<Document, ApiError> {
        require_session(session)?;
        Ok(self.store.get(id)?)
    }

    pub fn create(&self, session: Option<&Session>, doc: NewDocument) -> Result<Document, ApiError> {
        require_session(session)?;
        Ok(self.store.create(doc)?)
    }

    pub fn update(
        &self,
        session: Option<&Session>,
        id: Uuid,
        update: DocumentUpdate,
    ) -> Result<Document, ApiError> {
        require_session(session)?;
        Ok(self.store.update(id, update)?)
    }

    /// Deleting a document needs the admin role
    pub fn delete(&self, session: Option<&Session>, id: Uuid) -> Result<(), ApiError> {
        let session = require_admin(session)?;
        self.store.delete(id)?;
        tracing::info!(user = %session.user_id, document = %id, "document deleted by admin");
        Ok(())
    }

    // ── Blocks ──────────────────────────────────────────────────────────

    /// Create a block from the registry defaults and append it, or insert it at `index`
    pub fn add_block(
        &self,
        session: Option<&Session>,
        document: Uuid,
        block_type: &str,
        index: Option<usize>,
    ) -> Result<BlockId, ApiError> {
        require_session(session)?;
        let block = self.registry.create_block(block_type)?;
        let id = block.id.clone();
        self.edit_blocks(document, |blocks| match index {
            Some(i) => blocks.insert(i, block),
            None => {
                blocks.push(block);
                Ok(())
            }
        })?;
        Ok(id)
    }

    pub fn duplicate_block(
        &self,
        session: Option<&Session>,
        document: Uuid,
        block: &BlockId,
    ) -> Result<BlockId, ApiError> {
        require_session(session)?;
        self.edit_blocks(document, |blocks| blocks.duplicate(block))
    }

    pub fn remove_block(
        &self,
        session: Option<&Session>,
        document: Uuid,
        block: &BlockId,
    ) -> Result<(), ApiError> {
        require_session(session)?;
        self.edit_blocks(document, |blocks| blocks.remove(block).map(|_| ()))
    }

    pub fn move_block(
        &self,
        session: Option<&Session>,
        document: Uuid,
        block: &BlockId,
        to: usize,
    ) -> Result<(), ApiError> {
        require_session(session)?;
        self.edit_blocks(document, |blocks| blocks.move_to(block, to))
    }

    /// Field-level partial update of one block
    pub fn update_block(
        &self,
        session: Option<&Session>,
        document: Uuid,
        block: &BlockId,
        patch: &Value,
    ) -> Result<(), ApiError> {
        require_session(session)?;
        self.edit_blocks(document, |blocks| blocks.update_fields(block, patch))
    }

    fn edit_blocks<T>(
        &self,
        document: Uuid,
        edit: impl FnOnce(&mut BlockList) -> Result<T, BlockError>,
    ) -> Result<T, ApiError> {
        let mut blocks = self.store.get(document)?.blocks;
        let result = edit(&mut blocks)?;
        self.store.update(
            document,
            DocumentUpdate {
                blocks: Some(blocks),
                ..Default::default()
            },
        )?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{ContactFormConfig, ContactSubmission, FormPreset};
    use crate::store::InMemoryDocumentStore;

    fn api() -> AdminApi<InMemoryDocumentStore> {
        AdminApi::new(InMemoryDocumentStore::new(), BlockRegistry::standard())
    }

    fn editor() -> Session {
        Session::new("editor-1", Role::Editor)
    }

    fn page() -> NewDocument {
        NewDocument {
            kind: DocumentKind::Page,
            slug: "start".into(),
            title: "Start".into(),
            blocks: BlockList::new(),
            published: true,
        }
    }

    #[test]
    fn test_roles() {
        assert!(!editor().is_admin());
        assert!(Session::new("a", Role::Admin).is_admin());
        assert!(!Session::new("a", Role::Admin).is_super_admin());
        assert!(Session::new("s", Role::SuperAdmin).is_admin());
    }

    #[test]
    fn test_missing_session_is_401() {
        let api = api();
        let err = api.list(None, DocumentKind::Page).unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
        assert_eq!(err.status_code(), 401);
        assert_eq!(api.store().count(), 0);
    }

    #[test]
    fn test_editor_cannot_delete() {
        let api = api();
        let doc = api.create(Some(&editor()), page()).unwrap();

        let err = api.delete(Some(&editor()), doc.id).unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert!(api.get(Some(&editor()), doc.id).is_ok());

        let admin = Session::new("admin-1", Role::Admin);
        api.delete(Some(&admin), doc.id).unwrap();
        let err = api.get(Some(&admin), doc.id).unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_block_operations() {
        let api = api();
        let session = editor();
        let doc = api.create(Some(&session), page()).unwrap();

        let hero = api.add_block(Some(&session), doc.id, "hero", None).unwrap();
        let faq = api.add_block(Some(&session), doc.id, "faq", None).unwrap();
        let copy = api.duplicate_block(Some(&session), doc.id, &faq).unwrap();

        let ids: Vec<_> = api
            .get(Some(&session), doc.id)
            .unwrap()
            .blocks
            .iter()
            .filter_map(|b| b.id().cloned())
            .collect();
        assert_eq!(ids, vec![hero.clone(), faq.clone(), copy.clone()]);

        api.move_block(Some(&session), doc.id, &copy, 0).unwrap();
        api.remove_block(Some(&session), doc.id, &faq).unwrap();
        api.update_block(
            Some(&session),
            doc.id,
            &hero,
            &serde_json::json!({ "title": "Ny rubrik" }),
        )
        .unwrap();

        let blocks = api.get(Some(&session), doc.id).unwrap().blocks;
        let ids: Vec<_> = blocks.iter().filter_map(|b| b.id().cloned()).collect();
        assert_eq!(ids, vec![copy, hero.clone()]);
        assert_eq!(blocks.get(&hero).unwrap().data.heading(), Some("Ny rubrik"));
    }

    #[test]
    fn test_block_errors_map_to_status_codes() {
        let api = api();
        let session = editor();
        let doc = api.create(Some(&session), page()).unwrap();

        let err = api.add_block(Some(&session), doc.id, "carousel", None).unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = api
            .remove_block(Some(&session), doc.id, &BlockId::from_string("nope"))
            .unwrap_err();
        assert_eq!(err.status_code(), 404);

        let err = api.add_block(Some(&session), Uuid::new_v4(), "hero", None).unwrap_err();
        assert_eq!(err.status_code(), 404);

        let err = api.add_block(Some(&session), doc.id, "hero", Some(5)).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(api.get(Some(&session), doc.id).unwrap().blocks.is_empty());
    }

    #[test]
    fn test_form_errors_body() {
        let config = ContactFormConfig::for_preset(FormPreset::Callback);
        let err: ApiError = ContactSubmission::default()
            .validate(&config)
            .unwrap_err()
            .into();

        assert_eq!(err.status_code(), 400);
        let body = err.body();
        assert_eq!(body["fields"].as_array().unwrap().len(), 2);
        assert_eq!(body["fields"][0]["field"], "name");
    }
}
