//! Stored block lists
//!
//! Pages and posts persist their content as an ordered JSON array of blocks.
//! Loading that array never fails: records with a tag this build does not
//! know, or whose fields do not fit their tag, are kept as
//! [`UnknownBlock`]s so they survive a save and can be back-filled later by
//! [`BlockList::migrate`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::core::{BlockError, BlockId, BlockType, ContentBlock};

/// Stored record that could not be read as a known block
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownBlock {
    /// Id from the record, when it has a string id
    pub id: Option<BlockId>,
    /// The record's `type` value, when it has a string one
    pub type_tag: Option<String>,
    /// Why the record was not loaded
    pub reason: String,
    /// The record as stored
    pub raw: Value,
}

/// One entry of a stored block list
#[derive(Debug, Clone, PartialEq)]
pub enum StoredBlock {
    Known(ContentBlock),
    Unknown(UnknownBlock),
}

impl StoredBlock {
    /// Interpret a stored JSON record
    pub fn from_value(raw: Value) -> Self {
        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .map(BlockId::from_string);
        let type_tag = raw.get("type").and_then(Value::as_str).map(str::to_string);

        let reason = match type_tag.as_deref() {
            None => "record has no type tag".to_string(),
            Some(tag) => match tag.parse::<BlockType>() {
                Err(e) => e.to_string(),
                Ok(_) => match serde_json::from_value::<ContentBlock>(raw.clone()) {
                    Ok(block) => return StoredBlock::Known(block),
                    Err(e) => format!("malformed {} block: {}", tag, e),
                },
            },
        };

        StoredBlock::Unknown(UnknownBlock {
            id,
            type_tag,
            reason,
            raw,
        })
    }

    pub fn id(&self) -> Option<&BlockId> {
        match self {
            StoredBlock::Known(block) => Some(&block.id),
            StoredBlock::Unknown(unknown) => unknown.id.as_ref(),
        }
    }

    pub fn as_known(&self) -> Option<&ContentBlock> {
        match self {
            StoredBlock::Known(block) => Some(block),
            StoredBlock::Unknown(_) => None,
        }
    }
}

impl From<ContentBlock> for StoredBlock {
    fn from(block: ContentBlock) -> Self {
        StoredBlock::Known(block)
    }
}

impl Serialize for StoredBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StoredBlock::Known(block) => block.serialize(serializer),
            StoredBlock::Unknown(unknown) => unknown.raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for StoredBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(StoredBlock::from_value(raw))
    }
}

/// Outcome of [`BlockList::migrate`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    /// Records rewritten from a legacy tag
    pub migrated: Vec<MigratedBlock>,
    /// Records still not loadable after migration
    pub remaining: Vec<UnknownBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratedBlock {
    pub id: BlockId,
    pub from_tag: String,
    pub to_type: BlockType,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Ordered blocks of one page or post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockList {
    blocks: Vec<StoredBlock>,
}

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a stored JSON array. Non-array input is an error; bad entries are not.
    pub fn from_json(json: &str) -> Result<Self, BlockError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, BlockError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredBlock> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[StoredBlock] {
        &self.blocks
    }

    pub fn known_blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.blocks.iter().filter_map(StoredBlock::as_known)
    }

    pub fn unknown_blocks(&self) -> impl Iterator<Item = &UnknownBlock> {
        self.blocks.iter().filter_map(|b| match b {
            StoredBlock::Unknown(unknown) => Some(unknown),
            StoredBlock::Known(_) => None,
        })
    }

    /// Append a block at the end
    pub fn push(&mut self, block: ContentBlock) {
        self.blocks.push(StoredBlock::Known(block));
    }

    /// Insert a block at `index` (`index == len` appends)
    pub fn insert(&mut self, index: usize, block: ContentBlock) -> Result<(), BlockError> {
        if index > self.blocks.len() {
            return Err(BlockError::IndexOutOfBounds {
                index,
                len: self.blocks.len(),
            });
        }
        self.blocks.insert(index, StoredBlock::Known(block));
        Ok(())
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == Some(id))
    }

    pub fn get(&self, id: &BlockId) -> Option<&ContentBlock> {
        self.known_blocks().find(|b| &b.id == id)
    }

    pub fn get_mut(&mut self, id: &BlockId) -> Option<&mut ContentBlock> {
        self.blocks.iter_mut().find_map(|b| match b {
            StoredBlock::Known(block) if &block.id == id => Some(block),
            _ => None,
        })
    }

    /// Remove a block, known or not, by id
    pub fn remove(&mut self, id: &BlockId) -> Result<StoredBlock, BlockError> {
        let index = self.index_of(id)?;
        Ok(self.blocks.remove(index))
    }

    /// Duplicate a block and insert the copy right after it
    ///
    /// # Returns
    /// The id of the new block
    pub fn duplicate(&mut self, id: &BlockId) -> Result<BlockId, BlockError> {
        let index = self.index_of(id)?;
        let copy = match &self.blocks[index] {
            StoredBlock::Known(block) => block.duplicate(),
            StoredBlock::Unknown(_) => {
                return Err(BlockError::UnknownBlockType(format!(
                    "cannot duplicate unreadable block {}",
                    id
                )))
            }
        };
        let new_id = copy.id.clone();
        self.blocks.insert(index + 1, StoredBlock::Known(copy));
        Ok(new_id)
    }

    /// Move a block so it ends up at `to`
    pub fn move_to(&mut self, id: &BlockId, to: usize) -> Result<(), BlockError> {
        let from = self.index_of(id)?;
        if to >= self.blocks.len() {
            return Err(BlockError::IndexOutOfBounds {
                index: to,
                len: self.blocks.len(),
            });
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        Ok(())
    }

    /// Move a block one step towards the top. No-op for the first block.
    pub fn move_up(&mut self, id: &BlockId) -> Result<(), BlockError> {
        let index = self.index_of(id)?;
        if index > 0 {
            self.blocks.swap(index, index - 1);
        }
        Ok(())
    }

    /// Move a block one step towards the bottom. No-op for the last block.
    pub fn move_down(&mut self, id: &BlockId) -> Result<(), BlockError> {
        let index = self.index_of(id)?;
        if index + 1 < self.blocks.len() {
            self.blocks.swap(index, index + 1);
        }
        Ok(())
    }

    /// Apply a partial update to one block
    pub fn update_fields(&mut self, id: &BlockId, patch: &Value) -> Result<(), BlockError> {
        let block = self
            .get_mut(id)
            .ok_or_else(|| BlockError::BlockNotFound(id.to_string()))?;
        block.apply_patch(patch)
    }

    /// Rewrite legacy type tags to current ones and re-read those records.
    ///
    /// Records without a legacy mapping are left as they are and listed in
    /// the report's `remaining`.
    pub fn migrate(&mut self) -> MigrationReport {
        let mut report = MigrationReport::default();

        for entry in &mut self.blocks {
            let StoredBlock::Unknown(unknown) = entry else {
                continue;
            };

            let target = unknown
                .type_tag
                .as_deref()
                .and_then(BlockType::from_legacy_tag);

            let Some(to_type) = target else {
                report.remaining.push(unknown.clone());
                continue;
            };

            let mut raw = unknown.raw.clone();
            if let Some(obj) = raw.as_object_mut() {
                obj.insert("type".into(), Value::String(to_type.as_str().into()));
                if !obj.get("id").is_some_and(Value::is_string) {
                    obj.insert("id".into(), Value::String(BlockId::new().to_string()));
                }
            }

            match StoredBlock::from_value(raw) {
                StoredBlock::Known(block) => {
                    tracing::debug!(
                        block_id = %block.id,
                        from = unknown.type_tag.as_deref().unwrap_or_default(),
                        to = %to_type,
                        "migrated legacy block"
                    );
                    report.migrated.push(MigratedBlock {
                        id: block.id.clone(),
                        from_tag: unknown.type_tag.clone().unwrap_or_default(),
                        to_type,
                    });
                    *entry = StoredBlock::Known(block);
                }
                StoredBlock::Unknown(still) => report.remaining.push(still),
            }
        }

        report
    }

    fn index_of(&self, id: &BlockId) -> Result<usize, BlockError> {
        self.position(id)
            .ok_or_else(|| BlockError::BlockNotFound(id.to_string()))
    }
}

impl FromIterator<ContentBlock> for BlockList {
    fn from_iter<I: IntoIterator<Item = ContentBlock>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().map(StoredBlock::Known).collect(),
        }
    }
}
