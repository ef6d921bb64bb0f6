//! Immutable registry of block and collection schemas.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{Arc, LazyLock};

use serde_json::Value;

use super::field::{normalize_fields, validate_fields};
use super::{FieldSchema, standard_blocks, standard_collections};
use crate::media::MediaResolver;
use crate::{Error, Result};

/// Field contract of one block type.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSchema {
    block_type: String,
    label: Option<String>,
    fields: Vec<FieldSchema>,
}

impl BlockSchema {
    /// Creates a schema for the `blockType` discriminator `block_type`.
    pub fn new(block_type: impl AsRef<str>, fields: Vec<FieldSchema>) -> Self {
        Self {
            block_type: block_type.as_ref().to_owned(),
            label: None,
            fields,
        }
    }

    /// Sets the admin label of the block.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Returns the top-level field with the given name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Checks that every required field of a raw block is present.
    pub fn validate(&self, block: &Value) -> Result<()> {
        validate_fields(&self.fields, block, "")
            .map_err(|error| error.with_context(format!("block type: {}", self.block_type)))
    }

    /// Rewrites every upload field of a raw block into a media document.
    pub fn normalize_media(&self, block: &mut Value, resolver: &MediaResolver) -> Result<()> {
        normalize_fields(&self.fields, block, resolver, "")
    }
}

/// Field contract of a collection or global.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSchema {
    slug: String,
    global: bool,
    fields: Vec<FieldSchema>,
}

impl CollectionSchema {
    /// Creates a schema for the collection `slug`.
    pub fn new(slug: impl AsRef<str>, fields: Vec<FieldSchema>) -> Self {
        Self {
            slug: slug.as_ref().to_owned(),
            global: false,
            fields,
        }
    }

    /// Marks the schema as a singleton global.
    pub fn global(mut self) -> Self {
        self.global = true;
        self
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Returns the top-level field with the given name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Checks that every required field of a raw document is present.
    pub fn validate(&self, document: &Value) -> Result<()> {
        validate_fields(&self.fields, document, "")
            .map_err(|error| error.with_context(format!("collection: {}", self.slug)))
    }

    /// Rewrites every upload field of a raw document into a media document.
    ///
    /// Layout blocks are skipped; normalize them with their block schema.
    pub fn normalize_media(&self, document: &mut Value, resolver: &MediaResolver) -> Result<()> {
        normalize_fields(&self.fields, document, resolver, "")
    }
}

/// Builder for [`SchemaRegistry`].
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    blocks: BTreeMap<String, BlockSchema>,
    collections: BTreeMap<String, CollectionSchema>,
}

impl SchemaRegistryBuilder {
    /// Registers a block schema.
    ///
    /// Fails with a configuration error if the block type is already taken.
    pub fn register(mut self, schema: BlockSchema) -> Result<Self> {
        match self.blocks.entry(schema.block_type.clone()) {
            Entry::Occupied(_) => Err(Error::configuration().with_message(format!(
                "block type `{}` is registered more than once",
                schema.block_type
            ))),
            Entry::Vacant(entry) => {
                entry.insert(schema);
                Ok(self)
            }
        }
    }

    /// Registers a collection or global schema.
    ///
    /// Fails with a configuration error if the slug is already taken.
    pub fn register_collection(mut self, schema: CollectionSchema) -> Result<Self> {
        match self.collections.entry(schema.slug.clone()) {
            Entry::Occupied(_) => Err(Error::configuration().with_message(format!(
                "collection `{}` is registered more than once",
                schema.slug
            ))),
            Entry::Vacant(entry) => {
                entry.insert(schema);
                Ok(self)
            }
        }
    }

    /// Freezes the registry.
    pub fn build(self) -> SchemaRegistry {
        SchemaRegistry {
            blocks: self.blocks,
            collections: self.collections,
        }
    }
}

static GLOBAL: LazyLock<std::result::Result<Arc<SchemaRegistry>, String>> =
    LazyLock::new(|| {
        SchemaRegistry::standard()
            .map(Arc::new)
            .map_err(|error| error.to_string())
    });

/// Mapping from `blockType` and collection slug to field contracts.
///
/// Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    blocks: BTreeMap<String, BlockSchema>,
    collections: BTreeMap<String, CollectionSchema>,
}

impl SchemaRegistry {
    /// Creates an empty builder.
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Builds the registry of every standard block type and collection.
    pub fn standard() -> Result<Self> {
        let builder = standard_blocks()
            .into_iter()
            .try_fold(Self::builder(), SchemaRegistryBuilder::register)?;
        let builder = standard_collections()
            .into_iter()
            .try_fold(builder, SchemaRegistryBuilder::register_collection)?;
        Ok(builder.build())
    }

    /// Returns the process-wide standard registry, built on first use.
    pub fn global() -> Result<Arc<Self>> {
        match &*GLOBAL {
            Ok(registry) => Ok(Arc::clone(registry)),
            Err(message) => Err(Error::configuration()
                .with_message(message.clone())
                .with_context("standard schema registry")),
        }
    }

    /// Looks up the schema of a block type.
    pub fn resolve_schema(&self, block_type: &str) -> Result<&BlockSchema> {
        self.blocks.get(block_type).ok_or_else(|| {
            Error::not_found().with_message(format!("no schema for block type `{block_type}`"))
        })
    }

    /// Returns true if the block type is registered.
    pub fn contains(&self, block_type: &str) -> bool {
        self.blocks.contains_key(block_type)
    }

    /// Looks up the schema of a collection or global.
    pub fn collection(&self, slug: &str) -> Result<&CollectionSchema> {
        self.collections.get(slug).ok_or_else(|| {
            Error::not_found().with_message(format!("no schema for collection `{slug}`"))
        })
    }

    /// Iterates over the registered block types, in lexical order.
    pub fn block_types(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    /// Returns the number of registered block types.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if no block type is registered.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
