//! Block and collection schemas.
//!
//! A schema is the source of truth for the stored shape of a block or
//! document. The resolver validates raw JSON against it and uses it to find
//! every media field that needs normalizing before decoding.

mod blocks;
mod collections;
mod field;
mod registry;

pub use self::blocks::standard_blocks;
pub use self::collections::standard_collections;
pub use self::field::{FieldKind, FieldSchema};
pub use self::registry::{BlockSchema, CollectionSchema, SchemaRegistry, SchemaRegistryBuilder};
