//! Convenient re-exports for common use.

pub use crate::content::{Block, BlockShape, BlockType, Collection, ListCollection, Page};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::media::{Media, MediaResolver};
pub use crate::navigation::{NavItem, Navigation};
pub use crate::provider::{ContentProvider, Filter};
pub use crate::resolve::{ContentService, ResolverConfig, Uniqueness};
pub use crate::schema::SchemaRegistry;
pub use crate::view::{PageView, ViewContext, ViewScope, ViewState};
