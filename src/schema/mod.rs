//! Column schema subsystem
//!
//! Field descriptors declare how a record type maps onto CSV columns. The
//! resolver turns them into a `ColumnSchema` for one document:
//!
//! - no-header mode: declared indices only
//! - header mode: lookup by column name, strict or lenient
//! - discovery mode: descriptors derived from the header itself
//!
//! Schemas are plain return values. Sharing them between calls goes through
//! the explicit `SchemaCache`.

mod cache;
mod errors;
mod resolver;
mod types;

pub use cache::{SchemaCache, DEFAULT_MAX_ENTRIES};
pub use errors::{SchemaError, SchemaResult};
pub use resolver::{discover, for_writing, resolve};
pub use types::{ColumnSchema, FieldDescriptor, FieldId, FieldType, ResolvedColumn};
