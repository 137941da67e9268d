//! Input loading and the in-memory table model.

mod loader;
mod source;

pub use loader::{COMMON_NULL_TOKENS, Loader, LoaderConfig};
pub(crate) use loader::ascii_byte;
pub use source::{Dataset, SourceMetadata, Table};
