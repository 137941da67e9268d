//! Output serialization.

mod writer;

pub use writer::{Writer, WriterConfig};
