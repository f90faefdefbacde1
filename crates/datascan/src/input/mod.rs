//! Loading delimited files into typed tables.

mod parser;
mod source;

pub use parser::{DEFAULT_NULL_MARKERS, Parser, ParserConfig};
pub use source::SourceMetadata;
