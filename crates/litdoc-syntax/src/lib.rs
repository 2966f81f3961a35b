//! Parser front ends for litdoc.

pub mod kinds;
pub mod parser;

pub use kinds::node_kind;
pub use parser::JavaScriptParser;
