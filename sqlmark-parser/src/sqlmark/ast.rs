//! Data model shared by the pipeline stages
//!
//! All values here are transient: they are rebuilt on every highlighting pass and carry no
//! identity between passes.

pub mod literal;
pub mod range;

pub use literal::{LiteralKind, MarkedRegion, SqlSegment, StringLiteralSpan};
pub use range::{Position, Range, SourceLocation};
