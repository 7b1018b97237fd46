//! # sqlmark
//!
//! Finds SQL embedded in C# verbatim and interpolated string literals and classifies it for
//! display. Nothing here edits source text: the output is a set of ranges per category.
//!
//! File Layout
//!
//! The engine is a one-way pipeline. Each stage lives in its own module and only consumes the
//! output of the stage before it:
//!
//! src/sqlmark
//!   ├── document       Line-addressable text buffer (the host editor boundary)
//!   ├── regions        `// sql begin` .. `// sql end` marker pairs
//!   ├── extraction     `@"..."`, `$@"..."` and `@$"..."` literal spans inside a region
//!   ├── interpolation  Splits interpolated literals around `{expression}` holes
//!   ├── tokenizing     Regex matchers producing classified, possibly overlapping, ranges
//!   └── pipeline       Runs the stages over a document and buckets ranges by category
//!
//! `hints` holds the single-line `// sql` hint predicate. It is not part of the pipeline.
//!
//! Malformed input never produces an error. A missing end marker, an unterminated literal or
//! an unbalanced hole simply yields no output for that unit.

pub mod sqlmark;

pub use sqlmark::pipeline::{highlight, Highlights};
pub use sqlmark::tokenizing::{classify, Category, ClassifiedToken};
