pub mod decorations;
pub mod positions;
pub mod semantic_tokens;
