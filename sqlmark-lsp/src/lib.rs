//! Language server for SQL embedded in C# string literals
//!
//!     The server keeps the open documents, runs the sqlmark highlighting pass over them and
//!     pushes the result to the editor. Highlighting only touches literals inside
//!     `// sql begin` .. `// sql end` regions of documents whose language id is enabled in the
//!     configuration (`csharp` by default).
//!
//! Architecture
//!
//!     LSP Layer (tower-lsp):
//!         - JSON-RPC transport, capability negotiation, request routing
//!
//!     Server Layer ([`server`]):
//!         - Document store keyed by URI (full text sync)
//!         - One debounced pass per document ([`debounce`]); a burst of edits yields one pass
//!         - Configuration reloads swap the whole style sheet and re-run every open document
//!
//!     Feature Layer ([`features`]):
//!         - `decorations`: the `sqlmark/decorations` notification, one whole-set replacement per
//!           category in emit order
//!         - `semantic_tokens`: `textDocument/semanticTokens/full` with the category legend
//!         - `positions`: byte columns to UTF-16 columns
//!
//! Usage
//!
//!     $ sqlmark-lsp [-c|--config <file>]
//!     Serves on stdin/stdout. Logs go to stderr, filtered by `RUST_LOG` (default `warn`).

pub mod debounce;
pub mod features;
pub mod server;

pub use server::SqlmarkLanguageServer;
