//! GitHub issue to Notion conversion
//!
//!     This crate turns the Markdown body of a GitHub issue into the block structure Notion
//!     expects, and wraps the result into the request bodies a Notion client sends.
//!
//!     This is a pure lib: it never talks to the network, reads env vars or prints. The
//!     issync-cli crate and any sync job (webhook handler, scheduled backfill) sit on top of it
//!     and own the HTTP side.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs
//!     ├── ir                      # Notion-shaped output: blocks and rich text runs
//!     │   ├── blocks.rs
//!     │   └── rich_text.rs        # Run builder and truncation
//!     ├── markdown
//!     │   ├── html.rs             # Paired-tag stripping on inline, code and HTML block nodes
//!     │   ├── parser.rs           # comrak adapter
//!     │   └── transform.rs        # comrak AST -> flat block list
//!     ├── notion
//!     │   ├── page.rs             # Issue model, database properties, page requests
//!     │   └── sync.rs             # Block update plans and backfill selection
//!     └── lib.rs
//!
//! Core Algorithm
//!
//!     Markdown is a tree, Notion page content (as we write it) is a flat list of blocks whose
//!     text is a list of styled runs. The transformer walks the comrak tree once: block level
//!     nodes pick the block type, inline nodes accumulate styles on an [`ir::InlineState`]
//!     that is handed down by value. Every text leaf becomes one run carrying a snapshot of
//!     that state, so styling never leaks between siblings.
//!
//!     Blockquotes are transparent and each top-level list item is one block, nested items
//!     contributing their text to it. HTML blocks keep only the Markdown their tags wrap. Anything
//!     the transformer has no mapping for is an error rather than silently dropped content;
//!     deciding what to do then is the caller's job (see [`blocks_or_empty`]).
//!
//! Library Choices
//!
//!     comrak does the Markdown tokenizing (with the GFM extensions GitHub renders with),
//!     serde/serde_json produce the Notion wire format.

pub mod error;
pub mod ir;
pub mod markdown;
pub mod notion;

pub use error::ConvertError;
pub use ir::{Annotations, Block, RichText};
pub use markdown::{parse_body, parse_body_with_options, ParseOptions};

/// Converts an issue body, substituting an empty block list when conversion fails.
///
/// A single unsupported construct in an issue body should not keep the issue from being
/// synced, so sync jobs use this instead of [`parse_body_with_options`] directly.
pub fn blocks_or_empty(raw: &str, options: &ParseOptions) -> Vec<Block> {
    match parse_body_with_options(raw, options) {
        Ok(blocks) => blocks,
        Err(err) => {
            tracing::warn!(error = %err, "issue body not converted, sending no content blocks");
            Vec::new()
        }
    }
}
