//! Markdown import (issue body → Notion blocks)
//!
//! # Library Choice
//!
//! We use `comrak` for tokenizing, with the GFM extensions GitHub itself renders issues with
//! (tables, strikethrough, autolinks). comrak hands back an arena-allocated tree which
//! [`transform`] walks once.
//!
//! # Element Mapping Table
//!
//! | Markdown              | Notion                          | Notes                                     |
//! |-----------------------|---------------------------------|-------------------------------------------|
//! | `#`, `##`, `###`      | heading_1 / heading_2 / heading_3 | `####` and deeper become heading_3      |
//! | Paragraph             | paragraph                       | Kept even when it ends up with no text    |
//! | `- item`              | bulleted_list_item              | One block per item, nested text joins it  |
//! | `1. item`             | numbered_list_item              | Same                                      |
//! | `> quote`             | (contents inlined)              | Blockquotes are transparent               |
//! | Fenced/indented code  | paragraph                       | Single run with the `code` annotation     |
//! |   `*em*`              | italic                          |                                           |
//! |   `**strong**`        | bold                            |                                           |
//! |   `~~del~~`           | strikethrough                   |                                           |
//! |   `` `code` ``        | code                            |                                           |
//! |   `[text](url)`       | text.link                       |                                           |
//! |   `$x$`               | equation run                    | Only with [`ParseOptions::math`]          |
//! |   `<tag>..</tag>`     | (removed)                       | See [`html`]                              |
//! | `<details>` etc.      | (enclosed Markdown only)        | Tags dropped, wrapped content converted   |
//!
//! Tables, thematic breaks and HTML blocks that are not tags (comments, `<!DOCTYPE>`) have no
//! mapping and fail the conversion.

pub mod html;
pub mod parser;
pub mod transform;

use crate::error::ConvertError;
use crate::ir::Block;

/// Knobs for the Markdown import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Remove paired inline HTML tags together with everything between them.
    pub strip_html: bool,
    /// Parse `$...$` and `$$...$$` into equation runs.
    pub math: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strip_html: true,
            math: false,
        }
    }
}

/// Converts an issue body to Notion blocks with the default options.
pub fn parse_body(raw: &str) -> Result<Vec<Block>, ConvertError> {
    parser::parse_from_markdown(raw, &ParseOptions::default())
}

/// Converts an issue body to Notion blocks, with HTML stripping and math set by `options`.
pub fn parse_body_with_options(
    raw: &str,
    options: &ParseOptions,
) -> Result<Vec<Block>, ConvertError> {
    parser::parse_from_markdown(raw, options)
}
