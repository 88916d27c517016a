//! Markdown parsing
//!
//! Pipeline: Markdown string → Comrak AST → Notion blocks

use super::transform::parse_node;
use super::ParseOptions;
use crate::error::ConvertError;
use crate::ir::Block;
use comrak::{parse_document, Arena, ComrakOptions};

/// Parse a Markdown string into Notion blocks
pub fn parse_from_markdown(source: &str, options: &ParseOptions) -> Result<Vec<Block>, ConvertError> {
    let arena = Arena::new();
    let comrak_options = comrak_options(options);
    let root = parse_document(&arena, source, &comrak_options);

    let blocks = parse_node(root, options)?;
    tracing::debug!(blocks = blocks.len(), "converted markdown body");
    Ok(blocks)
}

fn comrak_options(options: &ParseOptions) -> ComrakOptions<'static> {
    let mut comrak_options = ComrakOptions::default();
    comrak_options.extension.table = true;
    comrak_options.extension.strikethrough = true;
    comrak_options.extension.autolink = true;
    comrak_options.extension.math_dollars = options.math;
    comrak_options
}
