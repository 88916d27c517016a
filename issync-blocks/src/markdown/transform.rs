//! Comrak AST → Notion blocks
//!
//! Two mutually recursive walks: [`parse_node`] dispatches block-level nodes to block types,
//! [`parse_text`] flattens everything below a block into runs. Inline styling is carried in an
//! [`InlineState`] passed by value, so each child starts from the state of its parent and
//! nothing a sibling sets can leak across.

use super::html::{strip_html_block, strip_paired_tags, strip_paired_text};
use super::parser::parse_from_markdown;
use super::ParseOptions;
use crate::error::ConvertError;
use crate::ir::{Block, InlineState, RichText};
use comrak::nodes::{AstNode, ListType, NodeValue};
use std::borrow::Cow;

/// Convert the direct children of `root` into a flat list of blocks
pub fn parse_node<'a>(
    root: &'a AstNode<'a>,
    options: &ParseOptions,
) -> Result<Vec<Block>, ConvertError> {
    let mut blocks = Vec::new();
    for child in root.children() {
        collect_blocks(child, options, &mut blocks)?;
    }
    Ok(blocks)
}

fn collect_blocks<'a>(
    node: &'a AstNode<'a>,
    options: &ParseOptions,
    blocks: &mut Vec<Block>,
) -> Result<(), ConvertError> {
    let node_data = node.data.borrow();
    tracing::trace!(node = node_kind(&node_data.value), "dispatching block");

    match &node_data.value {
        NodeValue::Heading(heading) => {
            let runs = parse_children(node, InlineState::default(), options);
            blocks.push(Block::heading(heading.level, runs));
        }

        NodeValue::Paragraph => {
            let runs = parse_children(node, InlineState::default(), options);
            blocks.push(Block::Paragraph(runs));
        }

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            for item in node.children() {
                let runs = parse_text(item, InlineState::default(), options);
                blocks.push(if ordered {
                    Block::NumberedListItem(runs)
                } else {
                    Block::BulletedListItem(runs)
                });
            }
        }

        NodeValue::BlockQuote => {
            for child in node.children() {
                collect_blocks(child, options, blocks)?;
            }
        }

        NodeValue::CodeBlock(code_block) => {
            let runs = code_runs(&code_block.literal, InlineState::default(), options);
            blocks.push(Block::Paragraph(runs));
        }

        // Whatever Markdown the tags wrapped is converted like the rest of the body
        NodeValue::HtmlBlock(html) if options.strip_html => {
            let remainder = strip_html_block(&html.literal);
            if remainder == html.literal {
                return Err(ConvertError::unsupported(node_kind(&node_data.value)));
            }
            if !remainder.trim().is_empty() {
                blocks.extend(parse_from_markdown(&remainder, options)?);
            }
        }

        other => return Err(ConvertError::unsupported(node_kind(other))),
    }

    Ok(())
}

/// Flatten a node and its descendants into runs styled by `state`
pub fn parse_text<'a>(
    node: &'a AstNode<'a>,
    state: InlineState,
    options: &ParseOptions,
) -> Vec<RichText> {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Text(text) => vec![RichText::from_state(text, &state)],
        NodeValue::SoftBreak | NodeValue::LineBreak => vec![RichText::from_state("\n", &state)],
        NodeValue::Code(code) => code_runs(&code.literal, state, options),
        NodeValue::CodeBlock(code_block) => code_runs(&code_block.literal, state, options),
        NodeValue::Math(math) => vec![RichText::equation(&math.literal, state.annotations)],

        NodeValue::Emph => parse_children(node, state.with_italic(), options),
        NodeValue::Strong => parse_children(node, state.with_bold(), options),
        NodeValue::Strikethrough => parse_children(node, state.with_strikethrough(), options),
        NodeValue::Link(link) => parse_children(node, state.with_link(link.url.clone()), options),

        // No text of their own once paired tags are gone; alt text is not body content
        NodeValue::HtmlInline(_) | NodeValue::HtmlBlock(_) | NodeValue::Image(_) => Vec::new(),

        _ => parse_children(node, state, options),
    }
}

/// Runs for all children of `node`, each child getting its own copy of `state`.
///
/// Adjacent text and line break leaves are joined into a single run, so a paragraph
/// wrapped over several source lines reads as one span of text.
fn parse_children<'a>(
    node: &'a AstNode<'a>,
    state: InlineState,
    options: &ParseOptions,
) -> Vec<RichText> {
    let children: Vec<&'a AstNode<'a>> = node.children().collect();
    let children = if options.strip_html {
        strip_paired_tags(children)
    } else {
        children
    };

    let mut runs = Vec::new();
    let mut pending: Option<String> = None;

    for child in children {
        if let Some(text) = text_leaf(child) {
            pending.get_or_insert_with(String::new).push_str(&text);
            continue;
        }
        if let Some(text) = pending.take() {
            runs.push(RichText::from_state(&text, &state));
        }
        runs.extend(parse_text(child, state.clone(), options));
    }
    if let Some(text) = pending.take() {
        runs.push(RichText::from_state(&text, &state));
    }

    runs
}

fn text_leaf(node: &AstNode<'_>) -> Option<String> {
    match &node.data.borrow().value {
        NodeValue::Text(text) => Some(text.clone()),
        NodeValue::SoftBreak | NodeValue::LineBreak => Some("\n".to_string()),
        _ => None,
    }
}

/// One code run for a code span or block body, minus a single trailing newline.
///
/// A body that paired-tag removal empties produces no run.
fn code_runs(literal: &str, state: InlineState, options: &ParseOptions) -> Vec<RichText> {
    let literal = if options.strip_html {
        strip_paired_text(literal)
    } else {
        Cow::Borrowed(literal)
    };
    // Owned only when a pair was removed
    if matches!(&literal, Cow::Owned(rest) if rest.trim().is_empty()) {
        return Vec::new();
    }
    let body = literal.strip_suffix('\n').unwrap_or(&literal);
    vec![RichText::from_state(body, &state.with_code())]
}

/// Lowercase name of a node kind, as used in conversion errors.
pub(crate) fn node_kind(value: &NodeValue) -> &'static str {
    match value {
        NodeValue::Document => "document",
        NodeValue::FrontMatter(_) => "frontmatter",
        NodeValue::BlockQuote => "block_quote",
        NodeValue::MultilineBlockQuote(_) => "multiline_block_quote",
        NodeValue::List(_) => "list",
        NodeValue::Item(_) => "item",
        NodeValue::TaskItem(_) => "taskitem",
        NodeValue::DescriptionList => "description_list",
        NodeValue::DescriptionItem(_) => "description_item",
        NodeValue::DescriptionTerm => "description_term",
        NodeValue::DescriptionDetails => "description_details",
        NodeValue::CodeBlock(_) => "code_block",
        NodeValue::HtmlBlock(_) => "html_block",
        NodeValue::Paragraph => "paragraph",
        NodeValue::Heading(_) => "heading",
        NodeValue::ThematicBreak => "thematic_break",
        NodeValue::FootnoteDefinition(_) => "footnote_definition",
        NodeValue::Table(_) => "table",
        NodeValue::TableRow(_) => "table_row",
        NodeValue::TableCell => "table_cell",
        NodeValue::Text(_) => "text",
        NodeValue::SoftBreak => "softbreak",
        NodeValue::LineBreak => "linebreak",
        NodeValue::Code(_) => "code",
        NodeValue::HtmlInline(_) => "html_inline",
        NodeValue::Emph => "emph",
        NodeValue::Strong => "strong",
        NodeValue::Strikethrough => "strikethrough",
        NodeValue::Superscript => "superscript",
        NodeValue::Underline => "underline",
        NodeValue::SpoileredText => "spoiler",
        NodeValue::Link(_) => "link",
        NodeValue::Image(_) => "image",
        NodeValue::FootnoteReference(_) => "footnote_reference",
        NodeValue::Math(_) => "math",
        NodeValue::WikiLink(_) => "wikilink",
        NodeValue::Escaped => "escaped",
        NodeValue::EscapedTag(_) => "escaped_tag",
        // Only present with comrak's `shortcodes` feature
        #[allow(unreachable_patterns)]
        _ => "shortcode",
    }
}
