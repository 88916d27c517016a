//! Paired HTML tag stripping
//!
//! Issue bodies often carry inline HTML (`<sub>`, `<kbd>`, `<img>` inside `<p>` ...) that has
//! no Notion counterpart. On every line, everything from the first opening tag to the last
//! closing tag is dropped, tags included. This is deliberately greedy and not nesting-aware:
//! `<a>x</a>text<a>y</a>` loses `text` as well. A line break ends the match, so tags on
//! different lines never pair up.
//!
//! The removal runs on comrak's tree rather than on the raw string so that the enclosing
//! block survives: `<sub>hello</sub>` still yields an (empty) paragraph. Three places see it:
//!
//!   - inline siblings ([`strip_paired_tags`]), where tags are `html_inline` nodes
//!   - code span and code block literals ([`strip_paired_text`]), so `` `<b>x</b>` `` loses
//!     the pair just as prose does
//!   - HTML block literals ([`strip_html_block`]), which additionally lose stray single tags
//!     so that `<details>` wrappers leave only the Markdown they enclose
//!
//! A pair split across an emphasis boundary (`**<sub>x**</sub>`) lives in two sibling lists and
//! is not matched; its tags still produce no text.

use comrak::nodes::{AstNode, NodeValue};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static OPENING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<\w+[^>]*>$").expect("opening tag pattern is valid"));
static CLOSING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^</\w+\s*>$").expect("closing tag pattern is valid"));

// `.` and the tag bodies never cross a newline, so every match stays on one line
static PAIRED_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\w+[^>\n]*>.*</\w+[ \t]*>").expect("paired span pattern is valid")
});
static ANY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?\w+[^>\n]*>").expect("tag pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Open,
    Close,
    LineBreak,
    Other,
}

fn role(node: &AstNode<'_>) -> Role {
    match &node.data.borrow().value {
        NodeValue::HtmlInline(tag) => {
            let tag = tag.trim();
            if CLOSING_TAG.is_match(tag) {
                Role::Close
            } else if OPENING_TAG.is_match(tag) {
                Role::Open
            } else {
                Role::Other
            }
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => Role::LineBreak,
        _ => Role::Other,
    }
}

/// Removes paired tags and their contents from a list of sibling inline nodes.
pub fn strip_paired_tags<'a>(children: Vec<&'a AstNode<'a>>) -> Vec<&'a AstNode<'a>> {
    let roles: Vec<Role> = children.iter().map(|child| role(child)).collect();
    let mut keep = vec![true; children.len()];

    let mut line_start = 0;
    while line_start < children.len() {
        let line_end = roles[line_start..]
            .iter()
            .position(|role| *role == Role::LineBreak)
            .map_or(children.len(), |offset| line_start + offset);

        if let Some((first, last)) = greedy_span(&roles[line_start..line_end]) {
            for flag in &mut keep[line_start + first..=line_start + last] {
                *flag = false;
            }
        }

        line_start = line_end + 1;
    }

    children
        .into_iter()
        .zip(keep)
        .filter_map(|(child, keep)| keep.then_some(child))
        .collect()
}

/// First opening tag to the last closing tag after it, if any.
fn greedy_span(line: &[Role]) -> Option<(usize, usize)> {
    let first = line.iter().position(|role| *role == Role::Open)?;
    let last = line.iter().rposition(|role| *role == Role::Close)?;
    (last > first).then_some((first, last))
}

/// Same greedy per-line removal, applied to a raw literal.
pub fn strip_paired_text(text: &str) -> Cow<'_, str> {
    PAIRED_SPAN.replace_all(text, "")
}

/// What an HTML block leaves behind: paired spans go first, then any tag left on its own.
pub fn strip_html_block(literal: &str) -> String {
    let without_pairs = strip_paired_text(literal);
    ANY_TAG.replace_all(&without_pairs, "").into_owned()
}
