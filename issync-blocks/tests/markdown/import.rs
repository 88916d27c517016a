//! Block-level import tests (Markdown → Notion blocks)

use issync_blocks::{parse_body, Block, ConvertError};
use std::path::PathBuf;

fn kinds(blocks: &[Block]) -> Vec<&'static str> {
    blocks.iter().map(Block::kind).collect()
}

fn texts(block: &Block) -> Vec<&str> {
    block.rich_text().iter().map(|run| run.plain_text()).collect()
}

fn read_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

#[test]
fn test_empty_body() {
    assert_eq!(parse_body("").unwrap(), vec![]);
}

#[test]
fn test_heading_levels() {
    let blocks = parse_body("# one\n\n## two\n\n### three\n\n###### six\n").unwrap();
    assert_eq!(
        kinds(&blocks),
        vec!["heading_1", "heading_2", "heading_3", "heading_3"]
    );
    assert_eq!(texts(&blocks[3]), vec!["six"]);
}

#[test]
fn test_blockquote_is_transparent() {
    let quoted = parse_body("> # hello _world_").unwrap();
    let plain = parse_body("# hello _world_").unwrap();

    assert_eq!(quoted, plain);
    assert_eq!(kinds(&quoted), vec!["heading_1"]);
    assert_eq!(texts(&quoted[0]), vec!["hello ", "world"]);
    assert!(quoted[0].rich_text()[1].annotations.italic);
}

#[test]
fn test_nested_blockquotes_are_inlined() {
    let blocks = parse_body("> first\n>\n> > second\n\nthird").unwrap();
    assert_eq!(kinds(&blocks), vec!["paragraph", "paragraph", "paragraph"]);
}

#[test]
fn test_unordered_list() {
    let blocks = parse_body("* a\n* b").unwrap();
    assert_eq!(kinds(&blocks), vec!["bulleted_list_item", "bulleted_list_item"]);
    assert_eq!(texts(&blocks[0]), vec!["a"]);
    assert_eq!(texts(&blocks[1]), vec!["b"]);
}

#[test]
fn test_ordered_list() {
    let blocks = parse_body("1. a\n2. b\n3. c").unwrap();
    assert_eq!(
        kinds(&blocks),
        vec![
            "numbered_list_item",
            "numbered_list_item",
            "numbered_list_item"
        ]
    );
}

#[test]
fn test_nested_list_text_is_flattened_into_parent_item() {
    let blocks = parse_body("- a\n  - b\n- c").unwrap();
    assert_eq!(kinds(&blocks), vec!["bulleted_list_item", "bulleted_list_item"]);
    assert_eq!(texts(&blocks[0]), vec!["a", "b"]);
    assert_eq!(texts(&blocks[1]), vec!["c"]);
}

#[test]
fn test_code_block_is_single_code_run() {
    let blocks = parse_body("```js\nlet x = *y*;\n\nreturn x;\n```").unwrap();
    assert_eq!(kinds(&blocks), vec!["paragraph"]);

    let runs = blocks[0].rich_text();
    assert_eq!(runs.len(), 1);
    assert!(runs[0].annotations.code);
    assert_eq!(runs[0].plain_text(), "let x = *y*;\n\nreturn x;");
}

#[test]
fn test_code_block_loses_paired_tags() {
    let blocks = parse_body("```js\nconst tag = '<b>*x*</b>';\n```").unwrap();
    assert_eq!(texts(&blocks[0]), vec!["const tag = '';"]);
    assert!(blocks[0].rich_text()[0].annotations.code);
}

#[test]
fn test_code_block_emptied_by_stripping_is_kept_empty() {
    let blocks = parse_body("```html\n<div>x</div>\n```").unwrap();
    assert_eq!(blocks, vec![Block::Paragraph(vec![])]);
}

#[test]
fn test_html_block_pair_is_removed() {
    assert_eq!(parse_body("<div>hello</div>").unwrap(), vec![]);
    assert_eq!(parse_body("<p align=\"center\">hi</p>").unwrap(), vec![]);
}

#[test]
fn test_details_wrapper_keeps_its_markdown() {
    let body = "<details><summary>Logs</summary>\n\nrun **failed**\n\n</details>\n\nafter";
    let blocks = parse_body(body).unwrap();

    assert_eq!(kinds(&blocks), vec!["paragraph", "paragraph"]);
    assert_eq!(texts(&blocks[0]), vec!["run ", "failed"]);
    assert!(blocks[0].rich_text()[1].annotations.bold);
    assert_eq!(texts(&blocks[1]), vec!["after"]);
}

#[test]
fn test_multiline_html_block_converts_enclosed_text() {
    let blocks = parse_body("<div align=\"center\">\n  Built with **care**\n</div>\n").unwrap();
    assert_eq!(kinds(&blocks), vec!["paragraph"]);
    assert_eq!(texts(&blocks[0]), vec!["Built with ", "care"]);
}

#[test]
fn test_html_comment_fails_conversion() {
    let err = parse_body("<!-- describe the bug -->\n\ntext").unwrap_err();
    assert_eq!(
        err,
        ConvertError::UnsupportedNode {
            kind: "html_block".to_string()
        }
    );
}

#[test]
fn test_html_only_paragraph_is_kept_empty() {
    let blocks = parse_body("<sub>hello</sub>").unwrap();
    assert_eq!(blocks, vec![Block::Paragraph(vec![])]);
}

#[test]
fn test_table_fails_conversion() {
    let err = parse_body("| A | B |\n|---|---|\n| 1 | 2 |").unwrap_err();
    assert_eq!(
        err,
        ConvertError::UnsupportedNode {
            kind: "table".to_string()
        }
    );
}

#[test]
fn test_unsupported_node_inside_blockquote_fails() {
    let err = parse_body("> ---\n").unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedNode { .. }));
}

#[test]
fn test_bug_report_fixture() {
    let blocks = parse_body(&read_fixture("bug-report.md")).unwrap();

    assert_eq!(
        kinds(&blocks),
        vec![
            "heading_2",
            "paragraph",
            "heading_3",
            "numbered_list_item",
            "numbered_list_item",
            "numbered_list_item",
            "paragraph",
            "paragraph",
            "heading_3",
            "bulleted_list_item",
            "bulleted_list_item",
        ]
    );

    assert_eq!(
        texts(&blocks[1]),
        vec![
            "Clicking ",
            "Save",
            " fails when the title contains a ",
            "#",
            " character.\nThe error only shows up in the console."
        ]
    );

    let quote = blocks[6].rich_text();
    assert_eq!(texts(&blocks[6]), vec!["Only seen on ", "v2.1", ", "]);
    assert_eq!(
        quote[1].link(),
        Some("https://example.com/releases/v2.1")
    );

    let code = &blocks[7].rich_text()[0];
    assert!(code.annotations.code);
    assert!(code.plain_text().starts_with("TypeError"));
    assert!(code.plain_text().ends_with("(editor.js:120)"));

    let os = blocks[10].rich_text();
    assert_eq!(texts(&blocks[10]), vec!["OS: ", "Windows 10", " Windows 11"]);
    assert!(os[1].annotations.strikethrough);
}
