//! Inline styling tests: how annotations and links end up on runs

use issync_blocks::ir::MAX_TEXT_LENGTH;
use issync_blocks::{parse_body, parse_body_with_options, Annotations, ParseOptions, RichText};

fn runs(md: &str) -> Vec<RichText> {
    let blocks = parse_body(md).expect("Should parse markdown");
    assert_eq!(blocks.len(), 1, "expected a single block for {md:?}");
    blocks[0].rich_text().to_vec()
}

#[test]
fn test_nested_emphasis_end_to_end() {
    let runs = runs("Hello _world **foo**_! `code`");
    let texts: Vec<&str> = runs.iter().map(|run| run.plain_text()).collect();
    assert_eq!(texts, vec!["Hello ", "world ", "foo", "! ", "code"]);

    assert_eq!(runs[0].annotations, Annotations::default());

    assert!(runs[1].annotations.italic);
    assert!(!runs[1].annotations.bold);

    assert!(runs[2].annotations.italic);
    assert!(runs[2].annotations.bold);

    assert_eq!(runs[3].annotations, Annotations::default());

    assert!(runs[4].annotations.code);
    assert!(!runs[4].annotations.italic);
    assert!(!runs[4].annotations.bold);
}

#[test]
fn test_sibling_spans_do_not_share_annotations() {
    let runs = runs("_one_ and **two**");

    assert!(runs[0].annotations.italic);
    assert!(!runs[0].annotations.bold);
    assert_eq!(runs[1].annotations, Annotations::default());
    assert!(runs[2].annotations.bold);
    assert!(!runs[2].annotations.italic);
}

#[test]
fn test_children_of_one_span_stay_isolated() {
    let runs = runs("*a **b** c `d` e*");
    let bold: Vec<bool> = runs.iter().map(|run| run.annotations.bold).collect();
    let code: Vec<bool> = runs.iter().map(|run| run.annotations.code).collect();

    assert_eq!(bold, vec![false, true, false, false, false]);
    assert_eq!(code, vec![false, false, false, true, false]);
    assert!(runs.iter().all(|run| run.annotations.italic));
}

#[test]
fn test_link_target_on_link_text_only() {
    let runs = runs("[the **docs**](https://docs.example.com) are here");

    assert_eq!(runs[0].link(), Some("https://docs.example.com"));
    assert_eq!(runs[1].link(), Some("https://docs.example.com"));
    assert!(runs[1].annotations.bold);
    assert_eq!(runs[2].link(), None);
    assert_eq!(runs[2].plain_text(), " are here");
}

#[test]
fn test_bare_urls_become_links() {
    let runs = runs("see https://example.com/a");
    assert_eq!(runs[1].plain_text(), "https://example.com/a");
    assert_eq!(runs[1].link(), Some("https://example.com/a"));
}

#[test]
fn test_strikethrough() {
    let runs = runs("~~old~~ new");
    assert!(runs[0].annotations.strikethrough);
    assert!(!runs[1].annotations.strikethrough);
}

#[test]
fn test_images_contribute_no_text() {
    let runs = runs("before ![screenshot](https://example.com/s.png) after");
    let texts: Vec<&str> = runs.iter().map(|run| run.plain_text()).collect();
    assert_eq!(texts, vec!["before ", " after"]);
}

#[test]
fn test_long_text_is_truncated() {
    let long = "word ".repeat(400);
    let runs = runs(long.trim_end());
    assert_eq!(runs[0].plain_text().chars().count(), MAX_TEXT_LENGTH);
    assert!(runs[0].plain_text().ends_with('…'));
}

#[test]
fn test_html_kept_when_stripping_disabled() {
    let options = ParseOptions {
        strip_html: false,
        ..ParseOptions::default()
    };
    let blocks = parse_body_with_options("a <kbd>Ctrl</kbd> b", &options).unwrap();
    let texts: Vec<&str> = blocks[0]
        .rich_text()
        .iter()
        .map(|run| run.plain_text())
        .collect();
    assert_eq!(texts, vec!["a ", "Ctrl", " b"]);
}

#[test]
fn test_code_span_loses_paired_tags() {
    let runs = runs("use `<b>x</b>` here and `a<i>b</i>c`");
    let texts: Vec<&str> = runs.iter().map(|run| run.plain_text()).collect();
    assert_eq!(texts, vec!["use ", " here and ", "ac"]);
    assert!(runs[2].annotations.code);
}

#[test]
fn test_code_span_kept_verbatim_when_stripping_disabled() {
    let options = ParseOptions {
        strip_html: false,
        ..ParseOptions::default()
    };
    let blocks = parse_body_with_options("`<b>x</b>`", &options).unwrap();
    assert_eq!(blocks[0].rich_text()[0].plain_text(), "<b>x</b>");
}
