//! Issue JSON → Notion page request tests

use insta::assert_snapshot;
use issync_blocks::notion::{plan_block_sync, BlockOp, ExistingChildren, Issue, PageRequest, PropertyNames};
use issync_blocks::{blocks_or_empty, ParseOptions};

const WEBHOOK: &str = r#"{
  "action": "edited",
  "issue": {
    "number": 12,
    "title": "Docs link is broken",
    "body": "The link in the **README** is dead.\n\n- [guide](https://example.com/guide)",
    "state": "open",
    "html_url": "https://github.com/acme/app/issues/12",
    "labels": [{"name": "docs"}],
    "assignees": [],
    "milestone": {"title": "1.0"},
    "user": {"login": "reader"},
    "created_at": "2024-05-01T10:00:00Z",
    "updated_at": "2024-05-02T10:00:00Z"
  }
}"#;

#[test]
fn test_create_request_from_webhook() {
    let issue = Issue::from_json(WEBHOOK).expect("webhook payload parses");
    let blocks = blocks_or_empty(issue.body_text(), &ParseOptions::default());
    let (request, overflow) =
        PageRequest::create("db-123", &issue, &PropertyNames::default(), blocks);
    assert!(overflow.is_empty());

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["parent"]["database_id"], "db-123");
    assert_eq!(json["properties"]["Milestone"]["select"]["name"], "1.0");
    assert_eq!(json["children"][0]["type"], "paragraph");
    assert_eq!(json["children"][1]["type"], "bulleted_list_item");
    assert_eq!(
        json["children"][1]["bulleted_list_item"]["rich_text"][0]["text"]["link"]["url"],
        "https://example.com/guide"
    );
}

#[test]
fn test_unconvertible_body_still_creates_page() {
    let mut issue = Issue::from_json(WEBHOOK).unwrap();
    issue.body = Some("| a | b |\n|---|---|\n| 1 | 2 |".to_string());

    let blocks = blocks_or_empty(issue.body_text(), &ParseOptions::default());
    let (request, _) = PageRequest::create("db", &issue, &PropertyNames::default(), blocks);

    assert_eq!(request.children, Some(vec![]));
    assert_eq!(request.properties.len(), 10);
}

#[test]
fn test_null_body_has_no_children() {
    let mut issue = Issue::from_json(WEBHOOK).unwrap();
    issue.body = None;

    let blocks = blocks_or_empty(issue.body_text(), &ParseOptions::default());
    assert!(blocks.is_empty());
}

#[test]
fn test_plan_against_listed_children() {
    let issue = Issue::from_json(WEBHOOK).unwrap();
    let blocks = blocks_or_empty(issue.body_text(), &ParseOptions::default());
    let existing: ExistingChildren = serde_json::from_str(
        r#"[{"id": "p1", "type": "paragraph"}, {"id": "h1", "type": "heading_1"}]"#,
    )
    .unwrap();

    let ops = plan_block_sync(&existing.into_blocks(), blocks);
    let summary: Vec<String> = ops
        .iter()
        .map(|op| match op {
            BlockOp::Update { block_id, block } => format!("update {block_id} {}", block.kind()),
            BlockOp::Delete { block_id } => format!("delete {block_id}"),
            BlockOp::Append { blocks } => format!("append {}", blocks.len()),
        })
        .collect();

    assert_snapshot!(summary.join("\n"), @r"
    update p1 paragraph
    delete h1
    append 1
    ");
}
