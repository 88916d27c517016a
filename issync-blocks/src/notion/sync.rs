//! Keeping existing pages in step with their issues
//!
//! Notion has no "replace page content" call. [`plan_block_sync`] turns the page's current
//! children plus the freshly converted blocks into the list of block-level calls that get
//! there, and [`pending_issues`] picks what a backfill still has to create.

use super::page::{Issue, MAX_CHILDREN_PER_REQUEST};
use crate::ir::Block;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A child block already on the page, as listed by Notion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExistingBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Either a list-children response (`{"results": [...]}`) or a bare array of blocks.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExistingChildren {
    Listing { results: Vec<ExistingBlock> },
    Blocks(Vec<ExistingBlock>),
}

impl ExistingChildren {
    pub fn into_blocks(self) -> Vec<ExistingBlock> {
        match self {
            ExistingChildren::Listing { results } => results,
            ExistingChildren::Blocks(blocks) => blocks,
        }
    }
}

/// One block-level API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BlockOp {
    Update { block_id: String, block: Block },
    Delete { block_id: String },
    Append { blocks: Vec<Block> },
}

/// Plans the calls that turn `existing` into `desired`.
///
/// Blocks are updated in place while their types line up. From the first mismatch on, the
/// remaining old blocks are deleted and the remaining new ones appended, since appends can
/// only go to the end of the page.
pub fn plan_block_sync(existing: &[ExistingBlock], desired: Vec<Block>) -> Vec<BlockOp> {
    let matching = existing
        .iter()
        .zip(&desired)
        .take_while(|(old, new)| old.kind == new.kind())
        .count();

    let mut ops = Vec::new();
    let mut desired = desired.into_iter();

    for (old, new) in existing.iter().zip(desired.by_ref()).take(matching) {
        ops.push(BlockOp::Update {
            block_id: old.id.clone(),
            block: new,
        });
    }

    for old in &existing[matching..] {
        ops.push(BlockOp::Delete {
            block_id: old.id.clone(),
        });
    }

    let remaining: Vec<Block> = desired.collect();
    ops.extend(append_batches(remaining));

    tracing::debug!(
        existing = existing.len(),
        updated = matching,
        ops = ops.len(),
        "planned block sync"
    );
    ops
}

/// Splits blocks into append calls of at most [`MAX_CHILDREN_PER_REQUEST`] blocks each.
pub fn append_batches(blocks: Vec<Block>) -> Vec<BlockOp> {
    blocks
        .chunks(MAX_CHILDREN_PER_REQUEST)
        .map(|chunk| BlockOp::Append {
            blocks: chunk.to_vec(),
        })
        .collect()
}

/// Issues a backfill still has to create, ordered by number.
///
/// Pull requests are skipped. With `repository` (`owner/name`) set, issues whose
/// `repository_url` points elsewhere are skipped too.
pub fn pending_issues<'a>(
    issues: &'a [Issue],
    existing_numbers: &HashSet<u64>,
    repository: Option<&str>,
) -> Vec<&'a Issue> {
    let mut pending: Vec<&Issue> = issues
        .iter()
        .filter(|issue| !issue.is_pull_request())
        .filter(|issue| !existing_numbers.contains(&issue.number))
        .filter(|issue| belongs_to(issue, repository))
        .collect();
    pending.sort_by_key(|issue| issue.number);
    pending.dedup_by_key(|issue| issue.number);
    pending
}

fn belongs_to(issue: &Issue, repository: Option<&str>) -> bool {
    match (repository, &issue.repository_url) {
        (Some(repo), Some(url)) if !repo.is_empty() => url
            .to_ascii_lowercase()
            .ends_with(&format!("/repos/{}", repo.to_ascii_lowercase())),
        _ => true,
    }
}
