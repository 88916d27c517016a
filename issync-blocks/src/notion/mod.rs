//! Notion-side payloads built from GitHub issues.
//!
//! Only request bodies and plans live here; sending them is up to the caller.

pub mod page;
pub mod sync;

pub use page::{issue_properties, Issue, PageRequest, PropertyNames, MAX_CHILDREN_PER_REQUEST};
pub use sync::{append_batches, pending_issues, plan_block_sync, BlockOp, ExistingBlock, ExistingChildren};
