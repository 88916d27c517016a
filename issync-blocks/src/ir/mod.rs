//! Notion-shaped output model.
//!
//! Everything the Markdown transformer produces lives here: flat [`Block`]s holding
//! [`RichText`] runs. Both serialize straight into the JSON Notion's block endpoints take.

pub mod blocks;
pub mod rich_text;

pub use blocks::Block;
pub use rich_text::{truncate, Annotations, InlineState, RichText, MAX_TEXT_LENGTH};
