//! Markdown import tests
//!
//! Issue body Markdown → Notion blocks, checked on the resulting block/run structure.

mod import;
mod inline;
