//! Notion content blocks

use super::rich_text::RichText;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A top-level content block, as appended to a Notion page.
///
/// Lists are flattened: every item is its own block, there is no container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<RichText>),
    Heading1(Vec<RichText>),
    Heading2(Vec<RichText>),
    Heading3(Vec<RichText>),
    BulletedListItem(Vec<RichText>),
    NumberedListItem(Vec<RichText>),
}

impl Block {
    /// Heading block for a Markdown heading level. Notion stops at three, deeper levels
    /// collapse into `heading_3`.
    pub fn heading(level: u8, runs: Vec<RichText>) -> Self {
        match level {
            0 | 1 => Block::Heading1(runs),
            2 => Block::Heading2(runs),
            _ => Block::Heading3(runs),
        }
    }

    /// The Notion block type name, also the key holding the block payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
        }
    }

    pub fn rich_text(&self) -> &[RichText] {
        match self {
            Block::Paragraph(runs)
            | Block::Heading1(runs)
            | Block::Heading2(runs)
            | Block::Heading3(runs)
            | Block::BulletedListItem(runs)
            | Block::NumberedListItem(runs) => runs,
        }
    }
}

struct BlockPayload<'a> {
    rich_text: &'a [RichText],
}

impl Serialize for BlockPayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("rich_text", self.rich_text)?;
        map.end()
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("object", "block")?;
        map.serialize_entry("type", kind)?;
        map.serialize_entry(
            kind,
            &BlockPayload {
                rich_text: self.rich_text(),
            },
        )?;
        map.end()
    }
}
