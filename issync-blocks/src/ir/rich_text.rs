//! Rich text runs
//!
//! A run is one contiguous span of text sharing a single set of annotations and an optional
//! link. Notion caps the content of a text run, so [`RichText::text`] truncates on the way in.

use serde::Serialize;

/// Maximum number of characters Notion accepts in a single text run.
pub const MAX_TEXT_LENGTH: usize = 1000;

const ELLIPSIS: char = '…';

/// Style flags applied to a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: "default".to_string(),
        }
    }
}

/// Styling inherited while descending into inline nodes.
///
/// Cloned into every child call: a flag set inside one branch is never visible to its
/// siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineState {
    pub annotations: Annotations,
    pub link: Option<String>,
}

impl InlineState {
    pub fn with_bold(mut self) -> Self {
        self.annotations.bold = true;
        self
    }

    pub fn with_italic(mut self) -> Self {
        self.annotations.italic = true;
        self
    }

    pub fn with_strikethrough(mut self) -> Self {
        self.annotations.strikethrough = true;
        self
    }

    pub fn with_code(mut self) -> Self {
        self.annotations.code = true;
        self
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }
}

/// Link target of a text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSpan {
    pub content: String,
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquationSpan {
    pub expression: String,
}

/// The typed payload of a run; serializes with Notion's `type` discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunContent {
    Text { text: TextSpan },
    Equation { equation: EquationSpan },
}

/// A single styled run inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichText {
    #[serde(flatten)]
    pub content: RunContent,
    pub annotations: Annotations,
}

impl RichText {
    /// Builds a text run, truncating `content` to [`MAX_TEXT_LENGTH`] characters.
    pub fn text(content: &str, annotations: Annotations, link: Option<String>) -> Self {
        RichText {
            content: RunContent::Text {
                text: TextSpan {
                    content: truncate(content),
                    link: link.map(|url| Link { url }),
                },
            },
            annotations,
        }
    }

    /// Text run with default annotations and no link.
    pub fn plain(content: &str) -> Self {
        Self::text(content, Annotations::default(), None)
    }

    /// Text run snapshotting the inherited inline state.
    pub fn from_state(content: &str, state: &InlineState) -> Self {
        Self::text(content, state.annotations.clone(), state.link.clone())
    }

    pub fn equation(expression: &str, annotations: Annotations) -> Self {
        RichText {
            content: RunContent::Equation {
                equation: EquationSpan {
                    expression: truncate(expression),
                },
            },
            annotations,
        }
    }

    /// The visible text of the run (the expression for equations).
    pub fn plain_text(&self) -> &str {
        match &self.content {
            RunContent::Text { text } => &text.content,
            RunContent::Equation { equation } => &equation.expression,
        }
    }

    pub fn link(&self) -> Option<&str> {
        match &self.content {
            RunContent::Text { text } => text.link.as_ref().map(|link| link.url.as_str()),
            RunContent::Equation { .. } => None,
        }
    }
}

/// Cuts `content` to at most [`MAX_TEXT_LENGTH`] characters.
///
/// Longer input keeps its first `MAX_TEXT_LENGTH - 1` characters followed by an ellipsis.
/// Lengths are counted in chars, not bytes.
pub fn truncate(content: &str) -> String {
    if content.chars().count() <= MAX_TEXT_LENGTH {
        return content.to_string();
    }
    let mut truncated: String = content.chars().take(MAX_TEXT_LENGTH - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}
