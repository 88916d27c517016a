//! GitHub issues as Notion database pages
//!
//! [`Issue`] is the subset of GitHub's issue object the sync needs. [`issue_properties`] maps it
//! onto database properties whose names come from [`PropertyNames`], and [`PageRequest`] wraps
//! properties and body blocks into create/update request bodies.

use crate::error::ConvertError;
use crate::ir::{Block, RichText};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Notion rejects page creation with more children than this; the rest must be appended.
pub const MAX_CHILDREN_PER_REQUEST: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Milestone {
    pub title: String,
}

/// A GitHub issue as returned by the REST API or carried in an `issues` webhook.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub state: String,
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub assignees: Vec<User>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    pub user: User,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub repository_url: Option<String>,
    /// Present when the "issue" is actually a pull request.
    #[serde(default)]
    pub pull_request: Option<Value>,
}

impl Issue {
    /// Parses either a bare issue object or a webhook payload with an `issue` member.
    pub fn from_json(source: &str) -> Result<Self, ConvertError> {
        let value: Value =
            serde_json::from_str(source).map_err(|e| ConvertError::InvalidIssue(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(mut value: Value) -> Result<Self, ConvertError> {
        if let Some(issue) = value.get_mut("issue").map(Value::take) {
            value = issue;
        }
        serde_json::from_value(value).map_err(|e| ConvertError::InvalidIssue(e.to_string()))
    }

    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// Names of the database properties issue fields are written to.
///
/// An empty name leaves that field out of the page properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyNames {
    pub title: String,
    pub number: String,
    pub state: String,
    pub labels: String,
    pub assignees: String,
    pub milestone: String,
    pub author: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            title: "Title".to_string(),
            number: "Number".to_string(),
            state: "State".to_string(),
            labels: "Labels".to_string(),
            assignees: "Assignees".to_string(),
            milestone: "Milestone".to_string(),
            author: "Author".to_string(),
            url: "URL".to_string(),
            created_at: "Created".to_string(),
            updated_at: "Updated".to_string(),
        }
    }
}

/// Builds the Notion property map for an issue.
pub fn issue_properties(issue: &Issue, names: &PropertyNames) -> Map<String, Value> {
    let mut properties = Map::new();
    let mut insert = |name: &str, value: Value| {
        if !name.is_empty() {
            properties.insert(name.to_string(), value);
        }
    };

    insert(&names.title, json!({ "title": [RichText::plain(&issue.title)] }));
    insert(&names.number, json!({ "number": issue.number }));
    insert(&names.state, json!({ "select": { "name": issue.state } }));
    insert(
        &names.labels,
        multi_select(issue.labels.iter().map(|label| label.name.as_str())),
    );
    insert(
        &names.assignees,
        multi_select(issue.assignees.iter().map(|user| user.login.as_str())),
    );
    insert(
        &names.milestone,
        match &issue.milestone {
            Some(milestone) => json!({ "select": { "name": option_name(&milestone.title) } }),
            None => json!({ "select": null }),
        },
    );
    insert(
        &names.author,
        json!({ "rich_text": [RichText::plain(&issue.user.login)] }),
    );
    insert(&names.url, json!({ "url": issue.html_url }));
    insert(&names.created_at, json!({ "date": { "start": issue.created_at } }));
    insert(&names.updated_at, json!({ "date": { "start": issue.updated_at } }));

    properties
}

fn multi_select<'a>(names: impl Iterator<Item = &'a str>) -> Value {
    let options: Vec<Value> = names.map(|name| json!({ "name": option_name(name) })).collect();
    json!({ "multi_select": options })
}

// Select option names may not contain commas
fn option_name(name: &str) -> String {
    name.replace(',', " ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parent {
    pub database_id: String,
}

/// Body of a create-page or update-page request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    pub properties: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

impl PageRequest {
    /// Create-page body. Blocks beyond [`MAX_CHILDREN_PER_REQUEST`] are returned for a
    /// follow-up append.
    pub fn create(
        database_id: &str,
        issue: &Issue,
        names: &PropertyNames,
        mut blocks: Vec<Block>,
    ) -> (Self, Vec<Block>) {
        let overflow = if blocks.len() > MAX_CHILDREN_PER_REQUEST {
            blocks.split_off(MAX_CHILDREN_PER_REQUEST)
        } else {
            Vec::new()
        };

        let request = PageRequest {
            parent: Some(Parent {
                database_id: database_id.to_string(),
            }),
            properties: issue_properties(issue, names),
            children: Some(blocks),
        };
        (request, overflow)
    }

    /// Update-page body; content blocks are synced separately (see `notion::sync`).
    pub fn update(issue: &Issue, names: &PropertyNames) -> Self {
        PageRequest {
            parent: None,
            properties: issue_properties(issue, names),
            children: None,
        }
    }
}
