use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A single to-do item and its subtasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoNode {
    /// Display title
    pub title: String,
    /// Completion flag
    #[serde(default)]
    pub done: bool,
    /// Free-text label, empty when untagged
    #[serde(default)]
    pub tag: String,
    /// Creation date, never changed after the node is created
    pub date: NaiveDate,
    /// Path to an external memo file, empty when there is none
    #[serde(default, rename = "memo")]
    pub memo_ref: String,
    /// Subtasks in insertion order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<TodoNode>,
}

impl TodoNode {
    /// Create a pending, untagged node with no memo and no children
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        TodoNode {
            title: title.into(),
            done: false,
            tag: String::new(),
            date,
            memo_ref: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_memo(mut self, memo_ref: impl Into<String>) -> Self {
        self.memo_ref = memo_ref.into();
        self
    }

    pub fn has_tag(&self) -> bool {
        !self.tag.is_empty()
    }

    pub fn has_memo(&self) -> bool {
        !self.memo_ref.is_empty()
    }
}

/// The persisted document: an ordered forest of root nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub todos: Vec<TodoNode>,
}

impl TodoDocument {
    pub fn new(todos: Vec<TodoNode>) -> Self {
        TodoDocument { todos }
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

/// Older writers emitted `null` for empty lists.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<TodoNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TodoNode>>::deserialize(deserializer)?.unwrap_or_default())
}
