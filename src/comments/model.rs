use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::device::DeviceContext;
use crate::geometry::{Point, Size};

/// Author written on comments and replies when nobody is signed in.
pub const DEFAULT_AUTHOR: &str = "User";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: String,
    /// Surface coordinates of the locked cursor.
    pub position: Point,
    /// `position` divided by `viewport` when the comment was created. Never
    /// recomputed, so it drifts after the viewport is resized.
    pub relative_position: Point,
    pub viewport: Size,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub resolved: bool,
    pub device: DeviceContext,
    #[serde(default)]
    pub replies: Vec<Reply>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn author_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.author.is_empty() {
            fallback
        } else {
            &self.author
        }
    }

    pub(super) fn merge(&mut self, patch: &CommentPatch) {
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
        if let Some(author) = &patch.author {
            self.author.clone_from(author);
        }
        if let Some(resolved) = patch.resolved {
            self.resolved = resolved;
        }
    }

    pub(super) fn push_reply(&mut self, reply: Reply) {
        self.replies.push(reply);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Fields of a [`Comment`] that may change after creation. `None` keeps the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPatch {
    pub text: Option<String>,
    pub author: Option<String>,
    pub resolved: Option<bool>,
}

impl CommentPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn resolved(resolved: bool) -> Self {
        Self {
            resolved: Some(resolved),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}
