use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use super::model::{Comment, CommentPatch, Reply};

/// Handle shared by every controller and view on the UI thread.
pub type SharedCommentStore = Rc<RefCell<CommentStore>>;

type Observer = Box<dyn FnMut(&[Comment])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the live comment collection.
///
/// Every mutation notifies all observers with the full collection once the
/// mutation has been applied, including calls that turned out to be no-ops.
#[derive(Default)]
pub struct CommentStore {
    comments: Vec<Comment>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    revision: u64,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments(comments: Vec<Comment>) -> Self {
        let mut store = Self::new();
        for comment in comments {
            store.insert_unique(comment);
        }
        store
    }

    pub fn into_shared(self) -> SharedCommentStore {
        Rc::new(RefCell::new(self))
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn get(&self, id: &str) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id == id)
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Bumped on every mutation call.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&[Comment]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.saturating_add(1);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns whether the subscription was still registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    pub fn create(&mut self, comment: Comment) {
        if self.insert_unique(comment) {
            tracing::info!(count = self.comments.len(), "comment created");
        }
        self.notify();
    }

    pub fn update(&mut self, id: &str, patch: CommentPatch) {
        match self.find_mut(id) {
            Some(comment) => {
                comment.merge(&patch);
                tracing::info!(id, ?patch, "comment updated");
            }
            None => tracing::debug!(id, "update ignored for unknown comment"),
        }
        self.notify();
    }

    pub fn delete(&mut self, id: &str) {
        let before = self.comments.len();
        self.comments.retain(|comment| comment.id != id);
        if self.comments.len() != before {
            tracing::info!(id, count = self.comments.len(), "comment deleted");
        } else {
            tracing::debug!(id, "delete ignored for unknown comment");
        }
        self.notify();
    }

    /// Appends a reply with a freshly generated id and returns that id, or
    /// `None` when `id` names no live comment.
    pub fn add_reply(
        &mut self,
        id: &str,
        text: impl Into<String>,
        author: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Option<String> {
        let reply_id = self.find_mut(id).map(|comment| {
            let reply = Reply {
                id: uuid::Uuid::new_v4().to_string(),
                text: text.into(),
                author: author.into(),
                created_at,
            };
            let reply_id = reply.id.clone();
            comment.push_reply(reply);
            tracing::info!(id, replies = comment.replies.len(), "reply added");
            reply_id
        });
        if reply_id.is_none() {
            tracing::debug!(id, "reply ignored for unknown comment");
        }
        self.notify();
        reply_id
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|comment| comment.id == id)
    }

    fn insert_unique(&mut self, comment: Comment) -> bool {
        if self.get(&comment.id).is_some() {
            tracing::warn!(id = %comment.id, "duplicate comment id rejected");
            return false;
        }
        self.comments.push(comment);
        true
    }

    fn notify(&mut self) {
        self.revision = self.revision.saturating_add(1);
        let comments = &self.comments;
        for (_, observer) in &mut self.observers {
            observer(comments);
        }
    }
}

impl fmt::Debug for CommentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommentStore")
            .field("comments", &self.comments)
            .field("observers", &self.observers.len())
            .field("revision", &self.revision)
            .finish()
    }
}
