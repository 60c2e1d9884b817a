use chrono::{DateTime, Utc};

use crate::comments::{Comment, CommentPatch, SharedCommentStore, DEFAULT_AUTHOR};

use super::time::relative_created_time;

pub const BUBBLE_AUTHOR_FALLBACK: &str = "Unknown User";

/// Rows of the device tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSummary {
    pub window_size: String,
    pub browser: String,
    pub os: String,
}

/// In-place bubble pinned at a comment's position.
#[derive(Debug)]
pub struct BubbleView {
    comment_id: String,
    store: SharedCommentStore,
    author: String,
    hovered: bool,
    menu_open: bool,
    editing: bool,
    edited_text: String,
    replying: bool,
    reply_text: String,
}

impl BubbleView {
    pub fn new(comment_id: impl Into<String>, store: SharedCommentStore) -> Self {
        Self {
            comment_id: comment_id.into(),
            store,
            author: DEFAULT_AUTHOR.to_string(),
            hovered: false,
            menu_open: false,
            editing: false,
            edited_text: String::new(),
            replying: false,
            reply_text: String::new(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn comment_id(&self) -> &str {
        &self.comment_id
    }

    pub fn with_comment<R>(&self, read: impl FnOnce(&Comment) -> R) -> Option<R> {
        self.store.borrow().get(&self.comment_id).map(read)
    }

    pub fn is_live(&self) -> bool {
        self.with_comment(|_| ()).is_some()
    }

    pub fn author_label(&self) -> Option<String> {
        self.with_comment(|comment| comment.author_or(BUBBLE_AUTHOR_FALLBACK).to_string())
    }

    pub fn created_label(&self, now: DateTime<Utc>) -> Option<String> {
        self.with_comment(|comment| relative_created_time(comment.created_at, now))
    }

    pub fn device_summary(&self) -> Option<DeviceSummary> {
        self.with_comment(|comment| DeviceSummary {
            window_size: format!("{}x{}", comment.viewport.width, comment.viewport.height),
            browser: comment.device.browser_label(),
            os: comment.device.os.clone(),
        })
    }

    /// The detail card shows while hovered, replying, editing or with the
    /// menu open.
    pub fn panel_visible(&self) -> bool {
        self.hovered || self.replying || self.menu_open || self.editing
    }

    pub fn hover_start(&mut self) {
        self.hovered = true;
    }

    pub fn hover_end(&mut self) {
        self.hovered = false;
    }

    pub fn click(&mut self) {
        self.replying = !self.replying;
    }

    pub fn is_replying(&self) -> bool {
        self.replying
    }

    pub fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn edited_text(&self) -> &str {
        &self.edited_text
    }

    pub fn begin_edit(&mut self) {
        let Some(text) = self.with_comment(|comment| comment.text.clone()) else {
            return;
        };
        self.editing = true;
        self.edited_text = text;
        self.menu_open = false;
    }

    pub fn set_edited_text(&mut self, text: impl Into<String>) {
        self.edited_text = text.into();
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.edited_text = self
            .with_comment(|comment| comment.text.clone())
            .unwrap_or_default();
    }

    pub fn can_submit_edit(&self) -> bool {
        self.editing && !self.edited_text.is_empty()
    }

    pub fn submit_edit(&mut self) -> bool {
        if !self.can_submit_edit() {
            return false;
        }
        self.store
            .borrow_mut()
            .update(&self.comment_id, CommentPatch::text(self.edited_text.clone()));
        self.editing = false;
        true
    }

    pub fn set_resolved(&mut self, resolved: bool) {
        self.store
            .borrow_mut()
            .update(&self.comment_id, CommentPatch::resolved(resolved));
    }

    pub fn reply_text(&self) -> &str {
        &self.reply_text
    }

    pub fn set_reply_text(&mut self, text: impl Into<String>) {
        self.reply_text = text.into();
    }

    pub fn can_submit_reply(&self) -> bool {
        !self.reply_text.is_empty()
    }

    /// Appends the reply draft and closes the reply field.
    pub fn submit_reply(&mut self, now: DateTime<Utc>) -> Option<String> {
        if !self.can_submit_reply() {
            return None;
        }
        let text = std::mem::take(&mut self.reply_text);
        let reply_id = self
            .store
            .borrow_mut()
            .add_reply(&self.comment_id, text, self.author.clone(), now);
        self.replying = false;
        reply_id
    }

    pub fn delete(&mut self) {
        self.store.borrow_mut().delete(&self.comment_id);
        self.menu_open = false;
    }
}
