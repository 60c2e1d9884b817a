use chrono::{DateTime, Utc};

use crate::comments::{Comment, CommentPatch, SharedCommentStore, DEFAULT_AUTHOR};

pub const INBOX_AUTHOR_FALLBACK: &str = "User";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InboxTab {
    #[default]
    All,
    Active,
    Done,
}

impl InboxTab {
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Done];

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Done => "Done",
        }
    }

    pub fn includes(self, comment: &Comment) -> bool {
        match self {
            Self::All => true,
            Self::Active => !comment.resolved,
            Self::Done => comment.resolved,
        }
    }
}

/// List panel with a filtered list and a single-comment detail page.
#[derive(Debug)]
pub struct InboxView {
    store: SharedCommentStore,
    author: String,
    tab: InboxTab,
    selected: Option<String>,
    editing: bool,
    edited_text: String,
    reply_text: String,
}

impl InboxView {
    pub fn new(store: SharedCommentStore) -> Self {
        Self {
            store,
            author: DEFAULT_AUTHOR.to_string(),
            tab: InboxTab::default(),
            selected: None,
            editing: false,
            edited_text: String::new(),
            reply_text: String::new(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn tab(&self) -> InboxTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: InboxTab) {
        self.tab = tab;
    }

    /// Ids of the comments listed under the current tab, in store order.
    pub fn visible_comment_ids(&self) -> Vec<String> {
        self.store
            .borrow()
            .comments()
            .iter()
            .filter(|comment| self.tab.includes(comment))
            .map(|comment| comment.id.clone())
            .collect()
    }

    /// The comment on the detail page. Deleting it elsewhere drops the view
    /// back to the list.
    pub fn active_comment_id(&self) -> Option<String> {
        let selected = self.selected.as_deref()?;
        self.store
            .borrow()
            .get(selected)
            .map(|comment| comment.id.clone())
    }

    pub fn is_detail_open(&self) -> bool {
        self.active_comment_id().is_some()
    }

    pub fn with_active_comment<R>(&self, read: impl FnOnce(&Comment) -> R) -> Option<R> {
        let selected = self.selected.as_deref()?;
        self.store.borrow().get(selected).map(read)
    }

    pub fn author_label(&self, id: &str) -> Option<String> {
        self.store
            .borrow()
            .get(id)
            .map(|comment| comment.author_or(INBOX_AUTHOR_FALLBACK).to_string())
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn back(&mut self) {
        self.selected = None;
        self.editing = false;
        self.edited_text.clear();
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn edited_text(&self) -> &str {
        &self.edited_text
    }

    /// Opens the detail page for `id` with its text loaded into the editor.
    pub fn begin_edit(&mut self, id: &str) {
        let Some(text) = self.store.borrow().get(id).map(|comment| comment.text.clone()) else {
            return;
        };
        self.selected = Some(id.to_string());
        self.editing = true;
        self.edited_text = text;
    }

    pub fn set_edited_text(&mut self, text: impl Into<String>) {
        self.edited_text = text.into();
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
    }

    pub fn submit_edit(&mut self) -> bool {
        if !self.editing || self.edited_text.is_empty() {
            return false;
        }
        let Some(id) = self.active_comment_id() else {
            return false;
        };
        self.store
            .borrow_mut()
            .update(&id, CommentPatch::text(self.edited_text.clone()));
        self.editing = false;
        true
    }

    pub fn set_resolved(&mut self, id: &str, resolved: bool) {
        self.store
            .borrow_mut()
            .update(id, CommentPatch::resolved(resolved));
    }

    pub fn delete(&mut self, id: &str) {
        self.store.borrow_mut().delete(id);
    }

    pub fn reply_text(&self) -> &str {
        &self.reply_text
    }

    pub fn set_reply_text(&mut self, text: impl Into<String>) {
        self.reply_text = text.into();
    }

    pub fn can_submit_reply(&self) -> bool {
        !self.reply_text.is_empty() && self.is_detail_open()
    }

    pub fn submit_reply(&mut self, now: DateTime<Utc>) -> Option<String> {
        if self.reply_text.is_empty() {
            return None;
        }
        let id = self.active_comment_id()?;
        let text = std::mem::take(&mut self.reply_text);
        self.store
            .borrow_mut()
            .add_reply(&id, text, self.author.clone(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::{seed_comments, CommentStore};

    const FIRST: &str = "883aa770-8ed2-4d23-92f4-65ec82190318";
    const SECOND: &str = "58565492-d4d2-4130-a110-8802b111a53a";
    const THIRD: &str = "f97a6b37-eb3e-419a-973b-c4eaed544db8";

    fn inbox() -> (InboxView, SharedCommentStore) {
        let store = CommentStore::with_comments(seed_comments().expect("seed")).into_shared();
        (InboxView::new(store.clone()), store)
    }

    #[test]
    fn tabs_filter_by_resolution() {
        let (mut inbox, _store) = inbox();
        inbox.set_resolved(SECOND, true);

        assert_eq!(inbox.visible_comment_ids(), vec![FIRST, SECOND, THIRD]);
        inbox.select_tab(InboxTab::Active);
        assert_eq!(inbox.visible_comment_ids(), vec![FIRST, THIRD]);
        inbox.select_tab(InboxTab::Done);
        assert_eq!(inbox.visible_comment_ids(), vec![SECOND]);

        let labels = InboxTab::ALL.map(InboxTab::label);
        assert_eq!(labels, ["All", "Active", "Done"]);
    }

    #[test]
    fn deleting_the_selected_comment_returns_to_the_list() {
        let (mut inbox, store) = inbox();
        inbox.select(THIRD);
        assert!(inbox.is_detail_open());

        store.borrow_mut().delete(THIRD);

        assert!(!inbox.is_detail_open());
        assert!(inbox.with_active_comment(|c| c.text.clone()).is_none());
    }

    #[test]
    fn edit_from_list_opens_detail_and_saves() {
        let (mut inbox, store) = inbox();

        inbox.begin_edit(SECOND);
        assert_eq!(inbox.active_comment_id().as_deref(), Some(SECOND));
        assert_eq!(inbox.edited_text(), "this needs to be fixed");

        inbox.set_edited_text("fixed in the next build");
        assert!(inbox.submit_edit());
        assert!(!inbox.is_editing());
        assert_eq!(
            store.borrow().get(SECOND).map(|c| c.text.clone()),
            Some("fixed in the next build".to_string())
        );

        inbox.back();
        assert!(!inbox.is_detail_open());
        assert_eq!(inbox.edited_text(), "");
    }

    #[test]
    fn replies_need_a_selected_comment_and_text() {
        let (mut inbox, store) = inbox();
        inbox.set_reply_text("looks good");
        assert!(!inbox.can_submit_reply());
        assert!(inbox.submit_reply(Utc::now()).is_none());

        inbox.select(SECOND);
        assert!(inbox.can_submit_reply());
        inbox.submit_reply(Utc::now()).expect("reply appended");

        assert_eq!(inbox.reply_text(), "");
        let store = store.borrow();
        let replies = &store.get(SECOND).expect("comment").replies;
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].author, "User");
    }

    #[test]
    fn empty_author_shows_placeholder() {
        let (inbox, store) = inbox();
        store
            .borrow_mut()
            .update(FIRST, CommentPatch::default().with_author(""));
        assert_eq!(inbox.author_label(FIRST).as_deref(), Some("User"));
        assert_eq!(inbox.author_label(SECOND).as_deref(), Some("David Lee"));
    }
}
