use std::cell::Cell;
use std::rc::Rc;

use chrono::Utc;

use crate::annotation::{BubbleView, InboxView};
use crate::comments::{SharedCommentStore, SubscriptionId, DEFAULT_AUTHOR};
use crate::cursor::CursorLockController;
use crate::device::DeviceInfoSource;
use crate::dock::{
    inbox_zone_rects, toolbar_zone_rects, DockCommit, InboxDock, ToolbarBands, ToolbarDock,
};
use crate::error::AppResult;
use crate::geometry::{Rect, Size};
use crate::input::{
    resolve_shortcut, InputContext, ShortcutAction, ShortcutKey, ShortcutModifiers,
};
use crate::state::{CursorEvent, StateError};
use crate::surface::{ElementId, GeometryProvider};

mod demo;

pub(crate) use demo::run_demo_session;

const DEFAULT_INBOX_PADDING: f64 = 16.0;

/// Wires the store, the cursor controller, both docks and the comment views
/// together the way the overlay host drives them.
pub struct App {
    store: SharedCommentStore,
    device: Rc<dyn DeviceInfoSource>,
    author: String,
    toolbar_bands: ToolbarBands,
    inbox_padding: f64,
    toolbar: ToolbarDock,
    inbox_dock: InboxDock,
    cursor: Option<CursorLockController>,
    inbox: InboxView,
    bubbles: Vec<BubbleView>,
    inbox_open: bool,
    menu_open: bool,
    needs_render: Rc<Cell<bool>>,
    subscription: Option<SubscriptionId>,
}

impl App {
    pub fn new(store: SharedCommentStore, device: Rc<dyn DeviceInfoSource>) -> Self {
        Self {
            inbox: InboxView::new(store.clone()),
            store,
            device,
            author: DEFAULT_AUTHOR.to_string(),
            toolbar_bands: ToolbarBands::default(),
            inbox_padding: DEFAULT_INBOX_PADDING,
            toolbar: ToolbarDock::new(),
            inbox_dock: InboxDock::new(),
            cursor: None,
            bubbles: Vec::new(),
            inbox_open: false,
            menu_open: false,
            needs_render: Rc::new(Cell::new(true)),
            subscription: None,
        }
    }

    /// Author written on new comments and replies.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self.inbox = InboxView::new(self.store.clone()).with_author(self.author.clone());
        self
    }

    pub fn with_toolbar_bands(mut self, bands: ToolbarBands) -> Self {
        self.toolbar_bands = bands;
        self
    }

    pub fn with_inbox_padding(mut self, padding: f64) -> Self {
        self.inbox_padding = padding.max(0.0);
        self
    }

    /// Subscribes to the store and builds a bubble for every comment.
    pub fn start(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        let needs_render = Rc::clone(&self.needs_render);
        let id = self
            .store
            .borrow_mut()
            .subscribe(move |_| needs_render.set(true));
        self.subscription = Some(id);
        self.sync_bubbles();
        tracing::info!(comments = self.bubbles.len(), "annotation overlay started");
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.store.borrow_mut().unsubscribe(id);
        }
        self.exit_comment_mode();
        tracing::info!("annotation overlay stopped");
    }

    pub fn store(&self) -> &SharedCommentStore {
        &self.store
    }

    /// Zone rectangles the host should publish to its geometry provider for
    /// the given viewport and, when the inbox is shown, its container.
    pub fn zone_layout(
        &self,
        viewport: Size,
        inbox_container: Option<Rect>,
    ) -> Vec<(ElementId, Rect)> {
        let mut layout: Vec<(ElementId, Rect)> = toolbar_zone_rects(viewport, self.toolbar_bands)
            .into_iter()
            .map(|(zone, rect)| (ElementId::Zone(zone), rect))
            .collect();
        if let Some(container) = inbox_container.filter(|_| self.inbox_open) {
            layout.extend(
                inbox_zone_rects(container, self.inbox_padding)
                    .into_iter()
                    .map(|(zone, rect)| (ElementId::Zone(zone), rect)),
            );
        }
        layout
    }

    pub fn toolbar(&self) -> &ToolbarDock {
        &self.toolbar
    }

    pub fn toolbar_mut(&mut self) -> &mut ToolbarDock {
        &mut self.toolbar
    }

    /// Mounts the toolbar into its default band. Retry after layout if the
    /// toolbar could not be measured yet.
    pub fn mount_toolbar(&mut self, geometry: &impl GeometryProvider) -> Option<DockCommit> {
        self.toolbar.init(geometry)
    }

    pub fn is_inbox_open(&self) -> bool {
        self.inbox_open
    }

    pub fn inbox_dock(&self) -> &InboxDock {
        &self.inbox_dock
    }

    pub fn inbox_dock_mut(&mut self) -> &mut InboxDock {
        &mut self.inbox_dock
    }

    /// Mounts the inbox panel once its container is laid out.
    pub fn mount_inbox(&mut self, geometry: &impl GeometryProvider) -> Option<DockCommit> {
        if !self.inbox_open || self.inbox_dock.engine().is_initialized() {
            return None;
        }
        self.inbox_dock.init(geometry)
    }

    pub fn inbox(&self) -> &InboxView {
        &self.inbox
    }

    pub fn inbox_mut(&mut self) -> &mut InboxView {
        &mut self.inbox
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_comment_mode(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn cursor(&self) -> Option<&CursorLockController> {
        self.cursor.as_ref()
    }

    pub fn cursor_mut(&mut self) -> Option<&mut CursorLockController> {
        self.cursor.as_mut()
    }

    pub fn bubbles(&self) -> &[BubbleView] {
        &self.bubbles
    }

    pub fn bubble_mut(&mut self, id: &str) -> Option<&mut BubbleView> {
        self.bubbles.iter_mut().find(|bubble| bubble.comment_id() == id)
    }

    /// Returns whether the store changed since the last call, bringing the
    /// bubble list up to date when it did.
    pub fn take_render_request(&mut self) -> bool {
        if !self.needs_render.replace(false) {
            return false;
        }
        self.sync_bubbles();
        true
    }

    pub fn input_context(&self) -> InputContext {
        let cursor_locked = self.cursor.as_ref().is_some_and(CursorLockController::is_locked);
        let can_submit_draft = self.cursor.as_ref().is_some_and(CursorLockController::can_submit);
        let text_input_active = self.inbox.is_editing()
            || self
                .bubbles
                .iter()
                .any(|bubble| bubble.is_editing() || bubble.is_replying());
        InputContext {
            text_input_active,
            cursor_locked,
            can_submit_draft,
        }
    }

    pub fn handle_key(
        &mut self,
        key: ShortcutKey,
        modifiers: ShortcutModifiers,
        geometry: &impl GeometryProvider,
    ) -> AppResult<Option<ShortcutAction>> {
        let Some(action) = resolve_shortcut(key, modifiers, self.input_context()) else {
            return Ok(None);
        };
        self.handle_action(action, geometry)?;
        Ok(Some(action))
    }

    pub fn handle_action(
        &mut self,
        action: ShortcutAction,
        geometry: &impl GeometryProvider,
    ) -> AppResult<()> {
        tracing::debug!(?action, "toolbar action");
        match action {
            ShortcutAction::ToggleCommentMode => {
                if self.cursor.is_some() {
                    self.exit_comment_mode();
                } else {
                    self.enter_comment_mode();
                }
            }
            ShortcutAction::ToggleInbox => self.set_inbox_open(!self.inbox_open, geometry),
            ShortcutAction::ToggleMenu => self.menu_open = !self.menu_open,
            ShortcutAction::CancelDraft => {
                let cursor = self.locked_cursor(CursorEvent::Cancel)?;
                cursor.cancel()?;
            }
            ShortcutAction::SubmitDraft => {
                self.submit_comment(geometry)?;
            }
        }
        Ok(())
    }

    /// Creates a comment from the locked cursor and leaves comment mode.
    pub fn submit_comment(&mut self, geometry: &impl GeometryProvider) -> AppResult<String> {
        let cursor = self.locked_cursor(CursorEvent::Submit)?;
        let id = cursor.submit(geometry)?;
        self.exit_comment_mode();
        self.take_render_request();
        Ok(id)
    }

    /// Replies to `id` through its bubble.
    pub fn reply_from_bubble(&mut self, id: &str, text: impl Into<String>) -> Option<String> {
        let bubble = self.bubble_mut(id)?;
        bubble.set_reply_text(text);
        bubble.submit_reply(Utc::now())
    }

    fn enter_comment_mode(&mut self) {
        let mut cursor = CursorLockController::new(self.store.clone(), Rc::clone(&self.device))
            .with_author(self.author.clone());
        cursor.init();
        self.cursor = Some(cursor);
        tracing::info!("comment mode on");
    }

    fn exit_comment_mode(&mut self) {
        if let Some(mut cursor) = self.cursor.take() {
            cursor.teardown();
            tracing::info!("comment mode off");
        }
    }

    fn set_inbox_open(&mut self, open: bool, geometry: &impl GeometryProvider) {
        self.inbox_open = open;
        if open {
            self.mount_inbox(geometry);
        } else {
            self.inbox_dock = InboxDock::new();
            self.inbox.back();
        }
        tracing::info!(open, "inbox toggled");
    }

    fn locked_cursor(
        &mut self,
        event: CursorEvent,
    ) -> Result<&mut CursorLockController, StateError> {
        match self.cursor.as_mut() {
            Some(cursor) if cursor.is_locked() => Ok(cursor),
            Some(cursor) => Err(StateError::InvalidStateTransition {
                from: cursor.mode(),
                event,
            }),
            None => Err(StateError::InvalidStateTransition {
                from: Default::default(),
                event,
            }),
        }
    }

    fn sync_bubbles(&mut self) {
        let ids: Vec<String> = self
            .store
            .borrow()
            .comments()
            .iter()
            .map(|comment| comment.id.clone())
            .collect();
        self.bubbles.retain(|bubble| ids.iter().any(|id| id == bubble.comment_id()));
        for (index, id) in ids.iter().enumerate() {
            let exists = self.bubbles.iter().any(|bubble| bubble.comment_id() == id);
            if !exists {
                let bubble = BubbleView::new(id.clone(), self.store.clone())
                    .with_author(self.author.clone());
                let index = index.min(self.bubbles.len());
                self.bubbles.insert(index, bubble);
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if self.subscription.is_some() {
            self.stop();
        }
    }
}
