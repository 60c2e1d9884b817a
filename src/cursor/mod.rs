//! Cursor lock and comment placement over the annotated surface.

mod follow;

use std::rc::Rc;

use chrono::Utc;

use crate::comments::{Comment, SharedCommentStore, DEFAULT_AUTHOR};
use crate::device::DeviceInfoSource;
use crate::geometry::{normalized, Point, Size};
use crate::state::{CursorEvent, CursorLockMachine, CursorMode, StateError, StateResult};
use crate::surface::{ElementId, GeometryProvider};

pub use follow::{follower_position, FollowAlign, FollowStyle};

/// Read model handed to the cursor renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorSnapshot {
    pub mode: CursorMode,
    pub position: Point,
    pub locked_position: Option<Point>,
    pub visible: bool,
}

impl CursorSnapshot {
    /// Point the badge is drawn at: frozen while locked, live otherwise.
    pub fn anchor(&self) -> Point {
        self.locked_position.unwrap_or(self.position)
    }
}

pub struct CursorLockController {
    machine: CursorLockMachine,
    store: SharedCommentStore,
    device: Rc<dyn DeviceInfoSource>,
    author: String,
    position: Point,
    locked_position: Option<Point>,
    visible: bool,
    draft: String,
    listening: bool,
}

impl CursorLockController {
    pub fn new(store: SharedCommentStore, device: Rc<dyn DeviceInfoSource>) -> Self {
        Self {
            machine: CursorLockMachine::new(),
            store,
            device,
            author: DEFAULT_AUTHOR.to_string(),
            position: Point::origin(),
            locked_position: None,
            visible: false,
            draft: String::new(),
            listening: false,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Starts accepting pointer events from the surface.
    pub fn init(&mut self) {
        self.listening = true;
        tracing::debug!("cursor controller listening");
    }

    /// Stops accepting pointer events and drops any lock in progress without
    /// creating a comment.
    pub fn teardown(&mut self) {
        self.listening = false;
        if let Err(err) = self.machine.transition(CursorEvent::Teardown) {
            tracing::warn!(?err, "teardown transition rejected");
        }
        self.clear_lock();
        self.visible = false;
        tracing::debug!("cursor controller torn down");
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn mode(&self) -> CursorMode {
        self.machine.mode()
    }

    pub fn is_locked(&self) -> bool {
        self.machine.is_locked()
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            mode: self.machine.mode(),
            position: self.position,
            locked_position: self.locked_position,
            visible: self.visible,
        }
    }

    pub fn machine(&self) -> &CursorLockMachine {
        &self.machine
    }

    pub fn pointer_move(&mut self, geometry: &impl GeometryProvider, client: Point) {
        if !self.listening {
            return;
        }
        // The badge stays frozen while locked.
        if self.machine.is_locked() {
            return;
        }
        let Some(point) = surface_point(geometry, client) else {
            return;
        };
        if self.machine.transition(CursorEvent::PointerMove).is_ok() {
            self.position = point;
            self.visible = true;
        }
    }

    pub fn pointer_leave(&mut self) {
        if !self.listening {
            return;
        }
        if self.machine.transition(CursorEvent::PointerLeave).is_ok() && !self.is_locked() {
            self.visible = false;
        }
    }

    /// Locks at the click point, or cancels the lock when already locked.
    pub fn click(&mut self, geometry: &impl GeometryProvider, client: Point) -> CursorMode {
        if !self.listening {
            return self.mode();
        }
        if self.machine.is_locked() {
            if self.machine.transition(CursorEvent::Click).is_ok() {
                self.clear_lock();
                tracing::debug!("cursor lock released by click");
            }
            return self.mode();
        }

        let Some(point) = surface_point(geometry, client) else {
            return self.mode();
        };
        if self.machine.transition(CursorEvent::Click).is_ok() {
            self.position = point;
            self.locked_position = Some(point);
            self.visible = true;
            self.draft.clear();
            tracing::debug!(x = point.x, y = point.y, "cursor locked");
        }
        self.mode()
    }

    pub fn cancel(&mut self) -> StateResult<()> {
        self.machine.transition(CursorEvent::Cancel)?;
        self.clear_lock();
        Ok(())
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Edits to the draft are only kept while the comment input is open.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if self.machine.is_locked() {
            self.draft = text.into();
        }
    }

    pub fn can_submit(&self) -> bool {
        self.machine.is_locked() && !self.draft.is_empty()
    }

    /// Creates a comment at the locked point and returns its id.
    ///
    /// Leaves the locked state before the store is touched, so a repeated
    /// submit is rejected instead of creating a second comment.
    pub fn submit(&mut self, geometry: &impl GeometryProvider) -> StateResult<String> {
        let locked_position = match (self.machine.mode(), self.locked_position) {
            (CursorMode::Locked, Some(point)) => point,
            (from, _) => {
                tracing::warn!(from = ?from, "submit requested without a locked cursor");
                return Err(StateError::InvalidStateTransition {
                    from,
                    event: CursorEvent::Submit,
                });
            }
        };
        if self.draft.is_empty() {
            return Err(StateError::EmptyDraft);
        }

        self.machine.transition(CursorEvent::Submit)?;
        let text = std::mem::take(&mut self.draft);
        self.clear_lock();

        let comment = self.build_comment(text, locked_position, geometry.viewport());
        let id = comment.id.clone();
        self.store.borrow_mut().create(comment);
        Ok(id)
    }

    fn build_comment(&self, text: String, position: Point, viewport: Size) -> Comment {
        Comment {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            position,
            relative_position: Point::new(
                normalized(position.x, viewport.width),
                normalized(position.y, viewport.height),
            ),
            viewport,
            author: self.author.clone(),
            resolved: false,
            device: self.device.device_info(),
            replies: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn clear_lock(&mut self) {
        self.locked_position = None;
        self.draft.clear();
    }
}

impl Drop for CursorLockController {
    fn drop(&mut self) {
        if self.listening {
            self.teardown();
        }
    }
}

/// Surface-local coordinates of `client`, or `None` when the pointer is off
/// the surface.
fn surface_point(geometry: &impl GeometryProvider, client: Point) -> Option<Point> {
    let surface = geometry
        .measurable_rect(ElementId::Surface)
        .filter(|surface| surface.contains(client))?;
    Some(Point::new(client.x - surface.left, client.y - surface.top))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::comments::CommentStore;
    use crate::device::{DeviceClass, DeviceContext, StaticDeviceInfo};
    use crate::geometry::Rect;
    use crate::surface::ScriptedGeometry;

    fn device() -> Rc<dyn DeviceInfoSource> {
        Rc::new(StaticDeviceInfo::new(DeviceContext {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0".to_string(),
            os: "Linux".to_string(),
            browser: "Firefox".to_string(),
            browser_version: "128.0".to_string(),
            device_type: DeviceClass::Desktop,
            language: "en-US".to_string(),
            screen_width: 1200,
            screen_height: 800,
            hardware_concurrency: 8,
        }))
    }

    fn geometry() -> ScriptedGeometry {
        ScriptedGeometry::new(Size::new(1200.0, 800.0))
            .with_rect(ElementId::Surface, Rect::new(0.0, 0.0, 1200.0, 3000.0))
    }

    fn controller() -> (CursorLockController, SharedCommentStore) {
        let store = CommentStore::new().into_shared();
        let mut controller = CursorLockController::new(store.clone(), device());
        controller.init();
        (controller, store)
    }

    #[test]
    fn click_then_submit_creates_comment_at_locked_point() {
        let geometry = geometry();
        let (mut controller, store) = controller();

        controller.pointer_move(&geometry, Point::new(118.0, 79.0));
        assert_eq!(controller.click(&geometry, Point::new(120.0, 80.0)), CursorMode::Locked);
        controller.set_draft("fix this");
        let id = controller.submit(&geometry).expect("submit should create a comment");

        let store = store.borrow();
        let comment = store.get(&id).expect("comment should be stored");
        assert_eq!(comment.position, Point::new(120.0, 80.0));
        assert_eq!(comment.relative_position, Point::new(0.1, 0.1));
        assert_eq!(comment.text, "fix this");
        assert!(comment.replies.is_empty());
        assert!(!comment.resolved);
        assert_eq!(comment.author, "User");
        assert_eq!(comment.device.browser, "Firefox");
        assert_eq!(controller.mode(), CursorMode::Tracking);
        assert!(controller.snapshot().locked_position.is_none());
    }

    #[test]
    fn repeated_submit_creates_only_one_comment() {
        let geometry = geometry();
        let (mut controller, store) = controller();
        let notifications = Rc::new(Cell::new(0));
        {
            let notifications = notifications.clone();
            store
                .borrow_mut()
                .subscribe(move |_| notifications.set(notifications.get() + 1));
        }

        controller.click(&geometry, Point::new(10.0, 10.0));
        controller.set_draft("once");
        controller.submit(&geometry).expect("first submit");
        let err = controller
            .submit(&geometry)
            .expect_err("second submit must be rejected");

        assert_eq!(
            err,
            StateError::InvalidStateTransition {
                from: CursorMode::Tracking,
                event: CursorEvent::Submit
            }
        );
        assert_eq!(store.borrow().len(), 1);
        assert_eq!(notifications.get(), 1);
    }

    #[test]
    fn empty_draft_never_reaches_the_store() {
        let geometry = geometry();
        let (mut controller, store) = controller();

        controller.click(&geometry, Point::new(10.0, 10.0));
        assert!(!controller.can_submit());
        assert_eq!(controller.submit(&geometry), Err(StateError::EmptyDraft));
        assert!(controller.is_locked());
        assert!(store.borrow().is_empty());
    }

    #[test]
    fn locked_cursor_ignores_pointer_motion() {
        let geometry = geometry();
        let (mut controller, _store) = controller();

        controller.click(&geometry, Point::new(50.0, 60.0));
        controller.pointer_move(&geometry, Point::new(400.0, 400.0));
        controller.pointer_leave();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.anchor(), Point::new(50.0, 60.0));
        assert_eq!(snapshot.position, Point::new(50.0, 60.0));
        assert!(snapshot.visible);
    }

    #[test]
    fn second_click_cancels_without_creating() {
        let geometry = geometry();
        let (mut controller, store) = controller();

        controller.click(&geometry, Point::new(50.0, 60.0));
        controller.set_draft("half written");
        assert_eq!(controller.click(&geometry, Point::new(300.0, 10.0)), CursorMode::Tracking);

        assert!(controller.snapshot().locked_position.is_none());
        assert_eq!(controller.draft(), "");
        assert!(store.borrow().is_empty());
    }

    #[test]
    fn cancel_requires_a_lock() {
        let geometry = geometry();
        let (mut controller, _store) = controller();

        assert!(controller.cancel().is_err());
        controller.click(&geometry, Point::new(5.0, 5.0));
        controller.cancel().expect("cancel should release the lock");
        assert_eq!(controller.mode(), CursorMode::Tracking);
    }

    #[test]
    fn pointer_leave_hides_but_keeps_position() {
        let geometry = geometry();
        let (mut controller, _store) = controller();

        controller.pointer_move(&geometry, Point::new(30.0, 40.0));
        assert!(controller.snapshot().visible);
        controller.pointer_leave();

        let snapshot = controller.snapshot();
        assert!(!snapshot.visible);
        assert_eq!(snapshot.position, Point::new(30.0, 40.0));
    }

    #[test]
    fn positions_are_relative_to_the_surface() {
        let geometry = ScriptedGeometry::new(Size::new(1000.0, 500.0))
            .with_rect(ElementId::Surface, Rect::new(100.0, 50.0, 800.0, 400.0));
        let (mut controller, store) = controller();

        controller.click(&geometry, Point::new(300.0, 150.0));
        controller.set_draft("offset");
        let id = controller.submit(&geometry).expect("submit");

        let store = store.borrow();
        let comment = store.get(&id).expect("stored");
        assert_eq!(comment.position, Point::new(200.0, 100.0));
        assert_eq!(comment.relative_position, Point::new(0.2, 0.2));
    }

    #[test]
    fn unmeasured_surface_drops_pointer_events() {
        let geometry = ScriptedGeometry::new(Size::new(1000.0, 500.0));
        let (mut controller, _store) = controller();

        controller.pointer_move(&geometry, Point::new(10.0, 10.0));
        assert_eq!(controller.click(&geometry, Point::new(10.0, 10.0)), CursorMode::Tracking);
        assert!(!controller.snapshot().visible);
    }

    #[test]
    fn teardown_while_locked_returns_to_tracking_without_comment() {
        let geometry = geometry();
        let (mut controller, store) = controller();

        controller.click(&geometry, Point::new(120.0, 80.0));
        controller.set_draft("never sent");
        controller.teardown();

        assert_eq!(controller.mode(), CursorMode::Tracking);
        assert!(controller.snapshot().locked_position.is_none());
        assert!(!controller.is_listening());
        assert!(store.borrow().is_empty());

        controller.click(&geometry, Point::new(1.0, 1.0));
        assert_eq!(controller.mode(), CursorMode::Tracking, "events after teardown are ignored");
    }

    #[test]
    fn pointer_outside_the_surface_is_ignored() {
        let geometry = ScriptedGeometry::new(Size::new(1200.0, 800.0))
            .with_rect(ElementId::Surface, Rect::new(100.0, 50.0, 800.0, 400.0));
        let (mut controller, store) = controller();

        controller.pointer_move(&geometry, Point::new(10.0, 10.0));
        assert!(!controller.snapshot().visible);

        assert_eq!(controller.click(&geometry, Point::new(10.0, 10.0)), CursorMode::Tracking);
        controller.set_draft("x");
        assert!(controller.submit(&geometry).is_err());
        assert!(store.borrow().is_empty());

        controller.click(&geometry, Point::new(150.0, 90.0));
        controller.set_draft("x");
        let id = controller.submit(&geometry).expect("inside the surface");
        assert_eq!(
            store.borrow().get(&id).map(|comment| comment.position),
            Some(Point::new(50.0, 40.0))
        );
    }

    #[test]
    fn relative_position_is_frozen_at_creation() {
        let mut geometry = geometry();
        let (mut controller, store) = controller();

        controller.click(&geometry, Point::new(120.0, 80.0));
        controller.set_draft("before resize");
        let first = controller.submit(&geometry).expect("first comment");

        geometry.set_viewport(Size::new(600.0, 400.0));
        controller.click(&geometry, Point::new(120.0, 80.0));
        controller.set_draft("after resize");
        let second = controller.submit(&geometry).expect("second comment");

        let store = store.borrow();
        let first = store.get(&first).expect("first stored");
        assert_eq!(first.relative_position, Point::new(0.1, 0.1));
        assert_eq!(first.viewport, Size::new(1200.0, 800.0));
        let second = store.get(&second).expect("second stored");
        assert_eq!(second.relative_position, Point::new(0.2, 0.2));
        assert_eq!(second.viewport, Size::new(600.0, 400.0));
    }

    #[test]
    fn pointer_motion_while_locked_keeps_the_badge_frozen() {
        let geometry = geometry();
        let (mut controller, _store) = controller();

        controller.click(&geometry, Point::new(120.0, 80.0));
        let recorded = controller.machine().history().len();
        controller.pointer_move(&geometry, Point::new(500.0, 500.0));

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.anchor(), Point::new(120.0, 80.0));
        assert_eq!(snapshot.position, Point::new(120.0, 80.0));
        assert_eq!(controller.machine().history().len(), recorded);
    }
}
