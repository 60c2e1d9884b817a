use std::rc::Rc;
use std::time::Duration;

use crate::comments::{seed_comments, CommentStore};
use crate::config::AppConfig;
use crate::device::StaticDeviceInfo;
use crate::dock::{DockCommit, MotionTrack};
use crate::error::AppResult;
use crate::geometry::{Offset, Point, Rect, Size};
use crate::input::{ShortcutAction, ShortcutKey, ShortcutModifiers};
use crate::surface::{ElementId, GeometryProvider, ScriptedGeometry};

use super::App;

const DEMO_VIEWPORT: Size = Size {
    width: 1280.0,
    height: 800.0,
};
const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 600;

/// Drives a short scripted session against an in-memory layout and returns
/// the resulting collection as pretty JSON.
pub(crate) fn run_demo_session(config: &AppConfig) -> AppResult<String> {
    let comments = if config.seed_fixture {
        seed_comments()?
    } else {
        Vec::new()
    };
    let store = CommentStore::with_comments(comments).into_shared();
    let device = Rc::new(StaticDeviceInfo::unknown(
        DEMO_VIEWPORT.width as u32,
        DEMO_VIEWPORT.height as u32,
    ));
    let mut app = App::new(store, device)
        .with_author(config.author())
        .with_toolbar_bands(config.toolbar.bands())
        .with_inbox_padding(config.inbox_padding);
    app.start();

    let toolbar_home = Rect::new(540.0, 360.0, 200.0, 48.0);
    let mut geometry = ScriptedGeometry::new(DEMO_VIEWPORT)
        .with_rect(ElementId::Surface, Rect::new(0.0, 0.0, 1280.0, 800.0))
        .with_rect(ElementId::Toolbar, toolbar_home);
    publish_layout(&app, &mut geometry, None);

    if let Some(commit) = app.mount_toolbar(&geometry) {
        geometry.set_rect(ElementId::Toolbar, toolbar_home.translated(commit.offset));
    }

    // Drag the toolbar into the right band.
    app.toolbar_mut().begin_drag();
    let release = Offset::new(620.0, 0.0);
    app.toolbar_mut().drag_move(release);
    geometry.set_rect(ElementId::Toolbar, toolbar_home.translated(release));
    let commit = app.toolbar_mut().end_drag(&geometry);
    settle(release, commit);
    geometry.set_rect(ElementId::Toolbar, toolbar_home.translated(commit.offset));
    tracing::info!(
        vertical = app.toolbar().is_vertical(),
        outcome = ?commit.outcome,
        "toolbar released"
    );

    app.handle_action(ShortcutAction::ToggleCommentMode, &geometry)?;
    if let Some(cursor) = app.cursor_mut() {
        cursor.pointer_move(&geometry, Point::new(600.0, 380.0));
        cursor.click(&geometry, Point::new(640.0, 400.0));
        cursor.set_draft("Spacing under the header looks off");
    }
    let submitted =
        app.handle_key(ShortcutKey::Enter, ShortcutModifiers::default(), &geometry)?;
    let new_id = match submitted {
        Some(ShortcutAction::SubmitDraft) => app
            .store()
            .borrow()
            .comments()
            .last()
            .map(|comment| comment.id.clone()),
        _ => None,
    };

    if let Some(id) = new_id.as_deref() {
        app.reply_from_bubble(id, "Agreed, will tighten it up");
        app.inbox_mut().set_resolved(id, true);
    }

    app.handle_action(ShortcutAction::ToggleInbox, &geometry)?;
    let container = Rect::new(0.0, 0.0, 1280.0, 800.0);
    // Untranslated, the panel sits at the container's top-left.
    let panel_home = Rect::new(0.0, 0.0, 360.0, 640.0);
    geometry.set_rect(ElementId::InboxContainer, container);
    geometry.set_rect(ElementId::InboxPanel, panel_home);
    publish_layout(&app, &mut geometry, Some(container));
    if let Some(commit) = app.mount_inbox(&geometry) {
        geometry.set_rect(ElementId::InboxPanel, panel_home.translated(commit.offset));
    }

    let inbox_release = Offset::new(700.0, 0.0);
    app.inbox_dock_mut().begin_drag();
    app.inbox_dock_mut().drag_move(inbox_release);
    geometry.set_rect(ElementId::InboxPanel, panel_home.translated(inbox_release));
    let commit = app.inbox_dock_mut().end_drag(&geometry);
    settle(inbox_release, commit);
    tracing::info!(outcome = ?commit.outcome, "inbox released");

    app.take_render_request();
    let json = serde_json::to_string_pretty(app.store().borrow().comments())?;
    app.stop();
    Ok(json)
}

fn publish_layout(app: &App, geometry: &mut ScriptedGeometry, inbox_container: Option<Rect>) {
    let viewport = geometry.viewport();
    for (element, rect) in app.zone_layout(viewport, inbox_container) {
        geometry.set_rect(element, rect);
    }
}

fn settle(from: Offset, commit: DockCommit) {
    let mut track = MotionTrack::new(from, commit.offset, commit.transition);
    let mut frames = 0;
    while !track.is_settled() && frames < MAX_FRAMES {
        track.advance(FRAME);
        frames += 1;
    }
    tracing::debug!(frames, offset = ?track.position(), "dock motion settled");
}
