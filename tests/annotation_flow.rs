use std::rc::Rc;

use chrono::Utc;
use pinmark::app::App;
use pinmark::comments::{seed_comments, Comment, CommentPatch, CommentStore};
use pinmark::cursor::CursorLockController;
use pinmark::device::StaticDeviceInfo;
use pinmark::dock::{
    DockOutcome, DockTransition, DockZone, DockingConfig, DockingEngine, OriginAnchor, ZoneName,
};
use pinmark::geometry::{rects_overlap, Offset, Point, Rect, Size};
use pinmark::input::{ShortcutAction, ShortcutKey, ShortcutModifiers};
use pinmark::state::CursorMode;
use pinmark::surface::{ElementId, ScriptedGeometry};

fn surface_geometry() -> ScriptedGeometry {
    ScriptedGeometry::new(Size::new(1200.0, 800.0))
        .with_rect(ElementId::Surface, Rect::new(0.0, 0.0, 1200.0, 800.0))
}

fn controller(store: &pinmark::comments::SharedCommentStore) -> CursorLockController {
    let mut cursor =
        CursorLockController::new(store.clone(), Rc::new(StaticDeviceInfo::unknown(1200, 800)));
    cursor.init();
    cursor
}

#[test]
fn click_then_submit_creates_a_comment_at_the_locked_point() {
    let store = CommentStore::new().into_shared();
    let geometry = surface_geometry();
    let mut cursor = controller(&store);

    cursor.pointer_move(&geometry, Point::new(300.0, 300.0));
    assert_eq!(cursor.click(&geometry, Point::new(120.0, 80.0)), CursorMode::Locked);
    cursor.pointer_move(&geometry, Point::new(500.0, 500.0));
    cursor.set_draft("fix this");
    let id = cursor.submit(&geometry).expect("submit from locked cursor");

    let store = store.borrow();
    let comment = store.get(&id).expect("created comment");
    assert_eq!(comment.text, "fix this");
    assert_eq!(comment.position, Point::new(120.0, 80.0));
    assert_eq!(comment.relative_position, Point::new(0.1, 0.1));
    assert_eq!(comment.viewport, Size::new(1200.0, 800.0));
    assert!(comment.replies.is_empty());
    assert!(!comment.resolved);
    assert_eq!(cursor.mode(), CursorMode::Tracking);
}

#[test]
fn teardown_while_locked_creates_nothing() {
    let store = CommentStore::new().into_shared();
    let geometry = surface_geometry();
    let mut cursor = controller(&store);

    cursor.click(&geometry, Point::new(40.0, 40.0));
    cursor.set_draft("half written");
    cursor.teardown();

    assert_eq!(cursor.mode(), CursorMode::Tracking);
    assert!(cursor.draft().is_empty());
    assert!(store.borrow().is_empty());
}

#[test]
fn store_sequence_keeps_created_minus_deleted_with_latest_merge() {
    let mut store = CommentStore::with_comments(seed_comments().expect("seed fixture"));
    let ids: Vec<String> = store.comments().iter().map(|c| c.id.clone()).collect();

    store.update(&ids[0], CommentPatch::text("first edit"));
    store.update(&ids[0], CommentPatch::resolved(true));
    store.update(&ids[0], CommentPatch::text("second edit"));
    store.delete(&ids[1]);
    store.update(&ids[1], CommentPatch::text("ignored"));

    let remaining: Vec<&Comment> = store.comments().iter().collect();
    assert_eq!(remaining.len(), 2);
    assert_eq!(remaining[0].text, "second edit");
    assert!(remaining[0].resolved);
    assert_eq!(remaining[1].id, ids[2]);

    let first = store
        .add_reply(&ids[2], "one", "User", Utc::now())
        .expect("reply added");
    let second = store
        .add_reply(&ids[2], "two", "User", Utc::now())
        .expect("reply added");
    let replies = &store.get(&ids[2]).expect("comment").replies;
    assert_eq!(
        replies.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        vec![first.as_str(), second.as_str()]
    );
}

#[test]
fn overlap_is_strict_at_shared_edges() {
    let a = Rect::from_edges(0.0, 0.0, 10.0, 10.0);
    assert!(!rects_overlap(&a, &Rect::from_edges(10.0, 0.0, 20.0, 10.0)));
    assert!(rects_overlap(&a, &Rect::from_edges(5.0, 0.0, 15.0, 10.0)));
}

fn two_zone_engine() -> (DockingEngine, ScriptedGeometry) {
    let engine = DockingEngine::new(DockingConfig {
        draggable: ElementId::Toolbar,
        zones: vec![
            DockZone::centered(ZoneName::Left),
            DockZone::centered(ZoneName::Right),
        ],
        default_zone: ZoneName::Left,
        anchor: OriginAnchor::Draggable,
        transition: DockTransition::Immediate,
    });
    let geometry = ScriptedGeometry::new(Size::new(400.0, 200.0))
        .with_rect(ElementId::Toolbar, Rect::new(0.0, 0.0, 40.0, 20.0))
        .with_rect(ElementId::Zone(ZoneName::Left), Rect::new(0.0, 0.0, 200.0, 200.0))
        .with_rect(ElementId::Zone(ZoneName::Right), Rect::new(200.0, 0.0, 200.0, 200.0));
    (engine, geometry)
}

#[test]
fn straddling_two_zones_docks_to_the_earlier_one() {
    let (mut engine, mut geometry) = two_zone_engine();
    engine.init(&geometry).expect("mounted");

    engine.begin_drag();
    engine.drag_move(Offset::new(180.0, 0.0));
    geometry.set_rect(ElementId::Toolbar, Rect::new(180.0, 0.0, 40.0, 20.0));
    let commit = engine.end_drag(&geometry);

    assert_eq!(commit.outcome, DockOutcome::Snapped(ZoneName::Left));
}

#[test]
fn release_outside_every_zone_restores_last_position() {
    let (mut engine, mut geometry) = two_zone_engine();
    let mounted = engine.init(&geometry).expect("mounted");

    engine.begin_drag();
    engine.drag_move(Offset::new(900.0, 900.0));
    geometry.set_rect(ElementId::Toolbar, Rect::new(900.0, 900.0, 40.0, 20.0));
    let commit = engine.end_drag(&geometry);

    assert_eq!(commit.outcome, DockOutcome::Reverted);
    assert_eq!(commit.offset, mounted.offset);
    assert_eq!(engine.last_known_position(), mounted.offset);
}

#[test]
fn comment_shortcut_flow_through_the_app() {
    let store = CommentStore::new().into_shared();
    let mut app = App::new(store.clone(), Rc::new(StaticDeviceInfo::unknown(1200, 800)))
        .with_author("Dana");
    app.start();
    let geometry = surface_geometry();
    let none = ShortcutModifiers::default();

    app.handle_key(ShortcutKey::Character('c'), none, &geometry)
        .expect("enter comment mode");
    let cursor = app.cursor_mut().expect("comment mode on");
    cursor.click(&geometry, Point::new(600.0, 400.0));

    // Enter does nothing until there is text.
    let action = app
        .handle_key(ShortcutKey::Enter, none, &geometry)
        .expect("no-op");
    assert_eq!(action, None);

    app.cursor_mut().expect("still on").set_draft("ship it");
    let action = app
        .handle_key(ShortcutKey::Enter, none, &geometry)
        .expect("submit");
    assert_eq!(action, Some(ShortcutAction::SubmitDraft));
    assert!(!app.is_comment_mode());

    let store = store.borrow();
    let comment = &store.comments()[0];
    assert_eq!(comment.author, "Dana");
    assert_eq!(comment.relative_position, Point::new(0.5, 0.5));
    assert_eq!(app.bubbles().len(), 1);
}
