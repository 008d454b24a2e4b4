//! Integration tests for the connection context menu and toolbar dispatch.

use archkit_core::{Point, Size};
use archkit_diagram::{
    AnimationVariant, ArrowHead, Canvas, ConnectionStyle, DiagramTemplate, NodeKind, ToolbarAction,
    ToolbarOutcome,
};

const MENU_SIZE: Size = Size {
    width: 200.0,
    height: 150.0,
};

fn canvas_with_connection() -> (Canvas, String) {
    let mut canvas = Canvas::new();
    canvas
        .add_node_with_id("a", NodeKind::Aws, Point::new(0.0, 0.0))
        .expect("add a");
    canvas
        .add_node_with_id("b", NodeKind::Gcp, Point::new(300.0, 0.0))
        .expect("add b");
    let connection = canvas.add_connection("a", "b").expect("connect");
    (canvas, connection)
}

#[test]
fn test_menu_opens_clamped_to_view() {
    let (mut canvas, connection) = canvas_with_connection();

    // Default view is 800x600, so (700, 500) cannot fit a 200x150 menu
    let position = canvas
        .open_connection_menu(&connection, Point::new(700.0, 500.0), MENU_SIZE)
        .expect("menu opens");

    assert_eq!(position, Point::new(600.0, 450.0));
    assert!(canvas.menu.is_open());
    let session = canvas.menu.session().expect("session");
    assert_eq!(session.connection, connection);
    assert_eq!(session.position, position);
}

#[test]
fn test_menu_does_not_open_for_unknown_connection() {
    let (mut canvas, _) = canvas_with_connection();

    let position = canvas.open_connection_menu("ghost", Point::new(10.0, 10.0), MENU_SIZE);

    assert!(position.is_none());
    assert!(!canvas.menu.is_open());
}

#[test]
fn test_menu_picks_apply_through_update_connection() {
    let (mut canvas, connection) = canvas_with_connection();
    canvas
        .open_connection_menu(&connection, Point::new(100.0, 100.0), MENU_SIZE)
        .expect("menu opens");

    let (id, update) = canvas
        .menu
        .pick_style(ConnectionStyle::Dashed)
        .expect("pick");
    canvas.update_connection(&id, update).expect("update");

    let (id, update) = canvas
        .menu
        .pick_animation(AnimationVariant::Flow)
        .expect("pick");
    canvas.update_connection(&id, update).expect("update");

    let (id, update) = canvas
        .menu
        .pick_arrow_end(ArrowHead::Diamond)
        .expect("pick");
    canvas.update_connection(&id, update).expect("update");

    let conn = canvas.diagram().connection(&connection).expect("connection");
    assert_eq!(conn.style, ConnectionStyle::Dashed);
    assert_eq!(conn.animation, AnimationVariant::Flow);
    assert_eq!(conn.arrow_end, ArrowHead::Diamond);
}

#[test]
fn test_clearing_canvas_closes_menu() {
    let (mut canvas, connection) = canvas_with_connection();
    canvas
        .open_connection_menu(&connection, Point::new(100.0, 100.0), MENU_SIZE)
        .expect("menu opens");

    canvas
        .dispatch_toolbar(ToolbarAction::Clear)
        .expect("clear");

    assert!(!canvas.menu.is_open());
    assert!(canvas.menu.pick_style(ConnectionStyle::Dotted).is_none());
}

#[test]
fn test_toolbar_zoom_actions() {
    let mut canvas = Canvas::new();

    canvas
        .dispatch_toolbar(ToolbarAction::ZoomIn)
        .expect("zoom in");
    assert!((canvas.viewport().scale - 1.2).abs() < 1e-9);

    canvas
        .dispatch_toolbar(ToolbarAction::ZoomOut)
        .expect("zoom out");
    assert!((canvas.viewport().scale - 1.0).abs() < 1e-9);

    canvas.set_zoom(2.5);
    canvas.pan_by(40.0, -30.0);
    canvas
        .dispatch_toolbar(ToolbarAction::ResetZoom)
        .expect("reset");
    let viewport = canvas.viewport();
    assert_eq!(viewport.scale, 1.0);
    assert_eq!(viewport.pan_x, 0.0);
    assert_eq!(viewport.pan_y, 0.0);
}

#[test]
fn test_toolbar_fit_centers_far_content() {
    let mut canvas = Canvas::new();
    canvas
        .add_node_with_id("far", NodeKind::Custom, Point::new(1000.0, 1000.0))
        .expect("add");

    canvas
        .dispatch_toolbar(ToolbarAction::FitToContent)
        .expect("fit");

    // 80x80 of content in an 800x600 view wants zoom 6.5, clamped to max
    assert!((canvas.viewport().scale - 3.0).abs() < 1e-9);
    let center = canvas.canvas_to_screen(Point::new(1040.0, 1040.0));
    assert!((center.x - 400.0).abs() < 1e-6);
    assert!((center.y - 300.0).abs() < 1e-6);
}

#[test]
fn test_toolbar_export_then_import_round_trip() {
    let (mut canvas, _) = canvas_with_connection();

    let outcome = canvas
        .dispatch_toolbar(ToolbarAction::Export)
        .expect("export");
    let ToolbarOutcome::Exported(json) = outcome else {
        panic!("expected exported JSON");
    };
    assert!(json.contains("\"version\""));

    canvas
        .dispatch_toolbar(ToolbarAction::Clear)
        .expect("clear");
    assert_eq!(canvas.diagram().nodes.len(), 0);

    let outcome = canvas
        .dispatch_toolbar(ToolbarAction::Import(json))
        .expect("import");
    assert_eq!(outcome, ToolbarOutcome::Done);
    assert_eq!(canvas.diagram().nodes.len(), 2);
    assert_eq!(canvas.diagram().connections.len(), 1);
}

#[test]
fn test_toolbar_import_error_leaves_diagram_alone() {
    let (mut canvas, _) = canvas_with_connection();

    let result = canvas.dispatch_toolbar(ToolbarAction::Import("nonsense".into()));

    assert!(result.is_err());
    assert_eq!(canvas.diagram().nodes.len(), 2);
    assert_eq!(canvas.diagram().connections.len(), 1);
}

#[test]
fn test_toolbar_apply_template() {
    let mut canvas = Canvas::new();

    canvas
        .dispatch_toolbar(ToolbarAction::ApplyTemplate(DiagramTemplate::WebService))
        .expect("template");

    assert_eq!(canvas.diagram().nodes.len(), 3);
    assert_eq!(canvas.diagram().connections.len(), 2);
    assert!(!canvas.is_modified());
}

#[test]
fn test_toolbar_clear_keeps_viewport() {
    let (mut canvas, _) = canvas_with_connection();
    canvas.set_zoom(2.0);
    canvas.pan_by(15.0, 25.0);

    canvas
        .dispatch_toolbar(ToolbarAction::Clear)
        .expect("clear");

    assert_eq!(canvas.diagram().nodes.len(), 0);
    assert_eq!(canvas.diagram().connections.len(), 0);
    let viewport = canvas.viewport();
    assert!((viewport.scale - 2.0).abs() < 1e-9);
    assert!((viewport.pan_x - 15.0).abs() < 1e-9);
    assert!((viewport.pan_y - 25.0).abs() < 1e-9);
}
