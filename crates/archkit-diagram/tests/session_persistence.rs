//! Integration tests for session snapshots and host collaborators.

use std::cell::RefCell;
use std::rc::Rc;

use archkit_core::{
    AnalyticsEvent, AnalyticsReporter, KeyValueStore, MemoryStore, NotificationKind,
    NotificationSink, Point,
};
use archkit_diagram::{Canvas, DiagramTemplate, NodeKind, SESSION_KEY};

/// Reporter that shares its event log with the test.
#[derive(Clone, Default)]
struct SharedReporter {
    events: Rc<RefCell<Vec<AnalyticsEvent>>>,
}

impl AnalyticsReporter for SharedReporter {
    fn report(&mut self, event: AnalyticsEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Sink that shares delivered notifications with the test.
#[derive(Clone, Default)]
struct SharedSink {
    messages: Rc<RefCell<Vec<(NotificationKind, String)>>>,
}

impl NotificationSink for SharedSink {
    fn notify(&mut self, kind: NotificationKind, message: &str) {
        self.messages.borrow_mut().push((kind, message.to_string()));
    }
}

#[test]
fn test_save_without_store_is_a_noop() {
    let mut canvas = Canvas::new();
    canvas
        .add_node_with_id("a", NodeKind::Aws, Point::new(0.0, 0.0))
        .expect("add");
    assert!(!canvas.save_session());
}

#[test]
fn test_session_snapshot_round_trip() {
    let mut canvas = Canvas::new();
    canvas.attach_store(Box::new(MemoryStore::new()));
    canvas
        .add_node_with_id("a", NodeKind::Aws, Point::new(100.0, 100.0))
        .expect("add a");
    canvas
        .add_node_with_id("b", NodeKind::Gcp, Point::new(300.0, 100.0))
        .expect("add b");
    canvas.add_connection("a", "b").expect("connect");

    assert!(canvas.save_session());

    // Mutate past the snapshot, then restore it
    canvas.remove_node("b").expect("remove");
    canvas.select_node("a", false);
    assert_eq!(canvas.diagram().nodes.len(), 1);

    assert!(canvas.restore_session());
    assert_eq!(canvas.diagram().nodes.len(), 2);
    assert_eq!(canvas.diagram().connections.len(), 1);
    assert!(canvas.selection().is_empty());
    assert!(!canvas.is_modified());
}

#[test]
fn test_restore_from_empty_store() {
    let mut canvas = Canvas::new();
    canvas.attach_store(Box::new(MemoryStore::new()));
    assert!(!canvas.restore_session());
}

#[test]
fn test_corrupt_snapshot_leaves_state_alone() {
    let mut store = MemoryStore::new();
    store.save(SESSION_KEY, "{ not a diagram");

    let mut canvas = Canvas::new();
    canvas.attach_store(Box::new(store));
    canvas
        .add_node_with_id("survivor", NodeKind::C4, Point::new(0.0, 0.0))
        .expect("add");

    assert!(!canvas.restore_session());
    assert!(canvas.diagram().node("survivor").is_some());
}

#[test]
fn test_detached_store_holds_the_snapshot() {
    let mut canvas = Canvas::new();
    canvas.attach_store(Box::new(MemoryStore::new()));
    canvas
        .add_node_with_id("kept", NodeKind::Custom, Point::new(10.0, 20.0))
        .expect("add");
    assert!(canvas.save_session());

    let store = canvas.detach_store().expect("store");
    let snapshot = store.load(SESSION_KEY).expect("snapshot");
    assert!(snapshot.contains("\"kept\""));

    // With the store gone, saving is a no-op again
    assert!(!canvas.save_session());
}

#[test]
fn test_analytics_event_stream() {
    let reporter = SharedReporter::default();
    let events = Rc::clone(&reporter.events);

    let mut canvas = Canvas::new();
    canvas.attach_store(Box::new(MemoryStore::new()));
    canvas.attach_analytics(Box::new(reporter));

    canvas
        .add_node_with_id("a", NodeKind::Aws, Point::new(0.0, 0.0))
        .expect("add a");
    canvas
        .add_node_with_id("b", NodeKind::Gcp, Point::new(300.0, 0.0))
        .expect("add b");
    canvas.add_connection("a", "b").expect("connect");
    canvas.export_json().expect("export");
    canvas.save_session();
    canvas.remove_node("a").expect("remove");

    let events = events.borrow();
    assert_eq!(
        *events,
        [
            AnalyticsEvent::NodeAdded {
                kind: "aws".to_string()
            },
            AnalyticsEvent::NodeAdded {
                kind: "gcp".to_string()
            },
            AnalyticsEvent::ConnectionAdded,
            AnalyticsEvent::DiagramExported {
                nodes: 2,
                connections: 1
            },
            AnalyticsEvent::SessionSaved,
            AnalyticsEvent::NodeRemoved {
                cascaded_connections: 1
            },
        ]
    );
}

#[test]
fn test_template_and_import_events() {
    let reporter = SharedReporter::default();
    let events = Rc::clone(&reporter.events);

    let mut canvas = Canvas::new();
    canvas.attach_analytics(Box::new(reporter));

    canvas.apply_template(DiagramTemplate::Microservices);
    let json = canvas.export_json().expect("export");
    canvas.import_json(&json).expect("import");

    let events = events.borrow();
    assert_eq!(events[0], AnalyticsEvent::TemplateApplied {
        template: "microservices".to_string()
    });
    assert_eq!(events[2], AnalyticsEvent::DiagramImported {
        nodes: 5,
        connections: 5
    });
}

#[test]
fn test_import_notifications() {
    let sink = SharedSink::default();
    let messages = Rc::clone(&sink.messages);

    let mut canvas = Canvas::new();
    canvas.attach_notifications(Box::new(sink));

    let json = canvas.export_json().expect("export");
    canvas.import_json(&json).expect("import");
    assert!(canvas.import_json("broken").is_err());

    let messages = messages.borrow();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].0, NotificationKind::Success);
    assert_eq!(messages[0].1, "Diagram imported");
    assert_eq!(messages[1].0, NotificationKind::Error);
    assert!(messages[1].1.starts_with("Import failed:"));
}
