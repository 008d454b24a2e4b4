//! Canvas state orchestrator.
//!
//! Owns the diagram, viewport, selection, drag state, and context menu
//! for one canvas session, and is the only place any of them mutate.
//! Host collaborators (key-value store, analytics, notifications) are
//! injected per instance and detached on teardown; there is no ambient
//! state anywhere in the engine.

mod operations;

use crate::drag_drop::DragController;
use crate::history::History;
use crate::menu::ConnectionMenu;
use crate::model::Diagram;
use crate::path::DEFAULT_CONTROL_OFFSET;
use crate::selection_manager::SelectionManager;
use crate::serialization;
use crate::templates::DiagramTemplate;
use crate::viewport::Viewport;
use archkit_core::{
    AnalyticsEvent, AnalyticsReporter, KeyValueStore, NotificationKind, NotificationSink, Point,
    Rect, Result, Size,
};

/// Key the session snapshot is stored under in the key-value collaborator
pub const SESSION_KEY: &str = "archkit.session";

/// Screen margin used by fit-to-content
const FIT_MARGIN: f64 = 40.0;

/// Internal clipboard for copy/paste
#[derive(Debug, Clone, Default)]
pub(crate) struct Clipboard {
    pub(crate) nodes: Vec<crate::model::DiagramNode>,
    pub(crate) connections: Vec<crate::model::DiagramConnection>,
}

/// One canvas session: diagram state plus everything that edits it.
pub struct Canvas {
    pub(crate) diagram: Diagram,
    pub(crate) selection: SelectionManager,
    pub(crate) drag: DragController,
    /// Context-menu model, host-driven
    pub menu: ConnectionMenu,
    /// Edit log, undo/redo reserved
    pub history: History,
    pub(crate) viewport: Viewport,
    pub(crate) view_size: Size,
    pub(crate) control_offset: f64,
    pub(crate) is_modified: bool,
    pub(crate) clipboard: Clipboard,
    store: Option<Box<dyn KeyValueStore>>,
    analytics: Option<Box<dyn AnalyticsReporter>>,
    notifications: Option<Box<dyn NotificationSink>>,
}

impl Canvas {
    /// Creates a canvas with an empty diagram and no collaborators.
    pub fn new() -> Self {
        Self::with_diagram(Diagram::new("Untitled Diagram"))
    }

    /// Creates a canvas around an existing diagram.
    pub fn with_diagram(diagram: Diagram) -> Self {
        Self {
            diagram,
            selection: SelectionManager::new(),
            drag: DragController::new(),
            menu: ConnectionMenu::new(),
            history: History::new(),
            viewport: Viewport::default(),
            view_size: Size::new(800.0, 600.0),
            control_offset: DEFAULT_CONTROL_OFFSET,
            is_modified: false,
            clipboard: Clipboard::default(),
            store: None,
            analytics: None,
            notifications: None,
        }
    }

    // --- collaborator lifecycle ---

    /// Attaches the session store. Replaces any previous store.
    pub fn attach_store(&mut self, store: Box<dyn KeyValueStore>) {
        self.store = Some(store);
    }

    /// Detaches and returns the session store.
    pub fn detach_store(&mut self) -> Option<Box<dyn KeyValueStore>> {
        self.store.take()
    }

    /// Attaches the analytics reporter.
    pub fn attach_analytics(&mut self, reporter: Box<dyn AnalyticsReporter>) {
        self.analytics = Some(reporter);
    }

    /// Detaches and returns the analytics reporter.
    pub fn detach_analytics(&mut self) -> Option<Box<dyn AnalyticsReporter>> {
        self.analytics.take()
    }

    /// Attaches the notification sink.
    pub fn attach_notifications(&mut self, sink: Box<dyn NotificationSink>) {
        self.notifications = Some(sink);
    }

    /// Detaches and returns the notification sink.
    pub fn detach_notifications(&mut self) -> Option<Box<dyn NotificationSink>> {
        self.notifications.take()
    }

    // --- accessors ---

    /// The diagram being edited.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Current selection state.
    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    /// Current pan/zoom state.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether the diagram changed since it was loaded or created.
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Control-point offset used for connection routing.
    pub fn control_offset(&self) -> f64 {
        self.control_offset
    }

    /// Overrides the connection control offset (from settings).
    pub fn set_control_offset(&mut self, offset: f64) {
        if offset.is_finite() && offset >= 0.0 {
            self.control_offset = offset;
        }
    }

    /// Tells the canvas how big its host viewport is, for fit/center.
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        let size = Size::new(width, height);
        if size.is_valid() {
            self.view_size = size;
        }
    }

    // --- coordinate transforms ---

    /// Screen point to canvas space under the current transform.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        self.viewport.screen_to_canvas(screen)
    }

    /// Canvas point to screen space under the current transform.
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        self.viewport.canvas_to_screen(canvas)
    }

    // --- zoom and pan ---

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
    }

    pub fn set_zoom(&mut self, scale: f64) {
        self.viewport.set_zoom(scale);
    }

    /// Zoom toward a screen-space focus point (wheel zoom).
    pub fn zoom_at(&mut self, focus: Point, scale: f64) {
        self.viewport.zoom_at(focus, scale);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    /// Fits all content into the host viewport with a margin.
    ///
    /// An empty diagram resets the view instead.
    pub fn fit_to_content(&mut self) {
        match self.content_bounds() {
            Some(bounds) => {
                self.viewport
                    .fit_to(bounds, self.view_size.width, self.view_size.height, FIT_MARGIN)
            }
            None => self.viewport.reset(),
        }
    }

    /// Centers the content in the host viewport without changing zoom.
    pub fn center_content(&mut self) {
        if let Some(bounds) = self.content_bounds() {
            self.viewport
                .center_on(bounds, self.view_size.width, self.view_size.height);
        }
    }

    /// Bounding box of all nodes and connection curves, canvas space.
    pub fn content_bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        let mut merge = |r: Rect| {
            bounds = Some(match bounds {
                Some(b) => b.union(&r),
                None => r,
            });
        };
        for node in &self.diagram.nodes {
            merge(node.bounds());
        }
        for connection in &self.diagram.connections {
            if let Some(path) = self.connection_path(&connection.id) {
                merge(path.bounds());
            }
        }
        bounds
    }

    // --- import, export, templates ---

    /// Serializes the diagram to the wire JSON.
    pub fn export_json(&mut self) -> Result<String> {
        let json = serialization::to_json(&self.diagram)?;
        tracing::info!(
            nodes = self.diagram.nodes.len(),
            connections = self.diagram.connections.len(),
            "diagram exported"
        );
        self.report(AnalyticsEvent::DiagramExported {
            nodes: self.diagram.nodes.len(),
            connections: self.diagram.connections.len(),
        });
        Ok(json)
    }

    /// Replaces the diagram with a validated import.
    ///
    /// The payload is parsed and validated in full before anything is
    /// touched; on any error the previous state is left exactly as it
    /// was and the error is surfaced to the notification sink.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        match serialization::from_json(json) {
            Ok(diagram) => {
                let nodes = diagram.nodes.len();
                let connections = diagram.connections.len();
                self.replace_diagram(diagram);
                tracing::info!(nodes, connections, "diagram imported");
                self.report(AnalyticsEvent::DiagramImported { nodes, connections });
                self.notify(NotificationKind::Success, "Diagram imported");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "diagram import rejected");
                self.notify(NotificationKind::Error, &format!("Import failed: {e}"));
                Err(e)
            }
        }
    }

    /// Replaces the diagram with a freshly instantiated template.
    pub fn apply_template(&mut self, template: DiagramTemplate) {
        tracing::info!(template = template.as_str(), "template applied");
        self.replace_diagram(template.instantiate());
        self.report(AnalyticsEvent::TemplateApplied {
            template: template.as_str().to_string(),
        });
    }

    /// Replaces the diagram with a blank one. The viewport is kept.
    pub fn clear(&mut self) {
        self.replace_diagram(Diagram::new("Untitled Diagram"));
    }

    fn replace_diagram(&mut self, diagram: Diagram) {
        self.diagram = diagram;
        self.selection.clear();
        self.drag.cancel();
        self.menu.close();
        self.history.clear();
        self.is_modified = false;
    }

    // --- session persistence ---

    /// Snapshots the diagram into the attached store.
    ///
    /// Returns whether a snapshot was written. Without a store this is
    /// a no-op.
    pub fn save_session(&mut self) -> bool {
        let Some(store) = self.store.as_mut() else {
            return false;
        };
        match serialization::to_json(&self.diagram) {
            Ok(json) => {
                store.save(SESSION_KEY, &json);
                self.report(AnalyticsEvent::SessionSaved);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "session snapshot failed");
                false
            }
        }
    }

    /// Restores the diagram from the attached store's snapshot.
    ///
    /// Bad or absent snapshots leave the current state alone; restore
    /// failures are background noise, not user errors.
    pub fn restore_session(&mut self) -> bool {
        let Some(json) = self.store.as_ref().and_then(|s| s.load(SESSION_KEY)) else {
            return false;
        };
        match serialization::from_json(&json) {
            Ok(diagram) => {
                self.replace_diagram(diagram);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "session restore rejected");
                false
            }
        }
    }

    // --- collaborator plumbing ---

    pub(crate) fn report(&mut self, event: AnalyticsEvent) {
        if let Some(reporter) = self.analytics.as_mut() {
            reporter.report(event);
        }
    }

    pub(crate) fn notify(&mut self, kind: NotificationKind, message: &str) {
        if let Some(sink) = self.notifications.as_mut() {
            sink.notify(kind, message);
        }
    }

    pub(crate) fn mark_modified(&mut self, label: &str) {
        self.diagram.touch();
        self.is_modified = true;
        self.history.record(label);
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
