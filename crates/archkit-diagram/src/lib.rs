//! # ArchKit Diagram
//!
//! The interactive diagram canvas engine: a headless model of an
//! architecture-diagramming surface. The host UI (a browser canvas, a
//! GTK widget, a test harness) feeds it pointer, keyboard, and drag
//! events, and renders whatever the engine says the canvas looks like.
//!
//! ## Core Components
//!
//! ### Canvas
//! - **Canvas**: the orchestrator owning nodes, connections, viewport,
//!   and selection for one editing session
//! - **Viewport**: pan/zoom state and the screen/canvas transform
//! - **SelectionManager**: single and multi selection semantics
//! - **DragController**: palette drops and connection-drag gestures
//!
//! ### Connections
//! - **ConnectionPath**: cubic bezier routing between node anchors
//! - **ArrowGlyph / AnimationFrame**: render-ready arrow heads and
//!   per-frame animation values
//! - **ConnectionMenu**: the style/animation/arrow-head picker model
//!
//! ### Persistence
//! - **serialization**: versioned JSON import/export with validation
//!   before commit
//! - **DiagramTemplate**: built-in starter diagrams
//!
//! ## Usage
//!
//! ```rust
//! use archkit_diagram::{Canvas, NodeKind};
//! use archkit_core::Point;
//!
//! let mut canvas = Canvas::new();
//! let a = canvas.add_node(NodeKind::Aws, Point::new(100.0, 100.0)).unwrap();
//! let b = canvas.add_node(NodeKind::Gcp, Point::new(300.0, 100.0)).unwrap();
//! canvas.add_connection(&a, &b).unwrap();
//! let json = canvas.export_json().unwrap();
//! assert!(json.contains("\"nodes\""));
//! ```

pub mod canvas;
pub mod drag_drop;
pub mod history;
pub mod menu;
pub mod model;
pub mod path;
pub mod selection_manager;
pub mod serialization;
pub mod templates;
pub mod toolbar;
pub mod viewport;

pub use canvas::{Canvas, SESSION_KEY};
pub use drag_drop::{
    decode_drag_payload, encode_drag_payload, transfer_entries, DragController, DragGesture,
    DragPayload, DragRelease, DROP_EFFECT, PAYLOAD_MIME_TYPES,
};
pub use history::{History, HistoryEntry};
pub use menu::{
    animation_options, arrow_head_options, clamp_to_viewport, style_options, ConnectionMenu,
    MenuSession,
};
pub use model::{
    derive_anchor_sides, AnchorSide, AnimationVariant, ArrowHead, ConnectionStyle,
    ConnectionUpdate, Diagram, DiagramConnection, DiagramNode, NodeKind, DEFAULT_NODE_SIZE,
};
pub use path::{
    AnimationFrame, ArrowGlyph, ConnectionPath, PathEnd, ARROW_SIZE, DEFAULT_CONTROL_OFFSET,
    HIT_SAMPLES,
};
pub use selection_manager::SelectionManager;
pub use serialization::{
    from_json, load_from_file, save_to_file, to_json, ConnectionData, DiagramFile, NodeData,
    DIAGRAM_FORMAT_VERSION,
};
pub use templates::DiagramTemplate;
pub use toolbar::{ToolbarAction, ToolbarOutcome};
pub use viewport::{clamp_zoom, Viewport, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
