//! # ArchKit
//!
//! A Rust engine for interactive architecture diagrams with support for:
//! - Draggable service nodes (AWS, GCP, C4, custom) on a pannable, zoomable canvas
//! - Cubic bezier connections with arrowheads, dash styles, and flow animation
//! - Multi-select, clipboard, drag-and-drop node creation, and connection reanchoring
//! - Versioned JSON import/export and starter templates
//!
//! ## Architecture
//!
//! ArchKit is organized as a workspace with multiple crates:
//!
//! 1. **archkit-core** - Geometry primitives, error types, host-collaborator traits
//! 2. **archkit-diagram** - Diagram model, bezier path engine, selection, canvas orchestrator
//! 3. **archkit-settings** - Configuration files, session store persistence
//! 4. **archkit** - Main binary that integrates all crates
//!
//! ## Features
//!
//! - **Canvas Engine**: Screen/canvas transforms, zoom clamping, fit-to-content
//! - **Connection Routing**: Anchor-side derivation, control-point offsets, hit testing
//! - **Host Seams**: Injectable key-value store, analytics reporter, notification sink
//! - **Persistence**: JSON diagrams, JSON/TOML config, file-backed session store
//! - **Cross-Platform**: Linux, Windows, macOS support

// Re-export modules for main.rs
pub use archkit_diagram as diagram;
pub use archkit_settings as settings;

pub use archkit_core::{
    AnalyticsEvent, AnalyticsReporter, DragPayloadError, Error, GeometryError, KeyValueStore,
    LogNotifier, MemoryStore, NotificationKind, NotificationSink, NullReporter, Point, Rect,
    Result, Size, ValidationError,
};

pub use archkit_diagram::{
    AnchorSide, AnimationVariant, ArrowHead, Canvas, ConnectionMenu, ConnectionPath,
    ConnectionStyle, ConnectionUpdate, Diagram, DiagramConnection, DiagramNode, DiagramTemplate,
    DragController, DragPayload, NodeKind, PathEnd, SelectionManager, ToolbarAction,
    ToolbarOutcome, Viewport,
};

pub use archkit_settings::{Config, FileStore, SettingsManager, Theme};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
