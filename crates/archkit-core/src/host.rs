//! Host-collaborator interfaces
//!
//! The diagram engine runs inside a host UI (browser canvas, desktop
//! widget, test harness). These traits are the seams the host plugs
//! into: a key-value store for session persistence, a fire-and-forget
//! analytics channel, and a notification sink for user-facing messages.
//!
//! Collaborators are injected into the orchestrator at session start and
//! detached on teardown. The engine never holds ambient/global instances
//! and never awaits a collaborator call.

use std::collections::HashMap;

/// Key-value persistence store
///
/// Backed by whatever the host has: browser localStorage, a config file,
/// or an in-memory map in tests. The engine only ever round-trips opaque
/// strings through it.
pub trait KeyValueStore {
    /// Load the value stored under `key`, if any
    fn load(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn save(&mut self, key: &str, value: &str);

    /// Remove the value stored under `key`
    fn remove(&mut self, key: &str);
}

/// Analytics events emitted by the orchestrator
///
/// Reported fire-and-forget; the engine never blocks on delivery and
/// never reads anything back.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    /// A node was created (by drop or programmatically)
    NodeAdded {
        /// The node kind as a wire string ("aws", "gcp", ...).
        kind: String,
    },
    /// A node was removed, cascading to its connections
    NodeRemoved {
        /// How many connections were removed with it.
        cascaded_connections: usize,
    },
    /// A connection was created
    ConnectionAdded,
    /// The diagram was exported to JSON
    DiagramExported {
        /// Node count at export time.
        nodes: usize,
        /// Connection count at export time.
        connections: usize,
    },
    /// A JSON payload replaced the diagram
    DiagramImported {
        /// Node count after import.
        nodes: usize,
        /// Connection count after import.
        connections: usize,
    },
    /// A starter template replaced the diagram
    TemplateApplied {
        /// The template identifier.
        template: String,
    },
    /// The session was written to the key-value store
    SessionSaved,
}

/// Fire-and-forget analytics reporting channel
pub trait AnalyticsReporter {
    /// Report an event. Must not block.
    fn report(&mut self, event: AnalyticsEvent);
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// User-facing notification sink
///
/// The sink renders the message (toast, status bar, stderr); the engine
/// does not manage display lifetime.
pub trait NotificationSink {
    /// Deliver a notification to the user
    fn notify(&mut self, kind: NotificationKind, message: &str);
}

/// In-memory key-value store for tests and the CLI
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Analytics reporter that drops every event
///
/// Useful as a stand-in when the host has no analytics channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl AnalyticsReporter for NullReporter {
    fn report(&mut self, _event: AnalyticsEvent) {}
}

/// Notification sink that writes through `tracing`
///
/// Used by the CLI; GUI hosts supply their own toast-backed sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&mut self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Error => tracing::error!("{}", message),
            NotificationKind::Warning => tracing::warn!("{}", message),
            NotificationKind::Info | NotificationKind::Success => tracing::info!("{}", message),
        }
    }
}
