//! Error handling for ArchKit
//!
//! Provides the error taxonomy for the diagram engine:
//! - Validation errors (malformed import payloads, referential violations)
//! - Drag payload errors (undecodable drop data, ignored silently at the
//!   drop boundary)
//! - Geometry errors (non-finite or non-positive input rejected at
//!   mutation boundaries)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Validation error type
///
/// Represents structural problems in a diagram or an imported payload.
/// A validation failure never leaves the diagram partially mutated: the
/// offending payload is checked in full before any state is committed.
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    /// Payload was not parseable as diagram JSON
    #[error("Malformed diagram JSON: {message}")]
    MalformedJson {
        /// The parser's diagnostic message.
        message: String,
    },

    /// Two nodes share the same id
    #[error("Duplicate node id: {id}")]
    DuplicateNodeId {
        /// The duplicated node id.
        id: String,
    },

    /// Two connections share the same id
    #[error("Duplicate connection id: {id}")]
    DuplicateConnectionId {
        /// The duplicated connection id.
        id: String,
    },

    /// A connection references a node id that is not in the node set
    #[error("Connection '{connection}' references unknown node '{node}'")]
    UnknownEndpoint {
        /// The connection whose endpoint is dangling.
        connection: String,
        /// The missing node id.
        node: String,
    },

    /// An operation addressed a node that does not exist
    #[error("Unknown node: {id}")]
    UnknownNode {
        /// The missing node id.
        id: String,
    },

    /// An operation addressed a connection that does not exist
    #[error("Unknown connection: {id}")]
    UnknownConnection {
        /// The missing connection id.
        id: String,
    },

    /// The payload declares a format version this build does not read
    #[error("Unsupported diagram format version: {version}")]
    UnsupportedVersion {
        /// The declared format version.
        version: String,
    },
}

/// Drag payload error type
///
/// Raised when a drop delivers data that cannot be decoded into a drag
/// payload. Policy: callers at the drop boundary ignore these silently
/// (no node is created, nothing is surfaced to the user).
#[derive(Error, Debug, Clone)]
pub enum DragPayloadError {
    /// The drop carried no data under any of the supported keys
    #[error("Drag payload missing")]
    Missing,

    /// The drop data was present but not a valid payload
    #[error("Drag payload not decodable: {message}")]
    Malformed {
        /// The decoder's diagnostic message.
        message: String,
    },
}

/// Geometry error type
///
/// Represents invalid geometric input at a state-mutation boundary.
/// Degenerate connection paths are not errors: the path engine recovers
/// by emitting a minimal valid path instead.
#[derive(Error, Debug, Clone)]
pub enum GeometryError {
    /// A coordinate was NaN or infinite
    #[error("{context} is not finite")]
    NonFinite {
        /// What the coordinate was for.
        context: &'static str,
    },

    /// A size had a zero or negative dimension
    #[error("Invalid size {width}x{height}: dimensions must be positive")]
    InvalidSize {
        /// The rejected width.
        width: f64,
        /// The rejected height.
        height: f64,
    },
}

/// Main error type for ArchKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Drag payload error
    #[error(transparent)]
    DragPayload(#[from] DragPayloadError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this is a drag payload error
    pub fn is_drag_payload(&self) -> bool {
        matches!(self, Error::DragPayload(_))
    }

    /// Check if this is a geometry error
    pub fn is_geometry(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
