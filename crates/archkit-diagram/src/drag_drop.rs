//! Drag and drop
//!
//! Two concerns live here. The palette side: the drag payload carried when
//! a new element is dragged onto the canvas, with the single encode/decode
//! pair every caller goes through. The canvas side: in-progress connection
//! gestures (drawing a new connection from an anchor, or re-anchoring an
//! existing end), tracked as explicit state so the host can render the
//! floating line.

use crate::model::{AnchorSide, NodeKind};
use crate::path::PathEnd;
use archkit_core::{DragPayloadError, Point};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Keys the encoded payload is offered under during a browser-style drag.
///
/// Some drop targets only expose one of the two, so both carry the same
/// JSON.
pub const PAYLOAD_MIME_TYPES: [&str; 2] = ["application/json", "text/plain"];

/// Drop effect advertised for palette drags
pub const DROP_EFFECT: &str = "copy";

/// Payload describing a palette element being dragged onto the canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    /// Pre-assigned node id, `"{base}-{timestamp_ms}"`
    pub id: String,
    /// Node kind, the wire `type` field
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Display text for the dropped node
    pub text: String,
}

impl DragPayload {
    /// Build a payload with the id derived from the current time
    pub fn new(base: &str, kind: NodeKind, text: impl Into<String>) -> Self {
        Self::with_timestamp(base, kind, text, Utc::now().timestamp_millis())
    }

    /// Build a payload with an explicit timestamp, for deterministic ids
    pub fn with_timestamp(
        base: &str,
        kind: NodeKind,
        text: impl Into<String>,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            id: format!("{}-{}", base, timestamp_ms),
            kind,
            text: text.into(),
        }
    }
}

/// Encode a drag payload as JSON
pub fn encode_drag_payload(payload: &DragPayload) -> Result<String, DragPayloadError> {
    serde_json::to_string(payload).map_err(|e| DragPayloadError::Malformed {
        message: e.to_string(),
    })
}

/// Decode a drag payload from drop data.
///
/// `None` and empty strings are [`DragPayloadError::Missing`]; anything
/// that is not the expected JSON shape is
/// [`DragPayloadError::Malformed`]. Callers drop both silently.
pub fn decode_drag_payload(data: Option<&str>) -> Result<DragPayload, DragPayloadError> {
    let raw = match data {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Err(DragPayloadError::Missing),
    };
    serde_json::from_str(raw).map_err(|e| DragPayloadError::Malformed {
        message: e.to_string(),
    })
}

/// The `(key, data)` pairs to install on a drag's data transfer
pub fn transfer_entries(
    payload: &DragPayload,
) -> Result<Vec<(&'static str, String)>, DragPayloadError> {
    let encoded = encode_drag_payload(payload)?;
    Ok(PAYLOAD_MIME_TYPES
        .iter()
        .map(|&key| (key, encoded.clone()))
        .collect())
}

/// An in-progress connection gesture
#[derive(Debug, Clone, PartialEq)]
pub enum DragGesture {
    /// Drawing a brand-new connection out of a node anchor
    NewConnection {
        /// Node the drag started on
        source_node: String,
        /// Anchor the drag started on
        source_anchor: AnchorSide,
        /// Anchor location in canvas space, the floating line's fixed end
        origin: Point,
        /// Current pointer position in canvas space
        pointer: Point,
    },
    /// Dragging one end of an existing connection to a new anchor
    Reanchor {
        /// Connection being edited
        connection: String,
        /// Which end is being moved
        end: PathEnd,
        /// Where the end was before the drag, for cancel rendering
        origin: Point,
        /// Current pointer position in canvas space
        pointer: Point,
    },
}

impl DragGesture {
    /// The floating line the host renders while the gesture is live
    pub fn floating_line(&self) -> (Point, Point) {
        match self {
            DragGesture::NewConnection {
                origin, pointer, ..
            }
            | DragGesture::Reanchor {
                origin, pointer, ..
            } => (*origin, *pointer),
        }
    }
}

/// What a completed gesture asks the orchestrator to do
#[derive(Debug, Clone, PartialEq)]
pub enum DragRelease {
    /// Create a connection between two anchors
    Connect {
        source_node: String,
        source_anchor: AnchorSide,
        target_node: String,
        target_anchor: AnchorSide,
    },
    /// Move one end of an existing connection
    Reanchor {
        connection: String,
        end: PathEnd,
        node: String,
        anchor: AnchorSide,
    },
}

/// Tracks at most one connection gesture at a time.
///
/// The controller holds no diagram state; callers pass anchor locations
/// in and interpret the release against the diagram themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragController {
    gesture: Option<DragGesture>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live gesture, if any
    pub fn gesture(&self) -> Option<&DragGesture> {
        self.gesture.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Begin a new-connection gesture. Replaces any live gesture.
    pub fn start_connection(
        &mut self,
        source_node: impl Into<String>,
        source_anchor: AnchorSide,
        origin: Point,
    ) {
        self.gesture = Some(DragGesture::NewConnection {
            source_node: source_node.into(),
            source_anchor,
            origin,
            pointer: origin,
        });
    }

    /// Begin a re-anchor gesture on an existing connection end.
    pub fn start_reanchor(
        &mut self,
        connection: impl Into<String>,
        end: PathEnd,
        origin: Point,
    ) {
        self.gesture = Some(DragGesture::Reanchor {
            connection: connection.into(),
            end,
            origin,
            pointer: origin,
        });
    }

    /// Track the pointer. No-op when no gesture is live.
    pub fn update_pointer(&mut self, p: Point) {
        match &mut self.gesture {
            Some(DragGesture::NewConnection { pointer, .. })
            | Some(DragGesture::Reanchor { pointer, .. }) => *pointer = p,
            None => {}
        }
    }

    /// Complete the gesture over a target anchor.
    ///
    /// Consumes the gesture and returns the release for the orchestrator
    /// to validate and apply. Returns `None` when no gesture was live.
    pub fn complete(
        &mut self,
        target_node: impl Into<String>,
        target_anchor: AnchorSide,
    ) -> Option<DragRelease> {
        match self.gesture.take()? {
            DragGesture::NewConnection {
                source_node,
                source_anchor,
                ..
            } => Some(DragRelease::Connect {
                source_node,
                source_anchor,
                target_node: target_node.into(),
                target_anchor,
            }),
            DragGesture::Reanchor {
                connection, end, ..
            } => Some(DragRelease::Reanchor {
                connection,
                end,
                node: target_node.into(),
                anchor: target_anchor,
            }),
        }
    }

    /// Abandon the gesture. Returns whether one was live.
    pub fn cancel(&mut self) -> bool {
        self.gesture.take().is_some()
    }
}
