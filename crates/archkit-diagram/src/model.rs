//! Diagram data model
//!
//! Nodes, connections, and the diagram document that owns them, plus the
//! closed enums for node kinds, connection styling, anchors, and
//! animation variants. Everything here is plain data; mutation policy
//! (cascade deletes, selection pruning, validation-before-commit) lives
//! in the canvas orchestrator.

use archkit_core::{id, Point, Rect, Size, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default node footprint used when a drop or template does not say otherwise
pub const DEFAULT_NODE_SIZE: Size = Size {
    width: 80.0,
    height: 80.0,
};

/// Node kind, matching the wire `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// AWS service node
    Aws,
    /// Google Cloud service node
    Gcp,
    /// C4-model element node
    C4,
    /// Free-form node
    Custom,
}

impl NodeKind {
    /// Wire string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Aws => "aws",
            NodeKind::Gcp => "gcp",
            NodeKind::C4 => "c4",
            NodeKind::Custom => "custom",
        }
    }

    /// Parse from a wire string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "aws" => Some(NodeKind::Aws),
            "gcp" => Some(NodeKind::Gcp),
            "c4" => Some(NodeKind::C4),
            "custom" => Some(NodeKind::Custom),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Connection line style, matching the wire `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStyle {
    /// Continuous stroke
    #[default]
    Solid,
    /// Long dashes
    Dashed,
    /// Short dots
    Dotted,
}

impl ConnectionStyle {
    /// Wire string for this style
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStyle::Solid => "solid",
            ConnectionStyle::Dashed => "dashed",
            ConnectionStyle::Dotted => "dotted",
        }
    }

    /// Dash pattern for this style, `None` for a continuous stroke.
    ///
    /// Exhaustive by construction; adding a style without a pattern is a
    /// compile error, not a silent fallthrough.
    pub fn dash_pattern(&self) -> Option<&'static [f64]> {
        match self {
            ConnectionStyle::Solid => None,
            ConnectionStyle::Dashed => Some(&[8.0, 4.0]),
            ConnectionStyle::Dotted => Some(&[2.0, 3.0]),
        }
    }
}

/// Arrow-head glyph kind at a connection end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowHead {
    /// No glyph
    #[default]
    None,
    /// Direction-dependent triangular arrow
    Arrow,
    /// Filled circle
    Circle,
    /// Filled diamond
    Diamond,
}

impl ArrowHead {
    /// Wire string for this arrow head
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrowHead::None => "none",
            ArrowHead::Arrow => "arrow",
            ArrowHead::Circle => "circle",
            ArrowHead::Diamond => "diamond",
        }
    }
}

/// One of the four fixed connection anchors on a node's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl AnchorSide {
    /// Outward unit normal for this side
    pub fn normal(&self) -> (f64, f64) {
        match self {
            AnchorSide::Top => (0.0, -1.0),
            AnchorSide::Right => (1.0, 0.0),
            AnchorSide::Bottom => (0.0, 1.0),
            AnchorSide::Left => (-1.0, 0.0),
        }
    }

    /// The facing side
    pub fn opposite(&self) -> AnchorSide {
        match self {
            AnchorSide::Top => AnchorSide::Bottom,
            AnchorSide::Right => AnchorSide::Left,
            AnchorSide::Bottom => AnchorSide::Top,
            AnchorSide::Left => AnchorSide::Right,
        }
    }

    /// All four sides, in clockwise order from the top
    pub fn all() -> [AnchorSide; 4] {
        [
            AnchorSide::Top,
            AnchorSide::Right,
            AnchorSide::Bottom,
            AnchorSide::Left,
        ]
    }
}

/// Connection animation variant
///
/// Each variant is rendered as a pure function of elapsed time and path
/// geometry; no animation state is stored on the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationVariant {
    /// No animation
    #[default]
    None,
    /// Opacity oscillation
    Pulse,
    /// Dash-offset drift along the path
    Flow,
    /// Static dashed rendering
    Dash,
    /// A dot moving along the path
    TravelingDot,
    /// A faster dot
    TravelingDotFast,
    /// The fastest dot tier
    TravelingDotFastest,
}

impl AnimationVariant {
    /// Wire string for this variant
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationVariant::None => "none",
            AnimationVariant::Pulse => "pulse",
            AnimationVariant::Flow => "flow",
            AnimationVariant::Dash => "dash",
            AnimationVariant::TravelingDot => "traveling-dot",
            AnimationVariant::TravelingDotFast => "traveling-dot-fast",
            AnimationVariant::TravelingDotFastest => "traveling-dot-fastest",
        }
    }

    /// Dot speed in path traversals per second, `None` for non-dot variants
    pub fn dot_speed(&self) -> Option<f64> {
        match self {
            AnimationVariant::TravelingDot => Some(0.4),
            AnimationVariant::TravelingDotFast => Some(0.8),
            AnimationVariant::TravelingDotFastest => Some(1.6),
            _ => None,
        }
    }
}

/// A node on the diagram canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    /// Unique id within the diagram. Drop-created nodes reuse the drag
    /// payload id; programmatic nodes get a UUID string.
    pub id: String,
    /// Node kind
    pub kind: NodeKind,
    /// Top-left corner in canvas space
    pub position: Point,
    /// Bounding-box size
    pub size: Size,
    /// Arbitrary payload carried for the host (icon name, C4 fields, ...)
    pub data: serde_json::Value,
    /// Optional display label
    pub label: Option<String>,
}

impl DiagramNode {
    /// Create a node with a generated id and the default size
    pub fn new(kind: NodeKind, position: Point) -> Self {
        Self {
            id: id::generate(),
            kind,
            position,
            size: DEFAULT_NODE_SIZE,
            data: serde_json::Value::Object(serde_json::Map::new()),
            label: None,
        }
    }

    /// Create a node with an explicit id (drop path)
    pub fn with_id(id: impl Into<String>, kind: NodeKind, position: Point) -> Self {
        Self {
            id: id.into(),
            ..Self::new(kind, position)
        }
    }

    /// Bounding box in canvas space
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Center point in canvas space
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Anchor location for one of the four connection points
    pub fn anchor_point(&self, side: AnchorSide) -> Point {
        let b = self.bounds();
        match side {
            AnchorSide::Top => Point::new(b.x + b.width / 2.0, b.y),
            AnchorSide::Right => Point::new(b.x + b.width, b.y + b.height / 2.0),
            AnchorSide::Bottom => Point::new(b.x + b.width / 2.0, b.y + b.height),
            AnchorSide::Left => Point::new(b.x, b.y + b.height / 2.0),
        }
    }
}

/// A styled connection between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramConnection {
    /// Unique id within the diagram
    pub id: String,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
    /// Line style
    pub style: ConnectionStyle,
    /// Optional mid-path label
    pub label: Option<String>,
    /// Legacy animation toggle kept alongside `animation` on the wire
    pub animated: bool,
    /// Arrow head at the source end
    pub arrow_start: ArrowHead,
    /// Arrow head at the target end
    pub arrow_end: ArrowHead,
    /// Animation variant
    pub animation: AnimationVariant,
    /// Pinned source anchor; `None` derives one from node positions
    pub source_anchor: Option<AnchorSide>,
    /// Pinned target anchor; `None` derives one from node positions
    pub target_anchor: Option<AnchorSide>,
}

impl DiagramConnection {
    /// Create a plain solid connection with a generated id
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id::generate(),
            source: source.into(),
            target: target.into(),
            style: ConnectionStyle::Solid,
            label: None,
            animated: false,
            arrow_start: ArrowHead::None,
            arrow_end: ArrowHead::None,
            animation: AnimationVariant::None,
            source_anchor: None,
            target_anchor: None,
        }
    }

    /// Anchor sides for this connection's endpoints.
    ///
    /// Pinned anchors win; otherwise the pair is derived from the nodes'
    /// relative centers (dominant axis, facing sides) so a connection
    /// persisted without anchor fields still routes sensibly.
    pub fn resolve_anchors(
        &self,
        source: &DiagramNode,
        target: &DiagramNode,
    ) -> (AnchorSide, AnchorSide) {
        let derived = derive_anchor_sides(source, target);
        (
            self.source_anchor.unwrap_or(derived.0),
            self.target_anchor.unwrap_or(derived.1),
        )
    }
}

/// Pick facing anchor sides from the relative position of two nodes
pub fn derive_anchor_sides(source: &DiagramNode, target: &DiagramNode) -> (AnchorSide, AnchorSide) {
    let sc = source.center();
    let tc = target.center();
    let dx = tc.x - sc.x;
    let dy = tc.y - sc.y;

    if dx.abs() >= dy.abs() {
        if dx >= 0.0 {
            (AnchorSide::Right, AnchorSide::Left)
        } else {
            (AnchorSide::Left, AnchorSide::Right)
        }
    } else if dy >= 0.0 {
        (AnchorSide::Bottom, AnchorSide::Top)
    } else {
        (AnchorSide::Top, AnchorSide::Bottom)
    }
}

/// A single targeted update to one connection.
///
/// The menu pickers produce these; the orchestrator applies them. Using a
/// closed enum keeps every mutable property enumerable by the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionUpdate {
    /// Change the line style
    Style(ConnectionStyle),
    /// Change the animation variant
    Animation(AnimationVariant),
    /// Change the arrow head at the source end
    ArrowStart(ArrowHead),
    /// Change the arrow head at the target end
    ArrowEnd(ArrowHead),
    /// Replace the label
    Label(Option<String>),
    /// Toggle the legacy animated flag
    Animated(bool),
}

/// A complete diagram document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    /// Unique diagram id
    pub id: String,
    /// Display name
    pub name: String,
    /// Nodes, unordered
    pub nodes: Vec<DiagramNode>,
    /// Connections, unordered
    pub connections: Vec<DiagramConnection>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp
    pub updated_at: DateTime<Utc>,
    /// Optional free-form metadata
    pub metadata: Option<serde_json::Value>,
}

impl Diagram {
    /// Create an empty diagram
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id::generate(),
            name: name.into(),
            nodes: Vec::new(),
            connections: Vec::new(),
            created_at: now,
            updated_at: now,
            metadata: None,
        }
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a node by id, mutably
    pub fn node_mut(&mut self, id: &str) -> Option<&mut DiagramNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Look up a connection by id
    pub fn connection(&self, id: &str) -> Option<&DiagramConnection> {
        self.connections.iter().find(|c| c.id == id)
    }

    /// Look up a connection by id, mutably
    pub fn connection_mut(&mut self, id: &str) -> Option<&mut DiagramConnection> {
        self.connections.iter_mut().find(|c| c.id == id)
    }

    /// Whether a node id exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// All node ids
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Bump the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Check structural invariants: unique node ids, unique connection
    /// ids, and every connection endpoint present in the node set.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut node_ids: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(ValidationError::DuplicateNodeId {
                    id: node.id.clone(),
                });
            }
        }

        let mut connection_ids: HashSet<&str> = HashSet::with_capacity(self.connections.len());
        for connection in &self.connections {
            if !connection_ids.insert(connection.id.as_str()) {
                return Err(ValidationError::DuplicateConnectionId {
                    id: connection.id.clone(),
                });
            }
            for endpoint in [&connection.source, &connection.target] {
                if !node_ids.contains(endpoint.as_str()) {
                    return Err(ValidationError::UnknownEndpoint {
                        connection: connection.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
