//! Serialization and deserialization for diagram files.
//!
//! Implements the persisted diagram JSON format: camelCase wire names,
//! versioned, liberal on optional fields. Wire structs are separate from
//! the model; conversion into a [`Diagram`] validates referential
//! integrity before anything is handed to callers, so a bad payload can
//! never half-apply.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::{
    AnchorSide, AnimationVariant, ArrowHead, ConnectionStyle, Diagram, DiagramConnection,
    DiagramNode, NodeKind, DEFAULT_NODE_SIZE,
};
use archkit_core::{id, Point, Size, ValidationError};

/// Diagram file format version
pub const DIAGRAM_FORMAT_VERSION: &str = "1.0";

/// Complete diagram file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramFile {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub connections: Vec<ConnectionData>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Serialized node data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Point,
    #[serde(default = "default_node_size")]
    pub size: Size,
    #[serde(default = "empty_object")]
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Serialized connection data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionData {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type", default)]
    pub style: ConnectionStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub arrow_start: ArrowHead,
    #[serde(default)]
    pub arrow_end: ArrowHead,
    #[serde(default)]
    pub animation: AnimationVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_anchor: Option<AnchorSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_anchor: Option<AnchorSide>,
}

fn default_version() -> String {
    DIAGRAM_FORMAT_VERSION.to_string()
}

fn default_name() -> String {
    "Untitled Diagram".to_string()
}

fn default_node_size() -> Size {
    DEFAULT_NODE_SIZE
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl DiagramFile {
    /// Build the wire form of a diagram
    pub fn from_diagram(diagram: &Diagram) -> Self {
        Self {
            version: DIAGRAM_FORMAT_VERSION.to_string(),
            id: diagram.id.clone(),
            name: diagram.name.clone(),
            nodes: diagram.nodes.iter().map(NodeData::from_node).collect(),
            connections: diagram
                .connections
                .iter()
                .map(ConnectionData::from_connection)
                .collect(),
            created_at: diagram.created_at,
            updated_at: diagram.updated_at,
            metadata: diagram.metadata.clone(),
        }
    }

    /// Convert into a model diagram, validating first.
    ///
    /// Rejects unsupported format versions, duplicate ids, and dangling
    /// connection endpoints. On error nothing of the payload escapes.
    pub fn into_diagram(self) -> Result<Diagram, ValidationError> {
        if self.version != DIAGRAM_FORMAT_VERSION {
            return Err(ValidationError::UnsupportedVersion {
                version: self.version,
            });
        }

        let diagram = Diagram {
            id: if self.id.is_empty() {
                id::generate()
            } else {
                self.id
            },
            name: self.name,
            nodes: self.nodes.into_iter().map(NodeData::into_node).collect(),
            connections: self
                .connections
                .into_iter()
                .map(ConnectionData::into_connection)
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            metadata: self.metadata,
        };

        diagram.validate()?;
        Ok(diagram)
    }
}

impl NodeData {
    fn from_node(node: &DiagramNode) -> Self {
        Self {
            id: node.id.clone(),
            kind: node.kind,
            position: node.position,
            size: node.size,
            data: node.data.clone(),
            label: node.label.clone(),
        }
    }

    fn into_node(self) -> DiagramNode {
        DiagramNode {
            id: self.id,
            kind: self.kind,
            position: self.position,
            size: self.size,
            data: self.data,
            label: self.label,
        }
    }
}

impl ConnectionData {
    fn from_connection(connection: &DiagramConnection) -> Self {
        Self {
            id: connection.id.clone(),
            source: connection.source.clone(),
            target: connection.target.clone(),
            style: connection.style,
            label: connection.label.clone(),
            animated: connection.animated,
            arrow_start: connection.arrow_start,
            arrow_end: connection.arrow_end,
            animation: connection.animation,
            source_anchor: connection.source_anchor,
            target_anchor: connection.target_anchor,
        }
    }

    fn into_connection(self) -> DiagramConnection {
        DiagramConnection {
            id: self.id,
            source: self.source,
            target: self.target,
            style: self.style,
            label: self.label,
            animated: self.animated,
            arrow_start: self.arrow_start,
            arrow_end: self.arrow_end,
            animation: self.animation,
            source_anchor: self.source_anchor,
            target_anchor: self.target_anchor,
        }
    }
}

/// Serialize a diagram to the wire JSON
pub fn to_json(diagram: &Diagram) -> archkit_core::Result<String> {
    let file = DiagramFile::from_diagram(diagram);
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Parse and validate wire JSON into a diagram.
///
/// Parse failures and schema mismatches surface as
/// [`ValidationError::MalformedJson`]; structural problems surface as
/// their own validation variants.
pub fn from_json(json: &str) -> archkit_core::Result<Diagram> {
    let file: DiagramFile =
        serde_json::from_str(json).map_err(|e| ValidationError::MalformedJson {
            message: e.to_string(),
        })?;
    Ok(file.into_diagram()?)
}

/// Save a diagram to a file as pretty JSON
pub fn save_to_file(diagram: &Diagram, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let json = to_json(diagram).context("Failed to serialize diagram")?;
    std::fs::write(path.as_ref(), json).context("Failed to write diagram file")?;
    Ok(())
}

/// Load a diagram from a file
pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Diagram> {
    let content =
        std::fs::read_to_string(path.as_ref()).context("Failed to read diagram file")?;
    let diagram = from_json(&content).context("Failed to parse diagram file")?;
    Ok(diagram)
}
