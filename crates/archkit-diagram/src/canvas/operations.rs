//! Diagram manipulation operations for Canvas.

use std::collections::HashMap;

use super::Canvas;
use crate::drag_drop::{decode_drag_payload, DragController, DragGesture, DragRelease};
use crate::model::{
    AnchorSide, ConnectionUpdate, DiagramConnection, DiagramNode, NodeKind,
};
use crate::path::{ConnectionPath, PathEnd};
use archkit_core::{
    id, AnalyticsEvent, GeometryError, Point, Rect, Result, Size, ValidationError,
};

impl Canvas {
    // --- node operations ---

    /// Adds a node with a generated id. Returns the new id.
    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> Result<String> {
        self.insert_node(DiagramNode::new(kind, position))
    }

    /// Adds a node with a caller-supplied id. Returns the id.
    pub fn add_node_with_id(
        &mut self,
        id: impl Into<String>,
        kind: NodeKind,
        position: Point,
    ) -> Result<String> {
        self.insert_node(DiagramNode::with_id(id, kind, position))
    }

    fn insert_node(&mut self, node: DiagramNode) -> Result<String> {
        if !node.position.is_finite() {
            return Err(GeometryError::NonFinite {
                context: "node position",
            }
            .into());
        }
        if self.diagram.contains_node(&node.id) {
            return Err(ValidationError::DuplicateNodeId { id: node.id }.into());
        }
        let id = node.id.clone();
        let kind = node.kind;
        self.diagram.nodes.push(node);
        self.mark_modified("add node");
        self.report(AnalyticsEvent::NodeAdded {
            kind: kind.as_str().to_string(),
        });
        Ok(id)
    }

    /// Moves a node to an absolute canvas position.
    pub fn move_node(&mut self, id: &str, position: Point) -> Result<()> {
        if !position.is_finite() {
            return Err(GeometryError::NonFinite {
                context: "node position",
            }
            .into());
        }
        let node = self
            .diagram
            .node_mut(id)
            .ok_or_else(|| ValidationError::UnknownNode { id: id.to_string() })?;
        node.position = position;
        self.mark_modified("move node");
        Ok(())
    }

    /// Resizes a node.
    pub fn resize_node(&mut self, id: &str, size: Size) -> Result<()> {
        if !size.is_valid() {
            return Err(GeometryError::InvalidSize {
                width: size.width,
                height: size.height,
            }
            .into());
        }
        let node = self
            .diagram
            .node_mut(id)
            .ok_or_else(|| ValidationError::UnknownNode { id: id.to_string() })?;
        node.size = size;
        self.mark_modified("resize node");
        Ok(())
    }

    /// Replaces a node's label.
    pub fn relabel_node(&mut self, id: &str, label: Option<String>) -> Result<()> {
        let node = self
            .diagram
            .node_mut(id)
            .ok_or_else(|| ValidationError::UnknownNode { id: id.to_string() })?;
        node.label = label;
        self.mark_modified("relabel node");
        Ok(())
    }

    /// Replaces a node's host payload.
    pub fn set_node_data(&mut self, id: &str, data: serde_json::Value) -> Result<()> {
        let node = self
            .diagram
            .node_mut(id)
            .ok_or_else(|| ValidationError::UnknownNode { id: id.to_string() })?;
        node.data = data;
        self.mark_modified("edit node data");
        Ok(())
    }

    /// Removes a node, every connection referencing it, and its id from
    /// the selection, as one state update. Returns the number of
    /// cascaded connection removals.
    pub fn remove_node(&mut self, id: &str) -> Result<usize> {
        if !self.diagram.contains_node(id) {
            return Err(ValidationError::UnknownNode { id: id.to_string() }.into());
        }

        self.diagram.nodes.retain(|n| n.id != id);
        let before = self.diagram.connections.len();
        self.diagram
            .connections
            .retain(|c| c.source != id && c.target != id);
        let cascaded = before - self.diagram.connections.len();

        let live = self.diagram.node_ids();
        self.selection.prune(&live);

        self.mark_modified("remove node");
        self.report(AnalyticsEvent::NodeRemoved {
            cascaded_connections: cascaded,
        });
        Ok(cascaded)
    }

    // --- connection operations ---

    /// Adds a plain connection between two existing nodes.
    pub fn add_connection(&mut self, source: &str, target: &str) -> Result<String> {
        self.insert_connection(DiagramConnection::new(source, target))
    }

    /// Adds a connection pinned to specific anchors at both ends.
    pub fn connect_anchors(
        &mut self,
        source: &str,
        source_anchor: AnchorSide,
        target: &str,
        target_anchor: AnchorSide,
    ) -> Result<String> {
        let mut connection = DiagramConnection::new(source, target);
        connection.source_anchor = Some(source_anchor);
        connection.target_anchor = Some(target_anchor);
        self.insert_connection(connection)
    }

    fn insert_connection(&mut self, connection: DiagramConnection) -> Result<String> {
        for endpoint in [&connection.source, &connection.target] {
            if !self.diagram.contains_node(endpoint) {
                return Err(ValidationError::UnknownNode {
                    id: endpoint.clone(),
                }
                .into());
            }
        }
        if self.diagram.connection(&connection.id).is_some() {
            return Err(ValidationError::DuplicateConnectionId { id: connection.id }.into());
        }
        let id = connection.id.clone();
        self.diagram.connections.push(connection);
        self.mark_modified("add connection");
        self.report(AnalyticsEvent::ConnectionAdded);
        Ok(id)
    }

    /// Applies one targeted update to a connection.
    pub fn update_connection(&mut self, id: &str, update: ConnectionUpdate) -> Result<()> {
        let connection = self
            .diagram
            .connection_mut(id)
            .ok_or_else(|| ValidationError::UnknownConnection { id: id.to_string() })?;
        match update {
            ConnectionUpdate::Style(style) => connection.style = style,
            ConnectionUpdate::Animation(animation) => connection.animation = animation,
            ConnectionUpdate::ArrowStart(head) => connection.arrow_start = head,
            ConnectionUpdate::ArrowEnd(head) => connection.arrow_end = head,
            ConnectionUpdate::Label(label) => connection.label = label,
            ConnectionUpdate::Animated(animated) => connection.animated = animated,
        }
        self.mark_modified("update connection");
        Ok(())
    }

    /// Removes a connection.
    pub fn remove_connection(&mut self, id: &str) -> Result<()> {
        let before = self.diagram.connections.len();
        self.diagram.connections.retain(|c| c.id != id);
        if self.diagram.connections.len() == before {
            return Err(ValidationError::UnknownConnection { id: id.to_string() }.into());
        }
        self.mark_modified("remove connection");
        Ok(())
    }

    // --- selection ---

    /// Click-toggles a node's selection. Unknown ids are ignored.
    pub fn toggle_node_selection(&mut self, id: &str, multi: bool) {
        if self.diagram.contains_node(id) {
            self.selection.toggle_node(id, multi);
        }
    }

    /// Selects a node without toggle semantics. Unknown ids are ignored.
    pub fn select_node(&mut self, id: &str, multi: bool) {
        if self.diagram.contains_node(id) {
            self.selection.select_node(id, multi);
        }
    }

    /// Clears the selection (empty-canvas click, Escape).
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selects every node.
    pub fn select_all(&mut self) {
        let ids: Vec<String> = self.diagram.nodes.iter().map(|n| n.id.clone()).collect();
        self.selection.replace(ids);
    }

    /// Marquee selection between two canvas-space corners.
    ///
    /// The corners may be in any order; nodes whose bounds intersect the
    /// normalized rectangle are selected. With `multi` the hits extend
    /// the current selection instead of replacing it.
    pub fn select_in_rect(&mut self, a: Point, b: Point, multi: bool) {
        let rect = Rect::from_points(a, b);
        let hits: Vec<String> = self
            .diagram
            .nodes
            .iter()
            .filter(|n| n.bounds().intersects(&rect))
            .map(|n| n.id.clone())
            .collect();
        if multi {
            for id in hits {
                self.selection.select_node(&id, true);
            }
        } else {
            self.selection.replace(hits);
        }
    }

    /// Moves every selected node by a canvas-space delta.
    pub fn move_selected(&mut self, dx: f64, dy: f64) -> Result<()> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(GeometryError::NonFinite {
                context: "move delta",
            }
            .into());
        }
        if self.selection.is_empty() {
            return Ok(());
        }
        let selected: Vec<String> = self.selection.ids().to_vec();
        for id in &selected {
            if let Some(node) = self.diagram.node_mut(id) {
                node.position = node.position.offset(dx, dy);
            }
        }
        self.mark_modified("move selection");
        Ok(())
    }

    // --- clipboard ---

    /// Copies the selected nodes and the connections between them.
    pub fn copy_selected(&mut self) {
        self.clipboard.nodes = self
            .diagram
            .nodes
            .iter()
            .filter(|n| self.selection.is_selected(&n.id))
            .cloned()
            .collect();
        self.clipboard.connections = self
            .diagram
            .connections
            .iter()
            .filter(|c| {
                self.selection.is_selected(&c.source) && self.selection.is_selected(&c.target)
            })
            .cloned()
            .collect();
    }

    /// Pastes the clipboard centered on a canvas-space position.
    ///
    /// Every pasted node gets a fresh id; connections between copied
    /// nodes are carried along with their endpoints remapped. The pasted
    /// nodes become the new selection. Returns the new node ids.
    pub fn paste_at(&mut self, position: Point) -> Vec<String> {
        if self.clipboard.nodes.is_empty() || !position.is_finite() {
            return Vec::new();
        }

        let mut bounds = self.clipboard.nodes[0].bounds();
        for node in &self.clipboard.nodes[1..] {
            bounds = bounds.union(&node.bounds());
        }
        let center = bounds.center();
        let dx = position.x - center.x;
        let dy = position.y - center.y;

        let mut id_map: HashMap<String, String> = HashMap::new();
        let mut new_ids = Vec::with_capacity(self.clipboard.nodes.len());

        let nodes = self.clipboard.nodes.clone();
        for node in nodes {
            let mut pasted = node.clone();
            let new_id = id::generate();
            id_map.insert(node.id.clone(), new_id.clone());
            pasted.id = new_id.clone();
            pasted.position = pasted.position.offset(dx, dy);
            self.diagram.nodes.push(pasted);
            new_ids.push(new_id);
        }

        let connections = self.clipboard.connections.clone();
        for connection in connections {
            // both endpoints were copied, so both remap
            let (Some(source), Some(target)) =
                (id_map.get(&connection.source), id_map.get(&connection.target))
            else {
                continue;
            };
            let mut pasted = connection.clone();
            pasted.id = id::generate();
            pasted.source = source.clone();
            pasted.target = target.clone();
            self.diagram.connections.push(pasted);
        }

        self.selection.replace(new_ids.clone());
        self.mark_modified("paste");
        new_ids
    }

    // --- drop handling ---

    /// Handles a palette drop.
    ///
    /// Decodes the payload, converts the drop point to canvas space, and
    /// creates the node there. A missing or malformed payload creates
    /// nothing and surfaces nothing; the failure is logged at debug and
    /// the drop is over.
    pub fn handle_drop(&mut self, data: Option<&str>, screen_position: Point) -> Option<String> {
        let payload = match decode_drag_payload(data) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(error = %e, "drop payload ignored");
                return None;
            }
        };

        let position = self.screen_to_canvas(screen_position);
        if !position.is_finite() {
            tracing::debug!("drop position not finite, ignored");
            return None;
        }

        let mut node = DiagramNode::with_id(payload.id, payload.kind, position);
        if !payload.text.is_empty() {
            node.label = Some(payload.text);
        }
        match self.insert_node(node) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::debug!(error = %e, "dropped node rejected");
                None
            }
        }
    }

    // --- connection drag gestures ---

    /// The drag controller, for rendering the floating line.
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Starts a new-connection gesture from a node anchor.
    pub fn begin_connection_drag(&mut self, node_id: &str, anchor: AnchorSide) -> Result<()> {
        let origin = self
            .diagram
            .node(node_id)
            .map(|n| n.anchor_point(anchor))
            .ok_or_else(|| ValidationError::UnknownNode {
                id: node_id.to_string(),
            })?;
        self.drag.start_connection(node_id, anchor, origin);
        Ok(())
    }

    /// Starts dragging one end of an existing connection to a new anchor.
    pub fn begin_reanchor_drag(&mut self, connection_id: &str, end: PathEnd) -> Result<()> {
        let connection = self
            .diagram
            .connection(connection_id)
            .ok_or_else(|| ValidationError::UnknownConnection {
                id: connection_id.to_string(),
            })?;
        let (node_id, pinned) = match end {
            PathEnd::Source => (&connection.source, connection.source_anchor),
            PathEnd::Target => (&connection.target, connection.target_anchor),
        };
        let origin = match (self.diagram.node(node_id), pinned) {
            (Some(node), Some(side)) => node.anchor_point(side),
            (Some(node), None) => {
                let other_id = match end {
                    PathEnd::Source => &connection.target,
                    PathEnd::Target => &connection.source,
                };
                let other = self.diagram.node(other_id).ok_or_else(|| {
                    ValidationError::UnknownNode {
                        id: other_id.clone(),
                    }
                })?;
                let derived = match end {
                    PathEnd::Source => connection.resolve_anchors(node, other).0,
                    PathEnd::Target => connection.resolve_anchors(other, node).1,
                };
                node.anchor_point(derived)
            }
            (None, _) => {
                return Err(ValidationError::UnknownNode {
                    id: node_id.clone(),
                }
                .into())
            }
        };
        self.drag.start_reanchor(connection_id, end, origin);
        Ok(())
    }

    /// Tracks the pointer during a connection gesture.
    pub fn drag_pointer_moved(&mut self, screen: Point) {
        let canvas = self.screen_to_canvas(screen);
        self.drag.update_pointer(canvas);
    }

    /// Completes the live gesture over a target anchor.
    ///
    /// A new-connection gesture returns the created connection id. A
    /// release over a vanished node cancels silently, like releasing
    /// over empty canvas.
    pub fn complete_drag_over(&mut self, node_id: &str, anchor: AnchorSide) -> Option<String> {
        let release = self.drag.complete(node_id, anchor)?;
        match release {
            DragRelease::Connect {
                source_node,
                source_anchor,
                target_node,
                target_anchor,
            } => {
                match self.connect_anchors(&source_node, source_anchor, &target_node, target_anchor)
                {
                    Ok(id) => Some(id),
                    Err(e) => {
                        tracing::debug!(error = %e, "connection drag cancelled");
                        None
                    }
                }
            }
            DragRelease::Reanchor {
                connection,
                end,
                node,
                anchor,
            } => {
                if !self.diagram.contains_node(&node) {
                    tracing::debug!(node, "reanchor target vanished, cancelled");
                    return None;
                }
                let Some(conn) = self.diagram.connection_mut(&connection) else {
                    tracing::debug!(connection, "reanchored connection vanished, cancelled");
                    return None;
                };
                match end {
                    PathEnd::Source => {
                        conn.source = node;
                        conn.source_anchor = Some(anchor);
                    }
                    PathEnd::Target => {
                        conn.target = node;
                        conn.target_anchor = Some(anchor);
                    }
                }
                self.mark_modified("reanchor connection");
                None
            }
        }
    }

    /// Abandons the live gesture. Returns whether one was live.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel()
    }

    /// The gesture in progress, if any.
    pub fn active_gesture(&self) -> Option<&DragGesture> {
        self.drag.gesture()
    }

    // --- hit testing and routing ---

    /// Topmost node containing a canvas-space point.
    pub fn node_at(&self, point: Point) -> Option<&DiagramNode> {
        self.diagram
            .nodes
            .iter()
            .rev()
            .find(|n| n.bounds().contains(point))
    }

    /// Nearest anchor within `radius` of a canvas-space point, topmost
    /// node first.
    pub fn anchor_at(&self, point: Point, radius: f64) -> Option<(String, AnchorSide)> {
        for node in self.diagram.nodes.iter().rev() {
            let mut best: Option<(AnchorSide, f64)> = None;
            for side in AnchorSide::all() {
                let d = node.anchor_point(side).distance_to(point);
                if d <= radius && best.map_or(true, |(_, bd)| d < bd) {
                    best = Some((side, d));
                }
            }
            if let Some((side, _)) = best {
                return Some((node.id.clone(), side));
            }
        }
        None
    }

    /// Topmost connection within `tolerance` of a canvas-space point.
    pub fn connection_at(&self, point: Point, tolerance: f64) -> Option<String> {
        self.diagram
            .connections
            .iter()
            .rev()
            .find(|c| {
                self.connection_path(&c.id)
                    .is_some_and(|path| path.hit_test(point, tolerance))
            })
            .map(|c| c.id.clone())
    }

    /// Routed path for a connection, `None` when it or an endpoint is
    /// missing.
    pub fn connection_path(&self, connection_id: &str) -> Option<ConnectionPath> {
        let connection = self.diagram.connection(connection_id)?;
        let source = self.diagram.node(&connection.source)?;
        let target = self.diagram.node(&connection.target)?;
        let (source_side, target_side) = connection.resolve_anchors(source, target);
        Some(ConnectionPath::with_offset(
            source.anchor_point(source_side),
            source_side,
            target.anchor_point(target_side),
            target_side,
            self.control_offset,
        ))
    }

    /// Opens the connection context menu at a screen position.
    ///
    /// Returns the clamped menu position, or `None` for an unknown
    /// connection.
    pub fn open_connection_menu(
        &mut self,
        connection_id: &str,
        requested: Point,
        menu_size: Size,
    ) -> Option<Point> {
        if self.diagram.connection(connection_id).is_none() {
            return None;
        }
        Some(
            self.menu
                .open(connection_id, requested, menu_size, self.view_size),
        )
    }
}
