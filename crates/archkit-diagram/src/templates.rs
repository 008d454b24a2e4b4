//! # Diagram Template Management Module
//!
//! Built-in starter diagrams the toolbar can instantiate: a blank canvas,
//! a three-tier web service, and a small microservices topology. Each
//! template builds a fresh [`Diagram`] with readable node ids so the
//! result is pleasant to hand-edit after export.

use crate::model::{
    AnchorSide, AnimationVariant, ArrowHead, ConnectionStyle, Diagram, DiagramConnection,
    DiagramNode, NodeKind,
};
use archkit_core::Point;

/// Built-in starter templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramTemplate {
    /// Empty canvas
    Blank,
    /// Client, API server, database
    WebService,
    /// Gateway, three services, shared message queue
    Microservices,
}

impl DiagramTemplate {
    /// Get template as string
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramTemplate::Blank => "blank",
            DiagramTemplate::WebService => "web-service",
            DiagramTemplate::Microservices => "microservices",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "blank" => Some(DiagramTemplate::Blank),
            "web-service" => Some(DiagramTemplate::WebService),
            "microservices" => Some(DiagramTemplate::Microservices),
            _ => None,
        }
    }

    /// Display name for pickers
    pub fn display_name(&self) -> &'static str {
        match self {
            DiagramTemplate::Blank => "Blank",
            DiagramTemplate::WebService => "Web Service",
            DiagramTemplate::Microservices => "Microservices",
        }
    }

    /// One-line description for pickers
    pub fn description(&self) -> &'static str {
        match self {
            DiagramTemplate::Blank => "An empty canvas",
            DiagramTemplate::WebService => "Client, API server and database",
            DiagramTemplate::Microservices => "API gateway, services and a message queue",
        }
    }

    /// All templates in picker order
    pub fn all() -> [DiagramTemplate; 3] {
        [
            DiagramTemplate::Blank,
            DiagramTemplate::WebService,
            DiagramTemplate::Microservices,
        ]
    }

    /// Build a fresh diagram from this template
    pub fn instantiate(&self) -> Diagram {
        match self {
            DiagramTemplate::Blank => Diagram::new("Untitled Diagram"),
            DiagramTemplate::WebService => web_service(),
            DiagramTemplate::Microservices => microservices(),
        }
    }
}

fn labeled_node(id: &str, kind: NodeKind, position: Point, label: &str) -> DiagramNode {
    let mut node = DiagramNode::with_id(id, kind, position);
    node.label = Some(label.to_string());
    node
}

fn arrowed(mut conn: DiagramConnection) -> DiagramConnection {
    conn.arrow_end = ArrowHead::Arrow;
    conn
}

fn web_service() -> Diagram {
    let mut diagram = Diagram::new("Web Service");
    diagram.nodes = vec![
        labeled_node("web-client", NodeKind::Custom, Point::new(100.0, 200.0), "Client"),
        labeled_node("api-server", NodeKind::Custom, Point::new(320.0, 200.0), "API Server"),
        labeled_node("database", NodeKind::Custom, Point::new(540.0, 200.0), "Database"),
    ];

    let mut request = arrowed(DiagramConnection::new("web-client", "api-server"));
    request.label = Some("HTTPS".to_string());
    request.source_anchor = Some(AnchorSide::Right);
    request.target_anchor = Some(AnchorSide::Left);

    let mut query = arrowed(DiagramConnection::new("api-server", "database"));
    query.label = Some("SQL".to_string());
    query.source_anchor = Some(AnchorSide::Right);
    query.target_anchor = Some(AnchorSide::Left);

    diagram.connections = vec![request, query];
    diagram
}

fn microservices() -> Diagram {
    let mut diagram = Diagram::new("Microservices");
    diagram.nodes = vec![
        labeled_node("gateway", NodeKind::Custom, Point::new(320.0, 80.0), "API Gateway"),
        labeled_node("auth-service", NodeKind::Custom, Point::new(100.0, 260.0), "Auth Service"),
        labeled_node("orders-service", NodeKind::Custom, Point::new(320.0, 260.0), "Orders Service"),
        labeled_node(
            "inventory-service",
            NodeKind::Custom,
            Point::new(540.0, 260.0),
            "Inventory Service",
        ),
        labeled_node("message-queue", NodeKind::Custom, Point::new(320.0, 440.0), "Message Queue"),
    ];

    let mut connections = Vec::new();
    for service in ["auth-service", "orders-service", "inventory-service"] {
        let mut conn = arrowed(DiagramConnection::new("gateway", service));
        conn.source_anchor = Some(AnchorSide::Bottom);
        conn.target_anchor = Some(AnchorSide::Top);
        connections.push(conn);
    }
    for service in ["orders-service", "inventory-service"] {
        let mut conn = arrowed(DiagramConnection::new(service, "message-queue"));
        conn.style = ConnectionStyle::Dashed;
        conn.animated = true;
        conn.animation = AnimationVariant::Flow;
        conn.source_anchor = Some(AnchorSide::Bottom);
        conn.target_anchor = Some(AnchorSide::Top);
        connections.push(conn);
    }

    diagram.connections = connections;
    diagram
}
