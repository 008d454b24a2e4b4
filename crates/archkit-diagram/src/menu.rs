//! Connection context-menu model
//!
//! Pure state for the style/animation/arrow-head pickers. No rendering:
//! the host draws the menu and owns the outside-click listener; this
//! model owns which connection the menu targets and where it sits, so
//! open and close stay symmetric on both sides. Every pick becomes a
//! `(connection_id, ConnectionUpdate)` pair for the orchestrator.

use crate::model::{AnimationVariant, ArrowHead, ConnectionStyle, ConnectionUpdate};
use archkit_core::{Point, Size};

/// All line styles, in picker order
pub fn style_options() -> [ConnectionStyle; 3] {
    [
        ConnectionStyle::Solid,
        ConnectionStyle::Dashed,
        ConnectionStyle::Dotted,
    ]
}

/// All animation variants, in picker order
pub fn animation_options() -> [AnimationVariant; 7] {
    [
        AnimationVariant::None,
        AnimationVariant::Pulse,
        AnimationVariant::Flow,
        AnimationVariant::Dash,
        AnimationVariant::TravelingDot,
        AnimationVariant::TravelingDotFast,
        AnimationVariant::TravelingDotFastest,
    ]
}

/// All arrow heads, in picker order
pub fn arrow_head_options() -> [ArrowHead; 4] {
    [
        ArrowHead::None,
        ArrowHead::Arrow,
        ArrowHead::Circle,
        ArrowHead::Diamond,
    ]
}

/// Clamp a requested menu position so the whole menu stays on screen.
///
/// Each axis is `min(requested, viewport - menu)` floored at zero, so a
/// menu larger than the viewport pins to the top-left rather than
/// escaping it.
pub fn clamp_to_viewport(requested: Point, menu: Size, viewport: Size) -> Point {
    Point::new(
        requested.x.min(viewport.width - menu.width).max(0.0),
        requested.y.min(viewport.height - menu.height).max(0.0),
    )
}

/// An open menu targeting one connection
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSession {
    /// Connection the pickers edit
    pub connection: String,
    /// Clamped screen position
    pub position: Point,
}

/// Open/closed state of the connection context menu
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionMenu {
    session: Option<MenuSession>,
}

impl ConnectionMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the menu for a connection at a requested screen position.
    ///
    /// Returns the clamped position the host should place the menu at.
    /// Opening while already open retargets the menu.
    pub fn open(
        &mut self,
        connection: impl Into<String>,
        requested: Point,
        menu_size: Size,
        viewport_size: Size,
    ) -> Point {
        let position = clamp_to_viewport(requested, menu_size, viewport_size);
        self.session = Some(MenuSession {
            connection: connection.into(),
            position,
        });
        position
    }

    /// Close the menu. Safe to call when already closed.
    pub fn close(&mut self) {
        self.session = None;
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any
    pub fn session(&self) -> Option<&MenuSession> {
        self.session.as_ref()
    }

    /// Mutation for picking a line style
    pub fn pick_style(&self, style: ConnectionStyle) -> Option<(String, ConnectionUpdate)> {
        self.mutation(ConnectionUpdate::Style(style))
    }

    /// Mutation for picking an animation variant
    pub fn pick_animation(
        &self,
        animation: AnimationVariant,
    ) -> Option<(String, ConnectionUpdate)> {
        self.mutation(ConnectionUpdate::Animation(animation))
    }

    /// Mutation for picking the source-end arrow head
    pub fn pick_arrow_start(&self, head: ArrowHead) -> Option<(String, ConnectionUpdate)> {
        self.mutation(ConnectionUpdate::ArrowStart(head))
    }

    /// Mutation for picking the target-end arrow head
    pub fn pick_arrow_end(&self, head: ArrowHead) -> Option<(String, ConnectionUpdate)> {
        self.mutation(ConnectionUpdate::ArrowEnd(head))
    }

    fn mutation(&self, update: ConnectionUpdate) -> Option<(String, ConnectionUpdate)> {
        self.session
            .as_ref()
            .map(|s| (s.connection.clone(), update))
    }
}
