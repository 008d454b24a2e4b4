//! Connection path engine
//!
//! Builds the cubic bezier between two anchored endpoints and derives
//! everything the host renders from it: the SVG path string, arrow-head
//! glyphs, label placement, hit testing, and per-frame animation values.
//! All outputs are pure functions of the path and elapsed time.

use crate::model::{AnchorSide, AnimationVariant, ArrowHead, ConnectionStyle};
use archkit_core::{Point, Rect};
use lyon::geom::{point, CubicBezierSegment};
use smallvec::SmallVec;

/// Control-point distance from each endpoint along its anchor normal
pub const DEFAULT_CONTROL_OFFSET: f64 = 60.0;
/// Arrow-head glyph extent in canvas units
pub const ARROW_SIZE: f64 = 10.0;
/// Segment count used when sampling the curve for hit tests and length
pub const HIT_SAMPLES: usize = 50;

/// Dash pattern used by `flow` when the underlying style is solid
const FLOW_DASH: [f64; 2] = [6.0, 6.0];
/// Dash pattern forced by the `dash` variant
const STATIC_DASH: [f64; 2] = [8.0, 4.0];
/// Dash drift in canvas units per second for `flow`
const FLOW_SPEED: f64 = 24.0;
/// Full opacity cycle for `pulse`, in seconds
const PULSE_PERIOD: f64 = 1.5;

/// Which end of a connection path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEnd {
    Source,
    Target,
}

/// A cubic bezier connection path with its anchor sides
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPath {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
    source_side: AnchorSide,
    target_side: AnchorSide,
}

impl ConnectionPath {
    /// Build a path between two anchors with the default control offset
    pub fn between(
        from: Point,
        from_side: AnchorSide,
        to: Point,
        to_side: AnchorSide,
    ) -> Self {
        Self::with_offset(from, from_side, to, to_side, DEFAULT_CONTROL_OFFSET)
    }

    /// Build a path with an explicit control offset.
    ///
    /// Each control point sits `offset` canvas units out from its endpoint
    /// along the anchor side's outward normal, so the curve leaves a node
    /// perpendicular to the side it attaches to. Coincident endpoints
    /// still yield a valid (looping) path.
    pub fn with_offset(
        from: Point,
        from_side: AnchorSide,
        to: Point,
        to_side: AnchorSide,
        offset: f64,
    ) -> Self {
        let (fnx, fny) = from_side.normal();
        let (tnx, tny) = to_side.normal();
        Self {
            from,
            ctrl1: Point::new(from.x + fnx * offset, from.y + fny * offset),
            ctrl2: Point::new(to.x + tnx * offset, to.y + tny * offset),
            to,
            source_side: from_side,
            target_side: to_side,
        }
    }

    fn segment(&self) -> CubicBezierSegment<f64> {
        CubicBezierSegment {
            from: point(self.from.x, self.from.y),
            ctrl1: point(self.ctrl1.x, self.ctrl1.y),
            ctrl2: point(self.ctrl2.x, self.ctrl2.y),
            to: point(self.to.x, self.to.y),
        }
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    ///
    /// `t = 0.0` and `t = 1.0` return the endpoints exactly, not within
    /// epsilon; hosts rely on that to pin arrow heads to anchors.
    pub fn point_at(&self, t: f64) -> Point {
        let p = self.segment().sample(t);
        Point::new(p.x, p.y)
    }

    /// Label anchor, the curve midpoint by parameter
    pub fn label_position(&self) -> Point {
        self.point_at(0.5)
    }

    /// SVG path data for the curve
    pub fn to_svg(&self) -> String {
        format!(
            "M {},{} C {},{} {},{} {},{}",
            self.from.x,
            self.from.y,
            self.ctrl1.x,
            self.ctrl1.y,
            self.ctrl2.x,
            self.ctrl2.y,
            self.to.x,
            self.to.y
        )
    }

    /// Conservative bounding rectangle.
    ///
    /// The curve is contained in the convex hull of its control points,
    /// so the union of all four suffices for invalidation regions.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.from, self.ctrl1)
            .union(&Rect::from_points(self.ctrl2, self.to))
    }

    /// Approximate arc length from uniform parameter sampling
    pub fn approx_length(&self) -> f64 {
        let seg = self.segment();
        let mut length = 0.0;
        let mut prev = seg.sample(0.0);
        for i in 1..=HIT_SAMPLES {
            let t = i as f64 / HIT_SAMPLES as f64;
            let next = seg.sample(t);
            let dx = next.x - prev.x;
            let dy = next.y - prev.y;
            length += (dx * dx + dy * dy).sqrt();
            prev = next;
        }
        length
    }

    /// Minimum distance from a point to the sampled curve
    pub fn distance_to(&self, p: Point) -> f64 {
        let seg = self.segment();
        let mut best = f64::INFINITY;
        let mut prev = seg.sample(0.0);
        for i in 1..=HIT_SAMPLES {
            let t = i as f64 / HIT_SAMPLES as f64;
            let next = seg.sample(t);
            let d = point_segment_distance(
                p,
                Point::new(prev.x, prev.y),
                Point::new(next.x, next.y),
            );
            if d < best {
                best = d;
            }
            prev = next;
        }
        best
    }

    /// Whether a point falls within `tolerance` of the curve.
    ///
    /// Non-finite points never hit.
    pub fn hit_test(&self, p: Point, tolerance: f64) -> bool {
        if !p.is_finite() {
            return false;
        }
        self.distance_to(p) <= tolerance
    }

    /// Anchor side at one end
    pub fn side(&self, end: PathEnd) -> AnchorSide {
        match end {
            PathEnd::Source => self.source_side,
            PathEnd::Target => self.target_side,
        }
    }

    /// Arrow-head glyph at one end, `None` for [`ArrowHead::None`].
    ///
    /// Glyphs point into the node (against the anchor's outward normal),
    /// tip pinned to the endpoint.
    pub fn arrow_glyph(&self, head: ArrowHead, end: PathEnd) -> Option<ArrowGlyph> {
        let (tip, side) = match end {
            PathEnd::Source => (self.from, self.source_side),
            PathEnd::Target => (self.to, self.target_side),
        };
        let (nx, ny) = side.normal();
        // direction the glyph points: away from the line body
        let (dx, dy) = (-nx, -ny);
        // perpendicular for wing placement
        let (px, py) = (-dy, dx);

        match head {
            ArrowHead::None => None,
            ArrowHead::Arrow => {
                let base = Point::new(tip.x - dx * ARROW_SIZE, tip.y - dy * ARROW_SIZE);
                let half = ARROW_SIZE * 0.5;
                let mut pts: SmallVec<[Point; 4]> = SmallVec::new();
                pts.push(tip);
                pts.push(Point::new(base.x + px * half, base.y + py * half));
                pts.push(Point::new(base.x - px * half, base.y - py * half));
                Some(ArrowGlyph::Polygon(pts))
            }
            ArrowHead::Circle => Some(ArrowGlyph::Circle {
                center: tip,
                radius: ARROW_SIZE * 0.4,
            }),
            ArrowHead::Diamond => {
                let half = ARROW_SIZE * 0.5;
                let center = Point::new(tip.x - dx * half, tip.y - dy * half);
                let mut pts: SmallVec<[Point; 4]> = SmallVec::new();
                pts.push(tip);
                pts.push(Point::new(center.x + px * half, center.y + py * half));
                pts.push(Point::new(tip.x - dx * ARROW_SIZE, tip.y - dy * ARROW_SIZE));
                pts.push(Point::new(center.x - px * half, center.y - py * half));
                Some(ArrowGlyph::Polygon(pts))
            }
        }
    }

    /// Per-frame animation values for this path.
    ///
    /// `elapsed` is wall-clock seconds since the animation started. The
    /// result is deterministic in `elapsed`, so hosts can drive it from
    /// any clock and replay frames in tests.
    pub fn animation_frame(
        &self,
        variant: AnimationVariant,
        style: ConnectionStyle,
        elapsed: f64,
    ) -> AnimationFrame {
        let base_dash = style.dash_pattern();
        match variant {
            AnimationVariant::None => AnimationFrame {
                opacity: 1.0,
                dash: base_dash,
                dash_offset: 0.0,
                dot: None,
            },
            AnimationVariant::Pulse => {
                let phase = (elapsed / PULSE_PERIOD) * std::f64::consts::TAU;
                AnimationFrame {
                    opacity: 0.3 + 0.7 * (0.5 + 0.5 * phase.sin()),
                    dash: base_dash,
                    dash_offset: 0.0,
                    dot: None,
                }
            }
            AnimationVariant::Flow => {
                let dash = base_dash.unwrap_or(&FLOW_DASH);
                let period: f64 = dash.iter().sum();
                AnimationFrame {
                    opacity: 1.0,
                    dash: Some(dash),
                    dash_offset: -((elapsed * FLOW_SPEED) % period),
                    dot: None,
                }
            }
            AnimationVariant::Dash => AnimationFrame {
                opacity: 1.0,
                dash: Some(base_dash.unwrap_or(&STATIC_DASH)),
                dash_offset: 0.0,
                dot: None,
            },
            AnimationVariant::TravelingDot
            | AnimationVariant::TravelingDotFast
            | AnimationVariant::TravelingDotFastest => {
                // dot_speed is Some for every dot variant
                let speed = variant.dot_speed().unwrap_or(0.4);
                let t = (elapsed * speed).fract();
                AnimationFrame {
                    opacity: 1.0,
                    dash: base_dash,
                    dash_offset: 0.0,
                    dot: Some(self.point_at(t)),
                }
            }
        }
    }
}

/// Renderable arrow-head geometry
#[derive(Debug, Clone, PartialEq)]
pub enum ArrowGlyph {
    /// Filled polygon, vertices in draw order
    Polygon(SmallVec<[Point; 4]>),
    /// Filled circle
    Circle { center: Point, radius: f64 },
}

/// One frame of connection animation state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Stroke opacity in `[0, 1]`
    pub opacity: f64,
    /// Dash pattern to stroke with, `None` for a continuous line
    pub dash: Option<&'static [f64]>,
    /// Dash-offset for drifting patterns
    pub dash_offset: f64,
    /// Traveling-dot position, when the variant has one
    pub dot: Option<Point>,
}

/// Distance from `p` to the segment `a..b`
fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + abx * t, a.y + aby * t);
    p.distance_to(proj)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal_path() -> ConnectionPath {
        ConnectionPath::between(
            Point::new(100.0, 100.0),
            AnchorSide::Right,
            Point::new(300.0, 100.0),
            AnchorSide::Left,
        )
    }

    #[test]
    fn control_points_follow_anchor_normals() {
        let p = horizontal_path();
        assert_eq!(p.ctrl1, Point::new(160.0, 100.0));
        assert_eq!(p.ctrl2, Point::new(240.0, 100.0));

        let vertical = ConnectionPath::between(
            Point::new(50.0, 50.0),
            AnchorSide::Top,
            Point::new(50.0, 200.0),
            AnchorSide::Bottom,
        );
        assert_eq!(vertical.ctrl1, Point::new(50.0, -10.0));
        assert_eq!(vertical.ctrl2, Point::new(50.0, 260.0));
    }

    #[test]
    fn endpoints_are_exact() {
        let p = horizontal_path();
        assert_eq!(p.point_at(0.0), p.from);
        assert_eq!(p.point_at(1.0), p.to);
    }

    #[test]
    fn svg_string_format() {
        let p = horizontal_path();
        assert_eq!(
            p.to_svg(),
            "M 100,100 C 160,100 240,100 300,100"
        );
    }

    #[test]
    fn straight_path_midpoint_is_geometric_middle() {
        let p = horizontal_path();
        let mid = p.label_position();
        assert!((mid.x - 200.0).abs() < 1e-9);
        assert!((mid.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn coincident_endpoints_still_produce_finite_path() {
        let p = ConnectionPath::between(
            Point::new(100.0, 100.0),
            AnchorSide::Right,
            Point::new(100.0, 100.0),
            AnchorSide::Right,
        );
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!(p.point_at(t).is_finite());
        }
        assert!(p.approx_length().is_finite());
    }

    #[test]
    fn hit_test_on_and_off_curve() {
        let p = horizontal_path();
        // the curve is the straight line y = 100 here
        assert!(p.hit_test(Point::new(200.0, 102.0), 5.0));
        assert!(!p.hit_test(Point::new(200.0, 140.0), 5.0));
        assert!(!p.hit_test(Point::new(f64::NAN, 100.0), 5.0));
    }

    #[test]
    fn arrow_glyph_points_into_node() {
        let p = horizontal_path();
        let glyph = p.arrow_glyph(ArrowHead::Arrow, PathEnd::Target);
        let ArrowGlyph::Polygon(pts) = glyph.expect("arrow glyph") else {
            panic!("expected polygon");
        };
        // tip pinned to the endpoint, wings behind it toward the line
        assert_eq!(pts[0], p.to);
        assert!(pts[1].x < p.to.x);
        assert!(pts[2].x < p.to.x);
    }

    #[test]
    fn none_head_has_no_glyph() {
        let p = horizontal_path();
        assert!(p.arrow_glyph(ArrowHead::None, PathEnd::Source).is_none());
        assert!(p.arrow_glyph(ArrowHead::None, PathEnd::Target).is_none());
    }

    #[test]
    fn traveling_dot_wraps_around() {
        let p = horizontal_path();
        let f0 = p.animation_frame(AnimationVariant::TravelingDot, ConnectionStyle::Solid, 0.0);
        // 0.4 traversals/sec, so 2.5s is exactly one lap
        let f1 = p.animation_frame(AnimationVariant::TravelingDot, ConnectionStyle::Solid, 2.5);
        let d0 = f0.dot.expect("dot at t=0");
        let d1 = f1.dot.expect("dot after one lap");
        assert!((d0.x - d1.x).abs() < 1e-9);
        assert!((d0.y - d1.y).abs() < 1e-9);
    }

    #[test]
    fn pulse_opacity_stays_in_range() {
        let p = horizontal_path();
        for i in 0..30 {
            let f = p.animation_frame(
                AnimationVariant::Pulse,
                ConnectionStyle::Solid,
                i as f64 * 0.1,
            );
            assert!(f.opacity >= 0.3 - 1e-9 && f.opacity <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn flow_uses_style_dash_when_present() {
        let p = horizontal_path();
        let f = p.animation_frame(AnimationVariant::Flow, ConnectionStyle::Dashed, 1.0);
        assert_eq!(f.dash, ConnectionStyle::Dashed.dash_pattern());
        assert!(f.dash_offset < 0.0);

        let solid = p.animation_frame(AnimationVariant::Flow, ConnectionStyle::Solid, 1.0);
        assert_eq!(solid.dash, Some(&FLOW_DASH[..]));
    }

    #[test]
    fn dash_variant_forces_dashes_on_solid() {
        let p = horizontal_path();
        let f = p.animation_frame(AnimationVariant::Dash, ConnectionStyle::Solid, 0.0);
        assert_eq!(f.dash, Some(&STATIC_DASH[..]));
        assert_eq!(f.dash_offset, 0.0);
    }

    #[test]
    fn bounds_contain_sampled_curve() {
        let p = ConnectionPath::between(
            Point::new(100.0, 100.0),
            AnchorSide::Top,
            Point::new(250.0, 300.0),
            AnchorSide::Left,
        );
        let b = p.bounds();
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert!(b.contains(p.point_at(t)));
        }
    }
}
