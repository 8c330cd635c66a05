//! Edge geometry: endpoint trimming so edges stop short of node glyphs.
//!
//! All functions here are pure and operate in the same coordinate space as
//! node positions (node centers).

/// Distance pulled back from the midpoint before the node-size clamp applies.
pub const ARROW_CLEARANCE: f32 = 40.0;

/// Fraction of the node size an edge end may retreat at most.
pub const MAX_OFFSET_RATIO: f32 = 0.75;

/// A 2D point in scene coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Offset vector returned by [`calculate_offset`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeOffset {
    pub x_off: f32,
    pub y_off: f32,
}

impl EdgeOffset {
    pub const ZERO: EdgeOffset = EdgeOffset { x_off: 0.0, y_off: 0.0 };

    /// Length of the offset vector
    pub fn length(&self) -> f32 {
        self.x_off.hypot(self.y_off)
    }
}

/// Compute how far an edge end should be pulled in along the source→target line.
///
/// The offset has length `clamp(len / 2 - 40, 0, 0.75 * node_size)` and points
/// from `source` toward `target`. Coincident points yield a zero offset.
///
/// # Arguments
/// * `node_size` - Node glyph size bound
/// * `source` - Where the line comes from
/// * `target` - Where the line goes to (the end being trimmed)
pub fn calculate_offset(node_size: f32, source: Point, target: Point) -> EdgeOffset {
    let arrow_x = target.x - source.x;
    let arrow_y = target.y - source.y;
    let len = arrow_x.hypot(arrow_y);

    let offset_length = (len / 2.0 - ARROW_CLEARANCE)
        .min(MAX_OFFSET_RATIO * node_size)
        .max(0.0);

    // 0 / 0 for coincident points
    let factor = offset_length / len;
    if !factor.is_finite() {
        return EdgeOffset::ZERO;
    }

    let offset = EdgeOffset {
        x_off: arrow_x * factor,
        y_off: arrow_y * factor,
    };
    if offset.x_off.is_finite() && offset.y_off.is_finite() {
        offset
    } else {
        EdgeOffset::ZERO
    }
}

/// Both ends of an edge after trimming, `(start, end)`.
///
/// Each end is computed with the opposite end as the line origin, so the edge
/// shrinks symmetrically toward its midpoint.
pub fn trimmed_endpoints(node_size: f32, source: Point, target: Point) -> (Point, Point) {
    let src_off = calculate_offset(node_size, target, source);
    let trg_off = calculate_offset(node_size, source, target);

    (
        Point::new(source.x - src_off.x_off, source.y - src_off.y_off),
        Point::new(target.x - trg_off.x_off, target.y - trg_off.y_off),
    )
}

/// Generate SVG path commands for a straight edge.
///
/// # Returns
/// SVG path command string (e.g., "M 10 20 L 140 80")
pub fn generate_edge_path(start: Point, end: Point) -> String {
    format!("M {} {} L {} {}", start.x, start.y, end.x, end.y)
}

/// Anchor for the edge handle and label: the midpoint of the drawn path.
pub fn edge_handle_translation(start: Point, end: Point) -> Point {
    Point::new(
        start.x + (end.x - start.x) / 2.0,
        start.y + (end.y - start.y) / 2.0,
    )
}

/// Format a point as an SVG-style translate transform.
pub fn translate_transform(p: Point) -> String {
    format!("translate({}, {})", p.x, p.y)
}

/// Distance from a point to the segment `a`–`b`.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f32 {
    let ab = (b.x - a.x, b.y - a.y);
    let ap = (point.x - a.x, point.y - a.y);

    let ab_len_sq = ab.0 * ab.0 + ab.1 * ab.1;

    if ab_len_sq < f32::EPSILON {
        return ap.0.hypot(ap.1);
    }

    // Project onto the line, clamped to the segment
    let t = ((ap.0 * ab.0 + ap.1 * ab.1) / ab_len_sq).clamp(0.0, 1.0);
    let dx = point.x - (a.x + t * ab.0);
    let dy = point.y - (a.y + t * ab.1);
    dx.hypot(dy)
}
