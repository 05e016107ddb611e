//! Visibility classification of triangles against square regions.
//!
//! Classification is conservative and cheap: it can prove that a triangle
//! is entirely inside a square, or entirely outside it, but when the two
//! genuinely intersect it only reports that clipping would be needed,
//! leaving the actual polygon clipping to the raster stage. The tests are,
//! in order:
//!
//! 1. Cohen–Sutherland style outcodes of the three vertices against the
//!    four half-planes bounding the square: all inside trivially accepts,
//!    all outside the same half-plane trivially rejects.
//! 2. Backface culling by winding order.
//! 3. Per-edge trivial rejection: if the whole square is on the exterior
//!    side of any one edge line, the triangle cannot overlap it.
//!
//! The canonical test works against the unit square [0,0]–[1,1]; an
//! arbitrary axis-aligned box is handled by mapping the triangle into the
//! box's local coordinate frame first, so a single algorithm serves both
//! the whole-viewport case and per-cell overlap queries.

use crate::geom::signed_area;
use crate::math::point::{Point2, pt2};
use crate::util::rect::Rect;

/// Visibility of a triangle with respect to a square region.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    /// Entirely inside the square; no clipping required.
    Visible,
    /// Overlaps the square boundary, or could not be trivially rejected;
    /// needs clipping.
    Clipped,
    /// Entirely outside the square, backfacing, or degenerate.
    Hidden,
}

/// The line through a triangle edge, in implicit form.
///
/// The normal points toward the triangle interior when the triangle is
/// front-facing (positive signed area); interior points then satisfy
/// `nx·x + ny·y > d`. A backfacing triangle inverts the normals, which is
/// why backfaces must be culled before edge rejection is attempted.
struct EdgeLine {
    nx: f32,
    ny: f32,
    d: f32,
}

impl EdgeLine {
    fn new<B>(a: Point2<B>, b: Point2<B>) -> Self {
        let (nx, ny) = (a.y() - b.y(), b.x() - a.x());
        Self { nx, ny, d: a.x() * nx + a.y() * ny }
    }

    /// Returns whether the unit square lies entirely on the exterior side
    /// of `self`.
    ///
    /// Only the square corner with the greatest interior margin needs
    /// testing; which one it is follows from the signs of the normal
    /// components. If even that corner is not strictly interior, no point
    /// of the square is, and a square merely touching the edge line does
    /// not count as overlapping.
    fn rejects_square(&self) -> bool {
        let px = if self.nx > 0.0 { 1.0 } else { 0.0 };
        let py = if self.ny > 0.0 { 1.0 } else { 0.0 };
        self.nx * px + self.ny * py <= self.d
    }
}

/// Returns the 4-bit outcode of `p` against the unit square.
///
/// Bit 0: x < 0, bit 1: x > 1, bit 2: y < 0, bit 3: y > 1. A point on or
/// inside the square boundary has outcode 0.
fn outcode<B>(p: &Point2<B>) -> u8 {
    (p.x() < 0.0) as u8
        | ((p.x() > 1.0) as u8) << 1
        | ((p.y() < 0.0) as u8) << 2
        | ((p.y() > 1.0) as u8) << 3
}

/// Returns whether the triangle *abc* faces away from the viewer.
///
/// Front faces have positive [signed area][signed_area]; everything else
/// is culled. Folding the comparison this way also rejects degenerate
/// triangles: a zero-area or non-finite area never compares greater than
/// zero.
pub fn is_backface<B>(pts: [Point2<B>; 3]) -> bool {
    !(signed_area(pts) > 0.0)
}

/// Returns the visibility of the triangle *abc* against the unit square
/// [0,0]–[1,1].
pub fn visibility<B>([a, b, c]: [Point2<B>; 3]) -> Status {
    // A NaN coordinate would sail through every outcode comparison below
    if [a, b, c]
        .iter()
        .any(|p| !p.x().is_finite() || !p.y().is_finite())
    {
        return Status::Hidden;
    }

    let [ca, cb, cc] = [a, b, c].map(|p| outcode(&p));
    if ca | cb | cc == 0 {
        // All in center, no clipping
        return Status::Visible;
    }
    if ca & cb & cc != 0 {
        // All outside the same plane
        return Status::Hidden;
    }

    // Backfaces invert the edge normals and would defeat the edge
    // rejection below
    if is_backface([a, b, c]) {
        return Status::Hidden;
    }

    let edges = [
        EdgeLine::new(a, b),
        EdgeLine::new(b, c),
        EdgeLine::new(c, a),
    ];
    if edges.iter().any(EdgeLine::rejects_square) {
        Status::Hidden
    } else {
        Status::Clipped
    }
}

/// Returns whether the triangle *abc* overlaps the axis-aligned box `bx`.
///
/// The triangle is mapped into the box's local frame, where the box is
/// the unit square, and then classified with [`visibility`]; any result
/// other than [`Hidden`][Status::Hidden] counts as overlap. With `bx`
/// equal to the unit square the two functions agree exactly.
///
/// `bx` must have positive extent in both dimensions.
pub fn intersects<B>(pts: [Point2<B>; 3], bx: &Rect<f32>) -> bool {
    let (w, h) = (bx.width(), bx.height());
    let local: [Point2<B>; 3] =
        pts.map(|p| pt2((p.x() - bx.left) / w, (p.y() - bx.top) / h));
    visibility(local) != Status::Hidden
}
