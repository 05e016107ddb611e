//! Basic geometric primitives.

use crate::math::{
    color::Color4f,
    point::Point2,
    vec::{ProjVec3, Vec2, vec2},
};

/// Vertex with a position and arbitrary other attributes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex<P, A> {
    pub pos: P,
    pub attrib: A,
}

/// Triangle, defined by three vertices.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(transparent)]
pub struct Tri<V>(pub [V; 3]);

/// Basis tag for texture coordinates.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Uv;

/// A texture coordinate pair.
pub type TexCoord = Vec2<f32, Uv>;

/// Per-vertex payload that binning carries through untouched.
///
/// The shading stage interpolates these across each rasterized triangle;
/// this stage never reads them.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Attrib {
    pub uv: TexCoord,
    pub color: Color4f,
}

/// Vertex type emitted by the upstream transform stage.
///
/// Positions are homogeneous, with `x` and `y` already in viewport pixel
/// units.
pub type ScreenVert = Vertex<ProjVec3, Attrib>;

/// Triangle type consumed by the binning stage.
pub type ScreenTri = Tri<ScreenVert>;

/// Polygon winding order.
///
/// The triangle *ABC* below has clockwise winding, while
/// the triangle *DEF* has counter-clockwise winding.
///
/// ```text
///     B            F
///    / \          / \
///   /   \        /   \
///  /     \      /     \
/// A-------C    D-------E
///    Cw           Ccw
/// ```
///
/// Winding is defined in the y-up mathematical orientation. Front faces
/// wind counter-clockwise; see [`signed_area`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Winding {
    /// Clockwise winding.
    Cw,
    /// Counter-clockwise winding.
    #[default]
    Ccw,
}

/// Creates a `Vertex` with the given position and attribute values.
pub const fn vertex<P, A>(pos: P, attrib: A) -> Vertex<P, A> {
    Vertex { pos, attrib }
}

/// Creates a `Tri` with the given vertices.
pub const fn tri<V>(a: V, b: V, c: V) -> Tri<V> {
    Tri([a, b, c])
}

/// Creates a `TexCoord` with the given components.
pub const fn uv(u: f32, v: f32) -> TexCoord {
    vec2(u, v)
}

/// Returns the signed area of the triangle *abc*.
///
/// The area is positive if the triangle is wound counter-clockwise,
/// negative if clockwise, and zero if the points are collinear. Front
/// faces have positive signed area by convention, so the sign doubles as
/// the backface criterion throughout the pipeline.
pub fn signed_area<B>([a, b, c]: [Point2<B>; 3]) -> f32 {
    (b - a).perp_dot(&(c - a)) / 2.0
}

/// Returns the winding order of the triangle *abc*.
pub fn winding<B>(pts: [Point2<B>; 3]) -> Winding {
    if signed_area(pts) < 0.0 {
        Winding::Cw
    } else {
        Winding::Ccw
    }
}
