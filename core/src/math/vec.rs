//! Vectors tagged with the space they are embedded in.
//!
//! Mixing up coordinate spaces is one of the easiest ways to get silently
//! wrong geometry out of a rasterizer. Vectors here carry a phantom `Space`
//! parameter so that, for instance, a vector of texture coordinates cannot
//! be accidentally used as a screen-space offset.

use core::fmt::{Debug, Formatter};
use core::marker::PhantomData as Pd;
use core::ops::{Index, Mul, Sub};

/// Tag type for real vector spaces of dimension `DIM` with basis `Basis`.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct Real<const DIM: usize, Basis = ()>(Pd<Basis>);

// Manual `Copy`/`Clone` so the phantom `Basis` is not constrained to be
// `Copy` itself (the `#[derive]` would add that unwanted bound, which in
// turn would deny `Copy` to `Point`/`Vector` over unconstrained space tags).
impl<const DIM: usize, Basis> Clone for Real<DIM, Basis> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<const DIM: usize, Basis> Copy for Real<DIM, Basis> {}

/// Tag type for three-dimensional projective space.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Proj3;

/// A vector in space `Space`, with representation `Repr`.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct Vector<Repr, Space = ()>(pub Repr, Pd<Space>);

/// A 2-vector with scalar components `Sc`, embedded in basis `B`.
pub type Vec2<Sc = f32, B = ()> = Vector<[Sc; 2], Real<2, B>>;

/// A homogeneous vector in 3D projective space.
///
/// The rasterizer's vertex positions are of this type: `x` and `y` are
/// viewport pixel coordinates after the perspective divide and viewport
/// transform, while `z` and `w` carry depth and the clip-space `w` for
/// the downstream stages.
pub type ProjVec3 = Vector<[f32; 4], Proj3>;

/// Returns a 2-vector with the given components.
pub const fn vec2<Sc, B>(x: Sc, y: Sc) -> Vec2<Sc, B> {
    Vector([x, y], Pd)
}

impl<R, S> Vector<R, S> {
    /// Creates a vector from its representation.
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, Pd)
    }
}

impl<R, Sc, B> Vector<R, Real<2, B>>
where
    R: Index<usize, Output = Sc>,
    Sc: Copy,
{
    /// Returns the x component of `self`.
    #[inline]
    pub fn x(&self) -> Sc {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub fn y(&self) -> Sc {
        self.0[1]
    }
}

impl<Sc, B> Vec2<Sc, B>
where
    Sc: Copy + Mul<Output = Sc> + Sub<Output = Sc>,
{
    /// Returns the perpendicular dot product of `self` and `other`.
    ///
    /// Equals the z component of the cross product of `self` and `other`
    /// embedded in 3D, and thus the signed area of the parallelogram
    /// spanned by the two vectors.
    #[inline]
    pub fn perp_dot(&self, other: &Self) -> Sc {
        self.x() * other.y() - self.y() * other.x()
    }
}

impl ProjVec3 {
    /// Returns the x component of `self`.
    #[inline]
    pub fn x(&self) -> f32 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub fn y(&self) -> f32 {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub fn z(&self) -> f32 {
        self.0[2]
    }
    /// Returns the w component of `self`.
    #[inline]
    pub fn w(&self) -> f32 {
        self.0[3]
    }
}

impl<Repr, Space> From<Repr> for Vector<Repr, Space> {
    #[inline]
    fn from(repr: Repr) -> Self {
        Self(repr, Pd)
    }
}

impl<Sc, Sp, const N: usize> Index<usize> for Vector<[Sc; N], Sp> {
    type Output = Sc;
    #[inline]
    fn index(&self, i: usize) -> &Sc {
        &self.0[i]
    }
}

impl<R: Debug, Sp: Debug + Default> Debug for Vector<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Vec<{:?}>", Sp::default())?;
        Debug::fmt(&self.0, f)
    }
}
