//! Points in affine spaces.
//!
//! Points are locations; vectors are displacements between locations.
//! Keeping the two apart catches a class of bugs where an offset is used
//! where an absolute coordinate is expected, or vice versa.

use core::fmt::{Debug, Formatter};
use core::marker::PhantomData as Pd;
use core::ops::{Index, Sub};

use crate::math::vec::{Real, Vector};

/// A point in space `Space`, with representation `Repr`.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct Point<Repr, Space = ()>(pub Repr, Pd<Space>);

/// A 2-point with `f32` components in basis `Basis`.
pub type Point2<Basis = ()> = Point<[f32; 2], Real<2, Basis>>;

/// Returns a real 2-point with the given components.
pub const fn pt2<Sc, B>(x: Sc, y: Sc) -> Point<[Sc; 2], Real<2, B>> {
    Point([x, y], Pd)
}

impl<R, S> Point<R, S> {
    /// Creates a point from its representation.
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, Pd)
    }
}

impl<R, Sc, B> Point<R, Real<2, B>>
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

impl<Sc, B> Sub for Point<[Sc; 2], Real<2, B>>
where
    Sc: Copy + Sub<Output = Sc>,
{
    type Output = Vector<[Sc; 2], Real<2, B>>;

    /// Returns the displacement from `rhs` to `self`.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Vector::new([self.x() - rhs.x(), self.y() - rhs.y()])
    }
}

impl<Sc, Sp, const N: usize> Index<usize> for Point<[Sc; N], Sp> {
    type Output = Sc;
    #[inline]
    fn index(&self, i: usize) -> &Sc {
        &self.0[i]
    }
}

impl<R: Debug, Sp: Debug + Default> Debug for Point<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Point<{:?}>", Sp::default())?;
        Debug::fmt(&self.0, f)
    }
}
