//! The small amount of mathematics that binning needs.
//!
//! Includes [vectors][self::vec], [points][self::point] and
//! [colors][self::color], all more strongly typed than the usual array-of-
//! float conventions: values are tagged with the space they are embedded
//! in, and values in different spaces cannot be mixed without explicit
//! conversion. Many mixups that would otherwise only manifest as glitched
//! output are diagnosed at compile time instead.

pub use {
    color::{Color, Color4f, rgba},
    point::{Point, Point2, pt2},
    vec::{ProjVec3, Real, Vec2, Vector, vec2},
};

pub mod color;
pub mod float;
pub mod point;
pub mod vec;
