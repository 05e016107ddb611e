//! Core functionality of the `tilebin` project.
//!
//! `tilebin` is a tile-based software triangle rasterizer. This crate
//! implements its binning stage: the viewport is partitioned into a grid
//! of fixed-size square cells, and each frame's screen-space triangles
//! are sorted into per-cell index lists, so that the per-tile raster
//! stage only ever processes triangles that may actually cover its tile.
//! See the [`binning`] module for the full picture.
//!
//! Everything runs in fixed memory: triangle and per-cell storage is
//! allocated once per viewport size and recycled every frame.
//!
//! # Crate features
//!
//! * `std`:
//!   Enables timing of assignment passes and the `std::error::Error`
//!   impls. If this feature is disabled, the crate only depends on
//!   `core` and `alloc`.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via
//!   the [libm](https://crates.io/crates/libm) crate.
//!
//! * `mm`:
//!   Provides fast approximate implementations of floating-point
//!   functions via the [micromath](https://crates.io/crates/micromath)
//!   crate.
//!
//! All features are disabled by default.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod binning;
pub mod geom;
pub mod math;
pub mod util;

pub mod prelude {
    pub use crate::binning::{Binner, Config, Screen, ScreenPt, Stats, Status};

    pub use crate::geom::{
        Attrib, ScreenTri, ScreenVert, Tri, Vertex, Winding, tri, uv, vertex,
    };

    pub use crate::math::{
        color::{Color4f, rgba},
        point::{Point2, pt2},
        vec::{ProjVec3, Vec2, vec2},
    };

    pub use crate::util::{rect::Rect, seq::BoundedVec};
}
