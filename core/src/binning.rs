//! Partitioning screen-space triangles into viewport tiles.
//!
//! A tile-based rasterizer does not walk every triangle for every pixel.
//! Instead the viewport is divided into a grid of fixed-size square
//! *cells*, and each frame's triangles are first *binned*: every cell
//! gets the list of indices of the triangles that may cover it, so the
//! per-tile raster stage only ever touches relevant geometry.
//!
//! The [`Binner`] owns the frame's triangle list, the cell grid, and the
//! per-cell index lists. A frame proceeds as
//!
//! ```text
//! partition(w, h)      once per viewport (re)size
//!    ┌───────────────┐
//!    │ clear()       │  once per frame
//!    │ submit()…     │  fill in the frame's triangles
//!    │ assign()      │  bin triangle indices into cells
//!    │ cell(i)…      │  read back, one tile at a time
//!    └───────────────┘
//! ```
//!
//! Assignment is a blocking, single-threaded pass. Each triangle's
//! classification is independent of every other triangle's, so the loop
//! could be parallelized over triangles, provided appends to a shared
//! cell's index list were serialized; nothing in the data model forbids
//! that, but this implementation does not do it.

use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

use crate::geom::ScreenTri;
use crate::math::float::f32 as fp;
use crate::math::point::{Point2, pt2};
use crate::util::rect::{Rect, bounds_of};
use crate::util::seq::BoundedVec;

pub use stats::{Stats, Throughput};
pub use vis::{Status, intersects, visibility};

pub mod stats;
pub mod vis;

/// Screen space coordinate basis, in pixel units.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Screen;

/// A point in screen space.
pub type ScreenPt = Point2<Screen>;

/// The result of a fallible binning operation.
pub type Result<T> = core::result::Result<T, Error>;

/// An error in the use or capacity of a [`Binner`].
///
/// All of these are deterministic: retrying the failed operation without
/// changing anything else will fail the same way.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The frame's triangle list is at capacity.
    TriangleCapacity,
    /// `submit` or `assign` was called before any `partition`.
    NoGrid,
    /// `submit` was called after `assign` without an intervening `clear`.
    FrameAssigned,
    /// `partition` was called with a zero-area viewport.
    EmptyViewport,
}

/// Binning parameters.
///
/// The capacities are fixed for the lifetime of a [`Binner`]; the grid
/// granularity takes effect at the next [`partition`][Binner::partition]
/// call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Maximum number of triangles submitted per frame.
    pub max_triangles: usize,
    /// Maximum number of triangle indices recorded per cell.
    pub max_fill: usize,
    /// Cell side length in pixels.
    pub group_size: u32,
    /// Bounding-box area, in px², below which a triangle is assumed to
    /// cover every cell its box touches, skipping the per-cell overlap
    /// test.
    ///
    /// Such a box spans at most four cells, so the cost of the occasional
    /// false positive is small next to the tests saved. Set to `0.0` to
    /// always test precisely, or to `f32::INFINITY` to never test.
    pub small_tri_area: f32,
}

impl Default for Config {
    /// Returns the default binning parameters:
    ///
    /// * `max_triangles`: 1024
    /// * `max_fill`: 512
    /// * `group_size`: 32 px
    /// * `small_tri_area`: one cell's area (32 × 32 px²)
    fn default() -> Self {
        Self {
            max_triangles: 1024,
            max_fill: 512,
            group_size: 32,
            small_tri_area: 32.0 * 32.0,
        }
    }
}

/// Maps each frame's triangles to the grid cells they may cover.
///
/// See the [module documentation][self] for an overview and an example.
pub struct Binner {
    cfg: Config,
    tris: BoundedVec<ScreenTri>,
    cells: Vec<BoundedVec<u32>>,
    cells_x: u32,
    cells_y: u32,
    assigned: bool,
}

impl Binner {
    /// Creates a binner with the given parameters.
    ///
    /// No grid exists yet: [`partition`][Self::partition] must be called
    /// before the first frame.
    ///
    /// # Panics
    /// If any of `group_size`, `max_triangles` or `max_fill` is zero.
    pub fn new(cfg: Config) -> Self {
        assert!(cfg.group_size > 0, "group size must be nonzero");
        assert!(
            cfg.max_triangles > 0 && cfg.max_fill > 0,
            "capacities must be nonzero"
        );
        Self {
            tris: BoundedVec::new(cfg.max_triangles),
            cells: Vec::new(),
            cells_x: 0,
            cells_y: 0,
            assigned: false,
            cfg,
        }
    }

    /// Sizes the cell grid for a viewport of `w` × `h` pixels.
    ///
    /// Allocates storage for `ceil(w / group_size) * ceil(h / group_size)`
    /// cells and leaves the binner in the cleared state. Not a per-frame
    /// operation: call this once up front and again whenever the viewport
    /// is resized.
    pub fn partition(&mut self, w: u32, h: u32) -> Result<()> {
        if w == 0 || h == 0 {
            return Err(Error::EmptyViewport);
        }
        let gs = self.cfg.group_size;
        self.cells_x = w.div_ceil(gs);
        self.cells_y = h.div_ceil(gs);

        let n = self.cells_x as usize * self.cells_y as usize;
        let max_fill = self.cfg.max_fill;
        self.cells.clear();
        self.cells.resize_with(n, || BoundedVec::new(max_fill));

        self.tris.clear();
        self.assigned = false;
        Ok(())
    }

    /// Reserves a slot for one triangle and returns a reference for the
    /// caller to fill in.
    ///
    /// The slot starts out zeroed. Its index in [`tris`][Self::tris] is
    /// the index that [`assign`][Self::assign] records into cells, and
    /// stays stable until the next [`clear`][Self::clear].
    ///
    /// # Errors
    /// * [`Error::NoGrid`] if `partition` has not been called.
    /// * [`Error::FrameAssigned`] if the current frame has already been
    ///   assigned; `clear` first.
    /// * [`Error::TriangleCapacity`] if `max_triangles` triangles have
    ///   already been submitted this frame.
    pub fn submit(&mut self) -> Result<&mut ScreenTri> {
        if self.cells.is_empty() {
            return Err(Error::NoGrid);
        }
        if self.assigned {
            return Err(Error::FrameAssigned);
        }
        self.tris.alloc().map_err(|_| Error::TriangleCapacity)
    }

    /// Bins every submitted triangle into the cells it may cover.
    ///
    /// For each triangle, the candidate cells are those intersecting its
    /// bounding box. A triangle with a box smaller than
    /// [`small_tri_area`][Config::small_tri_area] is recorded into every
    /// candidate cell outright; larger triangles are tested per cell with
    /// [`intersects`], which culls backfacing and degenerate triangles as
    /// a side effect. Within a cell, indices end up in submission order.
    ///
    /// A cell already holding `max_fill` indices drops further pairs and
    /// counts them in [`Stats::dropped`]; a nonzero count means the frame
    /// is incomplete and the capacity should be raised.
    ///
    /// Calling `assign` again without an intervening `clear` redoes the
    /// pass from scratch over the same triangles, yielding the same
    /// result.
    ///
    /// # Errors
    /// [`Error::NoGrid`] if `partition` has not been called.
    pub fn assign(&mut self) -> Result<Stats> {
        if self.cells.is_empty() {
            return Err(Error::NoGrid);
        }
        // Start every pass from zero fills so that reassignment cannot
        // record duplicates
        for cell in &mut self.cells {
            cell.clear();
        }

        let mut stats = Stats::start();
        stats.frames = 1;

        let gs = self.cfg.group_size as f32;
        let (max_x, max_y) =
            (self.cells_x as i32 - 1, self.cells_y as i32 - 1);

        for (i, t) in self.tris.iter().enumerate() {
            stats.tris.i += 1;

            let pts = screen_pts(t);
            let r = bounds_of(pts.iter().map(|p| [p.x(), p.y()]));

            // Cell-space bounding box, clamped into the grid. An empty
            // range here means the triangle lies wholly outside the
            // viewport.
            let v = bounds_of(pts.iter().map(|p| {
                [fp::floor(p.x() / gs) as i32, fp::floor(p.y() / gs) as i32]
            }));
            let (x0, y0) = (v.left.max(0), v.top.max(0));
            let (x1, y1) = (v.right.min(max_x), v.bottom.min(max_y));

            // Don't be aggressive with very small triangles
            let small = fp::abs(r.right - r.left) * fp::abs(r.bottom - r.top)
                < self.cfg.small_tri_area;

            let mut hit = false;
            for y in y0..=y1 {
                for x in x0..=x1 {
                    stats.pairs.i += 1;
                    let bx = self.cell_rect(x, y);
                    if small || intersects(pts, &bx) {
                        let cell = (x + y * self.cells_x as i32) as usize;
                        match self.cells[cell].push(i as u32) {
                            Ok(_) => {
                                stats.pairs.o += 1;
                                hit = true;
                            }
                            Err(_) => stats.dropped += 1,
                        }
                    }
                }
            }
            if hit {
                stats.tris.o += 1;
            }
        }

        self.assigned = true;
        Ok(stats.finish())
    }

    /// Empties the triangle list and resets every cell's fill to zero.
    ///
    /// Storage is retained; no allocation happens on the per-frame path.
    /// Call once per frame, before submitting the frame's triangles.
    pub fn clear(&mut self) {
        self.tris.clear();
        for cell in &mut self.cells {
            cell.clear();
        }
        self.assigned = false;
    }

    /// Returns the triangle indices recorded for the cell with index `i`.
    ///
    /// The slice's length is the cell's fill count. Cells are numbered
    /// row-major: `i = x + y * cells_x()`.
    ///
    /// # Panics
    /// If `i >= cell_count()`.
    #[inline]
    pub fn cell(&self, i: usize) -> &[u32] {
        &self.cells[i]
    }

    /// Returns the triangle indices recorded for the cell at (`x`, `y`).
    ///
    /// # Panics
    /// If the coordinates are outside the grid.
    #[inline]
    pub fn cell_at(&self, x: u32, y: u32) -> &[u32] {
        assert!(x < self.cells_x && y < self.cells_y);
        self.cell((x + y * self.cells_x) as usize)
    }

    /// Returns the triangles submitted for the current frame.
    #[inline]
    pub fn tris(&self) -> &[ScreenTri] {
        &self.tris
    }

    /// Returns the number of cell columns in the grid.
    #[inline]
    pub fn cells_x(&self) -> u32 {
        self.cells_x
    }
    /// Returns the number of cell rows in the grid.
    #[inline]
    pub fn cells_y(&self) -> u32 {
        self.cells_y
    }
    /// Returns the total number of cells in the grid.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the current frame has been assigned.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }

    /// Returns the binning parameters.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns the pixel-space box of the cell at (`x`, `y`).
    fn cell_rect(&self, x: i32, y: i32) -> Rect<f32> {
        let gs = self.cfg.group_size as f32;
        Rect::new(
            x as f32 * gs,
            y as f32 * gs,
            (x + 1) as f32 * gs,
            (y + 1) as f32 * gs,
        )
    }
}

/// Projects a triangle's vertex positions onto the screen plane.
fn screen_pts(t: &ScreenTri) -> [ScreenPt; 3] {
    t.0.map(|v| pt2(v.pos.x(), v.pos.y()))
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::TriangleCapacity => "triangle list is at capacity",
            Self::NoGrid => "no grid; call partition first",
            Self::FrameAssigned => "frame already assigned; clear it first",
            Self::EmptyViewport => "viewport must have nonzero area",
        };
        write!(f, "{msg}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use crate::geom::{Attrib, tri, vertex};

    use super::*;

    fn vert(x: f32, y: f32) -> crate::geom::ScreenVert {
        vertex([x, y, 0.0, 1.0].into(), Attrib::default())
    }

    fn submit(b: &mut Binner, vs: [(f32, f32); 3]) {
        let [a, v, c] = vs.map(|(x, y)| vert(x, y));
        *b.submit().unwrap() = tri(a, v, c);
    }

    fn binner(w: u32, h: u32, cfg: Config) -> Binner {
        let mut b = Binner::new(cfg);
        b.partition(w, h).unwrap();
        b
    }

    #[test]
    fn partition_rounds_up() {
        let b = binner(320, 240, Config::default());
        assert_eq!(b.cells_x(), 10);
        assert_eq!(b.cells_y(), 8);
        assert_eq!(b.cell_count(), 80);
    }

    #[test]
    fn partition_of_tiny_viewport() {
        let b = binner(1, 1, Config::default());
        assert_eq!(b.cell_count(), 1);
    }

    #[test]
    fn partition_rejects_empty_viewport() {
        let mut b = Binner::new(Config::default());
        assert_eq!(b.partition(0, 240), Err(Error::EmptyViewport));
        assert_eq!(b.partition(320, 0), Err(Error::EmptyViewport));
    }

    #[test]
    fn submit_without_grid_fails() {
        let mut b = Binner::new(Config::default());
        assert_eq!(b.submit().map(drop), Err(Error::NoGrid));
    }

    #[test]
    fn assign_without_grid_fails() {
        let mut b = Binner::new(Config::default());
        assert_eq!(b.assign().map(drop), Err(Error::NoGrid));
    }

    #[test]
    fn submit_past_capacity_fails() {
        let cfg = Config { max_triangles: 4, ..Config::default() };
        let mut b = binner(64, 64, cfg);
        for _ in 0..4 {
            b.submit().unwrap();
        }
        assert_eq!(b.submit().map(drop), Err(Error::TriangleCapacity));
        assert_eq!(b.tris().len(), 4);
    }

    #[test]
    fn submit_after_assign_fails_until_cleared() {
        let mut b = binner(64, 64, Config::default());
        submit(&mut b, [(4.0, 4.0), (12.0, 4.0), (4.0, 12.0)]);
        b.assign().unwrap();
        assert!(b.is_assigned());
        assert_eq!(b.submit().map(drop), Err(Error::FrameAssigned));

        b.clear();
        assert!(!b.is_assigned());
        assert!(b.submit().is_ok());
    }

    #[test]
    fn small_triangle_lands_in_one_cell_only() {
        let mut b = binner(320, 240, Config::default());
        // Entirely within cell (2, 1)
        submit(&mut b, [(68.0, 40.0), (88.0, 40.0), (68.0, 60.0)]);
        b.assign().unwrap();

        assert_eq!(b.cell_at(2, 1), &[0]);
        for i in 0..b.cell_count() {
            if i != (2 + b.cells_x() as usize) {
                assert_eq!(b.cell(i), &[]);
            }
        }
    }

    #[test]
    fn spanning_triangle_skips_untouched_corner() {
        let mut b = binner(64, 64, Config::default());
        assert_eq!((b.cells_x(), b.cells_y()), (2, 2));

        submit(&mut b, [(0.0, 0.0), (64.0, 0.0), (0.0, 64.0)]);
        let stats = b.assign().unwrap();

        assert_eq!(b.cell_at(0, 0), &[0]);
        assert_eq!(b.cell_at(1, 0), &[0]);
        assert_eq!(b.cell_at(0, 1), &[0]);
        // The bounding box covers cell (1, 1) but the triangle does not
        assert_eq!(b.cell_at(1, 1), &[]);

        assert_eq!(stats.tris, Throughput { i: 1, o: 1 });
        assert_eq!(stats.pairs, Throughput { i: 4, o: 3 });
        assert_eq!(stats.dropped, 0);
    }

    #[test]
    fn backfacing_spanning_triangle_is_culled() {
        let mut b = binner(64, 64, Config::default());
        submit(&mut b, [(0.0, 0.0), (0.0, 64.0), (64.0, 0.0)]);
        let stats = b.assign().unwrap();

        for i in 0..b.cell_count() {
            assert_eq!(b.cell(i), &[]);
        }
        assert_eq!(stats.tris, Throughput { i: 1, o: 0 });
    }

    #[test]
    fn offscreen_triangle_is_ignored() {
        let mut b = binner(64, 64, Config::default());
        submit(&mut b, [(-90.0, 10.0), (-70.0, 10.0), (-90.0, 30.0)]);
        submit(&mut b, [(100.0, 10.0), (120.0, 10.0), (100.0, 30.0)]);
        let stats = b.assign().unwrap();

        for i in 0..b.cell_count() {
            assert_eq!(b.cell(i), &[]);
        }
        assert_eq!(stats.pairs.i, 0);
    }

    #[test]
    fn indices_are_in_submission_order() {
        let mut b = binner(64, 64, Config::default());
        for _ in 0..3 {
            submit(&mut b, [(4.0, 4.0), (12.0, 4.0), (4.0, 12.0)]);
        }
        b.assign().unwrap();
        assert_eq!(b.cell_at(0, 0), &[0, 1, 2]);
    }

    #[test]
    fn full_cell_drops_and_reports() {
        let cfg = Config { max_fill: 2, ..Config::default() };
        let mut b = binner(32, 32, cfg);
        for _ in 0..3 {
            submit(&mut b, [(4.0, 4.0), (12.0, 4.0), (4.0, 12.0)]);
        }
        let stats = b.assign().unwrap();

        assert_eq!(b.cell_at(0, 0), &[0, 1]);
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.pairs, Throughput { i: 3, o: 2 });
    }

    #[test]
    fn clear_resets_fills_and_triangles() {
        let mut b = binner(64, 64, Config::default());
        submit(&mut b, [(0.0, 0.0), (64.0, 0.0), (0.0, 64.0)]);
        b.assign().unwrap();
        b.clear();

        assert_eq!(b.tris().len(), 0);
        for i in 0..b.cell_count() {
            assert_eq!(b.cell(i), &[]);
        }
    }

    #[test]
    fn reassignment_does_not_duplicate() {
        let mut b = binner(64, 64, Config::default());
        submit(&mut b, [(0.0, 0.0), (64.0, 0.0), (0.0, 64.0)]);
        b.assign().unwrap();
        b.assign().unwrap();
        assert_eq!(b.cell_at(0, 0), &[0]);
    }

    #[test]
    fn repartition_resizes_the_grid() {
        let mut b = binner(320, 240, Config::default());
        submit(&mut b, [(4.0, 4.0), (12.0, 4.0), (4.0, 12.0)]);
        b.partition(64, 64).unwrap();
        assert_eq!(b.cell_count(), 4);
        assert_eq!(b.tris().len(), 0);
    }

    #[test]
    fn small_grids_via_config() {
        let cfg = Config { group_size: 4, ..Config::default() };
        let b = binner(16, 8, cfg);
        assert_eq!((b.cells_x(), b.cells_y()), (4, 2));
    }

    #[test]
    #[should_panic]
    fn zero_group_size_panics() {
        Binner::new(Config { group_size: 0, ..Config::default() });
    }
}
