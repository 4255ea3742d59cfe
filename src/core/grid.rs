//! Dense row-major scalar field on a torus.
//!
//! Every coordinate goes through `rem_euclid`, so `x` and `x + k * width`
//! address the same cell for any integer `k`. Stencils of any support can
//! therefore read neighbours without special-casing the borders.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<f32>,
}

impl Grid {
    /// Zero-filled grid. Both dimensions must be non-zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![0.0; width * height],
        }
    }

    /// Zero-filled grid with the same dimensions as `other`.
    pub fn like(other: &Grid) -> Self {
        Self::new(other.width, other.height)
    }

    /// Builds a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut grid = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                grid.cells[y * width + x] = f(x, y);
            }
        }
        grid
    }

    /// Builds a grid of the same shape as `like`, filling rows in parallel
    /// when the `parallel` feature is on. `f` receives the row index and
    /// the row slice to fill; rows must not depend on each other.
    pub fn from_rows(like: &Grid, f: impl Fn(usize, &mut [f32]) + Sync + Send) -> Self {
        let mut out = Self::like(like);
        let width = out.width;

        #[cfg(feature = "parallel")]
        out.cells
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));

        #[cfg(not(feature = "parallel"))]
        out.cells
            .chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));

        out
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    /// Row-major cell values.
    pub fn values(&self) -> &[f32] {
        &self.cells
    }

    /// Storage index of the (wrapped) coordinate.
    #[inline]
    pub fn index(&self, x: i64, y: i64) -> usize {
        let xi = x.rem_euclid(self.width as i64) as usize;
        let yi = y.rem_euclid(self.height as i64) as usize;
        yi * self.width + xi
    }

    #[inline]
    pub fn get(&self, x: i64, y: i64) -> f32 {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: i64, y: i64, v: f32) {
        let idx = self.index(x, y);
        self.cells[idx] = v;
    }

    /// Returns `c * self` without touching `self`.
    pub fn scale(&self, c: f32) -> Grid {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|v| c * v).collect(),
        }
    }

    /// Returns `self + other`. Both grids must have identical dimensions.
    pub fn add(&self, other: &Grid) -> Grid {
        debug_assert_eq!(
            self.dimensions(),
            other.dimensions(),
            "grid dimension mismatch"
        );
        Grid {
            width: self.width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .zip(other.cells.iter())
                .map(|(a, b)| a + b)
                .collect(),
        }
    }

    pub fn max_abs(&self) -> f32 {
        self.cells.iter().fold(0.0, |m, v| m.max(v.abs()))
    }
}
