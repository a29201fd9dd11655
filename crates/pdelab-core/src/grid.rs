//! Uniform rectangular mesh descriptor.

use crate::error::{GridError, SolverError};
use crate::field::Field;

/// How the grid spacing is derived from the domain length.
///
/// Grid coordinates are always `x_i = i * lx / (nx - 1)`; only the
/// spacing used by the finite-difference stencils changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Spacing {
    /// `dx = lx / (nx - 1)`: points sit on both ends of the domain.
    #[default]
    Nodal,
    /// `dx = lx / nx`: one spacing per point.
    Cell,
}

/// A uniform `nx × ny` grid over `[0, lx] × [0, ly]`.
///
/// Immutable once constructed; `dx` and `dy` are derived from the point
/// counts and lengths and cannot be set independently.
///
/// # Examples
///
/// ```
/// use pdelab_core::{Grid, Spacing};
///
/// let grid = Grid::new(5, 3, 1.0, 2.0).unwrap();
/// assert_eq!(grid.shape(), (5, 3));
/// assert_eq!(grid.dx(), 0.25);
/// assert_eq!(grid.dy(), 1.0);
///
/// let cell = Grid::with_spacing(100, 100, 1.0, 1.0, Spacing::Cell).unwrap();
/// assert_eq!(cell.dx(), 0.01);
///
/// assert!(Grid::new(1, 3, 1.0, 1.0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    nx: usize,
    ny: usize,
    lx: f64,
    ly: f64,
    dx: f64,
    dy: f64,
    spacing: Spacing,
}

impl Grid {
    /// Create a grid with [`Spacing::Nodal`].
    ///
    /// Returns `Err` if `nx < 2`, `ny < 2`, or either length is not a
    /// finite positive number.
    pub fn new(nx: usize, ny: usize, lx: f64, ly: f64) -> Result<Self, GridError> {
        Self::with_spacing(nx, ny, lx, ly, Spacing::Nodal)
    }

    /// Create a grid with an explicit spacing convention.
    pub fn with_spacing(
        nx: usize,
        ny: usize,
        lx: f64,
        ly: f64,
        spacing: Spacing,
    ) -> Result<Self, GridError> {
        if nx < 2 {
            return Err(GridError::TooFewPoints {
                axis: "x",
                points: nx,
            });
        }
        if ny < 2 {
            return Err(GridError::TooFewPoints {
                axis: "y",
                points: ny,
            });
        }
        if !(lx > 0.0) || !lx.is_finite() {
            return Err(GridError::NonPositiveLength {
                axis: "x",
                length: lx,
            });
        }
        if !(ly > 0.0) || !ly.is_finite() {
            return Err(GridError::NonPositiveLength {
                axis: "y",
                length: ly,
            });
        }
        let (divx, divy) = match spacing {
            Spacing::Nodal => (nx - 1, ny - 1),
            Spacing::Cell => (nx, ny),
        };
        Ok(Self {
            nx,
            ny,
            lx,
            ly,
            dx: lx / divx as f64,
            dy: ly / divy as f64,
            spacing,
        })
    }

    /// Number of points along `x`.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of points along `y`.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Domain length along `x`.
    pub fn lx(&self) -> f64 {
        self.lx
    }

    /// Domain length along `y`.
    pub fn ly(&self) -> f64 {
        self.ly
    }

    /// Stencil spacing along `x`.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Stencil spacing along `y`.
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// The spacing convention this grid was built with.
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Field shape `(nx, ny)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// Always `false`: construction rejects grids with fewer than 2×2 points.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Physical `x` coordinate of column `i`.
    pub fn x(&self, i: usize) -> f64 {
        self.lx * i as f64 / (self.nx - 1) as f64
    }

    /// Physical `y` coordinate of row `j`.
    pub fn y(&self, j: usize) -> f64 {
        self.ly * j as f64 / (self.ny - 1) as f64
    }

    /// `true` if `(i, j)` is strictly inside the grid (not on a border).
    pub fn is_interior(&self, i: usize, j: usize) -> bool {
        i > 0 && j > 0 && i + 1 < self.nx && j + 1 < self.ny
    }

    /// A zero-filled field matching this grid.
    pub fn zeros(&self) -> Field {
        Field::zeros(self.shape())
    }

    /// Coordinate arrays `(X, Y)` with `ij` indexing: `X[[i, j]] = x(i)`.
    pub fn meshgrid(&self) -> (Field, Field) {
        let xs = Field::from_shape_fn(self.shape(), |(i, _)| self.x(i));
        let ys = Field::from_shape_fn(self.shape(), |(_, j)| self.y(j));
        (xs, ys)
    }

    /// Check that `field` has this grid's shape.
    pub fn check_shape(&self, field: &Field) -> Result<(), SolverError> {
        let got = field.dim();
        if got != self.shape() {
            return Err(SolverError::ShapeMismatch {
                expected: self.shape(),
                got,
            });
        }
        Ok(())
    }
}
