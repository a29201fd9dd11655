//! Per-edge Dirichlet boundary conditions.

use crate::error::BoundaryError;
use crate::field::Field;
use crate::grid::Grid;
use std::fmt;

/// One of the four edges of a rectangular grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// `u[[0, j]]`, runs along `y`.
    Left,
    /// `u[[nx - 1, j]]`, runs along `y`.
    Right,
    /// `u[[i, ny - 1]]`, runs along `x`.
    Top,
    /// `u[[i, 0]]`, runs along `x`.
    Bottom,
}

impl Edge {
    /// All edges in application order. Later edges overwrite earlier ones
    /// at shared corners.
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Number of grid points on this edge.
    pub fn len(self, grid: &Grid) -> usize {
        match self {
            Edge::Left | Edge::Right => grid.ny(),
            Edge::Top | Edge::Bottom => grid.nx(),
        }
    }

    /// Field index of the `k`-th point along this edge.
    pub fn index(self, grid: &Grid, k: usize) -> [usize; 2] {
        match self {
            Edge::Left => [0, k],
            Edge::Right => [grid.nx() - 1, k],
            Edge::Top => [k, grid.ny() - 1],
            Edge::Bottom => [k, 0],
        }
    }

    /// Physical coordinates `(x, y)` of the `k`-th point along this edge.
    pub fn coords(self, grid: &Grid, k: usize) -> (f64, f64) {
        let [i, j] = self.index(grid, k);
        (grid.x(i), grid.y(j))
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Values imposed on one edge: a scalar or one value per edge point.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeValues {
    /// The same value at every point of the edge.
    Constant(f64),
    /// One value per point, ordered by increasing `i` or `j`.
    Values(Vec<f64>),
}

impl EdgeValues {
    fn check_length(&self, edge: Edge, grid: &Grid) -> Result<(), BoundaryError> {
        if let EdgeValues::Values(vs) = self {
            let expected = edge.len(grid);
            if vs.len() != expected {
                return Err(BoundaryError::EdgeLength {
                    edge,
                    expected,
                    got: vs.len(),
                });
            }
        }
        Ok(())
    }

    fn is_finite(&self) -> bool {
        match self {
            EdgeValues::Constant(v) => v.is_finite(),
            EdgeValues::Values(vs) => vs.iter().all(|v| v.is_finite()),
        }
    }

    fn at(&self, k: usize) -> f64 {
        match self {
            EdgeValues::Constant(v) => *v,
            EdgeValues::Values(vs) => vs[k],
        }
    }
}

impl From<f64> for EdgeValues {
    fn from(v: f64) -> Self {
        EdgeValues::Constant(v)
    }
}

impl From<Vec<f64>> for EdgeValues {
    fn from(vs: Vec<f64>) -> Self {
        EdgeValues::Values(vs)
    }
}

/// Dirichlet values for all four edges of a grid.
///
/// Boundaries are authoritative: [`apply`](Boundary::apply) overwrites the
/// corresponding borders of a field, and the relaxation solver reimposes
/// them after every sweep.
///
/// ```
/// use pdelab_core::{Boundary, Grid};
///
/// let grid = Grid::new(4, 3, 1.0, 1.0).unwrap();
/// let bc = Boundary::uniform(0.0).left(vec![1.0, 2.0, 3.0]);
/// bc.validate(&grid).unwrap();
///
/// let mut u = grid.zeros();
/// bc.apply(&grid, &mut u);
/// assert_eq!(u[[0, 1]], 2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    left: EdgeValues,
    right: EdgeValues,
    top: EdgeValues,
    bottom: EdgeValues,
}

impl Boundary {
    /// Every edge held at `value`.
    pub fn uniform(value: f64) -> Self {
        Self {
            left: EdgeValues::Constant(value),
            right: EdgeValues::Constant(value),
            top: EdgeValues::Constant(value),
            bottom: EdgeValues::Constant(value),
        }
    }

    /// The relaxation solver's default: left edge at 1, all others at 0.
    pub fn dirichlet_default() -> Self {
        Self::uniform(0.0).left(1.0)
    }

    /// Replace the left-edge values.
    pub fn left(mut self, values: impl Into<EdgeValues>) -> Self {
        self.left = values.into();
        self
    }

    /// Replace the right-edge values.
    pub fn right(mut self, values: impl Into<EdgeValues>) -> Self {
        self.right = values.into();
        self
    }

    /// Replace the top-edge values.
    pub fn top(mut self, values: impl Into<EdgeValues>) -> Self {
        self.top = values.into();
        self
    }

    /// Replace the bottom-edge values.
    pub fn bottom(mut self, values: impl Into<EdgeValues>) -> Self {
        self.bottom = values.into();
        self
    }

    /// Set an edge by name.
    pub fn with_edge(self, edge: Edge, values: impl Into<EdgeValues>) -> Self {
        match edge {
            Edge::Left => self.left(values),
            Edge::Right => self.right(values),
            Edge::Top => self.top(values),
            Edge::Bottom => self.bottom(values),
        }
    }

    /// The values on `edge`.
    pub fn edge(&self, edge: Edge) -> &EdgeValues {
        match edge {
            Edge::Left => &self.left,
            Edge::Right => &self.right,
            Edge::Top => &self.top,
            Edge::Bottom => &self.bottom,
        }
    }

    /// Check every edge against the grid: array lengths must match the
    /// edge and all values must be finite.
    pub fn validate(&self, grid: &Grid) -> Result<(), BoundaryError> {
        for edge in Edge::ALL {
            let values = self.edge(edge);
            values.check_length(edge, grid)?;
            if !values.is_finite() {
                return Err(BoundaryError::NonFinite { edge });
            }
        }
        Ok(())
    }

    /// Structural check only: array lengths must match their edges.
    /// Values may be NaN or infinite.
    pub fn check_lengths(&self, grid: &Grid) -> Result<(), BoundaryError> {
        for edge in Edge::ALL {
            self.edge(edge).check_length(edge, grid)?;
        }
        Ok(())
    }

    /// Overwrite the borders of `field` in [`Edge::ALL`] order.
    ///
    /// # Panics
    ///
    /// Panics if the boundary has not passed [`validate`](Boundary::validate)
    /// for `grid` or `field` does not have the grid's shape.
    pub fn apply(&self, grid: &Grid, field: &mut Field) {
        for edge in Edge::ALL {
            let values = self.edge(edge);
            for k in 0..edge.len(grid) {
                field[edge.index(grid, k)] = values.at(k);
            }
        }
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::dirichlet_default()
    }
}
