//! Error types for the pdelab engine.
//!
//! Organized by subsystem: grid construction, boundary specification,
//! explicit-scheme stability, and the umbrella [`SolverError`] returned by
//! every numeric entrypoint. All of these are construction-time failures;
//! numerical blow-up during relaxation is reported in a convergence report
//! instead of an error.

use crate::boundary::Edge;
use std::error::Error;
use std::fmt;

/// Errors from [`Grid`](crate::Grid) construction (`InvalidGridError`).
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// An axis has fewer than two points, so no spacing can be derived.
    TooFewPoints {
        /// Axis name (`"x"` or `"y"`).
        axis: &'static str,
        /// The configured point count.
        points: usize,
    },
    /// A domain length is zero, negative, or not finite.
    NonPositiveLength {
        /// Axis name (`"x"` or `"y"`).
        axis: &'static str,
        /// The configured length.
        length: f64,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { axis, points } => {
                write!(f, "grid needs at least 2 points along {axis}, got {points}")
            }
            Self::NonPositiveLength { axis, length } => {
                write!(f, "domain length along {axis} must be finite and > 0, got {length}")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from boundary-condition validation (`InvalidBoundaryError`).
#[derive(Clone, Debug, PartialEq)]
pub enum BoundaryError {
    /// An array-valued edge does not match the number of points on that edge.
    EdgeLength {
        /// The offending edge.
        edge: Edge,
        /// Number of grid points along the edge.
        expected: usize,
        /// Length of the supplied array.
        got: usize,
    },
    /// An edge carries a NaN or infinite value.
    NonFinite {
        /// The offending edge.
        edge: Edge,
    },
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeLength {
                edge,
                expected,
                got,
            } => write!(
                f,
                "{edge} boundary has {got} values but the edge has {expected} points"
            ),
            Self::NonFinite { edge } => write!(f, "{edge} boundary contains non-finite values"),
        }
    }
}

impl Error for BoundaryError {}

/// An explicit scheme's CFL number is at or above its stability limit.
///
/// Reported before any step is taken; no partial results exist.
#[derive(Clone, Debug, PartialEq)]
pub struct StabilityError {
    /// Name of the scheme that rejected the configuration.
    pub scheme: &'static str,
    /// The computed CFL number `r`.
    pub cfl: f64,
    /// The scheme's strict upper bound on `r`.
    pub limit: f64,
}

impl fmt::Display for StabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is unstable: CFL number {:.4} must be < {}",
            self.scheme, self.cfl, self.limit
        )
    }
}

impl Error for StabilityError {}

/// Errors returned by the numeric entrypoints.
#[derive(Clone, Debug, PartialEq)]
pub enum SolverError {
    /// The grid is malformed.
    Grid(GridError),
    /// The boundary does not fit the grid.
    Boundary(BoundaryError),
    /// The explicit scheme violates its CFL condition.
    Unstable(StabilityError),
    /// A field's shape does not match the grid.
    ShapeMismatch {
        /// Expected `(nx, ny)`.
        expected: (usize, usize),
        /// Actual shape of the supplied field.
        got: (usize, usize),
    },
    /// A scalar parameter is out of range.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Input data contains NaN or infinite values.
    NonFiniteInput {
        /// Which input was rejected.
        what: &'static str,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "invalid grid: {e}"),
            Self::Boundary(e) => write!(f, "invalid boundary: {e}"),
            Self::Unstable(e) => write!(f, "{e}"),
            Self::ShapeMismatch { expected, got } => write!(
                f,
                "field shape {}x{} does not match grid {}x{}",
                got.0, got.1, expected.0, expected.1
            ),
            Self::InvalidParameter { name, value } => {
                write!(f, "parameter {name} out of range: {value}")
            }
            Self::NonFiniteInput { what } => write!(f, "{what} contains non-finite values"),
        }
    }
}

impl Error for SolverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Boundary(e) => Some(e),
            Self::Unstable(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SolverError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<BoundaryError> for SolverError {
    fn from(e: BoundaryError) -> Self {
        Self::Boundary(e)
    }
}

impl From<StabilityError> for SolverError {
    fn from(e: StabilityError) -> Self {
        Self::Unstable(e)
    }
}
