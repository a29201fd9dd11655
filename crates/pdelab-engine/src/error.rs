//! Configuration errors.

use pdelab_core::{BoundaryError, GridError, SolverError};
use pdelab_expr::ExprError;
use std::error::Error;
use std::fmt;

/// Errors detected while validating or instantiating a run configuration.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The grid, boundary, stability condition, or a solver parameter was
    /// rejected.
    Solver(SolverError),
    /// A formula failed to parse or referenced an unbound variable.
    Expression {
        /// Which input the formula was for.
        what: &'static str,
        /// The underlying failure.
        source: ExprError,
    },
    /// Some other configuration invariant was violated.
    Invalid {
        /// Description of which invariant was violated.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solver(e) => write!(f, "solver: {e}"),
            Self::Expression { what, source } => write!(f, "{what}: {source}"),
            Self::Invalid { reason } => write!(f, "invalid config: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Solver(e) => Some(e),
            Self::Expression { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<SolverError> for ConfigError {
    fn from(e: SolverError) -> Self {
        Self::Solver(e)
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Solver(SolverError::Grid(e))
    }
}

impl From<BoundaryError> for ConfigError {
    fn from(e: BoundaryError) -> Self {
        Self::Solver(SolverError::Boundary(e))
    }
}
