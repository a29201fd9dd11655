//! Jacobi relaxation for the Laplace equation with a multi-criterion stop.
//!
//! Each sweep replaces every interior value with the mean of its four axis
//! neighbours from the *previous* iterate, then reimposes the boundary.
//! After each sweep, in order:
//!
//! 1. any non-finite value aborts with [`ConvergenceReason::NonFinite`];
//! 2. `max |u_new - u_old| < tol` stops with [`ConvergenceReason::Tolerance`];
//! 3. `max(u_new) - min(u_new) < uniform_tol` stops with
//!    [`ConvergenceReason::UniformField`];
//!
//! and after `max_iter` sweeps without stopping the result is reported as
//! [`ConvergenceReason::MaxIterations`].

use crate::scheme::check_parameter;
use crate::stencil::{interior, neighbour_mean};
use log::{debug, warn};
use pdelab_core::field::{all_finite, max_abs_diff, spread};
use pdelab_core::{Boundary, Field, Grid, SolverError};
use std::fmt;

/// Why the relaxation loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConvergenceReason {
    /// The largest change in one sweep fell below `tol`.
    Tolerance,
    /// The field became numerically flat (`max - min < uniform_tol`).
    UniformField,
    /// A sweep produced NaN or an infinity.
    NonFinite,
    /// `max_iter` sweeps ran without meeting either criterion.
    MaxIterations,
}

impl fmt::Display for ConvergenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Tolerance => "tolerance reached",
            Self::UniformField => "field became uniform",
            Self::NonFinite => "non-finite values",
            Self::MaxIterations => "iteration limit reached",
        };
        f.write_str(s)
    }
}

/// Outcome of a relaxation run.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvergenceReport {
    /// `true` for [`Tolerance`](ConvergenceReason::Tolerance) and
    /// [`UniformField`](ConvergenceReason::UniformField).
    pub converged: bool,
    /// Number of sweeps performed, counting the one that triggered the stop.
    pub iterations: usize,
    /// `max |u_new - u_old|` of the last completed sweep. Infinite if no
    /// sweep completed or the run stopped on non-finite values.
    pub final_error: f64,
    /// Why the loop stopped.
    pub reason: ConvergenceReason,
}

impl fmt::Display for ConvergenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} after {} iterations (error {:.2e})",
            self.reason, self.iterations, self.final_error
        )
    }
}

/// Jacobi relaxation solver with its stopping thresholds.
///
/// ```
/// use pdelab_core::Grid;
/// use pdelab_solvers::{ConvergenceReason, LaplaceSolver};
///
/// let grid = Grid::new(9, 9, 1.0, 1.0).unwrap();
/// let (u, report) = LaplaceSolver::default()
///     .solve(&grid, None, &grid.zeros())
///     .unwrap();
/// assert!(report.converged);
/// assert_eq!(report.reason, ConvergenceReason::Tolerance);
/// assert_eq!(u[[0, 4]], 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LaplaceSolver {
    tol: f64,
    uniform_tol: f64,
    max_iter: usize,
}

impl Default for LaplaceSolver {
    fn default() -> Self {
        Self {
            tol: 1e-5,
            uniform_tol: 1e-4,
            max_iter: 10_000,
        }
    }
}

impl LaplaceSolver {
    /// Set the per-sweep change threshold (default `1e-5`).
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the flat-field threshold (default `1e-4`).
    pub fn uniform_tolerance(mut self, uniform_tol: f64) -> Self {
        self.uniform_tol = uniform_tol;
        self
    }

    /// Set the sweep limit (default `10_000`).
    pub fn max_iterations(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Relax `initial` to steady state under `boundary`.
    ///
    /// With `boundary = None` the default applies: left edge 1, the other
    /// three edges 0. The boundary is imposed on the initial field before
    /// the first sweep and after every sweep.
    ///
    /// Never fails for non-convergence or for non-finite data. On
    /// [`NonFinite`](ConvergenceReason::NonFinite) the returned field is the
    /// last finite iterate. If the starting iterate (`initial` with the
    /// boundary imposed) is already non-finite, no sweep runs and `initial`
    /// is handed back unchanged with `iterations == 0`.
    ///
    /// # Errors
    ///
    /// - [`SolverError::ShapeMismatch`] if `initial` does not match `grid`.
    /// - [`SolverError::Boundary`] if an edge array does not match its edge.
    /// - [`SolverError::InvalidParameter`] if a threshold is negative or NaN.
    pub fn solve(
        &self,
        grid: &Grid,
        boundary: Option<&Boundary>,
        initial: &Field,
    ) -> Result<(Field, ConvergenceReport), SolverError> {
        check_parameter("tol", self.tol, false)?;
        check_parameter("uniform_tol", self.uniform_tol, false)?;
        grid.check_shape(initial)?;
        let default_bc;
        let bc = match boundary {
            Some(bc) => bc,
            None => {
                default_bc = Boundary::dirichlet_default();
                &default_bc
            }
        };
        bc.check_lengths(grid)?;

        let mut u = initial.clone();
        bc.apply(grid, &mut u);
        if !all_finite(&u) {
            warn!("laplace: non-finite values in the starting iterate, aborting");
            return Ok((
                initial.clone(),
                ConvergenceReport {
                    converged: false,
                    iterations: 0,
                    final_error: f64::INFINITY,
                    reason: ConvergenceReason::NonFinite,
                },
            ));
        }
        let mut u_new = u.clone();
        let mut final_error = f64::INFINITY;

        for it in 1..=self.max_iter {
            sweep(&u, &mut u_new);
            bc.apply(grid, &mut u_new);

            if !all_finite(&u_new) {
                warn!("laplace: non-finite values at iteration {it}, aborting");
                return Ok((
                    u,
                    ConvergenceReport {
                        converged: false,
                        iterations: it,
                        final_error: f64::INFINITY,
                        reason: ConvergenceReason::NonFinite,
                    },
                ));
            }

            final_error = max_abs_diff(&u_new, &u);
            let flat = spread(&u_new) < self.uniform_tol;
            std::mem::swap(&mut u, &mut u_new);

            let reason = if final_error < self.tol {
                ConvergenceReason::Tolerance
            } else if flat {
                ConvergenceReason::UniformField
            } else {
                continue;
            };
            debug!("laplace: {reason} at iteration {it} (error {final_error:.2e})");
            return Ok((
                u,
                ConvergenceReport {
                    converged: true,
                    iterations: it,
                    final_error,
                    reason,
                },
            ));
        }

        warn!(
            "laplace: no convergence after {} iterations (error {final_error:.2e})",
            self.max_iter
        );
        Ok((
            u,
            ConvergenceReport {
                converged: false,
                iterations: self.max_iter,
                final_error,
                reason: ConvergenceReason::MaxIterations,
            },
        ))
    }
}

/// One Jacobi sweep of the interior: reads only `prev`, writes only `next`.
fn sweep(prev: &Field, next: &mut Field) {
    let (is, js) = interior(prev);
    for i in is {
        for j in js.clone() {
            next[[i, j]] = neighbour_mean(prev, i, j);
        }
    }
}

/// Relax to steady state with explicit thresholds.
///
/// Equivalent to configuring a [`LaplaceSolver`] and calling
/// [`solve`](LaplaceSolver::solve).
pub fn laplace_solve(
    grid: &Grid,
    boundary: Option<&Boundary>,
    initial_field: &Field,
    tol: f64,
    uniform_tol: f64,
    max_iter: usize,
) -> Result<(Field, ConvergenceReport), SolverError> {
    LaplaceSolver::default()
        .tolerance(tol)
        .uniform_tolerance(uniform_tol)
        .max_iterations(max_iter)
        .solve(grid, boundary, initial_field)
}
