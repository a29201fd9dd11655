//! Explicit leapfrog stepper for the second-order wave equation.
//!
//! ```text
//! u'[i,j] = 2u[i,j] - u_old[i,j] + c^2 dt^2 * ((u[i+1,j] - 2u[i,j] + u[i-1,j]) / dx^2
//!                                            + (u[i,j+1] - 2u[i,j] + u[i,j-1]) / dy^2)
//! ```
//!
//! Interior points only; the output border is held at zero (homogeneous
//! Dirichlet). The previous time level is bootstrapped from the initial
//! velocity with a first-order backward difference: `u_old = u0 - dt * ut0`.

use crate::scheme::{check_parameter, check_stability, ExplicitScheme};
use crate::stencil::{interior, laplacian};
use log::debug;
use ndarray::Zip;
use pdelab_core::field::all_finite;
use pdelab_core::{Field, Grid, SolverError};
use std::iter::FusedIterator;

/// Two-level leapfrog wave stepper.
///
/// # CFL stability
///
/// `r = |c| * dt * sqrt(1/dx^2 + 1/dy^2)` must satisfy `r < 1`. Only `c^2`
/// enters the stencil, so the sign of `c` is irrelevant.
#[derive(Clone, Debug)]
pub struct WaveStepper {
    c: f64,
    dt: f64,
    dx2: f64,
    dy2: f64,
    cfl: f64,
}

impl WaveStepper {
    /// Strict upper bound on the wave CFL number.
    pub const CFL_LIMIT: f64 = 1.0;

    /// The wave CFL number `|c| * dt * sqrt(1/dx^2 + 1/dy^2)`.
    pub fn cfl(grid: &Grid, c: f64, dt: f64) -> f64 {
        c.abs() * dt * (1.0 / (grid.dx() * grid.dx()) + 1.0 / (grid.dy() * grid.dy())).sqrt()
    }

    /// Build a stepper for `grid` with wave speed `c` and timestep `dt`.
    ///
    /// # Errors
    ///
    /// - [`SolverError::InvalidParameter`] if `c` is not finite, or `dt` is
    ///   not a finite positive number.
    /// - [`SolverError::Unstable`] if the CFL number is `>= 1`.
    pub fn new(grid: &Grid, c: f64, dt: f64) -> Result<Self, SolverError> {
        if !c.is_finite() {
            return Err(SolverError::InvalidParameter { name: "c", value: c });
        }
        check_parameter("dt", dt, true)?;
        let cfl = Self::cfl(grid, c, dt);
        check_stability("WaveStepper", cfl, Self::CFL_LIMIT)?;
        debug!("WaveStepper: c={c} dt={dt} cfl={cfl:.4}");
        Ok(Self {
            c,
            dt,
            dx2: grid.dx() * grid.dx(),
            dy2: grid.dy() * grid.dy(),
            cfl,
        })
    }

    /// Wave speed.
    pub fn speed(&self) -> f64 {
        self.c
    }

    /// Compute the next time level from `u` and `u_old` into `out`.
    ///
    /// `out` is zero-filled first, so its border is always zero.
    ///
    /// # Panics
    ///
    /// Panics if the three fields have different shapes.
    pub fn step(&self, u: &Field, u_old: &Field, out: &mut Field) {
        out.fill(0.0);
        let k = self.c * self.c * self.dt * self.dt;
        let (is, js) = interior(u);
        for i in is {
            for j in js.clone() {
                out[[i, j]] =
                    2.0 * u[[i, j]] - u_old[[i, j]] + k * laplacian(u, i, j, self.dx2, self.dy2);
            }
        }
    }

    /// The bootstrapped previous level `u0 - dt * ut0`.
    ///
    /// # Panics
    ///
    /// Panics if the two fields have different shapes.
    pub fn previous_level(&self, u0: &Field, ut0: &Field) -> Field {
        let dt = self.dt;
        Zip::from(u0).and(ut0).map_collect(|&u, &v| u - dt * v)
    }
}

impl ExplicitScheme for WaveStepper {
    fn name(&self) -> &'static str {
        "WaveStepper"
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn cfl_number(&self) -> f64 {
        self.cfl
    }

    fn cfl_limit(&self) -> f64 {
        Self::CFL_LIMIT
    }
}

/// Lazy, finite, non-restartable sequence of wave snapshots.
///
/// Holds the two-level state `(u_old, u)` and a spare buffer; each pull
/// computes `u'`, shifts `(u_old, u) <- (u, u')`, and yields a copy of `u'`.
#[derive(Debug)]
pub struct WaveSteps {
    stepper: WaveStepper,
    u: Field,
    u_old: Field,
    spare: Field,
    remaining: usize,
}

impl WaveSteps {
    /// Start a sequence of `frames` snapshots from displacement `u0` and
    /// velocity `ut0`.
    ///
    /// # Errors
    ///
    /// [`SolverError::ShapeMismatch`] if either field does not match
    /// `grid`, [`SolverError::NonFiniteInput`] if either holds NaN or
    /// infinities.
    pub fn new(
        stepper: WaveStepper,
        grid: &Grid,
        u0: Field,
        ut0: &Field,
        frames: usize,
    ) -> Result<Self, SolverError> {
        grid.check_shape(&u0)?;
        grid.check_shape(ut0)?;
        if !all_finite(&u0) {
            return Err(SolverError::NonFiniteInput {
                what: "initial displacement",
            });
        }
        if !all_finite(ut0) {
            return Err(SolverError::NonFiniteInput {
                what: "initial velocity",
            });
        }
        let u_old = stepper.previous_level(&u0, ut0);
        Ok(Self {
            stepper,
            spare: grid.zeros(),
            u: u0,
            u_old,
            remaining: frames,
        })
    }

    /// The stepper driving this sequence.
    pub fn stepper(&self) -> &WaveStepper {
        &self.stepper
    }

    /// The current time level.
    pub fn current(&self) -> &Field {
        &self.u
    }

    /// The previous time level.
    pub fn previous(&self) -> &Field {
        &self.u_old
    }

    /// Number of snapshots still to be produced.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl Iterator for WaveSteps {
    type Item = Field;

    fn next(&mut self) -> Option<Field> {
        if self.remaining == 0 {
            return None;
        }
        self.stepper.step(&self.u, &self.u_old, &mut self.spare);
        // (u_old, u, spare) <- (u, u', stale u_old)
        std::mem::swap(&mut self.u_old, &mut self.u);
        std::mem::swap(&mut self.u, &mut self.spare);
        self.remaining -= 1;
        Some(self.u.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for WaveSteps {}

impl FusedIterator for WaveSteps {}

/// Wave snapshots for `num_frames` leapfrog steps.
///
/// Fails before producing any element if the CFL condition is violated.
///
/// # Examples
///
/// ```
/// use pdelab_core::Grid;
/// use pdelab_solvers::wave_steps;
///
/// let grid = Grid::new(21, 21, 1.0, 1.0).unwrap();
/// let mut u0 = grid.zeros();
/// u0[[10, 10]] = 1.0;
///
/// let frames: Vec<_> = wave_steps(&grid, 1.0, 0.01, 3, u0, &grid.zeros())
///     .unwrap()
///     .collect();
/// assert_eq!(frames.len(), 3);
/// assert!(frames[0][[11, 10]] > 0.0);
/// ```
pub fn wave_steps(
    grid: &Grid,
    c: f64,
    dt: f64,
    num_frames: usize,
    initial_displacement: Field,
    initial_velocity: &Field,
) -> Result<WaveSteps, SolverError> {
    let stepper = WaveStepper::new(grid, c, dt)?;
    debug!("wave_steps: {num_frames} frames on {}x{}", grid.nx(), grid.ny());
    WaveSteps::new(
        stepper,
        grid,
        initial_displacement,
        initial_velocity,
        num_frames,
    )
}
