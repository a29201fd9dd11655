//! Benchmark profiles for the pdelab kernels.
//!
//! - [`heat_profile`]: diffusion of a Gaussian bump at the classic settings
//! - [`wave_profile`]: leapfrog from a Gaussian pulse at rest
//! - [`laplace_profile`]: relaxation from zero under the default boundary

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use pdelab_core::{Boundary, Field, Grid, Spacing};
use pdelab_solvers::{HeatStepper, LaplaceSolver, WaveStepper};
use pdelab_test_utils::gaussian_bump;

/// A diffusion stepper with its grid and starting field.
pub struct HeatProfile {
    /// `n x n` on the unit square, cell spacing.
    pub grid: Grid,
    /// `alpha = 0.01`, `dt = 0.001`.
    pub stepper: HeatStepper,
    /// `exp(-100 r^2)` bump.
    pub initial: Field,
}

/// A wave stepper with its grid and starting levels.
pub struct WaveProfile {
    /// `n x n` on the unit square, cell spacing.
    pub grid: Grid,
    /// `c = 1`, `dt = 0.001`.
    pub stepper: WaveStepper,
    /// `exp(-200 r^2)` pulse.
    pub u0: Field,
    /// Zero velocity.
    pub ut0: Field,
}

/// A relaxation problem.
pub struct LaplaceProfile {
    /// `n x n` on the unit square, nodal spacing.
    pub grid: Grid,
    /// Left 1, the others 0.
    pub boundary: Boundary,
    /// Zero.
    pub initial: Field,
    /// Default thresholds with the sweep limit `sweeps`.
    pub solver: LaplaceSolver,
}

fn cell_grid(n: usize) -> Grid {
    Grid::with_spacing(n, n, 1.0, 1.0, Spacing::Cell).expect("benchmark grid needs n >= 2")
}

/// Diffusion at the classic demo settings on an `n x n` grid.
///
/// # Panics
///
/// If `n < 2` or `n` is large enough to make `dt = 0.001` unstable.
pub fn heat_profile(n: usize) -> HeatProfile {
    let grid = cell_grid(n);
    let stepper =
        HeatStepper::new(&grid, 0.01, 0.001).expect("demo heat settings unstable at this size");
    let initial = gaussian_bump(&grid, 100.0, 1.0);
    HeatProfile {
        grid,
        stepper,
        initial,
    }
}

/// Leapfrog at the classic demo settings on an `n x n` grid.
///
/// # Panics
///
/// If `n < 2` or `n` is large enough to make `dt = 0.001` unstable.
pub fn wave_profile(n: usize) -> WaveProfile {
    let grid = cell_grid(n);
    let stepper =
        WaveStepper::new(&grid, 1.0, 0.001).expect("demo wave settings unstable at this size");
    let u0 = gaussian_bump(&grid, 200.0, 1.0);
    let ut0 = grid.zeros();
    WaveProfile {
        grid,
        stepper,
        u0,
        ut0,
    }
}

/// Relaxation on an `n x n` grid, stopped after at most `sweeps` sweeps.
///
/// # Panics
///
/// If `n < 2`.
pub fn laplace_profile(n: usize, sweeps: usize) -> LaplaceProfile {
    let grid = Grid::new(n, n, 1.0, 1.0).expect("benchmark grid needs n >= 2");
    let initial = grid.zeros();
    LaplaceProfile {
        grid,
        boundary: Boundary::dirichlet_default(),
        initial,
        solver: LaplaceSolver::default().max_iterations(sweeps),
    }
}
