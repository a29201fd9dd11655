//! Explicit five-point diffusion stepper.
//!
//! ```text
//! u'[i,j] = u[i,j] + alpha*dt * ((u[i+1,j] - 2u[i,j] + u[i-1,j]) / dx^2
//!                              + (u[i,j+1] - 2u[i,j] + u[i,j-1]) / dy^2)
//! ```
//!
//! Interior points only. Border points keep the value they had before the
//! step, which freezes them at the initial border values unless a
//! [`Boundary`] is reapplied after every step
//! ([`HeatSteps::with_boundary`]).

use crate::scheme::{check_parameter, check_stability, ExplicitScheme};
use crate::stencil::{interior, laplacian};
use log::debug;
use pdelab_core::field::all_finite;
use pdelab_core::{Boundary, Field, Grid, SolverError};
use std::iter::FusedIterator;

/// Explicit Euler / five-point Laplacian diffusion stepper.
///
/// # CFL stability
///
/// `r = alpha * dt * (1/dx^2 + 1/dy^2)` must satisfy `r < 0.5`. The check
/// happens once in [`new`](HeatStepper::new); an instance is always stable.
#[derive(Clone, Debug)]
pub struct HeatStepper {
    alpha: f64,
    dt: f64,
    dx2: f64,
    dy2: f64,
    cfl: f64,
}

impl HeatStepper {
    /// Strict upper bound on the diffusion CFL number.
    pub const CFL_LIMIT: f64 = 0.5;

    /// The diffusion CFL number `alpha * dt * (1/dx^2 + 1/dy^2)`.
    pub fn cfl(grid: &Grid, alpha: f64, dt: f64) -> f64 {
        alpha * dt * (1.0 / (grid.dx() * grid.dx()) + 1.0 / (grid.dy() * grid.dy()))
    }

    /// Build a stepper for `grid` with diffusivity `alpha` and timestep `dt`.
    ///
    /// # Errors
    ///
    /// - [`SolverError::InvalidParameter`] if `alpha` is negative or not
    ///   finite, or `dt` is not a finite positive number.
    /// - [`SolverError::Unstable`] if the CFL number is `>= 0.5`.
    pub fn new(grid: &Grid, alpha: f64, dt: f64) -> Result<Self, SolverError> {
        check_parameter("alpha", alpha, false)?;
        check_parameter("dt", dt, true)?;
        let cfl = Self::cfl(grid, alpha, dt);
        check_stability("HeatStepper", cfl, Self::CFL_LIMIT)?;
        debug!("HeatStepper: alpha={alpha} dt={dt} cfl={cfl:.4}");
        Ok(Self {
            alpha,
            dt,
            dx2: grid.dx() * grid.dx(),
            dy2: grid.dy() * grid.dy(),
            cfl,
        })
    }

    /// Diffusivity.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Advance `prev` by one step into `next`.
    ///
    /// Borders of `next` are copied from `prev`; interior points get the
    /// diffusion update computed exclusively from `prev`.
    ///
    /// # Panics
    ///
    /// Panics if the two fields have different shapes.
    pub fn step(&self, prev: &Field, next: &mut Field) {
        next.assign(prev);
        let k = self.alpha * self.dt;
        let (is, js) = interior(prev);
        for i in is {
            for j in js.clone() {
                next[[i, j]] = prev[[i, j]] + k * laplacian(prev, i, j, self.dx2, self.dy2);
            }
        }
    }

    /// Convenience wrapper around [`step`](HeatStepper::step) that
    /// allocates the output.
    pub fn advance(&self, prev: &Field) -> Field {
        let mut next = prev.clone();
        self.step(prev, &mut next);
        next
    }
}

impl ExplicitScheme for HeatStepper {
    fn name(&self) -> &'static str {
        "HeatStepper"
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

/// Lazy, finite, non-restartable sequence of diffusion snapshots.
///
/// Each item is an owned copy of the field after one more step; the
/// iterator's internal buffers are never handed out.
#[derive(Debug)]
pub struct HeatSteps {
    stepper: HeatStepper,
    grid: Grid,
    current: Field,
    scratch: Field,
    boundary: Option<Boundary>,
    remaining: usize,
}

impl HeatSteps {
    /// Start a sequence of `steps` snapshots from `initial`.
    ///
    /// # Errors
    ///
    /// [`SolverError::ShapeMismatch`] if `initial` does not match `grid`, or
    /// [`SolverError::NonFiniteInput`] if it contains NaN or infinities.
    pub fn new(
        stepper: HeatStepper,
        grid: &Grid,
        initial: Field,
        steps: usize,
    ) -> Result<Self, SolverError> {
        grid.check_shape(&initial)?;
        if !all_finite(&initial) {
            return Err(SolverError::NonFiniteInput {
                what: "initial field",
            });
        }
        let scratch = initial.clone();
        Ok(Self {
            stepper,
            grid: grid.clone(),
            current: initial,
            scratch,
            boundary: None,
            remaining: steps,
        })
    }

    /// Reapply `boundary` after every step instead of freezing the
    /// initial border values.
    pub fn with_boundary(mut self, boundary: Boundary) -> Result<Self, SolverError> {
        boundary.validate(&self.grid)?;
        self.boundary = Some(boundary);
        Ok(self)
    }

    /// The stepper driving this sequence.
    pub fn stepper(&self) -> &HeatStepper {
        &self.stepper
    }

    /// The most recent state (the initial field before the first pull).
    pub fn current(&self) -> &Field {
        &self.current
    }

    /// Number of snapshots still to be produced.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl Iterator for HeatSteps {
    type Item = Field;

    fn next(&mut self) -> Option<Field> {
        if self.remaining == 0 {
            return None;
        }
        self.stepper.step(&self.current, &mut self.scratch);
        if let Some(bc) = &self.boundary {
            bc.apply(&self.grid, &mut self.scratch);
        }
        std::mem::swap(&mut self.current, &mut self.scratch);
        self.remaining -= 1;
        Some(self.current.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for HeatSteps {}

impl FusedIterator for HeatSteps {}

/// Diffusion snapshots for `floor(total_time / dt)` steps.
///
/// Fails before producing any element if the CFL condition is violated.
///
/// # Examples
///
/// ```
/// use pdelab_core::Grid;
/// use pdelab_solvers::heat_steps;
///
/// let grid = Grid::new(21, 21, 1.0, 1.0).unwrap();
/// let mut u0 = grid.zeros();
/// u0[[10, 10]] = 1.0;
///
/// let frames: Vec<_> = heat_steps(&grid, 0.01, 0.01, 0.05, u0).unwrap().collect();
/// assert_eq!(frames.len(), 5);
/// assert!(frames[4][[10, 10]] < 1.0);
///
/// // dx = 0.05 makes this CFL number 8.0.
/// assert!(heat_steps(&grid, 1.0, 0.01, 1.0, grid.zeros()).is_err());
/// ```
pub fn heat_steps(
    grid: &Grid,
    alpha: f64,
    dt: f64,
    total_time: f64,
    initial_field: Field,
) -> Result<HeatSteps, SolverError> {
    let stepper = HeatStepper::new(grid, alpha, dt)?;
    check_parameter("total_time", total_time, false)?;
    let steps = (total_time / dt).floor() as usize;
    debug!("heat_steps: {steps} steps on {}x{}", grid.nx(), grid.ny());
    HeatSteps::new(stepper, grid, initial_field, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdelab_core::StabilityError;
    use pdelab_test_utils::{hot_spot, random_field};
    use proptest::prelude::*;

    fn grid() -> Grid {
        Grid::new(11, 11, 1.0, 1.0).unwrap()
    }

    fn stable_dt(grid: &Grid, alpha: f64, r: f64) -> f64 {
        r / (alpha * (1.0 / (grid.dx() * grid.dx()) + 1.0 / (grid.dy() * grid.dy())))
    }

    #[test]
    fn uniform_field_stays_uniform() {
        let g = grid();
        let stepper = HeatStepper::new(&g, 0.1, 0.001).unwrap();
        let u = Field::from_elem(g.shape(), 10.0);
        let next = stepper.advance(&u);
        for &v in next.iter() {
            assert!((v - 10.0).abs() < 1e-12, "uniform heat should stay uniform, got {v}");
        }
    }

    #[test]
    fn hot_centre_spreads_to_neighbours() {
        let g = grid();
        let stepper = HeatStepper::new(&g, 0.1, 0.001).unwrap();
        let u = hot_spot(&g, 5, 5, 100.0);
        let next = stepper.advance(&u);
        assert!(next[[5, 5]] < 100.0, "centre should cool: {}", next[[5, 5]]);
        for (i, j) in [(4, 5), (6, 5), (5, 4), (5, 6)] {
            assert!(next[[i, j]] > 0.0, "neighbour ({i},{j}) should warm");
        }
        // Diagonal points are outside the five-point stencil.
        assert_eq!(next[[4, 4]], 0.0);
    }

    #[test]
    fn matches_explicit_formula() {
        let g = Grid::new(4, 5, 0.9, 2.0).unwrap();
        let (alpha, dt) = (0.02, 0.05);
        let stepper = HeatStepper::new(&g, alpha, dt).unwrap();
        let u = random_field(&g, 7);
        let next = stepper.advance(&u);
        let (dx2, dy2) = (g.dx() * g.dx(), g.dy() * g.dy());
        let (i, j) = (2, 3);
        let expected = u[[i, j]]
            + alpha
                * dt
                * ((u[[i + 1, j]] - 2.0 * u[[i, j]] + u[[i - 1, j]]) / dx2
                    + (u[[i, j + 1]] - 2.0 * u[[i, j]] + u[[i, j - 1]]) / dy2);
        assert!((next[[i, j]] - expected).abs() < 1e-14);
    }

    #[test]
    fn borders_are_frozen() {
        let g = grid();
        let stepper = HeatStepper::new(&g, 0.1, 0.001).unwrap();
        let u0 = random_field(&g, 3);
        let last = heat_steps(&g, 0.1, 0.001, 0.05, u0.clone())
            .unwrap()
            .last()
            .unwrap();
        for i in 0..g.nx() {
            for j in 0..g.ny() {
                if !g.is_interior(i, j) {
                    assert_eq!(last[[i, j]], u0[[i, j]], "border ({i},{j}) moved");
                }
            }
        }
        assert_eq!(stepper.name(), "HeatStepper");
    }

    #[test]
    fn boundary_is_reapplied_when_requested() {
        let g = grid();
        let steps = heat_steps(&g, 0.1, 0.001, 0.003, g.zeros())
            .unwrap()
            .with_boundary(Boundary::uniform(0.0).left(1.0))
            .unwrap();
        let frames: Vec<_> = steps.collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0][[0, 5]], 1.0);
        assert!(frames[2][[1, 5]] > 0.0);
    }

    #[test]
    fn sequence_length_is_floor_of_total_time() {
        let g = grid();
        let steps = heat_steps(&g, 0.1, 0.001, 0.0105, g.zeros()).unwrap();
        assert_eq!(steps.len(), 10);
        let mut steps = heat_steps(&g, 0.1, 0.001, 0.0, g.zeros()).unwrap();
        assert!(steps.next().is_none());
    }

    #[test]
    fn snapshots_are_independent_copies() {
        let g = grid();
        let mut steps = heat_steps(&g, 0.1, 0.001, 0.01, hot_spot(&g, 5, 5, 1.0)).unwrap();
        let first = steps.next().unwrap();
        let second = steps.next().unwrap();
        assert!(first[[5, 5]] > second[[5, 5]]);
        assert_eq!(steps.current(), &second);
        assert_eq!(steps.remaining(), 8);
    }

    #[test]
    fn unstable_configuration_fails_before_stepping() {
        let g = grid();
        let dt = stable_dt(&g, 1.0, 0.5) * 1.001;
        match heat_steps(&g, 1.0, dt, 1.0, g.zeros()) {
            Err(SolverError::Unstable(StabilityError { scheme, cfl, limit })) => {
                assert_eq!(scheme, "HeatStepper");
                assert!(cfl >= 0.5);
                assert_eq!(limit, 0.5);
            }
            other => panic!("expected StabilityError, got {other:?}"),
        }
    }

    #[test]
    fn cfl_of_049_proceeds() {
        let g = grid();
        let dt = stable_dt(&g, 1.0, 0.49);
        let stepper = HeatStepper::new(&g, 1.0, dt).unwrap();
        assert!((stepper.cfl_number() - 0.49).abs() < 1e-12);
        assert!(heat_steps(&g, 1.0, dt, 10.0 * dt, g.zeros()).is_ok());
    }

    #[test]
    fn rejects_bad_inputs() {
        let g = grid();
        assert!(matches!(
            heat_steps(&g, -0.1, 0.001, 1.0, g.zeros()),
            Err(SolverError::InvalidParameter { name: "alpha", .. })
        ));
        assert!(matches!(
            heat_steps(&g, 0.1, 0.0, 1.0, g.zeros()),
            Err(SolverError::InvalidParameter { name: "dt", .. })
        ));
        assert!(matches!(
            heat_steps(&g, 0.1, 0.001, f64::NAN, g.zeros()),
            Err(SolverError::InvalidParameter {
                name: "total_time",
                ..
            })
        ));
        assert!(matches!(
            heat_steps(&g, 0.1, 0.001, 1.0, Field::zeros((3, 3))),
            Err(SolverError::ShapeMismatch { .. })
        ));
        let mut bad = g.zeros();
        bad[[2, 2]] = f64::NAN;
        assert!(matches!(
            heat_steps(&g, 0.1, 0.001, 1.0, bad),
            Err(SolverError::NonFiniteInput { .. })
        ));
    }

    #[test]
    fn max_stable_dt_is_the_cfl_boundary() {
        let g = grid();
        let stepper = HeatStepper::new(&g, 0.25, 0.0001).unwrap();
        let bound = stepper.max_stable_dt();
        assert!((bound - stable_dt(&g, 0.25, 0.5)).abs() < 1e-15);
        let zero = HeatStepper::new(&g, 0.0, 0.5).unwrap();
        assert_eq!(zero.max_stable_dt(), f64::INFINITY);
    }

    proptest! {
        #[test]
        fn cfl_at_or_above_half_always_fails(
            nx in 3usize..40,
            ny in 3usize..40,
            alpha in 1e-3f64..10.0,
            factor in 1.0f64..50.0,
        ) {
            let g = Grid::new(nx, ny, 1.0, 1.0).unwrap();
            let dt = stable_dt(&g, alpha, 0.5) * factor * (1.0 + 1e-9);
            let result = heat_steps(&g, alpha, dt, 1.0, g.zeros());
            prop_assert!(matches!(result, Err(SolverError::Unstable(_))));
        }

        #[test]
        fn stable_steps_never_exceed_initial_extrema(
            seed in 0u64..1000,
            r in 0.01f64..0.49,
        ) {
            let g = Grid::new(9, 7, 1.0, 1.0).unwrap();
            let dt = stable_dt(&g, 1.0, r);
            let u0 = random_field(&g, seed);
            let (lo, hi) = pdelab_core::field::min_max(&u0);
            for frame in heat_steps(&g, 1.0, dt, 20.0 * dt, u0).unwrap() {
                let (flo, fhi) = pdelab_core::field::min_max(&frame);
                prop_assert!(flo >= lo - 1e-12 && fhi <= hi + 1e-12);
            }
        }
    }
}
