//! Run entrypoints.
//!
//! Each entrypoint validates its configuration, builds everything up
//! front, and either hands back a pull-based frame iterator (diffusion and
//! wave runs) or relaxes to completion (steady state). The frame rate is
//! whatever the caller pulls at; nothing here knows about rendering.

use std::iter::FusedIterator;
use std::time::Instant;

use log::{debug, warn};
use pdelab_core::{Field, Grid};
use pdelab_solvers::{ConvergenceReason, ConvergenceReport, HeatSteps, WaveSteps};

use crate::config::{HeatConfig, LaplaceConfig, WaveConfig};
use crate::error::ConfigError;
use crate::metrics::RunMetrics;

fn elapsed_us(start: Instant) -> u64 {
    start.elapsed().as_micros() as u64
}

/// Frame iterator for a diffusion run.
#[derive(Debug)]
pub struct HeatRun {
    grid: Grid,
    steps: HeatSteps,
    metrics: RunMetrics,
}

impl HeatRun {
    /// The grid being stepped.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The most recent state (the initial field before the first pull).
    pub fn current(&self) -> &Field {
        self.steps.current()
    }

    /// Counters so far.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

impl Iterator for HeatRun {
    type Item = Field;

    fn next(&mut self) -> Option<Field> {
        let start = Instant::now();
        let frame = self.steps.next()?;
        self.metrics.solve_us += elapsed_us(start);
        self.metrics.frames += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl ExactSizeIterator for HeatRun {}

impl FusedIterator for HeatRun {}

/// Frame iterator for a wave run.
#[derive(Debug)]
pub struct WaveRun {
    grid: Grid,
    steps: WaveSteps,
    metrics: RunMetrics,
}

impl WaveRun {
    /// The grid being stepped.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The current time level.
    pub fn current(&self) -> &Field {
        self.steps.current()
    }

    /// Counters so far.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

impl Iterator for WaveRun {
    type Item = Field;

    fn next(&mut self) -> Option<Field> {
        let start = Instant::now();
        let frame = self.steps.next()?;
        self.metrics.solve_us += elapsed_us(start);
        self.metrics.frames += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl ExactSizeIterator for WaveRun {}

impl FusedIterator for WaveRun {}

/// Result of a relaxation run.
#[derive(Clone, Debug)]
pub struct LaplaceOutcome {
    /// The grid relaxed on.
    pub grid: Grid,
    /// Final iterate, boundary included.
    pub field: Field,
    /// Why relaxation stopped.
    pub report: ConvergenceReport,
    /// Timing and sweep count.
    pub metrics: RunMetrics,
}

/// Validate `config` and return its frame iterator.
///
/// # Errors
///
/// Any [`ConfigError`]; in particular a CFL violation is reported here,
/// before any frame exists.
pub fn run_heat(config: &HeatConfig) -> Result<HeatRun, ConfigError> {
    let start = Instant::now();
    let (grid, steps) = config.prepare()?;
    let metrics = RunMetrics {
        setup_us: elapsed_us(start),
        ..RunMetrics::default()
    };
    debug!(
        "heat run: {}x{} grid, {} frames, setup {}us",
        grid.nx(),
        grid.ny(),
        steps.len(),
        metrics.setup_us
    );
    Ok(HeatRun {
        grid,
        steps,
        metrics,
    })
}

/// Validate `config` and return its frame iterator.
///
/// # Errors
///
/// Any [`ConfigError`]; in particular a CFL violation is reported here,
/// before any frame exists.
pub fn run_wave(config: &WaveConfig) -> Result<WaveRun, ConfigError> {
    let start = Instant::now();
    let (grid, steps) = config.prepare()?;
    let metrics = RunMetrics {
        setup_us: elapsed_us(start),
        ..RunMetrics::default()
    };
    debug!(
        "wave run: {}x{} grid, {} frames, setup {}us",
        grid.nx(),
        grid.ny(),
        steps.len(),
        metrics.setup_us
    );
    Ok(WaveRun {
        grid,
        steps,
        metrics,
    })
}

/// Validate `config` and relax to steady state.
///
/// Non-convergence and non-finite data are not errors; inspect
/// [`report`](LaplaceOutcome::report).
pub fn run_laplace(config: &LaplaceConfig) -> Result<LaplaceOutcome, ConfigError> {
    let start = Instant::now();
    let setup = config.prepare()?;
    let setup_us = elapsed_us(start);

    let start = Instant::now();
    let (field, report) = setup
        .solver
        .solve(&setup.grid, setup.boundary.as_ref(), &setup.initial)?;
    let metrics = RunMetrics {
        setup_us,
        solve_us: elapsed_us(start),
        frames: 0,
        iterations: report.iterations,
    };

    match report.reason {
        ConvergenceReason::Tolerance | ConvergenceReason::UniformField => {
            debug!("laplace run: {report} in {}us", metrics.solve_us);
        }
        ConvergenceReason::NonFinite | ConvergenceReason::MaxIterations => {
            warn!("laplace run: {report} in {}us", metrics.solve_us);
        }
    }
    Ok(LaplaceOutcome {
        grid: setup.grid,
        field,
        report,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoundarySpec, GridSpec, InitialCondition};

    fn tiny_heat() -> HeatConfig {
        HeatConfig {
            grid: GridSpec::cell(20, 20, 1.0, 1.0),
            total_time: 0.01,
            ..HeatConfig::default()
        }
    }

    #[test]
    fn heat_run_counts_frames() {
        let mut run = run_heat(&tiny_heat()).unwrap();
        assert_eq!(run.len(), 10);
        let frames: Vec<_> = run.by_ref().collect();
        assert_eq!(frames.len(), 10);
        assert_eq!(run.metrics().frames, 10);
        assert_eq!(run.metrics().iterations, 0);
        assert!(run.next().is_none());
        assert_eq!(run.metrics().frames, 10);
    }

    #[test]
    fn heat_run_with_boundary_pins_edges() {
        let cfg = HeatConfig {
            boundary: Some(BoundarySpec::uniform(0.25)),
            ..tiny_heat()
        };
        let last = run_heat(&cfg).unwrap().last().unwrap();
        assert_eq!(last[[0, 7]], 0.25);
        assert_eq!(last[[19, 19]], 0.25);
    }

    #[test]
    fn wave_run_yields_requested_frames() {
        let cfg = WaveConfig {
            grid: GridSpec::cell(20, 20, 1.0, 1.0),
            num_frames: 4,
            ..WaveConfig::default()
        };
        let mut run = run_wave(&cfg).unwrap();
        assert_eq!(run.grid().nx(), 20);
        assert_eq!(run.by_ref().count(), 4);
        assert_eq!(run.metrics().frames, 4);
    }

    #[test]
    fn laplace_run_reports_iterations() {
        let cfg = LaplaceConfig {
            grid: GridSpec::nodal(9, 9, 1.0, 1.0),
            ..LaplaceConfig::default()
        };
        let out = run_laplace(&cfg).unwrap();
        assert!(out.report.converged);
        assert_eq!(out.metrics.iterations, out.report.iterations);
        assert_eq!(out.field[[0, 4]], 1.0);
        assert_eq!(out.field[[8, 4]], 0.0);
    }

    #[test]
    fn laplace_with_constant_boundary_flattens() {
        let cfg = LaplaceConfig {
            grid: GridSpec::nodal(9, 9, 1.0, 1.0),
            boundary: Some(BoundarySpec::uniform(2.0)),
            initial: InitialCondition::Constant(2.0),
            ..LaplaceConfig::default()
        };
        let out = run_laplace(&cfg).unwrap();
        assert_eq!(out.report.iterations, 1);
        assert!(out.field.iter().all(|&v| v == 2.0));
    }

    #[test]
    fn errors_surface_before_any_frame() {
        let cfg = WaveConfig {
            dt: 0.1,
            ..WaveConfig::default()
        };
        assert!(run_wave(&cfg).is_err());
    }
}
