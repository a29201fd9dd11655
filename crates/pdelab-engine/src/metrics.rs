//! Per-run timing and work counters.

/// Timing and work counters for one run.
///
/// Durations are in microseconds. Frame iterators update these as they
/// are pulled; the relaxation run fills them once on return.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Building the grid, initial data, boundary, and scheme.
    pub setup_us: u64,
    /// Stepping or relaxing, summed over all work done so far.
    pub solve_us: u64,
    /// Snapshots produced by a stepper.
    pub frames: usize,
    /// Jacobi sweeps performed by the relaxation solver.
    pub iterations: usize,
}

impl RunMetrics {
    /// Mean time per frame or sweep, whichever was counted.
    pub fn mean_unit_us(&self) -> Option<f64> {
        let units = self.frames + self.iterations;
        (units > 0).then(|| self.solve_us as f64 / units as f64)
    }
}
