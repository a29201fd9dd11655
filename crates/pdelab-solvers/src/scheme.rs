//! The [`ExplicitScheme`] trait shared by the time-marching steppers.

use pdelab_core::{SolverError, StabilityError};

/// An explicit time-marching scheme with a CFL stability bound.
///
/// # Contract
///
/// - The CFL number is fixed at construction; a scheme instance only exists
///   if `cfl_number() < cfl_limit()`.
/// - Steps read only pre-step values and write into a separate buffer.
///
/// # Examples
///
/// ```
/// use pdelab_core::Grid;
/// use pdelab_solvers::{ExplicitScheme, HeatStepper};
///
/// let grid = Grid::new(11, 11, 1.0, 1.0).unwrap();
/// let heat = HeatStepper::new(&grid, 0.1, 0.001).unwrap();
/// assert_eq!(heat.cfl_limit(), 0.5);
/// assert!(heat.cfl_number() < heat.cfl_limit());
/// assert!(heat.dt() < heat.max_stable_dt());
/// ```
pub trait ExplicitScheme {
    /// Human-readable name for error reporting and logs.
    fn name(&self) -> &'static str;

    /// Timestep this scheme was built with.
    fn dt(&self) -> f64;

    /// The dimensionless CFL number `r` for this configuration.
    fn cfl_number(&self) -> f64;

    /// Strict upper bound on the CFL number.
    fn cfl_limit(&self) -> f64;

    /// Supremum of stable timesteps for the same grid and coefficient.
    ///
    /// Stability requires `dt < max_stable_dt()`. Returns infinity when the
    /// coefficient is zero.
    fn max_stable_dt(&self) -> f64 {
        let r = self.cfl_number();
        if r == 0.0 {
            f64::INFINITY
        } else {
            self.cfl_limit() * self.dt() / r
        }
    }
}

/// Fail with [`StabilityError`] unless `cfl < limit`. NaN never passes.
pub(crate) fn check_stability(
    scheme: &'static str,
    cfl: f64,
    limit: f64,
) -> Result<(), StabilityError> {
    if cfl < limit {
        Ok(())
    } else {
        Err(StabilityError { scheme, cfl, limit })
    }
}

/// Require a finite value, strictly positive if `strict`, else non-negative.
pub(crate) fn check_parameter(
    name: &'static str,
    value: f64,
    strict: bool,
) -> Result<(), SolverError> {
    let ok = value.is_finite() && if strict { value > 0.0 } else { value >= 0.0 };
    if ok {
        Ok(())
    } else {
        Err(SolverError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stability_is_strict() {
        assert!(check_stability("s", 0.49, 0.5).is_ok());
        assert_eq!(
            check_stability("s", 0.5, 0.5),
            Err(StabilityError {
                scheme: "s",
                cfl: 0.5,
                limit: 0.5
            })
        );
        assert!(check_stability("s", f64::NAN, 0.5).is_err());
    }

    #[test]
    fn parameters_reject_nan_and_sign() {
        assert!(check_parameter("dt", 0.1, true).is_ok());
        assert!(check_parameter("dt", 0.0, true).is_err());
        assert!(check_parameter("alpha", 0.0, false).is_ok());
        assert!(check_parameter("alpha", -1.0, false).is_err());
        assert!(check_parameter("alpha", f64::NAN, false).is_err());
        assert!(check_parameter("alpha", f64::INFINITY, false).is_err());
    }
}
