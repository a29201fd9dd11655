//! Classification and reduction of a coefficient set in one call.

use std::fmt;

use log::debug;
use pdelab_classify::{Classifier, NormalForm, PdeCoefficients, PdeType};

use crate::error::ConfigError;

/// Type and normal form of one PDE.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassificationReport {
    /// The input.
    pub coefficients: PdeCoefficients,
    /// `B^2 - A C`.
    pub discriminant: f64,
    /// Type under the classifier used.
    pub pde_type: PdeType,
    /// Principal-axis reduction.
    pub normal_form: NormalForm,
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} (B^2 - AC = {:.4})",
            self.pde_type, self.discriminant
        )?;
        write!(f, "{}", self.normal_form)
    }
}

/// Classify with exact zero comparison and reduce.
pub fn classify(coefficients: &PdeCoefficients) -> Result<ClassificationReport, ConfigError> {
    classify_with(coefficients, &Classifier::exact())
}

/// Classify with `classifier` and reduce.
///
/// # Errors
///
/// [`ConfigError::Invalid`] if any coefficient is NaN or infinite.
pub fn classify_with(
    coefficients: &PdeCoefficients,
    classifier: &Classifier,
) -> Result<ClassificationReport, ConfigError> {
    if !coefficients.is_finite() {
        return Err(ConfigError::Invalid {
            reason: format!("coefficients must be finite, got {coefficients:?}"),
        });
    }
    let c = coefficients;
    let report = ClassificationReport {
        coefficients: *c,
        discriminant: c.discriminant(),
        pde_type: classifier.classify(c.a, c.b, c.c),
        normal_form: c.reduce(),
    };
    debug!(
        "classify: delta={} -> {}, theta={:.4}",
        report.discriminant, report.pde_type, report.normal_form.theta
    );
    Ok(report)
}
