//! Discriminant-based type test.

use std::fmt;

/// The type of a second-order PDE.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PdeType {
    /// `B^2 - A C < 0` (Laplace-like).
    Elliptic,
    /// `B^2 - A C = 0` (heat-like).
    Parabolic,
    /// `B^2 - A C > 0` (wave-like).
    Hyperbolic,
}

impl fmt::Display for PdeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Elliptic => "elliptic",
            Self::Parabolic => "parabolic",
            Self::Hyperbolic => "hyperbolic",
        };
        f.write_str(s)
    }
}

/// The discriminant `B^2 - A C`.
pub fn discriminant(a: f64, b: f64, c: f64) -> f64 {
    b * b - a * c
}

/// Classification policy for the parabolic case.
///
/// Exact equality to zero is fragile when the coefficients come from
/// measurement or rounding, e.g. `A = 1`, `B = sqrt(2)`, `C = 2`. An
/// epsilon classifier treats `|B^2 - A C| <= eps * max(B^2, |A C|)` as
/// zero; the band is relative so it does not depend on the scale of the
/// coefficients.
///
/// ```
/// use pdelab_classify::{Classifier, PdeType};
///
/// let s = 2f64.sqrt();
/// // sqrt(2)^2 - 1 * 2 is 4.4e-16 in floating point.
/// assert_eq!(Classifier::exact().classify(1.0, s, 2.0), PdeType::Hyperbolic);
/// assert_eq!(
///     Classifier::with_epsilon(1e-12).classify(1.0, s, 2.0),
///     PdeType::Parabolic
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Classifier {
    epsilon: f64,
}

impl Classifier {
    /// Parabolic only when the discriminant is exactly zero.
    pub fn exact() -> Self {
        Self { epsilon: 0.0 }
    }

    /// Parabolic within a relative band of width `epsilon`.
    ///
    /// Negative or NaN values are treated as zero.
    pub fn with_epsilon(epsilon: f64) -> Self {
        let epsilon = if epsilon > 0.0 { epsilon } else { 0.0 };
        Self { epsilon }
    }

    /// The relative band width.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Classify by the sign of `B^2 - A C`.
    pub fn classify(&self, a: f64, b: f64, c: f64) -> PdeType {
        let delta = discriminant(a, b, c);
        let band = self.epsilon * (b * b).max((a * c).abs());
        if delta.abs() <= band {
            PdeType::Parabolic
        } else if delta < 0.0 {
            PdeType::Elliptic
        } else {
            PdeType::Hyperbolic
        }
    }
}

/// Classify with exact zero comparison: `< 0` elliptic, `= 0` parabolic,
/// `> 0` hyperbolic.
pub fn classify_pde(a: f64, b: f64, c: f64) -> PdeType {
    Classifier::exact().classify(a, b, c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn canonical_examples() {
        assert_eq!(classify_pde(1.0, 0.0, 1.0), PdeType::Elliptic);
        assert_eq!(classify_pde(1.0, 1.0, 1.0), PdeType::Parabolic);
        assert_eq!(classify_pde(1.0, 2.0, 1.0), PdeType::Hyperbolic);
        assert_eq!(discriminant(1.0, 2.0, 1.0), 3.0);
    }

    #[test]
    fn heat_and_wave_operators() {
        // u_t = u_xx written in (x, t): A = 1, B = 0, C = 0.
        assert_eq!(classify_pde(1.0, 0.0, 0.0), PdeType::Parabolic);
        // u_tt = u_xx: A = 1, C = -1.
        assert_eq!(classify_pde(1.0, 0.0, -1.0), PdeType::Hyperbolic);
    }

    #[test]
    fn exact_classifier_matches_free_function() {
        assert_eq!(Classifier::default(), Classifier::exact());
        assert_eq!(Classifier::with_epsilon(-1.0).epsilon(), 0.0);
        assert_eq!(Classifier::with_epsilon(f64::NAN).epsilon(), 0.0);
    }

    #[test]
    fn epsilon_band_does_not_swallow_clear_cases() {
        let c = Classifier::with_epsilon(1e-9);
        assert_eq!(c.classify(1.0, 0.0, 1.0), PdeType::Elliptic);
        assert_eq!(c.classify(1.0, 2.0, 1.0), PdeType::Hyperbolic);
        assert_eq!(c.classify(1e-20, 0.0, 1e-20), PdeType::Elliptic);
    }

    #[test]
    fn display_names() {
        assert_eq!(PdeType::Hyperbolic.to_string(), "hyperbolic");
    }

    proptest! {
        #[test]
        fn type_is_scale_invariant(
            a in -10.0f64..10.0,
            b in -10.0f64..10.0,
            c in -10.0f64..10.0,
            k in 0.1f64..10.0,
        ) {
            let eps = Classifier::with_epsilon(1e-9);
            prop_assert_eq!(eps.classify(a, b, c), eps.classify(k * a, k * b, k * c));
        }

        #[test]
        fn exact_type_follows_sign(a in -10.0f64..10.0, b in -10.0f64..10.0, c in -10.0f64..10.0) {
            let d = discriminant(a, b, c);
            let expected = if d < 0.0 {
                PdeType::Elliptic
            } else if d == 0.0 {
                PdeType::Parabolic
            } else {
                PdeType::Hyperbolic
            };
            prop_assert_eq!(classify_pde(a, b, c), expected);
        }
    }
}
