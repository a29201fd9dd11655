//! The seven scalar coefficients of a second-order linear PDE.

use crate::classify::{Classifier, PdeType};
use crate::normal_form::{reduce_pde, NormalForm};

/// Coefficients `(A, B, C, D, E, F, G)` of
/// `A u_xx + 2B u_xy + C u_yy + D u_x + E u_y + F u + G = 0`.
///
/// Note that `B` is *half* the coefficient of the mixed derivative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PdeCoefficients {
    /// Coefficient of `u_xx`.
    pub a: f64,
    /// Half the coefficient of `u_xy`.
    pub b: f64,
    /// Coefficient of `u_yy`.
    pub c: f64,
    /// Coefficient of `u_x`.
    pub d: f64,
    /// Coefficient of `u_y`.
    pub e: f64,
    /// Coefficient of `u`.
    pub f: f64,
    /// Constant term.
    pub g: f64,
}

impl PdeCoefficients {
    /// Build from the seven coefficients in equation order.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64, g: f64) -> Self {
        Self {
            a,
            b,
            c,
            d,
            e,
            f,
            g,
        }
    }

    /// Only the principal part `A u_xx + 2B u_xy + C u_yy`.
    pub fn principal(a: f64, b: f64, c: f64) -> Self {
        Self {
            a,
            b,
            c,
            ..Self::default()
        }
    }

    /// `B^2 - A C`.
    pub fn discriminant(&self) -> f64 {
        crate::classify::discriminant(self.a, self.b, self.c)
    }

    /// Type under exact zero comparison.
    pub fn classify(&self) -> PdeType {
        Classifier::exact().classify(self.a, self.b, self.c)
    }

    /// The equation in rotated coordinates with no mixed term.
    pub fn reduce(&self) -> NormalForm {
        reduce_pde(self.a, self.b, self.c, self.d, self.e, self.f, self.g)
    }

    /// `true` if every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f, self.g]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl From<[f64; 7]> for PdeCoefficients {
    fn from([a, b, c, d, e, f, g]: [f64; 7]) -> Self {
        Self::new(a, b, c, d, e, f, g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laplace_equation_is_elliptic() {
        let p = PdeCoefficients::principal(1.0, 0.0, 1.0);
        assert_eq!(p.discriminant(), -1.0);
        assert_eq!(p.classify(), PdeType::Elliptic);
    }

    #[test]
    fn array_conversion_keeps_order() {
        let p = PdeCoefficients::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(p, PdeCoefficients::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0));
        assert_eq!(p.g, 7.0);
        assert!(p.is_finite());
        assert!(!PdeCoefficients::principal(f64::NAN, 0.0, 0.0).is_finite());
    }

    #[test]
    fn reduce_forwards_all_coefficients() {
        let p = PdeCoefficients::new(2.0, 0.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let nf = p.reduce();
        assert_eq!(nf.theta, 0.0);
        assert_eq!((nf.d_prime, nf.e_prime, nf.f, nf.g), (3.0, 4.0, 5.0, 6.0));
    }
}
