//! Principal-axis rotation that removes the mixed derivative.
//!
//! The principal part of the PDE is the quadratic form of the symmetric
//! matrix `M = [[A, B], [B, C]]`. Rotating the coordinates by `theta`
//!
//! ```text
//! xi  =  x cos(theta) + y sin(theta)
//! eta = -x sin(theta) + y cos(theta)
//! ```
//!
//! with `theta` chosen so that the rotated off-diagonal entry vanishes
//! turns the equation into
//!
//! ```text
//! lambda1 u_xixi + lambda2 u_etaeta + D' u_xi + E' u_eta + F u + G = 0
//! ```
//!
//! where `lambda1`, `lambda2` are the eigenvalues of `M` and `(D', E')` is
//! `(D, E)` rotated as a vector.

use std::f64::consts::FRAC_PI_4;
use std::fmt;

use crate::classify::PdeType;

/// A PDE in rotated coordinates with no mixed term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalForm {
    /// Rotation angle in radians, in `[-pi/4, pi/4]`.
    pub theta: f64,
    /// Coefficient of `u_xixi`.
    pub lambda1: f64,
    /// Coefficient of `u_etaeta`.
    pub lambda2: f64,
    /// Coefficient of `u_xi`.
    pub d_prime: f64,
    /// Coefficient of `u_eta`.
    pub e_prime: f64,
    /// Coefficient of `u`, unchanged by rotation.
    pub f: f64,
    /// Constant term, unchanged by rotation.
    pub g: f64,
}

impl NormalForm {
    /// Map a point `(x, y)` to rotated coordinates `(xi, eta)`.
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        let (s, c) = self.theta.sin_cos();
        (x * c + y * s, -x * s + y * c)
    }

    /// Map rotated coordinates `(xi, eta)` back to `(x, y)`.
    pub fn inverse_transform(&self, xi: f64, eta: f64) -> (f64, f64) {
        let (s, c) = self.theta.sin_cos();
        (xi * c - eta * s, xi * s + eta * c)
    }

    /// Type read off the eigenvalue signs: equal signs elliptic, a zero
    /// eigenvalue parabolic, opposite signs hyperbolic.
    ///
    /// Exact comparison, so this agrees with
    /// [`classify_pde`](crate::classify_pde) only when the rotation is exact.
    pub fn pde_type(&self) -> PdeType {
        let product = self.lambda1 * self.lambda2;
        if product > 0.0 {
            PdeType::Elliptic
        } else if product == 0.0 {
            PdeType::Parabolic
        } else {
            PdeType::Hyperbolic
        }
    }
}

impl NormalForm {
    /// The reduced equation and the change of variables as LaTeX.
    ///
    /// ```
    /// let nf = pdelab_classify::reduce_pde(1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0);
    /// assert!(nf.to_latex().contains(r"u_{\xi\xi}"));
    /// ```
    pub fn to_latex(&self) -> String {
        format!(
            "\\begin{{cases}} \\xi = x\\cos\\theta + y\\sin\\theta \\\\ \
             \\eta = -x\\sin\\theta + y\\cos\\theta \\end{{cases}}, \\quad \\theta = {:.4}\n\
             {:.4} u_{{\\xi\\xi}} {} u_{{\\eta\\eta}} {} u_{{\\xi}} {} u_{{\\eta}} {} u {} = 0",
            self.theta,
            self.lambda1,
            signed(self.lambda2),
            signed(self.d_prime),
            signed(self.e_prime),
            signed(self.f),
            signed(self.g),
        )
    }
}

impl fmt::Display for NormalForm {
    /// Renders the reduced equation followed by the change of variables.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4} u_xixi {} u_etaeta {} u_xi {} u_eta {} u {} = 0",
            self.lambda1,
            signed(self.lambda2),
            signed(self.d_prime),
            signed(self.e_prime),
            signed(self.f),
            signed(self.g),
        )?;
        let (s, c) = self.theta.sin_cos();
        write!(
            f,
            " where xi = {:.4} x {} y, eta = {:.4} x {} y (theta = {:.4} rad)",
            c,
            signed(s),
            0.0 - s,
            signed(c),
            self.theta,
        )
    }
}

/// `+ 1.2500` or `- 1.2500`; values that print as zero get `+`.
fn signed(v: f64) -> String {
    let mag = format!("{:.4}", v.abs());
    if v < 0.0 && mag != "0.0000" {
        format!("- {mag}")
    } else {
        format!("+ {mag}")
    }
}

/// Rotation angle that diagonalises `[[A, B], [B, C]]`.
fn rotation_angle(a: f64, b: f64, c: f64) -> f64 {
    if a == c {
        if b == 0.0 {
            0.0
        } else if b < 0.0 {
            -FRAC_PI_4
        } else {
            FRAC_PI_4
        }
    } else {
        0.5 * (2.0 * b / (a - c)).atan()
    }
}

/// Reduce `A u_xx + 2B u_xy + C u_yy + D u_x + E u_y + F u + G = 0` to its
/// normal form.
///
/// ```
/// use pdelab_classify::reduce_pde;
///
/// let nf = reduce_pde(1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0);
/// assert!((nf.theta - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
/// assert!((nf.lambda1 - 2.0).abs() < 1e-12);
/// assert!(nf.lambda2.abs() < 1e-12);
/// ```
pub fn reduce_pde(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64, g: f64) -> NormalForm {
    let theta = rotation_angle(a, b, c);
    let (s, co) = theta.sin_cos();
    let (s2, c2, sc) = (s * s, co * co, s * co);
    NormalForm {
        theta,
        lambda1: a * c2 + 2.0 * b * sc + c * s2,
        lambda2: a * s2 - 2.0 * b * sc + c * c2,
        d_prime: d * co + e * s,
        e_prime: -d * s + e * co,
        f,
        g,
    }
}
