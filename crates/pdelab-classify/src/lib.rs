//! Classification and principal-axis reduction of constant-coefficient
//! second-order linear PDEs in two variables.
//!
//! The PDE is
//!
//! ```text
//! A u_xx + 2B u_xy + C u_yy + D u_x + E u_y + F u + G = 0
//! ```
//!
//! Its type follows from the sign of the discriminant `B^2 - A C`
//! ([`classify_pde`]). Rotating the coordinates onto the eigenvectors of
//! `[[A, B], [B, C]]` removes the mixed term ([`reduce_pde`]). Both are pure
//! functions of the seven coefficients and need no grid.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod classify;
pub mod coefficients;
pub mod normal_form;

pub use classify::{classify_pde, discriminant, Classifier, PdeType};
pub use coefficients::PdeCoefficients;
pub use normal_form::{reduce_pde, NormalForm};
