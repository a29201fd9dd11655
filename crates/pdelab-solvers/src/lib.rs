//! Numerical solvers for the canonical 2D second-order PDEs.
//!
//! - [`HeatStepper`] / [`heat_steps`]: explicit five-point diffusion.
//! - [`WaveStepper`] / [`wave_steps`]: explicit leapfrog for the wave equation.
//! - [`LaplaceSolver`] / [`laplace_solve`]: Jacobi relaxation to steady state.
//!
//! The two time-marching schemes check their CFL condition once, before any
//! step is taken, and then hand out a lazy, finite snapshot iterator. The
//! relaxation solver never fails for non-convergence; it returns the field
//! together with a [`ConvergenceReport`].
//!
//! All stencils read exclusively from the previous generation and write into
//! a separate buffer (Jacobi-style); buffers are swapped, never aliased.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod heat;
pub mod laplace;
pub mod scheme;
mod stencil;
pub mod wave;

pub use heat::{heat_steps, HeatStepper, HeatSteps};
pub use laplace::{laplace_solve, ConvergenceReason, ConvergenceReport, LaplaceSolver};
pub use scheme::ExplicitScheme;
pub use wave::{wave_steps, WaveStepper, WaveSteps};
