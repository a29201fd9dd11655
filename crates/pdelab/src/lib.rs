//! pdelab: a numerical engine for the canonical 2D second-order PDEs.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all pdelab sub-crates. For most users, adding `pdelab` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use pdelab::prelude::*;
//!
//! // Steady state on a 9x9 grid: left edge held at 1, the rest at 0.
//! let grid = Grid::new(9, 9, 1.0, 1.0).unwrap();
//! let (u, report) = laplace_solve(&grid, None, &grid.zeros(), 1e-5, 1e-4, 10_000).unwrap();
//! assert!(report.converged);
//! assert!(u[[4, 4]] > 0.0 && u[[4, 4]] < 1.0);
//!
//! // A diffusion run, pulled one frame at a time.
//! let config = HeatConfig {
//!     grid: GridSpec::cell(20, 20, 1.0, 1.0),
//!     total_time: 0.003,
//!     ..HeatConfig::default()
//! };
//! let mut run = run_heat(&config).unwrap();
//! while let Some(frame) = run.next() {
//!     assert_eq!(frame.dim(), (20, 20));
//! }
//! assert_eq!(run.metrics().frames, 3);
//!
//! // Type of u_xx + 4 u_xy + u_yy.
//! assert_eq!(classify_pde(1.0, 2.0, 1.0), PdeType::Hyperbolic);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `pdelab-core` | `Grid`, `Field`, boundaries, error types |
//! | [`solvers`] | `pdelab-solvers` | Heat and wave steppers, Jacobi relaxation |
//! | [`classify`] | `pdelab-classify` | PDE type and normal-form reduction |
//! | [`expr`] | `pdelab-expr` | Restricted formula evaluator |
//! | [`engine`] | `pdelab-engine` | Run configuration, entrypoints, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grids, fields, boundaries, and errors (`pdelab-core`).
///
/// Start with [`types::Grid`] and [`types::Boundary`]; a
/// [`types::Field`] is an `ndarray` `Array2<f64>` of the grid's shape.
pub use pdelab_core as types;

/// Time-marching steppers and the relaxation solver (`pdelab-solvers`).
///
/// [`solvers::heat_steps`] and [`solvers::wave_steps`] return lazy
/// snapshot iterators; [`solvers::laplace_solve`] returns the steady field
/// with a [`solvers::ConvergenceReport`].
pub use pdelab_solvers as solvers;

/// Classification and reduction (`pdelab-classify`).
pub use pdelab_classify as classify;

/// Formula evaluation for initial and boundary data (`pdelab-expr`).
pub use pdelab_expr as expr;

/// Run configuration and entrypoints (`pdelab-engine`).
///
/// [`engine::HeatConfig`], [`engine::WaveConfig`] and
/// [`engine::LaplaceConfig`] default to the classic demo setups.
pub use pdelab_engine as engine;

/// Common imports for typical pdelab usage.
///
/// ```rust
/// use pdelab::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use pdelab_core::{Boundary, Edge, EdgeValues, Field, Grid, Spacing};

    // Errors
    pub use pdelab_core::{BoundaryError, GridError, SolverError, StabilityError};
    pub use pdelab_engine::ConfigError;
    pub use pdelab_expr::ExprError;

    // Solvers
    pub use pdelab_solvers::{
        heat_steps, laplace_solve, wave_steps, ConvergenceReason, ConvergenceReport,
        ExplicitScheme, HeatStepper, LaplaceSolver, WaveStepper,
    };

    // Classification
    pub use pdelab_classify::{
        classify_pde, reduce_pde, Classifier, NormalForm, PdeCoefficients, PdeType,
    };

    // Expressions
    pub use pdelab_expr::{Expr, Vars};

    // Engine
    pub use pdelab_engine::{
        classify, run_heat, run_laplace, run_wave, BoundarySpec, EdgeSpec, GridSpec, HeatConfig,
        InitialCondition, LaplaceConfig, RunMetrics, WaveConfig,
    };
}
