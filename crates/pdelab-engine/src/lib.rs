//! Explicit per-run configuration and run entrypoints for pdelab.
//!
//! A run is described by a plain record ([`HeatConfig`], [`WaveConfig`],
//! [`LaplaceConfig`]) whose `Default` reproduces the classic demo setup.
//! Initial and boundary data can be given as values, as one of the built-in
//! shapes, or as a formula evaluated by [`pdelab_expr`]. The record is
//! validated once, then:
//!
//! - [`run_heat`] and [`run_wave`] return pull-based frame iterators;
//! - [`run_laplace`] relaxes to steady state and returns a
//!   [`LaplaceOutcome`];
//! - [`classify`] reports the type and normal form of a coefficient set.
//!
//! ```
//! use pdelab_engine::{run_heat, GridSpec, HeatConfig};
//!
//! let config = HeatConfig {
//!     grid: GridSpec::cell(20, 20, 1.0, 1.0),
//!     total_time: 0.005,
//!     ..HeatConfig::default()
//! };
//! let frames: Vec<_> = run_heat(&config).unwrap().collect();
//! assert_eq!(frames.len(), 5);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod run;

pub use config::{
    BoundarySpec, EdgeSpec, GridSpec, HeatConfig, InitialCondition, LaplaceConfig, WaveConfig,
};
pub use error::ConfigError;
pub use metrics::RunMetrics;
pub use report::{classify, classify_with, ClassificationReport};
pub use run::{run_heat, run_laplace, run_wave, HeatRun, LaplaceOutcome, WaveRun};
