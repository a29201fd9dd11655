//! Core types for the pdelab numerical engine.
//!
//! This is the leaf crate of the workspace. It defines the uniform
//! rectangular [`Grid`], the dense [`Field`] storage every solver mutates,
//! per-edge [`Boundary`] conditions, and the error types shared by the
//! steppers, the relaxation solver, and the engine.
//!
//! # Orientation
//!
//! A field has shape `(nx, ny)` and is indexed `u[[i, j]]` with `i` along
//! `x` and `j` along `y`. The left edge is `u[[0, ..]]`, the right edge
//! `u[[nx - 1, ..]]`, the bottom edge `u[[.., 0]]` and the top edge
//! `u[[.., ny - 1]]`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod field;
pub mod grid;

pub use boundary::{Boundary, Edge, EdgeValues};
pub use error::{BoundaryError, GridError, SolverError, StabilityError};
pub use field::Field;
pub use grid::{Grid, Spacing};
