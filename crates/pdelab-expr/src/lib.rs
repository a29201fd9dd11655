//! A small, closed arithmetic language for initial and boundary data.
//!
//! Formulas such as `exp(-200*((x-0.5)^2 + (y-0.5)^2))` are tokenized,
//! parsed into an AST, and evaluated pointwise over a
//! [`Grid`](pdelab_core::Grid) or along one of its edges. The language has
//! numbers, the variables `x`, `y` (and `s`, the coordinate along an
//! edge), the constants `pi` and `e`, the four arithmetic operators, `^`
//! (also spelled `**`), parentheses, and calls to a fixed set of elementary
//! functions. An `np.` prefix on names is accepted and ignored. Nothing
//! else can be expressed, and nesting depth is bounded.
//!
//! ```
//! use pdelab_expr::{Expr, Vars};
//!
//! let e = Expr::parse("np.sin(pi * x) * y^2").unwrap();
//! let v = e.eval(&Vars::new().with("x", 0.5).with("y", 3.0)).unwrap();
//! assert!((v - 9.0).abs() < 1e-12);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod ast;
pub mod error;
pub mod eval;
mod parser;
mod token;

pub use ast::{BinOp, Func, Node};
pub use error::ExprError;
pub use eval::{Expr, Vars, MAX_DEPTH};
