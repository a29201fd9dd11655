//! Parsed expressions and their evaluation over grids.

use std::fmt;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use pdelab_core::{Edge, Field, Grid};
use smallvec::SmallVec;

use crate::ast::Node;
use crate::error::ExprError;
use crate::parser;

/// Maximum nesting of the parser and height of an expression tree.
pub const MAX_DEPTH: usize = 64;

/// Variables a formula may mention: the point coordinates and the
/// coordinate along an edge.
const STANDARD_VARIABLES: &[&str] = &["x", "y", "s"];

/// Named values for [`Expr::eval`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vars {
    values: IndexMap<String, f64>,
}

impl Vars {
    /// No bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Bind or rebind `name`.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Value bound to `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A parsed formula.
///
/// Evaluation never fails numerically: domain errors produce `NaN` and
/// overflow produces infinities, exactly as the underlying `f64`
/// operations do. Callers that need finite data check the result.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    source: String,
    root: Node,
    variables: IndexSet<String>,
}

impl Expr {
    /// Parse a formula over `x`, `y` and `s`.
    pub fn parse(src: &str) -> Result<Self, ExprError> {
        Self::parse_with(src, STANDARD_VARIABLES)
    }

    /// Parse a formula over the given variable names.
    pub fn parse_with(src: &str, variables: &[&str]) -> Result<Self, ExprError> {
        let parsed = parser::parse(src, variables)?;
        Ok(Self {
            source: src.to_string(),
            root: parsed.root,
            variables: parsed.variables,
        })
    }

    /// The text this was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root of the syntax tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Variables that occur, in order of first appearance.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(String::as_str)
    }

    /// `true` if the formula mentions no variable.
    pub fn is_constant(&self) -> bool {
        self.variables.is_empty()
    }

    /// Evaluate at one point.
    pub fn eval(&self, vars: &Vars) -> Result<f64, ExprError> {
        let slots = self
            .variables
            .iter()
            .map(|name| {
                vars.get(name).ok_or_else(|| ExprError::UnknownVariable {
                    name: name.clone(),
                    pos: None,
                })
            })
            .collect::<Result<SmallVec<[f64; 4]>, _>>()?;
        Ok(self.root.eval(&slots))
    }

    /// Evaluate at every grid point with `x`, `y` bound to its
    /// coordinates. Fails if the formula mentions `s`.
    pub fn eval_grid(&self, grid: &Grid) -> Result<Field, ExprError> {
        let map = self.bind(&["x", "y"])?;
        Ok(Field::from_shape_fn(grid.shape(), |(i, j)| {
            let point = [grid.x(i), grid.y(j)];
            let slots: SmallVec<[f64; 4]> = map.iter().map(|&k| point[k]).collect();
            self.root.eval(&slots)
        }))
    }

    /// Evaluate at every point of `edge`, in the edge's own order, with
    /// `x`, `y` bound to the point's coordinates and `s` to the coordinate
    /// that varies along the edge (`y` on left and right, `x` on top and
    /// bottom).
    pub fn eval_edge(&self, grid: &Grid, edge: Edge) -> Result<Vec<f64>, ExprError> {
        let map = self.bind(STANDARD_VARIABLES)?;
        Ok((0..edge.len(grid))
            .map(|k| {
                let (x, y) = edge.coords(grid, k);
                let s = match edge {
                    Edge::Left | Edge::Right => y,
                    Edge::Top | Edge::Bottom => x,
                };
                let point = [x, y, s];
                let slots: SmallVec<[f64; 4]> = map.iter().map(|&k| point[k]).collect();
                self.root.eval(&slots)
            })
            .collect())
    }

    /// For each variable slot, its index in `names`.
    fn bind(&self, names: &[&str]) -> Result<SmallVec<[usize; 4]>, ExprError> {
        self.variables
            .iter()
            .map(|v| {
                names
                    .iter()
                    .position(|n| n == v)
                    .ok_or_else(|| ExprError::UnknownVariable {
                        name: v.clone(),
                        pos: None,
                    })
            })
            .collect()
    }
}

impl FromStr for Expr {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
