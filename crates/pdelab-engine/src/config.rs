//! Explicit per-run configuration records.
//!
//! One record per problem kind, each with a `Default` that reproduces the
//! classic demo setups and a `validate()` that checks every structural
//! invariant before any computation. Nothing here is global: a record is
//! built, validated, and handed to one of the `run_*` entrypoints.

use pdelab_core::{Boundary, Edge, EdgeValues, Field, Grid, SolverError, Spacing};
use pdelab_expr::Expr;
use pdelab_solvers::{heat_steps, wave_steps, HeatSteps, LaplaceSolver, WaveSteps};

use crate::error::ConfigError;

// ── GridSpec ───────────────────────────────────────────────────────

/// Dimensions and spacing convention of the grid to build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    /// Points along `x`.
    pub nx: usize,
    /// Points along `y`.
    pub ny: usize,
    /// Domain length along `x`.
    pub lx: f64,
    /// Domain length along `y`.
    pub ly: f64,
    /// How `dx`, `dy` derive from the lengths.
    pub spacing: Spacing,
}

impl GridSpec {
    /// `dx = lx / (nx - 1)`.
    pub fn nodal(nx: usize, ny: usize, lx: f64, ly: f64) -> Self {
        Self {
            nx,
            ny,
            lx,
            ly,
            spacing: Spacing::Nodal,
        }
    }

    /// `dx = lx / nx`.
    pub fn cell(nx: usize, ny: usize, lx: f64, ly: f64) -> Self {
        Self {
            spacing: Spacing::Cell,
            ..Self::nodal(nx, ny, lx, ly)
        }
    }

    /// Construct the grid.
    pub fn build(&self) -> Result<Grid, ConfigError> {
        Ok(Grid::with_spacing(
            self.nx,
            self.ny,
            self.lx,
            self.ly,
            self.spacing,
        )?)
    }
}

// ── InitialCondition ───────────────────────────────────────────────

/// How to fill a field at `t = 0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InitialCondition {
    /// All zeros.
    #[default]
    Zero,
    /// Every point set to one value.
    Constant(f64),
    /// `value` strictly inside the disk `(x-cx)^2 + (y-cy)^2 < radius_sq`,
    /// zero elsewhere.
    HotDisk {
        /// Centre `x`.
        cx: f64,
        /// Centre `y`.
        cy: f64,
        /// Squared radius.
        radius_sq: f64,
        /// Value inside the disk.
        value: f64,
    },
    /// `amplitude * exp(-sharpness * ((x-cx)^2 + (y-cy)^2))`.
    Gaussian {
        /// Centre `x`.
        cx: f64,
        /// Centre `y`.
        cy: f64,
        /// Decay rate.
        sharpness: f64,
        /// Peak value.
        amplitude: f64,
    },
    /// A formula in `x` and `y`, see [`pdelab_expr`].
    Expression(String),
    /// Explicit values; must match the grid shape.
    Values(Field),
}

impl InitialCondition {
    /// Unit hot disk of squared radius `0.01` centred on `(0.5, 0.5)`.
    pub fn hot_disk() -> Self {
        Self::HotDisk {
            cx: 0.5,
            cy: 0.5,
            radius_sq: 0.01,
            value: 1.0,
        }
    }

    /// Unit Gaussian pulse `exp(-200 r^2)` centred on `(0.5, 0.5)`.
    pub fn gaussian_pulse() -> Self {
        Self::Gaussian {
            cx: 0.5,
            cy: 0.5,
            sharpness: 200.0,
            amplitude: 1.0,
        }
    }

    /// A formula; parsed when the field is built.
    pub fn expression(src: impl Into<String>) -> Self {
        Self::Expression(src.into())
    }

    /// Materialise on `grid`. `what` names the input in errors.
    pub fn build(&self, grid: &Grid, what: &'static str) -> Result<Field, ConfigError> {
        let field = match self {
            Self::Zero => grid.zeros(),
            Self::Constant(v) => Field::from_elem(grid.shape(), *v),
            Self::HotDisk {
                cx,
                cy,
                radius_sq,
                value,
            } => {
                if !(*radius_sq >= 0.0) {
                    return Err(ConfigError::Invalid {
                        reason: format!("{what}: hot disk radius_sq must be >= 0, got {radius_sq}"),
                    });
                }
                Field::from_shape_fn(grid.shape(), |(i, j)| {
                    let r2 = (grid.x(i) - cx).powi(2) + (grid.y(j) - cy).powi(2);
                    if r2 < *radius_sq {
                        *value
                    } else {
                        0.0
                    }
                })
            }
            Self::Gaussian {
                cx,
                cy,
                sharpness,
                amplitude,
            } => {
                if !(*sharpness >= 0.0) {
                    return Err(ConfigError::Invalid {
                        reason: format!("{what}: gaussian sharpness must be >= 0, got {sharpness}"),
                    });
                }
                Field::from_shape_fn(grid.shape(), |(i, j)| {
                    let r2 = (grid.x(i) - cx).powi(2) + (grid.y(j) - cy).powi(2);
                    amplitude * (-sharpness * r2).exp()
                })
            }
            Self::Expression(src) => Expr::parse(src)
                .and_then(|e| e.eval_grid(grid))
                .map_err(|source| ConfigError::Expression { what, source })?,
            Self::Values(values) => {
                grid.check_shape(values)?;
                values.clone()
            }
        };
        Ok(field)
    }
}

impl From<f64> for InitialCondition {
    fn from(v: f64) -> Self {
        Self::Constant(v)
    }
}

impl From<Field> for InitialCondition {
    fn from(values: Field) -> Self {
        Self::Values(values)
    }
}

// ── BoundarySpec ───────────────────────────────────────────────────

/// Data for one edge.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeSpec {
    /// The same value along the whole edge.
    Constant(f64),
    /// One value per edge point.
    Values(Vec<f64>),
    /// A formula in `x`, `y` and `s` (the coordinate along the edge).
    Expression(String),
}

impl EdgeSpec {
    /// A formula; parsed when the boundary is built.
    pub fn expression(src: impl Into<String>) -> Self {
        Self::Expression(src.into())
    }

    /// Materialise along `edge` of `grid`.
    pub fn build(&self, grid: &Grid, edge: Edge) -> Result<EdgeValues, ConfigError> {
        match self {
            Self::Constant(v) => Ok(EdgeValues::Constant(*v)),
            Self::Values(vs) => Ok(EdgeValues::Values(vs.clone())),
            Self::Expression(src) => Expr::parse(src)
                .and_then(|e| e.eval_edge(grid, edge))
                .map(EdgeValues::Values)
                .map_err(|source| ConfigError::Expression {
                    what: edge_label(edge),
                    source,
                }),
        }
    }
}

fn edge_label(edge: Edge) -> &'static str {
    match edge {
        Edge::Left => "left boundary",
        Edge::Right => "right boundary",
        Edge::Top => "top boundary",
        Edge::Bottom => "bottom boundary",
    }
}

impl From<f64> for EdgeSpec {
    fn from(v: f64) -> Self {
        Self::Constant(v)
    }
}

impl From<Vec<f64>> for EdgeSpec {
    fn from(vs: Vec<f64>) -> Self {
        Self::Values(vs)
    }
}

/// Boundary data for all four edges.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundarySpec {
    /// `u[[0, ..]]`.
    pub left: EdgeSpec,
    /// `u[[nx - 1, ..]]`.
    pub right: EdgeSpec,
    /// `u[[.., ny - 1]]`.
    pub top: EdgeSpec,
    /// `u[[.., 0]]`.
    pub bottom: EdgeSpec,
}

impl BoundarySpec {
    /// The same constant on every edge.
    pub fn uniform(v: f64) -> Self {
        Self {
            left: v.into(),
            right: v.into(),
            top: v.into(),
            bottom: v.into(),
        }
    }

    /// Set the left edge.
    pub fn left(mut self, spec: impl Into<EdgeSpec>) -> Self {
        self.left = spec.into();
        self
    }

    /// Set the right edge.
    pub fn right(mut self, spec: impl Into<EdgeSpec>) -> Self {
        self.right = spec.into();
        self
    }

    /// Set the top edge.
    pub fn top(mut self, spec: impl Into<EdgeSpec>) -> Self {
        self.top = spec.into();
        self
    }

    /// Set the bottom edge.
    pub fn bottom(mut self, spec: impl Into<EdgeSpec>) -> Self {
        self.bottom = spec.into();
        self
    }

    /// Materialise and validate against `grid`.
    pub fn build(&self, grid: &Grid) -> Result<Boundary, ConfigError> {
        let bc = self.materialise(grid)?;
        bc.validate(grid).map_err(ConfigError::from)?;
        Ok(bc)
    }

    /// Materialise with edge lengths checked but values unchecked. The
    /// relaxation solver reports non-finite values itself.
    fn materialise(&self, grid: &Grid) -> Result<Boundary, ConfigError> {
        let mut bc = Boundary::uniform(0.0);
        for (edge, spec) in [
            (Edge::Left, &self.left),
            (Edge::Right, &self.right),
            (Edge::Top, &self.top),
            (Edge::Bottom, &self.bottom),
        ] {
            bc = bc.with_edge(edge, spec.build(grid, edge)?);
        }
        bc.check_lengths(grid).map_err(ConfigError::from)?;
        Ok(bc)
    }
}

impl Default for BoundarySpec {
    /// Left edge 1, the others 0.
    fn default() -> Self {
        Self::uniform(0.0).left(1.0)
    }
}

// ── HeatConfig ─────────────────────────────────────────────────────

/// A diffusion run.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatConfig {
    /// Grid to run on. Default: 100x100 on the unit square, cell spacing.
    pub grid: GridSpec,
    /// Diffusivity. Default: `0.01`.
    pub alpha: f64,
    /// Timestep. Default: `0.001`.
    pub dt: f64,
    /// Simulated time; `floor(total_time / dt)` frames. Default: `2.0`.
    pub total_time: f64,
    /// Initial temperature. Default: [`InitialCondition::hot_disk`].
    pub initial: InitialCondition,
    /// Reapplied after every step when set. Default: `None`, which keeps
    /// the initial border values.
    pub boundary: Option<BoundarySpec>,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::cell(100, 100, 1.0, 1.0),
            alpha: 0.01,
            dt: 0.001,
            total_time: 2.0,
            initial: InitialCondition::hot_disk(),
            boundary: None,
        }
    }
}

impl HeatConfig {
    /// Check every invariant without running a step.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prepare().map(drop)
    }

    pub(crate) fn prepare(&self) -> Result<(Grid, HeatSteps), ConfigError> {
        // 1. Grid dimensions.
        let grid = self.grid.build()?;
        // 2. Initial data.
        let initial = self.initial.build(&grid, "initial field")?;
        // 3. Parameters, CFL, and initial data shape and finiteness.
        let mut steps = heat_steps(&grid, self.alpha, self.dt, self.total_time, initial)?;
        // 4. Boundary.
        if let Some(spec) = &self.boundary {
            steps = steps.with_boundary(spec.build(&grid)?)?;
        }
        Ok((grid, steps))
    }
}

// ── WaveConfig ─────────────────────────────────────────────────────

/// A wave-equation run.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveConfig {
    /// Grid to run on. Default: 100x100 on the unit square, cell spacing.
    pub grid: GridSpec,
    /// Wave speed. Default: `1.0`.
    pub c: f64,
    /// Timestep. Default: `0.001`.
    pub dt: f64,
    /// Frames to produce. Default: `300`.
    pub num_frames: usize,
    /// `u(x, y, 0)`. Default: [`InitialCondition::gaussian_pulse`].
    pub displacement: InitialCondition,
    /// `u_t(x, y, 0)`. Default: zero.
    pub velocity: InitialCondition,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::cell(100, 100, 1.0, 1.0),
            c: 1.0,
            dt: 0.001,
            num_frames: 300,
            displacement: InitialCondition::gaussian_pulse(),
            velocity: InitialCondition::Zero,
        }
    }
}

impl WaveConfig {
    /// Check every invariant without running a step.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prepare().map(drop)
    }

    pub(crate) fn prepare(&self) -> Result<(Grid, WaveSteps), ConfigError> {
        // 1. Grid dimensions.
        let grid = self.grid.build()?;
        // 2. Initial data.
        let u0 = self.displacement.build(&grid, "initial displacement")?;
        let ut0 = self.velocity.build(&grid, "initial velocity")?;
        // 3. Parameters, CFL, and initial data shape and finiteness.
        let steps = wave_steps(&grid, self.c, self.dt, self.num_frames, u0, &ut0)?;
        Ok((grid, steps))
    }
}

// ── LaplaceConfig ──────────────────────────────────────────────────

/// A steady-state relaxation run.
#[derive(Clone, Debug, PartialEq)]
pub struct LaplaceConfig {
    /// Grid to run on. Default: 100x100 on the unit square, nodal spacing.
    pub grid: GridSpec,
    /// Edge values. Default: `None`, meaning left 1 and the others 0.
    pub boundary: Option<BoundarySpec>,
    /// Starting iterate. Default: zero.
    pub initial: InitialCondition,
    /// Per-sweep change threshold. Default: `1e-5`.
    pub tol: f64,
    /// Flat-field threshold. Default: `1e-4`.
    pub uniform_tol: f64,
    /// Sweep limit. Default: `10_000`.
    pub max_iter: usize,
}

impl Default for LaplaceConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::nodal(100, 100, 1.0, 1.0),
            boundary: None,
            initial: InitialCondition::Zero,
            tol: 1e-5,
            uniform_tol: 1e-4,
            max_iter: 10_000,
        }
    }
}

/// Everything a relaxation run needs, validated.
#[derive(Debug)]
pub(crate) struct LaplaceSetup {
    pub grid: Grid,
    pub boundary: Option<Boundary>,
    pub initial: Field,
    pub solver: LaplaceSolver,
}

impl LaplaceConfig {
    /// Check every invariant without relaxing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prepare().map(drop)
    }

    pub(crate) fn prepare(&self) -> Result<LaplaceSetup, ConfigError> {
        // 1. Thresholds. The solver rechecks these; failing here keeps
        //    validate() authoritative.
        for (name, v) in [("tol", self.tol), ("uniform_tol", self.uniform_tol)] {
            if !(v >= 0.0) || !v.is_finite() {
                return Err(ConfigError::Invalid {
                    reason: format!("{name} must be finite and >= 0, got {v}"),
                });
            }
        }
        // 2. Grid dimensions.
        let grid = self.grid.build()?;
        // 3. Boundary shape. Non-finite values end the run with a
        //    NonFinite report instead.
        let boundary = self
            .boundary
            .as_ref()
            .map(|spec| spec.materialise(&grid))
            .transpose()?;
        // 4. Initial iterate.
        let initial = self.initial.build(&grid, "initial field")?;
        let solver = LaplaceSolver::default()
            .tolerance(self.tol)
            .uniform_tolerance(self.uniform_tol)
            .max_iterations(self.max_iter);
        Ok(LaplaceSetup {
            grid,
            boundary,
            initial,
            solver,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdelab_core::BoundaryError;
    use pdelab_expr::ExprError;
    use proptest::prelude::*;

    fn small() -> GridSpec {
        GridSpec::nodal(11, 11, 1.0, 1.0)
    }

    #[test]
    fn defaults_validate() {
        assert!(HeatConfig::default().validate().is_ok());
        assert!(WaveConfig::default().validate().is_ok());
        assert!(LaplaceConfig::default().validate().is_ok());
    }

    #[test]
    fn default_grids_use_the_classic_spacing() {
        let heat = HeatConfig::default().grid.build().unwrap();
        assert_eq!(heat.dx(), 0.01);
        let laplace = LaplaceConfig::default().grid.build().unwrap();
        assert_eq!(laplace.dx(), 1.0 / 99.0);
    }

    #[test]
    fn hot_disk_is_strictly_inside() {
        let grid = Grid::new(21, 21, 1.0, 1.0).unwrap();
        let f = InitialCondition::hot_disk()
            .build(&grid, "initial field")
            .unwrap();
        assert_eq!(f[[10, 10]], 1.0);
        assert_eq!(f[[9, 10]], 1.0);
        assert_eq!(f[[10, 11]], 1.0);
        assert_eq!(f[[13, 10]], 0.0);
        assert_eq!(f[[0, 0]], 0.0);
    }

    #[test]
    fn gaussian_matches_formula() {
        let grid = Grid::new(11, 11, 1.0, 1.0).unwrap();
        let f = InitialCondition::gaussian_pulse()
            .build(&grid, "initial displacement")
            .unwrap();
        assert_eq!(f[[5, 5]], 1.0);
        let r2 = (0.0f64 - 0.5).powi(2) * 2.0;
        assert!((f[[0, 0]] - (-200.0 * r2).exp()).abs() < 1e-15);
    }

    #[test]
    fn bad_disk_radius_is_invalid() {
        let grid = Grid::new(3, 3, 1.0, 1.0).unwrap();
        let ic = InitialCondition::HotDisk {
            cx: 0.5,
            cy: 0.5,
            radius_sq: f64::NAN,
            value: 1.0,
        };
        assert!(matches!(
            ic.build(&grid, "initial field"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn values_must_match_grid() {
        let grid = Grid::new(3, 3, 1.0, 1.0).unwrap();
        let ic = InitialCondition::from(Field::zeros((2, 3)));
        assert_eq!(
            ic.build(&grid, "initial field"),
            Err(ConfigError::Solver(SolverError::ShapeMismatch {
                expected: (3, 3),
                got: (2, 3)
            }))
        );
    }

    #[test]
    fn expression_errors_name_the_input() {
        let cfg = WaveConfig {
            grid: small(),
            velocity: InitialCondition::expression("x +"),
            ..WaveConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::Expression { what, source }) => {
                assert_eq!(what, "initial velocity");
                assert!(matches!(source, ExprError::UnexpectedEnd { .. }));
            }
            other => panic!("expected expression error, got {other:?}"),
        }
    }

    #[test]
    fn edge_expressions_see_edge_coordinate() {
        let grid = Grid::new(5, 5, 1.0, 1.0).unwrap();
        let bc = BoundarySpec::uniform(0.0)
            .top(EdgeSpec::expression("4*s"))
            .build(&grid)
            .unwrap();
        assert_eq!(
            bc.edge(Edge::Top),
            &EdgeValues::Values(vec![0.0, 1.0, 2.0, 3.0, 4.0])
        );
    }

    #[test]
    fn edge_expression_errors_name_the_edge() {
        let grid = Grid::new(5, 5, 1.0, 1.0).unwrap();
        let err = BoundarySpec::default()
            .right(EdgeSpec::expression("exec(1)"))
            .build(&grid)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Expression {
                what: "right boundary",
                ..
            }
        ));
    }

    #[test]
    fn wrong_edge_length_is_a_boundary_error() {
        let grid = Grid::new(5, 5, 1.0, 1.0).unwrap();
        let err = BoundarySpec::default()
            .bottom(vec![0.0; 4])
            .build(&grid)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Solver(SolverError::Boundary(BoundaryError::EdgeLength {
                expected: 5,
                got: 4,
                ..
            }))
        ));
    }

    #[test]
    fn unstable_heat_is_rejected_by_validate() {
        let cfg = HeatConfig {
            dt: 0.1,
            ..HeatConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Solver(SolverError::Unstable(_)))
        ));
    }

    #[test]
    fn invalid_grid_is_rejected() {
        let cfg = LaplaceConfig {
            grid: GridSpec::nodal(1, 10, 1.0, 1.0),
            ..LaplaceConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Solver(SolverError::Grid(_)))
        ));
    }

    #[test]
    fn negative_tolerance_is_invalid() {
        let cfg = LaplaceConfig {
            grid: small(),
            tol: -1.0,
            ..LaplaceConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn non_finite_formula_output_is_rejected_for_heat() {
        let cfg = HeatConfig {
            grid: small(),
            initial: InitialCondition::expression("1/x"),
            ..HeatConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::Solver(SolverError::NonFiniteInput {
                what: "initial field"
            }))
        );
    }

    #[test]
    fn non_finite_laplace_data_passes_validation() {
        let cfg = LaplaceConfig {
            grid: small(),
            initial: InitialCondition::expression("1/x"),
            boundary: Some(BoundarySpec::uniform(0.0).left(f64::INFINITY)),
            ..LaplaceConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    proptest! {
        #[test]
        fn heat_validation_follows_cfl(alpha in 0.001f64..0.1, r in 0.05f64..0.95) {
            // 11x11 nodal grid: dx = dy = 0.1, so r = alpha * dt * 200.
            let dt = r / (alpha * 200.0);
            let cfg = HeatConfig {
                grid: small(),
                alpha,
                dt,
                total_time: dt,
                ..HeatConfig::default()
            };
            let cfl = alpha * dt * (1.0 / (0.1f64 * 0.1) + 1.0 / (0.1f64 * 0.1));
            prop_assert_eq!(cfg.validate().is_ok(), cfl < 0.5);
        }
    }
}
