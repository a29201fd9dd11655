//! Reusable grids and fields.
//!
//! - [`unit_grid`]: square nodal grid on `[0, 1]^2`.
//! - [`hot_spot`]: zero field with a single hot point.
//! - [`random_field`]: reproducible uniform noise in `[0, 1)`.
//! - [`gaussian_bump`]: smooth bump centred in the domain.

use crate::{seeded, unit_f64};
use pdelab_core::{Field, Grid};

/// An `n × n` nodal grid on the unit square.
///
/// # Panics
///
/// Panics if `n < 2`.
pub fn unit_grid(n: usize) -> Grid {
    Grid::new(n, n, 1.0, 1.0).expect("unit grid needs n >= 2")
}

/// A zero field with `value` at `(i, j)`.
pub fn hot_spot(grid: &Grid, i: usize, j: usize, value: f64) -> Field {
    let mut u = grid.zeros();
    u[[i, j]] = value;
    u
}

/// Uniform noise in `[0, 1)`, identical for identical seeds.
pub fn random_field(grid: &Grid, seed: u64) -> Field {
    let mut rng = seeded(seed);
    let mut u = grid.zeros();
    for v in u.iter_mut() {
        *v = unit_f64(&mut rng);
    }
    u
}

/// `amplitude * exp(-sharpness * ((x - cx)^2 + (y - cy)^2))` at the domain
/// centre.
pub fn gaussian_bump(grid: &Grid, sharpness: f64, amplitude: f64) -> Field {
    let (cx, cy) = (grid.lx() / 2.0, grid.ly() / 2.0);
    Field::from_shape_fn(grid.shape(), |(i, j)| {
        let (dx, dy) = (grid.x(i) - cx, grid.y(j) - cy);
        amplitude * (-sharpness * (dx * dx + dy * dy)).exp()
    })
}
