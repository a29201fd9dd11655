//! Shared five-point stencil kernels.
//!
//! Every kernel reads only from its input and is evaluated at interior
//! points `1 <= i < nx - 1`, `1 <= j < ny - 1`; callers decide what happens
//! on the border.

use pdelab_core::Field;

/// Five-point Laplacian `u_xx + u_yy` at interior point `(i, j)`.
#[inline]
pub(crate) fn laplacian(u: &Field, i: usize, j: usize, dx2: f64, dy2: f64) -> f64 {
    let c = u[[i, j]];
    (u[[i + 1, j]] - 2.0 * c + u[[i - 1, j]]) / dx2 + (u[[i, j + 1]] - 2.0 * c + u[[i, j - 1]]) / dy2
}

/// Unweighted mean of the four axis neighbours of `(i, j)`.
#[inline]
pub(crate) fn neighbour_mean(u: &Field, i: usize, j: usize) -> f64 {
    0.25 * (u[[i + 1, j]] + u[[i - 1, j]] + u[[i, j + 1]] + u[[i, j - 1]])
}

/// Interior index ranges `(1..nx-1, 1..ny-1)` for a field.
#[inline]
pub(crate) fn interior(u: &Field) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
    let (nx, ny) = u.dim();
    (1..nx.saturating_sub(1), 1..ny.saturating_sub(1))
}
