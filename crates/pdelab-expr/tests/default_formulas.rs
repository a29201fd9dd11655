use pdelab_core::{Edge, Grid};
use pdelab_expr::{Expr, ExprError};

#[test]
fn gaussian_pulse_peaks_at_centre() {
    let grid = Grid::new(101, 101, 1.0, 1.0).unwrap();
    let u0 = Expr::parse("np.exp(-200*((x-0.5)**2 + (y-0.5)**2))")
        .unwrap()
        .eval_grid(&grid)
        .unwrap();
    assert_eq!(u0[[50, 50]], 1.0);
    assert!(u0[[0, 0]] < 1e-40);
    assert!((u0[[60, 50]] - (-2.0f64).exp()).abs() < 1e-12);
}

#[test]
fn heat_bump_is_symmetric() {
    let grid = Grid::new(21, 21, 1.0, 1.0).unwrap();
    let f = Expr::parse("np.exp(-100*((x-0.5)**2 + (y-0.5)**2))")
        .unwrap()
        .eval_grid(&grid)
        .unwrap();
    for i in 0..21 {
        for j in 0..21 {
            assert!((f[[i, j]] - f[[20 - i, j]]).abs() < 1e-12);
            assert!((f[[i, j]] - f[[j, i]]).abs() < 1e-12);
        }
    }
}

#[test]
fn sine_boundary_along_left_edge() {
    let grid = Grid::new(5, 5, 1.0, 1.0).unwrap();
    let left = Expr::parse("np.sin(np.pi * s)")
        .unwrap()
        .eval_edge(&grid, Edge::Left)
        .unwrap();
    assert!(left[0].abs() < 1e-15);
    assert!((left[2] - 1.0).abs() < 1e-15);
    assert!(left[4].abs() < 1e-15);
}

#[test]
fn code_injection_is_not_expressible() {
    for src in [
        "__import__('os').system('ls')",
        "open('/etc/passwd').read()",
        "x.__class__",
        "lambda: 0",
        "[x for x in y]",
    ] {
        let err = Expr::parse(src).unwrap_err();
        assert!(
            matches!(
                err,
                ExprError::UnexpectedChar { .. }
                    | ExprError::UnknownFunction { .. }
                    | ExprError::UnknownVariable { .. }
                    | ExprError::UnexpectedToken { .. }
            ),
            "{src}: {err}"
        );
    }
}
