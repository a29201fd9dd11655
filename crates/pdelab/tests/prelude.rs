use pdelab::prelude::*;

#[test]
fn numeric_entrypoints_are_reachable() {
    let grid = Grid::new(11, 11, 1.0, 1.0).unwrap();

    let mut u0 = grid.zeros();
    u0[[5, 5]] = 1.0;
    assert_eq!(heat_steps(&grid, 0.1, 0.001, 0.01, u0.clone()).unwrap().len(), 10);
    assert_eq!(wave_steps(&grid, 1.0, 0.01, 7, u0, &grid.zeros()).unwrap().len(), 7);

    let bc = Boundary::uniform(0.0).left(1.0);
    let (_, report) = laplace_solve(&grid, Some(&bc), &grid.zeros(), 1e-5, 1e-4, 10_000).unwrap();
    assert_eq!(report.reason, ConvergenceReason::Tolerance);

    assert_eq!(classify_pde(1.0, 0.0, 1.0), PdeType::Elliptic);
    let nf = reduce_pde(2.0, 0.0, 2.0, 1.0, 2.0, 3.0, 4.0);
    assert_eq!((nf.theta, nf.lambda1, nf.lambda2), (0.0, 2.0, 2.0));
}

#[test]
fn stability_errors_are_typed() {
    let grid = Grid::new(11, 11, 1.0, 1.0).unwrap();
    let err = heat_steps(&grid, 1.0, 0.01, 1.0, grid.zeros()).unwrap_err();
    assert!(matches!(err, SolverError::Unstable(StabilityError { .. })));
    let err = wave_steps(&grid, 10.0, 0.01, 1, grid.zeros(), &grid.zeros()).unwrap_err();
    assert!(matches!(err, SolverError::Unstable(_)));
}

#[test]
fn formulas_feed_the_engine() {
    let e = Expr::parse("x*y").unwrap();
    assert_eq!(e.eval(&Vars::new().with("x", 2.0).with("y", 3.0)), Ok(6.0));
    let out = run_laplace(&LaplaceConfig {
        grid: GridSpec::nodal(7, 7, 1.0, 1.0),
        boundary: Some(BoundarySpec::uniform(0.0).bottom(EdgeSpec::expression("s*(1-s)"))),
        ..LaplaceConfig::default()
    })
    .unwrap();
    assert!(out.report.converged);
    assert_eq!(out.field[[3, 0]], 0.25);
}
