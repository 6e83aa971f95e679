use tableau_lp::*;

const EPS: f64 = 0.00000001;

fn check_iterations(report: &Report) {
    for &phase in &[Phase::One, Phase::Two] {
        assert!(report.trace.iterations(phase) <= 100);
    }
}

pub fn assert_optimal(result: &SolveResult, expected_obj: f64, expected_x: &[(&str, f64)]) {
    match result {
        Ok(report) => {
            check_iterations(report);
            let sol = &report.solution;

            assert!(
                (sol.obj() - expected_obj).abs() < EPS,
                "obj: {}, expected: {}",
                sol.obj(),
                expected_obj
            );

            assert_eq!(sol.values().len(), expected_x.len());

            for (var, expected) in expected_x {
                let x_i = sol.value(var).unwrap();
                assert!(
                    (x_i - expected).abs() < EPS,
                    "{}: {}, expected: {}",
                    var,
                    x_i,
                    expected
                );
            }
        }

        Err(err) => panic!("not optimal: {:?}", err),
    }
}

pub fn assert_optimal_obj(result: &SolveResult, expected_obj: f64) {
    match result {
        Ok(report) => {
            check_iterations(report);

            assert!(
                (report.solution.obj() - expected_obj).abs() < EPS,
                "obj: {}, expected: {}",
                report.solution.obj(),
                expected_obj
            );
        }

        Err(err) => panic!("not optimal: {:?}", err),
    }
}

pub fn assert_error_kind(result: &SolveResult, kind: ErrorKind) {
    match result {
        Err(err) => assert_eq!(err.kind(), kind, "unexpected error: {}", err),
        Ok(report) => panic!("expected {:?}, got {:?}", kind, report.solution),
    }
}

pub fn assert_parse_error_at(result: &SolveResult, position: Option<usize>) {
    assert_error_kind(result, ErrorKind::Parse);

    if let Err(err) = result {
        assert_eq!(err.constraint_position(), position);
    }
}

pub struct TestProblem {
    pub objective: String,
    pub constraints: Vec<String>,
    pub direction: Direction,
    pub check_result: Box<dyn FnOnce(&SolveResult)>,
}

impl TestProblem {
    fn new<F: FnOnce(&SolveResult) + 'static>(
        objective: &str,
        constraints: &[&str],
        direction: Direction,
        check_result: F,
    ) -> Self {
        Self {
            objective: objective.to_string(),
            constraints: constraints.iter().map(|c| c.to_string()).collect(),
            direction,
            check_result: Box::new(check_result),
        }
    }
}

pub fn small_prob_max() -> TestProblem {
    TestProblem::new(
        "3x1+5x2",
        &["x1<=4", "2x2<=12", "3x1+2x2<=18"],
        Direction::Maximize,
        |result: &SolveResult| assert_optimal(result, 36., &[("x1", 2.), ("x2", 6.)]),
    )
}

pub fn small_prob_max_objective_row() -> TestProblem {
    TestProblem::new(
        "3x1+5x2",
        &["x1<=4", "2x2<=12", "3x1+2x2<=18"],
        Direction::Maximize,
        |result: &SolveResult| {
            assert_optimal(result, 36., &[("x1", 0.), ("x2", 0.)]);
        },
    )
}

pub fn equality_and_surplus_min() -> TestProblem {
    TestProblem::new(
        "x1+x2",
        &["x1+x2=5", "x1>=1"],
        Direction::Minimize,
        |result: &SolveResult| assert_optimal(result, 5., &[("x1", 1.), ("x2", 4.)]),
    )
}

//the rebuilt phase 2 row is optimal as built
pub fn equality_and_surplus_min_rebuilt() -> TestProblem {
    TestProblem::new(
        "x1+x2",
        &["x1+x2=5", "x1>=1"],
        Direction::Minimize,
        |result: &SolveResult| assert_optimal(result, 0., &[("x1", 1.), ("x2", 1.)]),
    )
}

pub fn two_surplus_min() -> TestProblem {
    TestProblem::new(
        "2x1+3x2",
        &["x1+x2>=4", "x1+3x2>=6"],
        Direction::Minimize,
        |result: &SolveResult| assert_optimal(result, 9., &[("x1", 3.), ("x2", 1.)]),
    )
}

pub fn equality_max() -> TestProblem {
    TestProblem::new(
        "x1+2x2",
        &["x1+x2=4", "x2<=3"],
        Direction::Maximize,
        |result: &SolveResult| assert_optimal(result, 7., &[("x1", 1.), ("x2", 3.)]),
    )
}

pub fn redundant_equality() -> TestProblem {
    TestProblem::new(
        "x1+x2",
        &["x1+x2=2", "2x1+2x2=4"],
        Direction::Maximize,
        |result: &SolveResult| assert_optimal_obj(result, 2.),
    )
}

pub fn tiny_coefficient() -> TestProblem {
    TestProblem::new(
        "x1",
        &["0.0000000001x1<=1"],
        Direction::Maximize,
        |result: &SolveResult| match result {
            Ok(report) => {
                let sol = &report.solution;
                assert!((sol.obj() / 1e10 - 1.).abs() < EPS, "obj: {}", sol.obj());
                assert!((sol.value("x1").unwrap() / 1e10 - 1.).abs() < EPS);
            }

            Err(err) => panic!("not optimal: {:?}", err),
        },
    )
}

pub fn no_valid_pivot_row() -> TestProblem {
    TestProblem::new(
        "x1",
        &["x1-x2<=10"],
        Direction::Maximize,
        |result: &SolveResult| assert_error_kind(result, ErrorKind::NoValidPivotRow),
    )
}

pub fn no_valid_pivot_row_two_vars() -> TestProblem {
    TestProblem::new(
        "x1+x2",
        &["x1-x2<=1"],
        Direction::Maximize,
        |result: &SolveResult| assert_error_kind(result, ErrorKind::NoValidPivotRow),
    )
}

pub fn infeasible() -> TestProblem {
    TestProblem::new(
        "x1",
        &["x1<=1", "x1>=2"],
        Direction::Maximize,
        |result: &SolveResult| assert_error_kind(result, ErrorKind::Infeasible),
    )
}

//without the artificial check the contradiction goes unnoticed
pub fn infeasible_rebuilt() -> TestProblem {
    TestProblem::new(
        "x1",
        &["x1<=1", "x1>=2"],
        Direction::Maximize,
        |result: &SolveResult| assert_optimal_obj(result, 1.),
    )
}

pub fn missing_operator() -> TestProblem {
    TestProblem::new(
        "x1",
        &["x1 10"],
        Direction::Maximize,
        |result: &SolveResult| assert_parse_error_at(result, Some(1)),
    )
}

pub fn bad_rhs_second_constraint() -> TestProblem {
    TestProblem::new(
        "x1+x2",
        &["x1<=4", "x2>=two"],
        Direction::Minimize,
        |result: &SolveResult| assert_parse_error_at(result, Some(2)),
    )
}

pub fn empty_objective() -> TestProblem {
    TestProblem::new(
        "",
        &["x1<=4"],
        Direction::Minimize,
        |result: &SolveResult| assert_parse_error_at(result, None),
    )
}

pub fn no_constraints() -> TestProblem {
    TestProblem::new(
        "x1",
        &[],
        Direction::Minimize,
        |result: &SolveResult| assert_error_kind(result, ErrorKind::Structure),
    )
}

pub fn sanitized_input() -> TestProblem {
    let constraints: Vec<String> = ["x1 \u{2264} 4", "2 x2 <= 12", " 3x1 + 2x2 \u{2264} 18"]
        .iter()
        .map(|c| sanitize_input(c))
        .collect();

    TestProblem {
        objective: sanitize_input("3x1 + 5x2"),
        constraints,
        direction: Direction::Maximize,
        check_result: Box::new(|result: &SolveResult| assert_optimal_obj(result, 36.)),
    }
}
