//! Expression parser for objective and constraint text.
//!
//! An expression is a sequence of terms, each `[sign][magnitude]letter[digits]`:
//! a missing sign means `+`, a missing magnitude means `1`, and the letter with
//! its optional digit suffix names the variable (`x`, `x1`, `y23`). Input is
//! expected to be normalized already (ASCII comparators, no whitespace), see
//! [`sanitize_input`].

use crate::error::SimplexError;
use crate::problem::{Constraint, ConstraintOp, Direction, Objective, Problem, Term};

use nom::branch::alt;
use nom::character::complete::{char, digit0, digit1, one_of, satisfy};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::multi::many1;
use nom::number::complete::double;
use nom::sequence::pair;
use nom::IResult;

use log::debug;

//two-character operators first, so the '=' inside them is never picked alone
const OPS: [ConstraintOp; 3] = [ConstraintOp::Lte, ConstraintOp::Gte, ConstraintOp::Eq];

fn sign(i: &str) -> IResult<&str, f64> {
    map(opt(one_of("+-")), |s| if s == Some('-') { -1. } else { 1. })(i)
}

fn magnitude(i: &str) -> IResult<&str, f64> {
    map_res(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            recognize(pair(char('.'), digit1)),
        )),
        str::parse::<f64>,
    )(i)
}

fn variable(i: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(|c| c.is_ascii_alphabetic()), digit0))(i)
}

fn term(i: &str) -> IResult<&str, Term> {
    let (i, sign) = sign(i)?;
    let (i, magnitude) = opt(magnitude)(i)?;
    let (i, name) = variable(i)?;
    Ok((i, Term::new(sign * magnitude.unwrap_or(1.), name)))
}

/// Splits an expression into its terms, in textual order.
///
/// The whole text must be consumed; anything the term grammar does not accept
/// is reported with its 0-based offset.
pub fn parse_terms(text: &str) -> Result<Vec<Term>, SimplexError> {
    split_terms(text).map_err(|msg| SimplexError::parse(None, msg))
}

fn split_terms(text: &str) -> Result<Vec<Term>, String> {
    if text.is_empty() {
        return Err("expression has no terms".to_string());
    }

    match all_consuming(many1(term))(text) {
        Ok((_, terms)) => Ok(terms),

        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let offset = text.len() - e.input.len();

            if offset == 0 {
                Err(format!("no term found in '{}'", text))
            } else {
                Err(format!(
                    "unexpected '{}' at offset {} in '{}'",
                    e.input, offset, text
                ))
            }
        }

        Err(nom::Err::Incomplete(_)) => Err(format!("incomplete expression '{}'", text)),
    }
}

fn parse_rhs(text: &str) -> Option<f64> {
    let parsed: IResult<&str, f64> = all_consuming(double)(text);

    match parsed {
        Ok((_, rhs)) if rhs.is_finite() => Some(rhs),
        _ => None,
    }
}

pub fn parse_objective(text: &str, direction: Direction) -> Result<Objective, SimplexError> {
    let terms = parse_terms(text)?;
    Ok(Objective { terms, direction })
}

/// Parses one constraint; `position` is its 1-based place in the input list.
pub fn parse_constraint(text: &str, position: usize) -> Result<Constraint, SimplexError> {
    let err = |msg: String| SimplexError::parse(Some(position), msg);

    let op = OPS
        .iter()
        .copied()
        .find(|op| text.contains(op.as_ascii()))
        .ok_or_else(|| err(format!("no comparison operator in '{}'", text)))?;

    let (left, right) = text
        .split_once(op.as_ascii())
        .ok_or_else(|| err(format!("cannot split '{}' on '{}'", text, op.as_ascii())))?;

    let left = left.trim();

    if left.is_empty() {
        return Err(err(format!("empty left-hand side in '{}'", text)));
    }

    let rhs = parse_rhs(right.trim())
        .ok_or_else(|| err(format!("right-hand side '{}' is not a finite number", right)))?;

    let terms = split_terms(left).map_err(err)?;

    Ok(Constraint { terms, op, rhs })
}

/// Replaces the unicode comparison glyphs with their ASCII form and strips all
/// whitespace.
pub fn sanitize_input(text: &str) -> String {
    text.replace('\u{2264}', "<=")
        .replace('\u{2265}', ">=")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

impl Problem {
    /// Parses the objective, then every constraint in order; the first failure
    /// is returned.
    pub fn parse<S: AsRef<str>>(
        objective: &str,
        constraints: &[S],
        direction: Direction,
    ) -> Result<Problem, SimplexError> {
        let objective = parse_objective(objective, direction)?;

        let constraints = constraints
            .iter()
            .enumerate()
            .map(|(i, text)| parse_constraint(text.as_ref(), i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let prob = Problem::new(objective, constraints);

        debug!(
            "parsed problem with {} variables and {} constraints: {:?}",
            prob.vars().len(),
            prob.constraints().len(),
            prob.vars()
        );

        Ok(prob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const TOL: f64 = 1e-12;

    fn coeffs(terms: &[Term]) -> Vec<(f64, &str)> {
        terms.iter().map(|t| (t.coeff, t.var.as_str())).collect()
    }

    #[test]
    fn terms_with_implicit_and_explicit_coefficients() {
        let terms = parse_terms("3x1+5x2-x3+x-2.5y7").unwrap();

        assert_eq!(
            coeffs(&terms),
            vec![
                (3., "x1"),
                (5., "x2"),
                (-1., "x3"),
                (1., "x"),
                (-2.5, "y7")
            ]
        );
    }

    #[test]
    fn leading_sign_and_fraction() {
        let terms = parse_terms("-.5a+10b").unwrap();
        assert_eq!(coeffs(&terms), vec![(-0.5, "a"), (10., "b")]);
    }

    #[test]
    fn terms_reject_garbage() {
        assert!(parse_terms("").is_err());
        assert!(parse_terms("12").is_err());
        assert!(parse_terms("3x1+").is_err());
        assert!(parse_terms("3x1*2").is_err());
    }

    #[test]
    fn constraint_operators() {
        let lte = parse_constraint("x1<=4", 1).unwrap();
        assert_eq!(lte.op, ConstraintOp::Lte);
        assert!((lte.rhs - 4.).abs() < TOL);

        let gte = parse_constraint("x1+x2>=-2.5", 1).unwrap();
        assert_eq!(gte.op, ConstraintOp::Gte);
        assert!((gte.rhs + 2.5).abs() < TOL);

        let eq = parse_constraint("2x1-3x2=1e1", 1).unwrap();
        assert_eq!(eq.op, ConstraintOp::Eq);
        assert!((eq.rhs - 10.).abs() < TOL);
        assert_eq!(coeffs(&eq.terms), vec![(2., "x1"), (-3., "x2")]);
    }

    #[test]
    fn missing_operator_reports_position() {
        let err = parse_constraint("x1 10", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.constraint_position(), Some(1));
        assert!(err.to_string().contains("position 1"));
    }

    #[test]
    fn invalid_sides() {
        let empty_left = parse_constraint("<=4", 2).unwrap_err();
        assert_eq!(empty_left.constraint_position(), Some(2));

        let bad_rhs = parse_constraint("x1<=abc", 3).unwrap_err();
        assert_eq!(bad_rhs.constraint_position(), Some(3));

        let empty_rhs = parse_constraint("x1>=", 4).unwrap_err();
        assert_eq!(empty_rhs.constraint_position(), Some(4));

        let chained = parse_constraint("x1<=4<=5", 5).unwrap_err();
        assert_eq!(chained.constraint_position(), Some(5));

        let infinite = parse_constraint("x1<=inf", 6).unwrap_err();
        assert_eq!(infinite.constraint_position(), Some(6));

        let bad_left = parse_constraint("4<=x1", 7).unwrap_err();
        assert_eq!(bad_left.constraint_position(), Some(7));
    }

    #[test]
    fn objective_errors_have_no_position() {
        let err = parse_objective("", Direction::Minimize).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.constraint_position(), None);
    }

    #[test]
    fn parse_problem_reports_first_bad_constraint() {
        let err = Problem::parse("x1", &["x1<=4", "x1", "x1>=1"], Direction::Maximize)
            .unwrap_err();
        assert_eq!(err.constraint_position(), Some(2));
    }

    #[test]
    fn parse_problem_universe() {
        let prob = Problem::parse(
            "3x1+5x2",
            &["x1<=4", "2x2<=12", "3x1+2x2+x3<=18"],
            Direction::Maximize,
        )
        .unwrap();

        assert_eq!(prob.vars(), &["x1", "x2", "x3"]);
        assert_eq!(prob.constraints().len(), 3);
    }

    #[test]
    fn sanitize() {
        assert_eq!(sanitize_input(" 3x1 + 2 x2 \u{2264} 18 "), "3x1+2x2<=18");
        assert_eq!(sanitize_input("x1\t\u{2265}\n1"), "x1>=1");
    }
}
