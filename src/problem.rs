const LTE_STR: &str = "\u{2264}";
const EQ_STR: &str = "\u{003D}";
const GTE_STR: &str = "\u{2265}";

#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub coeff: f64,
    pub var: String,
}

impl Term {
    pub fn new(coeff: f64, var: impl Into<String>) -> Self {
        Self {
            coeff,
            var: var.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintOp {
    Lte,
    Eq,
    Gte,
}

impl ConstraintOp {
    /// ASCII form the parser recognizes.
    pub fn as_ascii(&self) -> &'static str {
        match self {
            ConstraintOp::Lte => "<=",
            ConstraintOp::Eq => "=",
            ConstraintOp::Gte => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub terms: Vec<Term>,
    pub op: ConstraintOp,
    pub rhs: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Maximize,
    Minimize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub terms: Vec<Term>,
    pub direction: Direction,
}

/// A parsed linear program.
///
/// `vars` is the variable universe: every distinct name seen, ordered by first
/// appearance in the objective and then in each constraint. A variable's
/// position in `vars` is its decision column in every tableau built from this
/// problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub objective: Objective,
    pub constraints: Vec<Constraint>,
    vars: Vec<String>,
}

impl Problem {
    pub fn new(objective: Objective, constraints: Vec<Constraint>) -> Self {
        let mut vars: Vec<String> = Vec::new();

        let all_terms = objective
            .terms
            .iter()
            .chain(constraints.iter().flat_map(|c| c.terms.iter()));

        for term in all_terms {
            if !vars.contains(&term.var) {
                vars.push(term.var.clone());
            }
        }

        Self {
            objective,
            constraints,
            vars,
        }
    }

    pub fn vars(&self) -> &[String] {
        self.vars.as_slice()
    }

    pub fn var_index(&self, name: &str) -> Option<usize> {
        self.vars.iter().position(|var| var == name)
    }

    pub fn constraints(&self) -> &[Constraint] {
        self.constraints.as_slice()
    }

    pub fn direction(&self) -> Direction {
        self.objective.direction
    }
}

fn display_terms(f: &mut std::fmt::Formatter, terms: &[Term]) -> std::fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        let sign = if term.coeff < 0. { "-" } else { "+" };

        if i == 0 {
            if term.coeff < 0. {
                write!(f, "-")?;
            }
        } else {
            write!(f, " {} ", sign)?;
        }

        write!(f, "{} {}", term.coeff.abs(), term.var)?;
    }

    Ok(())
}

impl std::fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConstraintOp::Lte => write!(f, "{}", LTE_STR),
            ConstraintOp::Eq => write!(f, "{}", EQ_STR),
            ConstraintOp::Gte => write!(f, "{}", GTE_STR),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Direction::Maximize => write!(f, "Maximize"),
            Direction::Minimize => write!(f, "Minimize"),
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        display_terms(f, &self.terms)?;
        write!(f, " {} {}", self.op, self.rhs)
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.objective.direction {
            Direction::Maximize => writeln!(f, "maximize")?,
            Direction::Minimize => writeln!(f, "minimize")?,
        }

        display_terms(f, &self.objective.terms)?;
        writeln!(f, "\n\nsubject to")?;

        for constraint in &self.constraints {
            writeln!(f, "{}", constraint)?;
        }

        writeln!(f, "\nwith all variables nonnegative")
    }
}
