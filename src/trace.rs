use crate::problem::Direction;
use crate::solver::Solution;
use crate::tableau::{Phase, Tableau};

#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    Objective(String),

    /// `position` is 1-based.
    Constraint {
        position: usize,
        text: String,
    },

    Direction(Direction),

    InitialTableau {
        phase: Phase,
        tableau: Tableau,
    },

    Iteration {
        phase: Phase,
        iteration: u64,
        tableau: Tableau,
    },

    PhaseOneComplete,

    FinalReport(Solution),
}

/// Ordered record of one solve, from the echoed input to the final report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TraceEvent] {
        self.events.as_slice()
    }

    pub fn iterations(&self, phase: Phase) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Iteration { phase: p, .. } if *p == phase))
            .count()
    }

    pub fn initial_tableau(&self, phase: Phase) -> Option<&Tableau> {
        self.events.iter().find_map(|e| match e {
            TraceEvent::InitialTableau { phase: p, tableau } if *p == phase => Some(tableau),
            _ => None,
        })
    }
}

impl std::fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TraceEvent::Objective(text) => {
                writeln!(f, "Objective function: {}", text)?;
                writeln!(f, "Constraints:")
            }

            TraceEvent::Constraint { position, text } => writeln!(f, " R{}: {}", position, text),

            TraceEvent::Direction(direction) => {
                writeln!(f, "Optimization type: {}", direction)?;
                writeln!(f)
            }

            TraceEvent::InitialTableau { phase, tableau } => {
                match phase {
                    Phase::One => writeln!(
                        f,
                        "Phase 1 - initial simplex tableau (with artificial variables):"
                    )?,
                    Phase::Two => {
                        writeln!(f, "Phase 2 - solving with the original objective function:")?
                    }
                }
                writeln!(f, "{}", tableau)
            }

            TraceEvent::Iteration {
                phase,
                iteration,
                tableau,
            } => {
                let p = match phase {
                    Phase::One => 1,
                    Phase::Two => 2,
                };
                writeln!(f, "Iteration {} (Phase {}):", iteration, p)?;
                writeln!(f, "{}", tableau)
            }

            TraceEvent::PhaseOneComplete => {
                writeln!(f, "Phase 1 complete. Artificial variables removed.")
            }

            TraceEvent::FinalReport(solution) => {
                writeln!(f, "\nOptimal result:")?;
                write!(f, "{}", solution)
            }
        }
    }
}

impl std::fmt::Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for event in &self.events {
            write!(f, "{}", event)?;
        }

        Ok(())
    }
}
