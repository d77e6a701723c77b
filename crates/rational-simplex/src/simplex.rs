use log::{debug, trace};

use crate::builder::TableauBuilder;
use crate::error::SolveError;
use crate::observer::{NoopObserver, SolveObserver};
use crate::problem::Problem;
use crate::solution::Solution;
use crate::tableau::{PivotRule, Tableau};

/// Terminal state of a solve.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", content = "solution", rename_all = "lowercase"))]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No negative objective coefficient is left
    Optimal(Solution),
    /// An entering column had no row that could leave the basis
    Infeasible,
}

impl Outcome {
    pub fn is_optimal(&self) -> bool {
        matches!(self, Outcome::Optimal(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Optimal(solution) => Some(solution),
            Outcome::Infeasible => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            Outcome::Optimal(solution) => Some(solution),
            Outcome::Infeasible => None,
        }
    }
}

/// Tableau simplex solver over exact rationals
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solver {
    /// Maximum pivots before giving up, `None` for no limit
    max_iterations: Option<usize>,
    /// Entering/departing selection rule
    pivot_rule: PivotRule,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: Some(10000),
            pivot_rule: PivotRule::Dantzig,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Pivot until a terminal tableau is reached, however long that takes.
    /// With [`PivotRule::Dantzig`] a degenerate problem may never terminate.
    pub fn without_iteration_limit(mut self) -> Self {
        self.max_iterations = None;
        self
    }

    pub fn with_pivot_rule(mut self, rule: PivotRule) -> Self {
        self.pivot_rule = rule;
        self
    }

    pub fn max_iterations(&self) -> Option<usize> {
        self.max_iterations
    }

    pub fn pivot_rule(&self) -> PivotRule {
        self.pivot_rule
    }

    /// Solve the problem: maximization directly, minimization through its dual.
    pub fn solve(&self, problem: &Problem) -> Result<Outcome, SolveError> {
        self.solve_with(problem, &mut NoopObserver)
    }

    /// Like [`Solver::solve`], reporting every step to `observer`.
    pub fn solve_with<O: SolveObserver + ?Sized>(
        &self,
        problem: &Problem,
        observer: &mut O,
    ) -> Result<Outcome, SolveError> {
        debug!(
            "solving {} problem: {} variables, {} constraints, {:?} rule",
            problem.sense,
            problem.num_variables(),
            problem.num_constraints(),
            self.pivot_rule
        );
        let mut tableau = TableauBuilder::new(problem).build()?;
        observer.on_tableau_initialized(&tableau);
        self.run(&mut tableau, observer)
    }

    /// Pivot `tableau` in place until it is optimal or shown infeasible.
    ///
    /// A tableau that is already optimal is left untouched and its solution
    /// returned directly.
    pub fn run<O: SolveObserver + ?Sized>(
        &self,
        tableau: &mut Tableau,
        observer: &mut O,
    ) -> Result<Outcome, SolveError> {
        let mut iterations = 0;

        while let Some(col) = tableau.entering_column(self.pivot_rule) {
            trace!("tableau before pivot {}:\n{}", iterations + 1, tableau);

            if self.max_iterations.is_some_and(|max| iterations >= max) {
                debug!("giving up after {} pivots", iterations);
                return Err(SolveError::IterationLimit { iterations });
            }

            let entering = tableau.entering()[col];
            let Some(row) = tableau.departing_row(col, self.pivot_rule)? else {
                debug!("no row can leave for entering {}: infeasible", entering);
                observer.on_infeasible();
                return Ok(Outcome::Infeasible);
            };
            let departing = tableau.departing()[row];

            debug!("pivot {}: {} enters, {} leaves", iterations + 1, entering, departing);
            observer.on_pivot_chosen(&entering, &departing);

            tableau.pivot(row, col)?;
            iterations += 1;

            debug!("objective after pivot {}: {}", iterations, tableau.objective_value());
            observer.on_pivot_applied(tableau);
        }

        debug_assert!(tableau.is_optimal());
        trace!("optimal tableau:\n{}", tableau);

        let solution = Solution::from_tableau(tableau);
        debug!(
            "optimal after {} pivots, objective {}",
            iterations,
            solution.objective_value()
        );
        observer.on_optimal(&solution);
        Ok(Outcome::Optimal(solution))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::label::Label;
    use crate::observer::{Event, Recorder};
    use crate::problem::Sense;
    use crate::rational::Rational;

    fn ints(v: &[i64]) -> Vec<Rational> {
        v.iter().copied().map(Rational::from).collect()
    }

    #[test]
    fn test_simple_maximization() {
        // Maximize: 3x + 2y
        // Subject to:
        //   x + y <= 4
        //   x <= 3
        //   y <= 3
        // Optimal: x=3, y=1, obj=11
        let problem = Problem::from_integers(
            &[vec![1, 1], vec![1, 0], vec![0, 1]],
            &[4, 3, 3],
            &[3, 2],
            Sense::Maximize,
        );

        let solution = Solver::new().solve(&problem).unwrap().into_solution().unwrap();

        assert_eq!(solution.decision_values(), ints(&[3, 1]));
        assert_eq!(solution.objective_value(), &Rational::from(11));
    }

    #[test]
    fn test_minimization_with_ge() {
        // Minimize: 2x + 3y
        // Subject to:
        //   x + y >= 4
        //   x + 3y >= 6
        // Optimal: x=3, y=1, obj=9
        let problem = Problem::from_integers(&[vec![1, 1], vec![1, 3]], &[4, 6], &[2, 3], Sense::Minimize);

        let solution = Solver::new().solve(&problem).unwrap().into_solution().unwrap();

        assert_eq!(solution.decision_values(), ints(&[3, 1]));
        assert_eq!(solution.objective_value(), &Rational::from(9));
    }

    #[test]
    fn test_infeasible() {
        // 0x <= -1
        let problem = Problem::from_integers(&[vec![0]], &[-1], &[1], Sense::Maximize);

        let mut recorder = Recorder::new();
        let outcome = Solver::new().solve_with(&problem, &mut recorder).unwrap();

        assert_eq!(outcome, Outcome::Infeasible);
        assert_eq!(recorder.events.last(), Some(&Event::Infeasible));
        assert_eq!(recorder.pivot_count(), 0);
    }

    #[test]
    fn test_validation_error_surfaces() {
        let problem = Problem::from_integers(&[vec![1, 2]], &[1], &[1], Sense::Maximize);
        assert_eq!(
            Solver::new().solve(&problem),
            Err(SolveError::Validation(ValidationError::RowLength {
                row: 0,
                expected: 1,
                found: 2,
            }))
        );
    }

    #[test]
    fn test_iteration_limit() {
        let problem = Problem::from_integers(
            &[vec![1, 1], vec![1, 0], vec![0, 1]],
            &[4, 3, 3],
            &[3, 2],
            Sense::Maximize,
        );
        assert_eq!(
            Solver::new().with_max_iterations(1).solve(&problem),
            Err(SolveError::IterationLimit { iterations: 1 })
        );
        assert!(Solver::new().without_iteration_limit().solve(&problem).unwrap().is_optimal());
    }

    #[test]
    fn test_event_order() {
        let problem = Problem::from_integers(&[vec![1]], &[3], &[1], Sense::Maximize);
        let mut recorder = Recorder::new();
        Solver::new().solve_with(&problem, &mut recorder).unwrap();

        assert!(matches!(recorder.events[0], Event::TableauInitialized(_)));
        assert_eq!(
            recorder.events[1],
            Event::PivotChosen {
                entering: Label::decision(0),
                departing: Label::slack(0),
            }
        );
        assert!(matches!(recorder.events[2], Event::PivotApplied(_)));
        assert!(matches!(recorder.events[3], Event::Optimal(_)));
        assert_eq!(recorder.events.len(), 4);
    }

    #[test]
    fn test_degenerate_vertex_needs_bland() {
        // max x, x <= 0: the only ratio is 0, which the first-positive-ratio
        // test never accepts
        let problem = Problem::from_integers(&[vec![1]], &[0], &[1], Sense::Maximize);

        assert_eq!(Solver::new().solve(&problem), Ok(Outcome::Infeasible));

        let solution = Solver::new()
            .with_pivot_rule(PivotRule::Bland)
            .solve(&problem)
            .unwrap()
            .into_solution()
            .unwrap();
        assert_eq!(solution.decision_values(), ints(&[0]));
        assert_eq!(solution.objective_value(), &Rational::zero());
    }
}
