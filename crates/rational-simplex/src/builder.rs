use log::debug;

use crate::error::SolveError;
use crate::label::Label;
use crate::problem::{Problem, Sense};
use crate::rational::Rational;
use crate::tableau::Tableau;

/// A maximization problem with only `<=` rows: maximize `c·y` subject to
/// `a y <= b`, `y >= 0`. This is what the tableau is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Canonical {
    pub a: Vec<Vec<Rational>>,
    pub b: Vec<Rational>,
    pub c: Vec<Rational>,
}

impl Canonical {
    /// The LP dual of `min c·x, A x >= b, x >= 0`, i.e.
    /// `max b·y, Aᵀ y <= c, y >= 0`.
    ///
    /// Built by transposing `[A | b; c | 0]` and splitting the result back
    /// apart: the last column holds the new bounds and the last row the new
    /// objective. Works on owned copies; the problem is left untouched.
    pub fn dual_of(problem: &Problem) -> Self {
        let mut augmented: Vec<Vec<Rational>> = problem
            .a
            .iter()
            .zip(&problem.b)
            .map(|(row, rhs)| {
                let mut row = row.clone();
                row.push(rhs.clone());
                row
            })
            .collect();
        let mut objective = problem.c.clone();
        objective.push(Rational::zero());
        augmented.push(objective);

        let mut transposed = transpose(&augmented);

        // The last transposed row is `[b | 0]`: the dual objective plus the
        // corner entry that only existed for the transpose.
        let mut c = transposed.pop().unwrap_or_default();
        c.pop();

        let mut a = Vec::with_capacity(transposed.len());
        let mut b = Vec::with_capacity(transposed.len());
        for mut row in transposed {
            b.push(row.pop().unwrap_or_else(Rational::zero));
            a.push(row);
        }

        Self { a, b, c }
    }
}

/// Turns a [`Problem`] into its initial simplex tableau.
pub struct TableauBuilder<'a> {
    problem: &'a Problem,
}

impl<'a> TableauBuilder<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// The maximization form the tableau is built from: the problem itself
    /// when maximizing, its dual when minimizing.
    pub fn canonical(&self) -> Result<Canonical, SolveError> {
        self.problem.validate()?;
        Ok(match self.problem.sense {
            Sense::Maximize => Canonical {
                a: self.problem.a.clone(),
                b: self.problem.b.clone(),
                c: self.problem.c.clone(),
            },
            Sense::Minimize => Canonical::dual_of(self.problem),
        })
    }

    /// Slack augmentation `[A | I | b]` over the objective row `[-c | 0 | 0]`.
    pub fn build(&self) -> Result<Tableau, SolveError> {
        let Canonical { a, b, c } = self.canonical()?;
        let n = c.len();
        let m = b.len();

        let mut rows = Vec::with_capacity(m + 1);
        for (i, (coefficients, rhs)) in a.into_iter().zip(b).enumerate() {
            let mut row = coefficients;
            row.extend((0..m).map(|j| if i == j { Rational::one() } else { Rational::zero() }));
            row.push(rhs);
            rows.push(row);
        }

        let mut objective: Vec<Rational> = c.iter().map(|value| -value).collect();
        objective.extend((0..=m).map(|_| Rational::zero()));
        rows.push(objective);

        let structural: fn(usize) -> Label = match self.problem.sense {
            Sense::Maximize => Label::decision,
            Sense::Minimize => Label::dual,
        };
        let entering = (0..n)
            .map(structural)
            .chain((0..m).map(Label::slack))
            .chain(std::iter::once(Label::rhs()))
            .collect();
        let departing = (0..m).map(Label::slack).collect();

        debug!(
            "built {}x{} tableau ({} structural, {} slack) for a {} problem",
            m + 1,
            n + m + 1,
            n,
            m,
            self.problem.sense
        );

        Ok(Tableau::from_parts(rows, entering, departing, self.problem.sense))
    }
}

fn transpose(matrix: &[Vec<Rational>]) -> Vec<Vec<Rational>> {
    let cols = matrix.first().map_or(0, Vec::len);
    (0..cols)
        .map(|j| matrix.iter().map(|row| row[j].clone()).collect())
        .collect()
}
