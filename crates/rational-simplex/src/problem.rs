use std::fmt;

use crate::error::ValidationError;
use crate::rational::Rational;

/// A linear program in the matrix form `A x (<=|>=|=) b`, `x >= 0`, with
/// objective `c·x`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Constraint coefficients, one row per constraint
    pub a: Vec<Vec<Rational>>,
    /// Right-hand side bound for each constraint
    pub b: Vec<Rational>,
    /// Objective coefficients, one per decision variable
    pub c: Vec<Rational>,
    /// Direction of each constraint. `None` means the default for the sense
    #[cfg_attr(feature = "serde", serde(default))]
    pub inequalities: Option<Vec<Inequality>>,
    /// Whether to minimize or maximize
    pub sense: Sense,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inequality {
    /// Less than or equal (<=)
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    Le,
    /// Greater than or equal (>=)
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    Ge,
    /// Equal (=)
    #[cfg_attr(feature = "serde", serde(rename = "="))]
    Eq,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    #[cfg_attr(feature = "serde", serde(rename = "max"))]
    Maximize,
    #[cfg_attr(feature = "serde", serde(rename = "min"))]
    Minimize,
}

/// A constraint that an assignment fails to satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    /// Constraint row index
    pub row: usize,
    pub inequality: Inequality,
    /// Right-hand side of the constraint
    pub required: Rational,
    /// Left-hand side evaluated at the assignment
    pub actual: Rational,
}

impl Inequality {
    /// Does `lhs (op) rhs` hold?
    pub fn holds(self, lhs: &Rational, rhs: &Rational) -> bool {
        match self {
            Inequality::Le => lhs <= rhs,
            Inequality::Ge => lhs >= rhs,
            Inequality::Eq => lhs == rhs,
        }
    }
}

impl fmt::Display for Inequality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Inequality::Le => "<=",
            Inequality::Ge => ">=",
            Inequality::Eq => "=",
        })
    }
}

impl Sense {
    /// Direction used for every constraint when none is given.
    pub fn default_inequality(self) -> Inequality {
        match self {
            Sense::Maximize => Inequality::Le,
            Sense::Minimize => Inequality::Ge,
        }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sense::Maximize => "max",
            Sense::Minimize => "min",
        })
    }
}

impl Problem {
    pub fn new(c: Vec<Rational>, sense: Sense) -> Self {
        Self {
            a: Vec::new(),
            b: Vec::new(),
            c,
            inequalities: None,
            sense,
        }
    }

    pub fn maximize(c: Vec<Rational>) -> Self {
        Self::new(c, Sense::Maximize)
    }

    pub fn minimize(c: Vec<Rational>) -> Self {
        Self::new(c, Sense::Minimize)
    }

    /// Promote an all-integer problem to rationals.
    pub fn from_integers(a: &[Vec<i64>], b: &[i64], c: &[i64], sense: Sense) -> Self {
        let promote = |v: &[i64]| v.iter().copied().map(Rational::from).collect::<Vec<_>>();
        Self {
            a: a.iter().map(|row| promote(row.as_slice())).collect(),
            b: promote(b),
            c: promote(c),
            inequalities: None,
            sense,
        }
    }

    /// Add a constraint with an explicit direction. Constraints added earlier
    /// without one take the default for the problem's sense.
    pub fn add_constraint(&mut self, coefficients: Vec<Rational>, op: Inequality, rhs: Rational) {
        let default = self.sense.default_inequality();
        let existing = self.a.len();
        self.inequalities
            .get_or_insert_with(|| vec![default; existing])
            .push(op);
        self.a.push(coefficients);
        self.b.push(rhs);
    }

    /// Add a constraint that uses the default direction for the problem's sense.
    pub fn add_default_constraint(&mut self, coefficients: Vec<Rational>, rhs: Rational) {
        if let Some(inequalities) = &mut self.inequalities {
            inequalities.push(self.sense.default_inequality());
        }
        self.a.push(coefficients);
        self.b.push(rhs);
    }

    pub fn num_variables(&self) -> usize {
        self.c.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.a.len()
    }

    /// The direction of every constraint, filling in the default when unset.
    pub fn directions(&self) -> Vec<Inequality> {
        match &self.inequalities {
            Some(inequalities) => inequalities.clone(),
            None => vec![self.sense.default_inequality(); self.num_constraints()],
        }
    }

    /// Check dimensions and that every direction can be expressed by the
    /// slack construction (`<=` when maximizing, `>=` when minimizing).
    pub fn validate(&self) -> Result<(), ValidationError> {
        let n = self.num_variables();
        let m = self.num_constraints();

        if n == 0 {
            return Err(ValidationError::EmptyObjective);
        }
        if self.b.len() != m {
            return Err(ValidationError::BoundsLength {
                expected: m,
                found: self.b.len(),
            });
        }
        if let Some(inequalities) = &self.inequalities {
            if inequalities.len() != m {
                return Err(ValidationError::InequalitiesLength {
                    expected: m,
                    found: inequalities.len(),
                });
            }
        }
        for (row, coefficients) in self.a.iter().enumerate() {
            if coefficients.len() != n {
                return Err(ValidationError::RowLength {
                    row,
                    expected: n,
                    found: coefficients.len(),
                });
            }
        }

        let supported = self.sense.default_inequality();
        for (row, inequality) in self.directions().into_iter().enumerate() {
            if inequality != supported {
                return Err(ValidationError::UnsupportedInequality {
                    row,
                    inequality,
                    sense: self.sense,
                });
            }
        }

        Ok(())
    }

    /// Evaluate `c·x`.
    pub fn objective_at(&self, values: &[Rational]) -> Rational {
        self.c.iter().zip(values).map(|(c, x)| c * x).sum()
    }

    /// Every constraint the assignment breaks, compared exactly. Missing
    /// entries in `values` count as zero.
    pub fn violations(&self, values: &[Rational]) -> Vec<ConstraintViolation> {
        let directions = self.directions();
        let mut violations = Vec::new();

        for (row, (coefficients, rhs)) in self.a.iter().zip(&self.b).enumerate() {
            let lhs: Rational = coefficients.iter().zip(values).map(|(a, x)| a * x).sum();
            let inequality = directions.get(row).copied().unwrap_or(self.sense.default_inequality());
            if !inequality.holds(&lhs, rhs) {
                violations.push(ConstraintViolation {
                    row,
                    inequality,
                    required: rhs.clone(),
                    actual: lhs,
                });
            }
        }

        // Negative variables break the implicit x >= 0 bounds; those are not
        // rows of A and are left to the caller.
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(v: &[i64]) -> Vec<Rational> {
        v.iter().copied().map(Rational::from).collect()
    }

    #[test]
    fn test_default_directions() {
        let max = Problem::from_integers(&[vec![1, 1], vec![2, 1]], &[4, 6], &[3, 2], Sense::Maximize);
        assert_eq!(max.directions(), vec![Inequality::Le, Inequality::Le]);

        let min = Problem::from_integers(&[vec![1, 1]], &[4], &[3, 2], Sense::Minimize);
        assert_eq!(min.directions(), vec![Inequality::Ge]);
    }

    #[test]
    fn test_add_constraint_backfills_defaults() {
        let mut problem = Problem::maximize(ints(&[1, 1]));
        problem.add_default_constraint(ints(&[1, 0]), Rational::from(3));
        problem.add_constraint(ints(&[0, 1]), Inequality::Le, Rational::from(2));
        problem.add_default_constraint(ints(&[1, 1]), Rational::from(4));

        assert_eq!(
            problem.inequalities,
            Some(vec![Inequality::Le, Inequality::Le, Inequality::Le])
        );
        assert_eq!(problem.validate(), Ok(()));
    }

    #[test]
    fn test_validation_errors() {
        let empty = Problem::maximize(Vec::new());
        assert_eq!(empty.validate(), Err(ValidationError::EmptyObjective));

        let mut bounds = Problem::from_integers(&[vec![1, 1]], &[4], &[1, 1], Sense::Maximize);
        bounds.b.push(Rational::from(1));
        assert_eq!(
            bounds.validate(),
            Err(ValidationError::BoundsLength { expected: 1, found: 2 })
        );

        let ragged = Problem::from_integers(&[vec![1, 1], vec![1]], &[4, 1], &[1, 1], Sense::Maximize);
        assert_eq!(
            ragged.validate(),
            Err(ValidationError::RowLength { row: 1, expected: 2, found: 1 })
        );

        let mut directions = Problem::from_integers(&[vec![1, 1]], &[4], &[1, 1], Sense::Maximize);
        directions.inequalities = Some(vec![]);
        assert_eq!(
            directions.validate(),
            Err(ValidationError::InequalitiesLength { expected: 1, found: 0 })
        );
    }

    #[test]
    fn test_unsupported_direction() {
        let mut problem = Problem::minimize(ints(&[2, 3]));
        problem.add_constraint(ints(&[1, 1]), Inequality::Ge, Rational::from(4));
        problem.add_constraint(ints(&[1, 0]), Inequality::Le, Rational::from(3));

        assert_eq!(
            problem.validate(),
            Err(ValidationError::UnsupportedInequality {
                row: 1,
                inequality: Inequality::Le,
                sense: Sense::Minimize,
            })
        );
    }

    #[test]
    fn test_violations_are_exact() {
        let problem = Problem::from_integers(&[vec![3, 3]], &[1], &[1, 1], Sense::Maximize);
        let third = Rational::new(1, 3).unwrap();

        // 3/3 + 3/6 = 3/2 > 1
        let over = vec![third.clone(), Rational::new(1, 6).unwrap()];
        let violations = problem.violations(&over);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].actual, Rational::new(3, 2).unwrap());

        // 3/3 + 0 = 1, exactly on the bound
        assert!(problem.violations(&[third, Rational::zero()]).is_empty());
    }

    #[test]
    fn test_objective_at() {
        let problem = Problem::from_integers(&[], &[], &[5, 4, 3], Sense::Maximize);
        assert_eq!(problem.objective_at(&ints(&[2, 0, 1])), Rational::from(13));
    }
}
