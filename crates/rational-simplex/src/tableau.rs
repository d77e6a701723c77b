use std::fmt;

use crate::error::SolveError;
use crate::label::Label;
use crate::problem::Sense;
use crate::rational::Rational;

/// How the entering column and departing row are chosen.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotRule {
    /// Most negative objective coefficient enters (earliest column on ties).
    /// The departing row is the first row with a positive ratio, replaced by
    /// any later row with a positive entry and a strictly smaller ratio.
    /// Degenerate tableaus can cycle.
    #[default]
    Dantzig,
    /// Lowest-index negative column enters; minimum nonnegative ratio leaves,
    /// ties going to the smallest basic label. Never cycles.
    Bland,
}

/// Simplex tableau: `m` constraint rows followed by the objective row, `n`
/// variable columns followed by the right-hand side column.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    rows: Vec<Vec<Rational>>,
    /// Column labels, the last one is always `b`
    entering: Vec<Label>,
    /// Basic variable of each constraint row
    departing: Vec<Label>,
    /// Sense of the problem the tableau was built from
    sense: Sense,
}

impl Tableau {
    pub(crate) fn from_parts(
        rows: Vec<Vec<Rational>>,
        entering: Vec<Label>,
        departing: Vec<Label>,
        sense: Sense,
    ) -> Self {
        debug_assert_eq!(rows.len(), departing.len() + 1);
        debug_assert!(rows.iter().all(|row| row.len() == entering.len()));
        Self {
            rows,
            entering,
            departing,
            sense,
        }
    }

    pub fn constraint_count(&self) -> usize {
        self.departing.len()
    }

    /// Number of variable columns (structural and slack), excluding `b`.
    pub fn variable_count(&self) -> usize {
        self.entering.len() - 1
    }

    pub fn rows(&self) -> &[Vec<Rational>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> &Rational {
        &self.rows[row][col]
    }

    pub fn objective_row(&self) -> &[Rational] {
        &self.rows[self.constraint_count()]
    }

    pub fn rhs(&self, row: usize) -> &Rational {
        &self.rows[row][self.variable_count()]
    }

    pub fn objective_value(&self) -> &Rational {
        self.rhs(self.constraint_count())
    }

    pub fn entering(&self) -> &[Label] {
        &self.entering
    }

    pub fn departing(&self) -> &[Label] {
        &self.departing
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Row in which `label` is basic, if it is basic at all.
    pub fn basic_row(&self, label: &Label) -> Option<usize> {
        self.departing.iter().position(|basic| basic == label)
    }

    /// Optimal once no objective coefficient (the right-hand side aside) is
    /// negative.
    pub fn is_optimal(&self) -> bool {
        self.objective_row()[..self.variable_count()]
            .iter()
            .all(|value| !value.is_negative())
    }

    /// Column that should enter the basis, or `None` when the objective row
    /// has nothing negative left.
    pub fn entering_column(&self, rule: PivotRule) -> Option<usize> {
        let costs = &self.objective_row()[..self.variable_count()];
        match rule {
            PivotRule::Dantzig => {
                if costs.is_empty() {
                    return None;
                }
                let mut most_negative = 0;
                for (col, value) in costs.iter().enumerate().skip(1) {
                    if value < &costs[most_negative] {
                        most_negative = col;
                    }
                }
                costs[most_negative].is_negative().then_some(most_negative)
            }
            PivotRule::Bland => costs.iter().position(Rational::is_negative),
        }
    }

    /// Ratio test on column `col`. `None` means no row can leave, i.e. the
    /// problem has no solution in this direction.
    pub fn departing_row(&self, col: usize, rule: PivotRule) -> Result<Option<usize>, SolveError> {
        match rule {
            PivotRule::Dantzig => self.first_positive_ratio_row(col),
            PivotRule::Bland => self.min_ratio_row_bland(col),
        }
    }

    fn first_positive_ratio_row(&self, col: usize) -> Result<Option<usize>, SolveError> {
        let m = self.constraint_count();

        let mut best: Option<(usize, Rational)> = None;
        for row in 0..m {
            let entry = &self.rows[row][col];
            if entry.is_zero() {
                continue;
            }
            let ratio = self.rhs(row).checked_div(entry)?;
            if ratio.is_positive() {
                best = Some((row, ratio));
                break;
            }
        }

        let Some((first, mut min_ratio)) = best else {
            return Ok(None);
        };
        let mut min_row = first;
        for row in (first + 1)..m {
            let entry = &self.rows[row][col];
            if !entry.is_positive() {
                continue;
            }
            let ratio = self.rhs(row).checked_div(entry)?;
            if ratio < min_ratio {
                min_ratio = ratio;
                min_row = row;
            }
        }
        Ok(Some(min_row))
    }

    fn min_ratio_row_bland(&self, col: usize) -> Result<Option<usize>, SolveError> {
        let mut best: Option<(usize, Rational)> = None;
        for row in 0..self.constraint_count() {
            let entry = &self.rows[row][col];
            if !entry.is_positive() {
                continue;
            }
            let ratio = self.rhs(row).checked_div(entry)?;
            if ratio.is_negative() {
                continue;
            }
            let better = match &best {
                None => true,
                Some((best_row, best_ratio)) => {
                    ratio < *best_ratio
                        || (ratio == *best_ratio && self.departing[row] < self.departing[*best_row])
                }
            };
            if better {
                best = Some((row, ratio));
            }
        }
        Ok(best.map(|(row, _)| row))
    }

    /// Gauss-Jordan step: scale `row` so the pivot becomes 1, then clear column
    /// `col` in every other row. The entering label becomes basic in `row`.
    pub fn pivot(&mut self, row: usize, col: usize) -> Result<(), SolveError> {
        let pivot = self.rows[row][col].clone();
        if pivot.is_zero() {
            return Err(SolveError::DivisionByZero);
        }

        let normalized = self.rows[row]
            .iter()
            .map(|value| value.checked_div(&pivot))
            .collect::<Result<Vec<_>, _>>()?;

        for (k, other) in self.rows.iter_mut().enumerate() {
            if k == row {
                continue;
            }
            let factor = other[col].clone();
            if factor.is_zero() {
                continue;
            }
            for (value, scaled) in other.iter_mut().zip(&normalized) {
                *value = &*value - &(&factor * scaled);
            }
        }

        self.rows[row] = normalized;
        self.departing[row] = self.entering[col];
        Ok(())
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        let width = self
            .entering
            .iter()
            .map(|label| label.to_string().len())
            .chain(cells.iter().flatten().map(String::len))
            .max()
            .unwrap_or(1);

        write!(f, " ")?;
        for label in &self.entering {
            write!(f, " {:^width$}", label.to_string(), width = width)?;
        }
        writeln!(f)?;

        for (i, row) in cells.iter().enumerate() {
            write!(f, "|")?;
            for cell in row {
                write!(f, " {:^width$}", cell, width = width)?;
            }
            match self.departing.get(i) {
                Some(basic) => writeln!(f, " | {}", basic)?,
                None => writeln!(f, " |")?,
            }
        }
        Ok(())
    }
}
