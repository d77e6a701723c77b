use std::collections::BTreeMap;

use crate::label::{Label, Role};
use crate::problem::Sense;
use crate::rational::Rational;
use crate::tableau::Tableau;

/// Variable assignment read off a terminal tableau
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Sense of the solved problem
    sense: Sense,
    /// Value of every variable, keyed by label
    values: BTreeMap<Label, Rational>,
    /// Optimal objective value
    objective: Rational,
}

impl Solution {
    /// Read the solution off an optimal tableau.
    ///
    /// Basic variables take the right-hand side of their row, the rest are
    /// zero. When the tableau was built from the dual of a minimization, the
    /// primal `x_i` are the objective-row entries under the slack columns
    /// `s_i` of the dual.
    pub fn from_tableau(tableau: &Tableau) -> Self {
        let mut values = BTreeMap::new();
        for label in tableau.entering().iter().filter(|label| !label.is_rhs()) {
            let value = match tableau.basic_row(label) {
                Some(row) => tableau.rhs(row).clone(),
                None => Rational::zero(),
            };
            values.insert(*label, value);
        }

        if tableau.sense() == Sense::Minimize {
            let objective_row = tableau.objective_row();
            for (col, label) in tableau.entering().iter().enumerate() {
                if label.is_slack() {
                    values.insert(Label::decision(label.index), objective_row[col].clone());
                }
            }
        }

        Self {
            sense: tableau.sense(),
            values,
            objective: tableau.objective_value().clone(),
        }
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn value(&self, label: &Label) -> Option<&Rational> {
        self.values.get(label)
    }

    pub fn values(&self) -> &BTreeMap<Label, Rational> {
        &self.values
    }

    /// Values of the original decision variables `x_1, x_2, ...` in order.
    pub fn decision_values(&self) -> Vec<Rational> {
        self.values
            .iter()
            .filter(|(label, _)| label.role == Role::Decision)
            .map(|(_, value)| value.clone())
            .collect()
    }

    pub fn objective_value(&self) -> &Rational {
        &self.objective
    }

    /// Every value under its display name, with the objective under `z`.
    pub fn named(&self) -> BTreeMap<String, Rational> {
        let mut named: BTreeMap<String, Rational> = self
            .values
            .iter()
            .map(|(label, value)| (label.to_string(), value.clone()))
            .collect();
        named.insert("z".to_string(), self.objective.clone());
        named
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Solution {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.named(), serializer)
    }
}
