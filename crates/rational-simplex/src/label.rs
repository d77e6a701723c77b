use std::fmt;

/// The role a tableau column plays.
///
/// The declaration order is the column order of a freshly built tableau,
/// which is what [`Label`]'s ordering relies on.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Decision variable of a problem solved directly (`x_i`)
    Decision,
    /// Decision variable of the dual of a minimization problem (`y_i`)
    Dual,
    /// Slack variable of a constraint row (`s_i`)
    Slack,
    /// Right-hand side pseudo-column (`b`)
    Rhs,
}

/// Name of a tableau column or basic variable. `index` is zero-based; the
/// display form is one-based, e.g. `Label::slack(0)` prints as `s_1`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label {
    pub role: Role,
    pub index: usize,
}

impl Label {
    pub fn decision(index: usize) -> Self {
        Self { role: Role::Decision, index }
    }

    pub fn dual(index: usize) -> Self {
        Self { role: Role::Dual, index }
    }

    pub fn slack(index: usize) -> Self {
        Self { role: Role::Slack, index }
    }

    pub fn rhs() -> Self {
        Self { role: Role::Rhs, index: 0 }
    }

    pub fn is_slack(&self) -> bool {
        self.role == Role::Slack
    }

    pub fn is_rhs(&self) -> bool {
        self.role == Role::Rhs
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.role {
            Role::Decision => "x",
            Role::Dual => "y",
            Role::Slack => "s",
            Role::Rhs => return f.write_str("b"),
        };
        write!(f, "{}_{}", prefix, self.index + 1)
    }
}
