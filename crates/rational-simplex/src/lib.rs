mod builder;
mod error;
mod label;
mod observer;
mod problem;
mod rational;
mod simplex;
mod solution;
mod tableau;

pub use builder::{Canonical, TableauBuilder};
pub use error::{SolveError, ValidationError};
pub use label::{Label, Role};
pub use observer::{Event, NoopObserver, Recorder, SolveObserver};
pub use problem::{ConstraintViolation, Inequality, Problem, Sense};
pub use rational::Rational;
pub use simplex::{Outcome, Solver};
pub use solution::Solution;
pub use tableau::{PivotRule, Tableau};
