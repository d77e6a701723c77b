use crate::label::Label;
use crate::solution::Solution;
use crate::tableau::Tableau;

/// Read-only hooks fired synchronously while a problem is solved. Renderers
/// and step-by-step walkthroughs implement this instead of reaching into the
/// solver.
pub trait SolveObserver {
    fn on_tableau_initialized(&mut self, _tableau: &Tableau) {}

    fn on_pivot_chosen(&mut self, _entering: &Label, _departing: &Label) {}

    fn on_pivot_applied(&mut self, _tableau: &Tableau) {}

    fn on_infeasible(&mut self) {}

    fn on_optimal(&mut self, _solution: &Solution) {}
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TableauInitialized(Tableau),
    PivotChosen { entering: Label, departing: Label },
    PivotApplied(Tableau),
    Infeasible,
    Optimal(Solution),
}

/// Keeps an owned copy of every event, in order.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every tableau seen, the initial one first.
    pub fn tableaus(&self) -> impl Iterator<Item = &Tableau> {
        self.events.iter().filter_map(|event| match event {
            Event::TableauInitialized(tableau) | Event::PivotApplied(tableau) => Some(tableau),
            _ => None,
        })
    }

    pub fn pivot_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::PivotApplied(_)))
            .count()
    }
}

impl SolveObserver for Recorder {
    fn on_tableau_initialized(&mut self, tableau: &Tableau) {
        self.events.push(Event::TableauInitialized(tableau.clone()));
    }

    fn on_pivot_chosen(&mut self, entering: &Label, departing: &Label) {
        self.events.push(Event::PivotChosen {
            entering: *entering,
            departing: *departing,
        });
    }

    fn on_pivot_applied(&mut self, tableau: &Tableau) {
        self.events.push(Event::PivotApplied(tableau.clone()));
    }

    fn on_infeasible(&mut self) {
        self.events.push(Event::Infeasible);
    }

    fn on_optimal(&mut self, solution: &Solution) {
        self.events.push(Event::Optimal(solution.clone()));
    }
}
