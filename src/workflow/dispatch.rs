//! Sidebar selection → navigation action resolution.
//!
//! Every screen used to carry its own inline step→route table; the
//! tables had drifted apart in small ways. `RouteMap` is now one shared
//! structure injected into every screen, and `Dispatcher` resolves a
//! selected step index against it.

use super::step::WorkflowStep;

/// Mapping from step index to a navigable route.
///
/// The canonical map covers every catalog step. Partial maps are still
/// expressible (a screen under construction can leave steps unmapped),
/// and unmapped selections fall through to a local-only transition.
#[derive(Debug, Clone)]
pub struct RouteMap {
    entries: Vec<Option<WorkflowStep>>,
}

impl RouteMap {
    /// The shared map covering all six catalog steps.
    pub fn canonical() -> Self {
        Self {
            entries: WorkflowStep::all().iter().copied().map(Some).collect(),
        }
    }

    /// A map with no routes; every selection resolves locally.
    pub fn empty() -> Self {
        Self {
            entries: vec![None; WorkflowStep::all().len()],
        }
    }

    /// Remove the route for one step, leaving it a local-only entry.
    pub fn without(mut self, step: WorkflowStep) -> Self {
        if let Some(entry) = self.entries.get_mut(step.index()) {
            *entry = None;
        }
        self
    }

    /// Route target for a step index, if one is mapped.
    pub fn target(&self, index: usize) -> Option<WorkflowStep> {
        self.entries.get(index).copied().flatten()
    }
}

impl Default for RouteMap {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Outcome of a sidebar selection.
///
/// The three-way split matters: collapsing `Stay` into `Navigate` would
/// re-navigate to the screen the user is already on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Transition to another screen.
    Navigate(WorkflowStep),
    /// Selected step is the current screen; nothing to do.
    Stay,
    /// Selected step has no route; highlight it locally only.
    SetLocalActive(usize),
}

/// Resolves sidebar selections for one screen.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    routes: RouteMap,
    current: WorkflowStep,
}

impl Dispatcher {
    pub fn new(routes: RouteMap, current: WorkflowStep) -> Self {
        Self { routes, current }
    }

    /// The screen this dispatcher resolves selections for.
    pub fn current(&self) -> WorkflowStep {
        self.current
    }

    /// Resolve a selected step index to a navigation action.
    ///
    /// Out-of-range indices are not errors; they resolve to
    /// `SetLocalActive` so reserved steps stay inert.
    pub fn dispatch(&self, selected_index: usize) -> NavAction {
        match self.routes.target(selected_index) {
            Some(target) if target == self.current => NavAction::Stay,
            Some(target) => NavAction::Navigate(target),
            None => NavAction::SetLocalActive(selected_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher_on(step: WorkflowStep) -> Dispatcher {
        Dispatcher::new(RouteMap::canonical(), step)
    }

    #[test]
    fn test_own_index_is_stay() {
        for step in WorkflowStep::all() {
            let dispatcher = dispatcher_on(*step);
            assert_eq!(dispatcher.dispatch(step.index()), NavAction::Stay);
        }
    }

    #[test]
    fn test_stay_is_idempotent() {
        let dispatcher = dispatcher_on(WorkflowStep::OperationalDocxScan);
        for _ in 0..3 {
            assert_eq!(dispatcher.dispatch(2), NavAction::Stay);
        }
    }

    #[test]
    fn test_known_index_navigates_to_configured_route() {
        let dispatcher = dispatcher_on(WorkflowStep::OperationalDocxScan);
        for step in WorkflowStep::all() {
            if *step == WorkflowStep::OperationalDocxScan {
                continue;
            }
            match dispatcher.dispatch(step.index()) {
                NavAction::Navigate(target) => {
                    assert_eq!(target, *step);
                    assert_eq!(target.path(), step.path());
                }
                other => panic!("expected Navigate for index {}, got {other:?}", step.index()),
            }
        }
    }

    #[test]
    fn test_out_of_range_sets_local_active() {
        let dispatcher = dispatcher_on(WorkflowStep::Welcome);
        assert_eq!(dispatcher.dispatch(6), NavAction::SetLocalActive(6));
        assert_eq!(dispatcher.dispatch(42), NavAction::SetLocalActive(42));
    }

    #[test]
    fn test_unmapped_step_sets_local_active() {
        let routes = RouteMap::canonical().without(WorkflowStep::BenefitsSummary);
        let dispatcher = Dispatcher::new(routes, WorkflowStep::Welcome);
        assert_eq!(dispatcher.dispatch(5), NavAction::SetLocalActive(5));
    }

    #[test]
    fn test_empty_route_map_never_navigates() {
        let dispatcher = Dispatcher::new(RouteMap::empty(), WorkflowStep::Welcome);
        for index in 0..8 {
            assert_eq!(dispatcher.dispatch(index), NavAction::SetLocalActive(index));
        }
    }

    #[test]
    fn test_canonical_map_targets_every_step() {
        let routes = RouteMap::canonical();
        for step in WorkflowStep::all() {
            assert_eq!(routes.target(step.index()), Some(*step));
        }
        assert_eq!(routes.target(6), None);
    }
}
