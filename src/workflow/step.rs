//! Canonical step catalog for the covenant-monitoring walkthrough.
//!
//! Every screen renders the same six-step sequence; only the `active`
//! flag differs per screen. The catalog is the single source of truth
//! for step order, labels, and route paths.

use serde::{Deserialize, Serialize};

/// The six stages of the walkthrough, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Welcome,
    FinancialStatementScan,
    OperationalDocxScan,
    Y14ReportGeneration,
    CovenantMonitoring,
    BenefitsSummary,
}

impl WorkflowStep {
    /// All steps in presentation order.
    pub fn all() -> &'static [WorkflowStep] {
        &[
            WorkflowStep::Welcome,
            WorkflowStep::FinancialStatementScan,
            WorkflowStep::OperationalDocxScan,
            WorkflowStep::Y14ReportGeneration,
            WorkflowStep::CovenantMonitoring,
            WorkflowStep::BenefitsSummary,
        ]
    }

    /// Position in the sequence; doubles as the navigation key.
    pub fn index(self) -> usize {
        match self {
            WorkflowStep::Welcome => 0,
            WorkflowStep::FinancialStatementScan => 1,
            WorkflowStep::OperationalDocxScan => 2,
            WorkflowStep::Y14ReportGeneration => 3,
            WorkflowStep::CovenantMonitoring => 4,
            WorkflowStep::BenefitsSummary => 5,
        }
    }

    /// Look up a step by its sequence index.
    pub fn from_index(index: usize) -> Option<WorkflowStep> {
        WorkflowStep::all().get(index).copied()
    }

    /// Short ordinal shown in the sidebar.
    pub fn sublabel(self) -> &'static str {
        match self {
            WorkflowStep::Welcome => "1",
            WorkflowStep::FinancialStatementScan => "2",
            WorkflowStep::OperationalDocxScan => "3",
            WorkflowStep::Y14ReportGeneration => "4",
            WorkflowStep::CovenantMonitoring => "5",
            WorkflowStep::BenefitsSummary => "6",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WorkflowStep::Welcome => "Welcome",
            WorkflowStep::FinancialStatementScan => "Financial Statement Scan",
            WorkflowStep::OperationalDocxScan => "Operational Docx Scan",
            WorkflowStep::Y14ReportGeneration => "Y-14 Report Generation",
            WorkflowStep::CovenantMonitoring => "Covenant Monitoring",
            WorkflowStep::BenefitsSummary => "Benefits Summary",
        }
    }

    /// Route path used for navigation and for addressing external events.
    pub fn path(self) -> &'static str {
        match self {
            WorkflowStep::Welcome => "/welcome",
            WorkflowStep::FinancialStatementScan => "/financial-statement",
            WorkflowStep::OperationalDocxScan => "/dscr-trend",
            WorkflowStep::Y14ReportGeneration => "/y14-report/large",
            WorkflowStep::CovenantMonitoring => "/covenant-monitoring",
            WorkflowStep::BenefitsSummary => "/benefits-summary",
        }
    }

    /// Reverse lookup from a route path. Returns `None` for unknown routes.
    pub fn from_path(path: &str) -> Option<WorkflowStep> {
        WorkflowStep::all().iter().copied().find(|s| s.path() == path)
    }
}

/// A render-ready sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub sublabel: &'static str,
    pub label: &'static str,
    pub completed: bool,
    /// True iff `index` equals the current screen's step index.
    pub active: bool,
}

/// The ordered step sequence with per-step completion flags.
///
/// Completion is data, not derived from position: the walkthrough
/// presents a finished scan, so all steps ship completed by default.
#[derive(Debug, Clone)]
pub struct StepSequence {
    completed: Vec<bool>,
}

impl StepSequence {
    /// The canonical sequence shared by every screen.
    pub fn canonical() -> Self {
        Self {
            completed: vec![true; WorkflowStep::all().len()],
        }
    }

    /// Number of steps in the sequence.
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// Override a completion flag. Out-of-range indices are ignored.
    pub fn set_completed(&mut self, index: usize, completed: bool) {
        if let Some(slot) = self.completed.get_mut(index) {
            *slot = completed;
        }
    }

    /// Produce the render-ready step list with `active` computed per
    /// element. A `current` index outside the sequence yields no active
    /// step; this is not an error.
    pub fn steps(&self, current: Option<usize>) -> Vec<Step> {
        WorkflowStep::all()
            .iter()
            .map(|step| {
                let index = step.index();
                Step {
                    index,
                    sublabel: step.sublabel(),
                    label: step.label(),
                    completed: self.completed.get(index).copied().unwrap_or(false),
                    active: current == Some(index),
                }
            })
            .collect()
    }
}

impl Default for StepSequence {
    fn default() -> Self {
        Self::canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_contiguous_from_zero() {
        for (expected, step) in WorkflowStep::all().iter().enumerate() {
            assert_eq!(step.index(), expected);
            assert_eq!(WorkflowStep::from_index(expected), Some(*step));
        }
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(WorkflowStep::from_index(6), None);
        assert_eq!(WorkflowStep::from_index(usize::MAX), None);
    }

    #[test]
    fn test_path_round_trip() {
        for step in WorkflowStep::all() {
            assert_eq!(WorkflowStep::from_path(step.path()), Some(*step));
        }
        assert_eq!(WorkflowStep::from_path("/nowhere"), None);
    }

    #[test]
    fn test_exactly_one_active_when_in_range() {
        let sequence = StepSequence::canonical();
        for current in 0..sequence.len() {
            let steps = sequence.steps(Some(current));
            let active: Vec<_> = steps.iter().filter(|s| s.active).collect();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].index, current);
        }
    }

    #[test]
    fn test_no_active_when_out_of_range() {
        let sequence = StepSequence::canonical();
        assert!(sequence.steps(Some(6)).iter().all(|s| !s.active));
        assert!(sequence.steps(None).iter().all(|s| !s.active));
    }

    #[test]
    fn test_canonical_steps_are_completed() {
        let steps = StepSequence::canonical().steps(Some(2));
        assert_eq!(steps.len(), 6);
        assert!(steps.iter().all(|s| s.completed));
    }

    #[test]
    fn test_set_completed_overrides_flag() {
        let mut sequence = StepSequence::canonical();
        sequence.set_completed(3, false);
        let steps = sequence.steps(None);
        assert!(!steps[3].completed);
        assert!(steps[4].completed);

        // Out of range is a no-op
        sequence.set_completed(99, false);
    }

    #[test]
    fn test_sidebar_labels_match_catalog() {
        let steps = StepSequence::canonical().steps(Some(0));
        assert_eq!(steps[0].label, "Welcome");
        assert_eq!(steps[0].sublabel, "1");
        assert_eq!(steps[5].label, "Benefits Summary");
        assert_eq!(steps[5].sublabel, "6");
    }
}
