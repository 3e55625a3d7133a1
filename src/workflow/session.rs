//! The owned wizard context.

use tracing::{debug, warn};

use super::sequencer::{compute_steps, current_index, next_step, previous_step, resolve_current};
use super::step::StepId;
use crate::record::{ChangeRecord, ChangeRecordAccumulator, RecordUpdate};

/// The record, its step list and the current step, kept consistent.
///
/// Every update recomputes the step list and re-resolves the current step
/// by identity, so an earlier answer that removes later steps never leaves
/// the wizard pointing at a step that no longer exists.
#[derive(Debug, Clone)]
pub struct WizardSession {
    accumulator: ChangeRecordAccumulator,
    steps: Vec<StepId>,
    current: StepId,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    /// A session over an empty record, positioned at the first step.
    pub fn new() -> Self {
        Self::from_record(ChangeRecord::default())
    }

    /// A session over an existing record, positioned at the first step.
    pub fn from_record(record: ChangeRecord) -> Self {
        let mut accumulator = ChangeRecordAccumulator::from_record(record);
        drop_stale_branches(&mut accumulator);
        let steps = compute_steps(accumulator.record());
        let current = steps.first().copied().unwrap_or(StepId::Search);
        Self {
            accumulator,
            steps,
            current,
        }
    }

    pub fn record(&self) -> &ChangeRecord {
        self.accumulator.record()
    }

    pub fn steps(&self) -> &[StepId] {
        &self.steps
    }

    pub fn current(&self) -> StepId {
        self.current
    }

    /// 1-based position of the current step and the step count.
    pub fn position(&self) -> (usize, usize) {
        let index = current_index(&self.steps, self.current).unwrap_or(0);
        (index + 1, self.steps.len())
    }

    pub fn is_first(&self) -> bool {
        current_index(&self.steps, self.current) == Some(0)
    }

    pub fn is_last(&self) -> bool {
        current_index(&self.steps, self.current) == Some(self.steps.len().saturating_sub(1))
    }

    /// Merge an update, drop answers for branches it switched off, then
    /// recompute the step list.
    pub fn apply(&mut self, update: RecordUpdate) -> &ChangeRecord {
        self.accumulator.merge(update);
        drop_stale_branches(&mut self.accumulator);
        self.recompute();
        self.accumulator.record()
    }

    /// Move forward one step. No-op at the end.
    pub fn advance(&mut self) -> StepId {
        self.current = next_step(&self.steps, self.current);
        debug!(step = %self.current, "Advanced");
        self.current
    }

    /// Move back one step. No-op at the start.
    pub fn go_back(&mut self) -> StepId {
        self.current = previous_step(&self.steps, self.current);
        debug!(step = %self.current, "Went back");
        self.current
    }

    pub fn into_record(self) -> ChangeRecord {
        self.accumulator.into_record()
    }

    fn recompute(&mut self) {
        let steps = compute_steps(self.accumulator.record());
        if steps == self.steps {
            return;
        }

        debug!(
            from = ?self.steps.iter().map(StepId::as_str).collect::<Vec<_>>(),
            to = ?steps.iter().map(StepId::as_str).collect::<Vec<_>>(),
            "Step list changed"
        );

        let resolved = resolve_current(&steps, self.current);
        if resolved != self.current {
            warn!(
                removed = %self.current,
                now = %resolved,
                "Current step no longer applies"
            );
        }

        let record = self.accumulator.record();
        if record.manufacturing_determination.is_some() && record.lacks_manufacturing_branch() {
            warn!("Manufacturing change has neither EM nor SD datasets; no manufacturing assessment step");
        }

        self.steps = steps;
        self.current = resolved;
    }
}

fn drop_stale_branches(accumulator: &mut ChangeRecordAccumulator) {
    let record = accumulator.record();
    let stale = record.stale_branches();
    if stale.is_empty() {
        return;
    }

    debug!(groups = ?stale, "Dropping answers for steps that no longer apply");
    let update = RecordUpdate::new().clear_inactive_branches(
        record.needs_qsr(),
        record.is_product(),
        record.has_manufacturing_branch(),
    );
    accumulator.merge(update);
}
