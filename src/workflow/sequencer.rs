//! Step list computation and navigation.
//!
//! All functions are pure: the step list is a function of the record, and
//! navigation is a function of the list and the current step.

use super::step::StepId;
use crate::record::ChangeRecord;

/// Compute the ordered steps a record requires.
pub fn compute_steps(record: &ChangeRecord) -> Vec<StepId> {
    let mut steps = vec![StepId::Search, StepId::Scope, StepId::Track];

    if record.needs_qsr() {
        steps.push(StepId::Qsr);
    }

    if record.is_product() {
        steps.push(StepId::ProductAffected);
        steps.push(StepId::ProductEca);
    } else if record.is_manufacturing() {
        if record.needs_em() {
            steps.push(StepId::Em);
        }
        if record.needs_sd() {
            steps.push(StepId::Sd);
        }
    }

    if record.is_full_track() {
        steps.push(StepId::Crb);
    }

    steps.push(StepId::Deliverables);
    steps.push(StepId::Review);
    steps
}

/// Position of `current` in `steps`.
pub fn current_index(steps: &[StepId], current: StepId) -> Option<usize> {
    steps.iter().position(|&step| step == current)
}

/// The step after `current`, or `current` when it is last or absent.
pub fn next_step(steps: &[StepId], current: StepId) -> StepId {
    current_index(steps, current)
        .and_then(|i| steps.get(i + 1))
        .copied()
        .unwrap_or(current)
}

/// The step before `current`, or `current` when it is first or absent.
pub fn previous_step(steps: &[StepId], current: StepId) -> StepId {
    current_index(steps, current)
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| steps.get(i))
        .copied()
        .unwrap_or(current)
}

/// Where `current` lands after the list changed.
///
/// The step itself if still present, else the nearest earlier step in
/// canonical order, else the first step of the list.
pub fn resolve_current(steps: &[StepId], current: StepId) -> StepId {
    if steps.contains(&current) {
        return current;
    }

    steps
        .iter()
        .rev()
        .find(|&&step| step < current)
        .or_else(|| steps.first())
        .copied()
        .unwrap_or(StepId::Search)
}
