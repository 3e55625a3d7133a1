//! Full vs fast track routing.

use crate::error::Result;
use crate::record::{
    score_label, ChangeRecord, ComplexityScores, RecordUpdate, TrackType, SCORE_RANGE,
};
use crate::ui::{PromptOption, UserInterface};
use crate::workflow::StepId;

use super::fields::{ask_choice, ask_text, require_text};
use super::StepForm;

/// Complexity scoring. The total decides whether the CRB step is shown.
#[derive(Debug, Clone, Default)]
pub struct TrackForm {
    /// Impact, risk and cost, in [`ComplexityScores::CRITERIA`] order.
    scores: [Option<u8>; 3],
    rationale: String,
}

impl TrackForm {
    pub fn from_record(record: &ChangeRecord) -> Self {
        let scores = record
            .complexity_scores
            .map(|s| [Some(s.impact()), Some(s.risk()), Some(s.cost())])
            .unwrap_or_default();

        Self {
            scores,
            rationale: record.complexity_rationale.clone(),
        }
    }

    /// The complete score set, once all three criteria are chosen.
    pub fn scores(&self) -> Option<ComplexityScores> {
        match self.scores {
            [Some(impact), Some(risk), Some(cost)] => {
                ComplexityScores::new(impact, risk, cost).ok()
            }
            _ => None,
        }
    }

    pub fn track_type(&self) -> Option<TrackType> {
        self.scores().map(|s| s.track_type())
    }
}

impl StepForm for TrackForm {
    fn id(&self) -> StepId {
        StepId::Track
    }

    fn collect(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        for (slot, criterion) in self.scores.iter_mut().zip(ComplexityScores::CRITERIA) {
            let options = SCORE_RANGE
                .map(|v| PromptOption::new(v.to_string(), format!("{} - {}", v, score_label(v))))
                .collect();
            let current = slot.map(|v| v.to_string());
            let raw = ask_choice(
                ui,
                &format!("track.{}", criterion),
                &format!("{} score", capitalize(criterion)),
                options,
                current.as_deref(),
            )?;
            *slot = raw.trim().parse().ok().filter(|v| SCORE_RANGE.contains(v));
        }

        if let Some(scores) = self.scores() {
            ui.message(&format!(
                "Total complexity score: {} ({})",
                scores.total(),
                scores.track_type().label()
            ));
        }

        self.rationale = ask_text(
            ui,
            "track.rationale",
            "Rationale for complexity scores",
            &self.rationale,
        )?;
        Ok(())
    }

    fn problems(&self) -> Vec<String> {
        let mut problems: Vec<String> = self
            .scores
            .iter()
            .zip(ComplexityScores::CRITERIA)
            .filter(|(score, _)| score.is_none())
            .map(|(_, criterion)| format!("Select a score for {}", criterion))
            .collect();
        require_text(&mut problems, &self.rationale, "Rationale");
        problems
    }

    fn to_update(&self) -> RecordUpdate {
        let update = RecordUpdate {
            complexity_rationale: Some(self.rationale.clone()),
            ..Default::default()
        };
        match self.scores() {
            Some(scores) => update.complexity(scores),
            None => update,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
