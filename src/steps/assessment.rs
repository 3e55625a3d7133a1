//! QSR and manufacturing (EM / SD) assessments.

use crate::catalog::{Catalog, QuestionSet};
use crate::error::Result;
use crate::record::{Assessment, AssessmentSet, ChangeRecord, ManufacturingData, RecordUpdate};
use crate::ui::UserInterface;
use crate::workflow::StepId;

use super::fields::{ask_text, assessment_problems, collect_assessment, require_text};
use super::StepForm;

/// Keep saved answers when they belong to the same question set, else seed.
fn answers_for(saved: Option<&[Assessment]>, seeded: Vec<Assessment>) -> Vec<Assessment> {
    match saved {
        Some(saved)
            if saved.len() == seeded.len()
                && saved.iter().zip(&seeded).all(|(a, b)| a.id == b.id) =>
        {
            saved.to_vec()
        }
        _ => seeded,
    }
}

/// Fixed QSR questions.
#[derive(Debug, Clone)]
pub struct QsrForm {
    assessments: Vec<Assessment>,
    no_reasons: Vec<String>,
}

impl QsrForm {
    pub fn from_record(record: &ChangeRecord, catalog: &Catalog) -> Self {
        let saved = record
            .qsr_assessment
            .as_ref()
            .map(|set| set.assessments.as_slice());
        Self {
            assessments: answers_for(saved, catalog.seed_assessments(QuestionSet::Qsr)),
            no_reasons: catalog.no_reason_options().to_vec(),
        }
    }

    pub fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }
}

impl StepForm for QsrForm {
    fn id(&self) -> StepId {
        StepId::Qsr
    }

    fn collect(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        for assessment in &mut self.assessments {
            collect_assessment(ui, "qsr", assessment, &self.no_reasons)?;
        }
        Ok(())
    }

    fn problems(&self) -> Vec<String> {
        assessment_problems("QSR", &self.assessments)
    }

    fn to_update(&self) -> RecordUpdate {
        RecordUpdate {
            qsr_assessment: Some(Some(AssessmentSet {
                assessments: self.assessments.clone(),
            })),
            ..Default::default()
        }
    }
}

/// Manufacturing team and the EM or SD question set.
#[derive(Debug, Clone)]
pub struct ManufacturingForm {
    set: QuestionSet,
    data: ManufacturingData,
    no_reasons: Vec<String>,
}

impl ManufacturingForm {
    pub fn from_record(record: &ChangeRecord, catalog: &Catalog, set: QuestionSet) -> Self {
        let mut data = record.manufacturing_data.clone().unwrap_or_default();
        data.assessments = answers_for(Some(&data.assessments), catalog.seed_assessments(set));
        Self {
            set,
            data,
            no_reasons: catalog.no_reason_options().to_vec(),
        }
    }

    pub fn data(&self) -> &ManufacturingData {
        &self.data
    }

    fn prefix(&self) -> &'static str {
        match self.set {
            QuestionSet::Sd => "sd",
            _ => "em",
        }
    }
}

impl StepForm for ManufacturingForm {
    fn id(&self) -> StepId {
        match self.set {
            QuestionSet::Sd => StepId::Sd,
            _ => StepId::Em,
        }
    }

    fn collect(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let prefix = self.prefix();
        let data = &mut self.data;

        data.impacted_objects = ask_text(
            ui,
            &format!("{}.impacted-objects", prefix),
            "Impacted objects",
            &data.impacted_objects,
        )?;
        data.change_initiator = ask_text(
            ui,
            &format!("{}.change-initiator", prefix),
            "Change initiator",
            &data.change_initiator,
        )?;
        data.change_leader = ask_text(
            ui,
            &format!("{}.change-leader", prefix),
            "Change leader",
            &data.change_leader,
        )?;
        data.implementation_lead = ask_text(
            ui,
            &format!("{}.implementation-lead", prefix),
            "Implementation lead",
            &data.implementation_lead,
        )?;
        data.smes = ask_text(
            ui,
            &format!("{}.smes", prefix),
            "Subject matter experts",
            &data.smes,
        )?;

        for assessment in &mut data.assessments {
            collect_assessment(ui, prefix, assessment, &self.no_reasons)?;
        }
        Ok(())
    }

    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        require_text(&mut problems, &self.data.impacted_objects, "Impacted objects");
        require_text(&mut problems, &self.data.change_initiator, "Change initiator");
        require_text(&mut problems, &self.data.change_leader, "Change leader");
        problems.extend(assessment_problems(
            &self.prefix().to_uppercase(),
            &self.data.assessments,
        ));
        problems
    }

    fn to_update(&self) -> RecordUpdate {
        RecordUpdate {
            manufacturing_data: Some(Some(self.data.clone())),
            ..Default::default()
        }
    }
}
