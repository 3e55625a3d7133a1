//! Fixed question and option catalogs embedded at compile time.
//!
//! The wizard's fixed content (the Product ECA table, the yes/no question
//! sets and the selectable option lists) lives in YAML under `catalog/`
//! and is compiled into the binary.

mod grouping;

pub use grouping::{group_rows, FunctionGroup, SubFunctionGroup};

use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::{EcaError, Result};
use crate::record::{Assessment, ChangeType, EcaRow};

/// Embedded catalog directory.
static CATALOG_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/catalog");

/// One row of the Product ECA table as shipped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogRow {
    pub id: String,
    pub function: String,
    pub sub_function: String,
    #[serde(default)]
    pub question: String,
    /// Pre-fills the justification column.
    #[serde(default)]
    pub guidance: Option<String>,
}

/// A fixed yes/no question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
}

/// Named question sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionSet {
    Qsr,
    Em,
    Sd,
}

impl QuestionSet {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Qsr => "qsr",
            Self::Em => "em",
            Self::Sd => "sd",
        }
    }
}

impl fmt::Display for QuestionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Deserialize)]
struct RowsFile {
    rows: Vec<CatalogRow>,
}

#[derive(Debug, Deserialize)]
struct SetsFile {
    sets: HashMap<String, Vec<Question>>,
}

#[derive(Debug, Default, Deserialize)]
struct ObjectTypes {
    #[serde(default)]
    product: Vec<String>,
    #[serde(default)]
    manufacturing: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OptionsFile {
    #[serde(default)]
    object_types: ObjectTypes,
    #[serde(default)]
    no_reason_options: Vec<String>,
}

/// The loaded catalogs.
#[derive(Debug, Clone)]
pub struct Catalog {
    rows: Vec<CatalogRow>,
    sets: HashMap<String, Vec<Question>>,
    product_object_types: Vec<String>,
    manufacturing_object_types: Vec<String>,
    no_reason_options: Vec<String>,
}

impl Catalog {
    /// Load the embedded catalogs.
    pub fn load() -> Result<Self> {
        let rows: RowsFile = parse_embedded("product_eca.yml")?;
        let sets: SetsFile = parse_embedded("assessments.yml")?;
        let options: OptionsFile = parse_embedded("options.yml")?;

        Ok(Self {
            rows: rows.rows,
            sets: sets.sets,
            product_object_types: options.object_types.product,
            manufacturing_object_types: options.object_types.manufacturing,
            no_reason_options: options.no_reason_options,
        })
    }

    /// Replace the "reason for no" options. An empty list keeps the defaults.
    pub fn with_no_reason_options(mut self, options: Vec<String>) -> Self {
        if !options.is_empty() {
            self.no_reason_options = options;
        }
        self
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    /// Fresh, unanswered Product ECA rows.
    pub fn seed_eca_rows(&self) -> Vec<EcaRow> {
        self.rows
            .iter()
            .map(|row| EcaRow {
                id: row.id.clone(),
                affected_function: row.function.clone(),
                affected_sub_function: row.sub_function.clone(),
                impact_analysis: row.question.clone(),
                justification: row.guidance.clone().unwrap_or_default(),
                ..Default::default()
            })
            .collect()
    }

    /// Questions in a set. Unknown sets are empty.
    pub fn questions(&self, set: QuestionSet) -> &[Question] {
        self.sets.get(set.key()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fresh, unanswered assessments for a set.
    pub fn seed_assessments(&self, set: QuestionSet) -> Vec<Assessment> {
        self.questions(set)
            .iter()
            .map(|q| Assessment::new(q.id.clone(), q.question.clone()))
            .collect()
    }

    /// Object types offered for a change type.
    pub fn object_types(&self, change_type: ChangeType) -> &[String] {
        match change_type {
            ChangeType::Product => &self.product_object_types,
            ChangeType::Manufacturing => &self.manufacturing_object_types,
        }
    }

    pub fn no_reason_options(&self) -> &[String] {
        &self.no_reason_options
    }
}

fn parse_embedded<T: serde::de::DeserializeOwned>(name: &str) -> Result<T> {
    let path = Path::new("catalog").join(name);
    let file = CATALOG_DIR
        .get_file(name)
        .ok_or_else(|| EcaError::ConfigNotFound { path: path.clone() })?;

    let content = file
        .contents_utf8()
        .ok_or_else(|| EcaError::ConfigParseError {
            path: path.clone(),
            message: "Invalid UTF-8".to_string(),
        })?;

    serde_yaml::from_str(content).map_err(|e| EcaError::ConfigParseError {
        path,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_all_catalogs() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.rows().len(), 51);
        assert_eq!(catalog.questions(QuestionSet::Qsr).len(), 5);
        assert_eq!(catalog.questions(QuestionSet::Em).len(), 8);
        assert_eq!(catalog.questions(QuestionSet::Sd).len(), 8);
        assert_eq!(catalog.no_reason_options().len(), 5);
    }

    #[test]
    fn row_ids_are_unique() {
        let catalog = Catalog::load().unwrap();
        let mut ids: Vec<_> = catalog.rows().iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 51);
    }

    #[test]
    fn seeded_rows_are_unanswered_with_guidance() {
        let catalog = Catalog::load().unwrap();
        let rows = catalog.seed_eca_rows();
        assert!(rows.iter().all(|r| r.affected.is_none() && r.impact.is_none()));

        let row2 = rows.iter().find(|r| r.id == "2").unwrap();
        assert_eq!(row2.affected_function, "Program Management");
        assert!(row2.justification.starts_with("1-Identify"));

        let row1 = rows.iter().find(|r| r.id == "1").unwrap();
        assert!(row1.justification.is_empty());
    }

    #[test]
    fn sd_set_differs_from_em() {
        let catalog = Catalog::load().unwrap();
        let em: Vec<_> = catalog.questions(QuestionSet::Em).iter().map(|q| &q.id).collect();
        let sd: Vec<_> = catalog.questions(QuestionSet::Sd).iter().map(|q| &q.id).collect();
        assert!(sd.iter().any(|id| id.as_str() == "sterility"));
        assert!(em.iter().any(|id| id.as_str() == "safety"));
        assert_ne!(em, sd);
    }

    #[test]
    fn seed_assessments_are_unanswered() {
        let catalog = Catalog::load().unwrap();
        let assessments = catalog.seed_assessments(QuestionSet::Qsr);
        assert_eq!(assessments.len(), 5);
        assert!(assessments.iter().all(|a| a.answer.is_none()));
    }

    #[test]
    fn object_types_per_change_type() {
        let catalog = Catalog::load().unwrap();
        assert!(catalog
            .object_types(ChangeType::Product)
            .iter()
            .any(|t| t == "Part"));
        assert!(catalog
            .object_types(ChangeType::Manufacturing)
            .iter()
            .any(|t| t == "SOP"));
    }

    #[test]
    fn option_overrides_ignore_empty_lists() {
        let catalog = Catalog::load().unwrap();
        let defaults = catalog.no_reason_options().to_vec();

        let same = catalog.clone().with_no_reason_options(Vec::new());
        assert_eq!(same.no_reason_options(), defaults.as_slice());

        let custom = catalog.with_no_reason_options(vec!["Custom".into()]);
        assert_eq!(custom.no_reason_options(), ["Custom".to_string()]);
    }
}
