//! Branch determinations made on the first step.
//!
//! The flag groups here carry mutual-exclusion rules, so fields are private
//! and every write goes through a setter that keeps the group consistent.
//! Derived flags (`needsQSR`, `needsEM`, `needsSD`) are serialised for
//! readers of record files but recomputed on load.

use serde::{Deserialize, Serialize};

use super::schema::{ChangeType, EcaType};

/// Whether the change touches QSR-controlled documents.
///
/// "None of the above" and the three inclusion flags exclude each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QsrFlags", into = "QsrFlags")]
pub struct QsrDetermination {
    includes_qsr_datasets: bool,
    includes_quality_datasets: bool,
    includes_training_documents: bool,
    none_of_above: bool,
}

impl QsrDetermination {
    /// A determination with only "none of the above" checked.
    pub fn none_of_above() -> Self {
        Self {
            none_of_above: true,
            ..Default::default()
        }
    }

    pub fn includes_qsr_datasets(&self) -> bool {
        self.includes_qsr_datasets
    }

    pub fn includes_quality_datasets(&self) -> bool {
        self.includes_quality_datasets
    }

    pub fn includes_training_documents(&self) -> bool {
        self.includes_training_documents
    }

    pub fn is_none_of_above(&self) -> bool {
        self.none_of_above
    }

    pub fn set_includes_qsr_datasets(&mut self, value: bool) {
        self.includes_qsr_datasets = value;
        self.clear_none_if(value);
    }

    pub fn set_includes_quality_datasets(&mut self, value: bool) {
        self.includes_quality_datasets = value;
        self.clear_none_if(value);
    }

    pub fn set_includes_training_documents(&mut self, value: bool) {
        self.includes_training_documents = value;
        self.clear_none_if(value);
    }

    /// Checking "none of the above" clears every inclusion flag.
    pub fn set_none_of_above(&mut self, value: bool) {
        self.none_of_above = value;
        if value {
            self.includes_qsr_datasets = false;
            self.includes_quality_datasets = false;
            self.includes_training_documents = false;
        }
    }

    fn clear_none_if(&mut self, included: bool) {
        if included {
            self.none_of_above = false;
        }
    }

    /// Any inclusion flag is set.
    pub fn needs_qsr(&self) -> bool {
        self.includes_qsr_datasets
            || self.includes_quality_datasets
            || self.includes_training_documents
    }

    /// The user made a choice: an inclusion flag or "none of the above".
    pub fn is_answered(&self) -> bool {
        self.needs_qsr() || self.none_of_above
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct QsrFlags {
    includes_qsr_datasets: bool,
    includes_quality_datasets: bool,
    includes_training_documents: bool,
    #[serde(rename = "noneOfAboveQSR")]
    none_of_above_qsr: bool,
    #[serde(rename = "needsQSR")]
    needs_qsr: bool,
}

impl From<QsrFlags> for QsrDetermination {
    fn from(flags: QsrFlags) -> Self {
        // Apply "none" first so inclusion flags win over a contradictory file.
        let mut determination = Self::default();
        determination.set_none_of_above(flags.none_of_above_qsr);
        determination.set_includes_qsr_datasets(flags.includes_qsr_datasets);
        determination.set_includes_quality_datasets(flags.includes_quality_datasets);
        determination.set_includes_training_documents(flags.includes_training_documents);
        determination
    }
}

impl From<QsrDetermination> for QsrFlags {
    fn from(d: QsrDetermination) -> Self {
        Self {
            includes_qsr_datasets: d.includes_qsr_datasets,
            includes_quality_datasets: d.includes_quality_datasets,
            includes_training_documents: d.includes_training_documents,
            none_of_above_qsr: d.none_of_above,
            needs_qsr: d.needs_qsr(),
        }
    }
}

/// Which manufacturing assessment a manufacturing change needs.
///
/// The three EM-group flags and the SD flag exclude each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ManufacturingFlags", into = "ManufacturingFlags")]
pub struct ManufacturingDetermination {
    includes_product_design_in_mfg: bool,
    includes_mfg_datasets_em: bool,
    includes_service_datasets: bool,
    includes_mfg_datasets_sd: bool,
}

impl ManufacturingDetermination {
    pub fn includes_product_design_in_mfg(&self) -> bool {
        self.includes_product_design_in_mfg
    }

    pub fn includes_mfg_datasets_em(&self) -> bool {
        self.includes_mfg_datasets_em
    }

    pub fn includes_service_datasets(&self) -> bool {
        self.includes_service_datasets
    }

    pub fn includes_mfg_datasets_sd(&self) -> bool {
        self.includes_mfg_datasets_sd
    }

    pub fn set_includes_product_design_in_mfg(&mut self, value: bool) {
        self.includes_product_design_in_mfg = value;
        self.clear_sd_if(value);
    }

    pub fn set_includes_mfg_datasets_em(&mut self, value: bool) {
        self.includes_mfg_datasets_em = value;
        self.clear_sd_if(value);
    }

    pub fn set_includes_service_datasets(&mut self, value: bool) {
        self.includes_service_datasets = value;
        self.clear_sd_if(value);
    }

    /// Setting SD clears every EM-group flag.
    pub fn set_includes_mfg_datasets_sd(&mut self, value: bool) {
        self.includes_mfg_datasets_sd = value;
        if value {
            self.includes_product_design_in_mfg = false;
            self.includes_mfg_datasets_em = false;
            self.includes_service_datasets = false;
        }
    }

    fn clear_sd_if(&mut self, em_set: bool) {
        if em_set {
            self.includes_mfg_datasets_sd = false;
        }
    }

    pub fn needs_em(&self) -> bool {
        self.includes_product_design_in_mfg
            || self.includes_mfg_datasets_em
            || self.includes_service_datasets
    }

    pub fn needs_sd(&self) -> bool {
        self.includes_mfg_datasets_sd
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ManufacturingFlags {
    includes_product_design_in_mfg: bool,
    #[serde(rename = "includesMfgDatasetsEM")]
    includes_mfg_datasets_em: bool,
    includes_service_datasets: bool,
    #[serde(rename = "includesMfgDatasetsSD")]
    includes_mfg_datasets_sd: bool,
    #[serde(rename = "needsEM")]
    needs_em: bool,
    #[serde(rename = "needsSD")]
    needs_sd: bool,
}

impl From<ManufacturingFlags> for ManufacturingDetermination {
    fn from(flags: ManufacturingFlags) -> Self {
        // SD first, so a file that sets both groups keeps the EM group.
        let mut determination = Self::default();
        determination.set_includes_mfg_datasets_sd(flags.includes_mfg_datasets_sd);
        determination.set_includes_product_design_in_mfg(flags.includes_product_design_in_mfg);
        determination.set_includes_mfg_datasets_em(flags.includes_mfg_datasets_em);
        determination.set_includes_service_datasets(flags.includes_service_datasets);
        determination
    }
}

impl From<ManufacturingDetermination> for ManufacturingFlags {
    fn from(d: ManufacturingDetermination) -> Self {
        Self {
            includes_product_design_in_mfg: d.includes_product_design_in_mfg,
            includes_mfg_datasets_em: d.includes_mfg_datasets_em,
            includes_service_datasets: d.includes_service_datasets,
            includes_mfg_datasets_sd: d.includes_mfg_datasets_sd,
            needs_em: d.needs_em(),
            needs_sd: d.needs_sd(),
        }
    }
}

/// Derive the ordered set of required assessment types.
pub fn required_eca_types(
    change_type: Option<ChangeType>,
    qsr: Option<&QsrDetermination>,
    manufacturing: Option<&ManufacturingDetermination>,
) -> Vec<EcaType> {
    let mut types = Vec::new();

    if qsr.is_some_and(QsrDetermination::needs_qsr) {
        types.push(EcaType::Qsr);
    }

    match change_type {
        Some(ChangeType::Product) => types.push(EcaType::Product),
        Some(ChangeType::Manufacturing) => {
            if manufacturing.is_some_and(ManufacturingDetermination::needs_em) {
                types.push(EcaType::Em);
            }
            if manufacturing.is_some_and(ManufacturingDetermination::needs_sd) {
                types.push(EcaType::Sd);
            }
        }
        None => {}
    }

    types
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qsr_needs_any_inclusion_flag() {
        let mut qsr = QsrDetermination::default();
        assert!(!qsr.needs_qsr());
        assert!(!qsr.is_answered());

        qsr.set_includes_training_documents(true);
        assert!(qsr.needs_qsr());
        assert!(qsr.is_answered());
    }

    #[test]
    fn qsr_none_of_above_clears_inclusions() {
        let mut qsr = QsrDetermination::default();
        qsr.set_includes_qsr_datasets(true);
        qsr.set_includes_quality_datasets(true);

        qsr.set_none_of_above(true);

        assert!(qsr.is_none_of_above());
        assert!(!qsr.includes_qsr_datasets());
        assert!(!qsr.includes_quality_datasets());
        assert!(!qsr.needs_qsr());
        assert!(qsr.is_answered());
    }

    #[test]
    fn qsr_inclusion_clears_none_of_above() {
        let setters: [fn(&mut QsrDetermination, bool); 3] = [
            QsrDetermination::set_includes_qsr_datasets,
            QsrDetermination::set_includes_quality_datasets,
            QsrDetermination::set_includes_training_documents,
        ];
        for set in setters {
            let mut qsr = QsrDetermination::none_of_above();
            set(&mut qsr, true);
            assert!(!qsr.is_none_of_above());
            assert!(qsr.needs_qsr());
        }
    }

    #[test]
    fn em_flags_clear_sd() {
        let setters: [fn(&mut ManufacturingDetermination, bool); 3] = [
            ManufacturingDetermination::set_includes_product_design_in_mfg,
            ManufacturingDetermination::set_includes_mfg_datasets_em,
            ManufacturingDetermination::set_includes_service_datasets,
        ];
        for set in setters {
            let mut mfg = ManufacturingDetermination::default();
            mfg.set_includes_mfg_datasets_sd(true);
            assert!(mfg.needs_sd());

            set(&mut mfg, true);

            assert!(!mfg.includes_mfg_datasets_sd());
            assert!(mfg.needs_em());
            assert!(!mfg.needs_sd());
        }
    }

    #[test]
    fn sd_flag_clears_em_group() {
        let mut mfg = ManufacturingDetermination::default();
        mfg.set_includes_product_design_in_mfg(true);
        mfg.set_includes_mfg_datasets_em(true);
        mfg.set_includes_service_datasets(true);

        mfg.set_includes_mfg_datasets_sd(true);

        assert!(!mfg.includes_product_design_in_mfg());
        assert!(!mfg.includes_mfg_datasets_em());
        assert!(!mfg.includes_service_datasets());
        assert!(!mfg.needs_em());
        assert!(mfg.needs_sd());
    }

    #[test]
    fn unsetting_a_flag_does_not_touch_the_other_group() {
        let mut mfg = ManufacturingDetermination::default();
        mfg.set_includes_mfg_datasets_sd(true);
        mfg.set_includes_service_datasets(false);
        assert!(mfg.needs_sd());
    }

    #[test]
    fn deserialization_normalizes_contradictions() {
        let qsr: QsrDetermination = serde_yaml::from_str(
            "includesQsrDatasets: true\nnoneOfAboveQSR: true\nneedsQSR: false\n",
        )
        .unwrap();
        assert!(qsr.needs_qsr());
        assert!(!qsr.is_none_of_above());

        let mfg: ManufacturingDetermination =
            serde_yaml::from_str("includesMfgDatasetsEM: true\nincludesMfgDatasetsSD: true\n")
                .unwrap();
        assert!(mfg.needs_em());
        assert!(!mfg.needs_sd());
    }

    #[test]
    fn serialization_includes_derived_flags() {
        let mut mfg = ManufacturingDetermination::default();
        mfg.set_includes_mfg_datasets_em(true);
        let json = serde_json::to_value(mfg).unwrap();
        assert_eq!(json["needsEM"], true);
        assert_eq!(json["needsSD"], false);
        assert_eq!(json["includesMfgDatasetsEM"], true);
    }

    #[test]
    fn required_types_for_product_with_qsr() {
        let mut qsr = QsrDetermination::default();
        qsr.set_includes_qsr_datasets(true);

        let types = required_eca_types(Some(ChangeType::Product), Some(&qsr), None);
        assert_eq!(types, vec![EcaType::Qsr, EcaType::Product]);
    }

    #[test]
    fn required_types_for_manufacturing_branches() {
        let mut em = ManufacturingDetermination::default();
        em.set_includes_service_datasets(true);
        assert_eq!(
            required_eca_types(Some(ChangeType::Manufacturing), None, Some(&em)),
            vec![EcaType::Em]
        );

        let mut sd = ManufacturingDetermination::default();
        sd.set_includes_mfg_datasets_sd(true);
        assert_eq!(
            required_eca_types(Some(ChangeType::Manufacturing), None, Some(&sd)),
            vec![EcaType::Sd]
        );
    }

    #[test]
    fn manufacturing_flags_ignored_for_product_changes() {
        let mut em = ManufacturingDetermination::default();
        em.set_includes_mfg_datasets_em(true);
        assert_eq!(
            required_eca_types(Some(ChangeType::Product), None, Some(&em)),
            vec![EcaType::Product]
        );
    }

    #[test]
    fn no_classification_no_types() {
        assert!(required_eca_types(None, None, None).is_empty());
    }
}
