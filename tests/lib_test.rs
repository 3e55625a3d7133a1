//! Library integration tests.

use eca_wizard::record::{
    ChangeRecordAccumulator, ChangeType, ComplexityScores, QsrDetermination, RecordUpdate,
    TrackType, FULL_TRACK_THRESHOLD,
};
use eca_wizard::EcaError;

#[test]
fn error_types_are_public() {
    let err = EcaError::UnknownStep {
        id: "approval".into(),
    };
    assert!(err.to_string().contains("approval"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> eca_wizard::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use eca_wizard::cli::{Cli, Commands};

    let cli = Cli::parse_from(["eca", "steps", "--record", "ecr.yml", "--json"]);

    if let Some(Commands::Steps(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Steps command");
    }
}

#[test]
fn complexity_total_and_track_for_all_scores() {
    let mut seen = 0;
    for impact in 1..=3 {
        for risk in 1..=3 {
            for cost in 1..=3 {
                let scores = ComplexityScores::new(impact, risk, cost).unwrap();
                let total = impact + risk + cost;
                assert_eq!(scores.total(), total);

                let expected = if total >= FULL_TRACK_THRESHOLD {
                    TrackType::Full
                } else {
                    TrackType::Fast
                };
                assert_eq!(scores.track_type(), expected, "{impact}/{risk}/{cost}");
                seen += 1;
            }
        }
    }
    assert_eq!(seen, 27);
    assert_eq!(FULL_TRACK_THRESHOLD, 7);
}

#[test]
fn scores_outside_range_are_rejected() {
    for (impact, risk, cost) in [(0, 1, 1), (1, 4, 1), (1, 1, 9)] {
        assert!(matches!(
            ComplexityScores::new(impact, risk, cost),
            Err(EcaError::InvalidScore { .. })
        ));
    }
}

#[test]
fn merging_a_field_leaves_the_rest() {
    let mut acc = ChangeRecordAccumulator::new();
    acc.merge(
        RecordUpdate::new()
            .document_number("D-100")
            .change_type(ChangeType::Product),
    );

    let record = acc.merge(RecordUpdate::new().ecr_number("ECR-2"));

    assert_eq!(record.ecr_number, "ECR-2");
    assert_eq!(record.document_number, "D-100");
    assert_eq!(record.change_type, Some(ChangeType::Product));
}

#[test]
fn merging_a_group_replaces_it_whole() {
    let mut first = QsrDetermination::default();
    first.set_includes_qsr_datasets(true);
    first.set_includes_training_documents(true);

    let mut second = QsrDetermination::default();
    second.set_includes_quality_datasets(true);

    let mut acc = ChangeRecordAccumulator::new();
    acc.merge(RecordUpdate::new().qsr_determination(first));
    let record = acc.merge(RecordUpdate::new().qsr_determination(second));

    let qsr = record.qsr_determination.unwrap();
    assert!(qsr.includes_quality_datasets());
    assert!(!qsr.includes_qsr_datasets());
    assert!(!qsr.includes_training_documents());
}
