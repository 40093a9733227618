use pretty_assertions::assert_eq;
use qa_core::QaRecord;
use qa_engine::{export_snapshot, parse_snapshot};

#[test]
fn snapshot_round_trips_records_and_option_order() {
    let records = vec![
        QaRecord::free_text("What is studied?", "Soil bacteria"),
        QaRecord::multiple_choice("Pick one", [("C", "third"), ("A", "first"), ("B", "second")], "A"),
    ];

    let json = export_snapshot(&records).unwrap();
    let parsed = parse_snapshot(&json).unwrap();

    assert_eq!(parsed, records);
    let keys: Vec<_> = parsed[1].options.as_ref().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["C", "A", "B"]);
    assert_eq!(export_snapshot(&parsed).unwrap(), json);
}

#[test]
fn malformed_snapshot_is_an_error() {
    assert!(parse_snapshot("{\"question\":\"x\"}").is_err());
    assert!(parse_snapshot("[{\"answer\":\"x\"}]").is_err());
}
