//! End-to-end flattening tests over the public API, using records shaped
//! like real measurement responses. No network access required.

use serde_json::json;
use wims_client::{FlatTable, Record};

/// A measurement record trimmed from a real archive response.
fn measurement_record(id: &str, determinand: &str, result: f64) -> Record {
    json!({
        "@id": format!("http://environment.data.gov.uk/water-quality/data/measurement/{}", id),
        "sample": {
            "@id": format!("http://environment.data.gov.uk/water-quality/data/sample/{}", id),
            "samplingPoint": {
                "@id": "http://environment.data.gov.uk/water-quality/id/sampling-point/NE-49100170",
                "notation": "NE-49100170",
                "label": "Tyne at Wylam Bridge"
            },
            "sampleDateTime": "2021-03-17T09:40:00"
        },
        "determinand": {
            "label": determinand,
            "notation": "0061",
            "unit": { "label": "ph" }
        },
        "result": result
    })
}

#[test]
fn measurement_records_flatten_to_expected_columns() {
    let records = vec![
        measurement_record("a-1", "pH", 7.2),
        measurement_record("a-2", "pH", 7.9),
    ];

    let table = FlatTable::from_records(&records);

    assert_eq!(table.len(), 2);
    for expected in [
        "@id",
        "sample_@id",
        "sample_samplingPoint_notation",
        "sample_samplingPoint_label",
        "sample_sampleDateTime",
        "determinand_label",
        "determinand_notation",
        "determinand_unit_label",
        "result",
    ] {
        assert!(
            table.columns.iter().any(|c| c == expected),
            "missing column {}",
            expected
        );
    }

    assert_eq!(table.value(0, "result"), Some(&json!(7.2)));
    assert_eq!(table.value(1, "result"), Some(&json!(7.9)));
    assert_eq!(
        table.value(0, "sample_samplingPoint_notation"),
        Some(&json!("NE-49100170"))
    );
}

#[test]
fn mixed_record_shapes_produce_union_columns() {
    // sample records carry different fields than measurement records;
    // a mixed batch must keep every row and union the columns
    let records = vec![
        measurement_record("a-1", "pH", 7.2),
        json!({
            "@id": "http://environment.data.gov.uk/water-quality/data/sample/b-1",
            "sampleDateTime": "2021-06-01T11:00:00",
            "purpose": { "label": "PLANNED INVESTIGATION" }
        }),
    ];

    let table = FlatTable::from_records(&records);

    assert_eq!(table.len(), 2);
    assert!(table.columns.iter().any(|c| c == "result"));
    assert!(table.columns.iter().any(|c| c == "purpose_label"));
    // the sample row has no result, the measurement row no purpose
    assert_eq!(table.value(1, "result"), None);
    assert_eq!(table.value(0, "purpose_label"), None);
}

#[test]
fn table_round_trips_through_csv() {
    let records = vec![
        measurement_record("a-1", "pH", 7.2),
        measurement_record("a-2", "pH", 7.9),
    ];
    let table = FlatTable::from_records(&records);

    let mut buf = Vec::new();
    table.write_csv(&mut buf).expect("csv write failed");
    let csv = String::from_utf8(buf).expect("csv should be utf-8");

    let mut lines = csv.lines();
    let header = lines.next().expect("header row");
    assert!(header.contains("sample_samplingPoint_notation"));
    assert_eq!(lines.count(), 2, "one csv line per record");
}
