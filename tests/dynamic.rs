mod common;

use common::{boolean, number, row, text};
use sheet_mapped::engine::MappingEngine;
use sheet_mapped::schema::{FieldSpec, FieldValue, SchemaDoc, SemanticType};
use serde_json::json;

fn student_doc() -> SchemaDoc {
    SchemaDoc {
        fields: vec![
            FieldSpec {
                name: "name".to_string(),
                aliases: vec!["姓名".to_string()],
                datatype: SemanticType::Text,
                required: true,
            },
            FieldSpec {
                name: "age".to_string(),
                aliases: vec!["年龄".to_string()],
                datatype: SemanticType::Integer,
                required: false,
            },
            FieldSpec {
                name: "enrolled".to_string(),
                aliases: Vec::new(),
                datatype: SemanticType::Boolean,
                required: false,
            },
        ],
        schema_version: None,
    }
}

#[test]
fn schema_doc_drives_mapping_into_dynamic_records() {
    let doc = student_doc();
    let schema = doc.bind();
    let engine = MappingEngine::new(&schema);
    let rows = vec![
        row(vec![text("姓名"), text("年龄"), text("enrolled")]),
        row(vec![text("Alice"), number(10.0), boolean(true)]),
    ];

    let (records, report) = engine.run_with_factory(rows, doc.record_factory());

    assert_eq!(report.records_kept(), 1);
    let record = &records[0];
    assert_eq!(
        record.get("name"),
        Some(&FieldValue::Text("Alice".to_string()))
    );
    assert_eq!(record.get("age"), Some(&FieldValue::Integer(10)));
    assert_eq!(record.get("enrolled"), Some(&FieldValue::Boolean(true)));
}

#[test]
fn missing_required_field_drops_the_row() {
    let doc = student_doc();
    let schema = doc.bind();
    let engine = MappingEngine::new(&schema);
    let rows = vec![
        row(vec![text("姓名"), text("年龄")]),
        row(vec![text("Alice"), number(10.0)]),
        row(vec![text(""), number(9.0)]),
    ];

    let (records, report) = engine.run_with_factory(rows, doc.record_factory());

    // The blank name fails the required-text rule; the optional boolean
    // column is absent from the sheet entirely, which is fine.
    assert_eq!(records.len(), 1);
    assert_eq!(report.validation_failures(), 1);
}

#[test]
fn required_non_text_field_only_needs_to_be_set() {
    let doc = SchemaDoc {
        fields: vec![FieldSpec {
            name: "count".to_string(),
            aliases: Vec::new(),
            datatype: SemanticType::Integer,
            required: true,
        }],
        schema_version: None,
    };
    let schema = doc.bind();
    let engine = MappingEngine::new(&schema);
    let rows = vec![
        row(vec![text("count")]),
        row(vec![number(0.0)]),
        row(vec![]),
    ];

    let (records, report) = engine.run_with_factory(rows, doc.record_factory());

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("count"), Some(&FieldValue::Integer(0)));
    assert_eq!(report.validation_failures(), 1);
}

#[test]
fn records_serialize_as_flat_json_objects() {
    let doc = student_doc();
    let schema = doc.bind();
    let engine = MappingEngine::new(&schema);
    let rows = vec![
        row(vec![text("姓名"), text("年龄"), text("enrolled")]),
        row(vec![text("Alice"), number(10.0), boolean(false)]),
    ];

    let (records, _) = engine.run_with_factory(rows, doc.record_factory());
    let value = serde_json::to_value(&records[0]).expect("serialize record");

    assert_eq!(
        value,
        json!({"name": "Alice", "age": 10, "enrolled": false})
    );
}
