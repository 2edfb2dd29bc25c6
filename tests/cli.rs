mod common;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::str::contains;
use sheet_mapped::schema::SchemaDoc;

const SCHEMA_YAML: &str = "\
fields:
  - name: name
    aliases: [\"姓名\"]
    datatype: text
    required: true
  - name: score
    datatype: decimal
";

#[test]
fn map_fails_loudly_for_a_missing_workbook() {
    let workspace = TestWorkspace::new();
    let schema_path = workspace.write("schema.yaml", SCHEMA_YAML);
    let missing = workspace.path().join("absent.xlsx");

    Command::cargo_bin("sheet-mapped")
        .expect("binary exists")
        .args([
            "map",
            "-i",
            missing.to_str().unwrap(),
            "-s",
            schema_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("error"));
}

#[test]
fn map_rejects_a_schema_with_duplicate_field_names() {
    let workspace = TestWorkspace::new();
    let schema_path = workspace.write(
        "bad.yaml",
        "fields:\n  - name: a\n    datatype: text\n  - name: a\n    datatype: text\n",
    );
    let missing = workspace.path().join("absent.xlsx");

    Command::cargo_bin("sheet-mapped")
        .expect("binary exists")
        .args([
            "map",
            "-i",
            missing.to_str().unwrap(),
            "-s",
            schema_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("declared more than once"));
}

#[test]
fn template_writes_a_loadable_schema_file() {
    let workspace = TestWorkspace::new();
    let schema_path = workspace.path().join("starter.yaml");

    Command::cargo_bin("sheet-mapped")
        .expect("binary exists")
        .args(["template", "-s", schema_path.to_str().unwrap()])
        .assert()
        .success();

    let doc = SchemaDoc::load(&schema_path).expect("template loads back");
    assert!(!doc.fields.is_empty());
    assert!(doc.schema_version.is_some());
}
