use proptest::prelude::*;
use sheet_mapped::alias::AliasIndex;
use sheet_mapped::schema::RecordSchema;

/// Record stub for tests that only exercise the name table.
#[derive(Debug, Default)]
struct Blank;

fn two_field_schema() -> RecordSchema<Blank> {
    RecordSchema::builder()
        .text("id", ["编号", "code"], |_: &mut Blank, _| {})
        .text("label", ["标签"], |_: &mut Blank, _| {})
        .build()
}

#[test]
fn canonical_names_and_aliases_resolve_to_their_field() {
    let schema = two_field_schema();
    let (index, collisions) = AliasIndex::build(&schema);

    assert!(collisions.is_empty());
    assert_eq!(index.resolve("id"), Some(0));
    assert_eq!(index.resolve("编号"), Some(0));
    assert_eq!(index.resolve("code"), Some(0));
    assert_eq!(index.resolve("label"), Some(1));
    assert_eq!(index.resolve("标签"), Some(1));
    assert_eq!(index.resolve("unknown"), None);
}

#[test]
fn resolution_trims_surrounding_whitespace() {
    let schema = two_field_schema();
    let (index, _) = AliasIndex::build(&schema);

    assert_eq!(index.resolve("  编号  "), Some(0));
    assert_eq!(index.resolve("\tlabel\t"), Some(1));
}

#[test]
fn resolution_is_case_sensitive() {
    let schema = two_field_schema();
    let (index, _) = AliasIndex::build(&schema);

    assert_eq!(index.resolve("ID"), None);
    assert_eq!(index.resolve("Code"), None);
}

#[test]
fn duplicate_alias_keeps_first_declared_owner() {
    let schema = RecordSchema::builder()
        .text("first", ["shared"], |_: &mut Blank, _| {})
        .text("second", ["shared"], |_: &mut Blank, _| {})
        .build();
    let (index, collisions) = AliasIndex::build(&schema);

    assert_eq!(index.resolve("shared"), Some(0));
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].name, "shared");
    assert_eq!(collisions[0].field, "second");
    assert_eq!(collisions[0].owner, "first");
}

#[test]
fn alias_clashing_with_another_canonical_name_is_reported() {
    let schema = RecordSchema::builder()
        .text("amount", Vec::<String>::new(), |_: &mut Blank, _| {})
        .text("total", ["amount"], |_: &mut Blank, _| {})
        .build();
    let (index, collisions) = AliasIndex::build(&schema);

    assert_eq!(index.resolve("amount"), Some(0));
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].owner, "amount");
}

#[test]
fn blank_aliases_are_skipped() {
    let schema = RecordSchema::builder()
        .text("name", ["  ", ""], |_: &mut Blank, _| {})
        .build();
    let (index, collisions) = AliasIndex::build(&schema);

    assert!(collisions.is_empty());
    assert_eq!(index.len(), 1);
    assert_eq!(index.resolve(""), None);
}

proptest! {
    /// With globally distinct labels the index maps each label back to the
    /// field it was declared on, without collisions.
    #[test]
    fn collision_free_schemas_resolve_every_declared_name(
        labels in prop::collection::btree_set("[a-z]{2,8}", 1..24)
    ) {
        let labels: Vec<String> = labels.into_iter().collect();
        let mut builder = RecordSchema::<Blank>::builder();
        let mut expected: Vec<(String, usize)> = Vec::new();
        for (slot, chunk) in labels.chunks(3).enumerate() {
            let aliases: Vec<String> = chunk[1..].to_vec();
            for label in chunk {
                expected.push((label.clone(), slot));
            }
            builder = builder.text(&chunk[0], aliases, |_: &mut Blank, _| {});
        }
        let (index, collisions) = AliasIndex::build(&builder.build());

        prop_assert!(collisions.is_empty());
        for (label, slot) in expected {
            prop_assert_eq!(index.resolve(&label), Some(slot));
        }
    }
}
