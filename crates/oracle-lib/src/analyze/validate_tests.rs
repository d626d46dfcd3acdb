use oracle_core::{AliasForm, DistinctForm, Field, StructForm, Type, TypeParam, TypeRef};

use super::validate;
use crate::Config;
use crate::diagnostics::DiagnosticKind;
use crate::resolution::Table;

fn table(types: Vec<Type>) -> Table {
    let mut table = Table::new();
    for ty in types {
        table.add(ty.with_file_path("schema.oracle")).unwrap();
    }
    table
}

fn kinds(table: &Table, config: &Config) -> Vec<DiagnosticKind> {
    validate(table, config).iter().map(|d| d.kind()).collect()
}

#[test]
fn valid_schema_has_no_diagnostics() {
    let table = table(vec![
        Type::new("t", "Base", StructForm::new().with_field(Field::new("id", TypeRef::named("uuid")))),
        Type::new(
            "t",
            "Child",
            StructForm::new()
                .extending(TypeRef::named("t.Base"))
                .omitting("id")
                .with_field(Field::new("tags", TypeRef::map_of(TypeRef::named("string"), TypeRef::named("t.Base")))),
        ),
    ]);

    assert!(validate(&table, &Config::default()).is_empty());
}

#[test]
fn undefined_reference() {
    let table = table(vec![Type::new(
        "t",
        "A",
        StructForm::new().with_field(Field::new("b", TypeRef::array_of(TypeRef::named("t.Missing")))),
    )]);

    let diagnostics = validate(&table, &Config::default());
    assert_eq!(diagnostics.error_count(), 1);
    insta::assert_snapshot!(diagnostics.render(), @r"
    error: `t.Missing` is not defined
      --> t.A (schema.oracle)
      help: check the spelling or import the declaring schema
    ");
}

#[test]
fn tolerate_partial_downgrades_undefined_references() {
    let table = table(vec![Type::new(
        "t",
        "A",
        AliasForm::new(TypeRef::named("t.Missing")),
    )]);

    let diagnostics = validate(&table, &Config::new().tolerate_partial(true));
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(diagnostics.into_result().is_ok());
}

#[test]
fn undefined_type_param() {
    let table = table(vec![Type::new(
        "t",
        "Box",
        StructForm::new()
            .with_type_param(TypeParam::new("T"))
            .with_field(Field::new("ok", TypeRef::param("T")))
            .with_field(Field::new("bad", TypeRef::param("U"))),
    )]);

    let diagnostics = validate(&table, &Config::default());
    insta::assert_snapshot!(diagnostics.render(), @r"
    error: type parameter `U` is not declared
      --> t.Box (schema.oracle)
    ");
}

#[test]
fn unknown_parent_and_parent_not_struct() {
    let table = table(vec![Type::new(
        "t",
        "A",
        StructForm::new()
            .extending(TypeRef::named("t.Missing"))
            .extending(TypeRef::named("string")),
    )]);

    assert_eq!(
        kinds(&table, &Config::default()),
        [DiagnosticKind::UnknownParent, DiagnosticKind::ParentNotStruct]
    );
}

#[test]
fn circular_inheritance_reports_each_member() {
    let table = table(vec![
        Type::new("t", "A", StructForm::new().extending(TypeRef::named("t.B"))),
        Type::new("t", "B", StructForm::new().extending(TypeRef::named("t.A"))),
        Type::new("t", "C", StructForm::new().extending(TypeRef::named("t.A"))),
    ]);

    let diagnostics = validate(&table, &Config::default());
    insta::assert_snapshot!(diagnostics.render(), @r"
    error: `t.A` inherits from itself
      --> t.A (schema.oracle)
      help: cycle: t.A -> t.B -> t.A
      help: remove one `extends` edge from the cycle

    error: `t.B` inherits from itself
      --> t.B (schema.oracle)
      help: cycle: t.B -> t.A -> t.B
      help: remove one `extends` edge from the cycle
    ");
}

#[test]
fn self_extension_is_circular() {
    let table = table(vec![Type::new(
        "t",
        "A",
        StructForm::new().extending(TypeRef::named("t.A")),
    )]);

    assert_eq!(
        kinds(&table, &Config::default()),
        [DiagnosticKind::CircularInheritance]
    );
}

#[test]
fn unknown_omitted_field_respects_config() {
    let table = table(vec![
        Type::new("t", "Base", StructForm::new().with_field(Field::new("id", TypeRef::named("uuid")))),
        Type::new(
            "t",
            "Child",
            StructForm::new()
                .extending(TypeRef::named("t.Base"))
                .omitting("id")
                .omitting("nope"),
        ),
    ]);

    let diagnostics = validate(&table, &Config::default());
    insta::assert_snapshot!(diagnostics.render(), @r"
    error: omitted field `nope` is not provided by any parent
      --> t.Child (schema.oracle)
    ");

    assert!(validate(&table, &Config::new().check_omissions(false)).is_empty());
}

#[test]
fn omissions_under_broken_parent_are_filtered() {
    let table = table(vec![Type::new(
        "t",
        "Child",
        StructForm::new()
            .extending(TypeRef::named("t.Missing"))
            .omitting("id"),
    )]);

    let diagnostics = validate(&table, &Config::default());
    assert_eq!(diagnostics.len(), 2);
    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].kind(), DiagnosticKind::UnknownParent);
}

#[test]
fn generic_arity_mismatch() {
    let table = table(vec![Type::new(
        "t",
        "Ids",
        DistinctForm::new(TypeRef::named("Map").with_args([TypeRef::named("string")])),
    )]);

    let diagnostics = validate(&table, &Config::default());
    insta::assert_snapshot!(diagnostics.render(), @r"
    error: wrong number of type arguments: `Map` expects 2, found 1
      --> t.Ids (schema.oracle)
    ");
}

#[test]
fn errors_fail_into_result() {
    let table = table(vec![Type::new(
        "t",
        "A",
        AliasForm::new(TypeRef::named("t.Missing")),
    )]);

    let err = validate(&table, &Config::default()).into_result().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"schema validation failed with 1 errors");
}
