use oracle_core::{
    AliasForm, DistinctForm, EnumForm, EnumValue, Field, StructForm, Type, TypeParam, TypeRef,
};

use super::dependencies;
use crate::resolution::Table;

fn deps_of(table: &Table, name: &str) -> Vec<String> {
    dependencies(table.must_get(name), table).into_iter().collect()
}

fn table() -> Table {
    let mut table = Table::new();
    table.add(Type::new("a", "Foo", StructForm::new())).unwrap();
    table.add(Type::new("a", "Bar", StructForm::new())).unwrap();
    table
        .add(Type::new(
            "a",
            "Level",
            EnumForm::default().with_value(EnumValue::int("low", 0)),
        ))
        .unwrap();
    table
}

#[test]
fn builtins_are_not_edges_but_their_args_are() {
    let mut table = table();
    let form = StructForm::new()
        .with_field(Field::new("n", TypeRef::named("int32")))
        .with_field(Field::new("list", TypeRef::array_of(TypeRef::named("a.Foo"))))
        .with_field(Field::new(
            "map",
            TypeRef::map_of(TypeRef::named("string"), TypeRef::named("a.Bar")),
        ));
    table.add(Type::new("a", "Holder", form)).unwrap();

    assert_eq!(deps_of(&table, "a.Holder"), ["a.Foo", "a.Bar"]);
}

#[test]
fn extends_and_generic_args_are_edges() {
    let mut table = table();
    table
        .add(Type::new(
            "a",
            "Box",
            StructForm::new()
                .with_type_param(TypeParam::new("T"))
                .with_field(Field::new("value", TypeRef::param("T"))),
        ))
        .unwrap();
    let form = StructForm::new()
        .extending(TypeRef::named("a.Box").with_args([TypeRef::named("a.Level")]))
        .with_field(Field::new("foo", TypeRef::named("a.Foo")))
        .with_field(Field::new("again", TypeRef::named("a.Foo")));
    table.add(Type::new("a", "Child", form)).unwrap();

    assert_eq!(deps_of(&table, "a.Child"), ["a.Box", "a.Level", "a.Foo"]);
    assert!(deps_of(&table, "a.Box").is_empty());
}

#[test]
fn alias_and_distinct_depend_on_their_target() {
    let mut table = table();
    table
        .add(Type::new("b", "FooAlias", AliasForm::new(TypeRef::named("a.Foo"))))
        .unwrap();
    table
        .add(Type::new(
            "b",
            "Keys",
            DistinctForm::new(TypeRef::array_of(TypeRef::named("a.Bar"))),
        ))
        .unwrap();

    assert_eq!(deps_of(&table, "b.FooAlias"), ["a.Foo"]);
    assert_eq!(deps_of(&table, "b.Keys"), ["a.Bar"]);
    assert!(deps_of(&table, "a.Level").is_empty());
}

#[test]
fn unresolvable_refs_are_skipped_but_args_walked() {
    let mut table = table();
    let form = StructForm::new()
        .with_field(Field::new("gone", TypeRef::named("x.Missing")))
        .with_field(Field::new(
            "wrapped",
            TypeRef::named("x.Gone").with_args([TypeRef::named("a.Foo")]),
        ));
    table.add(Type::new("a", "Partial", form)).unwrap();

    assert_eq!(deps_of(&table, "a.Partial"), ["a.Foo"]);
}

#[test]
fn bare_names_resolve_from_the_owning_namespace() {
    let mut table = table();
    let form = StructForm::new().with_field(Field::new("bar", TypeRef::named("Bar")));
    table.add(Type::new("a", "Local", form)).unwrap();

    assert_eq!(deps_of(&table, "a.Local"), ["a.Bar"]);
}
