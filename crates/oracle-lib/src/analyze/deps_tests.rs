use oracle_core::{Domain, Field, StructForm, Type, TypeParam, TypeRef};

use super::DependencyGraph;
use crate::resolution::Table;

fn key() -> Field {
    Field::new("key", TypeRef::named("uint32")).with_domain(Domain::new("key"))
}

fn entry(name: &str, refs: &[&str]) -> Type {
    refs.iter().fold(
        Type::new("t", name, StructForm::new().with_field(key())),
        |ty, r| with_ref(ty, r),
    )
}

fn plain(name: &str, refs: &[&str]) -> Type {
    refs.iter()
        .fold(Type::new("t", name, StructForm::new()), |ty, r| with_ref(ty, r))
}

fn with_ref(mut ty: Type, r: &str) -> Type {
    if let oracle_core::Form::Struct(form) = &mut ty.form {
        let name = format!("f{}", form.fields.len());
        form.fields.push(Field::new(name, TypeRef::named(r)));
    }
    ty
}

fn build(types: Vec<Type>) -> DependencyGraph {
    let mut table = Table::new();
    for ty in types {
        table.add(ty).unwrap();
    }
    DependencyGraph::build(&table)
}

#[test]
fn forward_and_reverse_edges() {
    let graph = build(vec![
        plain("Meta", &[]),
        plain("Config", &["t.Meta"]),
        entry("Entry", &["t.Config", "t.Meta"]),
    ]);

    let deps: Vec<_> = graph.dependencies_of("t.Entry").collect();
    assert_eq!(deps, ["t.Config", "t.Meta"]);
    let dependents: Vec<_> = graph.dependents_of("t.Meta").collect();
    assert_eq!(dependents, ["t.Config", "t.Entry"]);
    assert_eq!(graph.dependents_of("t.Entry").count(), 0);
    assert_eq!(graph.dependencies_of("t.Unknown").count(), 0);
}

#[test]
fn affected_entries_is_reflexive() {
    let graph = build(vec![entry("Rack", &[])]);
    assert_eq!(graph.affected_entries(&["t.Rack"]), ["t.Rack"]);
}

#[test]
fn affected_entries_is_transitive_and_filters_to_entries() {
    let graph = build(vec![
        plain("Leaf", &[]),
        plain("Middle", &["t.Leaf"]),
        plain("Upper", &["t.Middle"]),
        entry("Zeta", &["t.Upper"]),
        entry("Alpha", &["t.Middle"]),
        entry("Unrelated", &[]),
    ]);

    assert_eq!(graph.affected_entries(&["t.Leaf"]), ["t.Alpha", "t.Zeta"]);
}

#[test]
fn affected_entries_is_cycle_safe() {
    let graph = build(vec![
        entry("A", &["t.B"]),
        entry("B", &["t.C"]),
        entry("C", &["t.A"]),
    ]);

    assert_eq!(graph.affected_entries(&["t.B"]), ["t.A", "t.B", "t.C"]);
}

#[test]
fn generic_arguments_propagate_impact() {
    let mut table = Table::new();
    table
        .add(Type::new(
            "t",
            "Box",
            StructForm::new()
                .with_type_param(TypeParam::new("T"))
                .with_field(Field::new("inner", TypeRef::param("T"))),
        ))
        .unwrap();
    table.add(plain("Payload", &[])).unwrap();
    table
        .add(Type::new(
            "t",
            "Record",
            StructForm::new().with_field(key()).with_field(Field::new(
                "boxed",
                TypeRef::named("t.Box").with_args([TypeRef::named("t.Payload")]),
            )),
        ))
        .unwrap();

    let graph = DependencyGraph::build(&table);
    assert_eq!(graph.affected_entries(&["t.Payload"]), ["t.Record"]);
}

#[test]
fn unknown_changed_names_affect_nothing() {
    let graph = build(vec![entry("A", &[])]);
    assert!(graph.affected_entries(&["t.Missing"]).is_empty());
    assert!(graph.affected_entries::<&str>(&[]).is_empty());
}

#[test]
fn inherited_key_field_does_not_make_an_entry() {
    let child = Type::new(
        "t",
        "Child",
        StructForm::new().extending(TypeRef::named("t.Base")),
    );
    let marked = Type::new(
        "t",
        "Marked",
        StructForm::new().extending(TypeRef::named("t.Base")).key_domain(),
    );
    let graph = build(vec![entry("Base", &[]), child, marked]);

    let dependents: Vec<_> = graph.dependents_of("t.Base").collect();
    assert_eq!(dependents, ["t.Child", "t.Marked"]);
    assert_eq!(graph.affected_entries(&["t.Base"]), ["t.Base", "t.Marked"]);
}
