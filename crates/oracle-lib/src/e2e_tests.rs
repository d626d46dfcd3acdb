use indoc::indoc;
use oracle_core::Type;

use crate::{Config, DependencyGraph, FieldDiff, FieldDiffKind, Table, diff_tables, validate};

/// Declarations as the loader hands them over, with `{value}` standing in
/// for the type of `Config.value`.
const SCHEMA: &str = indoc! {r#"
    [
        {
            "name": "Config",
            "namespace": "settings",
            "qualified_name": "settings.Config",
            "file_path": "schemas/settings.oracle",
            "form": {
                "form": "struct",
                "fields": [
                    {"name": "value", "type_ref": {"target": {"named": "{value}"}}}
                ]
            }
        },
        {
            "name": "Entry",
            "namespace": "settings",
            "qualified_name": "settings.Entry",
            "file_path": "schemas/settings.oracle",
            "form": {
                "form": "struct",
                "fields": [
                    {
                        "name": "key",
                        "type_ref": {"target": {"named": "uuid"}},
                        "domains": {"key": {"name": "key"}}
                    },
                    {"name": "config", "type_ref": {"target": {"named": "Config"}}}
                ]
            }
        }
    ]
"#};

fn load(value_type: &str) -> Table {
    let json = SCHEMA.replace("{value}", value_type);
    let types: Vec<Type> = serde_json::from_str(&json).unwrap();

    let mut table = Table::new();
    table.mark_imported("schemas/settings.oracle");
    for ty in types {
        table.add(ty).unwrap();
    }
    table
}

#[test]
fn retyped_field_is_diffed_and_impacts_its_entry() {
    let old = load("int32");
    let new = load("int64");

    assert!(validate(&new, &Config::default()).is_empty());
    assert!(new.must_get("settings.Entry").is_key_domain_struct());

    let diffs = diff_tables(&old, &new);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].type_name, "settings.Config");
    assert_eq!(
        diffs[0].fields,
        [FieldDiff {
            name: "value".into(),
            kind: FieldDiffKind::TypeChanged,
            old_type: "int32".into(),
            new_type: "int64".into(),
        }]
    );

    let graph = DependencyGraph::build(&new);
    assert_eq!(graph.affected_entries(&["settings.Config"]), ["settings.Entry"]);
}

#[test]
fn unchanged_snapshots_produce_no_diff() {
    assert!(diff_tables(&load("int32"), &load("int32")).is_empty());
}
