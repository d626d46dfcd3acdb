//! Dependency extraction shared by topological sort and the dependency graph.

use indexmap::IndexSet;
use oracle_core::{Form, Type, TypeRef};

use crate::resolution::Table;

/// References that make up a declaration's structure.
///
/// Structs depend on their parents and field types, aliases on their target,
/// distinct types on their base. Enums and builtins have none.
pub fn structural_refs(ty: &Type) -> Vec<&TypeRef> {
    match &ty.form {
        Form::Struct(s) => s
            .extends
            .iter()
            .chain(s.fields.iter().map(|f| &f.type_ref))
            .collect(),
        Form::Alias(a) => vec![&a.target],
        Form::Distinct(d) => vec![&d.base],
        Form::Enum(_) | Form::Primitive { .. } | Form::BuiltinGeneric { .. } => Vec::new(),
    }
}

/// Qualified names of the user declarations `ty` depends on.
///
/// Builtins are not edges, but their type arguments are: `Array<Foo>` yields
/// `Foo`. References that don't resolve are skipped so a partially loaded
/// table can still be analyzed. Order follows first appearance.
pub fn dependencies(ty: &Type, table: &Table) -> IndexSet<String> {
    let mut deps = IndexSet::new();
    for root in structural_refs(ty) {
        for r in root.walk() {
            let Some(target) = table.resolve(r, &ty.namespace) else {
                continue;
            };
            if !target.form.is_builtin() {
                deps.insert(target.qualified_name.clone());
            }
        }
    }
    deps
}
