//! Struct field unification: flattening `extends` chains into one field list.
//!
//! The resulting order is durable output. Generated layouts follow it, so
//! ancestors come first (in `extends` order, each keeping its own order) and
//! own fields follow.

use oracle_core::{Field, Type, merge_domains};

use super::generics::{substitute, type_arg_map};
use super::table::Table;

/// The effective field list of a struct, inherited fields included.
///
/// Non-struct declarations have no fields. Unresolvable, non-struct and
/// circular parents contribute nothing; reporting them is the job of
/// [`validate`](crate::validate).
pub fn unified_fields(ty: &Type, table: &Table) -> Vec<Field> {
    let mut stack = Vec::new();
    unify(ty, table, &mut stack)
}

fn unify(ty: &Type, table: &Table, stack: &mut Vec<String>) -> Vec<Field> {
    let Some(form) = ty.as_struct() else {
        return Vec::new();
    };
    stack.push(ty.qualified_name.clone());

    let mut fields: Vec<Field> = Vec::new();
    for parent_ref in &form.extends {
        let Some(parent) = table.resolve(parent_ref, &ty.namespace) else {
            tracing::debug!(child = %ty.qualified_name, parent = %parent_ref, "skipping unresolvable parent");
            continue;
        };
        let Some(parent_form) = parent.as_struct() else {
            tracing::debug!(child = %ty.qualified_name, parent = %parent.qualified_name, "skipping non-struct parent");
            continue;
        };
        if stack.contains(&parent.qualified_name) {
            tracing::debug!(child = %ty.qualified_name, parent = %parent.qualified_name, "skipping circular parent");
            continue;
        }

        let args = type_arg_map(&parent_form.type_params, &parent_ref.type_args);
        for field in unify(parent, table, stack) {
            if form.is_field_omitted(&field.name) || fields.iter().any(|f| f.name == field.name) {
                continue;
            }
            let type_ref = substitute(&field.type_ref, &args).into_owned();
            fields.push(Field { type_ref, ..field });
        }
    }

    for own in &form.fields {
        match fields.iter_mut().find(|f| f.name == own.name) {
            Some(inherited) => *inherited = override_field(inherited, own),
            None => fields.push(own.clone()),
        }
    }

    stack.pop();
    fields
}

/// The child's type and flags win; domains merge child over parent.
fn override_field(inherited: &Field, own: &Field) -> Field {
    Field {
        domains: merge_domains(&inherited.domains, &own.domains),
        ..own.clone()
    }
}
