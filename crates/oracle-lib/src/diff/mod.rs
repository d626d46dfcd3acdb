//! Schema diffing: detect breaking evolution between two schema snapshots.
//!
//! Both sides are compared on their *unified* field lists, so a change made
//! in an ancestor surfaces on every struct that inherits it. Field types are
//! compared by their canonical string with every name resolved against its
//! own table, so `Config` and `settings.Config` compare equal.
//!
//! The whole-table diff is asymmetric by intent: it reports removals and
//! changes to existing structs, never declarations that only exist in the
//! new snapshot.

use serde::{Deserialize, Serialize};

use oracle_core::{RefTarget, Type, TypeRef};

use crate::resolution::{Table, unified_fields};


/// Canonical fingerprint of a reference: `name<a, b>[N]`.
///
/// Named references, type arguments included, are replaced by the qualified
/// name they resolve to from `from_namespace`. Unresolved names are kept as
/// written. Equality fingerprint only, not parseable syntax.
pub fn type_string(type_ref: &TypeRef, table: &Table, from_namespace: &str) -> String {
    canonical(type_ref, table, from_namespace).to_string()
}

fn canonical(type_ref: &TypeRef, table: &Table, from_namespace: &str) -> TypeRef {
    let target = match &type_ref.target {
        RefTarget::Named(name) => RefTarget::Named(
            table
                .resolve(type_ref, from_namespace)
                .map_or_else(|| name.clone(), |ty| ty.qualified_name.clone()),
        ),
        RefTarget::Param(name) => RefTarget::Param(name.clone()),
    };
    TypeRef {
        target,
        type_args: type_ref
            .type_args
            .iter()
            .map(|arg| canonical(arg, table, from_namespace))
            .collect(),
        array_size: type_ref.array_size,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDiffKind {
    Unchanged,
    Added,
    Removed,
    TypeChanged,
}

/// Comparison of one field across snapshots.
///
/// `old_type` is empty for an added field, `new_type` for a removed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub name: String,
    pub kind: FieldDiffKind,
    pub old_type: String,
    pub new_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDiffKind {
    /// The struct exists on both sides; see the field diffs.
    Changed,
    /// The struct is gone from the new snapshot.
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDiff {
    pub type_name: String,
    pub kind: TypeDiffKind,
    pub fields: Vec<FieldDiff>,
    /// Any field diff is not [`FieldDiffKind::Unchanged`].
    pub changed: bool,
}

impl TypeDiff {
    /// A struct missing from the new snapshot.
    ///
    /// Carries one `Removed` field diff named after the struct itself, so
    /// consumers that only read field diffs still see the removal.
    fn removed(ty: &Type) -> Self {
        Self {
            type_name: ty.qualified_name.clone(),
            kind: TypeDiffKind::Removed,
            fields: vec![FieldDiff {
                name: ty.qualified_name.clone(),
                kind: FieldDiffKind::Removed,
                old_type: String::new(),
                new_type: String::new(),
            }],
            changed: true,
        }
    }

    pub fn count(&self, kind: FieldDiffKind) -> usize {
        self.fields.iter().filter(|f| f.kind == kind).count()
    }
}

/// Compare one struct across two snapshots.
///
/// Field types resolve from each side's own namespace and table.
pub fn diff_structs(old: &Type, new: &Type, old_table: &Table, new_table: &Table) -> TypeDiff {
    let old_fields = unified_fields(old, old_table);
    let new_fields = unified_fields(new, new_table);

    let mut fields: Vec<FieldDiff> = old_fields
        .iter()
        .map(|of| {
            let old_type = type_string(&of.type_ref, old_table, &old.namespace);
            match new_fields.iter().find(|nf| nf.name == of.name) {
                None => FieldDiff {
                    name: of.name.clone(),
                    kind: FieldDiffKind::Removed,
                    old_type,
                    new_type: String::new(),
                },
                Some(nf) => {
                    let new_type = type_string(&nf.type_ref, new_table, &new.namespace);
                    let kind = if old_type == new_type {
                        FieldDiffKind::Unchanged
                    } else {
                        FieldDiffKind::TypeChanged
                    };
                    FieldDiff {
                        name: of.name.clone(),
                        kind,
                        old_type,
                        new_type,
                    }
                }
            }
        })
        .collect();

    for nf in &new_fields {
        if !old_fields.iter().any(|of| of.name == nf.name) {
            fields.push(FieldDiff {
                name: nf.name.clone(),
                kind: FieldDiffKind::Added,
                old_type: String::new(),
                new_type: type_string(&nf.type_ref, new_table, &new.namespace),
            });
        }
    }

    let changed = fields.iter().any(|f| f.kind != FieldDiffKind::Unchanged);
    TypeDiff {
        type_name: old.qualified_name.clone(),
        kind: TypeDiffKind::Changed,
        fields,
        changed,
    }
}

/// Compare every struct of `old` against its counterpart in `new`.
///
/// Follows the old table's registration order and keeps only removed or
/// changed structs.
pub fn diff_tables(old: &Table, new: &Table) -> Vec<TypeDiff> {
    old.struct_types()
        .filter_map(|old_ty| match new.get(&old_ty.qualified_name) {
            None => Some(TypeDiff::removed(old_ty)),
            Some(new_ty) => {
                let diff = diff_structs(old_ty, new_ty, old, new);
                diff.changed.then_some(diff)
            }
        })
        .collect()
}

impl std::fmt::Display for FieldDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            FieldDiffKind::Unchanged => write!(f, "  {}: {}", self.name, self.old_type),
            FieldDiffKind::Added => write!(f, "+ {}: {}", self.name, self.new_type),
            FieldDiffKind::Removed => write!(f, "- {}: {}", self.name, self.old_type),
            FieldDiffKind::TypeChanged => {
                write!(f, "~ {}: {} -> {}", self.name, self.old_type, self.new_type)
            }
        }
    }
}

impl std::fmt::Display for TypeDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TypeDiffKind::Removed => write!(f, "- type {}", self.type_name),
            TypeDiffKind::Changed => {
                write!(f, "{}:", self.type_name)?;
                for field in self.fields.iter().filter(|d| d.kind != FieldDiffKind::Unchanged) {
                    write!(f, "\n  {field}")?;
                }
                Ok(())
            }
        }
    }
}
