//! Oracle: semantic core of the schema compiler.
//!
//! Takes parsed declarations, registers them in a [`Table`], and answers the
//! questions the rest of the build asks about them: flattened struct layouts,
//! generic instantiation, dependency order, change impact, and breaking
//! differences between two versions of a schema set.
//!
//! # Example
//!
//! ```
//! use oracle_core::{Field, StructForm, Type, TypeRef};
//! use oracle_lib::{Table, resolution::unified_fields};
//!
//! let mut table = Table::new();
//! let base = StructForm::new().with_field(Field::new("key", TypeRef::named("uint32")));
//! table.add(Type::new("ontology", "Base", base)).unwrap();
//!
//! let rack = StructForm::new()
//!     .extending(TypeRef::named("ontology.Base"))
//!     .with_field(Field::new("name", TypeRef::named("string")));
//! table.add(Type::new("rack", "Rack", rack)).unwrap();
//!
//! let fields = unified_fields(table.must_get("rack.Rack"), &table);
//! let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
//! assert_eq!(names, ["key", "name"]);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
mod config;
pub mod diagnostics;
pub mod diff;
pub mod resolution;

#[cfg(test)]
mod e2e_tests;

pub use analyze::{DependencyGraph, topological_sort, validate};
pub use config::Config;
pub use diagnostics::{DiagnosticKind, Diagnostics, Severity};
pub use diff::{FieldDiff, FieldDiffKind, TypeDiff, TypeDiffKind, diff_structs, diff_tables};
pub use resolution::{Table, TypeArgs, instantiate, substitute, unified_fields};

/// Errors surfaced by table construction and strict resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A declaration with this qualified name is already registered.
    #[error("duplicate type: {qualified_name}")]
    DuplicateType { qualified_name: String },

    /// A type-parameter reference survived strict instantiation.
    #[error("unbound type parameter: {name}")]
    UnboundTypeParam { name: String },

    #[error("schema validation failed with {} errors", .0.error_count())]
    ValidationFailed(Diagnostics),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
