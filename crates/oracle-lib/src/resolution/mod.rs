//! Name resolution and type-level evaluation over a [`Table`].
//!
//! - Registration and lookup (table)
//! - Generic substitution (generics)
//! - Inheritance flattening (unify)

mod generics;
mod invariants;
mod table;
mod unify;


pub use generics::{TypeArgs, instantiate, substitute, type_arg_map};
pub use table::{ResolveRef, Table};
pub use unify::unified_fields;
