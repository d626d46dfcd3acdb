//! Analyses over a built table.
//!
//! - Dependency extraction (refs)
//! - Dependency-ordered traversal (topo)
//! - Change-impact queries (deps)
//! - Reference validation (validate)

mod deps;
pub mod refs;
mod topo;
mod validate;

#[cfg(test)]
mod deps_tests;
#[cfg(test)]
mod refs_tests;
#[cfg(test)]
mod validate_tests;

pub use deps::DependencyGraph;
pub use refs::dependencies;
pub use topo::topological_sort;
pub use validate::validate;
