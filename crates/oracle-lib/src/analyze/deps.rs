//! Table-wide dependency graph and change-impact queries.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};

use super::refs::dependencies;
use crate::resolution::Table;

type Edges = IndexMap<String, IndexSet<String>>;

/// Forward and reverse dependency edges over every user declaration.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    /// Declaration to the declarations it depends on.
    forward: Edges,
    /// Declaration to the declarations that depend on it.
    reverse: Edges,
    /// Key-domain structs, the only declarations reported as affected.
    entries: IndexSet<String>,
}

impl DependencyGraph {
    pub fn build(table: &Table) -> Self {
        let mut graph = Self::default();
        for ty in table.user_types() {
            let deps = dependencies(ty, table);
            for dep in &deps {
                graph
                    .reverse
                    .entry(dep.clone())
                    .or_default()
                    .insert(ty.qualified_name.clone());
            }
            graph.forward.insert(ty.qualified_name.clone(), deps);
            if ty.is_key_domain_struct() {
                graph.entries.insert(ty.qualified_name.clone());
            }
        }
        tracing::debug!(
            nodes = graph.forward.len(),
            edges = graph.forward.values().map(IndexSet::len).sum::<usize>(),
            entries = graph.entries.len(),
            "built dependency graph"
        );
        graph
    }

    /// Declarations `name` depends on directly.
    pub fn dependencies_of(&self, name: &str) -> impl Iterator<Item = &str> {
        edges_of(&self.forward, name)
    }

    /// Declarations that depend on `name` directly.
    pub fn dependents_of(&self, name: &str) -> impl Iterator<Item = &str> {
        edges_of(&self.reverse, name)
    }

    /// Persisted records whose shape may change when any of `changed` does.
    ///
    /// Walks reverse edges breadth-first from the changed names, which are
    /// themselves included. Only key-domain structs are returned, sorted.
    /// Generic arguments count as edges, so this may over-report.
    pub fn affected_entries<S: AsRef<str>>(&self, changed: &[S]) -> Vec<String> {
        let mut visited: IndexSet<&str> = IndexSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        for name in changed {
            let name = name.as_ref();
            if visited.insert(name) {
                queue.push_back(name);
            }
        }

        while let Some(name) = queue.pop_front() {
            tracing::trace!(name, "visiting dependents");
            for dependent in self.dependents_of(name) {
                if visited.insert(dependent) {
                    queue.push_back(dependent);
                }
            }
        }

        let mut affected: Vec<String> = visited
            .into_iter()
            .filter(|name| self.entries.contains(*name))
            .map(str::to_owned)
            .collect();
        affected.sort();
        affected
    }
}

fn edges_of<'a>(edges: &'a Edges, name: &str) -> impl Iterator<Item = &'a str> + use<'a> {
    edges
        .get(name)
        .into_iter()
        .flat_map(|set| set.iter().map(String::as_str))
}
