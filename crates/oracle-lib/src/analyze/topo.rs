//! Dependency-ordered traversal of a subset of declarations.

use std::collections::VecDeque;

use indexmap::IndexMap;
use oracle_core::Type;

use super::refs::dependencies;
use crate::resolution::Table;

/// Order `types` so every declaration follows its dependencies.
///
/// Only dependencies inside `types` count, and a declaration referring to
/// itself is not an edge, so recursive structs still sort. Ties keep input
/// order. If the subset contains a cycle the input is returned unchanged:
/// a pathological schema degrades the ordering instead of failing the build.
pub fn topological_sort<'t>(table: &Table, types: &[&'t Type]) -> Vec<&'t Type> {
    let position: IndexMap<&str, usize> = types
        .iter()
        .enumerate()
        .map(|(i, t)| (t.qualified_name.as_str(), i))
        .collect();

    let mut in_degree = vec![0usize; types.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); types.len()];
    for (i, ty) in types.iter().enumerate() {
        for dep in dependencies(ty, table) {
            let Some(&j) = position.get(dep.as_str()) else {
                continue;
            };
            if j == i {
                continue;
            }
            in_degree[i] += 1;
            dependents[j].push(i);
        }
    }

    let mut ready: VecDeque<usize> = (0..types.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut sorted = Vec::with_capacity(types.len());
    while let Some(i) = ready.pop_front() {
        sorted.push(types[i]);
        for &d in &dependents[i] {
            in_degree[d] -= 1;
            if in_degree[d] == 0 {
                ready.push_back(d);
            }
        }
    }

    if sorted.len() < types.len() {
        tracing::debug!(
            emitted = sorted.len(),
            total = types.len(),
            "dependency cycle, keeping input order"
        );
        return types.to_vec();
    }
    sorted
}
