//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use oracle_core::Type;

#[inline]
pub fn ensure_registered<'a>(ty: Option<&'a Type>, qualified_name: &str) -> &'a Type {
    match ty {
        Some(ty) => ty,
        None => panic!(
            "type table: `{qualified_name}` is not registered \
             (caller must prove existence before using must_get)"
        ),
    }
}

#[inline]
pub fn ensure_resolves<'a>(ty: Option<&'a Type>, reference: &dyn std::fmt::Display) -> &'a Type {
    match ty {
        Some(ty) => ty,
        None => panic!(
            "type table: reference `{reference}` does not resolve \
             (caller must prove existence before using must_resolve)"
        ),
    }
}
