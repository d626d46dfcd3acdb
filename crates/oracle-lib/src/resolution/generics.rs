//! Generic substitution: binding type parameters to concrete references.

use std::borrow::Cow;

use indexmap::IndexMap;
use oracle_core::{RefTarget, TypeParam, TypeRef};

use crate::{Error, Result};

/// Type-parameter name to the reference bound to it.
pub type TypeArgs = IndexMap<String, TypeRef>;

/// Replace bound type-parameter references inside `type_ref`.
///
/// A bound parameter is replaced outright; the bound reference is taken as
/// already concrete and not walked again. Unbound parameters pass through so
/// partially written schemas can still be analyzed. Borrows when nothing
/// beneath `type_ref` changed.
pub fn substitute<'r>(type_ref: &'r TypeRef, args: &TypeArgs) -> Cow<'r, TypeRef> {
    if let RefTarget::Param(name) = &type_ref.target {
        return match args.get(name) {
            Some(bound) => {
                let mut bound = bound.clone();
                // `T[4]` keeps its size after `T` is bound.
                if type_ref.array_size.is_some() {
                    bound.array_size = type_ref.array_size;
                }
                Cow::Owned(bound)
            }
            None => Cow::Borrowed(type_ref),
        };
    }

    let mut rewritten: Option<Vec<TypeRef>> = None;
    for (i, arg) in type_ref.type_args.iter().enumerate() {
        match substitute(arg, args) {
            Cow::Owned(new) => rewritten
                .get_or_insert_with(|| type_ref.type_args[..i].to_vec())
                .push(new),
            Cow::Borrowed(same) => {
                if let Some(done) = rewritten.as_mut() {
                    done.push(same.clone());
                }
            }
        }
    }

    match rewritten {
        Some(type_args) => Cow::Owned(TypeRef {
            target: type_ref.target.clone(),
            type_args,
            array_size: type_ref.array_size,
        }),
        None => Cow::Borrowed(type_ref),
    }
}

/// Substitute, then fail if any type-parameter reference is left.
///
/// Code emission uses this: an unbound parameter reaching a generated
/// layout is a bug upstream, not an incomplete document.
pub fn instantiate(type_ref: &TypeRef, args: &TypeArgs) -> Result<TypeRef> {
    let result = substitute(type_ref, args).into_owned();
    if let Some(name) = result.walk().find_map(TypeRef::param_name) {
        return Err(Error::UnboundTypeParam {
            name: name.to_owned(),
        });
    }
    Ok(result)
}

/// Bind `params` to `args` by position.
///
/// Surplus arguments are ignored. A parameter without an argument takes its
/// declared default, or stays unbound.
pub fn type_arg_map(params: &[TypeParam], args: &[TypeRef]) -> TypeArgs {
    params
        .iter()
        .enumerate()
        .filter_map(|(i, param)| {
            let bound = args.get(i).or(param.default.as_ref())?;
            Some((param.name.clone(), bound.clone()))
        })
        .collect()
}
