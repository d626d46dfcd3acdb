//! Type table: registration, lookup and category filters.
//!
//! Declarations are kept in registration order with a name index on the
//! side. Order matters: bare-name lookup returns the first match, so the
//! table must never reorder what the loader handed it.

use indexmap::{IndexMap, IndexSet};
use oracle_core::{
    BuiltinGeneric, Form, FormKind, PrimitiveType, RefTarget, Type, TypeRef, is_number_primitive,
    is_primitive, is_string_primitive,
};

use super::invariants::{ensure_registered, ensure_resolves};
use crate::{Error, Result};

/// Every declaration of a schema set, builtins included.
///
/// Built once by a single loading pass, then read-only.
#[derive(Clone, Debug)]
pub struct Table {
    types: Vec<Type>,
    /// Qualified name to position in `types`.
    index: IndexMap<String, usize>,
    /// Schema files already loaded.
    imports: IndexSet<String>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Create a table holding only the builtin primitives and generics.
    pub fn new() -> Self {
        let mut table = Self {
            types: Vec::new(),
            index: IndexMap::new(),
            imports: IndexSet::new(),
        };
        for prim in PrimitiveType::ALL {
            let form = Form::Primitive {
                name: prim.name().to_owned(),
            };
            table.push(Type::new("", prim.name(), form));
        }
        for generic in BuiltinGeneric::ALL {
            let form = Form::BuiltinGeneric {
                name: generic.name().to_owned(),
                arity: generic.arity(),
            };
            table.push(Type::new("", generic.name(), form));
        }
        table
    }

    fn push(&mut self, ty: Type) {
        self.index.insert(ty.qualified_name.clone(), self.types.len());
        self.types.push(ty);
    }

    /// Register a declaration.
    ///
    /// Fails without touching the table if the qualified name is taken. No
    /// other consistency checks run here; references are resolved lazily.
    pub fn add(&mut self, mut ty: Type) -> Result<()> {
        if self.index.contains_key(&ty.qualified_name) {
            return Err(Error::DuplicateType {
                qualified_name: ty.qualified_name,
            });
        }
        if let Form::Struct(form) = &mut ty.form {
            form.promote_key_domain();
        }
        self.push(ty);
        Ok(())
    }

    /// Exact lookup by qualified name.
    pub fn get(&self, qualified_name: &str) -> Option<&Type> {
        self.index.get(qualified_name).map(|&i| &self.types[i])
    }

    /// Exact lookup for a name the caller already knows is registered.
    ///
    /// # Panics
    ///
    /// If `qualified_name` is not registered.
    pub fn must_get(&self, qualified_name: &str) -> &Type {
        ensure_registered(self.get(qualified_name), qualified_name)
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.index.contains_key(qualified_name)
    }

    /// Two-phase lookup: `namespace.name` first, then the first declaration
    /// whose bare name matches, in registration order.
    pub fn lookup(&self, namespace: &str, name: &str) -> Option<&Type> {
        self.get(&oracle_core::qualify(namespace, name))
            .or_else(|| self.types.iter().find(|t| t.name == name))
    }

    /// Resolve a reference written inside `from_namespace`.
    ///
    /// Runs the two-phase [`lookup`](Self::lookup) first, so a declaration in
    /// the referencing namespace shadows a builtin or foreign type with the
    /// same bare name. An already qualified name falls through to an exact
    /// match. Type-parameter references never resolve to a declaration.
    pub fn resolve(&self, type_ref: &TypeRef, from_namespace: &str) -> Option<&Type> {
        match &type_ref.target {
            RefTarget::Named(name) => self
                .lookup(from_namespace, name)
                .or_else(|| self.get(name)),
            RefTarget::Param(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // ------------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------------

    /// All declarations in registration order, builtins first.
    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.types.iter()
    }

    /// Declarations that came from a schema file.
    pub fn user_types(&self) -> impl Iterator<Item = &Type> {
        self.types.iter().filter(|t| !t.form.is_builtin())
    }

    fn of_kind(&self, kind: FormKind) -> impl Iterator<Item = &Type> {
        self.types.iter().filter(move |t| t.kind() == kind)
    }

    pub fn struct_types(&self) -> impl Iterator<Item = &Type> {
        self.of_kind(FormKind::Struct)
    }

    pub fn enum_types(&self) -> impl Iterator<Item = &Type> {
        self.of_kind(FormKind::Enum)
    }

    pub fn distinct_types(&self) -> impl Iterator<Item = &Type> {
        self.of_kind(FormKind::Distinct)
    }

    pub fn alias_types(&self) -> impl Iterator<Item = &Type> {
        self.of_kind(FormKind::Alias)
    }

    pub fn types_in_namespace(&self, namespace: &str) -> impl Iterator<Item = &Type> {
        self.types.iter().filter(move |t| t.namespace == namespace)
    }

    pub fn structs_in_namespace(&self, namespace: &str) -> impl Iterator<Item = &Type> {
        self.types_in_namespace(namespace)
            .filter(|t| t.kind() == FormKind::Struct)
    }

    pub fn enums_in_namespace(&self, namespace: &str) -> impl Iterator<Item = &Type> {
        self.types_in_namespace(namespace)
            .filter(|t| t.kind() == FormKind::Enum)
    }

    /// Declarations carrying a type-level domain named `domain`.
    pub fn types_with_domain(&self, domain: &str) -> impl Iterator<Item = &Type> {
        self.types.iter().filter(move |t| t.has_domain(domain))
    }

    // ------------------------------------------------------------------------
    // Primitive classification
    // ------------------------------------------------------------------------

    pub fn is_primitive_type(&self, name: &str) -> bool {
        is_primitive(name)
    }

    pub fn is_string_primitive_type(&self, name: &str) -> bool {
        is_string_primitive(name)
    }

    pub fn is_number_primitive_type(&self, name: &str) -> bool {
        is_number_primitive(name)
    }

    // ------------------------------------------------------------------------
    // Import bookkeeping
    // ------------------------------------------------------------------------

    /// Record a schema file as loaded. Returns `false` if it already was.
    pub fn mark_imported(&mut self, path: impl Into<String>) -> bool {
        self.imports.insert(path.into())
    }

    pub fn is_imported(&self, path: &str) -> bool {
        self.imports.contains(path)
    }

    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }
}

/// Exact resolution of a [`TypeRef`] against a table.
pub trait ResolveRef {
    /// The referenced declaration, `None` for a type parameter or a miss.
    fn resolve<'t>(&self, table: &'t Table) -> Option<&'t Type>;

    /// # Panics
    ///
    /// If the reference does not resolve.
    fn must_resolve<'t>(&self, table: &'t Table) -> &'t Type;
}

impl ResolveRef for TypeRef {
    fn resolve<'t>(&self, table: &'t Table) -> Option<&'t Type> {
        self.name().and_then(|name| table.get(name))
    }

    fn must_resolve<'t>(&self, table: &'t Table) -> &'t Type {
        ensure_resolves(self.resolve(table), self)
    }
}
