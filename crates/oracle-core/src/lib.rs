#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for Oracle schema declarations.
//!
//! A schema set is a flat list of [`Type`]s. Each type is a named, namespaced
//! declaration with exactly one [`Form`]. Fields and generic arguments point at
//! other declarations through [`TypeRef`]s, which are resolved lazily against a
//! table owned by `oracle-lib`.
//!
//! Everything here is plain data: the parser collaborator builds it, the
//! resolution engine reads it.

use serde::{Deserialize, Serialize};

mod domain;
mod primitives;


pub use domain::{Domain, Domains, Expression, ExpressionValue, KEY_DOMAIN, merge_domains};
pub use primitives::{
    BuiltinGeneric, PrimitiveType, is_number_primitive, is_primitive, is_string_primitive,
};

// ============================================================================
// Declarations
// ============================================================================

/// One named, namespaced declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Type {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    /// `namespace.name`, unique within a table.
    pub qualified_name: String,
    /// Schema file the declaration came from. Empty for builtins.
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub domains: Domains,
    pub form: Form,
}

impl Type {
    /// Create a declaration, deriving its qualified name.
    ///
    /// An empty namespace yields a bare qualified name (used by builtins).
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, form: impl Into<Form>) -> Self {
        let namespace = namespace.into();
        let name = name.into();
        Self {
            qualified_name: qualify(&namespace, &name),
            name,
            namespace,
            file_path: String::new(),
            domains: Domains::new(),
            form: form.into(),
        }
    }

    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = path.into();
        self
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domains.insert(domain.name.clone(), domain);
        self
    }

    pub fn has_domain(&self, name: &str) -> bool {
        self.domains.contains_key(name)
    }

    pub fn kind(&self) -> FormKind {
        self.form.kind()
    }

    pub fn as_struct(&self) -> Option<&StructForm> {
        match &self.form {
            Form::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Struct flagged as a persisted record (owns a `key` field).
    pub fn is_key_domain_struct(&self) -> bool {
        self.as_struct().is_some_and(|s| s.has_key_domain)
    }
}

/// Join a namespace and a name into a qualified name.
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_owned()
    } else {
        format!("{namespace}.{name}")
    }
}

/// The closed set of declaration shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum Form {
    /// Builtin scalar leaf.
    Primitive { name: String },
    /// Builtin container with a fixed number of type arguments.
    BuiltinGeneric { name: String, arity: usize },
    Struct(StructForm),
    Enum(EnumForm),
    /// Newtype wrapping a base type.
    Distinct(DistinctForm),
    /// Transparent rename of a target type.
    Alias(AliasForm),
}

impl Form {
    pub fn kind(&self) -> FormKind {
        match self {
            Self::Primitive { .. } => FormKind::Primitive,
            Self::BuiltinGeneric { .. } => FormKind::BuiltinGeneric,
            Self::Struct(_) => FormKind::Struct,
            Self::Enum(_) => FormKind::Enum,
            Self::Distinct(_) => FormKind::Distinct,
            Self::Alias(_) => FormKind::Alias,
        }
    }

    /// Type parameters declared by this form, empty for non-generic forms.
    pub fn type_params(&self) -> &[TypeParam] {
        match self {
            Self::Struct(s) => &s.type_params,
            Self::Distinct(d) => &d.type_params,
            Self::Alias(a) => &a.type_params,
            Self::Primitive { .. } | Self::BuiltinGeneric { .. } | Self::Enum(_) => &[],
        }
    }

    /// Builtin forms are registered by the table, never by a schema file.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Primitive { .. } | Self::BuiltinGeneric { .. })
    }
}

/// Discriminant of a [`Form`], used by category filters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FormKind {
    Primitive,
    BuiltinGeneric,
    Struct,
    Enum,
    Distinct,
    Alias,
}

impl From<StructForm> for Form {
    fn from(form: StructForm) -> Self {
        Self::Struct(form)
    }
}

impl From<EnumForm> for Form {
    fn from(form: EnumForm) -> Self {
        Self::Enum(form)
    }
}

impl From<DistinctForm> for Form {
    fn from(form: DistinctForm) -> Self {
        Self::Distinct(form)
    }
}

impl From<AliasForm> for Form {
    fn from(form: AliasForm) -> Self {
        Self::Alias(form)
    }
}

// ============================================================================
// Forms
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StructForm {
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    /// Parent structs, in declaration order. The first listed parent wins
    /// name collisions.
    #[serde(default)]
    pub extends: Vec<TypeRef>,
    /// Inherited fields removed with `-name`.
    #[serde(default)]
    pub omitted_fields: Vec<String>,
    #[serde(default)]
    pub is_recursive: bool,
    /// Set when a field carries the `key` domain: the struct is a persisted record.
    #[serde(default)]
    pub has_key_domain: bool,
}

impl StructForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_type_param(mut self, param: TypeParam) -> Self {
        self.type_params.push(param);
        self
    }

    pub fn extending(mut self, parent: TypeRef) -> Self {
        self.extends.push(parent);
        self
    }

    pub fn omitting(mut self, field: impl Into<String>) -> Self {
        self.omitted_fields.push(field.into());
        self
    }

    pub fn key_domain(mut self) -> Self {
        self.has_key_domain = true;
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn type_param(&self, name: &str) -> Option<&TypeParam> {
        self.type_params.iter().find(|p| p.name == name)
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    pub fn is_field_omitted(&self, name: &str) -> bool {
        self.omitted_fields.iter().any(|f| f == name)
    }

    /// Raise `has_key_domain` if any own field carries the key domain.
    ///
    /// Only declared fields count. A struct that inherits its key field
    /// through `extends` stays unpromoted unless it sets the flag itself.
    pub fn promote_key_domain(&mut self) {
        if self.fields.iter().any(Field::has_key_domain) {
            self.has_key_domain = true;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumForm {
    #[serde(default)]
    pub values: Vec<EnumValue>,
    #[serde(default)]
    pub is_int_enum: bool,
}

impl EnumForm {
    pub fn with_value(mut self, value: EnumValue) -> Self {
        if matches!(value.value, EnumLiteral::Int(_)) && self.values.is_empty() {
            self.is_int_enum = true;
        }
        self.values.push(value);
        self
    }

    pub fn value(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: EnumLiteral,
    #[serde(default)]
    pub domains: Domains,
}

impl EnumValue {
    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: EnumLiteral::Int(value),
            domains: Domains::new(),
        }
    }

    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: EnumLiteral::Str(value.into()),
            domains: Domains::new(),
        }
    }

    /// The string value, or `""` for an int-valued entry.
    pub fn string_value(&self) -> &str {
        match &self.value {
            EnumLiteral::Str(s) => s,
            EnumLiteral::Int(_) => "",
        }
    }

    /// The int value, or `0` for a string-valued entry.
    pub fn int_value(&self) -> i64 {
        match self.value {
            EnumLiteral::Int(i) => i,
            EnumLiteral::Str(_) => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumLiteral {
    Int(i64),
    Str(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistinctForm {
    pub base: TypeRef,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
}

impl DistinctForm {
    pub fn new(base: TypeRef) -> Self {
        Self {
            base,
            type_params: Vec::new(),
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    pub fn type_param(&self, name: &str) -> Option<&TypeParam> {
        self.type_params.iter().find(|p| p.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AliasForm {
    pub target: TypeRef,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
}

impl AliasForm {
    pub fn new(target: TypeRef) -> Self {
        Self {
            target,
            type_params: Vec::new(),
        }
    }

    pub fn with_type_param(mut self, param: TypeParam) -> Self {
        self.type_params.push(param);
        self
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    pub fn type_param(&self, name: &str) -> Option<&TypeParam> {
        self.type_params.iter().find(|p| p.name == name)
    }
}

// ============================================================================
// Fields and references
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub type_ref: TypeRef,
    #[serde(default)]
    pub domains: Domains,
    /// Soft optional (`?`): may be absent, zero value allowed.
    #[serde(default)]
    pub is_optional: bool,
    /// Hard optional (`??`): absence is distinct from the zero value.
    #[serde(default)]
    pub is_hard_optional: bool,
    #[serde(default)]
    pub omit_if_unset: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            domains: Domains::new(),
            is_optional: false,
            is_hard_optional: false,
            omit_if_unset: false,
        }
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domains.insert(domain.name.clone(), domain);
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn hard_optional(mut self) -> Self {
        self.is_hard_optional = true;
        self
    }

    pub fn has_key_domain(&self) -> bool {
        self.domains.contains_key(KEY_DOMAIN)
    }
}

/// What a [`TypeRef`] points at. The two cases are mutually exclusive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefTarget {
    /// A declaration, by qualified name (or a bare builtin/imported name).
    Named(String),
    /// A type parameter of the enclosing declaration, by name.
    Param(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub target: RefTarget,
    #[serde(default)]
    pub type_args: Vec<TypeRef>,
    /// Fixed array size, e.g. `uint8[16]`.
    #[serde(default)]
    pub array_size: Option<u32>,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            target: RefTarget::Named(name.into()),
            type_args: Vec::new(),
            array_size: None,
        }
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self {
            target: RefTarget::Param(name.into()),
            type_args: Vec::new(),
            array_size: None,
        }
    }

    /// `Array<elem>`.
    pub fn array_of(elem: TypeRef) -> Self {
        Self::named(BuiltinGeneric::Array.name()).with_args([elem])
    }

    /// `Map<key, value>`.
    pub fn map_of(key: TypeRef, value: TypeRef) -> Self {
        Self::named(BuiltinGeneric::Map.name()).with_args([key, value])
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = TypeRef>) -> Self {
        self.type_args.extend(args);
        self
    }

    pub fn with_array_size(mut self, size: u32) -> Self {
        self.array_size = Some(size);
        self
    }

    pub fn is_type_param(&self) -> bool {
        matches!(self.target, RefTarget::Param(_))
    }

    /// Referenced declaration name, `None` for a type-parameter reference.
    pub fn name(&self) -> Option<&str> {
        match &self.target {
            RefTarget::Named(n) => Some(n),
            RefTarget::Param(_) => None,
        }
    }

    pub fn param_name(&self) -> Option<&str> {
        match &self.target {
            RefTarget::Param(p) => Some(p),
            RefTarget::Named(_) => None,
        }
    }

    /// Iterate over this reference and every nested type argument, depth-first.
    pub fn walk(&self) -> impl Iterator<Item = &TypeRef> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.type_args.iter().rev());
            Some(next)
        })
    }
}

/// Canonical fingerprint: name, then `<a, b>` for type arguments, then `[N]`
/// for a fixed array size.
///
/// Deterministic across independently loaded tables, so two references are
/// structurally equal iff their strings are equal. Not meant to be parsed.
impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.target {
            RefTarget::Named(n) | RefTarget::Param(n) => f.write_str(n)?,
        }
        if !self.type_args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        if let Some(size) = self.array_size {
            write!(f, "[{size}]")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub constraint: Option<TypeRef>,
    #[serde(default)]
    pub default: Option<TypeRef>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            constraint: None,
            default: None,
        }
    }

    pub fn with_constraint(mut self, constraint: TypeRef) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn with_default(mut self, default: TypeRef) -> Self {
        self.default = Some(default);
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}
