//! Primitive (builtin) type definitions.
//!
//! The primitive set is fixed: classification never consults a table, so it
//! answers the same way for every schema set.

/// Builtin scalar types available in every namespace without an import.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PrimitiveType {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint12,
    Uint16,
    Uint20,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Bool,
    String,
    Uuid,
    Json,
    Bytes,
    Any,
}

impl PrimitiveType {
    /// Every primitive, in registration order.
    pub const ALL: [PrimitiveType; 18] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint12,
        Self::Uint16,
        Self::Uint20,
        Self::Uint32,
        Self::Uint64,
        Self::Float32,
        Self::Float64,
        Self::Bool,
        Self::String,
        Self::Uuid,
        Self::Json,
        Self::Bytes,
        Self::Any,
    ];

    /// Schema-level spelling of this primitive.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint12 => "uint12",
            Self::Uint16 => "uint16",
            Self::Uint20 => "uint20",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Uuid => "uuid",
            Self::Json => "json",
            Self::Bytes => "bytes",
            Self::Any => "any",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Primitives carried as text by every target.
    pub const fn is_string(self) -> bool {
        matches!(self, Self::String | Self::Uuid)
    }

    pub const fn is_number(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint8
                | Self::Uint12
                | Self::Uint16
                | Self::Uint20
                | Self::Uint32
                | Self::Uint64
                | Self::Float32
                | Self::Float64
        )
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Builtin generic container shapes: a 1-arg sequence and a 2-arg mapping.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BuiltinGeneric {
    Array,
    Map,
}

impl BuiltinGeneric {
    pub const ALL: [BuiltinGeneric; 2] = [Self::Array, Self::Map];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Array => "Array",
            Self::Map => "Map",
        }
    }

    /// Number of type arguments the shape takes.
    pub const fn arity(self) -> usize {
        match self {
            Self::Array => 1,
            Self::Map => 2,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }
}

/// Check whether `name` spells a builtin primitive.
pub fn is_primitive(name: &str) -> bool {
    PrimitiveType::from_name(name).is_some()
}

/// Check whether `name` spells a text-valued primitive (`string`, `uuid`).
pub fn is_string_primitive(name: &str) -> bool {
    PrimitiveType::from_name(name).is_some_and(PrimitiveType::is_string)
}

/// Check whether `name` spells a numeric primitive.
pub fn is_number_primitive(name: &str) -> bool {
    PrimitiveType::from_name(name).is_some_and(PrimitiveType::is_number)
}
