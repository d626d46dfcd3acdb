//! Domains: named, ordered metadata blocks attached to types, fields and enum values.
//!
//! The resolution engine treats domain contents as opaque, with one exception:
//! the reserved [`KEY_DOMAIN`] marks a field as part of a record's durable identity.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved domain marking a field as a persisted record's key.
pub const KEY_DOMAIN: &str = "key";

/// Domains keyed by domain name, in declaration order.
pub type Domains = IndexMap<String, Domain>;

/// A named block of expressions, e.g. `@validate { min_length 1 max_length 10 }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    #[serde(default)]
    pub expressions: Vec<Expression>,
}

impl Domain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expressions: Vec::new(),
        }
    }

    /// Append an expression (builder style).
    pub fn with_expression(mut self, expression: Expression) -> Self {
        self.expressions.push(expression);
        self
    }

    /// Find an expression by name.
    pub fn find(&self, name: &str) -> Option<&Expression> {
        self.expressions.iter().find(|e| e.name == name)
    }

    /// Merge `self` (the child) over `parent`.
    ///
    /// Parent expressions keep their order; those the child redefines are
    /// replaced in place by the child's version. Child-only expressions follow.
    pub fn merge(&self, parent: &Domain) -> Domain {
        let mut expressions: Vec<Expression> = parent
            .expressions
            .iter()
            .map(|pe| self.find(&pe.name).unwrap_or(pe).clone())
            .collect();

        for ce in &self.expressions {
            if parent.find(&ce.name).is_none() {
                expressions.push(ce.clone());
            }
        }

        Domain {
            name: self.name.clone(),
            expressions,
        }
    }
}

/// A named expression inside a domain, carrying zero or more literal values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub name: String,
    #[serde(default)]
    pub values: Vec<ExpressionValue>,
}

impl Expression {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: ExpressionValue) -> Self {
        self.values.push(value);
        self
    }
}

/// Typed literal value of an expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExpressionValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Bare identifier, e.g. a reference to another field.
    Ident(String),
}

impl ExpressionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Ident(s) => Some(s),
            Self::Int(_) | Self::Float(_) | Self::Bool(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }
}

/// Merge two domain maps, child over parent.
///
/// Domains present on both sides merge through [`Domain::merge`]; parent-only
/// domains keep their order and child-only domains are appended.
pub fn merge_domains(parent: &Domains, child: &Domains) -> Domains {
    let mut merged: Domains = parent
        .iter()
        .map(|(name, pd)| {
            let domain = match child.get(name) {
                Some(cd) => cd.merge(pd),
                None => pd.clone(),
            };
            (name.clone(), domain)
        })
        .collect();

    for (name, cd) in child {
        if !merged.contains_key(name) {
            merged.insert(name.clone(), cd.clone());
        }
    }

    merged
}
