//! Declared operation contracts.
//!
//! A [`Signature`] is what a decorator-annotated handler would declare: the
//! ordered parameter list and the shape of the result. The binding layer
//! checks arguments against it before a handler runs, and the dispatcher
//! checks the produced [`Reply`] against `returns` afterwards.

use serde::Serialize;

use crate::error::{Result, RpcError};
use crate::reply::Reply;
use crate::value::Value;

/// A closed set of string tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumDef {
    pub name: &'static str,
    pub tokens: &'static [&'static str],
}

impl EnumDef {
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(&token)
    }
}

/// Rust enums that travel on the wire as one of a closed set of tokens.
pub trait Enumeration: Sized + Copy + 'static {
    const DEF: EnumDef;

    fn from_token(token: &str) -> Option<Self>;

    fn token(self) -> &'static str;
}

/// Scalar item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScalarType {
    String,
    /// Inclusive bounds.
    Integer { min: i64, max: i64 },
    Enum(EnumDef),
}

impl ScalarType {
    /// Unbounded `i64` integer.
    pub const INTEGER: ScalarType = ScalarType::Integer {
        min: i64::MIN,
        max: i64::MAX,
    };

    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Integer { .. } => "integer",
            ScalarType::Enum(def) => def.name,
        }
    }

    /// Whether `value` is a member of this type.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (ScalarType::String, Value::String(_)) => true,
            (ScalarType::Integer { min, max }, Value::Integer(i)) => (*min..=*max).contains(i),
            (ScalarType::Enum(def), Value::String(s)) => def.contains(s),
            _ => false,
        }
    }
}

/// Cardinality constraint on a sequence (min_occurs / max_occurs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occurs {
    pub min: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
}

impl Occurs {
    pub const ANY: Occurs = Occurs { min: 0, max: None };
    pub const AT_LEAST_ONE: Occurs = Occurs { min: 1, max: None };

    pub fn with_max(self, max: usize) -> Self {
        Self {
            max: Some(max),
            ..self
        }
    }

    pub fn admits(&self, len: usize) -> bool {
        len >= self.min && self.max.map_or(true, |max| len <= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamKind {
    One { item: ScalarType },
    Many { item: ScalarType, occurs: Occurs },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: ParamKind,
}

impl Param {
    pub fn one(name: &'static str, item: ScalarType) -> Self {
        Self {
            name,
            kind: ParamKind::One { item },
        }
    }

    pub fn many(name: &'static str, item: ScalarType, occurs: Occurs) -> Self {
        Self {
            name,
            kind: ParamKind::Many { item, occurs },
        }
    }
}

/// Declared result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReturnShape {
    /// No result.
    Empty,
    One { item: ScalarType },
    /// Present or explicitly absent.
    Optional { item: ScalarType },
    Many { item: ScalarType, occurs: Occurs },
    /// Always faults.
    Never,
}

impl ReturnShape {
    pub fn kind(&self) -> &'static str {
        match self {
            ReturnShape::Empty => "empty",
            ReturnShape::One { .. } => "one",
            ReturnShape::Optional { .. } => "optional",
            ReturnShape::Many { .. } => "many",
            ReturnShape::Never => "never",
        }
    }

    /// Shape check only; sequence items are checked as they are drained.
    pub fn admits(&self, reply: &Reply) -> bool {
        match (self, reply) {
            (ReturnShape::Empty, Reply::Empty) => true,
            (ReturnShape::One { item }, Reply::One(v)) => item.admits(v),
            (ReturnShape::Optional { item }, Reply::Optional(v)) => {
                v.as_ref().map_or(true, |v| item.admits(v))
            }
            (ReturnShape::Many { .. }, Reply::Many(_)) => true,
            _ => false,
        }
    }

    /// Like [`ReturnShape::admits`], but reports a mismatch as an error.
    pub fn ensure(&self, op: &str, reply: &Reply) -> Result<()> {
        if self.admits(reply) {
            Ok(())
        } else {
            Err(RpcError::ContractViolation {
                op: op.to_owned(),
                expected: self.kind().to_owned(),
                actual: reply.kind().to_owned(),
            })
        }
    }
}

/// Full contract of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub name: &'static str,
    pub params: Vec<Param>,
    pub returns: ReturnShape,
}

impl Signature {
    pub fn new(name: &'static str, returns: ReturnShape) -> Self {
        Self {
            name,
            params: Vec::new(),
            returns,
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }
}
