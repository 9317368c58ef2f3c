//! Decoded argument values.

use serde::Serialize;

use crate::contract::Enumeration;
use crate::error::{Result, RpcError};

/// Scalar wire value. Enum tokens travel as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Integer(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::String(_) => None,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

/// One bound argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    One(Value),
    Many(Vec<Value>),
}

/// Arguments already validated against a signature, in declared order.
///
/// Accessor failures mean the handler asked for something its own signature
/// does not declare, so they surface as `Internal`, not `InvalidInput`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    values: Vec<(&'static str, Arg)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, arg: Arg) {
        self.values.push((name, arg));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.values.iter().find(|(n, _)| *n == name).map(|(_, a)| a)
    }

    fn one(&self, name: &str) -> Result<&Value> {
        match self.get(name) {
            Some(Arg::One(v)) => Ok(v),
            Some(Arg::Many(_)) => Err(RpcError::Internal(format!(
                "argument {name} is a sequence"
            ))),
            None => Err(RpcError::Internal(format!("argument {name} not bound"))),
        }
    }

    fn many(&self, name: &str) -> Result<&[Value]> {
        match self.get(name) {
            Some(Arg::Many(vs)) => Ok(vs),
            Some(Arg::One(_)) => Err(RpcError::Internal(format!(
                "argument {name} is not a sequence"
            ))),
            None => Err(RpcError::Internal(format!("argument {name} not bound"))),
        }
    }

    pub fn string(&self, name: &str) -> Result<&str> {
        self.one(name)?
            .as_str()
            .ok_or_else(|| RpcError::Internal(format!("argument {name} is not a string")))
    }

    pub fn integer(&self, name: &str) -> Result<i64> {
        self.one(name)?
            .as_i64()
            .ok_or_else(|| RpcError::Internal(format!("argument {name} is not an integer")))
    }

    pub fn enumeration<E: Enumeration>(&self, name: &str) -> Result<E> {
        to_enum(name, self.one(name)?)
    }

    pub fn enumerations<E: Enumeration>(&self, name: &str) -> Result<Vec<E>> {
        self.many(name)?.iter().map(|v| to_enum(name, v)).collect()
    }
}

fn to_enum<E: Enumeration>(name: &str, v: &Value) -> Result<E> {
    v.as_str().and_then(E::from_token).ok_or_else(|| {
        RpcError::Internal(format!("argument {name} is not a {}", E::DEF.name))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::contract::EnumDef;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Side {
        Left,
        Right,
    }

    impl Enumeration for Side {
        const DEF: EnumDef = EnumDef {
            name: "Side",
            tokens: &["left", "right"],
        };

        fn from_token(token: &str) -> Option<Self> {
            match token {
                "left" => Some(Side::Left),
                "right" => Some(Side::Right),
                _ => None,
            }
        }

        fn token(self) -> &'static str {
            match self {
                Side::Left => "left",
                Side::Right => "right",
            }
        }
    }

    fn sample() -> Args {
        let mut args = Args::new();
        args.push("name", Arg::One("World".into()));
        args.push("times", Arg::One(2.into()));
        args.push("sides", Arg::Many(vec!["right".into(), "left".into()]));
        args
    }

    #[test]
    fn typed_accessors() {
        let args = sample();
        assert_eq!(args.string("name").unwrap(), "World");
        assert_eq!(args.integer("times").unwrap(), 2);
        assert_eq!(
            args.enumerations::<Side>("sides").unwrap(),
            vec![Side::Right, Side::Left]
        );
    }

    #[test]
    fn undeclared_access_is_internal() {
        let args = sample();
        assert!(matches!(args.string("missing"), Err(RpcError::Internal(_))));
        assert!(matches!(args.integer("name"), Err(RpcError::Internal(_))));
        assert!(matches!(
            args.enumeration::<Side>("name"),
            Err(RpcError::Internal(_))
        ));
    }
}
