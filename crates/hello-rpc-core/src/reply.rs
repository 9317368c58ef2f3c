//! Handler results.

use std::fmt;

use crate::value::Value;

/// Lazy, finite, non-restartable sequence of result items.
pub type Items = Box<dyn Iterator<Item = Value> + Send>;

/// What a handler returns on success.
pub enum Reply {
    Empty,
    One(Value),
    /// `None` is "absent", which is not the same as an empty string.
    Optional(Option<Value>),
    Many(Items),
}

impl Reply {
    pub fn many<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: Send + 'static,
    {
        Reply::Many(Box::new(items.into_iter()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Empty => "empty",
            Reply::One(_) => "one",
            Reply::Optional(_) => "optional",
            Reply::Many(_) => "many",
        }
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Empty => f.write_str("Empty"),
            Reply::One(v) => f.debug_tuple("One").field(v).finish(),
            Reply::Optional(v) => f.debug_tuple("Optional").field(v).finish(),
            Reply::Many(_) => f.write_str("Many(..)"),
        }
    }
}
