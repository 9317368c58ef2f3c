//! The HelloWorldService operation catalogue.

use async_trait::async_trait;

use hello_rpc_core::error::{Result, RpcError};
use hello_rpc_core::{
    Args, Enumeration, Fault, Occurs, Param, Reply, ReturnShape, ScalarType, Signature, Value,
};

use super::part_of_day::PartOfDay;
use crate::dispatch::{CallCtx, Operation};

pub const FAULT_MESSAGE: &str = "a fault, as promised";

const STRING_SEQUENCE: ReturnShape = ReturnShape::Many {
    item: ScalarType::String,
    occurs: Occurs::AT_LEAST_ONE,
};

const OPTIONAL_STRING: ReturnShape = ReturnShape::Optional {
    item: ScalarType::String,
};

pub fn greeting(part: PartOfDay) -> String {
    format!("Good {part}")
}

/// `say_hello(name, times) -> [string]`: `times` copies of "Hello, <name>".
pub struct SayHello {
    sig: Signature,
}

impl SayHello {
    /// `reject_zero_times` raises the declared lower bound of `times` to 1.
    /// Without `max_times`, any non-negative `times` is accepted.
    pub fn new(max_times: Option<u32>, reject_zero_times: bool) -> Self {
        let min = i64::from(reject_zero_times);
        let max = max_times.map_or(i64::MAX, i64::from);
        Self {
            sig: Signature::new("say_hello", STRING_SEQUENCE)
                .param(Param::one("name", ScalarType::String))
                .param(Param::one(
                    "times",
                    ScalarType::Integer { min, max },
                )),
        }
    }
}

#[async_trait]
impl Operation for SayHello {
    fn signature(&self) -> &Signature {
        &self.sig
    }

    async fn invoke(&self, _ctx: CallCtx, args: Args) -> Result<Reply> {
        let name = args.string("name")?.to_owned();
        let times = usize::try_from(args.integer("times")?)
            .map_err(|_| RpcError::InvalidInput("times must be non-negative".into()))?;

        Ok(Reply::many(
            (0..times).map(move |_| Value::String(format!("Hello, {name}"))),
        ))
    }
}

pub struct SayNothing {
    sig: Signature,
}

impl SayNothing {
    pub fn new() -> Self {
        Self {
            sig: Signature::new("say_nothing", ReturnShape::Empty),
        }
    }
}

impl Default for SayNothing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Operation for SayNothing {
    fn signature(&self) -> &Signature {
        &self.sig
    }

    async fn invoke(&self, _ctx: CallCtx, _args: Args) -> Result<Reply> {
        Ok(Reply::Empty)
    }
}

pub struct SayMaybeNothing {
    sig: Signature,
}

impl SayMaybeNothing {
    pub fn new() -> Self {
        Self {
            sig: Signature::new("say_maybe_nothing", OPTIONAL_STRING)
                .param(Param::one("name", ScalarType::String)),
        }
    }
}

impl Default for SayMaybeNothing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Operation for SayMaybeNothing {
    fn signature(&self) -> &Signature {
        &self.sig
    }

    async fn invoke(&self, _ctx: CallCtx, _args: Args) -> Result<Reply> {
        Ok(Reply::Optional(None))
    }
}

pub struct SayMaybeSomething {
    sig: Signature,
}

impl SayMaybeSomething {
    pub fn new() -> Self {
        Self {
            sig: Signature::new("say_maybe_something", OPTIONAL_STRING)
                .param(Param::one("name", ScalarType::String)),
        }
    }
}

impl Default for SayMaybeSomething {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Operation for SayMaybeSomething {
    fn signature(&self) -> &Signature {
        &self.sig
    }

    async fn invoke(&self, _ctx: CallCtx, args: Args) -> Result<Reply> {
        let name = args.string("name")?;
        Ok(Reply::Optional(Some(Value::String(format!("Hello, {name}")))))
    }
}

pub struct Greet {
    sig: Signature,
}

impl Greet {
    pub fn new() -> Self {
        Self {
            sig: Signature::new(
                "greet",
                ReturnShape::One {
                    item: ScalarType::String,
                },
            )
            .param(Param::one("part_of_day", ScalarType::Enum(PartOfDay::DEF))),
        }
    }
}

impl Default for Greet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Operation for Greet {
    fn signature(&self) -> &Signature {
        &self.sig
    }

    async fn invoke(&self, _ctx: CallCtx, args: Args) -> Result<Reply> {
        let part = args.enumeration::<PartOfDay>("part_of_day")?;
        Ok(Reply::One(Value::String(greeting(part))))
    }
}

/// Element-wise [`Greet`]; output keeps input order and length.
pub struct Greets {
    sig: Signature,
}

impl Greets {
    pub fn new(max_items: Option<usize>) -> Self {
        let occurs = match max_items {
            Some(max) => Occurs::AT_LEAST_ONE.with_max(max),
            None => Occurs::AT_LEAST_ONE,
        };
        Self {
            sig: Signature::new("greets", STRING_SEQUENCE).param(Param::many(
                "part_of_days",
                ScalarType::Enum(PartOfDay::DEF),
                occurs,
            )),
        }
    }
}

#[async_trait]
impl Operation for Greets {
    fn signature(&self) -> &Signature {
        &self.sig
    }

    async fn invoke(&self, _ctx: CallCtx, args: Args) -> Result<Reply> {
        let parts = args.enumerations::<PartOfDay>("part_of_days")?;
        Ok(Reply::many(
            parts.into_iter().map(|p| Value::String(greeting(p))),
        ))
    }
}

/// Always fails with [`FAULT_MESSAGE`].
pub struct FaultOp {
    sig: Signature,
}

impl FaultOp {
    pub fn new() -> Self {
        Self {
            sig: Signature::new("fault", ReturnShape::Never),
        }
    }
}

impl Default for FaultOp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Operation for FaultOp {
    fn signature(&self) -> &Signature {
        &self.sig
    }

    async fn invoke(&self, ctx: CallCtx, _args: Args) -> Result<Reply> {
        tracing::debug!(id = ?ctx.id, "raising fault on request");
        Err(Fault::server(FAULT_MESSAGE).into())
    }
}
