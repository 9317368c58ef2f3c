use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::value::RawValue;

use hello_rpc_core::error::{Result, RpcError};
use hello_rpc_core::protocol::{bind_args, encode_result};
use hello_rpc_core::{Args, Reply, ReturnShape, Signature};

/// Per-call context handed to operations.
#[derive(Debug, Clone, Default)]
pub struct CallCtx {
    /// Correlation id from the request envelope, if any.
    pub id: Option<String>,
}

/// A remote-callable operation.
///
/// `invoke` only ever sees arguments that already satisfy `signature()`.
#[async_trait]
pub trait Operation: Send + Sync {
    fn signature(&self) -> &Signature;
    async fn invoke(&self, ctx: CallCtx, args: Args) -> Result<Reply>;
}

/// Descriptive registration attributes of the catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub tns: String,
}

/// Machine-readable description of the catalogue.
#[derive(Debug, Serialize)]
pub struct ServiceDescription<'a> {
    pub name: &'a str,
    pub tns: &'a str,
    pub operations: Vec<&'a Signature>,
}

/// Successful dispatch: the reply plus the contract it was checked against.
#[derive(Debug)]
pub struct Dispatched {
    pub op: &'static str,
    pub returns: ReturnShape,
    pub reply: Reply,
}

impl Dispatched {
    /// Drain the reply into the JSON `result` field.
    pub fn into_result(self) -> Result<Option<serde_json::Value>> {
        encode_result(self.op, &self.returns, self.reply)
    }
}

/// Operation registry and dispatcher.
///
/// Built with `&mut self` at startup, then shared read-only behind an `Arc`.
pub struct Dispatcher {
    info: ServiceInfo,
    ops: HashMap<&'static str, Arc<dyn Operation>>,
    order: Vec<&'static str>,
}

impl Dispatcher {
    pub fn new(info: ServiceInfo) -> Self {
        Self {
            info,
            ops: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, op: Arc<dyn Operation>) -> Result<()> {
        let name = op.signature().name;
        if self.ops.contains_key(name) {
            return Err(RpcError::Internal(format!(
                "operation registered twice: {name}"
            )));
        }
        self.ops.insert(name, op);
        self.order.push(name);
        Ok(())
    }

    pub fn info(&self) -> &ServiceInfo {
        &self.info
    }

    /// Operation names in registration order.
    pub fn registered_operations(&self) -> &[&'static str] {
        &self.order
    }

    pub fn signature(&self, op: &str) -> Option<&Signature> {
        self.ops.get(op).map(|h| h.signature())
    }

    pub fn describe(&self) -> ServiceDescription<'_> {
        ServiceDescription {
            name: &self.info.name,
            tns: &self.info.tns,
            operations: self
                .order
                .iter()
                .filter_map(|name| self.signature(name))
                .collect(),
        }
    }

    /// Look up `op`, bind `args` against its signature, invoke it, and check
    /// the reply's shape against the declared return contract.
    pub async fn dispatch(
        &self,
        ctx: CallCtx,
        op: &str,
        args: Option<&RawValue>,
    ) -> Result<Dispatched> {
        let handler = self
            .ops
            .get(op)
            .cloned()
            .ok_or_else(|| RpcError::UnknownOperation(op.to_owned()))?;

        let sig = handler.signature();
        let args = bind_args(sig, args)?;

        tracing::debug!(op = sig.name, argc = args.len(), "invoking operation");
        let reply = handler.invoke(ctx, args).await?;
        sig.returns.ensure(sig.name, &reply)?;

        Ok(Dispatched {
            op: sig.name,
            returns: sig.returns,
            reply,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hello_rpc_core::{Param, ScalarType, Value};

    struct Echo {
        sig: Signature,
    }

    impl Echo {
        fn new() -> Self {
            Self {
                sig: Signature::new(
                    "echo",
                    ReturnShape::One {
                        item: ScalarType::String,
                    },
                )
                .param(Param::one("text", ScalarType::String)),
            }
        }
    }

    #[async_trait]
    impl Operation for Echo {
        fn signature(&self) -> &Signature {
            &self.sig
        }

        async fn invoke(&self, _ctx: CallCtx, args: Args) -> Result<Reply> {
            Ok(Reply::One(Value::from(args.string("text")?)))
        }
    }

    /// Declares a scalar but produces an optional.
    struct Liar {
        sig: Signature,
    }

    #[async_trait]
    impl Operation for Liar {
        fn signature(&self) -> &Signature {
            &self.sig
        }

        async fn invoke(&self, _ctx: CallCtx, _args: Args) -> Result<Reply> {
            Ok(Reply::Optional(None))
        }
    }

    fn dispatcher() -> Dispatcher {
        let mut d = Dispatcher::new(ServiceInfo {
            name: "Test".into(),
            tns: "urn:test".into(),
        });
        d.register(Arc::new(Echo::new())).unwrap();
        d.register(Arc::new(Liar {
            sig: Signature::new(
                "liar",
                ReturnShape::One {
                    item: ScalarType::String,
                },
            ),
        }))
        .unwrap();
        d
    }

    fn raw(s: &str) -> Box<RawValue> {
        RawValue::from_string(s.to_owned()).unwrap()
    }

    #[tokio::test]
    async fn dispatches_by_name() {
        let d = dispatcher();
        let out = d
            .dispatch(CallCtx::default(), "echo", Some(&*raw(r#"{"text":"hi"}"#)))
            .await
            .unwrap();
        assert_eq!(out.op, "echo");
        assert_eq!(out.into_result().unwrap(), Some(serde_json::json!("hi")));
    }

    #[tokio::test]
    async fn unknown_operation() {
        let err = dispatcher()
            .dispatch(CallCtx::default(), "nope", None)
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::UnknownOperation(name) if name == "nope"));
    }

    #[tokio::test]
    async fn invalid_input_before_invoke() {
        let err = dispatcher()
            .dispatch(CallCtx::default(), "echo", Some(&*raw(r#"{"text":5}"#)))
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn shape_mismatch_is_not_coerced() {
        let err = dispatcher()
            .dispatch(CallCtx::default(), "liar", None)
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::ContractViolation { .. }));
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut d = dispatcher();
        assert!(d.register(Arc::new(Echo::new())).is_err());
        assert_eq!(d.registered_operations(), &["echo", "liar"]);
    }

    #[test]
    fn describe_keeps_registration_order() {
        let d = dispatcher();
        let desc = d.describe();
        assert_eq!(desc.tns, "urn:test");
        let names: Vec<_> = desc.operations.iter().map(|s| s.name).collect();
        assert_eq!(names, ["echo", "liar"]);
    }
}
