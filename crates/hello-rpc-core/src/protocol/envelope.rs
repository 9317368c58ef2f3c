//! JSON request/response envelopes.
//!
//! The core stores `args` as `RawValue` so they are only parsed once the
//! operation (and therefore its signature) is known.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{Result, RpcError};
use crate::fault::Fault;

/// Only supported envelope version.
pub const VERSION: u32 = 1;

/// Inbound call.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Request {
    /// Protocol version.
    pub v: u32,
    /// Operation name (e.g., "say_hello").
    pub op: String,
    /// Optional correlation id, echoed back.
    #[serde(default)]
    pub id: Option<String>,
    /// Arguments object, stored as raw JSON (lazy parsing).
    #[serde(default)]
    pub args: Option<Box<RawValue>>,
}

/// Decode and version-check a request body.
pub fn decode_request(body: Bytes) -> Result<Request> {
    let req: Request = serde_json::from_slice(&body)
        .map_err(|e| RpcError::BadRequest(format!("invalid envelope json: {e}")))?;
    if req.v != VERSION {
        return Err(RpcError::UnsupportedVersion);
    }
    if req.op.is_empty() {
        return Err(RpcError::BadRequest("op must not be empty".into()));
    }
    Ok(req)
}

/// Fault as it appears on the wire, tagged with the stable client code.
#[derive(Debug, Serialize)]
pub struct FaultBody {
    #[serde(flatten)]
    pub fault: Fault,
    pub error: &'static str,
}

/// Outbound reply.
///
/// `result` is omitted for operations with no result, and `null` for an
/// absent optional.
#[derive(Debug, Serialize)]
pub struct Response {
    pub v: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<FaultBody>,
}

impl Response {
    pub fn ok(op: String, id: Option<String>, result: Option<serde_json::Value>) -> Self {
        Self {
            v: VERSION,
            op: Some(op),
            id,
            result,
            fault: None,
        }
    }

    pub fn fault(op: Option<String>, id: Option<String>, err: &RpcError) -> Self {
        Self {
            v: VERSION,
            op,
            id,
            result: None,
            fault: Some(FaultBody {
                fault: err.to_fault(),
                error: err.client_code().as_str(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_and_absent_are_distinguishable() {
        let empty = serde_json::to_value(Response::ok("say_nothing".into(), None, None)).unwrap();
        let absent = serde_json::to_value(Response::ok(
            "say_maybe_nothing".into(),
            None,
            Some(serde_json::Value::Null),
        ))
        .unwrap();

        assert!(empty.get("result").is_none());
        assert_eq!(absent.get("result"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn fault_response_shape() {
        let err = RpcError::from(Fault::server("a fault, as promised"));
        let v = serde_json::to_value(Response::fault(Some("fault".into()), Some("7".into()), &err))
            .unwrap();
        assert_eq!(
            v,
            json!({
                "v": 1,
                "op": "fault",
                "id": "7",
                "fault": { "code": "Server", "string": "a fault, as promised", "error": "FAULT" }
            })
        );
    }
}
