//! Reply -> JSON `result`.

use serde_json::Value as Json;

use crate::contract::ReturnShape;
use crate::error::{Result, RpcError};
use crate::reply::Reply;
use crate::value::Value;

/// Encode a handler reply. Sequences are drained in order, one item at a
/// time, and every item is checked against the declared item type.
///
/// Returns `None` for `Empty` so the field is omitted from the envelope.
pub fn encode_result(op: &str, returns: &ReturnShape, reply: Reply) -> Result<Option<Json>> {
    returns.ensure(op, &reply)?;

    match reply {
        Reply::Empty => Ok(None),
        Reply::One(v) => Ok(Some(to_json(v))),
        Reply::Optional(v) => Ok(Some(v.map_or(Json::Null, to_json))),
        Reply::Many(items) => {
            let ReturnShape::Many { item, .. } = returns else {
                return Err(RpcError::Internal("many reply for non-sequence".into()));
            };
            let mut out = Vec::new();
            for v in items {
                if !item.admits(&v) {
                    return Err(RpcError::ContractViolation {
                        op: op.to_owned(),
                        expected: item.name().to_owned(),
                        actual: format!("{v:?}"),
                    });
                }
                out.push(to_json(v));
            }
            Ok(Some(Json::Array(out)))
        }
    }
}

fn to_json(v: Value) -> Json {
    match v {
        Value::String(s) => Json::String(s),
        Value::Integer(i) => Json::from(i),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::contract::{Occurs, ScalarType};
    use serde_json::json;

    const STRINGS: ReturnShape = ReturnShape::Many {
        item: ScalarType::String,
        occurs: Occurs::AT_LEAST_ONE,
    };

    #[test]
    fn drains_sequence_in_order() {
        let reply = Reply::many((1..=3).map(|i| Value::String(format!("#{i}"))));
        let out = encode_result("seq", &STRINGS, reply).unwrap();
        assert_eq!(out, Some(json!(["#1", "#2", "#3"])));
    }

    #[test]
    fn rejects_wrong_item_type() {
        let reply = Reply::many(vec![Value::String("ok".into()), Value::Integer(2)]);
        let err = encode_result("seq", &STRINGS, reply).unwrap_err();
        assert!(matches!(err, RpcError::ContractViolation { .. }));
    }

    #[test]
    fn optional_absent_is_null_and_present_is_value() {
        let shape = ReturnShape::Optional {
            item: ScalarType::String,
        };
        assert_eq!(
            encode_result("m", &shape, Reply::Optional(None)).unwrap(),
            Some(Json::Null)
        );
        assert_eq!(
            encode_result("m", &shape, Reply::Optional(Some("".into()))).unwrap(),
            Some(json!(""))
        );
    }

    #[test]
    fn empty_is_omitted() {
        assert_eq!(
            encode_result("n", &ReturnShape::Empty, Reply::Empty).unwrap(),
            None
        );
    }
}
