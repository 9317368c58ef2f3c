//! Argument binding: raw JSON `args` -> validated [`Args`].
//!
//! Every failure here is `InvalidInput`, raised before any handler runs.

use serde_json::value::RawValue;
use serde_json::{Map, Value as Json};

use crate::contract::{ParamKind, ScalarType, Signature};
use crate::error::{Result, RpcError};
use crate::value::{Arg, Args, Value};

/// Bind `raw` against `sig`. Absent or `null` args behave like `{}`.
pub fn bind_args(sig: &Signature, raw: Option<&RawValue>) -> Result<Args> {
    let map = match raw {
        None => Map::new(),
        Some(raw) => match serde_json::from_str::<Json>(raw.get()) {
            Ok(Json::Object(m)) => m,
            Ok(Json::Null) => Map::new(),
            Ok(_) => return Err(RpcError::InvalidInput("args must be an object".into())),
            Err(e) => return Err(RpcError::BadRequest(format!("invalid args json: {e}"))),
        },
    };

    if let Some(unknown) = map
        .keys()
        .find(|k| !sig.params.iter().any(|p| p.name == k.as_str()))
    {
        return Err(RpcError::InvalidInput(format!("unknown argument: {unknown}")));
    }

    let mut args = Args::new();
    for param in &sig.params {
        let raw = map
            .get(param.name)
            .filter(|v| !v.is_null())
            .ok_or_else(|| RpcError::InvalidInput(format!("missing argument: {}", param.name)))?;

        let arg = match &param.kind {
            ParamKind::One { item } => Arg::One(bind_scalar(param.name, item, raw)?),
            ParamKind::Many { item, occurs } => {
                let items = raw.as_array().ok_or_else(|| {
                    RpcError::InvalidInput(format!("{}: expected a sequence", param.name))
                })?;
                if !occurs.admits(items.len()) {
                    return Err(RpcError::InvalidInput(match occurs.max {
                        Some(max) => format!(
                            "{}: expected between {} and {max} items, got {}",
                            param.name,
                            occurs.min,
                            items.len()
                        ),
                        None => format!(
                            "{}: expected at least {} items, got {}",
                            param.name,
                            occurs.min,
                            items.len()
                        ),
                    }));
                }
                let values = items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| bind_scalar(&format!("{}[{i}]", param.name), item, v))
                    .collect::<Result<Vec<_>>>()?;
                Arg::Many(values)
            }
        };
        args.push(param.name, arg);
    }

    tracing::trace!(op = sig.name, argc = args.len(), "arguments bound");
    Ok(args)
}

fn bind_scalar(label: &str, ty: &ScalarType, raw: &Json) -> Result<Value> {
    match ty {
        ScalarType::String => raw
            .as_str()
            .map(|s| Value::String(s.to_owned()))
            .ok_or_else(|| RpcError::InvalidInput(format!("{label}: expected string"))),
        ScalarType::Integer { min, max } => {
            let i = raw
                .as_i64()
                .ok_or_else(|| RpcError::InvalidInput(format!("{label}: expected integer")))?;
            if !(*min..=*max).contains(&i) {
                return Err(RpcError::InvalidInput(format!(
                    "{label}: {i} is outside {min}..={max}"
                )));
            }
            Ok(Value::Integer(i))
        }
        ScalarType::Enum(def) => {
            let token = raw
                .as_str()
                .ok_or_else(|| RpcError::InvalidInput(format!("{label}: expected {}", def.name)))?;
            if !def.contains(token) {
                return Err(RpcError::InvalidInput(format!(
                    "{label}: {token:?} is not a valid {} (expected one of {})",
                    def.name,
                    def.tokens.join(", ")
                )));
            }
            Ok(Value::String(token.to_owned()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::contract::{EnumDef, Occurs, Param, ReturnShape};

    const TONE: EnumDef = EnumDef {
        name: "Tone",
        tokens: &["low", "high"],
    };

    fn sig() -> Signature {
        Signature::new("probe", ReturnShape::Empty)
            .param(Param::one("label", ScalarType::String))
            .param(Param::one("count", ScalarType::Integer { min: 0, max: 10 }))
            .param(Param::many(
                "tones",
                ScalarType::Enum(TONE),
                Occurs::AT_LEAST_ONE.with_max(3),
            ))
    }

    fn raw(s: &str) -> Box<RawValue> {
        RawValue::from_string(s.to_owned()).unwrap()
    }

    fn invalid(json: &str) -> String {
        match bind_args(&sig(), Some(&*raw(json))) {
            Err(RpcError::InvalidInput(msg)) => msg,
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn binds_in_declared_order() {
        let args = bind_args(
            &sig(),
            Some(&*raw(r#"{"tones":["high"],"count":3,"label":"x"}"#)),
        )
        .unwrap();
        assert_eq!(args.len(), 3);
        assert_eq!(args.string("label").unwrap(), "x");
        assert_eq!(args.integer("count").unwrap(), 3);
        assert_eq!(args.get("tones"), Some(&Arg::Many(vec!["high".into()])));
    }

    #[test]
    fn no_params_accepts_absent_args() {
        let sig = Signature::new("say_nothing", ReturnShape::Empty);
        assert!(bind_args(&sig, None).unwrap().is_empty());
        assert!(bind_args(&sig, Some(&*raw("null"))).unwrap().is_empty());
    }

    #[test]
    fn rejections() {
        assert_eq!(
            invalid(r#"{"count":1,"tones":["low"]}"#),
            "missing argument: label"
        );
        assert_eq!(
            invalid(r#"{"label":null,"count":1,"tones":["low"]}"#),
            "missing argument: label"
        );
        assert_eq!(
            invalid(r#"{"label":"x","count":1,"tones":["low"],"extra":1}"#),
            "unknown argument: extra"
        );
        assert_eq!(
            invalid(r#"{"label":"x","count":11,"tones":["low"]}"#),
            "count: 11 is outside 0..=10"
        );
        assert_eq!(
            invalid(r#"{"label":"x","count":1.5,"tones":["low"]}"#),
            "count: expected integer"
        );
        assert_eq!(
            invalid(r#"{"label":"x","count":1,"tones":[]}"#),
            "tones: expected between 1 and 3 items, got 0"
        );
        assert_eq!(
            invalid(r#"{"label":"x","count":1,"tones":["low","mid"]}"#),
            "tones[1]: \"mid\" is not a valid Tone (expected one of low, high)"
        );
        assert_eq!(invalid("[]"), "args must be an object");
    }
}
