//! Structured operation failure (SOAP 1.1 style fault).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the call is responsible for a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultCode {
    Client,
    Server,
}

impl FaultCode {
    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::Client => "Client",
            FaultCode::Server => "Server",
        }
    }
}

/// A failure result carrying a human-readable message.
///
/// Returned through `Err`, so it can never be mistaken for a normal reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fault {
    pub code: FaultCode,
    pub string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl Fault {
    pub fn new(code: FaultCode, string: impl Into<String>) -> Self {
        Self {
            code,
            string: string.into(),
            actor: None,
            detail: None,
        }
    }

    pub fn client(string: impl Into<String>) -> Self {
        Self::new(FaultCode::Client, string)
    }

    pub fn server(string: impl Into<String>) -> Self {
        Self::new(FaultCode::Server, string)
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fault(code={}", self.code.as_str())?;
        if let Some(actor) = &self.actor {
            write!(f, ", actor={actor}")?;
        }
        write!(f, "): {}", self.string)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_includes_code_and_actor() {
        let f = Fault::server("boom").with_actor("urn:hello");
        assert_eq!(f.to_string(), "fault(code=Server, actor=urn:hello): boom");
    }

    #[test]
    fn serializes_without_empty_optionals() {
        let f = Fault::client("nope");
        assert_eq!(
            serde_json::to_value(&f).unwrap(),
            json!({ "code": "Client", "string": "nope" })
        );
    }
}
