//! Shared error type across hello-rpc crates.

use thiserror::Error;

use crate::fault::{Fault, FaultCode};

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed envelope.
    BadRequest,
    /// Argument does not satisfy its declared type, range, enum set or cardinality.
    InvalidInput,
    /// No operation registered under the requested name.
    UnknownOperation,
    /// Unsupported envelope version.
    UnsupportedVersion,
    /// Request body too large.
    PayloadTooLarge,
    /// Operation signalled a fault.
    Fault,
    /// Handler produced a reply that does not match its declared return shape.
    ContractViolation,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidInput => "INVALID_INPUT",
            ClientCode::UnknownOperation => "UNKNOWN_OPERATION",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::Fault => "FAULT",
            ClientCode::ContractViolation => "CONTRACT_VIOLATION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RpcError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("unsupported protocol version")]
    UnsupportedVersion,
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("{0}")]
    Fault(Fault),
    #[error("contract violation in {op}: declared {expected}, produced {actual}")]
    ContractViolation {
        op: String,
        expected: String,
        actual: String,
    },
    #[error("internal: {0}")]
    Internal(String),
}

impl RpcError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            RpcError::BadRequest(_) => ClientCode::BadRequest,
            RpcError::InvalidInput(_) => ClientCode::InvalidInput,
            RpcError::UnknownOperation(_) => ClientCode::UnknownOperation,
            RpcError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            RpcError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            RpcError::Fault(_) => ClientCode::Fault,
            RpcError::ContractViolation { .. } => ClientCode::ContractViolation,
            RpcError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Whether the caller, rather than the server, is to blame.
    pub fn is_client_error(&self) -> bool {
        self.fault_code() == FaultCode::Client
    }

    /// Raised by an operation or while checking its reply, as opposed to a
    /// request rejected before the handler ran.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            RpcError::Fault(_) | RpcError::ContractViolation { .. } | RpcError::Internal(_)
        )
    }

    /// SOAP-style fault code for this error.
    pub fn fault_code(&self) -> FaultCode {
        match self {
            RpcError::Fault(f) => f.code,
            RpcError::ContractViolation { .. } | RpcError::Internal(_) => FaultCode::Server,
            _ => FaultCode::Client,
        }
    }

    /// Render this error as the fault carried back to the caller.
    ///
    /// Operation faults pass through unchanged. Server-side failures are
    /// reported generically so handler internals do not leak to callers.
    pub fn to_fault(&self) -> Fault {
        match self {
            RpcError::Fault(f) => f.clone(),
            RpcError::ContractViolation { .. } | RpcError::Internal(_) => {
                Fault::server("internal server error")
            }
            other => Fault::client(other.to_string()),
        }
    }
}

impl From<Fault> for RpcError {
    fn from(f: Fault) -> Self {
        RpcError::Fault(f)
    }
}
