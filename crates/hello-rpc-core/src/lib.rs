//! hello-rpc core: transport-agnostic contracts, values, faults, and the JSON
//! envelope codec.
//!
//! This crate defines the typed surface shared by the server, its operations,
//! and tests. It carries no transport or runtime dependencies.
//!
//! # Lints
//! `panic!`, `unwrap` and `expect` are denied outside tests. Fallible paths
//! return `RpcError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod contract;
pub mod error;
pub mod fault;
pub mod protocol;
pub mod reply;
pub mod value;

pub use contract::{
    EnumDef, Enumeration, Occurs, Param, ParamKind, ReturnShape, ScalarType, Signature,
};
pub use error::{ClientCode, Result, RpcError};
pub use fault::{Fault, FaultCode};
pub use reply::{Items, Reply};
pub use value::{Arg, Args, Value};
