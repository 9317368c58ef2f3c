//! JSON protocol layer.
//!
//! Stands in for the envelope codec of a full RPC stack:
//! - decode: body -> [`envelope::Request`] with raw `args`
//! - bind: raw `args` + [`crate::contract::Signature`] -> validated `Args`
//! - encode: [`crate::reply::Reply`] -> JSON `result`
//!
//! All paths are panic-free: malformed input surfaces as `RpcError`.

pub mod bind;
pub mod encode;
pub mod envelope;

pub use bind::bind_args;
pub use encode::encode_result;
pub use envelope::{decode_request, Request, Response};
