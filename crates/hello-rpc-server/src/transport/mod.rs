//! Transport layer (HTTP).
//!
//! Exposes the RPC and description handlers. Envelope decoding happens once,
//! here, before the dispatcher sees the call.

pub mod http;
