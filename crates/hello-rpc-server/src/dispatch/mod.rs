//! Dispatcher module exports.
//!
//! Re-exports the dispatcher and operation trait so downstream consumers can
//! depend on this module directly.

pub mod dispatcher;

pub use dispatcher::{
    CallCtx, Dispatched, Dispatcher, Operation, ServiceDescription, ServiceInfo,
};
