//! Top-level facade crate for hello-rpc.
//!
//! Re-exports the envelope/contract types and the server library so users can
//! depend on a single crate.

pub mod core {
    pub use hello_rpc_core::*;
}

pub mod server {
    pub use hello_rpc_server::*;
}

/// Everything needed to register a custom operation next to the built-ins.
pub mod prelude {
    pub use hello_rpc_core::{
        Args, Enumeration, Fault, Occurs, Param, Reply, Result, ReturnShape, RpcError,
        ScalarType, Signature, Value,
    };
    pub use hello_rpc_server::dispatch::{CallCtx, Dispatcher, Operation, ServiceInfo};
    pub use hello_rpc_server::services::{register_builtin, PartOfDay};
}
