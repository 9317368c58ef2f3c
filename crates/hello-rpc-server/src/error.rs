//! Startup and serving errors for the binary.

use std::net::SocketAddr;

use thiserror::Error;

use hello_rpc_core::RpcError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("startup failed: {0}")]
    Startup(#[from] RpcError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}
