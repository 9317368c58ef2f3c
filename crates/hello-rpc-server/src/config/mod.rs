//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use hello_rpc_core::error::{Result, RpcError};

pub use schema::{ContractSection, LimitsSection, ServerConfig, ServerSection, ServiceSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ServerConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        RpcError::Internal(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| RpcError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
