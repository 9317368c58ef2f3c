use std::net::SocketAddr;

use serde::Deserialize;

use hello_rpc_core::error::{Result, RpcError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub service: ServiceSection,

    #[serde(default)]
    pub limits: LimitsSection,

    #[serde(default)]
    pub contract: ContractSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            service: ServiceSection::default(),
            limits: LimitsSection::default(),
            contract: ContractSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RpcError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.service.validate()?;
        self.limits.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(1024..=16 * 1024 * 1024).contains(&self.max_body_bytes) {
            return Err(RpcError::BadRequest(
                "server.max_body_bytes must be between 1024 and 16777216".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            RpcError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_max_body_bytes() -> usize {
    64 * 1024
}

/// Descriptive service metadata, surfaced by `/rpc/describe` only.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    #[serde(default = "default_service_name")]
    pub name: String,

    #[serde(default = "default_tns")]
    pub tns: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            tns: default_tns(),
        }
    }
}

impl ServiceSection {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RpcError::BadRequest("service.name must not be empty".into()));
        }
        if self.tns.trim().is_empty() {
            return Err(RpcError::BadRequest("service.tns must not be empty".into()));
        }
        Ok(())
    }
}

fn default_service_name() -> String {
    "HelloWorldService".into()
}
fn default_tns() -> String {
    "spyne.examples.hello".into()
}

/// Optional hardening caps. Absent means unbounded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsSection {
    /// Upper bound of `say_hello.times`.
    #[serde(default)]
    pub max_times: Option<u32>,

    /// `max_occurs` of `greets.part_of_days`.
    #[serde(default)]
    pub max_items: Option<usize>,
}

impl LimitsSection {
    pub fn validate(&self) -> Result<()> {
        if self.max_times == Some(0) {
            return Err(RpcError::BadRequest(
                "limits.max_times must be at least 1".into(),
            ));
        }
        if self.max_items == Some(0) {
            return Err(RpcError::BadRequest(
                "limits.max_items must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractSection {
    /// Reject `say_hello` with `times == 0` instead of returning no items.
    #[serde(default)]
    pub reject_zero_times: bool,
}
