//! Shared application state for the hello-rpc server.
//!
//! The dispatcher is built once at startup and shared read-only.

use std::sync::Arc;

use hello_rpc_core::error::Result;

use crate::config::ServerConfig;
use crate::dispatch::{Dispatcher, ServiceInfo};
use crate::obs::RpcMetrics;
use crate::services;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<ServerConfig>,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<RpcMetrics>,
}

impl AppState {
    /// Build application state with the built-in catalogue.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        let mut dispatcher = Dispatcher::new(ServiceInfo {
            name: cfg.service.name.clone(),
            tns: cfg.service.tns.clone(),
        });
        services::register_builtin(&mut dispatcher, &cfg)?;

        tracing::info!(
            service = %cfg.service.name,
            tns = %cfg.service.tns,
            operations = ?dispatcher.registered_operations(),
            "operations registered"
        );

        Ok(Self::with_dispatcher(cfg, dispatcher))
    }

    /// Build state around an already-populated dispatcher.
    pub fn with_dispatcher(cfg: ServerConfig, dispatcher: Dispatcher) -> Self {
        Self {
            cfg: Arc::new(cfg),
            dispatcher: Arc::new(dispatcher),
            metrics: Arc::new(RpcMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.cfg
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn metrics(&self) -> &RpcMetrics {
        &self.metrics
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    /// Static lines appended to the `/metrics` output.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        let ops = self.dispatcher.registered_operations().len();
        vec![("hello_rpc_operations", u64::try_from(ops).unwrap_or(u64::MAX))]
    }
}
