//! hello-rpc server library entry.
//!
//! Wires config, the operation dispatcher, the built-in HelloWorldService
//! catalogue, the HTTP transport, and operational endpoints into one stack.
//! Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
pub mod server;
pub mod services;
pub mod transport;
