//! Built-in operations.

pub mod hello;
pub mod part_of_day;

use std::sync::Arc;

use hello_rpc_core::error::Result;

pub use hello::{
    FaultOp, Greet, Greets, SayHello, SayMaybeNothing, SayMaybeSomething, SayNothing,
    FAULT_MESSAGE,
};
pub use part_of_day::PartOfDay;

use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;

/// Register the HelloWorldService catalogue.
pub fn register_builtin(dispatcher: &mut Dispatcher, cfg: &ServerConfig) -> Result<()> {
    dispatcher.register(Arc::new(SayHello::new(
        cfg.limits.max_times,
        cfg.contract.reject_zero_times,
    )))?;
    dispatcher.register(Arc::new(SayNothing::new()))?;
    dispatcher.register(Arc::new(SayMaybeNothing::new()))?;
    dispatcher.register(Arc::new(SayMaybeSomething::new()))?;
    dispatcher.register(Arc::new(Greet::new()))?;
    dispatcher.register(Arc::new(Greets::new(cfg.limits.max_items)))?;
    dispatcher.register(Arc::new(FaultOp::new()))?;
    Ok(())
}
