//! Command dispatch pipeline.
//!
//! Every inbound invocation, slash interaction or legacy prefix message,
//! is normalized into an [`command::Invocation`] and pushed through the same
//! pipeline: permission gate, cooldown gate, module gate, then the handler.
//! All pipeline state (registry, aliases, cooldown windows) lives on a
//! single [`dispatcher::Dispatcher`] constructed at startup; there are no
//! process-wide singletons.

pub mod command;
pub mod cooldown;
pub mod dispatcher;
pub mod module;
pub mod permission;
pub mod registry;

#[cfg(test)]
mod test;

pub use command::{Command, CommandSpec, Invocation, InvocationKind};
pub use dispatcher::{DispatchOutcome, Dispatcher, Rejection};
pub use module::ModuleCategory;
