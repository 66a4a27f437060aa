//! Application layer - command handlers orchestrating the workflow.

pub mod handlers;
