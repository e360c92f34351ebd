//! Core types shared across the gateway

mod decision;
mod output;

pub use decision::ToolDecision;
pub use output::ToolOutput;
