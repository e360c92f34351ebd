//! MCP connectivity: client and tool invoker

mod client;
mod invoker;

pub use client::{McpClient, McpError, McpResult};
pub use invoker::{McpToolInvoker, ToolInvoker};
