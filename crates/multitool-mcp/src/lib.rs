//! MCP tool server for multitool
//!
//! Exposes a small fixed set of tools over the Model Context Protocol
//! (JSON-RPC 2.0, one message per line on stdio).
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ McpServer ] --resolve--> [ ToolRegistry ] --> [ ToolHandler ]
//!                                                      |
//!                      +-------------------------------+
//!                      |                               |
//!                      v                               v
//!          [ multitool-transcript ]          [ multitool-commit ]
//!            (caption fetch, sectioning)       (git diff heuristics)
//! ```
//!
//! # Tools
//!
//! Advertised in this order:
//! - `summarize_youtube` - transcript excerpt plus statistics
//! - `transcript_stats` - transcript statistics only
//! - `ping` - health check
//! - `commit_suggester` - Conventional Commits suggestions for git changes

pub mod config;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod tools;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use registry::ToolRegistry;
pub use server::McpServer;
pub use tools::{ToolContent, ToolDescriptor, ToolHandler, ToolResult, builtin_registry};
