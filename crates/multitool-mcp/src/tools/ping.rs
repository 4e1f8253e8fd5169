//! Health check tool

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ToolDescriptor, ToolHandler, ToolResult, invalid_arguments, parse_arguments};
use crate::Result;

pub const NAME: &str = "ping";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        NAME,
        "Health check. Returns \"pong\" when the server is responsive.",
        json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false
        }),
    )
}

/// Accepts nothing.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PingArgs {}

pub struct Ping;

#[async_trait]
impl ToolHandler for Ping {
    async fn call(&self, arguments: Value) -> Result<ToolResult> {
        if let Err(e) = parse_arguments::<PingArgs>(arguments) {
            return Ok(invalid_arguments(e));
        }
        Ok(ToolResult::text("pong"))
    }
}
