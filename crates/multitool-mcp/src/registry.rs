//! Tool registry
//!
//! Maps tool names to their descriptor and handler. Registration order is
//! the order tools are advertised in.

use std::collections::HashMap;
use std::sync::Arc;

use crate::tools::{ToolDescriptor, ToolHandler};
use crate::{Error, Result};

#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<(ToolDescriptor, Arc<dyn ToolHandler>)>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Names must be unique.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<()> {
        if self.index.contains_key(&descriptor.name) {
            return Err(Error::DuplicateTool(descriptor.name));
        }
        tracing::debug!(tool = %descriptor.name, "Registered tool");
        self.index.insert(descriptor.name.clone(), self.entries.len());
        self.entries.push((descriptor, handler));
        Ok(())
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> Vec<&ToolDescriptor> {
        self.entries.iter().map(|(descriptor, _)| descriptor).collect()
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ToolHandler>> {
        self.index
            .get(name)
            .map(|&i| self.entries[i].1.clone())
            .ok_or_else(|| Error::UnknownTool(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
