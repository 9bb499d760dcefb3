use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{AxisLabelError, AxisLabelResult};
use crate::extensions::PlotPlugin;
use crate::render::CanvasSurface;

use super::ChartPlot;

impl<C: CanvasSurface + 'static> ChartPlot<C> {
    /// Registers a plugin under its unique name and runs its `init` hook.
    pub fn register_plugin(&mut self, mut plugin: Box<dyn PlotPlugin>) -> AxisLabelResult<()> {
        let name = plugin.name().to_owned();
        if name.is_empty() {
            return Err(AxisLabelError::InvalidData(
                "plugin name must not be empty".to_owned(),
            ));
        }
        if self.has_plugin(&name) {
            return Err(AxisLabelError::DuplicatePlugin(name));
        }
        plugin.init(&*self);
        debug!(plugin = %name, version = plugin.version(), "registered plugin");
        self.plugins.push(plugin);
        Ok(())
    }

    /// Unregisters a plugin by name after running its `detach` hook.
    /// Returns `true` when removed.
    pub fn unregister_plugin(&mut self, name: &str) -> bool {
        let Some(position) = self.plugins.iter().position(|plugin| plugin.name() == name) else {
            return false;
        };
        let mut plugin = self.plugins.remove(position);
        plugin.detach(&mut *self);
        debug!(plugin = %name, "unregistered plugin");
        true
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin.name() == name)
    }

    /// Option objects of every plugin merged into one, later plugins winning
    /// on key clashes.
    #[must_use]
    pub fn plugin_options(&self) -> Value {
        let mut merged = Map::new();
        for plugin in &self.plugins {
            if let Value::Object(options) = plugin.options() {
                merged.extend(options);
            }
        }
        Value::Object(merged)
    }
}
