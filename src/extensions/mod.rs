//! Plugin contract between a chart host and draw-hook extensions.
//!
//! Hosts call `init` once on registration, `on_draw` from every draw cycle
//! and `detach` when the plugin is removed.

use serde::{Deserialize, Serialize};

use crate::api::PlotHost;
use crate::error::AxisLabelResult;

/// What a draw hook asks of the host once it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookOutcome {
    Done,
    /// Geometry inputs changed; the host must run its draw cycle again.
    RedrawRequested,
}

/// Extension hooked into a host's draw cycle.
///
/// Plugins may read and adjust axis state and draw into the host's surfaces,
/// but only from inside the hook invocations.
pub trait PlotPlugin {
    fn name(&self) -> &str;
    fn version(&self) -> &str;

    /// Options object merged into the host's global configuration.
    fn options(&self) -> serde_json::Value {
        serde_json::Value::Object(serde_json::Map::new())
    }

    fn init(&mut self, plot: &dyn PlotHost);

    fn on_draw(&mut self, plot: &mut dyn PlotHost) -> AxisLabelResult<HookOutcome>;

    /// Releases everything the plugin placed on the host.
    fn detach(&mut self, _plot: &mut dyn PlotHost) {}
}
