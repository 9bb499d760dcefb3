//! Backend-independent label geometry and environment detection.

pub mod capabilities;
pub mod text;
pub mod types;

pub use capabilities::{
    Capabilities, LegacyEngine, RuntimeEnvironment, StaticEnvironment, detect_capabilities,
};
pub use text::{
    EstimatingTextMeasurer, FontSpec, LINE_HEIGHT_RATIO, LineBreakResult, TextMeasurer,
    estimate_block_size, measure, wrap_to_fit,
};
pub use types::{AxisPosition, BlockSize, BoundingBox, LabelAlignment, Viewport};
