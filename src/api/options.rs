use serde::{Deserialize, Serialize};

use crate::core::{AxisPosition, FontSpec, LabelAlignment};
use crate::error::{AxisLabelError, AxisLabelResult};
use crate::render::RendererOverrides;

/// Per-axis label options, as found in a chart's axis configuration.
///
/// Keys use the chart option naming (`axisLabel`, `axisLabelFontSizePixels`,
/// ...). Every key is optional; unset values are filled from
/// [`AxisLabelDefaults`] when the label is measured.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisLabelOptions {
    /// Label text. `\n` starts a new line.
    pub axis_label: Option<String>,
    /// Forces the DOM renderer.
    pub axis_label_use_html: bool,
    /// Forces the canvas renderer.
    pub axis_label_use_canvas: bool,
    /// Gap between the label and the tick labels, in pixels.
    pub axis_label_padding: Option<f64>,
    pub axis_label_font_size_pixels: Option<f64>,
    pub axis_label_font_family: Option<String>,
    /// Gap between lines of a multi-line canvas label.
    pub axis_label_line_padding: Option<f64>,
    pub axis_label_colour: Option<String>,
    pub axis_label_alignment: Option<LabelAlignment>,
    /// Wrap the label at spaces until it fits along its axis.
    pub axis_label_adjustment: bool,
}

impl AxisLabelOptions {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            axis_label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Parses one axis option object.
    pub fn from_json_str(json: &str) -> AxisLabelResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| AxisLabelError::InvalidData(format!("invalid axis label options: {err}")))
    }

    /// Label text when the axis declares a non-empty one.
    #[must_use]
    pub fn label_text(&self) -> Option<&str> {
        self.axis_label.as_deref().filter(|text| !text.is_empty())
    }

    #[must_use]
    pub fn renderer_overrides(&self) -> RendererOverrides {
        RendererOverrides {
            use_html: self.axis_label_use_html,
            use_canvas: self.axis_label_use_canvas,
        }
    }

    #[must_use]
    pub fn with_html(mut self) -> Self {
        self.axis_label_use_html = true;
        self
    }

    #[must_use]
    pub fn with_canvas(mut self) -> Self {
        self.axis_label_use_canvas = true;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.axis_label_padding = Some(padding);
        self
    }

    #[must_use]
    pub fn with_font(mut self, size_px: f64, family: impl Into<String>) -> Self {
        self.axis_label_font_size_pixels = Some(size_px);
        self.axis_label_font_family = Some(family.into());
        self
    }

    #[must_use]
    pub fn with_line_padding(mut self, line_padding: f64) -> Self {
        self.axis_label_line_padding = Some(line_padding);
        self
    }

    #[must_use]
    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.axis_label_colour = Some(colour.into());
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: LabelAlignment) -> Self {
        self.axis_label_alignment = Some(alignment);
        self
    }

    #[must_use]
    pub fn with_adjustment(mut self, enabled: bool) -> Self {
        self.axis_label_adjustment = enabled;
        self
    }
}

/// Fallback values for unset label options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisLabelDefaults {
    pub padding: f64,
    pub font_size_px: f64,
    pub font_family: String,
    pub line_padding: f64,
    pub colour: String,
    pub alignment: LabelAlignment,
}

impl Default for AxisLabelDefaults {
    fn default() -> Self {
        Self {
            padding: 2.0,
            font_size_px: 14.0,
            font_family: "sans-serif".to_owned(),
            line_padding: 5.0,
            colour: "black".to_owned(),
            alignment: LabelAlignment::Center,
        }
    }
}

/// Label styling with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLabelStyle {
    pub padding: f64,
    pub font: FontSpec,
    pub line_padding: f64,
    pub colour: String,
    pub alignment: LabelAlignment,
    pub adjust: bool,
}

#[must_use]
pub fn resolve_label_style(
    options: &AxisLabelOptions,
    defaults: &AxisLabelDefaults,
) -> ResolvedLabelStyle {
    // Zero font size and zero line padding count as unset; zero padding is kept.
    let padding = options
        .axis_label_padding
        .filter(|value| value.is_finite())
        .unwrap_or(defaults.padding);
    let font_size_px = options
        .axis_label_font_size_pixels
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(defaults.font_size_px);
    let font_family = options
        .axis_label_font_family
        .as_deref()
        .filter(|family| !family.trim().is_empty())
        .unwrap_or(defaults.font_family.as_str());
    let line_padding = options
        .axis_label_line_padding
        .filter(|value| value.is_finite() && *value != 0.0)
        .unwrap_or(defaults.line_padding);
    let colour = options
        .axis_label_colour
        .as_deref()
        .filter(|colour| !colour.trim().is_empty())
        .unwrap_or(defaults.colour.as_str());

    ResolvedLabelStyle {
        padding,
        font: FontSpec::new(font_size_px, font_family),
        line_padding,
        colour: colour.to_owned(),
        alignment: options.axis_label_alignment.unwrap_or(defaults.alignment),
        adjust: options.axis_label_adjustment,
    }
}

/// Everything a renderer needs to know about one axis label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabelSpec {
    pub axis_name: String,
    pub position: AxisPosition,
    pub text: String,
    pub style: ResolvedLabelStyle,
}

impl AxisLabelSpec {
    /// Builds a spec, or `None` when the options carry no label.
    #[must_use]
    pub fn resolve(
        axis_name: &str,
        position: AxisPosition,
        options: &AxisLabelOptions,
        defaults: &AxisLabelDefaults,
    ) -> Option<Self> {
        let text = options.label_text()?;
        Some(Self {
            axis_name: axis_name.to_owned(),
            position,
            text: text.to_owned(),
            style: resolve_label_style(options, defaults),
        })
    }

    #[must_use]
    pub fn padding(&self) -> f64 {
        self.style.padding
    }

    #[must_use]
    pub fn font(&self) -> &FontSpec {
        &self.style.font
    }

    /// Element id used by the DOM renderer.
    #[must_use]
    pub fn element_id(&self) -> String {
        format!("{}Label", self.axis_name)
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisLabelDefaults, AxisLabelOptions, resolve_label_style};
    use crate::core::LabelAlignment;

    #[test]
    fn json_keys_follow_chart_option_names() {
        let options = AxisLabelOptions::from_json_str(
            r##"{
                "axisLabel": "Revenue ($)",
                "axisLabelUseCanvas": true,
                "axisLabelFontSizePixels": 12,
                "axisLabelFontFamily": "Verdana",
                "axisLabelColour": "#333",
                "axisLabelAlignment": "middle",
                "axisLabelAdjustment": true
            }"##,
        )
        .expect("valid options");

        assert_eq!(options.label_text(), Some("Revenue ($)"));
        assert!(options.axis_label_use_canvas);
        assert!(!options.axis_label_use_html);
        assert_eq!(options.axis_label_alignment, Some(LabelAlignment::Center));
        assert!(options.axis_label_adjustment);
    }

    #[test]
    fn unknown_alignment_falls_back_to_center() {
        let options = AxisLabelOptions::from_json_str(r#"{"axisLabelAlignment": "start"}"#)
            .expect("unknown alignment is not an error");
        assert_eq!(options.axis_label_alignment, Some(LabelAlignment::Center));
    }

    #[test]
    fn defaults_fill_unset_and_falsy_values() {
        let options = AxisLabelOptions::new("x")
            .with_font(0.0, "")
            .with_line_padding(0.0)
            .with_padding(0.0);
        let style = resolve_label_style(&options, &AxisLabelDefaults::default());

        assert_eq!(style.font.size_px, 14.0);
        assert_eq!(style.font.family, "sans-serif");
        assert_eq!(style.line_padding, 5.0);
        // An explicit zero padding is honoured.
        assert_eq!(style.padding, 0.0);
        assert_eq!(style.colour, "black");
        assert_eq!(style.alignment, LabelAlignment::Center);
    }

    #[test]
    fn empty_label_is_no_label() {
        assert_eq!(AxisLabelOptions::new("").label_text(), None);
        assert_eq!(AxisLabelOptions::default().label_text(), None);
    }
}
