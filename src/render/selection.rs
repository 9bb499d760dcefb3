use serde::{Deserialize, Serialize};

use crate::core::Capabilities;

/// Backend used to render one axis label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RendererKind {
    Canvas,
    Html,
    CssTransform,
    LegacyTransform,
}

impl RendererKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Canvas => "canvas",
            Self::Html => "html",
            Self::CssTransform => "css-transform",
            Self::LegacyTransform => "legacy-transform",
        }
    }
}

/// Per-axis backend forcing flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RendererOverrides {
    pub use_html: bool,
    pub use_canvas: bool,
}

impl RendererOverrides {
    #[must_use]
    fn any(self) -> bool {
        self.use_html || self.use_canvas
    }
}

/// Picks the renderer for one axis.
///
/// Pure and total: every input maps to a variant, and plain DOM is the
/// fallback when nothing better is available.
#[must_use]
pub fn select_renderer(capabilities: &Capabilities, overrides: RendererOverrides) -> RendererKind {
    match capabilities.legacy_engine {
        Some(engine) if !overrides.use_html => {
            return if engine.supports_css_transforms() && !overrides.any() {
                RendererKind::CssTransform
            } else if !overrides.any() {
                RendererKind::LegacyTransform
            } else if overrides.use_canvas {
                RendererKind::Canvas
            } else {
                RendererKind::Html
            };
        }
        _ => {}
    }

    let no_transitions = !capabilities.style_transitions;
    if overrides.use_html || (no_transitions && !capabilities.canvas_text && !overrides.use_canvas)
    {
        RendererKind::Html
    } else if overrides.use_canvas || no_transitions {
        RendererKind::Canvas
    } else {
        RendererKind::CssTransform
    }
}

#[cfg(test)]
mod tests {
    use super::{RendererKind, RendererOverrides, select_renderer};
    use crate::core::{StaticEnvironment, detect_capabilities};

    const NONE: RendererOverrides = RendererOverrides {
        use_html: false,
        use_canvas: false,
    };
    const HTML: RendererOverrides = RendererOverrides {
        use_html: true,
        use_canvas: false,
    };
    const CANVAS: RendererOverrides = RendererOverrides {
        use_html: false,
        use_canvas: true,
    };

    #[test]
    fn modern_runtime_prefers_css_transform() {
        let caps = detect_capabilities(&StaticEnvironment::modern());
        assert_eq!(select_renderer(&caps, NONE), RendererKind::CssTransform);
        assert_eq!(select_renderer(&caps, HTML), RendererKind::Html);
        assert_eq!(select_renderer(&caps, CANVAS), RendererKind::Canvas);
    }

    #[test]
    fn missing_transitions_fall_back_to_canvas_then_html() {
        let caps = detect_capabilities(&StaticEnvironment::modern().with_style_transitions(false));
        assert_eq!(select_renderer(&caps, NONE), RendererKind::Canvas);

        let caps = detect_capabilities(&StaticEnvironment::headless());
        assert_eq!(select_renderer(&caps, NONE), RendererKind::Html);
        // Forcing canvas is honoured even without canvas text support.
        assert_eq!(select_renderer(&caps, CANVAS), RendererKind::Canvas);
    }

    #[test]
    fn legacy_runtime_table() {
        let legacy9 = detect_capabilities(&StaticEnvironment::legacy(9.0));
        assert_eq!(select_renderer(&legacy9, NONE), RendererKind::CssTransform);
        assert_eq!(select_renderer(&legacy9, CANVAS), RendererKind::Canvas);
        assert_eq!(select_renderer(&legacy9, HTML), RendererKind::Html);

        let legacy8 = detect_capabilities(&StaticEnvironment::legacy(8.0));
        assert_eq!(select_renderer(&legacy8, NONE), RendererKind::LegacyTransform);
        assert_eq!(select_renderer(&legacy8, CANVAS), RendererKind::Canvas);
    }

    #[test]
    fn html_override_wins_over_canvas_override() {
        let both = RendererOverrides {
            use_html: true,
            use_canvas: true,
        };
        for env in [
            StaticEnvironment::modern(),
            StaticEnvironment::legacy(8.0),
            StaticEnvironment::headless(),
        ] {
            let caps = detect_capabilities(&env);
            assert_eq!(select_renderer(&caps, both), RendererKind::Html);
        }
    }
}
