use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Navigator app name reported by the legacy engine.
pub const LEGACY_ENGINE_APP_NAME: &str = "Microsoft Internet Explorer";

static LEGACY_VERSION_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"MSIE ([0-9]+[.0-9]*)").ok());

/// Runtime the labels are rendered in.
///
/// Implementations answer feature-detection questions only; absence of a
/// feature is a normal `false`, never an error.
pub trait RuntimeEnvironment {
    fn supports_canvas(&self) -> bool;
    fn supports_canvas_text(&self) -> bool;
    fn supports_style_transitions(&self) -> bool;
    fn app_name(&self) -> &str;
    fn user_agent(&self) -> &str;
}

/// Legacy layout engine without native CSS transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyEngine {
    /// Parsed engine version; `None` when the user agent did not carry one.
    pub version: Option<f64>,
}

impl LegacyEngine {
    /// Identifies the legacy engine from navigator properties.
    #[must_use]
    pub fn from_navigator(app_name: &str, user_agent: &str) -> Option<Self> {
        if app_name != LEGACY_ENGINE_APP_NAME {
            return None;
        }
        Some(Self {
            version: parse_legacy_engine_version(user_agent),
        })
    }

    /// Version 9 and newer understand CSS transforms.
    #[must_use]
    pub fn supports_css_transforms(self) -> bool {
        self.version.is_some_and(|version| version >= 9.0)
    }
}

#[must_use]
pub fn parse_legacy_engine_version(user_agent: &str) -> Option<f64> {
    let pattern = LEGACY_VERSION_PATTERN.as_ref()?;
    let captures = pattern.captures(user_agent)?;
    let raw = captures.get(1)?.as_str();
    // "9.0.1" style versions keep only their leading numeric part.
    let numeric: String = raw
        .split('.')
        .take(2)
        .collect::<Vec<_>>()
        .join(".");
    numeric.parse().ok()
}

/// Snapshot of what the runtime can render with.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub canvas: bool,
    pub canvas_text: bool,
    pub style_transitions: bool,
    pub legacy_engine: Option<LegacyEngine>,
}

/// Queries the environment once. Canvas text implies canvas support.
#[must_use]
pub fn detect_capabilities(env: &dyn RuntimeEnvironment) -> Capabilities {
    let canvas = env.supports_canvas();
    Capabilities {
        canvas,
        canvas_text: canvas && env.supports_canvas_text(),
        style_transitions: env.supports_style_transitions(),
        legacy_engine: LegacyEngine::from_navigator(env.app_name(), env.user_agent()),
    }
}

/// Fixed environment profile, typically loaded from configuration or used by
/// headless hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticEnvironment {
    pub canvas: bool,
    pub canvas_text: bool,
    pub style_transitions: bool,
    pub app_name: String,
    pub user_agent: String,
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self::modern()
    }
}

impl StaticEnvironment {
    /// Standards-compliant runtime with canvas text and transitions.
    #[must_use]
    pub fn modern() -> Self {
        Self {
            canvas: true,
            canvas_text: true,
            style_transitions: true,
            app_name: "Netscape".to_owned(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_owned(),
        }
    }

    /// Legacy engine reporting `version` in its user agent.
    #[must_use]
    pub fn legacy(version: f64) -> Self {
        Self {
            canvas: version >= 9.0,
            canvas_text: version >= 9.0,
            style_transitions: false,
            app_name: LEGACY_ENGINE_APP_NAME.to_owned(),
            user_agent: format!("Mozilla/4.0 (compatible; MSIE {version:.1}; Windows NT 6.1)"),
        }
    }

    /// Runtime with no canvas and no transitions; only plain DOM works.
    #[must_use]
    pub fn headless() -> Self {
        Self {
            canvas: false,
            canvas_text: false,
            style_transitions: false,
            ..Self::modern()
        }
    }

    #[must_use]
    pub fn with_canvas_text(mut self, enabled: bool) -> Self {
        self.canvas_text = enabled;
        if enabled {
            self.canvas = true;
        }
        self
    }

    #[must_use]
    pub fn with_style_transitions(mut self, enabled: bool) -> Self {
        self.style_transitions = enabled;
        self
    }
}

impl RuntimeEnvironment for StaticEnvironment {
    fn supports_canvas(&self) -> bool {
        self.canvas
    }

    fn supports_canvas_text(&self) -> bool {
        self.canvas_text
    }

    fn supports_style_transitions(&self) -> bool {
        self.style_transitions
    }

    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::{
        LegacyEngine, StaticEnvironment, detect_capabilities, parse_legacy_engine_version,
    };

    #[test]
    fn parses_msie_versions() {
        assert_eq!(
            parse_legacy_engine_version("Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1)"),
            Some(8.0)
        );
        assert_eq!(
            parse_legacy_engine_version("Mozilla/5.0 (compatible; MSIE 10.6.1; Trident/6.0)"),
            Some(10.6)
        );
        assert_eq!(parse_legacy_engine_version("Mozilla/5.0 (X11)"), None);
    }

    #[test]
    fn only_legacy_app_name_is_detected() {
        assert!(LegacyEngine::from_navigator("Netscape", "MSIE 9.0").is_none());
        let engine = LegacyEngine::from_navigator("Microsoft Internet Explorer", "garbage")
            .expect("legacy engine");
        assert_eq!(engine.version, None);
        assert!(!engine.supports_css_transforms());
    }

    #[test]
    fn canvas_text_requires_canvas() {
        let mut env = StaticEnvironment::modern();
        env.canvas = false;
        let caps = detect_capabilities(&env);
        assert!(!caps.canvas);
        assert!(!caps.canvas_text);
        assert!(caps.style_transitions);
        assert!(caps.legacy_engine.is_none());
    }

    #[test]
    fn legacy_profile_round_trips_version() {
        let caps = detect_capabilities(&StaticEnvironment::legacy(7.0));
        assert_eq!(caps.legacy_engine.and_then(|engine| engine.version), Some(7.0));
    }
}
