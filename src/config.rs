use crate::parser::DEFAULT_MAX_DEPTH;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Horizontal indentation per nesting level, in pixels.
    pub indent_step: f32,
    /// Height of the scrollable visualization container, in pixels.
    pub viewport_height: f32,
    /// Conversion depth past which subtrees degrade into inline error nodes.
    pub max_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_step: 20.0,
            viewport_height: 650.0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::dark(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    theme: Option<String>,
    #[serde(rename = "themeVariables")]
    theme_variables: Option<ThemeVariables>,
    render: Option<RenderFileConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct ThemeVariables {
    #[serde(rename = "fontFamily")]
    font_family: Option<String>,
    #[serde(rename = "fontSize")]
    font_size: Option<f32>,
    background: Option<String>,
    surface: Option<String>,
    #[serde(rename = "borderColor")]
    border_color: Option<String>,
    #[serde(rename = "textColor")]
    text_color: Option<String>,
    #[serde(rename = "headerStart")]
    header_start: Option<String>,
    #[serde(rename = "headerEnd")]
    header_end: Option<String>,
    #[serde(rename = "warningAccent")]
    warning_accent: Option<String>,
    #[serde(rename = "errorAccent")]
    error_accent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RenderFileConfig {
    #[serde(rename = "indentStep")]
    indent_step: Option<f32>,
    #[serde(rename = "viewportHeight")]
    viewport_height: Option<f32>,
    #[serde(rename = "maxDepth")]
    max_depth: Option<usize>,
}

/// Load the optional JSON5 config file and merge it over the defaults:
/// a theme preset name first, then individual variable overrides.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "light" {
            config.theme = Theme::light();
        } else if theme_name == "dark" || theme_name == "default" {
            config.theme = Theme::dark();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.surface {
            config.theme.surface = v;
        }
        if let Some(v) = vars.border_color {
            config.theme.border_color = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.header_start {
            config.theme.header_start = v;
        }
        if let Some(v) = vars.header_end {
            config.theme.header_end = v;
        }
        if let Some(v) = vars.warning_accent {
            config.theme.warning_accent = v;
        }
        if let Some(v) = vars.error_accent {
            config.theme.error_accent = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.indent_step {
            config.render.indent_step = v;
        }
        if let Some(v) = render.viewport_height {
            config.render.viewport_height = v;
        }
        if let Some(v) = render.max_depth {
            config.render.max_depth = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_keeps_defaults() {
        let config = parse_config("{}").expect("parse failed");
        assert_eq!(config.render.indent_step, 20.0);
        assert_eq!(config.theme.background, Theme::dark().background);
    }

    #[test]
    fn preset_then_variables_override() {
        let config = parse_config(
            "{ theme: 'light', themeVariables: { background: '#123456', fontSize: 15 }, render: { indentStep: 32, maxDepth: 10 } }",
        )
        .expect("parse failed");
        assert_eq!(config.theme.background, "#123456");
        assert_eq!(config.theme.font_size, 15.0);
        assert_eq!(config.theme.surface, Theme::light().surface);
        assert_eq!(config.render.indent_step, 32.0);
        assert_eq!(config.render.max_depth, 10);
    }
}
