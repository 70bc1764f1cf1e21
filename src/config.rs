use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Single,
    Grid,
    Overlay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub spacing: u32,
    pub with_title: bool,
    pub text_only_on_left: bool,
    pub text_only_on_right: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 2,
            spacing: 0,
            with_title: false,
            text_only_on_left: false,
            text_only_on_right: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    pub rows: usize,
    pub cols: usize,
    pub spacing: u32,
    pub with_title: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 2,
            spacing: 0,
            with_title: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaptionConfig {
    /// Replacement vocabulary; the built-in word list is used when unset.
    pub words: Option<Vec<String>>,
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            words: None,
            min_words: 2,
            max_words: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub strategy: StrategyKind,
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub num_images: usize,
    pub num_texts: usize,
    pub seed: Option<u64>,
    pub grid: GridConfig,
    pub overlay: OverlayConfig,
    pub captions: CaptionConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Grid,
            canvas_width: 800,
            canvas_height: 600,
            num_images: 4,
            num_texts: 0,
            seed: None,
            grid: GridConfig::default(),
            overlay: OverlayConfig::default(),
            captions: CaptionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Canvas fill; the theme background is used when unset.
    pub background: Option<String>,
    pub draw_frames: bool,
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// Share of the box width and height a fitted caption may occupy.
    pub fit_ratio: f32,
    pub line_height: f32,
}

impl RenderConfig {
    pub fn canvas_fill<'a>(&'a self, theme: &'a Theme) -> &'a str {
        self.background.as_deref().unwrap_or(&theme.background)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: None,
            draw_frames: true,
            min_font_size: 6.0,
            max_font_size: 32.0,
            fit_ratio: 0.9,
            line_height: 1.2,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    text_color: Option<String>,
    text_outline_color: Option<String>,
    text_outline_width: Option<f32>,
    frame_color: Option<String>,
    frame_width: Option<f32>,
    root_frame_width: Option<f32>,
    missing_image_fill: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfig>,
    render: Option<RenderConfig>,
}

/// Loads a JSON or JSON5 config file on top of the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("Unknown theme '{theme_name}'"))?;
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.text_outline_color {
            config.theme.text_outline_color = v;
        }
        if let Some(v) = vars.text_outline_width {
            config.theme.text_outline_width = v;
        }
        if let Some(v) = vars.frame_color {
            config.theme.frame_color = v;
        }
        if let Some(v) = vars.frame_width {
            config.theme.frame_width = v;
        }
        if let Some(v) = vars.root_frame_width {
            config.theme.root_frame_width = v;
        }
        if let Some(v) = vars.missing_image_fill {
            config.theme.missing_image_fill = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }

    if let Some(render) = parsed.render {
        config.render = render;
    }

    Ok(config)
}
