use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub text_color: String,
    pub text_outline_color: String,
    pub text_outline_width: f32,
    pub frame_color: String,
    pub frame_width: f32,
    pub root_frame_width: f32,
    pub missing_image_fill: String,
    pub background: String,
}

impl Theme {
    /// White captions with a heavy black outline, the classic meme look.
    pub fn impact() -> Self {
        Self {
            font_family: "Impact, \"Anton\", \"Arial Black\", sans-serif".to_string(),
            text_color: "#FFFFFF".to_string(),
            text_outline_color: "#000000".to_string(),
            text_outline_width: 3.0,
            frame_color: "#000000".to_string(),
            frame_width: 1.0,
            root_frame_width: 2.5,
            missing_image_fill: "none".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn plain() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, sans-serif".to_string(),
            text_color: "#1C2430".to_string(),
            text_outline_color: "none".to_string(),
            text_outline_width: 0.0,
            frame_color: "#7A8AA6".to_string(),
            frame_width: 1.0,
            root_frame_width: 2.0,
            missing_image_fill: "#EEF2F8".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "impact" | "default" => Some(Self::impact()),
            "plain" => Some(Self::plain()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::impact()
    }
}
