use serde::{Deserialize, Serialize};

/// Palette and typography feeding the generated stylesheet. Every color is a
/// CSS color literal, interpolated verbatim into the style block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub surface: String,
    pub border_color: String,
    pub text_color: String,
    pub header_start: String,
    pub header_end: String,
    pub annotation_accent: String,
    pub annotation_background: String,
    pub annotation_text: String,
    pub attribute_accent: String,
    pub attribute_background: String,
    pub attribute_heading: String,
    pub main_arg_accent: String,
    pub main_arg_background: String,
    pub main_arg_label: String,
    pub main_arg_value_background: String,
    pub table_accent: String,
    pub table_background: String,
    pub table_heading: String,
    pub table_header_background: String,
    pub warning_accent: String,
    pub warning_background: String,
    pub error_accent: String,
    pub error_background: String,
    pub error_text: String,
}

impl Theme {
    /// Dark palette of the original workflow viewer.
    pub fn dark() -> Self {
        Self {
            font_family: "\"Source Sans Pro\", sans-serif".to_string(),
            font_size: 14.0,
            background: "#0e1117".to_string(),
            surface: "#1c1f26".to_string(),
            border_color: "#444444".to_string(),
            text_color: "#dddddd".to_string(),
            header_start: "#2a5b98".to_string(),
            header_end: "#1a3e6e".to_string(),
            annotation_accent: "#4CAF50".to_string(),
            annotation_background: "#1b2d1b".to_string(),
            annotation_text: "#b4e0b4".to_string(),
            attribute_accent: "#0078D7".to_string(),
            attribute_background: "#112233".to_string(),
            attribute_heading: "#4ca3ff".to_string(),
            main_arg_accent: "#00aaff".to_string(),
            main_arg_background: "#1b2b3b".to_string(),
            main_arg_label: "#98c1ff".to_string(),
            main_arg_value_background: "#2c2f36".to_string(),
            table_accent: "#68d700".to_string(),
            table_background: "#1b3b22".to_string(),
            table_heading: "#7cff02".to_string(),
            table_header_background: "#2f4f25".to_string(),
            warning_accent: "#d9534f".to_string(),
            warning_background: "#2a1a1a".to_string(),
            error_accent: "#ff3333".to_string(),
            error_background: "#42211f".to_string(),
            error_text: "#ff6b6b".to_string(),
        }
    }

    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            surface: "#F8FAFF".to_string(),
            border_color: "#C7D2E5".to_string(),
            text_color: "#1C2430".to_string(),
            header_start: "#4C7FC4".to_string(),
            header_end: "#2A5B98".to_string(),
            annotation_accent: "#4CAF50".to_string(),
            annotation_background: "#EDF7ED".to_string(),
            annotation_text: "#2E6B30".to_string(),
            attribute_accent: "#0078D7".to_string(),
            attribute_background: "#EEF4FB".to_string(),
            attribute_heading: "#1F6FBF".to_string(),
            main_arg_accent: "#00aaff".to_string(),
            main_arg_background: "#EAF4FB".to_string(),
            main_arg_label: "#1C5E8F".to_string(),
            main_arg_value_background: "#FFFFFF".to_string(),
            table_accent: "#5BAE00".to_string(),
            table_background: "#F0F8EA".to_string(),
            table_heading: "#3E7A00".to_string(),
            table_header_background: "#E1F0D2".to_string(),
            warning_accent: "#d9534f".to_string(),
            warning_background: "#FBEAEA".to_string(),
            error_accent: "#ff3333".to_string(),
            error_background: "#FDEEEC".to_string(),
            error_text: "#B3261E".to_string(),
        }
    }
}
