use serde::{Deserialize, Serialize};

pub const RAG_RED: &str = "#DC2626";
pub const RAG_AMBER: &str = "#F97316";
pub const RAG_GREEN: &str = "#22C55E";
pub const RAG_YELLOW: &str = "#FBBF24";
pub const RAG_DEFAULT: &str = "#D1D5DB";

pub const WHITE: &str = "#FFFFFF";
pub const GRAY: &str = "#9CA3AF";
pub const LIGHT_GRAY: &str = "#D1D5DB";
pub const DARK_GRAY: &str = "#333";
pub const PRIMARY_BLUE: &str = "#1E3A8A";

/// Color of one character of an initiative RAG string.
pub fn initiative_rag_color(ch: char) -> &'static str {
    match ch {
        'R' => RAG_RED,
        'A' => RAG_AMBER,
        'G' => RAG_GREEN,
        _ => WHITE,
    }
}

/// Color of a named RAG tag ("red", "amber", "yellow", "green").
pub fn rag_color(rag: Option<&str>) -> &'static str {
    let Some(rag) = rag else {
        return RAG_DEFAULT;
    };
    match rag.trim().to_ascii_lowercase().as_str() {
        "red" => RAG_RED,
        "amber" => RAG_AMBER,
        "yellow" => RAG_YELLOW,
        "green" => RAG_GREEN,
        _ => RAG_DEFAULT,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub title_font_size: f32,
    pub background: String,
    pub title_fill: String,
    pub title_text_color: String,
    pub section_fill: String,
    pub section_text_color: String,
    pub header_fill: String,
    pub header_text_color: String,
    pub item_text_color: String,
    pub badge_fill: String,
    pub badge_text_color: String,
    pub legend_text_color: String,
}

impl Theme {
    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            title_font_size: 18.0,
            background: WHITE.to_string(),
            title_fill: PRIMARY_BLUE.to_string(),
            title_text_color: WHITE.to_string(),
            section_fill: "#E0E7FF".to_string(),
            section_text_color: PRIMARY_BLUE.to_string(),
            header_fill: "#334155".to_string(),
            header_text_color: WHITE.to_string(),
            item_text_color: "#111827".to_string(),
            badge_fill: PRIMARY_BLUE.to_string(),
            badge_text_color: WHITE.to_string(),
            legend_text_color: "#1F2937".to_string(),
        }
    }

    pub fn classic() -> Self {
        Self {
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            font_size: 11.0,
            title_font_size: 18.0,
            background: WHITE.to_string(),
            title_fill: PRIMARY_BLUE.to_string(),
            title_text_color: WHITE.to_string(),
            section_fill: LIGHT_GRAY.to_string(),
            section_text_color: "#000000".to_string(),
            header_fill: GRAY.to_string(),
            header_text_color: "#000000".to_string(),
            item_text_color: "#000000".to_string(),
            badge_fill: DARK_GRAY.to_string(),
            badge_text_color: WHITE.to_string(),
            legend_text_color: "#000000".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}
