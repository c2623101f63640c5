use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every constant the layout engine reads. Defaults reproduce the reference
/// A4-landscape dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub canvas_width: f32,
    pub a4_width_mm: f32,
    pub box_height: f32,
    pub gap_x: f32,
    pub gap_y: f32,
    pub row_gap_y: f32,
    pub left_margin: f32,
    pub header_offset: f32,
    pub header_height: f32,
    pub governance_start_x: f32,
    pub governance_header_y: f32,
    pub governance_header_height: f32,
    pub governance_header_to_row_gap: f32,
    pub governance_row_gap: f32,
    pub governance_to_capabilities_gap: f32,
    pub capabilities_header_to_domains_gap: f32,
    pub name_chars_per_line: usize,
    pub capability_chars_per_line: usize,
    pub max_name_lines: usize,
    pub max_capability_lines: usize,
    pub max_domain_columns_per_row: usize,
    pub max_rows_per_column: usize,
    pub small_domain_threshold: usize,
    pub space_column_width_factor: f32,
    pub domain_section_gap: f32,
    pub domain_start_x: f32,
    pub text_left_x: f32,
    pub icon_pos_x_offset: f32,
    pub legend_height: i32,
    pub bottom_margin: i32,
    pub legend_top_margin: i32,
    pub legend_item_width: i32,
    pub legend_status_start_x: i32,
    pub legend_maturity_start_x: i32,
    pub main_title_y: f32,
    pub main_title_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let gap_y = 12.0;
        let header_offset = 35.0;
        let header_height = 22.0;
        Self {
            canvas_width: 1400.0,
            a4_width_mm: 297.0,
            box_height: 45.0,
            gap_x: 16.0,
            gap_y,
            row_gap_y: 60.0,
            left_margin: 10.0,
            header_offset,
            header_height,
            governance_start_x: 20.0,
            governance_header_y: 50.0,
            governance_header_height: 25.0,
            governance_header_to_row_gap: 5.0,
            governance_row_gap: gap_y,
            governance_to_capabilities_gap: 30.0,
            capabilities_header_to_domains_gap: 75.0,
            name_chars_per_line: 24,
            capability_chars_per_line: 22,
            max_name_lines: 2,
            max_capability_lines: 1,
            max_domain_columns_per_row: 7,
            max_rows_per_column: 8,
            small_domain_threshold: 3,
            space_column_width_factor: 1.0 / 3.0,
            domain_section_gap: header_offset + header_height,
            domain_start_x: 20.0,
            text_left_x: 12.0,
            icon_pos_x_offset: 20.0,
            legend_height: 90,
            bottom_margin: 20,
            legend_top_margin: 30,
            legend_item_width: 140,
            legend_status_start_x: 0,
            legend_maturity_start_x: 720,
            main_title_y: 10.0,
            main_title_height: 35.0,
        }
    }
}

impl LayoutConfig {
    pub fn right_limit(&self) -> f32 {
        self.canvas_width - self.left_margin
    }

    /// Width of one component box, sized so that `max_domain_columns_per_row`
    /// boxes and their gaps fill the usable width.
    pub fn box_width(&self) -> f32 {
        let columns = self.max_domain_columns_per_row.max(1);
        let available = (self.right_limit() - self.domain_start_x).max(200.0);
        (available - self.gap_x * (columns as f32 - 1.0)) / columns as f32
    }

    pub fn spacer_width(&self) -> f32 {
        self.box_width() * self.space_column_width_factor
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub dpi: f32,
    pub background: String,
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: 150.0,
            background: "#FFFFFF".to_string(),
            font_family: "Inter".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::modern(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfig>,
    render: Option<RenderConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    title_font_size: Option<f32>,
    background: Option<String>,
    title_fill: Option<String>,
    title_text_color: Option<String>,
    section_fill: Option<String>,
    section_text_color: Option<String>,
    header_fill: Option<String>,
    header_text_color: Option<String>,
    item_text_color: Option<String>,
    badge_fill: Option<String>,
    badge_text_color: Option<String>,
    legend_text_color: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a JSON5 config document and merges it over the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "classic" | "default" => config.theme = Theme::classic(),
            other => tracing::warn!(theme = other, "unknown theme name, keeping modern"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }
    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }
    if let Some(render) = parsed.render {
        config.render = render;
    }
    Ok(config)
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.font_size {
        theme.font_size = v;
    }
    if let Some(v) = vars.title_font_size {
        theme.title_font_size = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
    if let Some(v) = vars.title_fill {
        theme.title_fill = v;
    }
    if let Some(v) = vars.title_text_color {
        theme.title_text_color = v;
    }
    if let Some(v) = vars.section_fill {
        theme.section_fill = v;
    }
    if let Some(v) = vars.section_text_color {
        theme.section_text_color = v;
    }
    if let Some(v) = vars.header_fill {
        theme.header_fill = v;
    }
    if let Some(v) = vars.header_text_color {
        theme.header_text_color = v;
    }
    if let Some(v) = vars.item_text_color {
        theme.item_text_color = v;
    }
    if let Some(v) = vars.badge_fill {
        theme.badge_fill = v;
    }
    if let Some(v) = vars.badge_text_color {
        theme.badge_text_color = v;
    }
    if let Some(v) = vars.legend_text_color {
        theme.legend_text_color = v;
    }
}
