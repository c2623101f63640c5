use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        }
    }
}

/// Stroke of the initiative badge: a flat color, or a reference to one of the
/// layout's initiative gradients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Stroke {
    Solid(String),
    Gradient(String),
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stroke::Solid(color) => f.write_str(color),
            Stroke::Gradient(id) => write!(f, "url(#{id})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitiativeGradient {
    pub id: String,
    pub stops: Vec<GradientStop>,
}

/// One positioned component box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderItem {
    pub x: f32,
    pub y: f32,
    pub name: String,
    pub capability: String,
    pub domain: String,
    pub status_color: String,
    pub maturity_color: String,
    /// Id of the diagonal status-to-maturity fill; unique per layout.
    pub gradient_id: String,
    pub border: String,
    pub double_border: bool,
    pub initiatives: u32,
    pub show_initiatives: bool,
    pub icon_id: Option<String>,
    pub name_lines: Vec<String>,
    pub capability_lines: Vec<String>,
    pub name_href: Option<String>,
    pub capability_href: Option<String>,
    pub text_x: f32,
    pub text_anchor: TextAnchor,
    pub icon_x: f32,
    pub initiative_stroke: Stroke,
}

impl RenderItem {
    pub fn bounds(&self, width: f32, height: f32) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width,
            height,
        }
    }
}

/// One rendered domain column segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainGroup {
    pub label: String,
    pub domain_href: Option<String>,
    pub icon_id: Option<String>,
    pub items: Vec<RenderItem>,
    pub header_x: f32,
    pub header_y: f32,
    pub header_text_y: f32,
    pub header_icon_y: f32,
    pub header_width: f32,
    pub header_text_x: f32,
    pub show_header: bool,
    pub spacer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
    pub x: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Geometry Output Model handed to the SVG writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub title: Option<String>,
    pub title_href: Option<String>,
    pub esa_icon: Option<String>,
    pub title_y: f32,
    pub title_height: f32,
    pub attributes: BTreeMap<String, String>,
    pub governance_title: Option<String>,
    pub governance_title_href: Option<String>,
    pub governance_header_y: f32,
    pub governance_items: Vec<RenderItem>,
    pub capabilities_title: Option<String>,
    pub capabilities_title_href: Option<String>,
    pub capabilities_header_y: i32,
    pub capabilities_text_y: i32,
    pub capabilities_icon_y: i32,
    pub capabilities_icon: Option<String>,
    pub domain_groups: Vec<DomainGroup>,
    pub box_width: f32,
    pub box_height: f32,
    pub half_box_width: f32,
    pub header_height: f32,
    pub page_center: i32,
    pub legend_y: i32,
    pub status_legend: Vec<LegendEntry>,
    pub maturity_legend: Vec<LegendEntry>,
    pub initiative_gradients: Vec<InitiativeGradient>,
    pub canvas_width: i32,
    pub svg_height: i32,
    pub svg_height_mm: f32,
    pub a4_width_mm: f32,
    pub initiative_circle_x: i32,
    pub initiative_circle_y: i32,
    pub initiative_text_y: i32,
}

impl DashboardLayout {
    /// Every positioned component, governance first.
    pub fn all_items(&self) -> impl Iterator<Item = &RenderItem> {
        self.governance_items
            .iter()
            .chain(self.domain_groups.iter().flat_map(|group| group.items.iter()))
    }
}
