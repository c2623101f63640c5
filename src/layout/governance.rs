use crate::config::LayoutConfig;
use crate::model::ComponentItem;

use super::{InitiativeGradient, RenderItem, build_render_item};

/// Geometry of a wrapping horizontal row of boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowFrame {
    pub start_x: f32,
    pub start_y: f32,
    pub box_width: f32,
    pub box_height: f32,
    pub right_limit: f32,
    pub gap_x: f32,
    pub gap_y: f32,
}

impl RowFrame {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            start_x: config.governance_start_x,
            start_y: config.governance_header_y
                + config.governance_header_height
                + config.governance_header_to_row_gap,
            box_width: config.box_width(),
            box_height: config.box_height,
            right_limit: config.right_limit(),
            gap_x: config.gap_x,
            gap_y: config.governance_row_gap,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GovernanceLayout {
    pub items: Vec<RenderItem>,
    /// Y just below the last row; one empty row when there are no items.
    pub bottom: f32,
    pub rows: usize,
}

/// Places governance components left to right, wrapping below the tallest
/// box of the current row whenever the next box would cross `right_limit`.
pub fn layout_governance(
    components: &[&ComponentItem],
    section_label: &str,
    frame: &RowFrame,
    config: &LayoutConfig,
    gradients: &mut Vec<InitiativeGradient>,
) -> GovernanceLayout {
    let mut items = Vec::with_capacity(components.len());
    let mut current_x = frame.start_x;
    let mut row_top = frame.start_y;
    let mut row_bottom = row_top + frame.box_height;
    let mut rows = 1;

    for (idx, comp) in components.iter().enumerate() {
        if current_x > frame.start_x && current_x + frame.box_width > frame.right_limit {
            row_top = row_bottom + frame.gap_y;
            row_bottom = row_top + frame.box_height;
            current_x = frame.start_x;
            rows += 1;
        }
        let gradient_id = format!("grad_gov_{idx}");
        items.push(build_render_item(
            comp,
            current_x,
            row_top,
            section_label,
            gradient_id,
            frame.box_width,
            config,
            gradients,
        ));
        row_bottom = row_bottom.max(row_top + frame.box_height);
        current_x += frame.box_width + frame.gap_x;
    }

    GovernanceLayout {
        items,
        bottom: row_bottom,
        rows,
    }
}
