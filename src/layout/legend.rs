use crate::config::LayoutConfig;
use crate::model::{Maturity, Status};

use super::LegendEntry;

pub fn status_legend(config: &LayoutConfig) -> Vec<LegendEntry> {
    Status::ALL
        .iter()
        .enumerate()
        .map(|(idx, status)| LegendEntry {
            label: status.display_name(),
            color: status.hex(),
            x: config.legend_status_start_x + idx as i32 * config.legend_item_width,
        })
        .collect()
}

pub fn maturity_legend(config: &LayoutConfig) -> Vec<LegendEntry> {
    Maturity::ALL
        .iter()
        .enumerate()
        .map(|(idx, maturity)| LegendEntry {
            label: maturity.display_name(),
            color: maturity.hex(),
            x: config.legend_maturity_start_x + idx as i32 * config.legend_item_width,
        })
        .collect()
}

/// Legend top edge: below the domain content, or below the nominal domain
/// start when the model has no domain list.
pub fn legend_y(domain_bottom: Option<f32>, domain_start_y: f32, config: &LayoutConfig) -> i32 {
    let anchor = domain_bottom.unwrap_or(domain_start_y);
    (anchor + config.legend_top_margin as f32) as i32
}

pub fn canvas_height(legend_y: i32, config: &LayoutConfig) -> i32 {
    legend_y + config.legend_height + config.bottom_margin
}

pub fn height_mm(svg_height: i32, config: &LayoutConfig) -> f32 {
    svg_height as f32 * (config.a4_width_mm / config.canvas_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_offsets_match_the_fixed_table() {
        let config = LayoutConfig::default();
        let status: Vec<i32> = status_legend(&config).iter().map(|e| e.x).collect();
        let maturity: Vec<i32> = maturity_legend(&config).iter().map(|e| e.x).collect();
        assert_eq!(status, vec![0, 140, 280, 420, 560]);
        assert_eq!(maturity, vec![720, 860, 1000, 1140, 1280, 1420]);
        assert_eq!(status_legend(&config)[0].label, "Not Existing");
        assert_eq!(maturity_legend(&config)[5].color, "#0e8a39");
    }

    #[test]
    fn canvas_height_adds_legend_block_and_margin() {
        let config = LayoutConfig::default();
        let y = legend_y(Some(446.0), 230.0, &config);
        assert_eq!(y, 476);
        assert_eq!(canvas_height(y, &config), 476 + 90 + 20);
        assert_eq!(legend_y(None, 230.0, &config), 260);
    }

    #[test]
    fn millimetre_height_scales_with_a4_width() {
        let config = LayoutConfig::default();
        assert!((height_mm(1400, &config) - 297.0).abs() < 0.001);
    }
}
