pub mod domains;
pub mod governance;
pub mod gradient;
pub mod legend;
pub mod text;
pub(crate) mod types;
pub use types::*;

use domains::{DomainFrame, layout_domains};
use governance::{RowFrame, layout_governance};
use gradient::initiative_stroke;
use text::wrap_text;

use crate::config::LayoutConfig;
use crate::links::parse_link_field;
use crate::model::{ComponentItem, Domain, Esa, icon_symbol_id};
use crate::theme::{DARK_GRAY, GRAY};
use crate::validate::{ValidationError, validate_esa};

/// Validates `esa` and computes the full dashboard geometry. Pure: the same
/// model and config always produce an identical layout.
pub fn compute_layout(esa: &Esa, config: &LayoutConfig) -> Result<DashboardLayout, ValidationError> {
    validate_esa(Some(esa))?;

    let mut gradients: Vec<InitiativeGradient> = Vec::new();
    let box_width = config.box_width();
    let title_link = parse_link_field(esa.title.as_deref());

    let governance = esa.governance.as_ref();
    let governance_title_link = parse_link_field(governance.and_then(|g| g.title.as_deref()));
    let governance_label = governance_title_link.text_or_empty();
    let governance_components = governance
        .map(|g| g.component_list())
        .unwrap_or_default();
    let governance_layout = layout_governance(
        &governance_components,
        &governance_label,
        &RowFrame::from_config(config),
        config,
        &mut gradients,
    );

    let capabilities_header_y = governance_layout.bottom + config.governance_to_capabilities_gap;
    let domain_start_y = capabilities_header_y + config.capabilities_header_to_domains_gap;

    let capabilities = esa.capabilities.as_ref();
    let capabilities_title_link = parse_link_field(capabilities.and_then(|c| c.title.as_deref()));
    let domains: Option<Vec<&Domain>> = capabilities
        .and_then(|c| c.domains.as_ref())
        .map(|list| list.iter().flatten().collect());
    let domain_layout = domains.as_ref().map(|domains| {
        layout_domains(
            domains,
            &DomainFrame::from_config(config, domain_start_y),
            config,
            &mut gradients,
        )
    });

    let legend_y = legend::legend_y(
        domain_layout.as_ref().map(|layout| layout.bottom),
        domain_start_y,
        config,
    );
    let svg_height = legend::canvas_height(legend_y, config);

    tracing::debug!(
        governance_items = governance_layout.items.len(),
        governance_rows = governance_layout.rows,
        domain_rows = domain_layout.as_ref().map(|l| l.rows).unwrap_or(0),
        gradients = gradients.len(),
        svg_height,
        "dashboard layout computed"
    );

    Ok(DashboardLayout {
        title: title_link.text,
        title_href: title_link.href,
        esa_icon: icon_symbol_id(esa.icon.as_deref()),
        title_y: config.main_title_y,
        title_height: config.main_title_height,
        attributes: esa.attributes.clone().unwrap_or_default(),
        governance_title: governance.and(governance_title_link.text),
        governance_title_href: governance_title_link.href,
        governance_header_y: config.governance_header_y,
        governance_items: governance_layout.items,
        capabilities_title: capabilities.and(capabilities_title_link.text),
        capabilities_title_href: capabilities_title_link.href,
        capabilities_header_y: capabilities_header_y as i32,
        capabilities_text_y: (capabilities_header_y + 18.0) as i32,
        capabilities_icon_y: (capabilities_header_y + 3.0) as i32,
        capabilities_icon: icon_symbol_id(capabilities.and_then(|c| c.icon.as_deref())),
        domain_groups: domain_layout.map(|layout| layout.groups).unwrap_or_default(),
        box_width,
        box_height: config.box_height,
        half_box_width: box_width / 2.0,
        header_height: config.header_height,
        page_center: (config.canvas_width / 2.0) as i32,
        legend_y,
        status_legend: legend::status_legend(config),
        maturity_legend: legend::maturity_legend(config),
        initiative_gradients: gradients,
        canvas_width: config.canvas_width as i32,
        svg_height,
        svg_height_mm: legend::height_mm(svg_height, config),
        a4_width_mm: config.a4_width_mm,
        initiative_circle_x: (box_width - 10.0) as i32,
        initiative_circle_y: (config.box_height - 12.0) as i32,
        initiative_text_y: (config.box_height - 8.0) as i32,
    })
}

/// Positions one component: wrapped text, colors, border, badge stroke and
/// text anchoring.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_render_item(
    comp: &ComponentItem,
    x: f32,
    y: f32,
    domain_label: &str,
    gradient_id: String,
    box_width: f32,
    config: &LayoutConfig,
    gradients: &mut Vec<InitiativeGradient>,
) -> RenderItem {
    let red_flag = comp
        .rag
        .as_deref()
        .map(|rag| rag.eq_ignore_ascii_case("red"))
        .unwrap_or(false);
    let border = if red_flag { "red" } else { DARK_GRAY };
    let icon_id = icon_symbol_id(comp.icon.as_deref());

    let name_link = parse_link_field(comp.name.as_deref());
    let capability_link = parse_link_field(comp.capability.as_deref());
    let name = name_link.text_or_empty();
    let capability = capability_link.text_or_empty();
    let name_lines = wrap_text(Some(&name), config.name_chars_per_line, config.max_name_lines);
    let capability_lines = wrap_text(
        Some(&capability),
        config.capability_chars_per_line,
        config.max_capability_lines,
    );

    let initiatives = u32::try_from(comp.initiatives.max(0)).unwrap_or(u32::MAX);
    let show_initiatives = initiatives > 0;
    let initiative_stroke = initiative_stroke(comp, &gradient_id, gradients);

    let decorated = show_initiatives || icon_id.is_some();
    let (text_anchor, text_x) = if decorated {
        (TextAnchor::Start, config.text_left_x)
    } else {
        (TextAnchor::Middle, box_width / 2.0)
    };

    RenderItem {
        x,
        y,
        name,
        capability,
        domain: domain_label.to_string(),
        status_color: comp.status.map(|s| s.hex()).unwrap_or(GRAY).to_string(),
        maturity_color: comp.maturity.map(|m| m.hex()).unwrap_or(GRAY).to_string(),
        gradient_id,
        border: border.to_string(),
        double_border: comp.double_border,
        initiatives,
        show_initiatives,
        icon_id,
        name_lines,
        capability_lines,
        name_href: name_link.href,
        capability_href: capability_link.href,
        text_x,
        text_anchor,
        icon_x: box_width - config.icon_pos_x_offset,
        initiative_stroke,
    }
}
