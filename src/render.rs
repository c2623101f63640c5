#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::layout::{DashboardLayout, DomainGroup, LegendEntry, RenderItem};
use crate::theme::Theme;
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::Path;

const LINE_HEIGHT: f32 = 12.0;
const ICON_SIZE: f32 = 14.0;
const BADGE_RADIUS: f32 = 8.0;
const LEGEND_SWATCH: i32 = 14;

pub fn render_svg(layout: &DashboardLayout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.canvas_width;
    let height = layout.svg_height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}mm\" height=\"{:.2}mm\" viewBox=\"0 0 {width} {height}\">",
        layout.a4_width_mm, layout.svg_height_mm,
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    push_defs(&mut svg, layout);
    push_title(&mut svg, layout, theme);
    push_section_header(
        &mut svg,
        layout,
        theme,
        layout.governance_header_y,
        layout.governance_header_y + 17.0,
        None,
        layout.governance_title.as_deref(),
        layout.governance_title_href.as_deref(),
    );
    for item in &layout.governance_items {
        push_item(&mut svg, item, layout, theme);
    }

    push_section_header(
        &mut svg,
        layout,
        theme,
        layout.capabilities_header_y as f32,
        layout.capabilities_text_y as f32,
        layout
            .capabilities_icon
            .as_deref()
            .map(|icon| (icon, layout.capabilities_icon_y as f32)),
        layout.capabilities_title.as_deref(),
        layout.capabilities_title_href.as_deref(),
    );
    for group in &layout.domain_groups {
        push_domain_group(&mut svg, group, layout, theme);
    }

    push_legend(&mut svg, layout, theme);
    svg.push_str("</svg>");

    tracing::info!(
        width,
        height,
        items = layout.all_items().count(),
        bytes = svg.len(),
        "dashboard rendered"
    );
    svg
}

fn push_defs(svg: &mut String, layout: &DashboardLayout) {
    svg.push_str("<defs>");
    for item in layout.all_items() {
        svg.push_str(&format!(
            "<linearGradient id=\"{}\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"100%\"><stop offset=\"50%\" stop-color=\"{}\"/><stop offset=\"50%\" stop-color=\"{}\"/></linearGradient>",
            escape_xml(&item.gradient_id),
            item.status_color,
            item.maturity_color
        ));
    }
    for gradient in &layout.initiative_gradients {
        svg.push_str(&format!(
            "<linearGradient id=\"{}\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"0%\">",
            escape_xml(&gradient.id)
        ));
        for stop in &gradient.stops {
            svg.push_str(&format!(
                "<stop offset=\"{:.2}%\" stop-color=\"{}\"/>",
                stop.offset, stop.color
            ));
        }
        svg.push_str("</linearGradient>");
    }
    for icon in icon_ids(layout) {
        let letter = icon
            .trim_start_matches("icon-")
            .chars()
            .next()
            .map(|ch| ch.to_uppercase().to_string())
            .unwrap_or_default();
        svg.push_str(&format!(
            "<symbol id=\"{}\" viewBox=\"0 0 16 16\"><rect x=\"1\" y=\"1\" width=\"14\" height=\"14\" rx=\"3\" fill=\"#FFFFFF\" fill-opacity=\"0.85\" stroke=\"#333\" stroke-width=\"1\"/><text x=\"8\" y=\"12\" text-anchor=\"middle\" font-size=\"10\" font-weight=\"bold\" fill=\"#333\">{}</text></symbol>",
            escape_xml(icon),
            escape_xml(&letter)
        ));
    }
    svg.push_str("</defs>");
}

/// Every icon symbol the dashboard references, sorted and de-duplicated.
fn icon_ids(layout: &DashboardLayout) -> BTreeSet<&str> {
    let mut ids = BTreeSet::new();
    ids.extend(layout.esa_icon.as_deref());
    ids.extend(layout.capabilities_icon.as_deref());
    ids.extend(layout.domain_groups.iter().filter_map(|g| g.icon_id.as_deref()));
    ids.extend(layout.all_items().filter_map(|item| item.icon_id.as_deref()));
    ids
}

fn push_title(svg: &mut String, layout: &DashboardLayout, theme: &Theme) {
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"{:.2}\" width=\"{}\" height=\"{:.2}\" fill=\"{}\"/>",
        layout.title_y, layout.canvas_width, layout.title_height, theme.title_fill
    ));
    if let Some(icon) = layout.esa_icon.as_deref() {
        let icon_y = layout.title_y + (layout.title_height - 20.0) / 2.0;
        svg.push_str(&icon_use(icon, 20.0, icon_y, 20.0));
    }
    if let Some(title) = layout.title.as_deref() {
        let text_y = layout.title_y + layout.title_height / 2.0 + theme.title_font_size / 3.0;
        let text = format!(
            "<text x=\"{}\" y=\"{text_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            layout.page_center,
            escape_xml(&theme.font_family),
            theme.title_font_size,
            theme.title_text_color,
            escape_xml(title)
        );
        svg.push_str(&linked(&text, layout.title_href.as_deref()));
    }

    let right = layout.canvas_width - 20;
    for (idx, (key, value)) in layout.attributes.iter().enumerate() {
        let y = layout.title_y + 12.0 + idx as f32 * 11.0;
        svg.push_str(&format!(
            "<text x=\"{right}\" y=\"{y:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"9\" fill=\"{}\">{}: {}</text>",
            escape_xml(&theme.font_family),
            theme.title_text_color,
            escape_xml(key),
            escape_xml(value)
        ));
    }
}

#[allow(clippy::too_many_arguments)]
fn push_section_header(
    svg: &mut String,
    layout: &DashboardLayout,
    theme: &Theme,
    y: f32,
    text_y: f32,
    icon: Option<(&str, f32)>,
    title: Option<&str>,
    href: Option<&str>,
) {
    svg.push_str(&format!(
        "<rect x=\"10\" y=\"{y:.2}\" width=\"{}\" height=\"25\" rx=\"3\" ry=\"3\" fill=\"{}\"/>",
        layout.canvas_width - 20,
        theme.section_fill
    ));
    let mut text_x = 20.0;
    if let Some((icon, icon_y)) = icon {
        svg.push_str(&icon_use(icon, text_x, icon_y, 18.0));
        text_x += 24.0;
    }
    if let Some(title) = title {
        let text = format!(
            "<text x=\"{text_x:.2}\" y=\"{text_y:.2}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            escape_xml(&theme.font_family),
            theme.font_size + 2.0,
            theme.section_text_color,
            escape_xml(title)
        );
        svg.push_str(&linked(&text, href));
    }
}

fn push_domain_group(svg: &mut String, group: &DomainGroup, layout: &DashboardLayout, theme: &Theme) {
    if group.spacer {
        return;
    }
    if group.show_header {
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"3\" ry=\"3\" fill=\"{}\"/>",
            group.header_x, group.header_y, group.header_width, layout.header_height, theme.header_fill
        ));
        if let Some(icon) = group.icon_id.as_deref() {
            svg.push_str(&icon_use(icon, group.header_x + 4.0, group.header_icon_y, 16.0));
        }
        let text = format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            group.header_x + group.header_text_x,
            group.header_text_y,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.header_text_color,
            escape_xml(&group.label)
        );
        svg.push_str(&linked(&text, group.domain_href.as_deref()));
    }
    for item in &group.items {
        push_item(svg, item, layout, theme);
    }
}

fn push_item(svg: &mut String, item: &RenderItem, layout: &DashboardLayout, theme: &Theme) {
    let w = layout.box_width;
    let h = layout.box_height;
    svg.push_str(&format!(
        "<g transform=\"translate({:.2},{:.2})\">",
        item.x, item.y
    ));
    svg.push_str(&format!(
        "<rect width=\"{w:.2}\" height=\"{h:.2}\" rx=\"4\" ry=\"4\" fill=\"url(#{})\" stroke=\"{}\" stroke-width=\"{}\"/>",
        escape_xml(&item.gradient_id),
        item.border,
        if item.border == "red" { 2 } else { 1 }
    ));
    if item.double_border {
        svg.push_str(&format!(
            "<rect x=\"3\" y=\"3\" width=\"{:.2}\" height=\"{:.2}\" rx=\"3\" ry=\"3\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\"/>",
            w - 6.0,
            h - 6.0,
            item.border
        ));
    }

    let anchor = item.text_anchor.as_str();
    let mut line_y = 15.0;
    let mut name_text = format!(
        "<text x=\"{:.2}\" y=\"{line_y:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">",
        item.text_x,
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.item_text_color
    );
    for (idx, line) in item.name_lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { LINE_HEIGHT };
        name_text.push_str(&format!(
            "<tspan x=\"{:.2}\" dy=\"{dy:.2}\">{}</tspan>",
            item.text_x,
            escape_xml(line)
        ));
    }
    name_text.push_str("</text>");
    svg.push_str(&linked(&name_text, item.name_href.as_deref()));

    line_y += item.name_lines.len() as f32 * LINE_HEIGHT;
    if let Some(capability) = item.capability_lines.first().filter(|line| !line.is_empty()) {
        let text = format!(
            "<text x=\"{:.2}\" y=\"{line_y:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            item.text_x,
            escape_xml(&theme.font_family),
            theme.font_size - 1.0,
            theme.item_text_color,
            escape_xml(capability)
        );
        svg.push_str(&linked(&text, item.capability_href.as_deref()));
    }

    if let Some(icon) = item.icon_id.as_deref() {
        svg.push_str(&icon_use(icon, item.icon_x, 3.0, ICON_SIZE));
    }
    if item.show_initiatives {
        let cx = layout.initiative_circle_x;
        svg.push_str(&format!(
            "<circle cx=\"{cx}\" cy=\"{}\" r=\"{BADGE_RADIUS}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>",
            layout.initiative_circle_y, theme.badge_fill, item.initiative_stroke
        ));
        svg.push_str(&format!(
            "<text x=\"{cx}\" y=\"{}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"10\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            layout.initiative_text_y,
            escape_xml(&theme.font_family),
            theme.badge_text_color,
            item.initiatives
        ));
    }
    svg.push_str("</g>");
}

fn push_legend(svg: &mut String, layout: &DashboardLayout, theme: &Theme) {
    let widest = layout
        .status_legend
        .iter()
        .chain(&layout.maturity_legend)
        .map(|entry| entry.x)
        .max()
        .unwrap_or(0)
        + 140;
    let available = (layout.canvas_width - 40) as f32;
    let scale = if widest as f32 > available {
        available / widest as f32
    } else {
        1.0
    };
    svg.push_str(&format!(
        "<g transform=\"translate(20,{}) scale({scale:.4})\">",
        layout.legend_y
    ));
    push_legend_block(svg, "Status", &layout.status_legend, theme);
    push_legend_block(svg, "Maturity", &layout.maturity_legend, theme);
    svg.push_str("</g>");
}

fn push_legend_block(svg: &mut String, heading: &str, entries: &[LegendEntry], theme: &Theme) {
    let Some(first) = entries.first() else {
        return;
    };
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"14\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{heading}</text>",
        first.x,
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.legend_text_color
    ));
    for entry in entries {
        svg.push_str(&format!(
            "<rect x=\"{}\" y=\"26\" width=\"{LEGEND_SWATCH}\" height=\"{LEGEND_SWATCH}\" rx=\"2\" fill=\"{}\" stroke=\"#333\" stroke-width=\"0.5\"/>",
            entry.x, entry.color
        ));
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"37\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            entry.x + LEGEND_SWATCH + 6,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.legend_text_color,
            escape_xml(entry.label)
        ));
    }
}

fn icon_use(icon: &str, x: f32, y: f32, size: f32) -> String {
    format!(
        "<use href=\"#{}\" x=\"{x:.2}\" y=\"{y:.2}\" width=\"{size}\" height=\"{size}\"/>",
        escape_xml(icon)
    )
}

fn linked(fragment: &str, href: Option<&str>) -> String {
    match href {
        Some(href) => format!(
            "<a href=\"{}\" target=\"_blank\">{fragment}</a>",
            escape_xml(href)
        ),
        None => fragment.to_string(),
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

/// Rasterizes a dashboard SVG at `dpi`. The SVG's millimetre size maps to
/// CSS pixels at 96 dpi, so the output is scaled by `dpi / 96`.
#[cfg(feature = "png")]
pub fn render_png(svg: &str, render_cfg: &RenderConfig) -> crate::error::Result<Vec<u8>> {
    use crate::error::Error;

    let conversion = |message: String| Error::Conversion { message };

    let mut opt = usvg::Options::default();
    opt.font_family = render_cfg.font_family.clone();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|err| conversion(err.to_string()))?;
    let scale = if render_cfg.dpi > 0.0 { render_cfg.dpi / 96.0 } else { 1.0 };
    let size = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or_else(|| conversion(format!("invalid output scale {scale}")))?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| conversion("Failed to allocate pixmap".to_string()))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    let png = pixmap
        .encode_png()
        .map_err(|err| conversion(err.to_string()))?;
    tracing::info!(
        width = size.width(),
        height = size.height(),
        dpi = render_cfg.dpi,
        "dashboard rasterized"
    );
    Ok(png)
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let png = render_png(svg, render_cfg)?;
    std::fs::write(output, png)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
