use crate::layout::{DashboardLayout, DomainGroup, RenderItem};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub title: Option<String>,
    pub canvas_width: i32,
    pub svg_height: i32,
    pub svg_height_mm: f32,
    pub box_width: f32,
    pub box_height: f32,
    pub capabilities_header_y: i32,
    pub legend_y: i32,
    pub governance: Vec<ItemDump>,
    pub groups: Vec<GroupDump>,
    pub initiative_gradients: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemDump {
    pub name: String,
    pub domain: String,
    pub x: f32,
    pub y: f32,
    pub gradient_id: String,
    pub border: String,
    pub initiatives: u32,
    pub stroke: String,
    pub name_lines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GroupDump {
    pub index: usize,
    pub label: String,
    pub spacer: bool,
    pub show_header: bool,
    pub header_x: f32,
    pub header_y: f32,
    pub header_width: f32,
    pub items: Vec<ItemDump>,
}

impl ItemDump {
    fn from_item(item: &RenderItem) -> Self {
        Self {
            name: item.name.clone(),
            domain: item.domain.clone(),
            x: item.x,
            y: item.y,
            gradient_id: item.gradient_id.clone(),
            border: item.border.clone(),
            initiatives: item.initiatives,
            stroke: item.initiative_stroke.to_string(),
            name_lines: item.name_lines.clone(),
        }
    }
}

impl GroupDump {
    fn from_group(index: usize, group: &DomainGroup) -> Self {
        Self {
            index,
            label: group.label.clone(),
            spacer: group.spacer,
            show_header: group.show_header,
            header_x: group.header_x,
            header_y: group.header_y,
            header_width: group.header_width,
            items: group.items.iter().map(ItemDump::from_item).collect(),
        }
    }
}

impl LayoutDump {
    pub fn from_layout(layout: &DashboardLayout) -> Self {
        LayoutDump {
            title: layout.title.clone(),
            canvas_width: layout.canvas_width,
            svg_height: layout.svg_height,
            svg_height_mm: layout.svg_height_mm,
            box_width: layout.box_width,
            box_height: layout.box_height,
            capabilities_header_y: layout.capabilities_header_y,
            legend_y: layout.legend_y,
            governance: layout.governance_items.iter().map(ItemDump::from_item).collect(),
            groups: layout
                .domain_groups
                .iter()
                .enumerate()
                .map(|(idx, group)| GroupDump::from_group(idx, group))
                .collect(),
            initiative_gradients: layout
                .initiative_gradients
                .iter()
                .map(|gradient| gradient.id.clone())
                .collect(),
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &DashboardLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::compute_layout;
    use crate::model::{Capabilities, ComponentItem, Domain, Esa, Maturity, Status};

    #[test]
    fn dump_mirrors_groups_and_items() {
        let esa = Esa {
            capabilities: Some(Capabilities {
                domains: Some(vec![
                    Some(Domain::spacer()),
                    Some(Domain::new(
                        "Runtime",
                        vec![ComponentItem::new("WAF", "Edge", Status::Low, Maturity::Initial)
                            .with_initiatives(1, "R")],
                    )),
                ]),
                ..Capabilities::default()
            }),
            ..Esa::default()
        };
        let layout = compute_layout(&esa, &LayoutConfig::default()).unwrap();
        let dump = LayoutDump::from_layout(&layout);
        assert_eq!(dump.groups.len(), 2);
        assert!(dump.groups[0].spacer);
        assert_eq!(dump.groups[1].items[0].gradient_id, "grad_dom_1_0");
        assert_eq!(dump.groups[1].items[0].stroke, "url(#grad_dom_1_0_initiative)");
        assert_eq!(dump.initiative_gradients, vec!["grad_dom_1_0_initiative".to_string()]);

        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["groups"][1]["label"], "Runtime");
    }
}
