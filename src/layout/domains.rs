use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::links::parse_link_field;
use crate::model::{ComponentItem, Domain, icon_symbol_id};

use super::{DomainGroup, InitiativeGradient, build_render_item};

/// Contiguous run of one domain's components placed in a single column
/// segment.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainChunk<'a> {
    pub domain_name: String,
    pub icon_id: Option<String>,
    pub components: Vec<&'a ComponentItem>,
}

impl DomainChunk<'_> {
    pub fn rows(&self) -> usize {
        self.components.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind<'a> {
    /// Blank horizontal space; never holds chunks.
    Spacer { width: f32 },
    /// Chunk(s) of a single domain that is too large to share its column.
    Normal { chunks: Vec<DomainChunk<'a>>, rows_used: usize },
    /// Chunks of consecutive small domains packed together.
    SmallPack { chunks: Vec<DomainChunk<'a>>, rows_used: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainColumn<'a> {
    pub kind: ColumnKind<'a>,
}

impl<'a> DomainColumn<'a> {
    fn new(chunk: DomainChunk<'a>, small: bool) -> Self {
        let rows_used = chunk.rows();
        let chunks = vec![chunk];
        let kind = if small {
            ColumnKind::SmallPack { chunks, rows_used }
        } else {
            ColumnKind::Normal { chunks, rows_used }
        };
        Self { kind }
    }

    pub fn width(&self, box_width: f32) -> f32 {
        match self.kind {
            ColumnKind::Spacer { width } => width,
            _ => box_width,
        }
    }

    pub fn chunks(&self) -> &[DomainChunk<'a>] {
        match &self.kind {
            ColumnKind::Spacer { .. } => &[],
            ColumnKind::Normal { chunks, .. } | ColumnKind::SmallPack { chunks, .. } => chunks,
        }
    }

    pub fn rows_used(&self) -> usize {
        match self.kind {
            ColumnKind::Spacer { .. } => 0,
            ColumnKind::Normal { rows_used, .. } | ColumnKind::SmallPack { rows_used, .. } => {
                rows_used
            }
        }
    }

    fn try_pack_small(&mut self, chunk: DomainChunk<'a>, max_rows: usize) -> Result<(), DomainChunk<'a>> {
        match &mut self.kind {
            ColumnKind::SmallPack { chunks, rows_used } if *rows_used + chunk.rows() <= max_rows => {
                *rows_used += chunk.rows();
                chunks.push(chunk);
                Ok(())
            }
            _ => Err(chunk),
        }
    }
}

/// Sizes of the column segments an oversized domain is split into. The first
/// chunk takes half the components (rounded up, capped at `max_rows`); the
/// rest fill whole columns.
pub fn chunk_sizes(total: usize, max_rows: usize) -> Vec<usize> {
    let max_rows = max_rows.max(1);
    if total == 0 {
        return Vec::new();
    }
    if total <= max_rows {
        return vec![total];
    }
    let first = total.div_ceil(2).min(max_rows);
    let mut sizes = vec![first];
    let mut remaining = total - first;
    while remaining > 0 {
        let size = remaining.min(max_rows);
        sizes.push(size);
        remaining -= size;
    }
    sizes
}

pub fn split_domain_into_chunks<'a>(
    domain_name: &str,
    icon: Option<&str>,
    components: &[&'a ComponentItem],
    max_rows: usize,
) -> Vec<DomainChunk<'a>> {
    let icon_id = icon_symbol_id(icon);
    let mut chunks = Vec::new();
    let mut start = 0;
    for size in chunk_sizes(components.len(), max_rows) {
        chunks.push(DomainChunk {
            domain_name: domain_name.to_string(),
            icon_id: icon_id.clone(),
            components: components[start..start + size].to_vec(),
        });
        start += size;
    }
    chunks
}

/// Assigns domains to typed columns in document order.
pub fn plan_columns<'a>(
    domains: &[&'a Domain],
    spacer_width: f32,
    max_rows: usize,
    small_threshold: usize,
) -> Vec<DomainColumn<'a>> {
    let mut columns: Vec<DomainColumn<'a>> = Vec::new();
    for domain in domains {
        if domain.is_spacer() {
            columns.push(DomainColumn {
                kind: ColumnKind::Spacer {
                    width: spacer_width,
                },
            });
            continue;
        }
        let domain_name = match domain.domain.as_deref() {
            Some(name) => name,
            None => {
                tracing::warn!("domain without a name, labelling it \"Domain\"");
                "Domain"
            }
        };
        let components = domain.component_list();
        let domain_is_small = !components.is_empty() && components.len() <= small_threshold;
        let chunks =
            split_domain_into_chunks(domain_name, domain.icon.as_deref(), &components, max_rows);
        for chunk in chunks {
            let small = domain_is_small && chunk.rows() <= small_threshold;
            let chunk = if small {
                match columns.last_mut() {
                    Some(last) => match last.try_pack_small(chunk, max_rows) {
                        Ok(()) => continue,
                        Err(chunk) => chunk,
                    },
                    None => chunk,
                }
            } else {
                chunk
            };
            columns.push(DomainColumn::new(chunk, small));
        }
    }
    columns
}

/// Bounds and limits for the domain section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainFrame {
    pub start_x: f32,
    pub start_y: f32,
    pub box_width: f32,
    pub spacer_width: f32,
    pub right_limit: f32,
    pub max_rows_per_column: usize,
    pub max_columns_per_row: usize,
}

impl DomainFrame {
    pub fn from_config(config: &LayoutConfig, start_y: f32) -> Self {
        Self {
            start_x: config.domain_start_x,
            start_y,
            box_width: config.box_width(),
            spacer_width: config.spacer_width(),
            right_limit: config.right_limit(),
            max_rows_per_column: config.max_rows_per_column.max(1),
            max_columns_per_row: config.max_domain_columns_per_row.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainLayout {
    pub groups: Vec<DomainGroup>,
    /// Y below the lowest column of the lowest row.
    pub bottom: f32,
    pub columns: usize,
    pub rows: usize,
}

struct HeaderSpan {
    start_x: f32,
    primary: usize,
}

/// Plans columns, places them in wrapping rows and stacks each column's
/// chunks top to bottom. Chunks of one domain that land in the same row share
/// a single header spanning all of them.
pub fn layout_domains(
    domains: &[&Domain],
    frame: &DomainFrame,
    config: &LayoutConfig,
    gradients: &mut Vec<InitiativeGradient>,
) -> DomainLayout {
    let columns = plan_columns(
        domains,
        frame.spacer_width,
        frame.max_rows_per_column,
        config.small_domain_threshold,
    );

    let mut groups: Vec<DomainGroup> = Vec::new();
    let mut header_spans: HashMap<(String, i32), HeaderSpan> = HashMap::new();
    let mut current_x = frame.start_x;
    let mut row_top = frame.start_y;
    let mut row_bottom = row_top;
    let mut columns_in_row = 0;
    let mut rows = usize::from(!columns.is_empty());

    for column in &columns {
        let column_width = column.width(frame.box_width);
        if columns_in_row > 0
            && (columns_in_row >= frame.max_columns_per_row
                || current_x + column_width > frame.right_limit)
        {
            row_top = row_bottom + config.row_gap_y;
            row_bottom = row_top;
            current_x = frame.start_x;
            columns_in_row = 0;
            rows += 1;
        }

        if let ColumnKind::Spacer { width } = column.kind {
            groups.push(spacer_group(current_x, row_top, width, config));
        }

        let mut section_start = row_top;
        let mut column_bottom = row_top;
        for chunk in column.chunks() {
            let group_index = groups.len();
            let label_link = parse_link_field(Some(&chunk.domain_name));
            let label = label_link.text_or_empty();
            let items = chunk
                .components
                .iter()
                .enumerate()
                .map(|(idx, comp)| {
                    let y = section_start + idx as f32 * (config.box_height + config.gap_y);
                    build_render_item(
                        comp,
                        current_x,
                        y,
                        &label,
                        format!("grad_dom_{group_index}_{idx}"),
                        frame.box_width,
                        config,
                        gradients,
                    )
                })
                .collect::<Vec<_>>();

            let header_y = section_start - config.header_offset;
            let mut group = DomainGroup {
                label,
                domain_href: label_link.href,
                icon_id: chunk.icon_id.clone(),
                items,
                header_x: current_x,
                header_y,
                header_text_y: header_y + 15.0,
                header_icon_y: header_y + 3.0,
                header_width: column_width,
                header_text_x: column_width / 2.0,
                show_header: true,
                spacer: false,
            };

            let key = (chunk.domain_name.clone(), row_top as i32);
            if let Some(span) = header_spans.get(&key) {
                let span_width = current_x + column_width - span.start_x;
                group.show_header = false;
                group.header_width = 0.0;
                group.header_text_x = 0.0;
                let primary = &mut groups[span.primary];
                primary.header_width = span_width;
                primary.header_text_x = span_width / 2.0;
            } else {
                header_spans.insert(
                    key,
                    HeaderSpan {
                        start_x: current_x,
                        primary: group_index,
                    },
                );
            }
            groups.push(group);

            if chunk.rows() > 0 {
                let last_y =
                    section_start + (chunk.rows() - 1) as f32 * (config.box_height + config.gap_y);
                let section_bottom = last_y + config.box_height;
                column_bottom = column_bottom.max(section_bottom);
                section_start = section_bottom + config.domain_section_gap;
            }
        }

        row_bottom = row_bottom.max(column_bottom);
        current_x += column_width + config.gap_x;
        columns_in_row += 1;
    }

    tracing::debug!(
        columns = columns.len(),
        rows,
        groups = groups.len(),
        bottom = row_bottom,
        "domain layout complete"
    );

    DomainLayout {
        groups,
        bottom: row_bottom,
        columns: columns.len(),
        rows,
    }
}

fn spacer_group(x: f32, row_top: f32, width: f32, config: &LayoutConfig) -> DomainGroup {
    let header_y = row_top - config.header_offset;
    DomainGroup {
        label: String::new(),
        domain_href: None,
        icon_id: None,
        items: Vec::new(),
        header_x: x,
        header_y,
        header_text_y: header_y + 15.0,
        header_icon_y: header_y + 3.0,
        header_width: width,
        header_text_x: width / 2.0,
        show_header: false,
        spacer: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use crate::model::{Maturity, Status};

    fn domain(name: &str, count: usize) -> Domain {
        let comps = (0..count)
            .map(|i| ComponentItem::new(&format!("{name}-{i}"), "Cap", Status::Low, Maturity::Initial))
            .collect();
        Domain::new(name, comps)
    }

    fn run(domains: &[Domain], config: &LayoutConfig) -> DomainLayout {
        let refs: Vec<&Domain> = domains.iter().collect();
        let frame = DomainFrame::from_config(config, 230.0);
        let mut gradients = Vec::new();
        layout_domains(&refs, &frame, config, &mut gradients)
    }

    #[test]
    fn oversized_domain_splits_into_three_chunks() {
        let max = 8;
        assert_eq!(chunk_sizes(2 * max + 1, max), vec![8, 8, 1]);
        assert_eq!(chunk_sizes(9, 8), vec![5, 4]);
        assert_eq!(chunk_sizes(8, 8), vec![8]);
        assert_eq!(chunk_sizes(0, 8), Vec::<usize>::new());
        assert_eq!(chunk_sizes(7, 3), vec![3, 3, 1]);
        assert_eq!(chunk_sizes(5, 4), vec![3, 2]);
    }

    #[test]
    fn chunks_preserve_component_order() {
        let d = domain("IAM", 9);
        let comps = d.component_list();
        let chunks = split_domain_into_chunks("IAM", Some("key"), &comps, 8);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].components[0].name.as_deref(), Some("IAM-0"));
        assert_eq!(chunks[1].components[0].name.as_deref(), Some("IAM-5"));
        assert_eq!(chunks[1].icon_id.as_deref(), Some("icon-key"));
    }

    #[test]
    fn spacer_domain_yields_headerless_empty_group() {
        let config = LayoutConfig::default();
        let out = run(&[Domain::spacer()], &config);
        assert_eq!(out.groups.len(), 1);
        assert!(out.groups[0].items.is_empty());
        assert!(!out.groups[0].show_header);
        assert!(out.groups[0].spacer);
        assert!((out.groups[0].header_width - config.spacer_width()).abs() < 0.001);
    }

    #[test]
    fn consecutive_small_domains_share_a_column() {
        let config = LayoutConfig {
            max_rows_per_column: 4,
            ..LayoutConfig::default()
        };
        let domains = [domain("A", 2), domain("B", 2)];
        let refs: Vec<&Domain> = domains.iter().collect();
        let columns = plan_columns(&refs, config.spacer_width(), 4, 3);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].rows_used(), 4);

        let out = run(&domains, &config);
        assert_eq!(out.groups.len(), 2);
        assert_eq!(out.groups[0].header_x, out.groups[1].header_x);
        let a_bottom = out.groups[0].items[1].y + config.box_height;
        assert_eq!(out.groups[1].items[0].y, a_bottom + config.domain_section_gap);
        assert_eq!(out.groups[1].header_y, a_bottom + config.domain_section_gap - config.header_offset);
        assert!(out.groups[1].show_header);
    }

    #[test]
    fn small_domains_overflowing_capacity_start_a_new_column() {
        let domains = [domain("A", 3), domain("B", 3), domain("C", 3)];
        let refs: Vec<&Domain> = domains.iter().collect();
        let columns = plan_columns(&refs, 60.0, 8, 3);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].chunks().len(), 2);
        assert_eq!(columns[1].chunks().len(), 1);
    }

    #[test]
    fn large_domain_never_accepts_small_chunks() {
        let domains = [domain("Big", 5), domain("A", 1)];
        let refs: Vec<&Domain> = domains.iter().collect();
        let columns = plan_columns(&refs, 60.0, 8, 3);
        assert_eq!(columns.len(), 2);
        assert!(matches!(columns[0].kind, ColumnKind::Normal { .. }));
        assert!(matches!(columns[1].kind, ColumnKind::SmallPack { .. }));
    }

    #[test]
    fn spacer_breaks_small_packing() {
        let domains = [domain("A", 1), Domain::spacer(), domain("B", 1)];
        let refs: Vec<&Domain> = domains.iter().collect();
        let columns = plan_columns(&refs, 60.0, 8, 3);
        assert_eq!(columns.len(), 3);
        assert!(matches!(columns[1].kind, ColumnKind::Spacer { .. }));
    }

    #[test]
    fn empty_domain_produces_no_column() {
        let config = LayoutConfig::default();
        let out = run(&[domain("Empty", 0), domain("A", 1)], &config);
        assert_eq!(out.columns, 1);
        assert_eq!(out.groups.len(), 1);
        assert_eq!(out.groups[0].label, "A");
    }

    #[test]
    fn split_domain_in_one_row_shares_a_widened_header() {
        let config = LayoutConfig::default();
        let out = run(&[domain("Cloud", 12)], &config);
        assert_eq!(out.groups.len(), 2);
        let first = &out.groups[0];
        let second = &out.groups[1];
        assert!(first.show_header);
        assert!(!second.show_header);
        assert_eq!(second.header_width, 0.0);
        let expected = 2.0 * config.box_width() + config.gap_x;
        assert!((first.header_width - expected).abs() < 0.001);
        assert!((first.header_text_x - expected / 2.0).abs() < 0.001);
        assert_eq!(first.items.len(), 6);
        assert_eq!(second.items.len(), 6);
    }

    #[test]
    fn split_domain_across_rows_keeps_both_headers() {
        let config = LayoutConfig {
            max_domain_columns_per_row: 1,
            ..LayoutConfig::default()
        };
        let out = run(&[domain("Cloud", 12)], &config);
        assert_eq!(out.rows, 2);
        assert!(out.groups.iter().all(|g| g.show_header));
        assert!(out.groups[1].header_y > out.groups[0].items[5].y);
    }

    #[test]
    fn columns_wrap_after_row_capacity() {
        let config = LayoutConfig::default();
        let domains: Vec<Domain> = (0..9).map(|i| domain(&format!("D{i}"), 4)).collect();
        let out = run(&domains, &config);
        assert_eq!(out.rows, 2);
        let eighth = &out.groups[7];
        assert_eq!(eighth.header_x, config.domain_start_x);
        let first_row_bottom = 230.0 + 3.0 * (config.box_height + config.gap_y) + config.box_height;
        assert_eq!(eighth.items[0].y, first_row_bottom + config.row_gap_y);
        let last_y = out.groups[8].items[3].y;
        assert_eq!(out.bottom, last_y + config.box_height);
    }

    #[test]
    fn items_never_overlap() {
        let config = LayoutConfig::default();
        let mut domains = vec![domain("A", 2), domain("B", 1), domain("Huge", 19), Domain::spacer()];
        domains.extend((0..6).map(|i| domain(&format!("M{i}"), 5)));
        let out = run(&domains, &config);
        let rects: Vec<Rect> = out
            .groups
            .iter()
            .flat_map(|g| g.items.iter())
            .map(|item| item.bounds(config.box_width(), config.box_height))
            .collect();
        assert_eq!(rects.len(), 2 + 1 + 19 + 30);
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn no_domains_keeps_start_as_bottom() {
        let config = LayoutConfig::default();
        let out = run(&[], &config);
        assert_eq!(out.rows, 0);
        assert_eq!(out.bottom, 230.0);
    }
}
