use chrono::NaiveDate;
use serde::Serialize;

use crate::links::parse_link_field;
use crate::model::{ComponentInitiative, ComponentItem, Esa};
use crate::theme::{GRAY, LIGHT_GRAY, rag_color};
use crate::validate::{ValidationError, validate_esa};

const INPUT_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%b-%y"];
const OUTPUT_DATE_FORMAT: &str = "%d/%b/%y";

/// One initiative flattened out of the component tree, ready for tabular
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeRow {
    /// Governance title or domain name the component sits under.
    pub section: String,
    pub component: String,
    pub component_capability: String,
    pub key: String,
    pub key_href: Option<String>,
    pub anchor_id: Option<String>,
    pub rag: String,
    pub rag_color: String,
    pub summary: String,
    pub business_benefit: String,
    pub risk_appetite: String,
    pub tool_id: String,
    pub due_date: String,
    pub status_color: String,
    pub maturity_color: String,
}

/// Validates `esa` and lists every initiative in document order, governance
/// first.
pub fn collect_initiatives(esa: &Esa) -> Result<Vec<InitiativeRow>, ValidationError> {
    validate_esa(Some(esa))?;
    let mut rows = Vec::new();

    if let Some(governance) = esa.governance.as_ref() {
        let section = label_or(governance.title.as_deref(), "Governance");
        for comp in governance.component_list() {
            push_component_rows(&mut rows, &section, comp);
        }
    }

    let domains = esa
        .capabilities
        .as_ref()
        .and_then(|caps| caps.domains.as_ref());
    for domain in domains.into_iter().flatten().flatten() {
        let components = domain.component_list();
        if components.is_empty() {
            continue;
        }
        let section = label_or(domain.domain.as_deref(), "Capability");
        for comp in components {
            push_component_rows(&mut rows, &section, comp);
        }
    }

    tracing::debug!(rows = rows.len(), "initiatives collected");
    Ok(rows)
}

fn push_component_rows(rows: &mut Vec<InitiativeRow>, section: &str, comp: &ComponentItem) {
    let component = match non_blank(comp.name.as_deref()) {
        Some(_) => label_or(comp.name.as_deref(), "Component"),
        None => label_or(comp.capability.as_deref(), "Component"),
    };
    let component_capability = label_or(comp.capability.as_deref(), "Capability");
    let status_color = comp.status.map(|s| s.hex()).unwrap_or(GRAY);
    let maturity_color = comp.maturity.map(|m| m.hex()).unwrap_or(LIGHT_GRAY);

    for initiative in comp.initiative_details.iter().flatten() {
        rows.push(build_row(
            section,
            &component,
            &component_capability,
            initiative,
            status_color,
            maturity_color,
        ));
    }
}

fn build_row(
    section: &str,
    component: &str,
    component_capability: &str,
    initiative: &ComponentInitiative,
    status_color: &str,
    maturity_color: &str,
) -> InitiativeRow {
    let key = non_blank(initiative.key.as_deref()).unwrap_or("TBC").to_string();
    let rag = non_blank(initiative.rag.as_deref()).unwrap_or("");
    let text = |value: &Option<String>| non_blank(value.as_deref()).unwrap_or("").to_string();

    InitiativeRow {
        section: section.to_string(),
        component: component.to_string(),
        component_capability: component_capability.to_string(),
        anchor_id: anchor_id(&key),
        key,
        key_href: non_blank(initiative.link.as_deref()).map(str::to_string),
        rag: rag.to_uppercase(),
        rag_color: rag_color(Some(rag)).to_string(),
        summary: text(&initiative.summary),
        business_benefit: text(&initiative.business_benefit),
        risk_appetite: text(&initiative.risk_appetite),
        tool_id: non_blank(initiative.tool_id.as_deref())
            .unwrap_or("In-Demand")
            .to_string(),
        due_date: format_due_date(initiative.due_date.as_deref()),
        status_color: status_color.to_string(),
        maturity_color: maturity_color.to_string(),
    }
}

/// Stable fragment id for an initiative key: `initiative-` followed by the
/// lower-cased key with anything outside `[a-z0-9_-]` replaced by `-`.
pub fn anchor_id(key: &str) -> Option<String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut id = String::from("initiative-");
    id.extend(trimmed.chars().map(|ch| match ch {
        'a'..='z' | '0'..='9' | '-' | '_' => ch,
        'A'..='Z' => ch.to_ascii_lowercase(),
        _ => '-',
    }));
    Some(id)
}

/// Normalizes a due date to `dd/Mon/yy`. Unrecognized input is returned
/// trimmed.
pub fn format_due_date(raw: Option<&str>) -> String {
    let Some(trimmed) = non_blank(raw) else {
        return String::new();
    };
    INPUT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| date.format(OUTPUT_DATE_FORMAT).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn label_or(value: Option<&str>, fallback: &str) -> String {
    parse_link_field(non_blank(value))
        .text
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Capabilities, Domain, Governance, Maturity, Status};

    fn initiative(key: Option<&str>, rag: &str, due: &str) -> ComponentInitiative {
        ComponentInitiative {
            key: key.map(str::to_string),
            link: Some("https://tracker.example/SEC-1".to_string()),
            summary: Some(" Roll out ".to_string()),
            rag: Some(rag.to_string()),
            due_date: Some(due.to_string()),
            ..ComponentInitiative::default()
        }
    }

    fn sample() -> Esa {
        let mut sast = ComponentItem::new("SAST", "Static", Status::High, Maturity::Managed);
        sast.initiative_details = vec![
            Some(initiative(Some("SEC-1"), "green", "2025-03-07")),
            None,
            Some(initiative(None, "Amber", "31/12/2024")),
        ];
        let mut waf = ComponentItem::new("WAF[https://waf.example]", "Edge", Status::Low, Maturity::Initial);
        waf.initiative_details = vec![Some(initiative(Some("Net Ops/42"), "red", "soon"))];
        Esa {
            governance: Some(Governance {
                title: None,
                components: Some(vec![Some(sast)]),
            }),
            capabilities: Some(Capabilities {
                domains: Some(vec![Some(Domain::new("Runtime", vec![waf]))]),
                ..Capabilities::default()
            }),
            ..Esa::default()
        }
    }

    #[test]
    fn flattens_in_document_order_with_defaults() {
        let rows = collect_initiatives(&sample()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].section, "Governance");
        assert_eq!(rows[0].key, "SEC-1");
        assert_eq!(rows[0].anchor_id.as_deref(), Some("initiative-sec-1"));
        assert_eq!(rows[0].rag, "GREEN");
        assert_eq!(rows[0].summary, "Roll out");
        assert_eq!(rows[0].tool_id, "In-Demand");
        assert_eq!(rows[0].status_color, Status::High.hex());
        assert_eq!(rows[1].key, "TBC");
        assert_eq!(rows[2].section, "Runtime");
        assert_eq!(rows[2].component, "WAF");
        assert_eq!(rows[2].anchor_id.as_deref(), Some("initiative-net-ops-42"));
    }

    #[test]
    fn due_dates_are_normalized_when_recognized() {
        assert_eq!(format_due_date(Some("2025-03-07")), "07/Mar/25");
        assert_eq!(format_due_date(Some("31/12/2024")), "31/Dec/24");
        assert_eq!(format_due_date(Some("1/2/2024")), "01/Feb/24");
        assert_eq!(format_due_date(Some(" 05-Jun-24 ")), "05/Jun/24");
        assert_eq!(format_due_date(Some(" soon ")), "soon");
        assert_eq!(format_due_date(None), "");
    }

    #[test]
    fn rag_color_uses_named_table() {
        let rows = collect_initiatives(&sample()).unwrap();
        assert_eq!(rows[0].rag_color, crate::theme::RAG_GREEN);
        assert_eq!(rows[1].rag_color, crate::theme::RAG_AMBER);
        assert_eq!(rows[2].rag_color, crate::theme::RAG_RED);
    }

    #[test]
    fn invalid_model_is_rejected() {
        let mut esa = sample();
        if let Some(gov) = esa.governance.as_mut() {
            gov.components = Some(vec![None]);
        }
        assert!(collect_initiatives(&esa).is_err());
    }

    #[test]
    fn blank_key_has_no_anchor() {
        assert_eq!(anchor_id("  "), None);
        assert_eq!(anchor_id("A_b c"), Some("initiative-a_b-c".to_string()));
    }
}
