use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Domain name reserved for blank spacer columns.
pub const SPACER_DOMAIN: &str = "SPACE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    NotExisting,
    Low,
    Medium,
    High,
    Effective,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::NotExisting,
        Status::Low,
        Status::Medium,
        Status::High,
        Status::Effective,
    ];

    pub const fn hex(self) -> &'static str {
        match self {
            Status::NotExisting => "#908782",
            Status::Low => "#d6761f",
            Status::Medium => "#dfd005",
            Status::High => "#80aa2e",
            Status::Effective => "#0e8a39",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Status::NotExisting => "Not Existing",
            Status::Low => "Low",
            Status::Medium => "Medium",
            Status::High => "High",
            Status::Effective => "Effective",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Maturity {
    NotExisting,
    Initial,
    Repeatable,
    Defined,
    Managed,
    #[serde(alias = "OPTIMIZED")]
    Optimised,
}

impl Maturity {
    pub const ALL: [Maturity; 6] = [
        Maturity::NotExisting,
        Maturity::Initial,
        Maturity::Repeatable,
        Maturity::Defined,
        Maturity::Managed,
        Maturity::Optimised,
    ];

    pub const fn hex(self) -> &'static str {
        match self {
            Maturity::NotExisting => "#908782",
            Maturity::Initial => "#d6761f",
            Maturity::Repeatable => "#d59704",
            Maturity::Defined => "#dfd005",
            Maturity::Managed => "#80aa2e",
            Maturity::Optimised => "#0e8a39",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Maturity::NotExisting => "Not Existing",
            Maturity::Initial => "Initial",
            Maturity::Repeatable => "Repeatable",
            Maturity::Defined => "Defined",
            Maturity::Managed => "Managed",
            Maturity::Optimised => "Optimised",
        }
    }
}

/// One initiative tracked against a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentInitiative {
    pub key: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    #[serde(alias = "business_benefit")]
    pub business_benefit: Option<String>,
    #[serde(alias = "risk_appetite")]
    pub risk_appetite: Option<String>,
    #[serde(alias = "tool_id", alias = "pmToolId")]
    pub tool_id: Option<String>,
    #[serde(alias = "due_date")]
    pub due_date: Option<String>,
    pub rag: Option<String>,
    #[serde(alias = "issue_type")]
    pub issue_type: Option<String>,
}

/// A rated capability. `status`, `maturity` and `name` are optional here so
/// that missing values surface as validation errors with a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub capability: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub maturity: Option<Maturity>,
    #[serde(default)]
    pub rag: Option<String>,
    #[serde(default, rename = "iRag", alias = "irag", alias = "i_rag")]
    pub initiative_rag: Option<String>,
    #[serde(default)]
    pub initiatives: i64,
    #[serde(default)]
    pub double_border: bool,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, alias = "initiative_details")]
    pub initiative_details: Vec<Option<ComponentInitiative>>,
}

impl ComponentItem {
    pub fn new(name: &str, capability: &str, status: Status, maturity: Maturity) -> Self {
        Self {
            name: Some(name.to_string()),
            capability: Some(capability.to_string()),
            status: Some(status),
            maturity: Some(maturity),
            ..Self::default()
        }
    }

    pub fn with_initiatives(mut self, count: i64, rag: &str) -> Self {
        self.initiatives = count;
        self.initiative_rag = Some(rag.to_string());
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(default, alias = "name")]
    pub domain: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub components: Option<Vec<Option<ComponentItem>>>,
}

impl Domain {
    pub fn new(name: &str, components: Vec<ComponentItem>) -> Self {
        Self {
            domain: Some(name.to_string()),
            icon: None,
            components: Some(components.into_iter().map(Some).collect()),
        }
    }

    pub fn spacer() -> Self {
        Self {
            domain: Some(SPACER_DOMAIN.to_string()),
            icon: None,
            components: Some(Vec::new()),
        }
    }

    pub fn is_spacer(&self) -> bool {
        self.domain
            .as_deref()
            .map(|name| name.eq_ignore_ascii_case(SPACER_DOMAIN))
            .unwrap_or(false)
    }

    /// Components after validation has ruled out null entries.
    pub fn component_list(&self) -> Vec<&ComponentItem> {
        self.components
            .iter()
            .flatten()
            .filter_map(|comp| comp.as_ref())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Governance {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub components: Option<Vec<Option<ComponentItem>>>,
}

impl Governance {
    pub fn component_list(&self) -> Vec<&ComponentItem> {
        self.components
            .iter()
            .flatten()
            .filter_map(|comp| comp.as_ref())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub domains: Option<Vec<Option<Domain>>>,
}

/// Root of a dashboard payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Esa {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub attributes: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub governance: Option<Governance>,
    #[serde(default)]
    pub capabilities: Option<Capabilities>,
}

impl Esa {
    pub fn total_components(&self) -> usize {
        let governance = self
            .governance
            .as_ref()
            .map(|gov| gov.component_list().len())
            .unwrap_or(0);
        let domains = self
            .capabilities
            .as_ref()
            .and_then(|caps| caps.domains.as_ref())
            .map(|domains| {
                domains
                    .iter()
                    .flatten()
                    .map(|domain| domain.component_list().len())
                    .sum::<usize>()
            })
            .unwrap_or(0);
        governance + domains
    }
}

/// Decodes a dashboard payload. A JSON `null` document yields `None`, which
/// `validate_esa` rejects.
pub fn parse_esa(input: &str) -> Result<Option<Esa>, serde_json::Error> {
    serde_json::from_str(input)
}

/// Symbol id for an icon key; blank keys carry no icon.
pub fn icon_symbol_id(icon: Option<&str>) -> Option<String> {
    icon.map(str::trim)
        .filter(|key| !key.is_empty())
        .map(|key| format!("icon-{key}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_enum_names_and_aliases() {
        let json = r#"{
            "title": "AppSec",
            "governance": {"title": "Gov", "components": [
                {"name": "SAST", "capability": "Static", "status": "HIGH", "maturity": "MANAGED",
                 "initiatives": 2, "iRag": "GA", "doubleBorder": true, "rag": "red"}
            ]},
            "capabilities": {"title": "Caps", "domains": [
                {"domain": "Testing", "components": [
                    {"name": "DAST", "status": "LOW", "maturity": "OPTIMIZED"}
                ]},
                {"domain": "SPACE", "components": []}
            ]}
        }"#;
        let esa = parse_esa(json).unwrap().unwrap();
        let gov = esa.governance.as_ref().unwrap().component_list();
        assert_eq!(gov[0].status, Some(Status::High));
        assert_eq!(gov[0].initiative_rag.as_deref(), Some("GA"));
        assert!(gov[0].double_border);
        let domains = esa.capabilities.as_ref().unwrap().domains.as_ref().unwrap();
        let first = domains[0].as_ref().unwrap();
        assert_eq!(first.component_list()[0].maturity, Some(Maturity::Optimised));
        assert!(domains[1].as_ref().unwrap().is_spacer());
        assert_eq!(esa.total_components(), 2);
    }

    #[test]
    fn enum_names_are_case_sensitive() {
        let json = r#"{"governance": {"components": [{"name": "x", "status": "high", "maturity": "MANAGED"}]}}"#;
        assert!(parse_esa(json).is_err());
    }

    #[test]
    fn null_document_parses_to_none() {
        assert_eq!(parse_esa("null").unwrap(), None);
    }

    #[test]
    fn spacer_detection_ignores_case() {
        let mut domain = Domain::spacer();
        domain.domain = Some("space".to_string());
        assert!(domain.is_spacer());
        assert!(!Domain::new("Spaced out", Vec::new()).is_spacer());
    }

    #[test]
    fn icon_symbol_ids_skip_blank_keys() {
        assert_eq!(icon_symbol_id(Some(" shield ")).as_deref(), Some("icon-shield"));
        assert_eq!(icon_symbol_id(Some("  ")), None);
        assert_eq!(icon_symbol_id(None), None);
    }
}
