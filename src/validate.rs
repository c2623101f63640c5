use crate::model::{ComponentItem, Esa};

/// Malformed or incomplete dashboard model. Always raised before any geometry
/// is computed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

const NULL_ROOT: &str = "ESA root object cannot be null";

/// Unwraps a decoded document, rejecting a JSON `null` root.
pub fn require_root(root: Option<Esa>) -> Result<Esa, ValidationError> {
    root.ok_or_else(|| ValidationError::new(NULL_ROOT))
}

/// Walks governance, then each capability domain, in document order and
/// reports the first violation.
pub fn validate_esa(root: Option<&Esa>) -> Result<(), ValidationError> {
    let Some(root) = root else {
        return Err(ValidationError::new(NULL_ROOT));
    };

    if let Some(components) = root
        .governance
        .as_ref()
        .and_then(|gov| gov.components.as_ref())
    {
        for (idx, comp) in components.iter().enumerate() {
            validate_component(comp.as_ref(), "governance", idx)?;
        }
    }

    if let Some(domains) = root
        .capabilities
        .as_ref()
        .and_then(|caps| caps.domains.as_ref())
    {
        for (domain_idx, domain) in domains.iter().enumerate() {
            let Some(domain) = domain else {
                return Err(ValidationError::new(format!(
                    "Domain at index {domain_idx} cannot be null"
                )));
            };
            let Some(components) = domain.components.as_ref() else {
                continue;
            };
            if domain.is_spacer() && !components.is_empty() {
                return Err(ValidationError::new(format!(
                    "Domain at index {domain_idx} is a SPACE spacer and cannot hold components"
                )));
            }
            let section = format!("capabilities.domains[{domain_idx}]");
            for (idx, comp) in components.iter().enumerate() {
                validate_component(comp.as_ref(), &section, idx)?;
            }
        }
    }

    Ok(())
}

fn validate_component(
    comp: Option<&ComponentItem>,
    section: &str,
    index: usize,
) -> Result<(), ValidationError> {
    let location = format!("{section}[{index}]");
    let Some(comp) = comp else {
        return Err(ValidationError::new(format!(
            "Component at {location} cannot be null"
        )));
    };
    if comp.status.is_none() {
        return Err(ValidationError::new(format!(
            "Component at {location} missing required field: status. \
             Must be one of: NOT_EXISTING, LOW, MEDIUM, HIGH, EFFECTIVE"
        )));
    }
    if comp.maturity.is_none() {
        return Err(ValidationError::new(format!(
            "Component at {location} missing required field: maturity. \
             Must be one of: NOT_EXISTING, INITIAL, REPEATABLE, DEFINED, MANAGED, OPTIMISED"
        )));
    }
    let blank_name = comp
        .name
        .as_deref()
        .map(|name| name.trim().is_empty())
        .unwrap_or(true);
    if blank_name {
        return Err(ValidationError::new(format!(
            "Component at {location} missing required field: name"
        )));
    }
    if comp.initiatives < 0 {
        return Err(ValidationError::new(format!(
            "Component at {location} has invalid initiatives count: {} (must be >= 0)",
            comp.initiatives
        )));
    }
    Ok(())
}
