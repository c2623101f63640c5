use crate::model::ComponentItem;
use crate::theme::{WHITE, initiative_rag_color};

use super::{GradientStop, InitiativeGradient, Stroke};

/// Badge stroke for a component. Components with initiatives and a RAG
/// sequence get a hard-stop gradient, one equal segment per R/A/G character,
/// registered in `gradients` under `{base_id}_initiative`.
pub fn initiative_stroke(
    comp: &ComponentItem,
    base_id: &str,
    gradients: &mut Vec<InitiativeGradient>,
) -> Stroke {
    if comp.initiatives <= 0 {
        return Stroke::Solid(WHITE.to_string());
    }
    let normalized: Vec<char> = comp
        .initiative_rag
        .as_deref()
        .unwrap_or("")
        .chars()
        .map(|ch| ch.to_ascii_uppercase())
        .filter(|ch| matches!(ch, 'R' | 'A' | 'G'))
        .collect();
    if normalized.is_empty() {
        return Stroke::Solid(WHITE.to_string());
    }

    let id = format!("{base_id}_initiative");
    let len = normalized.len() as f32;
    let mut stops = Vec::with_capacity(normalized.len() * 2);
    for (idx, ch) in normalized.iter().enumerate() {
        let color = initiative_rag_color(*ch);
        stops.push(GradientStop {
            offset: idx as f32 / len * 100.0,
            color: color.to_string(),
        });
        stops.push(GradientStop {
            offset: (idx + 1) as f32 / len * 100.0,
            color: color.to_string(),
        });
    }
    gradients.push(InitiativeGradient {
        id: id.clone(),
        stops,
    });
    Stroke::Gradient(id)
}
