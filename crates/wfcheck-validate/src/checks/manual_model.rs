//! Manual model: a pinned model must be one of the farm's methods.

use crate::finding::FindingKind;

pub fn check(raw: Option<&str>, method_ids: &[String]) -> FindingKind {
    let model = match raw {
        Some(model) if !model.trim().is_empty() => model,
        _ => return FindingKind::ManualModelEmpty,
    };
    if method_ids.iter().any(|id| id == model) {
        FindingKind::ManualModelOk {
            model: model.to_string(),
        }
    } else {
        FindingKind::ManualModelUnknown {
            model: model.to_string(),
        }
    }
}
