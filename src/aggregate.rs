//! Ingredient Aggregation
//!
//! Selected presets plus free-text additions become one canonical
//! expression. Order is selection order, then free-text order. No sorting.

use serde::{Deserialize, Serialize};

use crate::expression::split_free_text;
use crate::identifier::find_by_id;
use crate::model::IngredientPreset;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    /// Preset structure removed. Empty means the caller has nothing to label.
    pub flat_list: Vec<String>,
    pub canonical_expression: String,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.flat_list.is_empty()
    }
}

/// Combine presets (in selection order) with free-text ingredients.
pub fn aggregate<'a, I>(selected_presets: I, additional_text: &str) -> Aggregation
where
    I: IntoIterator<Item = &'a IngredientPreset>,
{
    let mut parts: Vec<String> = Vec::new();
    let mut flat_list: Vec<String> = Vec::new();

    for preset in selected_presets {
        let name = preset.name.trim();
        let subs: Vec<&str> = preset.sub_ingredients().collect();

        if subs.is_empty() {
            // Single-ingredient preset: the name is the ingredient.
            parts.push(name.to_string());
            flat_list.push(name.to_string());
        } else {
            parts.push(format!("{} ({})", name, subs.join(", ")));
            flat_list.extend(subs.into_iter().map(String::from));
        }
    }

    for token in split_free_text(additional_text) {
        parts.push(token.clone());
        flat_list.push(token);
    }

    Aggregation {
        flat_list,
        canonical_expression: parts.join(", "),
    }
}

/// Selected presets resolved in selection order.
#[derive(Debug, Default)]
pub struct Selection<'a> {
    pub presets: Vec<&'a IngredientPreset>,
    /// Ids that matched no preset under either id scheme.
    pub missing: Vec<String>,
}

pub fn select_presets<'a>(library: &'a [IngredientPreset], selected_ids: &[String]) -> Selection<'a> {
    let mut selection = Selection::default();
    for id in selected_ids {
        match find_by_id(library, id) {
            Some(preset) => selection.presets.push(preset),
            None => {
                tracing::warn!(preset_id = %id, "selected preset not found");
                selection.missing.push(id.clone());
            }
        }
    }
    selection
}
