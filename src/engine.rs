//! Label Composition - Single Entry Point
//!
//! compose always validates before rendering. No bypass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregate::{aggregate, select_presets, Aggregation};
use crate::config::EngineConfig;
use crate::expression::split_top_level;
use crate::hashing::fingerprint;
use crate::model::{BusinessInfo, CreationMode, IngredientPreset, Label, PresetId};
use crate::render::{LabelRenderer, RenderedLabel};
use crate::search;
use crate::validation::{ValidationContext, ValidationResult, Validator};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Structured label fields as entered by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRequest {
    /// Set when editing an existing label.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub creation_mode: CreationMode,
    #[serde(default)]
    pub selected_preset_ids: Vec<PresetId>,
    #[serde(default)]
    pub additional_ingredients_text: String,
    /// Ingredient text for manual labels.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub allergen_details: Option<String>,
    #[serde(default)]
    pub net_quantity: Option<String>,
    #[serde(default)]
    pub net_quantity_unit: Option<String>,
    #[serde(default)]
    pub include_cottage_disclaimer: bool,
    /// Original creation time when editing.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedLabel {
    pub label: Label,
    pub rendered: RenderedLabel,
    pub fingerprint: String,
    pub validation: ValidationResult,
}

pub struct LabelEngine {
    config: EngineConfig,
    renderer: LabelRenderer,
    validator: Validator,
}

impl LabelEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            renderer: LabelRenderer::new(&config),
            validator: Validator::new(config.failure_mode.clone()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve selected ids in order and aggregate them with free text.
    pub fn aggregate_selection(
        &self,
        library: &[IngredientPreset],
        selected_ids: &[String],
        additional_text: &str,
    ) -> Result<Aggregation, EngineError> {
        let selection = select_presets(library, selected_ids);
        if let Some(missing) = selection.missing.first() {
            return Err(EngineError::PresetNotFound(missing.clone()));
        }
        Ok(aggregate(selection.presets, additional_text))
    }

    pub fn search<'a>(&self, library: &'a [IngredientPreset], query: &str) -> Vec<&'a IngredientPreset> {
        search::filter_presets(library, query)
    }

    pub fn validate(&self, label: &Label, aggregation: Option<&Aggregation>) -> ValidationResult {
        self.validator.validate(label, &ValidationContext { aggregation })
    }

    pub fn render(&self, label: &Label) -> Result<(RenderedLabel, String), EngineError> {
        let rendered = self.renderer.render(label);
        let digest = fingerprint(&rendered)?;
        Ok((rendered, digest))
    }

    /// Build, validate and render a label from user input.
    ///
    /// Business info is copied into the label; later edits to it do not
    /// reach labels composed earlier.
    pub fn compose(
        &self,
        request: &LabelRequest,
        library: &[IngredientPreset],
        business: &BusinessInfo,
    ) -> Result<ComposedLabel, EngineError> {
        let now = Utc::now();

        let (text, ingredients, selected_preset_ids, aggregation) = match request.creation_mode {
            CreationMode::Preset => {
                let agg = self.aggregate_selection(
                    library,
                    &request.selected_preset_ids,
                    &request.additional_ingredients_text,
                )?;
                (
                    agg.canonical_expression.clone(),
                    agg.flat_list.clone(),
                    request.selected_preset_ids.clone(),
                    Some(agg),
                )
            }
            CreationMode::Manual => (
                request.text.clone(),
                split_top_level(&request.text),
                Vec::new(),
                None,
            ),
        };

        let label = Label {
            id: request.id.clone().unwrap_or_default(),
            legacy_id: None,
            name: request.name.trim().to_string(),
            text,
            creation_mode: request.creation_mode,
            selected_preset_ids,
            additional_ingredients_text: request.additional_ingredients_text.clone(),
            ingredients,
            net_quantity: request.net_quantity.clone(),
            net_quantity_unit: request.net_quantity_unit.clone(),
            allergens: request.allergens.clone(),
            allergen_details: request.allergen_details.clone(),
            business: business.clone(),
            include_cottage_disclaimer: request.include_cottage_disclaimer,
            created_at: request.created_at.unwrap_or(now),
            updated_at: request.created_at.map(|_| now),
        };

        // MANDATORY: validation runs before anything is rendered.
        let validation = self.validate(&label, aggregation.as_ref());
        if !validation.valid {
            tracing::debug!(label = %label.name, violations = %validation.summary(), "label rejected");
            return Err(EngineError::ValidationFailed(validation.summary()));
        }

        let (rendered, digest) = self.render(&label)?;
        tracing::debug!(
            label = %label.name,
            mode = ?label.creation_mode,
            ingredients = label.ingredients.len(),
            fingerprint = %digest,
            "label composed"
        );

        Ok(ComposedLabel {
            label,
            rendered,
            fingerprint: digest,
            validation,
        })
    }
}

impl Default for LabelEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_selection_unknown_id() {
        let engine = LabelEngine::default();
        let library = vec![IngredientPreset::new("p1", "Eggs", vec![])];
        let err = engine
            .aggregate_selection(&library, &["nope".to_string()], "")
            .unwrap_err();
        assert!(matches!(err, EngineError::PresetNotFound(id) if id == "nope"));
    }

    #[test]
    fn test_manual_compose_drops_selection() {
        let engine = LabelEngine::new(EngineConfig {
            failure_mode: crate::config::FailureMode::Warn,
            ..Default::default()
        });
        let request = LabelRequest {
            name: "Jam".into(),
            text: "Strawberries, Sugar (cane), Pectin".into(),
            selected_preset_ids: vec!["p1".into()],
            ..Default::default()
        };
        let composed = engine.compose(&request, &[], &BusinessInfo::default()).unwrap();
        assert!(composed.label.selected_preset_ids.is_empty());
        assert_eq!(composed.label.ingredients, vec!["Strawberries", "Sugar (cane)", "Pectin"]);
        assert!(composed.label.updated_at.is_none());
    }
}
