//! Label Records - Typed Snapshots
//!
//! Presets, labels and business info as they cross the engine boundary.
//! The engine never stores these; collaborators pass them in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PresetId = String;

/// A reusable named group of sub-ingredients.
///
/// A preset with no sub-ingredients is a "single" ingredient preset whose
/// own name is the ingredient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngredientPreset {
    pub id: PresetId,
    #[serde(default)]
    pub legacy_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl IngredientPreset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, ingredients: Vec<String>) -> Self {
        Self {
            id: id.into(),
            legacy_id: None,
            name: name.into(),
            brand_name: None,
            ingredients,
            created_at: epoch(),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand_name = Some(brand.into());
        self
    }

    /// Sub-ingredients with surrounding whitespace removed, blanks skipped.
    pub fn sub_ingredients(&self) -> impl Iterator<Item = &str> {
        self.ingredients
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn is_single(&self) -> bool {
        self.sub_ingredients().next().is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CreationMode {
    #[default]
    Manual,
    Preset,
}

/// Business details printed on every label.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfo {
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub business_address: String,
    #[serde(default)]
    pub business_city: String,
    #[serde(default)]
    pub business_state: String,
    #[serde(default)]
    pub business_zip: String,
    #[serde(default)]
    pub business_phone: String,
}

impl BusinessInfo {
    /// Complete when every field but the phone number is filled in.
    pub fn is_complete(&self) -> bool {
        [
            &self.business_name,
            &self.business_address,
            &self.business_city,
            &self.business_state,
            &self.business_zip,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub legacy_id: Option<String>,
    pub name: String,
    /// Canonical ingredient expression.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub creation_mode: CreationMode,
    #[serde(default)]
    pub selected_preset_ids: Vec<PresetId>,
    #[serde(default)]
    pub additional_ingredients_text: String,
    /// Flattened ingredients, for presence checks and search only.
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub net_quantity: Option<String>,
    #[serde(default)]
    pub net_quantity_unit: Option<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub allergen_details: Option<String>,
    #[serde(flatten)]
    pub business: BusinessInfo,
    #[serde(default)]
    pub include_cottage_disclaimer: bool,
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Label {
    /// Allergens trimmed and de-duplicated (case-insensitive), first spelling wins.
    pub fn normalized_allergens(&self) -> Vec<&str> {
        let mut seen: Vec<String> = Vec::new();
        let mut out = Vec::new();
        for allergen in self.allergens.iter().map(|a| a.trim()) {
            if allergen.is_empty() {
                continue;
            }
            let key = allergen.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
                out.push(allergen);
            }
        }
        out
    }
}
