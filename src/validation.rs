//! Label Validation - Rule/Policy Separation
//!
//! Rendering never fails, so "is this enough to build a label" is decided
//! here, before rendering or persistence.
//! Rules produce structured violations. Policy maps violations to actions.

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregation;
use crate::config::FailureMode;
use crate::model::{CreationMode, Label};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    pub remediation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == ViolationSeverity::Error)
    }

    /// `rule: message` pairs joined with `; `.
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(|v| format!("{}: {}", v.rule, v.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// What a rule may need beyond the label itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Aggregator output for the label's current preset selection.
    pub aggregation: Option<&'a Aggregation>,
}

pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, label: &Label, ctx: &ValidationContext<'_>) -> Vec<ValidationViolation>;
}

fn violation(
    rule: &dyn ValidationRule,
    severity: ViolationSeverity,
    message: &str,
    remediation: &str,
) -> ValidationViolation {
    ValidationViolation {
        rule: rule.name().to_string(),
        severity,
        message: message.to_string(),
        remediation: vec![remediation.to_string()],
    }
}

// --- Concrete Rules ---

pub struct ProductNameRule;

impl ValidationRule for ProductNameRule {
    fn name(&self) -> &'static str { "product_name" }

    fn validate(&self, label: &Label, _ctx: &ValidationContext<'_>) -> Vec<ValidationViolation> {
        if label.name.trim().is_empty() {
            vec![violation(self, ViolationSeverity::Error, "Product name is required", "Enter the product name")]
        } else {
            vec![]
        }
    }
}

pub struct IngredientPresenceRule;

impl ValidationRule for IngredientPresenceRule {
    fn name(&self) -> &'static str { "ingredients" }

    fn validate(&self, label: &Label, _ctx: &ValidationContext<'_>) -> Vec<ValidationViolation> {
        if label.ingredients.iter().all(|i| i.trim().is_empty()) {
            vec![violation(
                self,
                ViolationSeverity::Error,
                "At least one ingredient is required",
                "Select a preset or add ingredients",
            )]
        } else {
            vec![]
        }
    }
}

/// Mode-specific shape: manual labels carry no preset selection, preset
/// labels carry exactly the aggregator's expression.
///
/// The preset check needs `ValidationContext::aggregation`; without it the
/// expression cannot be verified and a warning is reported instead.
pub struct CreationModeRule;

impl ValidationRule for CreationModeRule {
    fn name(&self) -> &'static str { "creation_mode" }

    fn validate(&self, label: &Label, ctx: &ValidationContext<'_>) -> Vec<ValidationViolation> {
        match label.creation_mode {
            CreationMode::Manual if !label.selected_preset_ids.is_empty() => vec![violation(
                self,
                ViolationSeverity::Error,
                "Manual labels cannot select presets",
                "Clear the preset selection or switch to preset mode",
            )],
            CreationMode::Preset => match ctx.aggregation {
                Some(agg) if agg.canonical_expression != label.text => vec![violation(
                    self,
                    ViolationSeverity::Error,
                    "Ingredient text is out of date with the selected presets",
                    "Re-aggregate the selected presets",
                )],
                Some(_) => vec![],
                None => vec![violation(
                    self,
                    ViolationSeverity::Warning,
                    "Ingredient text was not checked against the selected presets",
                    "Validate with the aggregation of the current selection",
                )],
            },
            CreationMode::Manual => vec![],
        }
    }
}

pub struct BusinessInfoRule;

impl ValidationRule for BusinessInfoRule {
    fn name(&self) -> &'static str { "business_info" }

    fn validate(&self, label: &Label, _ctx: &ValidationContext<'_>) -> Vec<ValidationViolation> {
        if label.business.is_complete() {
            vec![]
        } else {
            vec![violation(
                self,
                ViolationSeverity::Warning,
                "Business name and address are incomplete",
                "Fill in business name, address, city, state and zip",
            )]
        }
    }
}

/// Validator orchestrates rules and applies policy
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
    failure_mode: FailureMode,
}

impl Validator {
    pub fn new(failure_mode: FailureMode) -> Self {
        Self {
            rules: vec![
                Box::new(ProductNameRule),
                Box::new(IngredientPresenceRule),
                Box::new(CreationModeRule),
                Box::new(BusinessInfoRule),
            ],
            failure_mode,
        }
    }

    pub fn validate(&self, label: &Label, ctx: &ValidationContext<'_>) -> ValidationResult {
        let violations: Vec<_> = self
            .rules
            .iter()
            .flat_map(|rule| rule.validate(label, ctx))
            .collect();

        let has_errors = violations.iter().any(|v| v.severity == ViolationSeverity::Error);

        match self.failure_mode {
            FailureMode::Block => ValidationResult {
                valid: !has_errors,
                violations,
            },
            // Never block, just record
            FailureMode::Warn => ValidationResult {
                valid: true,
                violations,
            },
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(FailureMode::Block)
    }
}
