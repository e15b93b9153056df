//! LabelCraft Core - Label Content Formatting Engine
//!
//! # Ground Rules
//! 1. Every operation is total: malformed input is formatted, never rejected
//! 2. Selection order is output order
//! 3. Rich markup is the only pre-escaped representation
//! 4. Labels snapshot business info, they do not reference it
//! 5. Validation belongs to the caller, and compose always runs it

pub mod model;
pub mod identifier;
pub mod expression;
pub mod aggregate;
pub mod search;
pub mod typography;
pub mod render;
pub mod validation;
pub mod hashing;
pub mod config;
pub mod engine;

pub use model::{BusinessInfo, CreationMode, IngredientPreset, Label};
pub use identifier::{resolve_lookup, find_by_id, Addressable, LookupKey};
pub use expression::split_top_level;
pub use aggregate::{aggregate, select_presets, Aggregation};
pub use search::{matches, filter_presets};
pub use render::{render, bold_preset_names, LabelRenderer, RenderedLabel};
pub use validation::{ValidationResult, ValidationRule, ValidationViolation, ViolationSeverity};
pub use hashing::{canonical_json, fingerprint};
pub use config::{EngineConfig, ConfigError, FailureMode};
pub use engine::{LabelEngine, LabelRequest, ComposedLabel, EngineError};
