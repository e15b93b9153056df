//! Type Scale
//!
//! Two tiers only. Product name and net quantity print large; everything
//! else prints small, at or above the regulatory minimum type height.

use serde::{Deserialize, Serialize};

/// Smallest lowercase-o height allowed on a principal display panel, in points (1/16 inch).
pub const REGULATORY_MIN_PT: f32 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTier {
    Large,
    Small,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeScale {
    #[serde(default = "default_large_pt")]
    pub large_pt: f32,
    #[serde(default = "default_small_pt")]
    pub small_pt: f32,
}

fn default_large_pt() -> f32 { 14.0 }
fn default_small_pt() -> f32 { 8.0 }

impl Default for TypeScale {
    fn default() -> Self {
        Self {
            large_pt: default_large_pt(),
            small_pt: default_small_pt(),
        }
    }
}

impl TypeScale {
    /// Build a scale, raising either tier to the regulatory minimum if needed.
    pub fn new(large_pt: f32, small_pt: f32) -> Self {
        let small_pt = small_pt.max(REGULATORY_MIN_PT);
        Self {
            large_pt: large_pt.max(small_pt),
            small_pt,
        }
    }

    pub fn size_of(&self, tier: TypeTier) -> f32 {
        match tier {
            TypeTier::Large => self.large_pt.max(self.small_pt_clamped()),
            TypeTier::Small => self.small_pt_clamped(),
        }
    }

    fn small_pt_clamped(&self) -> f32 {
        self.small_pt.max(REGULATORY_MIN_PT)
    }

    /// Inline CSS for a tier, e.g. `font-size: 8pt`.
    pub fn css(&self, tier: TypeTier) -> String {
        format!("font-size: {}pt", self.size_of(tier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let scale = TypeScale::default();
        assert_eq!(scale.css(TypeTier::Large), "font-size: 14pt");
        assert_eq!(scale.css(TypeTier::Small), "font-size: 8pt");
    }

    #[test]
    fn test_small_tier_never_below_minimum() {
        let scale = TypeScale::new(3.0, 2.0);
        assert_eq!(scale.size_of(TypeTier::Small), REGULATORY_MIN_PT);
        assert!(scale.size_of(TypeTier::Large) >= scale.size_of(TypeTier::Small));

        // Deserialized values bypass `new`; clamping still applies on use.
        let raw = TypeScale { large_pt: 12.0, small_pt: 1.0 };
        assert_eq!(raw.size_of(TypeTier::Small), REGULATORY_MIN_PT);
    }
}
