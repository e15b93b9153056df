//! Preset Search
//!
//! One predicate shared by the ingredient library view and the preset
//! picker in label creation.

use crate::model::IngredientPreset;

/// Case-insensitive substring match against name, brand and sub-ingredients.
/// A blank query matches everything.
pub fn matches(preset: &IngredientPreset, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    contains(preset.name.as_str())
        || preset.brand_name.as_deref().is_some_and(contains)
        || preset.ingredients.iter().any(|i| contains(i.as_str()))
}

pub fn filter_presets<'a>(presets: &'a [IngredientPreset], query: &str) -> Vec<&'a IngredientPreset> {
    presets.iter().filter(|p| matches(p, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spices() -> IngredientPreset {
        IngredientPreset::new("p1", "Spices", vec!["Cinnamon".into()]).with_brand("McCormick")
    }

    #[test]
    fn test_matches_ingredient_case_insensitive() {
        assert!(matches(&spices(), "cinn"));
        assert!(matches(&spices(), "SPI"));
        assert!(matches(&spices(), "mccor"));
        assert!(!matches(&spices(), "nutmeg"));
    }

    #[test]
    fn test_blank_query_matches_all() {
        assert!(matches(&spices(), ""));
        assert!(matches(&spices(), "   "));
        assert!(matches(&IngredientPreset::new("p2", "", vec![]), ""));
    }

    #[test]
    fn test_filter_keeps_library_order() {
        let library = vec![
            IngredientPreset::new("a", "Sugar", vec![]),
            spices(),
            IngredientPreset::new("b", "Brown Sugar", vec!["Molasses".into()]),
        ];
        let names: Vec<_> = filter_presets(&library, "sugar").iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Sugar", "Brown Sugar"]);
        assert_eq!(filter_presets(&library, "").len(), 3);
    }
}
