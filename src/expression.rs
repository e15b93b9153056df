//! Ingredient Expression Parsing
//!
//! A canonical expression looks like `Cookie Mix (flour, sugar), Butter`.
//! Only commas outside parentheses separate items.

/// Split an expression into its top-level items.
///
/// Total: unbalanced parentheses are tolerated. Depth never goes below
/// zero, and an item still open at end of input is taken as-is.
pub fn split_top_level(expr: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (idx, ch) in expr.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                push_item(&mut items, &expr[start..idx]);
                start = idx + ch.len_utf8();
            }
            _ => {}
        }
    }
    push_item(&mut items, &expr[start..]);

    items
}

fn push_item(items: &mut Vec<String>, raw: &str) {
    let item = raw.trim();
    if !item.is_empty() {
        items.push(item.to_string());
    }
}

/// Split free text on every comma. Free text has no nested groups.
pub fn split_free_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Collapse whitespace runs to one space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split an item at its first `(` into the text before it and the
/// parenthetical tail. The head keeps any whitespace before the `(`.
pub fn split_group(item: &str) -> (&str, Option<&str>) {
    match item.find('(') {
        Some(idx) => (&item[..idx], Some(&item[idx..])),
        None => (item, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_respects_groups() {
        assert_eq!(
            split_top_level("Cookie Mix (flour, sugar), Butter"),
            vec!["Cookie Mix (flour, sugar)", "Butter"]
        );
    }

    #[test]
    fn test_split_nested_groups() {
        assert_eq!(
            split_top_level("Chocolate Chips (sugar, cocoa (processed with alkali), soy lecithin), Salt"),
            vec![
                "Chocolate Chips (sugar, cocoa (processed with alkali), soy lecithin)",
                "Salt"
            ]
        );
    }

    #[test]
    fn test_split_drops_empty_items() {
        assert_eq!(split_top_level(" , Flour,, ,Sugar , "), vec!["Flour", "Sugar"]);
        assert!(split_top_level("").is_empty());
        assert!(split_top_level("   ").is_empty());
    }

    #[test]
    fn test_unclosed_group_runs_to_end() {
        assert_eq!(
            split_top_level("Salt, Mix (a, b, c"),
            vec!["Salt", "Mix (a, b, c"]
        );
    }

    #[test]
    fn test_stray_close_paren_does_not_go_negative() {
        assert_eq!(
            split_top_level("Salt), Sugar (a, b), Flour"),
            vec!["Salt)", "Sugar (a, b)", "Flour"]
        );
    }

    #[test]
    fn test_free_text_splits_every_comma() {
        assert_eq!(split_free_text("Vanilla, Salt ,, "), vec!["Vanilla", "Salt"]);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Flour,\n  Sugar\t(a,  b) "), "Flour, Sugar (a, b)");
    }

    #[test]
    fn test_split_group() {
        assert_eq!(split_group("Spices (Cinnamon, Nutmeg)"), ("Spices ", Some("(Cinnamon, Nutmeg)")));
        assert_eq!(split_group("Spices(Cinnamon)"), ("Spices", Some("(Cinnamon)")));
        assert_eq!(split_group("Butter"), ("Butter", None));
    }
}
