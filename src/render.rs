//! Label Rendering
//!
//! One label, three representations:
//! - storage text: the normalized ingredient expression that gets persisted
//! - rich markup: styled HTML for preview and formatted copy
//! - plain text: the same sections, one per line, no markup
//!
//! Section order is fixed: name, ingredients, allergens, business,
//! net quantity, cottage disclaimer. Each section is omitted when its data
//! is absent. Rendering is pure.

use htmlize::escape_all_quotes;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::expression::{normalize_whitespace, split_group, split_top_level};
use crate::model::{BusinessInfo, Label};
use crate::typography::{TypeScale, TypeTier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedLabel {
    pub storage_text: String,
    pub rich_markup: String,
    pub plain_text: String,
}

struct Section {
    tier: TypeTier,
    bold: bool,
    /// Already-escaped markup body.
    markup: String,
    plain: String,
}

pub struct LabelRenderer {
    scale: TypeScale,
    default_unit: String,
    disclaimer: String,
}

impl LabelRenderer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            scale: config.type_scale,
            default_unit: config.default_net_quantity_unit.clone(),
            disclaimer: config.cottage_disclaimer.clone(),
        }
    }

    pub fn render(&self, label: &Label) -> RenderedLabel {
        let storage_text = normalize_whitespace(&label.text);
        let sections = self.sections(label, &storage_text);

        let plain_text = sections
            .iter()
            .map(|s| s.plain.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let mut rich_markup = String::from(r#"<div class="label">"#);
        for section in &sections {
            rich_markup.push_str(&self.wrap(section));
        }
        rich_markup.push_str("</div>");

        RenderedLabel {
            storage_text,
            rich_markup,
            plain_text,
        }
    }

    fn wrap(&self, section: &Section) -> String {
        let weight = if section.bold { " font-weight: bold;" } else { "" };
        format!(
            r#"<p style="margin: 0; {};{}">{}</p>"#,
            self.scale.css(section.tier),
            weight,
            section.markup
        )
    }

    fn sections(&self, label: &Label, expression: &str) -> Vec<Section> {
        let mut sections = Vec::new();

        let name = label.name.trim();
        if !name.is_empty() {
            sections.push(Section {
                tier: TypeTier::Large,
                bold: true,
                markup: escape(name),
                plain: name.to_string(),
            });
        }

        if !expression.is_empty() {
            sections.push(Section {
                tier: TypeTier::Small,
                bold: false,
                markup: format!(
                    "<strong><u>Ingredients:</u></strong> {}",
                    bold_preset_names(expression)
                ),
                plain: format!("Ingredients: {}", expression),
            });
        }

        if let Some(line) = allergen_line(label) {
            sections.push(Section {
                tier: TypeTier::Small,
                bold: true,
                markup: escape(&line),
                plain: line,
            });
        }

        if let Some(line) = business_line(&label.business) {
            sections.push(Section {
                tier: TypeTier::Small,
                bold: true,
                markup: escape(&line),
                plain: line,
            });
        }

        if let Some(line) = self.net_quantity_line(label) {
            sections.push(Section {
                tier: TypeTier::Large,
                bold: false,
                markup: escape(&line),
                plain: line,
            });
        }

        if label.include_cottage_disclaimer {
            let line = self.disclaimer.trim().to_uppercase();
            sections.push(Section {
                tier: TypeTier::Small,
                bold: false,
                markup: escape(&line),
                plain: line,
            });
        }

        sections
    }

    fn net_quantity_line(&self, label: &Label) -> Option<String> {
        let quantity = label.net_quantity.as_deref().map(str::trim).filter(|q| !q.is_empty())?;
        let unit = label
            .net_quantity_unit
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(self.default_unit.as_str());
        Some(format!("Net Wt. {} {}", quantity, unit))
    }
}

impl Default for LabelRenderer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

/// Render with the default configuration.
pub fn render(label: &Label) -> RenderedLabel {
    LabelRenderer::default().render(label)
}

/// Bold each top-level item's preset name.
///
/// The parenthetical part of an item is emitted untouched, so formatting
/// already embedded in a sub-ingredient list survives.
pub fn bold_preset_names(expression: &str) -> String {
    split_top_level(expression)
        .iter()
        .map(|item| match split_group(item) {
            (head, Some(group)) if head.trim().is_empty() => format!("{}{}", head, group),
            (head, Some(group)) => {
                let name = head.trim_end();
                let gap = &head[name.len()..];
                format!("<strong>{}</strong>{}{}", escape(name), gap, group)
            }
            (name, None) => format!("<strong>{}</strong>", escape(name)),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn allergen_line(label: &Label) -> Option<String> {
    let allergens = label.normalized_allergens();
    if allergens.is_empty() {
        return None;
    }
    Some(format!("CONTAINS: {}", allergens.join(", ")).to_uppercase())
}

fn business_line(info: &BusinessInfo) -> Option<String> {
    let name = info.business_name.trim();
    if name.is_empty() {
        return None;
    }
    // Name runs straight into the street address, no punctuation between.
    let head = [name, info.business_address.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let line = [
        head.as_str(),
        info.business_city.trim(),
        info.business_state.trim(),
        info.business_zip.trim(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    Some(line)
}

fn escape(text: &str) -> String {
    escape_all_quotes(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::COTTAGE_FOOD_DISCLAIMER;
    use serde_json::json;

    fn label() -> Label {
        serde_json::from_value(json!({
            "name": "Snickerdoodles",
            "text": "Spices (Cinnamon, Nutmeg),   Butter",
            "creationMode": "preset",
            "allergens": ["Milk", "Wheat"],
            "businessName": "Sunny Bakes",
            "businessAddress": "12 Elm St",
            "businessCity": "Springfield",
            "businessState": "IL",
            "businessZip": "62701",
            "netQuantity": "8",
            "includeCottageDisclaimer": true
        }))
        .unwrap()
    }

    #[test]
    fn test_bold_preset_names() {
        assert_eq!(
            bold_preset_names("Spices (Cinnamon, Nutmeg), Butter"),
            "<strong>Spices</strong> (Cinnamon, Nutmeg), <strong>Butter</strong>"
        );
    }

    #[test]
    fn test_bold_escapes_name_but_not_group() {
        assert_eq!(
            bold_preset_names("M&M <Mix> (<em>cocoa</em>)"),
            "<strong>M&amp;M &lt;Mix&gt;</strong> (<em>cocoa</em>)"
        );
    }

    #[test]
    fn test_bold_keeps_spacing_before_group() {
        assert_eq!(
            bold_preset_names("Spices(Cinnamon), Sugar  (cane)"),
            "<strong>Spices</strong>(Cinnamon), <strong>Sugar</strong>  (cane)"
        );
        assert_eq!(bold_preset_names("(water), Salt"), "(water), <strong>Salt</strong>");
    }

    #[test]
    fn test_plain_text_sections_in_order() {
        let rendered = render(&label());
        let expected = [
            "Snickerdoodles",
            "Ingredients: Spices (Cinnamon, Nutmeg), Butter",
            "CONTAINS: MILK, WHEAT",
            "Sunny Bakes 12 Elm St, Springfield, IL, 62701",
            "Net Wt. 8 oz",
            COTTAGE_FOOD_DISCLAIMER,
        ]
        .join("\n");
        assert_eq!(rendered.plain_text, expected);
    }

    #[test]
    fn test_storage_text_is_normalized_expression() {
        let rendered = render(&label());
        assert_eq!(rendered.storage_text, "Spices (Cinnamon, Nutmeg), Butter");
    }

    #[test]
    fn test_rich_markup_tiers_and_emphasis() {
        let rich = render(&label()).rich_markup;
        assert!(rich.starts_with(r#"<div class="label">"#));
        assert!(rich.contains(
            r#"<p style="margin: 0; font-size: 14pt; font-weight: bold;">Snickerdoodles</p>"#
        ));
        assert!(rich.contains("<strong><u>Ingredients:</u></strong> <strong>Spices</strong> (Cinnamon, Nutmeg)"));
        assert!(rich.contains(r#"<p style="margin: 0; font-size: 14pt;">Net Wt. 8 oz</p>"#));
        assert!(rich.contains(
            r#"<p style="margin: 0; font-size: 8pt; font-weight: bold;">CONTAINS: MILK, WHEAT</p>"#
        ));
    }

    #[test]
    fn test_sections_omitted_when_absent() {
        let bare: Label = serde_json::from_value(json!({"name": "Plain Bread"})).unwrap();
        let rendered = render(&bare);
        assert_eq!(rendered.plain_text, "Plain Bread");
        assert_eq!(rendered.storage_text, "");
        assert!(!rendered.rich_markup.contains("Ingredients:"));
        assert!(!rendered.rich_markup.contains("CONTAINS"));
        assert!(!rendered.rich_markup.contains("Net Wt."));
    }

    #[test]
    fn test_business_line_skips_empty_parts() {
        let info = BusinessInfo {
            business_name: "Sunny Bakes".into(),
            business_state: "IL".into(),
            ..Default::default()
        };
        assert_eq!(business_line(&info).unwrap(), "Sunny Bakes, IL");
        assert_eq!(business_line(&BusinessInfo::default()), None);
    }

    #[test]
    fn test_allergen_line_is_only_the_contains_list() {
        let l: Label = serde_json::from_value(json!({
            "name": "Cookies",
            "allergens": ["Milk"],
            "allergenDetails": "may contain nuts"
        }))
        .unwrap();
        let rendered = render(&l);
        assert_eq!(rendered.plain_text, "Cookies\nCONTAINS: MILK");
        assert!(!rendered.rich_markup.to_lowercase().contains("nuts"));
    }

    #[test]
    fn test_unit_and_values_are_escaped_in_markup_only() {
        let mut l = label();
        l.name = "Tom & Jerry's <Cookies>".into();
        l.net_quantity_unit = Some("g".into());
        let rendered = render(&l);
        assert!(rendered.plain_text.starts_with("Tom & Jerry's <Cookies>\n"));
        assert!(rendered.rich_markup.contains("Tom &amp; Jerry"));
        assert!(!rendered.rich_markup.contains("<Cookies>"));
        assert!(rendered.plain_text.contains("Net Wt. 8 g"));
    }
}
