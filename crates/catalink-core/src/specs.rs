//! Pattern-based specification extraction from related text blocks.
//!
//! Turns an image's related blocks into a key→value map. The first
//! heading (in top-to-bottom order) supplies the `"name"` entry; every
//! specification block then runs through an ordered chain of matchers,
//! taking the first rule that fires. Keys are lower-case and trimmed,
//! values trimmed.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::block::{BlockType, TextBlock};

/// Policy when two blocks map to the same specification key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyPrecedence {
    /// Keep the value from the first block that produced the key.
    FirstWins,
    /// Let later blocks overwrite earlier values.
    #[default]
    LastWins,
}

/// Options for specification extraction.
#[derive(Debug, Clone, Default)]
pub struct SpecOptions {
    /// Duplicate-key policy; defaults to [`KeyPrecedence::LastWins`].
    pub key_precedence: KeyPrecedence,
}

static DIMENSIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d+(?:[.,]\d+)?\s*x\s*\d+(?:[.,]\d+)?\s*(?:mm|cm|m|in|ft)$")
        .expect("dimensions pattern compiles")
});
static SLIP_RESISTANCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bR\d+\b").expect("slip resistance pattern compiles"));
static ABRASION_RESISTANCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)PEI [I-V]+").expect("abrasion pattern compiles"));
static FINISH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:matte|glossy|polished|honed|brushed|textured|natural|rustic)\b")
        .expect("finish pattern compiles")
});
static MATERIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:porcelain|ceramic|natural stone|marble|granite|limestone|travertine|slate|quartzite|onyx)\b",
    )
    .expect("material pattern compiles")
});
static USAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:wall|floor|outdoor|indoor|bathroom|kitchen|living room|commercial)\b")
        .expect("usage pattern compiles")
});

/// Extract a key→value specification map from related text blocks.
///
/// Blocks are sorted top-to-bottom (stable, so same-`y` blocks keep
/// their input order). The first heading becomes `"name"`; remaining
/// specification blocks run through the rule chain. Non-matching
/// blocks contribute nothing — a failed match is never an error.
pub fn extract_specifications(
    related: &[TextBlock],
    options: &SpecOptions,
) -> BTreeMap<String, String> {
    let mut sorted: Vec<&TextBlock> = related.iter().collect();
    sorted.sort_by(|a, b| a.bbox.y.total_cmp(&b.bbox.y));

    let mut specs = BTreeMap::new();

    let name_index = sorted
        .iter()
        .position(|block| block.block_type == BlockType::Heading);
    if let Some(index) = name_index {
        insert(
            &mut specs,
            "name".to_string(),
            sorted[index].text.trim().to_string(),
            options.key_precedence,
        );
    }

    for (index, block) in sorted.iter().enumerate() {
        if Some(index) == name_index || block.block_type != BlockType::Specification {
            continue;
        }
        if let Some((key, value)) = match_rules(block.text.trim()) {
            insert(&mut specs, key, value, options.key_precedence);
        }
    }

    specs
}

/// Run one block text through the ordered rule chain.
fn match_rules(text: &str) -> Option<(String, String)> {
    // Key:Value — split on the first colon
    if let Some((key, value)) = text.split_once(':') {
        return Some((
            key.trim().to_lowercase(),
            value.trim().to_string(),
        ));
    }

    // Dimensions — the whole text reads as "<n> x <n> <unit>"
    if DIMENSIONS.is_match(text) {
        return Some(("dimensions".to_string(), text.to_string()));
    }

    // Domain vocabulary, in fixed priority order
    if let Some(m) = SLIP_RESISTANCE.find(text) {
        return Some(("slip resistance".to_string(), m.as_str().to_string()));
    }
    if let Some(m) = ABRASION_RESISTANCE.find(text) {
        return Some(("abrasion resistance".to_string(), m.as_str().to_string()));
    }
    if let Some(m) = FINISH.find(text) {
        return Some(("finish".to_string(), m.as_str().to_string()));
    }
    if let Some(m) = MATERIAL.find(text) {
        return Some(("material".to_string(), m.as_str().to_string()));
    }
    if let Some(m) = USAGE.find(text) {
        return Some(("usage".to_string(), m.as_str().to_string()));
    }

    None
}

fn insert(
    specs: &mut BTreeMap<String, String>,
    key: String,
    value: String,
    precedence: KeyPrecedence,
) {
    match precedence {
        KeyPrecedence::LastWins => {
            specs.insert(key, value);
        }
        KeyPrecedence::FirstWins => {
            specs.entry(key).or_insert(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn spec_block(text: &str, y: f64) -> TextBlock {
        TextBlock {
            text: text.to_string(),
            page: 0,
            bbox: Rect::new(100.0, y, 200.0, 20.0),
            block_type: BlockType::Specification,
        }
    }

    fn heading_block(text: &str, y: f64) -> TextBlock {
        TextBlock {
            text: text.to_string(),
            page: 0,
            bbox: Rect::new(100.0, y, 200.0, 20.0),
            block_type: BlockType::Heading,
        }
    }

    fn extract(blocks: &[TextBlock]) -> BTreeMap<String, String> {
        extract_specifications(blocks, &SpecOptions::default())
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        assert!(extract(&[]).is_empty());
    }

    #[test]
    fn test_first_heading_becomes_name() {
        let blocks = vec![
            heading_block("  Alpine White  ", 70.0),
            heading_block("Second Heading", 400.0),
        ];
        let specs = extract(&blocks);
        assert_eq!(specs.get("name").map(String::as_str), Some("Alpine White"));
        assert_eq!(specs.len(), 1);
    }

    #[test]
    fn test_heading_order_is_by_y_not_input_order() {
        let blocks = vec![
            heading_block("Lower", 400.0),
            heading_block("Upper", 70.0),
        ];
        let specs = extract(&blocks);
        assert_eq!(specs.get("name").map(String::as_str), Some("Upper"));
    }

    #[test]
    fn test_key_value_rule() {
        let blocks = vec![spec_block("Thickness : 9 mm ", 310.0)];
        let specs = extract(&blocks);
        assert_eq!(specs.get("thickness").map(String::as_str), Some("9 mm"));
    }

    #[test]
    fn test_dimensions_rule() {
        let blocks = vec![spec_block("60x60 cm", 310.0)];
        let specs = extract(&blocks);
        assert_eq!(specs.get("dimensions").map(String::as_str), Some("60x60 cm"));
    }

    #[test]
    fn test_dimensions_whitespace_and_units() {
        for text in ["120 x 60 cm", "600x300 mm", "12x24 in", "2 x 4 ft", "1x2 m"] {
            let specs = extract(&[spec_block(text, 310.0)]);
            assert_eq!(
                specs.get("dimensions").map(String::as_str),
                Some(text),
                "text: {text}"
            );
        }
    }

    #[test]
    fn test_dimensions_requires_known_unit() {
        let specs = extract(&[spec_block("60x60 px", 310.0)]);
        assert!(specs.get("dimensions").is_none());
    }

    #[test]
    fn test_slip_resistance_rule() {
        let specs = extract(&[spec_block("Rated R11 for ramps", 310.0)]);
        assert_eq!(specs.get("slip resistance").map(String::as_str), Some("R11"));
    }

    #[test]
    fn test_abrasion_resistance_rule() {
        let specs = extract(&[spec_block("PEI IV rated", 310.0)]);
        assert_eq!(
            specs.get("abrasion resistance").map(String::as_str),
            Some("PEI IV")
        );
    }

    #[test]
    fn test_finish_rule_leading_word_only() {
        let specs = extract(&[spec_block("Matte surface", 310.0)]);
        assert_eq!(specs.get("finish").map(String::as_str), Some("Matte"));

        // Not in leading position — no finish match; "wall" keyword absent too
        let specs = extract(&[spec_block("surface is matte", 310.0)]);
        assert!(specs.get("finish").is_none());
    }

    #[test]
    fn test_material_rule() {
        let specs = extract(&[spec_block("Porcelain body", 310.0)]);
        assert_eq!(specs.get("material").map(String::as_str), Some("Porcelain"));
    }

    #[test]
    fn test_usage_rule_whole_word() {
        let specs = extract(&[spec_block("suitable for floor use", 310.0)]);
        assert_eq!(specs.get("usage").map(String::as_str), Some("floor"));

        // "floors" should not match the whole-word pattern... but "floor"
        // is a prefix ending at a word boundary only when followed by a
        // non-word char, so "floorplan" does not match.
        let specs = extract(&[spec_block("see the floorplan", 310.0)]);
        assert!(specs.get("usage").is_none());
    }

    #[test]
    fn test_rule_chain_priority_colon_first() {
        // Contains a colon and a finish word; colon rule wins
        let specs = extract(&[spec_block("Finish: Glossy", 310.0)]);
        assert_eq!(specs.get("finish").map(String::as_str), Some("Glossy"));
        assert_eq!(specs.len(), 1);
    }

    #[test]
    fn test_paragraph_blocks_are_ignored() {
        let block = TextBlock {
            text: "60x60 cm".to_string(),
            page: 0,
            bbox: Rect::new(100.0, 310.0, 200.0, 20.0),
            block_type: BlockType::Paragraph,
        };
        assert!(extract(&[block]).is_empty());
    }

    #[test]
    fn test_last_wins_precedence_default() {
        let blocks = vec![
            spec_block("Matte finish", 310.0),
            spec_block("Glossy finish", 340.0),
        ];
        let specs = extract(&blocks);
        assert_eq!(specs.get("finish").map(String::as_str), Some("Glossy"));
    }

    #[test]
    fn test_first_wins_precedence() {
        let blocks = vec![
            spec_block("Matte finish", 310.0),
            spec_block("Glossy finish", 340.0),
        ];
        let options = SpecOptions {
            key_precedence: KeyPrecedence::FirstWins,
        };
        let specs = extract_specifications(&blocks, &options);
        assert_eq!(specs.get("finish").map(String::as_str), Some("Matte"));
    }

    #[test]
    fn test_keys_are_lower_case_and_trimmed() {
        let specs = extract(&[spec_block("  COLOR : Snow White  ", 310.0)]);
        assert_eq!(specs.get("color").map(String::as_str), Some("Snow White"));
    }

    #[test]
    fn test_unmatched_specification_contributes_nothing() {
        let specs = extract(&[spec_block("lorem ipsum", 310.0)]);
        assert!(specs.is_empty());
    }

    #[test]
    fn test_full_block_set() {
        let blocks = vec![
            heading_block("Alpine White", 70.0),
            spec_block("60x60 cm", 310.0),
            spec_block("Porcelain body", 335.0),
            spec_block("Matte surface", 360.0),
            spec_block("R10", 385.0),
            spec_block("suitable for bathroom walls", 410.0),
        ];
        let specs = extract(&blocks);
        assert_eq!(specs.get("name").map(String::as_str), Some("Alpine White"));
        assert_eq!(specs.get("dimensions").map(String::as_str), Some("60x60 cm"));
        assert_eq!(specs.get("material").map(String::as_str), Some("Porcelain"));
        assert_eq!(specs.get("finish").map(String::as_str), Some("Matte"));
        assert_eq!(specs.get("slip resistance").map(String::as_str), Some("R10"));
        assert_eq!(specs.get("usage").map(String::as_str), Some("bathroom"));
        assert_eq!(specs.len(), 6);
    }
}
