//! Spatial association of text blocks with a product image.
//!
//! Three independent candidate generators — proximity, layout, and
//! content — each nominate same-page blocks. [`find_related_blocks`]
//! merges their output as a set union keyed on text + position, so a
//! block nominated by several heuristics appears once. Nothing here
//! enforces exclusivity: the same block may be related to more than
//! one image on the page.

use std::collections::HashSet;

use crate::block::{BlockType, TextBlock};
use crate::image::ImagePosition;

/// Thresholds for the association heuristics, in page points.
#[derive(Debug, Clone)]
pub struct AssociationOptions {
    /// Center-to-center distance cutoff for the proximity heuristic.
    pub proximity_radius: f64,
    /// Maximum vertical gap for a block below the image.
    pub below_max_gap: f64,
    /// Maximum vertical gap for a heading/specification block above the image.
    pub above_max_gap: f64,
    /// Maximum horizontal gap for blocks beside the image.
    pub side_max_gap: f64,
    /// Center-to-center distance cutoff for the content heuristic.
    pub content_radius: f64,
}

impl Default for AssociationOptions {
    fn default() -> Self {
        Self {
            proximity_radius: 200.0,
            below_max_gap: 100.0,
            above_max_gap: 50.0,
            side_max_gap: 100.0,
            content_radius: 300.0,
        }
    }
}

/// Identity of a block for union merging: text plus exact position.
type BlockKey = (String, u64, u64);

fn block_key(block: &TextBlock) -> BlockKey {
    (
        block.text.clone(),
        block.bbox.x.to_bits(),
        block.bbox.y.to_bits(),
    )
}

/// Blocks whose center lies within `proximity_radius` of the image center.
pub fn by_proximity<'a>(
    image: &ImagePosition,
    blocks: &[&'a TextBlock],
    options: &AssociationOptions,
) -> Vec<&'a TextBlock> {
    blocks
        .iter()
        .copied()
        .filter(|block| image.bbox.center_distance(&block.bbox) <= options.proximity_radius)
        .collect()
}

/// Blocks matching one of the four directional layout patterns.
pub fn by_layout<'a>(
    image: &ImagePosition,
    blocks: &[&'a TextBlock],
    options: &AssociationOptions,
) -> Vec<&'a TextBlock> {
    blocks
        .iter()
        .copied()
        .filter(|block| {
            is_below(image, block, options)
                || is_above(image, block, options)
                || is_right_of(image, block, options)
                || is_left_of(image, block, options)
        })
        .collect()
}

/// Specification blocks naming the image file or sitting within the
/// content radius.
///
/// The filename test is a deliberately naive case-insensitive substring
/// match on the lower-cased file stem, not a tokenized comparison.
pub fn by_content<'a>(
    image: &ImagePosition,
    blocks: &[&'a TextBlock],
    options: &AssociationOptions,
) -> Vec<&'a TextBlock> {
    let base_name = image.base_name();
    blocks
        .iter()
        .copied()
        .filter(|block| block.block_type == BlockType::Specification)
        .filter(|block| {
            let names_image = base_name
                .as_deref()
                .is_some_and(|name| block.text.to_lowercase().contains(name));
            names_image || image.bbox.center_distance(&block.bbox) < options.content_radius
        })
        .collect()
}

fn is_below(image: &ImagePosition, block: &TextBlock, options: &AssociationOptions) -> bool {
    block.bbox.y > image.bbox.bottom()
        && block.bbox.h_overlaps(&image.bbox)
        && block.bbox.y - image.bbox.bottom() < options.below_max_gap
}

fn is_above(image: &ImagePosition, block: &TextBlock, options: &AssociationOptions) -> bool {
    block.bbox.bottom() < image.bbox.y
        && block.bbox.h_overlaps(&image.bbox)
        && image.bbox.y - block.bbox.bottom() < options.above_max_gap
        && matches!(
            block.block_type,
            BlockType::Heading | BlockType::Specification
        )
}

fn is_right_of(image: &ImagePosition, block: &TextBlock, options: &AssociationOptions) -> bool {
    block.bbox.x > image.bbox.right()
        && block.bbox.v_overlaps(&image.bbox)
        && block.bbox.x - image.bbox.right() < options.side_max_gap
}

fn is_left_of(image: &ImagePosition, block: &TextBlock, options: &AssociationOptions) -> bool {
    block.bbox.right() < image.bbox.x
        && block.bbox.v_overlaps(&image.bbox)
        && image.bbox.x - block.bbox.right() < options.side_max_gap
}

/// Find the text blocks likely describing `image`.
///
/// Only blocks on the image's page are considered. The three
/// heuristics run in a fixed order (proximity, layout, content) and
/// their results are unioned, so the output is deterministic for equal
/// inputs. No particular spatial order is guaranteed; callers that
/// need one must sort.
pub fn find_related_blocks(
    image: &ImagePosition,
    blocks: &[TextBlock],
    options: &AssociationOptions,
) -> Vec<TextBlock> {
    let same_page: Vec<&TextBlock> = blocks
        .iter()
        .filter(|block| block.page == image.page)
        .collect();

    let mut seen: HashSet<BlockKey> = HashSet::new();
    let mut related: Vec<TextBlock> = Vec::new();

    let candidates = by_proximity(image, &same_page, options)
        .into_iter()
        .chain(by_layout(image, &same_page, options))
        .chain(by_content(image, &same_page, options));

    for block in candidates {
        if seen.insert(block_key(block)) {
            related.push(block.clone());
        }
    }

    related
}
