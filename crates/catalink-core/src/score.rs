//! Confidence scoring for an image/related-texts pairing.

use crate::block::{BlockType, TextBlock};
use crate::image::ImagePosition;

/// Distance at which the proximity term falls off to zero.
const PROXIMITY_FALLOFF: f64 = 300.0;

/// Score how confidently `related` describes `image`, in `[0, 100]`.
///
/// Three additive terms:
/// - proximity (max 40): linear falloff of the mean center distance
///   over [`PROXIMITY_FALLOFF`] points;
/// - content (max 30): 5 points per specification block;
/// - layout (max 30): +15 when any block lies fully below the image,
///   +10 when any lies above and a heading is present, +5 when a
///   heading is present at all.
///
/// An empty `related` slice scores 0.
pub fn score_association(image: &ImagePosition, related: &[TextBlock]) -> f64 {
    if related.is_empty() {
        return 0.0;
    }

    let avg_distance = related
        .iter()
        .map(|block| image.bbox.center_distance(&block.bbox))
        .sum::<f64>()
        / related.len() as f64;
    let proximity = (40.0 * (1.0 - avg_distance / PROXIMITY_FALLOFF)).max(0.0);

    let spec_count = related
        .iter()
        .filter(|block| block.block_type == BlockType::Specification)
        .count();
    let content = (5.0 * spec_count as f64).min(30.0);

    let any_below = related.iter().any(|b| b.bbox.y > image.bbox.bottom());
    let any_above = related.iter().any(|b| b.bbox.bottom() < image.bbox.y);
    let any_heading = related
        .iter()
        .any(|b| b.block_type == BlockType::Heading);

    let mut layout = 0.0;
    if any_below {
        layout += 15.0;
    }
    if any_above && any_heading {
        layout += 10.0;
    }
    if any_heading {
        layout += 5.0;
    }

    (proximity + content + layout).min(100.0)
}
