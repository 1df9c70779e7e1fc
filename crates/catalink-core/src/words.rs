use crate::geometry::Rect;

/// A word-level observation from the recognition engine.
///
/// Produced by an external parser of the OCR engine's raw markup.
/// `bbox` may be absent when the recognizer reported no geometry for
/// the word.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordObservation {
    /// The recognized text of this word.
    pub text: String,
    /// Recognition confidence in `[0, 1]`.
    pub confidence: f64,
    /// Bounding box in page points, if the recognizer reported one.
    pub bbox: Option<Rect>,
}

/// Options for line reconstruction.
#[derive(Debug, Clone)]
pub struct LineOptions {
    /// Two vertically adjacent words join the same line when the
    /// difference of their `y` coordinates is below
    /// `y_group_factor * max(height_a, height_b)`.
    pub y_group_factor: f64,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self { y_group_factor: 0.5 }
    }
}

/// A reconstructed line of text.
///
/// Carries aggregated confidence and the union bounding box of its
/// words. Classification into block types happens upstream; see
/// [`TextBlock::from_line`](crate::block::TextBlock::from_line).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Word texts joined with single spaces, in x order.
    pub text: String,
    /// Arithmetic mean of the word confidences.
    pub confidence: f64,
    /// Union of the word bounding boxes; zero-size at the origin when
    /// no word carried geometry.
    pub bbox: Rect,
}

/// Groups word-level observations into lines by vertical proximity.
pub struct LineReconstructor;

impl LineReconstructor {
    /// Reconstruct lines from word observations.
    ///
    /// Words are sorted by `y`, then walked greedily: a word joins the
    /// active line while its vertical distance to the line's last
    /// geometry-bearing word stays under the grouping threshold.
    /// Words without a bounding box inherit the position of the word
    /// preceding them in input order — they follow that word into its
    /// line and never open or close a line on their own.
    pub fn reconstruct(words: &[WordObservation], options: &LineOptions) -> Vec<Line> {
        if words.is_empty() {
            return Vec::new();
        }

        // Effective y per word: its own, or the effective y of its
        // predecessor when it has no geometry. The stable sort then
        // keeps geometry-less words directly behind their neighbor.
        let mut keyed: Vec<(f64, &WordObservation)> = Vec::with_capacity(words.len());
        let mut last_y = f64::NEG_INFINITY;
        for word in words {
            if let Some(bbox) = word.bbox {
                last_y = bbox.y;
            }
            keyed.push((last_y, word));
        }
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut lines = Vec::new();
        let mut current: Vec<&WordObservation> = Vec::new();
        let mut last_geometry: Option<Rect> = None;

        for (_, word) in keyed {
            match (word.bbox, last_geometry) {
                (Some(bbox), Some(prev)) => {
                    let threshold = options.y_group_factor * bbox.height.max(prev.height);
                    if (bbox.y - prev.y).abs() < threshold {
                        current.push(word);
                    } else {
                        lines.push(Self::make_line(&current));
                        current = vec![word];
                    }
                    last_geometry = Some(bbox);
                }
                (Some(bbox), None) => {
                    current.push(word);
                    last_geometry = Some(bbox);
                }
                // No geometry: ride along with the active line.
                (None, _) => current.push(word),
            }
        }

        if !current.is_empty() {
            lines.push(Self::make_line(&current));
        }

        lines
    }

    fn make_line(words: &[&WordObservation]) -> Line {
        // Order within the line is by x, with geometry-less words again
        // trailing their predecessor.
        let mut keyed: Vec<(f64, &WordObservation)> = Vec::with_capacity(words.len());
        let mut last_x = f64::NEG_INFINITY;
        for &word in words {
            if let Some(bbox) = word.bbox {
                last_x = bbox.x;
            }
            keyed.push((last_x, word));
        }
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

        let text = keyed
            .iter()
            .map(|(_, w)| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let confidence =
            words.iter().map(|w| w.confidence).sum::<f64>() / words.len() as f64;
        let bbox = keyed
            .iter()
            .filter_map(|(_, w)| w.bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();

        Line {
            text,
            confidence,
            bbox,
        }
    }
}
