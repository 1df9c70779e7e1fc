//! Page processing: drive association, extraction, and scoring over
//! every image on a catalog page.

use std::collections::BTreeMap;
use std::path::Path;

use catalink_core::associate::{AssociationOptions, find_related_blocks};
use catalink_core::block::TextBlock;
use catalink_core::geometry::Rect;
use catalink_core::image::ImagePosition;
use catalink_core::score::score_association;
use catalink_core::specs::{SpecOptions, extract_specifications};

use crate::diagnostics::DiagnosticsSink;
use crate::error::PageError;

/// Per-image page geometry supplied by the external layout extraction
/// step. An entry may be missing for an image; processing then falls
/// back to a default placement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageGeometry {
    /// Page index (0-based).
    pub page: usize,
    /// Bounding box in page points.
    pub bbox: Rect,
}

/// The computed link from one image to the text believed to describe it.
///
/// Transient: handed to the external ingestion pipeline and never
/// persisted by this crate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageTextAssociation {
    /// The image this association describes.
    pub image: ImagePosition,
    /// Related text blocks, as produced by the association heuristics.
    pub related_texts: Vec<TextBlock>,
    /// Extracted specifications; keys lower-case, values trimmed.
    pub specifications: BTreeMap<String, String>,
    /// Association confidence in `[0, 100]`.
    pub confidence: f64,
}

/// Options for page processing.
#[derive(Debug, Clone)]
pub struct ProcessorOptions {
    /// Associations scoring below this are dropped. The threshold is
    /// inclusive: a score of exactly `min_confidence` is retained.
    pub min_confidence: f64,
    /// Placement substituted when an image has no geometry entry.
    pub default_geometry: ImageGeometry,
    /// Thresholds for the association heuristics.
    pub association: AssociationOptions,
    /// Options for specification extraction.
    pub spec: SpecOptions,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            min_confidence: 40.0,
            default_geometry: ImageGeometry {
                page: 0,
                bbox: Rect::new(0.0, 0.0, 100.0, 100.0),
            },
            association: AssociationOptions::default(),
            spec: SpecOptions::default(),
        }
    }
}

/// Processes one catalog page: builds an association per image, sorts
/// by confidence, and filters low-confidence results.
///
/// Stateless and reentrant; a processor can be shared across threads
/// and pages. Equal inputs produce identical output.
pub struct PageProcessor<'a> {
    options: ProcessorOptions,
    sink: &'a dyn DiagnosticsSink,
}

impl<'a> PageProcessor<'a> {
    /// Create a processor with default options.
    pub fn new(sink: &'a dyn DiagnosticsSink) -> Self {
        Self::with_options(ProcessorOptions::default(), sink)
    }

    /// Create a processor with custom options.
    pub fn with_options(options: ProcessorOptions, sink: &'a dyn DiagnosticsSink) -> Self {
        Self { options, sink }
    }

    /// Process one catalog page.
    ///
    /// Builds an [`ImagePosition`] per path — substituting the default
    /// placement with a warning when `positions` has no entry for an
    /// image — then associates, extracts, and scores. The result is
    /// sorted descending by confidence (stable: ties keep image input
    /// order) and filtered by `min_confidence`.
    ///
    /// A page yielding no qualifying association returns an empty
    /// list. The only fatal condition is an empty image path string.
    pub fn process(
        &self,
        image_paths: &[String],
        positions: &[Option<ImageGeometry>],
        blocks: &[TextBlock],
    ) -> Result<Vec<ImageTextAssociation>, PageError> {
        let mut associations = Vec::with_capacity(image_paths.len());

        for (index, path) in image_paths.iter().enumerate() {
            if path.is_empty() {
                return Err(PageError::EmptyImagePath { index });
            }

            let geometry = match positions.get(index).cloned().flatten() {
                Some(geometry) => geometry,
                None => {
                    self.sink.warn(&format!(
                        "no geometry for image {path}, using default placement"
                    ));
                    self.options.default_geometry.clone()
                }
            };

            let image = ImagePosition {
                image_id: image_id_for(path, index),
                image_path: path.clone(),
                page: geometry.page,
                bbox: geometry.bbox,
            };

            let related_texts = find_related_blocks(&image, blocks, &self.options.association);
            let specifications = extract_specifications(&related_texts, &self.options.spec);
            let confidence = score_association(&image, &related_texts);

            associations.push(ImageTextAssociation {
                image,
                related_texts,
                specifications,
                confidence,
            });
        }

        associations.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let total = associations.len();
        associations.retain(|a| a.confidence >= self.options.min_confidence);
        self.sink.info(&format!(
            "{} of {total} image associations met the confidence threshold",
            associations.len()
        ));

        Ok(associations)
    }
}

/// Derive an image id from its path: the file stem, or a positional
/// fallback for stem-less paths.
fn image_id_for(path: &str, index: usize) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("image-{index}"))
}

/// Process a catalog page with default options, logging diagnostics
/// through `tracing`.
pub fn process_catalog_page(
    image_paths: &[String],
    positions: &[Option<ImageGeometry>],
    blocks: &[TextBlock],
) -> Result<Vec<ImageTextAssociation>, PageError> {
    let sink = crate::diagnostics::TracingSink;
    PageProcessor::new(&sink).process(image_paths, positions, blocks)
}
