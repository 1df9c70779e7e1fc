use crate::geometry::Rect;
use crate::words::Line;

/// Classification of a line-level text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockType {
    /// A title/name line (e.g., a product name above its image).
    Heading,
    /// Body text.
    Paragraph,
    /// A line carrying specification data (dimensions, finish, ...).
    Specification,
    /// Anything else.
    #[default]
    Other,
}

/// A line-level text block on a catalog page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextBlock {
    /// The text of the block.
    pub text: String,
    /// Page index (0-based).
    pub page: usize,
    /// Bounding box in page points.
    pub bbox: Rect,
    /// Block classification.
    pub block_type: BlockType,
}

impl TextBlock {
    /// Attach page and classification to a reconstructed line.
    ///
    /// Line reconstruction produces unclassified lines; the classifier
    /// that decides the block type is an adapter concern outside this
    /// crate. This is the seam where its verdict is applied.
    pub fn from_line(line: Line, page: usize, block_type: BlockType) -> Self {
        Self {
            text: line.text,
            page,
            bbox: line.bbox,
            block_type,
        }
    }
}
