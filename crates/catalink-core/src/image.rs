use std::path::Path;

use crate::geometry::Rect;

/// Position of a product image on a catalog page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImagePosition {
    /// Identifier for the image within the page.
    pub image_id: String,
    /// Path of the extracted image file.
    pub image_path: String,
    /// Page index (0-based).
    pub page: usize,
    /// Bounding box in page points.
    pub bbox: Rect,
}

impl ImagePosition {
    /// Lower-cased file stem of `image_path`, used by the content
    /// heuristic for substring matching against block text.
    ///
    /// Returns `None` for paths without a stem (e.g., empty paths).
    pub fn base_name(&self) -> Option<String> {
        Path::new(&self.image_path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_image(path: &str) -> ImagePosition {
        ImagePosition {
            image_id: "img-0".to_string(),
            image_path: path.to_string(),
            page: 0,
            bbox: Rect::new(0.0, 0.0, 100.0, 100.0),
        }
    }

    #[test]
    fn test_base_name_strips_directory_and_extension() {
        let img = make_image("pages/3/Alpine_White.png");
        assert_eq!(img.base_name(), Some("alpine_white".to_string()));
    }

    #[test]
    fn test_base_name_lowercases() {
        let img = make_image("TRAVERTINE.JPG");
        assert_eq!(img.base_name(), Some("travertine".to_string()));
    }

    #[test]
    fn test_base_name_empty_path() {
        let img = make_image("");
        assert_eq!(img.base_name(), None);
    }
}
