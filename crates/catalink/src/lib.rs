//! catalink: associate OCR text blocks with catalog page images and
//! extract structured material specifications.
//!
//! This is the public API facade. It re-exports the data model and
//! algorithms from catalink-core and adds the page-processing
//! orchestrator, input errors, and the injected diagnostics sink.
//!
//! # Architecture
//!
//! - **catalink-core**: data types and pure algorithms (line
//!   reconstruction, association heuristics, scoring, extraction)
//! - **catalink** (this crate): orchestration, diagnostics, errors
//!
//! # Example
//!
//! ```
//! use catalink::{BlockType, ImageGeometry, Rect, TextBlock, process_catalog_page};
//!
//! let paths = vec!["alpine_white.png".to_string()];
//! let positions = vec![Some(ImageGeometry {
//!     page: 0,
//!     bbox: Rect::new(100.0, 100.0, 200.0, 200.0),
//! })];
//! let blocks = vec![TextBlock {
//!     text: "60x60 cm".to_string(),
//!     page: 0,
//!     bbox: Rect::new(100.0, 310.0, 200.0, 20.0),
//!     block_type: BlockType::Specification,
//! }];
//!
//! let associations = process_catalog_page(&paths, &positions, &blocks).unwrap();
//! assert_eq!(associations.len(), 1);
//! assert_eq!(associations[0].specifications["dimensions"], "60x60 cm");
//! ```

pub mod diagnostics;
pub mod error;
pub mod page;

pub use catalink_core;
pub use catalink_core::{
    AssociationOptions, BlockType, ImagePosition, KeyPrecedence, Line, LineOptions,
    LineReconstructor, Rect, SpecOptions, TextBlock, WordObservation,
};
pub use diagnostics::{CollectingSink, DiagnosticsSink, NullSink, TracingSink};
pub use error::PageError;
pub use page::{
    ImageGeometry, ImageTextAssociation, PageProcessor, ProcessorOptions, process_catalog_page,
};
