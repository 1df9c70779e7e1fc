//! catalink-core: data types and algorithms for catalog page layout
//! association.
//!
//! This crate provides the foundational types (Rect, WordObservation,
//! Line, TextBlock, ImagePosition) and the pure algorithms — line
//! reconstruction, spatial association heuristics, confidence scoring,
//! and specification extraction — used by catalink. Everything here is
//! a synchronous computation over its inputs: no I/O, no shared state,
//! deterministic for equal inputs.

pub mod associate;
pub mod block;
pub mod geometry;
pub mod image;
pub mod score;
pub mod specs;
pub mod words;

pub use associate::{AssociationOptions, by_content, by_layout, by_proximity, find_related_blocks};
pub use block::{BlockType, TextBlock};
pub use geometry::Rect;
pub use image::ImagePosition;
pub use score::score_association;
pub use specs::{KeyPrecedence, SpecOptions, extract_specifications};
pub use words::{Line, LineOptions, LineReconstructor, WordObservation};
