//! The symptom-to-condition inference engine: deterministic keyword
//! extraction, ratio-based condition ranking, and response composition.
//!
//! Extraction and ranking are total functions over the loaded catalog; the
//! composer is the only place the generative completion capability enters,
//! and its model-only path is the only inference stage that can fail.

pub mod composer;
pub mod extractor;
pub mod matcher;
pub mod messages;

pub use composer::*;
pub use extractor::*;
pub use matcher::*;
pub use messages::*;
