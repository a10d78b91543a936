//! External capability boundary — language detection, translation, and
//! generative completion are consumed through these traits, never
//! implemented locally. Concrete HTTP adapters live next to public mock
//! implementations so every failure path is testable without network access.

pub mod google_translate;
pub mod mock;
pub mod openai;
pub mod traits;

pub use google_translate::*;
pub use openai::*;
pub use traits::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider is not reachable at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Provider returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}
