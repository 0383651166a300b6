/*!
 * Translation adapter.
 *
 * - `Translator`: the seam the workflow depends on
 * - `core`: `TranslationService`, the HTTP-backed implementation
 */

use async_trait::async_trait;

use crate::errors::TranslationError;

// Re-export main types for easier usage
pub use self::core::TranslationService;

// Submodules
pub mod core;

/// Maps text to another language
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `destination`
    ///
    /// `source` is a hint; `None` lets the backend detect the language.
    async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        destination: &str,
    ) -> Result<String, TranslationError>;
}
