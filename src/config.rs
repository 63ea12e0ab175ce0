//! Configuration for the query compiler.
//!
//! # Example
//!
//! ```
//! use query_compiler::CompilerConfig;
//!
//! // Minimal config (uses defaults)
//! let config = CompilerConfig::default();
//! assert_eq!(config.content_field, "content");
//! assert_eq!(config.document_type_field, "django_ct");
//!
//! // Full config
//! let config = CompilerConfig {
//!     content_field: "text".into(),
//!     ..Default::default()
//! };
//! ```

use serde::Deserialize;

/// Reserved field names the renderer keys its special cases on.
///
/// Both fields have defaults matching the upstream adapter conventions:
/// `content` is the unfielded full-text sentinel, `django_ct` is the
/// document-type tag field used for model restrictions.
#[derive(Debug, Clone, Deserialize)]
pub struct CompilerConfig {
    /// Sentinel field name meaning "no specific field" (default: "content")
    #[serde(default = "default_content_field")]
    pub content_field: String,

    /// Tag field carrying each document's declared type (default: "django_ct")
    #[serde(default = "default_document_type_field")]
    pub document_type_field: String,
}

fn default_content_field() -> String {
    "content".to_string()
}
fn default_document_type_field() -> String {
    "django_ct".to_string()
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            content_field: default_content_field(),
            document_type_field: default_document_type_field(),
        }
    }
}
