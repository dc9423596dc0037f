//! Token types emitted by the markup tokenizer.

/// A single markup token.
///
/// The tokenizer's contract is deliberately minimal: open tags with parsed
/// attributes, close tags, and text runs. Comments, doctypes, and processing
/// instructions are skipped during tokenization and never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An open tag, e.g. `<p class="warn">`.
    OpenTag {
        /// Lowercase tag name.
        name: String,
        /// Attributes in source order. A valueless attribute carries `None`.
        attrs: Vec<(String, Option<String>)>,
        /// Whether the tag was written self-closing (`<br/>`).
        self_closing: bool,
    },
    /// A close tag, e.g. `</p>`.
    CloseTag {
        /// Lowercase tag name.
        name: String,
    },
    /// A run of character data between tags.
    Text(String),
}
