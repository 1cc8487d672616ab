use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A source document prior to chunking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Stable source identifier (typically the file name)
    pub source: String,

    /// Full document text
    pub text: String,

    /// Loader-supplied metadata (relative path, extension, ...)
    pub metadata: Map<String, Value>,
}

impl Document {
    /// Create a new document
    #[must_use]
    pub const fn new(source: String, text: String, metadata: Map<String, Value>) -> Self {
        Self {
            source,
            text,
            metadata,
        }
    }

    /// Copy of this document with the text replaced, keeping source and
    /// metadata intact. Used by the cleaning stage so documents stay
    /// immutable.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            source: self.source.clone(),
            text: text.into(),
            metadata: self.metadata.clone(),
        }
    }

    /// Number of characters in the document text
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// A contiguous window of a source document with provenance metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier, `{source}::chunk_{NNNN}`
    pub id: String,

    /// Trimmed window text (never empty)
    pub text: String,

    /// Source document identifier
    pub source: String,

    /// 0-based window ordinal within the document. Strictly increasing but
    /// not necessarily contiguous: blank windows consume an ordinal without
    /// emitting a chunk.
    pub chunk_index: usize,

    /// Window start offset in the document, in characters
    pub start_char: usize,

    /// Window end offset (exclusive), in characters
    pub end_char: usize,

    /// Document metadata plus this chunk's span fields
    pub metadata: Map<String, Value>,
}

impl Chunk {
    /// Create a new chunk
    #[must_use]
    pub const fn new(
        id: String,
        text: String,
        source: String,
        chunk_index: usize,
        start_char: usize,
        end_char: usize,
        metadata: Map<String, Value>,
    ) -> Self {
        Self {
            id,
            text,
            source,
            chunk_index,
            start_char,
            end_char,
            metadata,
        }
    }

    /// Stable chunk id for a source and window ordinal
    #[must_use]
    pub fn id_for(source: &str, chunk_index: usize) -> String {
        format!("{source}::chunk_{chunk_index:04}")
    }

    /// Width of the original (untrimmed) window in characters
    #[must_use]
    pub const fn span_chars(&self) -> usize {
        self.end_char.saturating_sub(self.start_char)
    }
}
