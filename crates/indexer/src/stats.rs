use serde::{Deserialize, Serialize};

/// Statistics about an ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestStats {
    /// Number of documents loaded
    pub documents: usize,

    /// Number of chunks produced
    pub chunks: usize,

    /// Total characters of cleaned document text
    pub total_text_chars: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl IngestStats {
    pub fn new() -> Self {
        Self {
            documents: 0,
            chunks: 0,
            total_text_chars: 0,
            time_ms: 0,
        }
    }

    pub fn add_document(&mut self, text_chars: usize) {
        self.documents += 1;
        self.total_text_chars += text_chars;
    }

    pub fn add_chunks(&mut self, count: usize) {
        self.chunks += count;
    }
}

impl Default for IngestStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accumulation() {
        let mut stats = IngestStats::new();
        stats.add_document(120);
        stats.add_document(80);
        stats.add_chunks(7);

        assert_eq!(stats.documents, 2);
        assert_eq!(stats.total_text_chars, 200);
        assert_eq!(stats.chunks, 7);
        assert_eq!(stats.time_ms, 0);
    }
}
