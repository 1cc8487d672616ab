use std::collections::HashSet;

use hr_vector_store::RetrievedChunk;

/// Default cap on the number of references in a sources block.
pub const MAX_SOURCES: usize = 10;

/// De-duplicated `source :: chunk_NNNN` references in ranked order.
///
/// Hits pointing at the same (source, chunk ordinal) pair collapse into one
/// reference; at most `max_sources` references are returned.
#[must_use]
pub fn unique_sources(hits: &[RetrievedChunk], max_sources: usize) -> Vec<String> {
    let mut seen: HashSet<(&str, usize)> = HashSet::new();
    let mut out = Vec::new();

    for hit in hits {
        let chunk = &hit.chunk;
        if !seen.insert((chunk.source.as_str(), chunk.chunk_index)) {
            continue;
        }
        out.push(format!("{} :: chunk_{:04}", chunk.source, chunk.chunk_index));
        if out.len() >= max_sources {
            break;
        }
    }

    out
}

/// Render the sources block printed under an answer.
#[must_use]
pub fn format_sources_block(hits: &[RetrievedChunk], max_sources: usize) -> String {
    let sources = unique_sources(hits, max_sources);
    if sources.is_empty() {
        return "Sources:\n- (none)".to_string();
    }

    let lines: Vec<String> = sources.iter().map(|s| format!("- {s}")).collect();
    format!("Sources:\n{}", lines.join("\n"))
}
