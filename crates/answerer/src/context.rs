use hr_vector_store::RetrievedChunk;

/// Assemble retrieved chunks into a citation-headed context string.
///
/// Each block is `header\nbody\n` where the header names the source, chunk
/// ordinal and similarity score, so provenance survives into the prompt.
/// Blocks accumulate in ranked order while the running character count stays
/// within `max_context_chars`. When the next whole block would overflow and
/// meaningfully more than its header would still fit, the block is cut so
/// the output fills the budget exactly. The output never exceeds
/// `max_context_chars` characters.
#[must_use]
pub fn build_context(hits: &[RetrievedChunk], max_context_chars: usize) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut used = 0usize;

    for hit in hits {
        let chunk = &hit.chunk;
        let header = format!(
            "[SOURCE: {} | CHUNK: chunk_{:04} | SCORE: {:.4}]",
            chunk.source, chunk.chunk_index, hit.score
        );
        let body = chunk.text.trim();

        let block = format!("{header}\n{body}\n");
        let block_chars = block.chars().count();

        if used + block_chars > max_context_chars {
            // Cut the final block so the output fills the budget exactly,
            // keeping a trailing newline. A cut that would leave little more
            // than the header is dropped instead.
            let remaining = max_context_chars - used;
            if remaining > header.chars().count() + 20 {
                let cut: String = block.chars().take(remaining - 1).collect();
                parts.push(format!("{cut}\n"));
            }
            break;
        }

        parts.push(block);
        used += block_chars;
    }

    parts.concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hr_chunker::Chunk;
    use pretty_assertions::assert_eq;

    fn hit(source: &str, chunk_index: usize, text: &str, score: f32) -> RetrievedChunk {
        RetrievedChunk {
            chunk: Chunk::new(
                format!("{source}::chunk_{chunk_index:04}"),
                text.to_string(),
                source.to_string(),
                chunk_index,
                0,
                text.chars().count(),
                serde_json::Map::new(),
            ),
            score,
        }
    }

    #[test]
    fn test_blocks_are_verbatim_when_under_budget() {
        let hits = vec![
            hit("pto.md", 0, "Employees get 20 PTO days", 0.25),
            hit("wfh.md", 2, "Remote work needs approval", 0.125),
        ];

        let context = build_context(&hits, 6000);

        let expected = "[SOURCE: pto.md | CHUNK: chunk_0000 | SCORE: 0.2500]\n\
                        Employees get 20 PTO days\n\
                        [SOURCE: wfh.md | CHUNK: chunk_0002 | SCORE: 0.1250]\n\
                        Remote work needs approval\n";
        assert_eq!(context, expected);
    }

    #[test]
    fn test_output_never_exceeds_budget() {
        let long_body = "word ".repeat(100);
        let hits = vec![
            hit("a.md", 0, &long_body, 0.5),
            hit("b.md", 1, &long_body, 0.25),
            hit("c.md", 2, &long_body, 0.125),
        ];

        for budget in [0, 10, 75, 120, 333, 600, 1200, 5000] {
            let context = build_context(&hits, budget);
            assert!(
                context.chars().count() <= budget,
                "budget {budget} exceeded: {} chars",
                context.chars().count()
            );
        }
    }

    #[test]
    fn test_partial_block_fills_budget_exactly() {
        let first = hit("a.md", 0, "short first body", 0.5);
        let second = hit("b.md", 1, &"long tail ".repeat(40), 0.25);
        let header2 = "[SOURCE: b.md | CHUNK: chunk_0001 | SCORE: 0.2500]";

        let block1 = build_context(std::slice::from_ref(&first), 10_000);
        let budget = block1.chars().count() + header2.chars().count() + 30;

        let context = build_context(&[first, second], budget);

        assert!(context.starts_with(&block1));
        assert!(context[block1.len()..].starts_with(header2));
        assert_eq!(context.chars().count(), budget);
        assert!(context.ends_with('\n'));
    }

    #[test]
    fn test_partial_block_skipped_when_remaining_barely_fits_header() {
        let first = hit("a.md", 0, "short first body", 0.5);
        let second = hit("b.md", 1, &"long tail ".repeat(40), 0.25);

        let block1 = build_context(std::slice::from_ref(&first), 10_000);
        let budget = block1.chars().count() + 5;

        let context = build_context(&[first, second], budget);
        assert_eq!(context, block1);
    }

    #[test]
    fn test_body_whitespace_is_trimmed() {
        let hits = vec![hit("a.md", 0, "  padded body \n\n", 0.5)];

        let context = build_context(&hits, 6000);
        assert_eq!(
            context,
            "[SOURCE: a.md | CHUNK: chunk_0000 | SCORE: 0.5000]\npadded body\n"
        );
    }

    #[test]
    fn test_empty_hits_yield_empty_context() {
        assert_eq!(build_context(&[], 6000), "");
    }

    #[test]
    fn test_zero_budget_yields_empty_context() {
        let hits = vec![hit("a.md", 0, "anything", 0.5)];
        assert_eq!(build_context(&hits, 0), "");
    }
}
