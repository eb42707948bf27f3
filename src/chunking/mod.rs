//! Recursive chunk partitioning.
//!
//! The partitioner performs a divide-and-conquer search over an immutable
//! ordered sentence sequence: score every adjacent-sentence boundary of the
//! current slice, split at the boundary with the minimum score (the weakest
//! semantic continuity), and recurse into each side until every chunk fits
//! the token cap or cannot be split further.
//!
//! Recursion depth is bounded by the number of sentences in the slice; the
//! fan-out stays shallow for realistic documents because each accepted chunk
//! terminates its branch.

use crate::error::ChunkerError;
use crate::scoring::{BoundaryScorer, TokenCount};

/// Joins a sentence run with single spaces.
fn join(sentences: &[String]) -> String {
    sentences.join(" ")
}

/// Finds the boundary with the minimum score.
///
/// Ties resolve to the first occurrence, so repeated calls over the same
/// scores always pick the same (leftmost) boundary.
fn min_score_index(scores: &[f32]) -> usize {
    let mut min_idx = 0;
    for idx in 1..scores.len() {
        if scores[idx] < scores[min_idx] {
            min_idx = idx;
        }
    }
    min_idx
}

/// Recursively partitions `sentences[start..end]` into chunks.
///
/// A side of the chosen split is accepted as a final chunk when it is a
/// single sentence or its joined token length is within `max_chunk_length`;
/// otherwise the partitioner recurses into that side. The returned chunks
/// are ordered left-to-right, matching the original sentence order, and
/// exactly cover the slice.
///
/// # Errors
///
/// Propagates scoring and tokenization failures; no partial results are
/// returned.
pub fn partition(
    sentences: &[String],
    start: usize,
    end: usize,
    scorer: &dyn BoundaryScorer,
    counter: &dyn TokenCount,
    max_chunk_length: usize,
) -> Result<Vec<String>, ChunkerError> {
    // A degenerate slice has no boundaries to score.
    if end <= start {
        return Ok(vec![]);
    }
    if end - start < 2 {
        return Ok(vec![join(&sentences[start..end])]);
    }

    let scores = scorer.score_boundaries(&sentences[start..end])?;
    let min_idx = min_score_index(&scores);

    let split = start + min_idx + 1;
    let first_chunk = join(&sentences[start..split]);
    let second_chunk = join(&sentences[split..end]);

    let mut all_chunks = Vec::new();
    if min_idx == 0 || counter.token_len(&first_chunk)? <= max_chunk_length {
        all_chunks.push(first_chunk);
    } else {
        all_chunks.extend(partition(
            sentences,
            start,
            split,
            scorer,
            counter,
            max_chunk_length,
        )?);
    }
    if split == end - 1 || counter.token_len(&second_chunk)? <= max_chunk_length {
        all_chunks.push(second_chunk);
    } else {
        all_chunks.extend(partition(
            sentences,
            split,
            end,
            scorer,
            counter,
            max_chunk_length,
        )?);
    }
    Ok(all_chunks)
}
