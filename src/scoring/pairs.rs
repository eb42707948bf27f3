//! Pair construction for boundary scoring.
//!
//! Each candidate boundary is framed as a whole-prefix vs whole-suffix pair:
//! everything up to and including the boundary sentence on the left,
//! everything after it on the right. The cross-encoder has a bounded context
//! window, so oversized pairs are narrowed by dropping sentences from the
//! start of whichever side is currently longer. Trimming the longer side
//! balances the information kept on each side and guarantees termination:
//! the cursors converge toward the boundary, and if they reach it the pair
//! degrades to exactly the two sentences adjacent to the boundary.

use super::TokenCount;
use crate::error::ScoringError;

/// Final cursor positions for one boundary pair.
///
/// The pair covers `sentences[start..=boundary]` on the left and
/// `sentences[boundary + 1..end]` on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairWindow {
    /// First sentence included on the left side
    pub start: usize,
    /// One past the last sentence included on the right side
    pub end: usize,
}

/// Joins a sentence run with single spaces.
pub(crate) fn join(sentences: &[String]) -> String {
    sentences.join(" ")
}

/// Computes the pair window for `boundary`, narrowed to fit the model.
///
/// Starts from the full `[0, sentences.len())` window and, while the combined
/// token length of both sides meets or exceeds `max_input_len`, drops one
/// sentence from the start of the longer side. If either cursor reaches the
/// boundary the minimal window of one sentence per side is returned.
///
/// # Arguments
///
/// * `sentences` - The slice being partitioned (at least 2 sentences)
/// * `boundary` - Boundary index in `[0, sentences.len() - 2]`
/// * `counter` - Length oracle for token measurement
/// * `max_input_len` - The model's maximum input token length
pub fn shrink_to_fit(
    sentences: &[String],
    boundary: usize,
    counter: &dyn TokenCount,
    max_input_len: usize,
) -> Result<PairWindow, ScoringError> {
    let middle = boundary + 1;
    let mut start = 0usize;
    let mut end = sentences.len();

    let mut left_len = counter.token_len(&join(&sentences[start..middle]))?;
    let mut right_len = counter.token_len(&join(&sentences[middle..end]))?;

    while left_len + right_len >= max_input_len {
        if left_len > right_len {
            start += 1;
        } else {
            end -= 1;
        }
        if start >= middle || end <= middle {
            // Cursors crossed the boundary: minimal adjacent-sentence pair.
            return Ok(PairWindow {
                start: middle - 1,
                end: middle + 1,
            });
        }
        left_len = counter.token_len(&join(&sentences[start..middle]))?;
        right_len = counter.token_len(&join(&sentences[middle..end]))?;
    }

    Ok(PairWindow { start, end })
}

/// Materializes the pair texts for a window around `boundary`.
pub fn pair_texts(sentences: &[String], boundary: usize, window: &PairWindow) -> (String, String) {
    let middle = boundary + 1;
    (
        join(&sentences[window.start..middle]),
        join(&sentences[middle..window.end]),
    )
}
