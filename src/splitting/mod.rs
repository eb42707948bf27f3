//! Sentence segmentation.
//!
//! The chunker only needs an ordered sequence of sentences; how that
//! sequence is produced is a collaborator concern behind the
//! [`SentenceSplitter`] trait. [`RuleSentenceSplitter`] is the built-in
//! rule-based implementation: newline-aware segmentation, sentence-final
//! punctuation with a small per-language abbreviation list, and token-cap
//! re-splitting of oversized sentences via the length oracle.

use crate::config::Language;
use crate::error::ChunkerError;
use crate::scoring::TokenCount;
use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Splits raw text into an ordered sequence of sentences.
///
/// Implementations must be deterministic and must preserve text order.
/// The result is non-empty unless the input is empty.
pub trait SentenceSplitter: Send + Sync {
    /// Splits `text` into sentences.
    ///
    /// # Arguments
    ///
    /// * `text` - Raw input text
    /// * `newline_as_separator` - Whether newlines terminate sentences
    /// * `language` - Language tag steering abbreviation handling
    /// * `max_sentence_tokens` - Target token cap for one sentence;
    ///   oversized sentences are re-split
    /// * `counter` - Length oracle used for the token cap
    fn split(
        &self,
        text: &str,
        newline_as_separator: bool,
        language: Language,
        max_sentence_tokens: usize,
        counter: &dyn TokenCount,
    ) -> Result<Vec<String>, ChunkerError>;
}

/// English abbreviations that do not terminate a sentence.
const EN_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "fig", "vol",
    "no", "p", "pp",
];

/// Russian abbreviations that do not terminate a sentence.
const RU_ABBREVIATIONS: &[&str] = &[
    "г", "гг", "т", "д", "п", "пр", "см", "им", "ул", "стр", "рис", "табл", "т.д", "т.п", "др",
];

fn sentence_end_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Sentence-final punctuation, optional closing quotes/brackets, then
    // whitespace.
    RE.get_or_init(|| Regex::new(r#"[.!?…]+["'»)\]]*\s+"#).expect("sentence regex is valid"))
}

/// Rule-based sentence splitter for Russian and English prose.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleSentenceSplitter;

impl RuleSentenceSplitter {
    /// Returns true when the text right before a split point ends with a
    /// known abbreviation for the language.
    fn ends_with_abbreviation(prefix: &str, language: Language) -> bool {
        let trimmed = prefix.trim_end_matches('.');
        let last_word = trimmed
            .rsplit(|c: char| c.is_whitespace())
            .next()
            .unwrap_or("");
        if last_word.is_empty() {
            return false;
        }
        let lowered = last_word.to_lowercase();
        let abbreviations = match language {
            Language::English => EN_ABBREVIATIONS,
            Language::Russian => RU_ABBREVIATIONS,
        };
        if abbreviations.contains(&lowered.as_str()) {
            return true;
        }
        // Initials like "J." or "В." never close a sentence. The English
        // pronoun "I" is a real word, not an initial.
        if language == Language::English && last_word == "I" {
            return false;
        }
        lowered.graphemes(true).count() == 1
    }

    /// Splits one segment at sentence-final punctuation.
    fn split_segment(segment: &str, language: Language) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut sentence_start = 0;
        for m in sentence_end_regex().find_iter(segment) {
            let candidate = &segment[sentence_start..m.end()];
            if Self::ends_with_abbreviation(candidate.trim_end(), language) {
                continue;
            }
            let sentence = candidate.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            sentence_start = m.end();
        }
        let tail = segment[sentence_start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
        sentences
    }

    /// Re-splits a sentence whose token length exceeds the cap, greedily
    /// packing words until the cap is reached.
    fn split_by_cap(
        sentence: &str,
        max_sentence_tokens: usize,
        counter: &dyn TokenCount,
    ) -> Result<Vec<String>, ChunkerError> {
        if max_sentence_tokens == 0 || counter.token_len(sentence)? <= max_sentence_tokens {
            return Ok(vec![sentence.to_string()]);
        }

        let mut pieces = Vec::new();
        let mut current = String::new();
        for word in sentence.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if !current.is_empty() && counter.token_len(&candidate)? > max_sentence_tokens {
                pieces.push(current);
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            pieces.push(current);
        }
        Ok(pieces)
    }
}

impl SentenceSplitter for RuleSentenceSplitter {
    fn split(
        &self,
        text: &str,
        newline_as_separator: bool,
        language: Language,
        max_sentence_tokens: usize,
        counter: &dyn TokenCount,
    ) -> Result<Vec<String>, ChunkerError> {
        let segments: Vec<&str> = if newline_as_separator {
            text.split('\n').collect()
        } else {
            vec![text]
        };

        let mut sentences = Vec::new();
        for segment in segments {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            for sentence in Self::split_segment(segment, language) {
                sentences.extend(Self::split_by_cap(
                    &sentence,
                    max_sentence_tokens,
                    counter,
                )?);
            }
        }
        Ok(sentences)
    }
}
