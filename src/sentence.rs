use crate::config::SentenceBounds;
use crate::types::LearningProfile;
use crate::vocabulary::capitalize_first;

/// Coordinating conjunctions used as preferred clause-boundary break points.
const CONJUNCTIONS: [&str; 7] = ["and", "but", "or", "so", "yet", "for", "nor"];

/// Shorten sentences that exceed the profile's maximum word count.
///
/// Text is split on terminal punctuation (`.`, `!`, `?`), empty fragments
/// are discarded, and any sentence longer than the bound is broken at clause
/// boundaries (before a coordinating conjunction or after a comma), falling
/// back to fixed word-count chunks when no boundary exists in range. When no
/// sentence exceeds the bound the input passes through unchanged.
pub fn adapt_sentence_structure(text: &str, profile: &LearningProfile) -> String {
    let bounds = profile.vocabulary.sentence_length;
    let max_words = bounds.max;
    if max_words == 0 {
        return text.to_string();
    }

    let sentences = split_sentences(text);
    let needs_split = sentences
        .iter()
        .any(|(body, _)| body.split_whitespace().count() > max_words);
    if !needs_split {
        return text.to_string();
    }

    let mut rebuilt: Vec<String> = Vec::new();
    for (body, terminator) in &sentences {
        let words: Vec<&str> = body.split_whitespace().collect();
        if words.len() <= max_words {
            rebuilt.push(format!("{}{}", words.join(" "), terminator));
            continue;
        }
        let chunks = chunk_sentence(&words, bounds);
        let last = chunks.len().saturating_sub(1);
        for (i, chunk) in chunks.into_iter().enumerate() {
            // The original terminator survives only on the final fragment.
            let mark = if i == last { *terminator } else { '.' };
            rebuilt.push(format!("{chunk}{mark}"));
        }
    }
    rebuilt.join(" ")
}

/// Split into (body, terminator) pairs, discarding empty split artifacts.
/// A trailing fragment without terminal punctuation is closed with a period.
fn split_sentences(text: &str) -> Vec<(String, char)> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if matches!(ch, '.' | '!' | '?') {
            let body = current.trim();
            if !body.is_empty() {
                sentences.push((body.to_string(), ch));
            }
            current.clear();
        } else {
            current.push(ch);
        }
    }
    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push((tail.to_string(), '.'));
    }
    sentences
}

fn chunk_sentence(words: &[&str], bounds: SentenceBounds) -> Vec<String> {
    let max_words = bounds.max;
    // Boundaries closer than `min` words into a chunk would leave fragment
    // sentences, so the boundary scan starts at the minimum length.
    let floor = bounds.min.max(1).min(max_words);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < words.len() {
        if words.len() - start <= max_words {
            chunks.push(finish_chunk(&words[start..]));
            break;
        }
        let window_end = start + max_words;
        let break_at = (start + floor..window_end)
            .rev()
            .find(|&i| is_clause_boundary(words, i))
            .unwrap_or(window_end);
        chunks.push(finish_chunk(&words[start..break_at]));
        start = break_at;
    }
    chunks
}

/// A break is taken before a coordinating conjunction or after a word that
/// ends with a comma.
fn is_clause_boundary(words: &[&str], i: usize) -> bool {
    let lowered = words[i].to_lowercase();
    CONJUNCTIONS.contains(&lowered.as_str()) || words[i - 1].ends_with(',')
}

fn finish_chunk(words: &[&str]) -> String {
    let mut chunk = words.join(" ");
    while chunk.ends_with(',') || chunk.ends_with(';') || chunk.ends_with(':') {
        chunk.pop();
    }
    capitalize_first(&chunk)
}
