use crate::types::LearningProfile;

/// Replace complex terms with the profile's simpler equivalents.
///
/// Matching is whole-word and case-insensitive; surrounding punctuation is
/// untouched and a capitalized source word capitalizes its replacement.
/// Idempotent as long as the substitution table passes
/// `VocabularyConfig::validate` (replacement text never reintroduces a key).
pub fn adapt_vocabulary(text: &str, profile: &LearningProfile) -> String {
    let table = &profile.vocabulary.substitutions;
    if table.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut word = String::new();
    for ch in text.chars() {
        if is_word_char(ch) {
            word.push(ch);
        } else {
            flush_word(&mut out, &word, table);
            word.clear();
            out.push(ch);
        }
    }
    flush_word(&mut out, &word, table);
    out
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '\'' || ch == '-'
}

fn flush_word(out: &mut String, word: &str, table: &[(String, String)]) {
    if word.is_empty() {
        return;
    }
    let lower = word.to_lowercase();
    match table.iter().find(|(key, _)| key == &lower) {
        Some((_, replacement)) => {
            let capitalized = word.chars().next().is_some_and(|c| c.is_uppercase());
            if capitalized {
                out.push_str(&capitalize_first(replacement));
            } else {
                out.push_str(replacement);
            }
        }
        None => out.push_str(word),
    }
}

pub(crate) fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
