//! Splits text into pieces the TTS provider accepts in one request.

/// Longest text the `translate_tts` endpoint renders per request.
pub const MAX_SEGMENT_CHARS: usize = 100;

/// Splits `text` into ordered segments of at most `max_chars` characters.
///
/// Clauses end at sentence punctuation; a clause that is still too long is
/// broken between words, and a single overlong word is hard-cut. Adjacent
/// pieces are then packed back together, space-separated, up to the limit.
/// Pieces with no letters or digits are dropped since the provider cannot
/// voice them.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut atoms: Vec<&str> = Vec::new();

    for clause in clauses(text) {
        let clause = clause.trim();
        if !clause.chars().any(char::is_alphanumeric) {
            continue;
        }
        if clause.chars().count() <= max_chars {
            atoms.push(clause);
            continue;
        }
        for word in clause.split_whitespace() {
            atoms.extend(hard_cut(word, max_chars));
        }
    }

    pack(atoms, max_chars)
}

/// Cuts `text` after each clause-ending punctuation mark.
///
/// ASCII marks only end a clause when followed by whitespace, so `3.14` and
/// `e.g.` inside a word stay intact. Full-width marks always end one.
fn clauses(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let end = idx + c.len_utf8();
        let boundary = match c {
            '\n' | '…' | '。' | '！' | '？' | '、' | '，' | '：' | '；' => true,
            '.' | '!' | '?' | ';' | ':' | ',' => chars
                .peek()
                .map_or(true, |&(_, next)| next.is_whitespace()),
            _ => false,
        };
        if boundary {
            out.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

fn hard_cut(word: &str, max_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in word.char_indices() {
        if count == max_chars {
            pieces.push(&word[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < word.len() {
        pieces.push(&word[start..]);
    }
    pieces
}

fn pack(atoms: Vec<&str>, max_chars: usize) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for atom in atoms {
        let atom_chars = atom.chars().count();
        if current_chars > 0 && current_chars + 1 + atom_chars > max_chars {
            segments.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if current_chars > 0 {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(atom);
        current_chars += atom_chars;
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_segment() {
        assert_eq!(split_text("hello", MAX_SEGMENT_CHARS), vec!["hello"]);
    }

    #[test]
    fn blank_and_punctuation_only_text_yields_nothing() {
        assert!(split_text("   \n ", MAX_SEGMENT_CHARS).is_empty());
        assert!(split_text("... !!", MAX_SEGMENT_CHARS).is_empty());
    }

    #[test]
    fn splits_at_sentence_boundaries() {
        let segments = split_text("First one. Second one! Third?", 15);
        assert_eq!(segments, vec!["First one.", "Second one!", "Third?"]);
    }

    #[test]
    fn packs_short_clauses_together() {
        let segments = split_text("Hi. Yes. No.", MAX_SEGMENT_CHARS);
        assert_eq!(segments, vec!["Hi. Yes. No."]);
    }

    #[test]
    fn decimal_points_do_not_split() {
        let segments = split_text("Pi is 3.14 roughly.", 12);
        assert_eq!(segments, vec!["Pi is 3.14", "roughly."]);
    }

    #[test]
    fn long_clause_breaks_between_words() {
        let text = "word ".repeat(60);
        let segments = split_text(&text, MAX_SEGMENT_CHARS);
        assert!(segments.len() >= 3);
        for segment in &segments {
            assert!(segment.chars().count() <= MAX_SEGMENT_CHARS);
            assert!(!segment.starts_with(' ') && !segment.ends_with(' '));
        }
        assert_eq!(segments.join(" "), text.trim_end());
    }

    #[test]
    fn overlong_word_is_hard_cut_on_char_boundaries() {
        let word = "é".repeat(250);
        let segments = split_text(&word, MAX_SEGMENT_CHARS);
        let lengths: Vec<usize> = segments.iter().map(|s| s.chars().count()).collect();
        assert_eq!(lengths, vec![100, 100, 50]);
        assert_eq!(segments.concat(), word);
    }

    #[test]
    fn full_width_punctuation_splits() {
        let segments = split_text("こんにちは。元気ですか？", 6);
        assert_eq!(segments, vec!["こんにちは。", "元気ですか？"]);
    }
}
