//! Text helpers shared by fallback content and label layout.

/// Return at most the first `max_chars` characters of `s`.
///
/// Counts Unicode scalar values, not bytes, so the cut never lands inside
/// a multi-byte character.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Greedy word wrap at `width` characters.
///
/// Words longer than `width` are split hard. Whitespace runs collapse to a
/// single space. Empty input yields a single empty line so callers always
/// have something to measure.
pub fn wrap_words(s: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in s.split_whitespace() {
        let mut word = word;
        loop {
            let word_len = word.chars().count();
            let needed = if current_len == 0 {
                word_len
            } else {
                current_len + 1 + word_len
            };

            if needed <= width {
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(word);
                current_len += word_len;
                break;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }

            // Word alone is wider than a line
            let head = take_chars(word, width);
            lines.push(head.to_string());
            word = &word[head.len()..];
            if word.is_empty() {
                break;
            }
        }
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
