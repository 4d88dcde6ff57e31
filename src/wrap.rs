/// Word-wrap `input` into lines of at most `max_chars` characters.
///
/// Explicit newlines are kept, blank input lines come out as empty lines, and
/// a word longer than the budget is placed on its own line without being split.
/// Always returns at least one line.
pub fn wrap(input: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for segment in input.split('\n') {
        wrap_segment(segment, max_chars, &mut lines);
    }
    lines
}

fn wrap_segment(segment: &str, max_chars: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in segment.split_whitespace() {
        let word_len = word.chars().count();
        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    // An empty or all-whitespace segment still yields its (empty) line
    lines.push(current);
}
