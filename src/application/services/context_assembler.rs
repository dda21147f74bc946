pub const DEFAULT_MAX_CONTEXT_BYTES: usize = 4000;

const SEPARATOR: char = '\n';

/// Joins extracted texts with newlines, truncating so the result never exceeds
/// `max_total_bytes` UTF-8 bytes.
///
/// Texts are consumed in order. Each one contributes the longest prefix that fits the
/// remaining budget, cut on a character boundary. The separator is charged to the budget
/// as well, and once the budget is spent the remaining texts are dropped.
pub fn assemble_context<S: AsRef<str>>(texts: &[S], max_total_bytes: usize) -> String {
    let mut assembled = String::with_capacity(max_total_bytes.min(texts_len(texts)));
    let mut remaining = max_total_bytes;

    for (index, text) in texts.iter().enumerate() {
        if remaining == 0 {
            break;
        }

        if index > 0 {
            if remaining <= SEPARATOR.len_utf8() {
                break;
            }
            assembled.push(SEPARATOR);
            remaining -= SEPARATOR.len_utf8();
        }

        let prefix = prefix_within(text.as_ref(), remaining);
        assembled.push_str(prefix);
        remaining -= prefix.len();
    }

    assembled
}

fn prefix_within(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }

    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn texts_len<S: AsRef<str>>(texts: &[S]) -> usize {
    texts.iter().map(|t| t.as_ref().len() + 1).sum()
}
