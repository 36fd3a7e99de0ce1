//! Text normalization for extracted document text.
//!
//! PDF extraction tends to leave control characters, ragged indentation,
//! and runs of blank lines behind. [`normalize`] cleans those up while
//! preserving paragraph structure (blank-line separation).

/// Control characters stripped by [`normalize`]: everything below `\t`,
/// vertical tab and form feed, the rest of C0 above `\r`, and DEL plus C1.
fn is_stripped_control(c: char) -> bool {
    c < '\u{09}'
        || c == '\u{0B}'
        || c == '\u{0C}'
        || ('\u{0E}'..='\u{1F}').contains(&c)
        || ('\u{7F}'..='\u{9F}').contains(&c)
}

/// Normalize raw extracted text.
///
/// - strips non-printable control characters (tab, newline, and carriage
///   return survive),
/// - collapses runs of spaces and tabs within a line to a single space,
/// - trims leading/trailing whitespace on every line,
/// - collapses 3+ consecutive newlines to exactly 2,
/// - trims the whole string.
///
/// Deterministic, total, and idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let mut lines = Vec::new();
    for line in raw.split('\n') {
        let mut cleaned = String::with_capacity(line.len());
        let mut in_blank_run = false;
        for c in line.chars() {
            if is_stripped_control(c) {
                continue;
            }
            if c == ' ' || c == '\t' {
                if !in_blank_run {
                    cleaned.push(' ');
                }
                in_blank_run = true;
            } else {
                cleaned.push(c);
                in_blank_run = false;
            }
        }
        lines.push(cleaned.trim().to_string());
    }

    // Rejoin, keeping at most one blank line between paragraphs.
    let joined = lines.join("\n");
    let mut out = String::with_capacity(joined.len());
    let mut newline_run = 0usize;
    for c in joined.chars() {
        if c == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                out.push('\n');
            }
        } else {
            newline_run = 0;
            out.push(c);
        }
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_control_characters() {
        assert_eq!(normalize("he\u{0}llo\u{1F} wor\u{8F}ld"), "hello world");
    }

    #[test]
    fn collapses_space_and_tab_runs() {
        assert_eq!(normalize("a \t  b\t\tc"), "a b c");
    }

    #[test]
    fn keeps_paragraph_breaks_but_collapses_blank_runs() {
        assert_eq!(normalize("first\n\n\n\n\nsecond"), "first\n\nsecond");
        assert_eq!(normalize("first\n\nsecond"), "first\n\nsecond");
        assert_eq!(normalize("first\nsecond"), "first\nsecond");
    }

    #[test]
    fn trims_each_line_and_whole_string() {
        assert_eq!(normalize("  a  \n   b c  \n"), "a\nb c");
    }

    #[test]
    fn empty_and_whitespace_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t \n "), "");
    }

    proptest! {
        #[test]
        fn idempotent(raw in "\\PC{0,200}") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn idempotent_with_whitespace_noise(raw in "[a-z \t\n\u{0}\u{b}\u{c}\u{7f}]{0,200}") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
