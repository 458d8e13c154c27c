/// One canonical line of a disclosure file: lowercase, trimmed, single-spaced.
pub type DisclosureLine = String;

/// Canonicalizes raw disclosure text into comparable lines.
///
/// Blank lines survive as empty strings so line positions stay aligned with
/// the source file. A trailing terminator does not add an extra line.
pub fn normalize(raw: &str) -> Vec<DisclosureLine> {
    split_lines(raw).map(normalize_line).collect()
}

fn normalize_line(line: &str) -> DisclosureLine {
    line.split(is_blank)
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unicode whitespace plus the unit separator (U+001F).
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{1f}'
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

/// Splits on `\n`, `\r\n`, `\r` and the other Unicode line boundaries.
fn split_lines(raw: &str) -> impl Iterator<Item = &str> {
    let mut rest = raw;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.char_indices().find(|(_, c)| is_line_break(*c)) {
            Some((idx, c)) => {
                let line = &rest[..idx];
                let mut next = idx + c.len_utf8();
                if c == '\r' && rest[next..].starts_with('\n') {
                    next += 1;
                }
                rest = &rest[next..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(lines: &[DisclosureLine]) -> String {
        lines.iter().map(|l| format!("{}\n", l)).collect()
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(normalize("").is_empty());
    }

    #[test]
    fn lowercases_trims_and_collapses_whitespace() {
        let lines = normalize("  Foo.COM ,\t\t123 ,  DIRECT  ");
        assert_eq!(lines, vec!["foo.com , 123 , direct".to_string()]);
    }

    #[test]
    fn handles_every_line_ending_convention() {
        let lines = normalize("a.com, 1\r\nb.com, 2\rc.com, 3\nd.com, 4");
        assert_eq!(lines, vec!["a.com, 1", "b.com, 2", "c.com, 3", "d.com, 4"]);
    }

    #[test]
    fn blank_lines_are_kept_but_trailing_terminator_is_not_a_line() {
        let lines = normalize("a.com, 1\n\n   \nb.com, 2\n");
        assert_eq!(lines, vec!["a.com, 1", "", "", "b.com, 2"]);
    }

    #[test]
    fn unit_separator_collapses_like_whitespace() {
        let lines = normalize("\u{1f}A.com,\u{1f}\u{1f}1\u{1f}");
        assert_eq!(lines, vec!["a.com, 1"]);
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let samples = [
            "Foo.com ,  123\r\n\r\n  # comment  \nBAR.com,\t9, RESELLER\n",
            "\n\n",
            "single line without terminator",
            "tabs\tand\u{a0}nbsp\u{2028}next",
        ];
        for raw in samples {
            let once = normalize(raw);
            let twice = normalize(&rejoin(&once));
            assert_eq!(once, twice, "not idempotent for {:?}", raw);
        }
    }
}
