//! Strips block comments and splits source text into `(line_number, mnemonic,
//! tail)` triples, lowercased, with blank lines skipped.

/// A single non-blank source line, ready for the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 0-based.
    pub line_number: usize,
    pub mnemonic: String,
    pub tail: String,
}

/// Removes `/* ... */` block comments (greedy, may span multiple lines),
/// splits into lines, and extracts `(mnemonic, tail)` from each non-blank
/// line after lowercasing. Line numbers count the *original* lines, so a
/// stripped comment does not shift later line numbers as long as it does not
/// itself consume newlines; a multi-line comment does consume the newlines it
/// spans, which is reflected by counting lines in the stripped text directly
/// (matching the reference implementation, which strips comments before
/// splitting on `\n`).
pub fn normalize(src: &str) -> Vec<SourceLine> {
    let stripped = strip_block_comments(src);
    stripped
        .split('\n')
        .enumerate()
        .filter_map(|(line_number, line)| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let lowered = line.to_ascii_lowercase();
            let (mnemonic, tail) = split_mnemonic(&lowered);
            Some(SourceLine {
                line_number,
                mnemonic,
                tail,
            })
        })
        .collect()
}

fn split_mnemonic(line: &str) -> (String, String) {
    match line.split_once(char::is_whitespace) {
        Some((mnemonic, rest)) => (mnemonic.to_owned(), rest.trim().to_owned()),
        None => (line.to_owned(), String::new()),
    }
}

/// Greedily removes the first `/* ... */` run and everything between, as
/// many times as such a run appears. An unterminated `/*` leaves the
/// remainder of the text untouched, matching a greedy
/// `/\*(?:.|\n)*\*/` regex substitution: once no further match can be found,
/// whatever is left of the string is passed through verbatim rather than
/// discarded.
fn strip_block_comments(src: &str) -> String {
    let mut result = String::with_capacity(src.len());
    let mut rest = src;
    loop {
        match rest.find("/*") {
            None => {
                result.push_str(rest);
                return result;
            }
            Some(start) => {
                result.push_str(&rest[..start]);
                match rest[start..].rfind("*/") {
                    Some(end_rel) if end_rel >= 2 => {
                        rest = &rest[start + end_rel + 2..];
                    }
                    _ => {
                        result.push_str(&rest[start..]);
                        return result;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_mnemonic_and_tail() {
        let lines = normalize("ADD r0, r1, r2\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].mnemonic, "add");
        assert_eq!(lines[0].tail, "r0, r1, r2");
    }

    #[test]
    fn skips_blank_lines() {
        let lines = normalize("mov r0, r1\n\n   \nnop\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_number, 0);
        assert_eq!(lines[1].line_number, 3);
    }

    #[test]
    fn mnemonic_only_has_empty_tail() {
        let lines = normalize("nop\n");
        assert_eq!(lines[0].mnemonic, "nop");
        assert_eq!(lines[0].tail, "");
    }

    #[test]
    fn strips_single_line_block_comment() {
        let lines = normalize("mov r0, r1 /* comment */\n");
        assert_eq!(lines[0].tail, "r0, r1");
    }

    #[test]
    fn strips_multiline_block_comment() {
        let lines = normalize("mov r0, r1\n/* this\nspans\nlines */\nadd r2, r3, r4\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].mnemonic, "mov");
        assert_eq!(lines[1].mnemonic, "add");
    }

    #[test]
    fn greedy_comment_spans_multiple_comment_markers() {
        let lines = normalize("mov r0, r1 /* a */ b /* c */\n");
        // Greedy: everything from the first /* to the last */ is removed.
        assert_eq!(lines[0].tail, "r0, r1");
    }

    #[test]
    fn unterminated_comment_leaves_remaining_source_untouched() {
        // No closing `*/` anywhere, so the stray `/* unterminated` token is
        // preserved (and becomes its own garbled, separately-diagnosed line)
        // rather than silently swallowing the `add` line after it.
        let lines = normalize("mov r0, r1\n/* unterminated\nadd r2, r3, r4\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].mnemonic, "mov");
        assert_eq!(lines[2].mnemonic, "add");
        assert_eq!(lines[2].tail, "r2, r3, r4");
    }
}
