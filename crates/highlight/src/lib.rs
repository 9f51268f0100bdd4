//! Syntax highlighting for tedit.
//!
//! A single-pass scanner classifies every render column of a line.
//! Multi-line comment state is threaded between lines: each line is
//! highlighted with the residual flag of the line above and reports
//! whether it ends with a block comment still open, so the buffer can
//! propagate re-highlighting downward after an edit.

mod profile;

pub use profile::{select_profile, SyntaxProfile, PROFILES};

/// Highlight class of one render column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Normal,
    /// Single-line comment
    Comment,
    /// Block comment, possibly spanning lines
    MultilineComment,
    /// Primary keyword
    Keyword1,
    /// Secondary keyword (type names)
    Keyword2,
    String,
    Number,
    /// Temporary search-match overlay
    SearchMatch,
}

/// Punctuation that delimits words, in addition to whitespace and NUL.
const SEPARATORS: &str = ",.()+-/*=~%<>[];";

/// Whether `c` delimits keyword and number boundaries.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\0' || SEPARATORS.contains(c)
}

/// True when `needle` starts at `chars[at]`.
fn matches_at(chars: &[char], at: usize, needle: &str) -> bool {
    let mut pos = at;
    for nc in needle.chars() {
        if pos >= chars.len() || chars[pos] != nc {
            return false;
        }
        pos += 1;
    }
    true
}

/// Keyword lookup at `chars[at]`, honoring the word-boundary rule: the
/// character right after the keyword must itself be a separator (or the
/// line end).
fn match_keyword(profile: &SyntaxProfile, chars: &[char], at: usize) -> Option<(usize, Highlight)> {
    let lists = [
        (profile.keywords, Highlight::Keyword1),
        (profile.types, Highlight::Keyword2),
    ];
    for (list, class) in lists {
        for kw in list {
            let len = kw.chars().count();
            if !matches_at(chars, at, kw) {
                continue;
            }
            let end = at + len;
            if end == chars.len() || is_separator(chars[end]) {
                return Some((len, class));
            }
        }
    }
    None
}

/// Classify every render column of one line.
///
/// `starts_in_comment` is the residual block-comment state of the
/// previous line. Returns the per-column classes and whether this line
/// ends while a block comment is still open. With no profile every
/// column is [`Highlight::Normal`].
pub fn highlight_line(
    render: &str,
    profile: Option<&SyntaxProfile>,
    starts_in_comment: bool,
) -> (Vec<Highlight>, bool) {
    let chars: Vec<char> = render.chars().collect();
    let mut hl = vec![Highlight::Normal; chars.len()];
    let Some(profile) = profile else {
        return (hl, false);
    };

    let mut prev_sep = true;
    let mut in_string: Option<char> = None;
    let mut in_comment = starts_in_comment;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        // Line comment cuts off the rest of the row, unless it starts
        // inside a string or a block comment.
        if in_string.is_none() && !in_comment {
            if let Some(marker) = profile.line_comment {
                if matches_at(&chars, i, marker) {
                    for slot in &mut hl[i..] {
                        *slot = Highlight::Comment;
                    }
                    break;
                }
            }
        }

        if let Some((open, close)) = profile.block_comment {
            if in_string.is_none() {
                if in_comment {
                    hl[i] = Highlight::MultilineComment;
                    if matches_at(&chars, i, close) {
                        let len = close.chars().count();
                        hl[i..i + len].fill(Highlight::MultilineComment);
                        i += len;
                        in_comment = false;
                        prev_sep = true;
                    } else {
                        i += 1;
                    }
                    continue;
                } else if matches_at(&chars, i, open) {
                    let len = open.chars().count();
                    hl[i..i + len].fill(Highlight::MultilineComment);
                    i += len;
                    in_comment = true;
                    continue;
                }
            }
        }

        if profile.highlight_strings {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                // A backslash escapes the next column; both stay string.
                if c == '\\' && i + 1 < chars.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == '"' || c == '\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if profile.highlight_numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == '.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            if let Some((len, class)) = match_keyword(profile, &chars, i) {
                hl[i..i + len].fill(class);
                i += len;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c_profile() -> &'static SyntaxProfile {
        select_profile("main.c").expect("C profile registered")
    }

    fn classes(line: &str) -> Vec<Highlight> {
        highlight_line(line, Some(c_profile()), false).0
    }

    #[test]
    fn test_no_profile_is_all_normal() {
        let (hl, open) = highlight_line("int x = 1; /* hey", None, false);
        assert!(hl.iter().all(|&h| h == Highlight::Normal));
        assert!(!open);
    }

    #[test]
    fn test_keyword_with_boundary() {
        let hl = classes("int x");
        assert_eq!(&hl[..3], &[Highlight::Keyword2; 3]);
        assert_eq!(hl[3], Highlight::Normal);
    }

    #[test]
    fn test_keyword_without_boundary_stays_normal() {
        let hl = classes("intake");
        assert!(hl.iter().all(|&h| h == Highlight::Normal));
    }

    #[test]
    fn test_keyword_at_line_end() {
        let hl = classes("return");
        assert!(hl.iter().all(|&h| h == Highlight::Keyword1));
    }

    #[test]
    fn test_keyword_needs_separator_before() {
        // "xif" must not classify "if": the scanner is not at a word start.
        let hl = classes("xif ");
        assert!(hl.iter().all(|&h| h == Highlight::Normal));
    }

    #[test]
    fn test_numbers_after_separator() {
        let hl = classes("x = 42;");
        assert_eq!(hl[4], Highlight::Number);
        assert_eq!(hl[5], Highlight::Number);
        assert_eq!(hl[6], Highlight::Normal);
    }

    #[test]
    fn test_decimal_number() {
        let hl = classes("3.14");
        assert!(hl.iter().all(|&h| h == Highlight::Number));
    }

    #[test]
    fn test_digits_inside_word_are_normal() {
        let hl = classes("x86");
        assert!(hl.iter().all(|&h| h == Highlight::Normal));
    }

    #[test]
    fn test_string_with_escape() {
        let hl = classes(r#"a "b\"c" d"#);
        assert_eq!(hl[0], Highlight::Normal);
        for i in 2..8 {
            assert_eq!(hl[i], Highlight::String, "column {}", i);
        }
        assert_eq!(hl[9], Highlight::Normal);
    }

    #[test]
    fn test_single_quote_string() {
        let hl = classes("'a' b");
        assert_eq!(&hl[..3], &[Highlight::String; 3]);
        assert_eq!(hl[4], Highlight::Normal);
    }

    #[test]
    fn test_line_comment_cuts_rest_of_row() {
        let hl = classes("x; // int 42 \"s\"");
        assert_eq!(hl[0], Highlight::Normal);
        for (i, &h) in hl.iter().enumerate().skip(3) {
            assert_eq!(h, Highlight::Comment, "column {}", i);
        }
    }

    #[test]
    fn test_line_comment_marker_inside_string() {
        let hl = classes("\"//\" 1");
        assert_eq!(&hl[..4], &[Highlight::String; 4]);
        assert_eq!(hl[5], Highlight::Number);
    }

    #[test]
    fn test_block_comment_same_line() {
        let hl = classes("a /* int */ b");
        assert_eq!(hl[0], Highlight::Normal);
        for i in 2..11 {
            assert_eq!(hl[i], Highlight::MultilineComment, "column {}", i);
        }
        assert_eq!(hl[12], Highlight::Normal);
    }

    #[test]
    fn test_block_comment_leaves_flag_open() {
        let (hl, open) = highlight_line("int /* start", Some(c_profile()), false);
        assert!(open);
        assert_eq!(&hl[..3], &[Highlight::Keyword2; 3]);
        for i in 4..hl.len() {
            assert_eq!(hl[i], Highlight::MultilineComment);
        }
    }

    #[test]
    fn test_block_comment_continues_from_previous_line() {
        let (hl, open) = highlight_line("still int here", Some(c_profile()), true);
        assert!(open);
        assert!(hl.iter().all(|&h| h == Highlight::MultilineComment));
    }

    #[test]
    fn test_block_comment_closes() {
        let (hl, open) = highlight_line("end */ int", Some(c_profile()), true);
        assert!(!open);
        for i in 0..6 {
            assert_eq!(hl[i], Highlight::MultilineComment, "column {}", i);
        }
        assert_eq!(&hl[7..10], &[Highlight::Keyword2; 3]);
    }

    #[test]
    fn test_keyword_right_after_block_close() {
        // Closing a block comment counts as a separator for what follows.
        let (hl, _) = highlight_line("*/if ", Some(c_profile()), true);
        assert_eq!(&hl[2..4], &[Highlight::Keyword1; 2]);
    }

    #[test]
    fn test_profile_selection_by_extension() {
        assert_eq!(select_profile("main.c").map(|p| p.name), Some("c"));
        assert_eq!(select_profile("lib.rs").map(|p| p.name), Some("rust"));
        assert!(select_profile("notes.txt").is_none());
    }

    #[test]
    fn test_separator_set() {
        for c in " \t\0,.()+-/*=~%<>[];".chars() {
            assert!(is_separator(c), "{:?} should separate", c);
        }
        for c in "ab_9\"'".chars() {
            assert!(!is_separator(c), "{:?} should not separate", c);
        }
    }
}
