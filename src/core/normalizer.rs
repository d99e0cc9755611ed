//! Paragraph-reflow text normalizer
//!
//! Collapses incidental line-wrapping in pasted text while preserving
//! intentional structure: blank-line paragraph breaks and list items.
//! Pure and total: any input string produces a valid output string.

use lazy_static::lazy_static;
use regex::Regex;

/// UI-injected bullet/prompt glyph stripped from line starts.
const MARKER: char = '⏺';

lazy_static! {
    static ref LEADING_WS: Regex = Regex::new(r"^\s+").unwrap();
    static ref TRAILING_WS: Regex = Regex::new(r"\s+$").unwrap();
    static ref NUMBERED_ITEM: Regex = Regex::new(r"^[0-9]+[.)\]] ").unwrap();
}

/// Clean a block of text for pasting.
///
/// Line endings are normalized to `\n`, each line is trimmed and stripped
/// of a leading marker glyph, blank-line runs become single paragraph
/// breaks, and hard-wrapped prose inside a paragraph is rejoined into
/// single lines. List items stay on their own lines; a wrapped
/// continuation line directly below a list item is folded back into it.
pub fn clean(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");

    let lines: Vec<String> = normalized.split('\n').map(clean_line).collect();

    // Group lines into paragraphs (split on blank lines)
    let mut paragraphs: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for line in lines {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    let reflowed: Vec<String> = paragraphs.iter().map(|p| reflow(p)).collect();
    reflowed.join("\n\n")
}

/// Trim a logical line and strip one leading marker glyph if present.
fn clean_line(line: &str) -> String {
    let tail_trimmed = TRAILING_WS.replace(line, "");
    let trimmed = LEADING_WS.replace(tail_trimmed.as_ref(), "");
    match trimmed.strip_prefix(MARKER) {
        Some(rest) => LEADING_WS.replace(rest, "").into_owned(),
        None => trimmed.into_owned(),
    }
}

/// Whether a line starts a list item (`- `, `* `, or `1. ` / `2) ` / `3] `).
fn is_list_item(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ") || NUMBERED_ITEM.is_match(line)
}

/// What the paragraph builder currently has open.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Open {
    /// Nothing emitted yet, no prose pending.
    Nothing,
    /// The last finalized line is a list item and no prose is pending;
    /// a non-list line folds into that item as a wrapped continuation.
    ListItem,
    /// Prose is accumulating in the buffer.
    Prose,
}

/// Per-paragraph reflow state: finalized lines plus one open prose buffer.
struct ParagraphBuilder {
    lines: Vec<String>,
    buffer: String,
    open: Open,
}

impl ParagraphBuilder {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            buffer: String::new(),
            open: Open::Nothing,
        }
    }

    fn push(&mut self, line: &str) {
        if is_list_item(line) {
            self.flush_buffer();
            self.lines.push(line.to_string());
            self.open = Open::ListItem;
        } else if self.open == Open::ListItem {
            // Wrapped continuation of the item above; the item grows in
            // place and stays open for further continuation lines.
            if let Some(last) = self.lines.last_mut() {
                join_wrapped(last, line);
            }
        } else {
            if self.buffer.is_empty() {
                self.buffer.push_str(line);
            } else {
                join_wrapped(&mut self.buffer, line);
            }
            self.open = Open::Prose;
        }
    }

    fn flush_buffer(&mut self) {
        if !self.buffer.is_empty() {
            self.lines.push(std::mem::take(&mut self.buffer));
        }
    }

    fn finish(mut self) -> String {
        self.flush_buffer();
        self.lines.join("\n")
    }
}

/// Join a wrapped line onto accumulated text with a single space.
///
/// A trailing backslash on the accumulated text is an explicit
/// continuation marker: exactly one is stripped, along with any
/// whitespace it leaves behind, before the space-join.
fn join_wrapped(target: &mut String, line: &str) {
    if target.ends_with('\\') {
        target.pop();
        target.truncate(target.trim_end().len());
    }
    target.push(' ');
    target.push_str(line);
}

/// Reflow one paragraph's cleaned lines into its rendered text.
fn reflow(lines: &[String]) -> String {
    let mut builder = ParagraphBuilder::new();
    for line in lines {
        builder.push(line);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prose_rewrap() {
        assert_eq!(clean("this is\na wrapped\nline"), "this is a wrapped line");
    }

    #[test]
    fn test_line_ending_normalization() {
        assert_eq!(clean("a\r\nb"), "a b");
        assert_eq!(clean("a\rb"), "a b");
        assert_eq!(clean("a\r\n\r\nb"), "a\n\nb");
    }

    #[test]
    fn test_line_ending_invariance() {
        let input = "one two\nthree\n\n- item\nwrapped\n";
        let crlf = input.replace('\n', "\r\n");
        assert_eq!(clean(&crlf), clean(input));
    }

    #[test]
    fn test_blank_run_collapse() {
        assert_eq!(clean("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(clean("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_marker_stripping() {
        assert_eq!(clean("⏺ hello"), "hello");
        assert_eq!(clean("⏺hello"), "hello");
        assert_eq!(clean("⏺   hello"), "hello");
        // Only one glyph is stripped
        assert_eq!(clean("⏺⏺ hello"), "⏺ hello");
    }

    #[test]
    fn test_marker_only_line_is_blank() {
        // A bare glyph cleans to an empty line and so breaks the paragraph
        assert_eq!(clean("a\n⏺\nb"), "a\n\nb");
        assert_eq!(clean("⏺"), "");
    }

    #[test]
    fn test_list_items_never_merge() {
        assert_eq!(clean("- item one\n- item two"), "- item one\n- item two");
        assert_eq!(clean("* one\n* two\n* three"), "* one\n* two\n* three");
    }

    #[test]
    fn test_list_continuation_fold() {
        assert_eq!(clean("- item one\ncontinued text"), "- item one continued text");
        // Further wrapped lines keep folding into the same item
        assert_eq!(
            clean("- item one\nstill item\none more"),
            "- item one still item one more"
        );
    }

    #[test]
    fn test_prose_before_list_stays_separate() {
        assert_eq!(
            clean("intro line\n- item one\n- item two"),
            "intro line\n- item one\n- item two"
        );
    }

    #[test]
    fn test_prose_after_continuation_does_not_restart_item() {
        // Prose, then a list, then prose again inside one paragraph: the
        // trailing prose folds into the last item, never into the prose above.
        assert_eq!(
            clean("intro\n- item\ntail"),
            "intro\n- item tail"
        );
    }

    #[test]
    fn test_backslash_continuation() {
        assert_eq!(clean("line one \\\nline two"), "line one line two");
        assert_eq!(clean("- item \\\nwrapped"), "- item wrapped");
        // Only one trailing backslash is stripped
        assert_eq!(clean("line \\\\\nnext"), "line \\ next");
    }

    #[test]
    fn test_numbered_list_recognition() {
        assert!(is_list_item("1. x"));
        assert!(is_list_item("2) x"));
        assert!(is_list_item("3] x"));
        assert!(is_list_item("10. ten"));
        assert!(!is_list_item("1x"));
        assert!(!is_list_item("1 x"));
        assert!(!is_list_item("1."));
        assert_eq!(clean("1. one\n2) two\n3] three"), "1. one\n2) two\n3] three");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \n\n  "), "");
        assert_eq!(clean("\r\n\r\n"), "");
    }

    #[test]
    fn test_paragraph_separator_exactness() {
        assert_eq!(clean("\n\na\n\n\n\nb\n\n\n"), "a\n\nb");
    }

    #[test]
    fn test_per_line_trimming() {
        assert_eq!(clean("  hello  \n\tworld\t"), "hello world");
    }

    #[test]
    fn test_idempotence() {
        let inputs = [
            "this is\na wrapped\nline",
            "a\n\n\n\nb",
            "⏺ hello\nworld",
            "- item one\ncontinued\n\n1. numbered\nwrapped",
            "line one \\\nline two",
            "",
            "   \n\n  ",
        ];
        for input in inputs {
            let once = clean(input);
            assert_eq!(clean(&once), once, "not idempotent for {:?}", input);
        }
    }
}
