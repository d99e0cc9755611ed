//! Normalizer behavior through the public API

use cleanpaste::core::clean;

#[test]
fn test_terminal_paste_scenario() {
    // Text copied from a narrow terminal pane: hard-wrapped prose with a
    // prompt glyph, a list, and uneven blank-line spacing.
    let input = "⏺ The quick brown fox jumps\nover the lazy dog and keeps\ngoing.\n\n\n- first point\n- second point that got\nwrapped by the terminal\n\nClosing thought.\n";
    let expected = "The quick brown fox jumps over the lazy dog and keeps going.\n\n- first point\n- second point that got wrapped by the terminal\n\nClosing thought.";
    assert_eq!(clean(input), expected);
}

#[test]
fn test_prose_rewrap() {
    assert_eq!(clean("this is\na wrapped\nline"), "this is a wrapped line");
}

#[test]
fn test_blank_run_collapse() {
    assert_eq!(clean("a\n\n\n\nb"), clean("a\n\nb"));
    assert_eq!(clean("a\n\nb"), "a\n\nb");
}

#[test]
fn test_marker_stripping() {
    assert_eq!(clean("⏺ hello"), "hello");
    assert_eq!(clean("⏺hello"), "hello");
}

#[test]
fn test_list_item_isolation() {
    assert_eq!(clean("- item one\n- item two"), "- item one\n- item two");
}

#[test]
fn test_list_continuation_fold() {
    assert_eq!(clean("- item one\ncontinued text"), "- item one continued text");
}

#[test]
fn test_explicit_continuation_backslash() {
    assert_eq!(clean("line one \\\nline two"), "line one line two");
}

#[test]
fn test_numbered_list_variants() {
    assert_eq!(clean("1. x\ny"), "1. x y");
    assert_eq!(clean("2) x\ny"), "2) x y");
    assert_eq!(clean("3] x\ny"), "3] x y");
    // No separator punctuation: plain prose, rewrapped
    assert_eq!(clean("1x\ny"), "1x y");
    assert_eq!(clean("1 x\ny"), "1 x y");
}

#[test]
fn test_empty_and_whitespace_input() {
    assert_eq!(clean(""), "");
    assert_eq!(clean("   \n\n  "), "");
}

#[test]
fn test_paragraph_separator_exactness() {
    let out = clean("a\n\n\n\n\nb\n\n\n\nc");
    assert_eq!(out, "a\n\nb\n\nc");
    assert!(!out.contains("\n\n\n"));
}

#[test]
fn test_line_ending_invariance() {
    let inputs = [
        "this is\na wrapped\nline",
        "a\n\n\n\nb",
        "- item one\ncontinued text\n\nprose",
        "⏺ marked\nline",
    ];
    for input in inputs {
        let crlf = input.replace('\n', "\r\n");
        assert_eq!(clean(&crlf), clean(input), "CRLF variant diverged for {:?}", input);
    }
}

#[test]
fn test_idempotence() {
    let inputs = [
        "⏺ The quick brown fox jumps\nover the lazy dog.\n\n- a list\nwith a wrapped item\n\n1. numbered\n2) also numbered",
        "line one \\\nline two",
        "   \n\n  ",
        "plain",
    ];
    for input in inputs {
        let once = clean(input);
        assert_eq!(clean(&once), once, "not idempotent for {:?}", input);
    }
}
