//! Tests for the native grammar and rendering.

use super::*;

fn parse(source: &str) -> String {
    Parser::new().parse(source).unwrap()
}

#[test]
fn empty_document_renders_nothing() {
    assert_eq!(parse(""), "");
    assert_eq!(parse("\n\n\n"), "");
}

#[test]
fn single_paragraph() {
    assert_eq!(parse("hello world"), "<p>hello world</p>");
}

#[test]
fn paragraph_joins_consecutive_lines() {
    assert_eq!(parse("first\nsecond"), "<p>first\nsecond</p>");
}

#[test]
fn blank_lines_split_paragraphs() {
    assert_eq!(parse("one\n\ntwo"), "<p>one</p>\n<p>two</p>");
    assert_eq!(parse("one\n\n\n\ntwo"), "<p>one</p>\n<p>two</p>");
}

#[test]
fn paragraph_text_is_escaped() {
    assert_eq!(
        parse("<script> & friends"),
        "<p>&lt;script&gt; &amp; friends</p>"
    );
}

#[test]
fn atx_headers() {
    assert_eq!(parse("# Title"), "<h1>Title</h1>");
    assert_eq!(parse("### Deep"), "<h3>Deep</h3>");
    assert_eq!(parse("######"), "<h6></h6>");
}

#[test]
fn header_interrupts_a_paragraph() {
    assert_eq!(parse("text\n# Title"), "<p>text</p>\n<h1>Title</h1>");
}

#[test]
fn seven_hashes_is_not_a_header() {
    assert_eq!(parse("####### nope"), "<p>####### nope</p>");
}

#[test]
fn hash_without_space_is_not_a_header() {
    assert_eq!(parse("#nope"), "<p>#nope</p>");
}

#[test]
fn fenced_code_block() {
    assert_eq!(
        parse("```\nlet x = 1;\n```"),
        "<pre><code>let x = 1;\n</code></pre>"
    );
}

#[test]
fn fenced_code_keeps_blank_and_marker_lines() {
    assert_eq!(
        parse("```\n# not a header\n\n  indented\n```"),
        "<pre><code># not a header\n\n  indented\n</code></pre>"
    );
}

#[test]
fn fenced_code_escapes_content() {
    assert_eq!(
        parse("```\n<b> & </b>\n```"),
        "<pre><code>&lt;b&gt; &amp; &lt;/b&gt;\n</code></pre>"
    );
}

#[test]
fn fence_info_string_becomes_a_language_class() {
    assert_eq!(
        parse("```rust\nfn main() {}\n```"),
        "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
    );
}

#[test]
fn empty_fence_renders_an_empty_code_block() {
    assert_eq!(parse("```\n```"), "<pre><code></code></pre>");
}

#[test]
fn unterminated_fence_is_completed_at_end_of_input() {
    assert_eq!(
        parse("```\ndangling"),
        "<pre><code>dangling\n</code></pre>"
    );
}

#[test]
fn fence_interrupts_a_paragraph() {
    assert_eq!(
        parse("text\n```\ncode\n```"),
        "<p>text</p>\n<pre><code>code\n</code></pre>"
    );
}

#[test]
fn text_after_a_closed_fence_starts_a_paragraph() {
    assert_eq!(
        parse("```\ncode\n```\nafter"),
        "<pre><code>code\n</code></pre>\n<p>after</p>"
    );
}

#[test]
fn inline_code_span() {
    assert_eq!(parse("a `b` c"), "<p>a <code>b</code> c</p>");
}

#[test]
fn inline_code_is_escaped() {
    assert_eq!(parse("`<b>`"), "<p><code>&lt;b&gt;</code></p>");
}

#[test]
fn unclosed_backtick_stays_literal() {
    assert_eq!(parse("a ` b"), "<p>a ` b</p>");
}

#[test]
fn header_content_goes_through_the_inline_scanner() {
    assert_eq!(parse("# a `b`"), "<h1>a <code>b</code></h1>");
}

#[test]
fn native_markers_are_seeded() {
    let parser = Parser::new();
    assert_eq!(parser.registry().markers().as_str(), NATIVE_MARKERS);
}

#[test]
fn native_predicates_without_registration() {
    let parser = Parser::new();
    assert!(parser.is_block_continuable(FENCED_CODE));
    assert!(parser.is_block_completable(FENCED_CODE));
    assert!(!parser.is_block_continuable(PARAGRAPH));
    assert!(!parser.is_block_completable(HEADER));
    assert!(!parser.is_block_continuable("Ext1"));
}

#[test]
fn line_splits_indent_from_text() {
    let line = Line::new("   text");
    assert_eq!(line.indent, 3);
    assert_eq!(line.text, "text");
    assert_eq!(line.body, "   text");
    assert_eq!(line.marker(), Some('t'));

    assert!(Line::new("").is_blank());
    assert!(Line::new("   ").is_blank());
    assert!(Line::new("\t").is_blank());
}
