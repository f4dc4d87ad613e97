use regex::Regex;
use std::sync::LazyLock;

// The inline dialect has exactly one form: minimal non-greedy **...** spans.
// Matching runs over already-escaped text, so the pattern never sees raw markup.
static STRONG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

/// One block of the constrained markdown dialect. Post bodies only know three
/// shapes: a single heading level, flat unordered lists, and paragraphs.
/// Anything else in the input is literal paragraph text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    List(Vec<String>),
    Paragraph(String),
}

/// Split a body into blocks. Lines are classified in order with one piece of
/// state: whether a list block is currently open. Blank lines close the open
/// list and otherwise act as separators; trailing whitespace is ignored,
/// leading and inner whitespace is kept.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut open_list: Option<Vec<String>> = None;

    for raw in markdown.lines() {
        let line = raw.trim_end();

        if line.trim().is_empty() {
            close_list(&mut blocks, &mut open_list);
            continue;
        }

        if let Some(rest) = line.strip_prefix("## ") {
            close_list(&mut blocks, &mut open_list);
            blocks.push(Block::Heading(rest.to_string()));
            continue;
        }

        if let Some(rest) = line.strip_prefix("- ") {
            open_list.get_or_insert_with(Vec::new).push(rest.to_string());
            continue;
        }

        close_list(&mut blocks, &mut open_list);
        blocks.push(Block::Paragraph(line.to_string()));
    }

    // Input ending mid-list still produces a well-formed block.
    close_list(&mut blocks, &mut open_list);

    blocks
}

fn close_list(blocks: &mut Vec<Block>, open_list: &mut Option<Vec<String>>) {
    if let Some(items) = open_list.take() {
        blocks.push(Block::List(items));
    }
}

/// Escape then emphasize, in that order. Escaping only touches `&<>`, never
/// the `**` delimiter, so markers can't be conjured out of escaped text.
pub fn render_inline(text: &str) -> String {
    let escaped = html_escape::encode_text(text);
    STRONG.replace_all(&escaped, "<strong>$1</strong>").into_owned()
}

pub fn render_blocks_to_html(blocks: &[Block]) -> String {
    let mut html = String::new();

    for block in blocks {
        match block {
            Block::Heading(text) => {
                html.push_str(&format!("<h3>{}</h3>\n", render_inline(text)));
            }
            Block::List(items) => {
                let items_html: String = items
                    .iter()
                    .map(|item| format!("<li>{}</li>\n", render_inline(item)))
                    .collect();
                html.push_str(&format!("<ul>\n{}</ul>\n", items_html));
            }
            Block::Paragraph(text) => {
                html.push_str(&format!("<p>{}</p>\n", render_inline(text)));
            }
        }
    }

    html
}

/// Render a post body to HTML. Empty input renders to an empty string; this
/// never fails.
pub fn markdown_to_html(markdown: &str) -> String {
    render_blocks_to_html(&parse_blocks(markdown))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_line() {
        let blocks = parse_blocks("## Title");
        assert_eq!(blocks, vec![Block::Heading("Title".to_string())]);
        assert_eq!(markdown_to_html("## Title"), "<h3>Title</h3>\n");
    }

    #[test]
    fn test_list_closed_by_blank_line() {
        let blocks = parse_blocks("- a\n- b\n\nafter");
        assert_eq!(
            blocks,
            vec![
                Block::List(vec!["a".to_string(), "b".to_string()]),
                Block::Paragraph("after".to_string()),
            ]
        );

        let html = markdown_to_html("- a\n- b\n\nafter");
        assert_eq!(html, "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n<p>after</p>\n");
    }

    #[test]
    fn test_list_closed_at_end_of_input() {
        let blocks = parse_blocks("## H\n- x");
        assert_eq!(
            blocks,
            vec![
                Block::Heading("H".to_string()),
                Block::List(vec!["x".to_string()]),
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert_eq!(parse_blocks(""), Vec::<Block>::new());
        assert_eq!(markdown_to_html(""), "");
    }

    #[test]
    fn test_consecutive_blank_lines_are_noops() {
        let blocks = parse_blocks("one\n\n\n\ntwo");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("one".to_string()),
                Block::Paragraph("two".to_string()),
            ]
        );
    }

    #[test]
    fn test_trailing_whitespace_stripped_leading_kept() {
        let blocks = parse_blocks("  indented   ");
        assert_eq!(blocks, vec![Block::Paragraph("  indented".to_string())]);
    }

    #[test]
    fn test_strong_emphasis() {
        assert_eq!(markdown_to_html("**bold**"), "<p><strong>bold</strong></p>\n");
    }

    #[test]
    fn test_emphasis_is_non_greedy() {
        assert_eq!(
            render_inline("**a** **b**"),
            "<strong>a</strong> <strong>b</strong>"
        );
    }

    #[test]
    fn test_unpaired_markers_stay_literal() {
        assert_eq!(render_inline("a ** b"), "a ** b");
        assert_eq!(render_inline("**open"), "**open");
    }

    #[test]
    fn test_escaping_happens_before_emphasis() {
        assert_eq!(
            render_inline("<b>**x**</b>"),
            "&lt;b&gt;<strong>x</strong>&lt;/b&gt;"
        );
    }

    #[test]
    fn test_ampersand_escaped_once() {
        assert_eq!(render_inline("salt & pepper"), "salt &amp; pepper");
    }

    #[test]
    fn test_unrecognized_syntax_is_literal_paragraph_text() {
        assert_eq!(
            parse_blocks("### deeper"),
            vec![Block::Paragraph("### deeper".to_string())]
        );
        assert_eq!(
            parse_blocks("1. ordered"),
            vec![Block::Paragraph("1. ordered".to_string())]
        );
        assert_eq!(
            parse_blocks("[link](http://example.com)"),
            vec![Block::Paragraph("[link](http://example.com)".to_string())]
        );
    }

    #[test]
    fn test_deterministic() {
        let input = "## H\n- a\n- b\n\n**p** and <q>";
        assert_eq!(markdown_to_html(input), markdown_to_html(input));
    }
}
