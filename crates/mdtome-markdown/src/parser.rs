//! Block parser.
//!
//! A single forward pass over the source with greedy dispatch: at every
//! block position the first matching rule wins and consumes its input, no
//! backtracking. Parsing is total; a malformed construct falls back to text
//! instead of failing.

use std::sync::LazyLock;

use mdtome_ast::{Node, NodeKind};
use regex::Regex;

use crate::cursor::Cursor;
use crate::inline;

static FRONT_MATTER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z]+): (.+)").unwrap());

/// Parse dialect text into a `Document` tree.
pub fn parse(source: &str) -> Node {
    let mut cursor = Cursor::new(source);
    let mut doc = Node::new(NodeKind::Document);
    let mut first_construct = true;

    while !cursor.at_end() {
        if cursor.starts_with("\n") {
            cursor.consume(1);
            continue;
        }
        if cursor.starts_with("\r\n") {
            cursor.consume(2);
            continue;
        }
        if first_construct && cursor.starts_with("---\n") {
            parse_front_matter(&mut cursor, &mut doc);
            first_construct = false;
            continue;
        }
        first_construct = false;

        if cursor.starts_with("<!--") {
            if let Some(node) = parse_comment(&mut cursor) {
                doc.children.push(node);
                continue;
            }
        }
        if cursor.starts_with("<") && !cursor.starts_with("<link ") {
            doc.children.push(parse_block_tag(&mut cursor));
            continue;
        }
        if cursor.starts_with("#") {
            doc.children.push(parse_heading(&mut cursor));
            continue;
        }
        if cursor.starts_with("* ") || cursor.starts_with("- ") {
            doc.children.push(parse_list(&mut cursor));
            continue;
        }
        if cursor.starts_with("!!! ") {
            doc.children.push(parse_admonition(&mut cursor));
            continue;
        }
        if cursor.starts_with("```") {
            doc.children.push(parse_code_fence(&mut cursor));
            continue;
        }
        if starts_table(&cursor) {
            doc.children.push(parse_table(&mut cursor));
            continue;
        }
        if let Some(node) = parse_paragraph(&mut cursor) {
            doc.children.push(node);
        }
    }

    doc
}

/// `---` delimited `key: value` lines populating the document attributes.
/// Non-matching lines inside the block are dropped.
fn parse_front_matter(cursor: &mut Cursor, doc: &mut Node) {
    cursor.consume_line();
    while !cursor.at_end() && !cursor.starts_with("---") && !cursor.starts_with("\n") {
        let line = cursor.consume_line();
        if let Some(caps) = FRONT_MATTER_LINE.captures(line) {
            doc.attributes.insert(caps[1].to_owned(), caps[2].to_owned());
        }
    }
    if cursor.starts_with("---") {
        cursor.consume_line();
    }
}

/// `<!--` through `-->`. Returns `None` when the terminator is missing so
/// the tag rule can have a go at the line instead.
fn parse_comment(cursor: &mut Cursor) -> Option<Node> {
    let end = cursor.rest().find("-->")?;
    let literal = cursor.rest()[4..end].to_owned();
    cursor.consume(end + 3);
    Some(Node::with_literal(NodeKind::Comment, literal))
}

/// A `<` at block level is a tag; a malformed one degrades to a paragraph
/// holding the raw line.
fn parse_block_tag(cursor: &mut Cursor) -> Node {
    if let Some((node, used)) = inline::scan_tag(cursor.rest()) {
        cursor.consume(used);
        return node;
    }
    let line = cursor.consume_line();
    Node::with_children(NodeKind::Paragraph, vec![Node::text(line)])
}

fn parse_heading(cursor: &mut Cursor) -> Node {
    let level = cursor.rest().bytes().take_while(|&b| b == b'#').count();
    cursor.consume(level + 1);
    let line = cursor.consume_line();

    let mut node = Node::new(NodeKind::Heading).with_attr("level", level.to_string());
    match line.find(" {") {
        Some(at) => {
            node.literal = line[..at].to_owned();
            let suffix = line[at + 2..].trim_end_matches('}');
            if let Some(id) = suffix.strip_prefix('#') {
                node = node.with_attr("id", id);
            }
        }
        None => node.literal = line.to_owned(),
    }
    node
}

fn parse_list(cursor: &mut Cursor) -> Node {
    let mut list = Node::new(NodeKind::List);
    while cursor.starts_with("* ") || cursor.starts_with("- ") {
        cursor.consume(2);
        let line = cursor.consume_line();
        let mut item = Node::new(NodeKind::ListItem);
        item.children
            .push(Node::with_children(NodeKind::Paragraph, inline::scan(line)));

        // Four-space indented block directly under the item.
        let mut nested = String::new();
        while cursor.starts_with("    ") {
            nested.push_str(&cursor.consume_line()[4..]);
            nested.push('\n');
        }
        if !nested.is_empty() {
            item.children.append(&mut parse(&nested).children);
        }
        list.children.push(item);
    }
    list
}

fn parse_admonition(cursor: &mut Cursor) -> Node {
    cursor.consume(4);
    let level = cursor.consume_line().trim().to_owned();

    let mut body = String::new();
    while cursor.starts_with("    ") {
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(&cursor.consume_line()[4..]);
    }
    Node::with_children(NodeKind::Admonition, inline::scan(&body)).with_attr("level", level)
}

fn parse_code_fence(cursor: &mut Cursor) -> Node {
    cursor.consume(3);
    let lang = cursor.consume_line().trim().to_owned();

    let mut literal = String::new();
    while !cursor.at_end() {
        if cursor.peek_line().contains("```") {
            cursor.consume_line();
            break;
        }
        literal.push_str(cursor.consume_line());
        literal.push('\n');
    }
    let mut node = Node::with_literal(NodeKind::CodeFence, literal);
    if !lang.is_empty() {
        node = node.with_attr("lang", lang);
    }
    node
}

fn starts_table(cursor: &Cursor) -> bool {
    cursor.starts_with("|")
        && cursor
            .peek_second_line()
            .is_some_and(is_table_separator)
}

/// `|---|---|…` with at least one dash.
fn is_table_separator(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('|') else {
        return false;
    };
    !rest.is_empty()
        && rest.bytes().all(|b| b == b'-' || b == b'|')
        && rest.bytes().any(|b| b == b'-')
}

fn parse_table(cursor: &mut Cursor) -> Node {
    let header = cursor.consume_line();
    cursor.consume_line();

    let head = Node::with_children(NodeKind::TableHead, parse_row_cells(header));
    let mut body = Node::new(NodeKind::TableBody);
    while cursor.starts_with("|") {
        let line = cursor.consume_line();
        body.children
            .push(Node::with_children(NodeKind::TableRow, parse_row_cells(line)));
    }
    Node::with_children(NodeKind::Table, vec![head, body])
}

fn parse_row_cells(line: &str) -> Vec<Node> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner
        .split('|')
        .map(|cell| Node::with_children(NodeKind::TableCell, inline::scan(cell.trim())))
        .collect()
}

/// Fallback rule: contiguous non-blank lines up to the next construct.
fn parse_paragraph(cursor: &mut Cursor) -> Option<Node> {
    let mut text = String::new();
    while !cursor.at_end() && !cursor.starts_with("\n") && !cursor.starts_with("\r\n") {
        if !text.is_empty() && starts_block(cursor) {
            break;
        }
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(cursor.consume_line());
    }
    let inlines = inline::scan(&text);
    if inlines.is_empty() {
        return None;
    }
    Some(Node::with_children(NodeKind::Paragraph, inlines))
}

/// Would the current line start a higher-priority construct? `<link ` lines
/// stay paragraph content.
fn starts_block(cursor: &Cursor) -> bool {
    (cursor.starts_with("<") && !cursor.starts_with("<link "))
        || cursor.starts_with("#")
        || cursor.starts_with("* ")
        || cursor.starts_with("- ")
        || cursor.starts_with("!!! ")
        || cursor.starts_with("```")
        || starts_table(cursor)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn children(source: &str) -> Vec<Node> {
        parse(source).children
    }

    #[test]
    fn test_heading_with_id() {
        let doc = parse("# Hello {#h1}\n\nWorld\n");
        assert_eq!(
            doc.children,
            vec![
                Node::with_literal(NodeKind::Heading, "Hello")
                    .with_attr("level", "1")
                    .with_attr("id", "h1"),
                Node::with_children(NodeKind::Paragraph, vec![Node::text("World")]),
            ]
        );
        assert!(doc.attributes.is_empty());
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            children("### Deep\n"),
            vec![Node::with_literal(NodeKind::Heading, "Deep").with_attr("level", "3")]
        );
    }

    #[test]
    fn test_heading_suffix_without_id_marker_truncates_title() {
        assert_eq!(
            children("# Title {.class}\n"),
            vec![Node::with_literal(NodeKind::Heading, "Title").with_attr("level", "1")]
        );
    }

    #[test]
    fn test_front_matter_only_as_first_construct() {
        let doc = parse("---\ntitle: Intro\n---\n# H\n");
        assert_eq!(doc.attr("title"), Some("Intro"));
        assert_eq!(doc.children.len(), 1);

        let later = parse("para\n\n---\ntitle: nope\n");
        assert!(later.attr("title").is_none());
    }

    #[test]
    fn test_front_matter_after_leading_blank_lines() {
        let doc = parse("\n\n---\nauthor: am\n---\n");
        assert_eq!(doc.attr("author"), Some("am"));
    }

    #[test]
    fn test_front_matter_drops_unparseable_lines() {
        let doc = parse("---\nkey: value\nnot a pair\n---\n");
        assert_eq!(doc.attr("key"), Some("value"));
        assert_eq!(doc.attributes.len(), 1);
        assert!(doc.children.is_empty());
    }

    #[test]
    fn test_paragraph_joins_contiguous_lines() {
        assert_eq!(
            children("one\ntwo\n\nthree\n"),
            vec![
                Node::with_children(NodeKind::Paragraph, vec![Node::text("one\ntwo")]),
                Node::with_children(NodeKind::Paragraph, vec![Node::text("three")]),
            ]
        );
    }

    #[test]
    fn test_paragraph_stops_at_construct_line() {
        assert_eq!(
            children("intro\n# Next\n"),
            vec![
                Node::with_children(NodeKind::Paragraph, vec![Node::text("intro")]),
                Node::with_literal(NodeKind::Heading, "Next").with_attr("level", "1"),
            ]
        );
    }

    #[test]
    fn test_link_tag_line_stays_paragraph_content() {
        let nodes = children("<link anchor=\"a\">see</link>\n");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind, NodeKind::Paragraph);
        assert!(nodes[0].children[0].is_tag("link"));
    }

    #[test]
    fn test_comment_block() {
        assert_eq!(
            children("<!-- note -->\n"),
            vec![Node::with_literal(NodeKind::Comment, " note ")]
        );
    }

    #[test]
    fn test_unterminated_comment_falls_back_to_text() {
        assert_eq!(
            children("<!-- open\n"),
            vec![Node::with_children(
                NodeKind::Paragraph,
                vec![Node::text("<!-- open")],
            )]
        );
    }

    #[test]
    fn test_block_snippet_tag() {
        let nodes = children("<snippet id=\"s\">\nint x;\n</snippet>\n");
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].is_tag("snippet"));
        assert_eq!(nodes[0].attr("id"), Some("s"));
        assert_eq!(nodes[0].literal, "int x;\n");
    }

    #[test]
    fn test_malformed_tag_line_becomes_paragraph_text() {
        assert_eq!(
            children("<oops no closer\n\nafter\n"),
            vec![
                Node::with_children(NodeKind::Paragraph, vec![Node::text("<oops no closer")]),
                Node::with_children(NodeKind::Paragraph, vec![Node::text("after")]),
            ]
        );
    }

    #[test]
    fn test_list_items_are_inline_parsed_paragraphs() {
        assert_eq!(
            children("* plain\n* has **bold**\n"),
            vec![Node::with_children(
                NodeKind::List,
                vec![
                    Node::with_children(
                        NodeKind::ListItem,
                        vec![Node::with_children(
                            NodeKind::Paragraph,
                            vec![Node::text("plain")],
                        )],
                    ),
                    Node::with_children(
                        NodeKind::ListItem,
                        vec![Node::with_children(
                            NodeKind::Paragraph,
                            vec![
                                Node::text("has "),
                                Node::with_literal(NodeKind::Bold, "bold"),
                            ],
                        )],
                    ),
                ],
            )]
        );
    }

    #[test]
    fn test_dash_markers_parse_as_list() {
        let nodes = children("- a\n- b\n");
        assert_eq!(nodes[0].kind, NodeKind::List);
        assert_eq!(nodes[0].children.len(), 2);
    }

    #[test]
    fn test_list_item_nested_block() {
        let nodes = children("* top\n    * inner\n* next\n");
        let list = &nodes[0];
        assert_eq!(list.children.len(), 2);
        let first = &list.children[0];
        assert_eq!(first.children.len(), 2);
        assert_eq!(first.children[1].kind, NodeKind::List);
        assert_eq!(
            first.children[1].children[0].children[0],
            Node::with_children(NodeKind::Paragraph, vec![Node::text("inner")])
        );
    }

    #[test]
    fn test_list_item_nested_code_fence() {
        let nodes = children("* item\n    ```\n    code\n    ```\n");
        let item = &nodes[0].children[0];
        assert_eq!(item.children[1].kind, NodeKind::CodeFence);
        assert_eq!(item.children[1].literal, "code\n");
    }

    #[test]
    fn test_list_ends_at_plain_line() {
        let nodes = children("* a\nplain\n");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind, NodeKind::List);
        assert_eq!(nodes[1].kind, NodeKind::Paragraph);
    }

    #[test]
    fn test_admonition_body_is_dedented_and_inline_parsed() {
        assert_eq!(
            children("!!! warning\n    look *here*\n    second\n"),
            vec![Node::with_children(
                NodeKind::Admonition,
                vec![
                    Node::text("look "),
                    Node::with_literal(NodeKind::Emphasis, "here"),
                    Node::text("\nsecond"),
                ],
            )
            .with_attr("level", "warning")]
        );
    }

    #[test]
    fn test_admonition_without_body() {
        assert_eq!(
            children("!!! note\n"),
            vec![Node::new(NodeKind::Admonition).with_attr("level", "note")]
        );
    }

    #[test]
    fn test_code_fence_keeps_content_verbatim() {
        assert_eq!(
            children("```rust\nlet x = 1; // *not* emphasis\n```\n"),
            vec![
                Node::with_literal(NodeKind::CodeFence, "let x = 1; // *not* emphasis\n")
                    .with_attr("lang", "rust"),
            ]
        );
    }

    #[test]
    fn test_code_fence_without_language() {
        let nodes = children("```\nx\n```\n");
        assert!(nodes[0].attr("lang").is_none());
    }

    #[test]
    fn test_unclosed_fence_takes_rest_of_input() {
        assert_eq!(
            children("```\nnever closed\n"),
            vec![Node::with_literal(NodeKind::CodeFence, "never closed\n")]
        );
    }

    #[test]
    fn test_table() {
        let nodes = children("| A | B |\n|---|---|\n| 1 | 2 |\n");
        let table = &nodes[0];
        assert_eq!(table.kind, NodeKind::Table);
        let head = &table.children[0];
        assert_eq!(head.kind, NodeKind::TableHead);
        assert_eq!(
            head.children,
            vec![
                Node::with_children(NodeKind::TableCell, vec![Node::text("A")]),
                Node::with_children(NodeKind::TableCell, vec![Node::text("B")]),
            ]
        );
        let body = &table.children[1];
        assert_eq!(body.kind, NodeKind::TableBody);
        assert_eq!(body.children.len(), 1);
        assert_eq!(body.children[0].kind, NodeKind::TableRow);
    }

    #[test]
    fn test_pipe_line_without_separator_is_paragraph() {
        let nodes = children("| not a table |\n");
        assert_eq!(nodes[0].kind, NodeKind::Paragraph);
    }

    #[test]
    fn test_paragraph_breaks_at_table_start() {
        let nodes = children("before\n| A |\n|---|\n");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].kind, NodeKind::Table);
    }

    #[test]
    fn test_empty_input_is_empty_document() {
        let doc = parse("");
        assert_eq!(doc, Node::new(NodeKind::Document));
        assert_eq!(parse("\n\n\n"), Node::new(NodeKind::Document));
    }
}
