//! Markdown writer.
//!
//! Emits dialect text for a document tree. Inverse of the parser over its
//! image: re-parsing written output reproduces the tree, and text the writer
//! produced round-trips byte for byte. The writer canonicalizes on the way
//! out: blocks are separated by exactly one blank line, `- ` list markers
//! become `* `, attributes and front matter keys are emitted in sorted
//! order, and prose text escapes the delimiter bytes the parser would
//! otherwise re-interpret.

use mdtome_ast::{Node, NodeKind};

/// Write a document tree as dialect text.
#[must_use]
pub fn write(doc: &Node) -> String {
    let mut out = String::new();
    if !doc.attributes.is_empty() {
        out.push_str("---\n");
        for (key, value) in &doc.attributes {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out.push_str("---\n");
    }
    for (index, child) in doc.children.iter().enumerate() {
        if index > 0 {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
        }
        write_block(&mut out, child);
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn write_block(out: &mut String, node: &Node) {
    match node.kind {
        NodeKind::Document => {
            for child in &node.children {
                write_block(out, child);
            }
        }
        NodeKind::Heading => write_heading(out, node),
        NodeKind::Paragraph => {
            write_inlines(out, &node.children);
            out.push('\n');
        }
        NodeKind::List => write_list(out, node),
        NodeKind::Admonition => write_admonition(out, node),
        NodeKind::CodeFence | NodeKind::Snippet => write_code_fence(out, node),
        NodeKind::Comment => {
            out.push_str("<!--");
            out.push_str(&node.literal);
            out.push_str("-->\n");
        }
        NodeKind::Table => write_table(out, node),
        NodeKind::Html => write_tag(out, node),
        _ => {
            write_inline(out, node);
            out.push('\n');
        }
    }
}

fn write_heading(out: &mut String, node: &Node) {
    let level = node
        .attr("level")
        .and_then(|level| level.parse::<usize>().ok())
        .unwrap_or(3);
    for _ in 0..level {
        out.push('#');
    }
    out.push(' ');
    out.push_str(&node.literal);
    if let Some(id) = node.attr("id") {
        out.push_str(" {#");
        out.push_str(id);
        out.push('}');
    }
    out.push('\n');
}

fn write_list(out: &mut String, node: &Node) {
    let ordered = node.attributes.contains_key("ordered");
    for (index, item) in node.children.iter().enumerate() {
        if ordered {
            out.push_str(&(index + 1).to_string());
            out.push_str(". ");
        } else {
            out.push_str("* ");
        }
        write_list_item(out, item);
    }
}

/// First child on the marker line, remaining children as four-space
/// indented blocks.
fn write_list_item(out: &mut String, item: &Node) {
    let mut blocks = item.children.iter();
    match blocks.next() {
        Some(first) if first.kind == NodeKind::Paragraph => {
            write_inlines(out, &first.children);
            out.push('\n');
        }
        Some(first) => {
            write_inline(out, first);
            out.push('\n');
        }
        None => out.push('\n'),
    }
    for block in blocks {
        let mut nested = String::new();
        write_block(&mut nested, block);
        indent(out, &nested);
    }
}

fn write_admonition(out: &mut String, node: &Node) {
    out.push_str("!!! ");
    out.push_str(node.attr("level").unwrap_or_default());
    out.push('\n');
    let mut body = String::new();
    write_inlines(&mut body, &node.children);
    indent(out, &body);
}

fn indent(out: &mut String, text: &str) {
    for line in text.lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
}

fn write_code_fence(out: &mut String, node: &Node) {
    out.push_str("```");
    if let Some(lang) = node.attr("lang") {
        out.push_str(lang);
    }
    out.push('\n');
    out.push_str(&node.literal);
    if !node.literal.is_empty() && !node.literal.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("```\n");
}

fn write_table(out: &mut String, node: &Node) {
    for part in &node.children {
        match part.kind {
            NodeKind::TableHead => {
                write_table_row(out, &part.children);
                out.push('|');
                for _ in 0..part.children.len() {
                    out.push_str("---|");
                }
                out.push('\n');
            }
            NodeKind::TableBody => {
                for row in &part.children {
                    write_table_row(out, &row.children);
                }
            }
            _ => {}
        }
    }
}

fn write_table_row(out: &mut String, cells: &[Node]) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        write_inlines(out, &cell.children);
        out.push_str(" |");
    }
    out.push('\n');
}

fn write_inlines(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        write_inline(out, node);
    }
}

fn write_inline(out: &mut String, node: &Node) {
    match node.kind {
        NodeKind::Text => out.push_str(&escape_text(&node.literal)),
        NodeKind::Code => {
            out.push('`');
            out.push_str(&node.literal);
            out.push('`');
        }
        NodeKind::Bold => wrap_inline(out, node, "**"),
        NodeKind::Emphasis => wrap_inline(out, node, "*"),
        NodeKind::Link => {
            out.push('[');
            out.push_str(&node.literal);
            out.push_str("](");
            out.push_str(node.attr("href").unwrap_or_default());
            if let Some(anchor) = node.attr("anchor") {
                out.push('#');
                out.push_str(anchor);
            }
            out.push(')');
        }
        NodeKind::Image => {
            out.push_str("![");
            out.push_str(&node.literal);
            out.push_str("](");
            out.push_str(node.attr("src").unwrap_or_default());
            out.push(')');
        }
        NodeKind::Html => write_tag(out, node),
        _ => {
            out.push_str(&escape_text(&node.literal));
            write_inlines(out, &node.children);
        }
    }
}

fn wrap_inline(out: &mut String, node: &Node, delimiter: &str) {
    out.push_str(delimiter);
    if node.children.is_empty() {
        out.push_str(&node.literal);
    } else {
        write_inlines(out, &node.children);
    }
    out.push_str(delimiter);
}

/// Emit a tag. `br` is bare; the block-content tags put their content on
/// its own lines; attributes other than `tag` are emitted in sorted order;
/// contentless tags self-close.
fn write_tag(out: &mut String, node: &Node) {
    let tag = node.attr("tag").unwrap_or_default();
    if tag == "br" {
        out.push_str("<br>");
        return;
    }
    let block = matches!(tag, "graphviz" | "snippet" | "include-snippet");

    out.push('<');
    out.push_str(tag);
    for (key, value) in &node.attributes {
        if key == "tag" {
            continue;
        }
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    if node.literal.is_empty() && node.children.is_empty() {
        out.push_str("/>");
        if block {
            out.push('\n');
        }
        return;
    }
    out.push('>');
    if block {
        out.push('\n');
    }
    if node.children.is_empty() {
        out.push_str(&node.literal);
    } else if tag == "if" {
        write_inlines(out, &node.children);
    } else {
        for child in &node.children {
            write_block(out, child);
        }
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    if block {
        out.push('\n');
    }
}

/// Escape prose so the parser reads it back as the same literal: `\` goes
/// in front of backticks, stars, angles, hashes, and a backslash preceding
/// one of those.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '`' | '*' | '<' | '#' => {
                out.push('\\');
                out.push(ch);
            }
            '\\' => {
                out.push('\\');
                if matches!(chars.peek(), Some('\\' | '`' | '*' | '<' | '#')) {
                    out.push('\\');
                }
            }
            _ => out.push(ch),
        }
    }
    out
}
