//! LaTeX emission.
//!
//! Renders a document tree to LaTeX body text for a book-style layout:
//! headings map onto the sectioning ladder (part, chapter, section, and so
//! on by level), code to `minted` environments, tables to `tabular`.
//! The output is a body fragment; the preamble lives with the build that
//! consumes it.

use mdtome_ast::{Node, NodeKind};
use tracing::debug;

/// Render a document tree to LaTeX body text.
#[must_use]
pub fn latex(doc: &Node) -> String {
    let mut out = String::new();
    write_children(&mut out, doc);
    out
}

fn write_children(out: &mut String, node: &Node) {
    for child in &node.children {
        write_node(out, child);
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node.kind {
        NodeKind::Document => write_children(out, node),
        NodeKind::Paragraph => {
            write_children(out, node);
            out.push_str("\n\n");
        }
        NodeKind::Text => out.push_str(&escape_text(&node.literal)),
        NodeKind::Image => write_image(out, node),
        NodeKind::Link => write_link(out, node),
        NodeKind::Emphasis => write_wrapped(out, node, "\\emph"),
        NodeKind::Bold => write_wrapped(out, node, "\\textbf"),
        NodeKind::Code => write_code(out, node),
        NodeKind::Heading => write_heading(out, node),
        NodeKind::List => write_list(out, node),
        NodeKind::ListItem => write_list_item(out, node),
        NodeKind::Admonition => write_admonition(out, node),
        NodeKind::CodeFence | NodeKind::Snippet => write_code_fence(out, node),
        NodeKind::Table => write_table(out, node),
        NodeKind::TableHead | NodeKind::TableBody | NodeKind::TableRow | NodeKind::TableCell => {
            write_children(out, node);
        }
        NodeKind::Comment => {}
        NodeKind::Html => {
            // Conditional and line-break tags have no print rendering.
            if !node.is_tag("if") && !node.is_tag("br") {
                debug!("No LaTeX rendering for tag {:?}", node.attr("tag"));
            }
        }
    }
}

/// Escape prose text. Command arguments go through [`escape_argument`]
/// instead, which also escapes the `mintinline` delimiter.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '#' | '$' | '_' | '&' | '%' => {
                out.push('\\');
                out.push(ch);
            }
            other => out.push(other),
        }
    }
    out
}

fn escape_argument(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '#' | '$' | '_' | '&' | '%' | '|' => {
                out.push('\\');
                out.push(ch);
            }
            other => out.push(other),
        }
    }
    out
}

fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '#' | '%' => {
                out.push('\\');
                out.push(ch);
            }
            other => out.push(other),
        }
    }
    out
}

fn label(id: &str) -> String {
    id.replace('_', "-")
}

fn write_wrapped(out: &mut String, node: &Node, command: &str) {
    out.push_str(command);
    out.push('{');
    if node.children.is_empty() {
        out.push_str(&escape_argument(&node.literal));
    } else {
        write_children(out, node);
    }
    out.push('}');
}

fn write_code(out: &mut String, node: &Node) {
    let lang = node.attr("lang").unwrap_or("c");
    out.push_str("\\mintinline{");
    out.push_str(lang);
    out.push_str("}|");
    out.push_str(&escape_argument(&node.literal));
    out.push('|');
}

fn write_heading(out: &mut String, node: &Node) {
    let level = node
        .attr("level")
        .and_then(|level| level.parse::<u32>().ok())
        .unwrap_or(3);
    let command = match level {
        0 => "part",
        1 => "chapter",
        2 => "section",
        3 => "subsection",
        4 => "subsubsection",
        5 => "paragraph",
        _ => "subparagraph",
    };
    out.push('\\');
    out.push_str(command);
    out.push('{');
    out.push_str(&escape_text(&node.literal));
    out.push('}');
    if let Some(id) = node.attr("id") {
        out.push_str("\\label{");
        out.push_str(&label(id));
        out.push('}');
    }
    out.push_str("\n\n");
}

fn write_link(out: &mut String, node: &Node) {
    let text = escape_argument(&node.literal);
    if let Some(anchor) = node.attr("anchor") {
        out.push_str("\\hyperref[");
        out.push_str(&label(anchor));
        out.push_str("]{");
        out.push_str(&text);
        out.push('}');
    } else {
        out.push_str("\\href{");
        out.push_str(&escape_url(node.attr("href").unwrap_or_default()));
        out.push_str("}{");
        out.push_str(&text);
        out.push('}');
    }
}

fn write_image(out: &mut String, node: &Node) {
    out.push_str("\\begin{figure}[hbt!]\n  \\centering\n  \\includegraphics[width=0.9\\textwidth]{");
    out.push_str(&node.attr("src").unwrap_or_default().replace('_', "\\_"));
    out.push_str("}\n  \\caption{");
    out.push_str(&escape_text(&node.literal));
    out.push_str("}\n\\end{figure}\n");
}

fn write_list(out: &mut String, node: &Node) {
    let environment = if node.attr("ordered").is_some() {
        "enumerate"
    } else {
        "itemize"
    };
    out.push_str("\\begin{");
    out.push_str(environment);
    out.push_str("}\n");
    write_children(out, node);
    out.push_str("\\end{");
    out.push_str(environment);
    out.push_str("}\n\n");
}

fn write_list_item(out: &mut String, node: &Node) {
    out.push_str("\\item\n");
    let mut inner = String::new();
    write_children(&mut inner, node);
    for line in inner.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
}

fn write_admonition(out: &mut String, node: &Node) {
    let level = node.attr("level").unwrap_or("note");
    out.push_str("\\begin{quote}\n\\textbf{");
    out.push_str(&escape_text(level));
    out.push_str(":} ");
    write_children(out, node);
    out.push_str("\n\\end{quote}\n\n");
}

fn write_code_fence(out: &mut String, node: &Node) {
    let lang = node.attr("lang").unwrap_or("c");
    out.push_str("\\begin{minted}[frame=single,breaklines]{");
    out.push_str(lang);
    out.push_str("}\n");
    out.push_str(&node.literal);
    if !node.literal.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("\\end{minted}\n\n");
}

fn write_table(out: &mut String, node: &Node) {
    let Some(head) = node.children.first() else {
        return;
    };
    let Some(body) = node.children.get(1) else {
        return;
    };

    out.push_str("\\begin{tabular}{");
    let mut header = String::new();
    for (index, cell) in head.children.iter().enumerate() {
        if index > 0 {
            out.push('|');
            header.push_str(" & ");
        }
        out.push('c');
        header.push_str("\\textbf{");
        write_children(&mut header, cell);
        header.push('}');
    }
    out.push_str("}\n");
    out.push_str(&header);
    out.push_str("\\\\\n\\hline\n");
    for row in &body.children {
        for (index, cell) in row.children.iter().enumerate() {
            if index > 0 {
                out.push_str(" & ");
            }
            write_children(out, cell);
        }
        out.push_str("\\\\\n");
    }
    out.push_str("\\end{tabular}\n\n");
}
