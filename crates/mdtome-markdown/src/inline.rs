//! Inline scanner.
//!
//! Turns a text span into a sequence of inline nodes. Every position is
//! matched against the constructs in priority order (code span, bold,
//! emphasis, link, image, tag, backslash escape); anything that fails to
//! match becomes literal text. The scanner only commits input when a
//! construct is actually produced, so no text is ever lost: an unmatched
//! delimiter is re-consumed as part of the surrounding text run.

use std::sync::LazyLock;

use mdtome_ast::{Node, NodeKind};
use regex::Regex;

static TAG_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([a-z]+)="([^"]+)""#).unwrap());

/// Scan a span into inline nodes.
pub(crate) fn scan(text: &str) -> Vec<Node> {
    Scanner::new(text).run()
}

struct Scanner<'a> {
    rest: &'a str,
    text: String,
    nodes: Vec<Node>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            text: String::new(),
            nodes: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Node> {
        while !self.rest.is_empty() {
            let matched = match self.rest.as_bytes()[0] {
                b'`' => self.code_span(),
                b'*' => self.bold().or_else(|| self.emphasis()),
                b'[' => self.link(),
                b'!' => self.image(),
                b'<' => self.tag(),
                b'\\' => self.escape(),
                _ => None,
            };
            if matched.is_none() {
                self.take_char();
            }
        }
        self.flush();
        self.nodes
    }

    /// Append the next character to the pending text run.
    fn take_char(&mut self) {
        if let Some(ch) = self.rest.chars().next() {
            self.text.push(ch);
            self.rest = &self.rest[ch.len_utf8()..];
        }
    }

    /// Emit the pending text run as a `Text` node.
    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.nodes.push(Node::text(std::mem::take(&mut self.text)));
        }
    }

    fn emit(&mut self, node: Node, rest: &'a str) {
        self.flush();
        self.nodes.push(node);
        self.rest = rest;
    }

    fn code_span(&mut self) -> Option<()> {
        let source = self.rest;
        let inner = source.strip_prefix('`')?;
        let end = inner.find('`')?;
        let node = Node::with_literal(NodeKind::Code, &inner[..end]);
        self.emit(node, &inner[end + 1..]);
        Some(())
    }

    fn bold(&mut self) -> Option<()> {
        let source = self.rest;
        let inner = source.strip_prefix("**")?;
        let end = inner.find("**").filter(|&end| end > 0)?;
        let node = collapse(NodeKind::Bold, scan(&inner[..end]));
        self.emit(node, &inner[end + 2..]);
        Some(())
    }

    /// Emphasis must close before the next line break.
    fn emphasis(&mut self) -> Option<()> {
        let source = self.rest;
        let inner = source.strip_prefix('*')?;
        let line_end = inner.find('\n').unwrap_or(inner.len());
        let end = inner[..line_end].find('*').filter(|&end| end > 0)?;
        let node = collapse(NodeKind::Emphasis, scan(&inner[..end]));
        self.emit(node, &inner[end + 1..]);
        Some(())
    }

    fn link(&mut self) -> Option<()> {
        let source = self.rest;
        let inner = source.strip_prefix('[')?;
        let (text, href, rest) = link_parts(inner)?;
        let node = Node::with_literal(NodeKind::Link, text).with_attr("href", href);
        self.emit(node, rest);
        Some(())
    }

    fn image(&mut self) -> Option<()> {
        let source = self.rest;
        let inner = source.strip_prefix("![")?;
        let (alt, src, rest) = link_parts(inner)?;
        let node = Node::with_literal(NodeKind::Image, alt).with_attr("src", src);
        self.emit(node, rest);
        Some(())
    }

    fn tag(&mut self) -> Option<()> {
        let source = self.rest;
        let (node, used) = scan_tag(source)?;
        self.emit(node, &source[used..]);
        Some(())
    }

    /// `\` followed by a delimiter byte yields the bare delimiter.
    fn escape(&mut self) -> Option<()> {
        let source = self.rest;
        let next = source.chars().nth(1)?;
        if matches!(next, '\\' | '`' | '*' | '<' | '#') {
            self.text.push(next);
            self.rest = &source[1 + next.len_utf8()..];
            Some(())
        } else {
            None
        }
    }
}

/// Split `text](url)…` into its parts, shared by links and images.
fn link_parts(inner: &str) -> Option<(&str, &str, &str)> {
    let text_end = inner.find("](")?;
    let after = &inner[text_end + 2..];
    let url_end = after.find(')')?;
    Some((&inner[..text_end], &after[..url_end], &after[url_end + 1..]))
}

/// Collapse a single-`Text` interior to the literal form.
fn collapse(kind: NodeKind, children: Vec<Node>) -> Node {
    match children.as_slice() {
        [only] if only.kind == NodeKind::Text => Node::with_literal(kind, only.literal.as_str()),
        _ => Node::with_children(kind, children),
    }
}

/// Scan a tag at the start of `input`.
///
/// Returns the resulting `HTML` node and the number of bytes consumed, or
/// `None` when no well-formed opening tag starts here (closing tags and
/// stray `<` included). Content handling depends on the tag: `if` bodies are
/// inline-scanned, `details` bodies are block-parsed, and everything else
/// keeps its raw content as the literal. A missing close tag takes the rest
/// of the input as content.
pub(crate) fn scan_tag(input: &str) -> Option<(Node, usize)> {
    if let Some(rest) = input.strip_prefix("<br>") {
        let node = Node::new(NodeKind::Html).with_attr("tag", "br");
        return Some((node, input.len() - rest.len()));
    }

    let inner = input.strip_prefix('<')?;
    if !inner.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let close_angle = inner.find('>')?;
    let (head, self_closing) = match inner[..close_angle].strip_suffix('/') {
        Some(head) => (head, true),
        None => (&inner[..close_angle], false),
    };
    let name = &head[..head.find(' ').unwrap_or(head.len())];

    let mut node = Node::new(NodeKind::Html).with_attr("tag", name);
    for caps in TAG_ATTR.captures_iter(&head[name.len()..]) {
        node.attributes.insert(caps[1].to_owned(), caps[2].to_owned());
    }

    let mut pos = 1 + close_angle + 1;
    if self_closing {
        return Some((node, pos));
    }
    if input[pos..].starts_with('\n') {
        pos += 1;
    }

    let close = format!("</{name}>");
    let (content, end) = match input[pos..].find(&close) {
        Some(at) => (&input[pos..pos + at], pos + at + close.len()),
        None => (&input[pos..], input.len()),
    };
    match name {
        "if" => node.children = scan(content),
        "details" => node.children = crate::parser::parse(content).children,
        _ => node.literal = content.to_owned(),
    }
    Some((node, end))
}
