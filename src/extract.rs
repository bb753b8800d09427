//! Flattens status HTML into terminal text.
//!
//! Statuses arrive as small HTML fragments. The extractor keeps every text node
//! in document order and, for each `p` element, writes the value of its `href`
//! attribute followed by a space before the paragraph's own text. Other tags
//! only pass their text through.
//!
//! ```rust
//! use tootline::extract::ContentExtractor;
//!
//! let text = ContentExtractor::new()
//!     .extract(r#"<p href="http://x">hello</p> world"#)
//!     .unwrap();
//! assert_eq!(text, "http://x hello world");
//! ```

use html5ever::{parse_document, tendril::TendrilSink, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::{error::Error, result::Result};

/// One node of a parsed document. Parents own their children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNode {
    /// An element with its attributes in source order.
    Element {
        /// Local tag name, lowercase.
        tag: String,
        /// `(key, value)` pairs.
        attrs: Vec<(String, String)>,
        /// Child nodes in document order.
        children: Vec<DocumentNode>,
    },
    /// Raw text.
    Text(String),
    /// The document root, comments, doctypes and the like.
    Other(Vec<DocumentNode>),
}

impl DocumentNode {
    /// Returns the child nodes, empty for text.
    pub fn children(&self) -> &[DocumentNode] {
        match self {
            DocumentNode::Element { children, .. } | DocumentNode::Other(children) => children,
            DocumentNode::Text(_) => &[],
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<DocumentNode>> {
        match self {
            DocumentNode::Element { children, .. } | DocumentNode::Other(children) => {
                Some(children)
            }
            DocumentNode::Text(_) => None,
        }
    }

    fn take_children(&mut self) -> Vec<DocumentNode> {
        self.children_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Copies the node itself, without children.
    fn shell(handle: &Handle) -> DocumentNode {
        match &handle.data {
            NodeData::Element { name, attrs, .. } => DocumentNode::Element {
                tag: name.local.to_string(),
                attrs: attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect(),
                children: Vec::new(),
            },
            NodeData::Text { contents } => DocumentNode::Text(contents.borrow().to_string()),
            _ => DocumentNode::Other(Vec::new()),
        }
    }
}

/// A parsed HTML document.
#[derive(Debug)]
pub struct Document {
    root: DocumentNode,
}

impl Document {
    /// Parses `html` as a full document, the way a browser would.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Html`] if the parser cannot read the input.
    pub fn parse(html: &str) -> Result<Self> {
        let dom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .map_err(Error::Html)?;

        Ok(Document {
            root: convert(&dom.document),
        })
    }

    /// Wraps an already built tree.
    pub fn from_root(root: DocumentNode) -> Self {
        Document { root }
    }

    /// Returns the root node.
    pub fn root(&self) -> &DocumentNode {
        &self.root
    }
}

// deep trees would otherwise overflow the stack on drop
impl Drop for Document {
    fn drop(&mut self) {
        let mut pending = self.root.take_children();
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.take_children());
        }
    }
}

/// Copies the parser's tree into owned nodes, depth-first, without recursion.
///
/// A `template` element's content fragment is kept as its children.
fn convert(root: &Handle) -> DocumentNode {
    struct Frame {
        children: Vec<Handle>,
        next: usize,
        node: DocumentNode,
    }

    impl Frame {
        fn new(handle: &Handle) -> Self {
            let mut children = handle.children.borrow().clone();
            if let NodeData::Element {
                template_contents, ..
            } = &handle.data
            {
                if let Some(fragment) = template_contents.borrow().as_ref() {
                    children.extend(fragment.children.borrow().iter().cloned());
                }
            }
            Frame {
                children,
                next: 0,
                node: DocumentNode::shell(handle),
            }
        }
    }

    let mut stack = vec![Frame::new(root)];
    while let Some(frame) = stack.last_mut() {
        if let Some(child) = frame.children.get(frame.next) {
            frame.next += 1;
            let child = Frame::new(child);
            stack.push(child);
            continue;
        }

        let Some(done) = stack.pop() else { break };
        match stack.last_mut() {
            Some(parent) => {
                if let Some(children) = parent.node.children_mut() {
                    children.push(done.node);
                }
            }
            None => return done.node,
        }
    }

    DocumentNode::Other(Vec::new())
}

/// Renders status HTML as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentExtractor {
    br_attribute_newline: bool,
}

impl ContentExtractor {
    /// An extractor with the canonical, `href`-only behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also writes a newline for every attribute named `br` on a `p` element.
    ///
    /// Matches the output of older releases; off by default.
    #[must_use]
    pub fn with_br_attribute_newline(mut self, enabled: bool) -> Self {
        self.br_attribute_newline = enabled;
        self
    }

    /// Parses `html` and flattens it to text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Html`] if `html` cannot be parsed.
    pub fn extract(&self, html: &str) -> Result<String> {
        let document = Document::parse(html)?;
        Ok(self.render(document.root()))
    }

    /// Flattens an already parsed tree, depth-first in document order.
    pub fn render(&self, root: &DocumentNode) -> String {
        let mut out = String::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            match node {
                DocumentNode::Element {
                    tag,
                    attrs,
                    children,
                } => {
                    if tag == "p" {
                        self.paragraph_attrs(attrs, &mut out);
                    }
                    stack.extend(children.iter().rev());
                }
                DocumentNode::Text(text) => out.push_str(text),
                DocumentNode::Other(children) => stack.extend(children.iter().rev()),
            }
        }

        out
    }

    fn paragraph_attrs(&self, attrs: &[(String, String)], out: &mut String) {
        for (key, value) in attrs {
            match key.as_str() {
                "href" => {
                    out.push_str(value);
                    out.push(' ');
                }
                "br" if self.br_attribute_newline => out.push('\n'),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> String {
        ContentExtractor::new().extract(html).unwrap()
    }

    fn element(tag: &str, attrs: &[(&str, &str)], children: Vec<DocumentNode>) -> DocumentNode {
        DocumentNode::Element {
            tag: tag.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            children,
        }
    }

    fn text(s: &str) -> DocumentNode {
        DocumentNode::Text(s.to_string())
    }

    #[test]
    fn text_only_is_verbatim() {
        assert_eq!(extract("plain text,  kept   as is"), "plain text,  kept   as is");
        assert_eq!(extract("two\nlines"), "two\nlines");
        assert_eq!(extract(""), "");
    }

    #[test]
    fn template_content_is_text_too() {
        assert_eq!(extract("<template>hidden</template>after"), "hiddenafter");
        assert_eq!(
            extract(r#"<template><p href="http://t">in</p></template>out"#),
            "http://t inout"
        );
    }

    #[test]
    fn paragraph_href_comes_first() {
        assert_eq!(
            extract(r#"<p href="http://x">hello</p> world"#),
            "http://x hello world"
        );
    }

    #[test]
    fn other_tags_never_emit_attributes() {
        assert_eq!(
            extract(r#"<a href="https://social.example/@bob">link</a> <span class="c" href="y">t</span>"#),
            "link t"
        );
    }

    #[test]
    fn mastodon_mention_markup() {
        let html = concat!(
            r#"<p>Hello <span class="h-card"><a href="https://social.example/@bob" class="u-url mention">"#,
            r#"@<span>bob</span></a></span> how are you?</p><p>second</p>"#
        );
        assert_eq!(extract(html), "Hello @bob how are you?second");
    }

    #[test]
    fn br_attribute_only_counts_when_enabled() {
        let html = r#"<p br="" href="u">line</p>"#;
        assert_eq!(extract(html), "u line");
        assert_eq!(
            ContentExtractor::new()
                .with_br_attribute_newline(true)
                .extract(html)
                .unwrap(),
            "\nu line"
        );
    }

    #[test]
    fn render_walks_pre_order() {
        let root = DocumentNode::Other(vec![
            element(
                "p",
                &[("class", "x"), ("href", "one")],
                vec![text("a"), element("b", &[("href", "no")], vec![text("b")])],
            ),
            text("c"),
            element("p", &[], vec![text("d")]),
        ]);
        assert_eq!(ContentExtractor::new().render(&root), "one abcd");
    }

    #[test]
    fn parsed_tree_keeps_paragraph_attributes() {
        let document = Document::parse(r#"<p href="http://x">hello</p>"#).unwrap();
        let mut stack = vec![document.root()];
        let mut found = None;
        while let Some(node) = stack.pop() {
            if let DocumentNode::Element { tag, attrs, .. } = node {
                if tag == "p" {
                    found = Some(attrs.clone());
                }
            }
            stack.extend(node.children());
        }
        assert_eq!(
            found,
            Some(vec![("href".to_string(), "http://x".to_string())])
        );
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let depth = 50_000;
        let html = format!("{}deep{}", "<span>".repeat(depth), "</span>".repeat(depth));
        assert_eq!(extract(&html), "deep");

        let mut node = text("bottom");
        for _ in 0..depth {
            node = element("div", &[], vec![node]);
        }
        let document = Document::from_root(node);
        assert_eq!(ContentExtractor::new().render(document.root()), "bottom");
    }
}
