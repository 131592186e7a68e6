//! Document tree consumed by the LaTeX renderer.
//!
//! Any Markdown parser can produce this structure; the bundled
//! [`parse_markdown`](crate::parse_markdown) builds it from pulldown-cmark
//! events. Children keep document order and attributes keep insertion order.

use indexmap::IndexMap;

/// Element kinds understood by the renderer.
///
/// Anything the renderer has no rule for is carried as [`ElementKind::Generic`]
/// and rendered as the concatenation of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Root container produced by the parser
    Document,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    UnorderedList,
    OrderedList,
    ListItem,
    Paragraph,
    /// Hard line break inside a paragraph
    LineBreak,
    Bold,
    Italic,
    InlineCode,
    Link,
    Image,
    Table,
    TableRow,
    TableCell,
    /// Verbatim code block
    CodeBlock,
    /// Inline or display math (`display="true"`), emitted with raw `$` delimiters
    Math,
    /// Any other element, identified by its tag name
    Generic(String),
}

impl ElementKind {
    /// Short tag name used by filters (`h1`, `ul`, `li`, ...)
    pub fn name(&self) -> &str {
        match self {
            ElementKind::Document => "document",
            ElementKind::Heading1 => "h1",
            ElementKind::Heading2 => "h2",
            ElementKind::Heading3 => "h3",
            ElementKind::Heading4 => "h4",
            ElementKind::UnorderedList => "ul",
            ElementKind::OrderedList => "ol",
            ElementKind::ListItem => "li",
            ElementKind::Paragraph => "p",
            ElementKind::LineBreak => "br",
            ElementKind::Bold => "strong",
            ElementKind::Italic => "em",
            ElementKind::InlineCode => "code",
            ElementKind::Link => "a",
            ElementKind::Image => "img",
            ElementKind::Table => "table",
            ElementKind::TableRow => "tr",
            ElementKind::TableCell => "td",
            ElementKind::CodeBlock => "pre",
            ElementKind::Math => "math",
            ElementKind::Generic(name) => name.as_str(),
        }
    }

    /// Inverse of [`ElementKind::name`]; unknown names become `Generic`
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        match lower.as_str() {
            "document" => ElementKind::Document,
            "h1" => ElementKind::Heading1,
            "h2" => ElementKind::Heading2,
            "h3" => ElementKind::Heading3,
            "h4" => ElementKind::Heading4,
            "ul" => ElementKind::UnorderedList,
            "ol" => ElementKind::OrderedList,
            "li" => ElementKind::ListItem,
            "p" => ElementKind::Paragraph,
            "br" => ElementKind::LineBreak,
            "strong" | "b" => ElementKind::Bold,
            "em" | "i" => ElementKind::Italic,
            "code" => ElementKind::InlineCode,
            "a" => ElementKind::Link,
            "img" => ElementKind::Image,
            "table" => ElementKind::Table,
            "tr" => ElementKind::TableRow,
            "td" | "th" => ElementKind::TableCell,
            "pre" => ElementKind::CodeBlock,
            "math" => ElementKind::Math,
            _ => ElementKind::Generic(lower),
        }
    }
}

/// An element with a kind, attributes and ordered children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Concatenated text of all descendant text leaves
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Depth-first search over descendant elements (self excluded)
    pub fn descendants(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_descendants(self, &mut found);
        found
    }
}

fn collect_text(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

fn collect_descendants<'a>(element: &'a Element, found: &mut Vec<&'a Element>) {
    for child in element.element_children() {
        found.push(child);
        collect_descendants(child, found);
    }
}

/// A node of the document tree: a raw text leaf or an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    /// Create a new element node
    pub fn element(kind: ElementKind) -> Self {
        Node::Element(Element::new(kind))
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(kind: ElementKind, attrs: Vec<(&str, &str)>) -> Self {
        let mut element = Element::new(kind);
        for (name, value) in attrs {
            element.set_attr(name, value);
        }
        Node::Element(element)
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Element kind, `None` for text
    pub fn kind(&self) -> Option<&ElementKind> {
        self.as_element().map(|e| &e.kind)
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element()?.attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute; ignored on text nodes
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Node::Element(element) = self {
            element.set_attr(name, value);
        }
    }

    /// Get all child nodes (none for text)
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.as_element().into_iter().flat_map(|e| e.children.iter())
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children().filter_map(Node::as_element)
    }

    /// Add a child node; ignored on text nodes
    pub fn add_child(&mut self, child: Node) {
        if let Node::Element(element) = self {
            element.add_child(child);
        }
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.text_content(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}
