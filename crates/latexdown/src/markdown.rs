//! Markdown parsing support.
//!
//! Folds the pulldown-cmark event stream into the [`Node`] tree consumed by
//! the renderer. Top-level blocks other than paragraphs are followed by a
//! newline text node so that consecutive commands land on separate lines.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};
use tracing::{debug, trace};

use crate::node::{Element, ElementKind, Node};
use crate::service::ParseOptions;

/// Parse a Markdown string into a document tree.
///
/// # Example
///
/// ```rust
/// use latexdown::{parse_markdown, ElementKind, LatexService, ParseOptions};
///
/// let document = parse_markdown("# Hello *World*", &ParseOptions::default());
/// assert_eq!(document.kind(), Some(&ElementKind::Document));
///
/// let service = LatexService::new();
/// let latex = service.render(&document).unwrap();
/// assert!(latex.starts_with("\\chapter{Hello World}"));
/// ```
pub fn parse_markdown(input: &str, options: &ParseOptions) -> Node {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(input, parser_options(options)) {
        builder.push(event);
    }

    let document = builder.finish();
    debug!(
        input_bytes = input.len(),
        blocks = document.children.len(),
        "parsed markdown"
    );
    Node::Element(document)
}

fn parser_options(options: &ParseOptions) -> Options {
    let mut opts = Options::empty();
    if options.tables {
        opts.insert(Options::ENABLE_TABLES);
    }
    if options.strikethrough {
        opts.insert(Options::ENABLE_STRIKETHROUGH);
    }
    if options.math {
        opts.insert(Options::ENABLE_MATH);
    }
    opts
}

/// Stack of open elements; the bottom entry is the document root
struct TreeBuilder {
    stack: Vec<Element>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Element::new(ElementKind::Document)],
        }
    }

    fn push(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(),
            Event::Text(text) => self.append(Node::text(&text)),
            Event::Code(code) => {
                let mut element = Element::new(ElementKind::InlineCode);
                element.add_child(Node::text(&code));
                self.append(element.into());
            }
            Event::InlineMath(tex) => self.append(math(&tex, false)),
            Event::DisplayMath(tex) => self.append(math(&tex, true)),
            Event::SoftBreak => self.append(Node::text("\n")),
            Event::HardBreak => self.append(Node::element(ElementKind::LineBreak)),
            Event::Rule => self.append_element(generic("hr")),
            Event::TaskListMarker(checked) => {
                self.append(Node::text(if checked { "[x] " } else { "[ ] " }))
            }
            other => trace!(event = ?other, "dropping unsupported event"),
        }
    }

    fn open(&mut self, tag: Tag) {
        let element = match tag {
            Tag::Paragraph => Element::new(ElementKind::Paragraph),
            Tag::Heading { level, .. } => Element::new(heading_kind(level)),
            Tag::List(None) => Element::new(ElementKind::UnorderedList),
            Tag::List(Some(start)) => {
                let mut list = Element::new(ElementKind::OrderedList);
                if start != 1 {
                    list.set_attr("start", &start.to_string());
                }
                list
            }
            Tag::Item => Element::new(ElementKind::ListItem),
            Tag::Emphasis => Element::new(ElementKind::Italic),
            Tag::Strong => Element::new(ElementKind::Bold),
            Tag::Strikethrough => generic("del"),
            Tag::CodeBlock(_) => Element::new(ElementKind::CodeBlock),
            Tag::Link { dest_url, .. } => {
                let mut link = Element::new(ElementKind::Link);
                link.set_attr("href", &dest_url);
                link
            }
            Tag::Image { dest_url, .. } => {
                let mut image = Element::new(ElementKind::Image);
                image.set_attr("src", &dest_url);
                image
            }
            Tag::Table(_) => Element::new(ElementKind::Table),
            Tag::TableHead => {
                let mut row = Element::new(ElementKind::TableRow);
                row.set_attr("header", "true");
                row
            }
            Tag::TableRow => Element::new(ElementKind::TableRow),
            Tag::TableCell => Element::new(ElementKind::TableCell),
            Tag::BlockQuote(_) => generic("blockquote"),
            Tag::HtmlBlock => generic("html"),
            Tag::FootnoteDefinition(_) => generic("footnote"),
            Tag::DefinitionList => generic("dl"),
            Tag::DefinitionListTitle => generic("dt"),
            Tag::DefinitionListDefinition => generic("dd"),
            Tag::MetadataBlock(_) => generic("metadata"),
        };

        // Nested blocks inside a list item start on their own line
        if is_nested_block(&element.kind) {
            if let Some(parent) = self.stack.last_mut() {
                if parent.kind == ElementKind::ListItem && !parent.children.is_empty() {
                    parent.add_child(Node::text("\n"));
                }
            }
        }

        self.stack.push(element);
    }

    fn close(&mut self) {
        // The root is never closed by an event
        if self.stack.len() <= 1 {
            return;
        }
        let Some(mut element) = self.stack.pop() else {
            return;
        };

        // Alt text arrives as child events; keep it as an attribute only
        if element.kind == ElementKind::Image {
            let alt = element.text_content();
            element.children.clear();
            element.set_attr("alt", &alt);
        }

        self.append_element(element);
    }

    fn append_element(&mut self, element: Element) {
        let top_level = self.stack.len() == 1;
        let separate = top_level && element.kind != ElementKind::Paragraph;
        self.append(element.into());
        if separate {
            self.append(Node::text("\n"));
        }
    }

    /// Append to the innermost open element, merging adjacent text
    fn append(&mut self, node: Node) {
        let Some(parent) = self.stack.last_mut() else {
            return;
        };

        if let (Node::Text(new), Some(Node::Text(last))) = (&node, parent.children.last_mut()) {
            last.push_str(new);
            return;
        }
        parent.add_child(node);
    }

    /// Close anything left open and return the document root
    fn finish(mut self) -> Element {
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack
            .pop()
            .unwrap_or_else(|| Element::new(ElementKind::Document))
    }
}

fn heading_kind(level: HeadingLevel) -> ElementKind {
    match level {
        HeadingLevel::H1 => ElementKind::Heading1,
        HeadingLevel::H2 => ElementKind::Heading2,
        HeadingLevel::H3 => ElementKind::Heading3,
        HeadingLevel::H4 => ElementKind::Heading4,
        HeadingLevel::H5 => ElementKind::Generic("h5".to_string()),
        HeadingLevel::H6 => ElementKind::Generic("h6".to_string()),
    }
}

fn is_nested_block(kind: &ElementKind) -> bool {
    matches!(
        kind,
        ElementKind::UnorderedList | ElementKind::OrderedList | ElementKind::CodeBlock
    )
}

fn math(tex: &str, display: bool) -> Node {
    let mut element = Element::new(ElementKind::Math);
    if display {
        element.set_attr("display", "true");
    }
    element.add_child(Node::text(tex));
    element.into()
}

/// Element without a dedicated kind, rendered as its children
fn generic(name: &str) -> Element {
    Element::new(ElementKind::Generic(name.to_string()))
}
