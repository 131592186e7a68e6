//! Built-in LaTeX rendering rules.

use crate::node::{Element, ElementKind, Node};
use crate::service::LatexOptions;
use crate::utilities::{clean_attribute, escape_latex};

/// Renders a child element, honoring custom and remove rules
pub(crate) type RenderFn<'a> = &'a dyn Fn(&Element) -> String;

/// Render an element with the built-in rules.
///
/// `render` is used for every child element so that user rules apply at any
/// depth. Unknown kinds fall through to their rendered children.
pub(crate) fn render_element(element: &Element, options: &LatexOptions, render: RenderFn) -> String {
    match &element.kind {
        ElementKind::Heading1 => command("chapter", &text_content(element)),
        ElementKind::Heading2 => command("section", &text_content(element)),
        ElementKind::Heading3 => command("subsection", &text_content(element)),
        ElementKind::Heading4 => command("subsubsection", &text_content(element)),
        ElementKind::UnorderedList => list("itemize", element, render, ""),
        ElementKind::OrderedList => list("enumerate", element, render, &enumerate_counter(element)),
        ElementKind::ListItem => format!("\\item {}", render_children(element, render)),
        ElementKind::Paragraph => format!("{}\n\n", render_children(element, render)),
        ElementKind::LineBreak => "\\\\\n".to_string(),
        ElementKind::Bold => command("textbf", &render_children(element, render)),
        ElementKind::Italic => command("textit", &render_children(element, render)),
        ElementKind::InlineCode => command("texttt", &text_content(element)),
        ElementKind::Link => link(element, render),
        ElementKind::Image => image(element, options),
        ElementKind::Table => table(element, options),
        ElementKind::CodeBlock => verbatim(element),
        ElementKind::Math => math(element),
        ElementKind::Document
        | ElementKind::TableRow
        | ElementKind::TableCell
        | ElementKind::Generic(_) => render_children(element, render),
    }
}

/// Render a single node; text leaves are escaped here and nowhere else
pub(crate) fn render_node(node: &Node, render: RenderFn) -> String {
    match node {
        Node::Text(text) => escape_latex(text),
        Node::Element(element) => render(element),
    }
}

/// Concatenate the rendered children, no separator
pub(crate) fn render_children(element: &Element, render: RenderFn) -> String {
    element
        .children()
        .map(|child| render_node(child, render))
        .collect()
}

/// Trimmed, escaped text of the whole subtree; nested markup is flattened
fn text_content(element: &Element) -> String {
    escape_latex(element.text_content().trim())
}

fn command(name: &str, body: &str) -> String {
    format!("\\{}{{{}}}", name, body)
}

fn list(environment: &str, element: &Element, render: RenderFn, prelude: &str) -> String {
    let items: Vec<String> = element
        .children()
        .map(|child| render_node(child, render))
        .collect();

    format!(
        "\\begin{{{env}}}\n{}{}\n\\end{{{env}}}",
        prelude,
        items.join("\n"),
        env = environment
    )
}

/// `\setcounter` line for lists that do not start at 1
fn enumerate_counter(element: &Element) -> String {
    match element.attr("start").and_then(|s| s.parse::<i64>().ok()) {
        Some(start) if start != 1 => format!("\\setcounter{{enumi}}{{{}}}\n", start - 1),
        _ => String::new(),
    }
}

fn link(element: &Element, render: RenderFn) -> String {
    let href = element.attr("href").unwrap_or_default();

    let images: Vec<&Element> = element
        .descendants()
        .into_iter()
        .filter(|e| e.kind == ElementKind::Image)
        .collect();

    let body = if images.is_empty() {
        text_content(element)
    } else {
        images.into_iter().map(render).collect()
    };

    format!("\\href{{{}}}{{{}}}", href, body)
}

fn image(element: &Element, options: &LatexOptions) -> String {
    let src = element.attr("src").unwrap_or_default();
    let alt = clean_attribute(element.attr("alt"));

    let mut out = format!(
        "\\begin{{figure}}[{}]\n\\centering\n\\includegraphics[width=\\textwidth]{{{}}}\n",
        options.float_placement, src
    );
    if !alt.is_empty() {
        out.push_str(&command("label", &escape_latex(&alt)));
        out.push('\n');
    }
    out.push_str("\\end{figure}");
    out
}

fn table(element: &Element, options: &LatexOptions) -> String {
    let rows: Vec<Vec<String>> = element
        .descendants()
        .into_iter()
        .filter(|e| e.kind == ElementKind::TableRow)
        .map(row_cells)
        .collect();

    let mut rows = rows.into_iter();
    // The first row is the header whatever its markup says; it also fixes
    // the column count for the whole table.
    let header = rows.next().unwrap_or_default();
    let column_spec = "c".repeat(header.len());
    let body: String = rows
        .map(|cells| format!("{} \\\\\n", cells.join(" & ")))
        .collect();

    format!(
        "\\begin{{table}}[{placement}]\n\\centering\n\\begin{{tabular}}{{{spec}}}\n\\hline\n{header} \\\\\n\\hline\n{body}\\hline\n\\end{{tabular}}\n\\end{{table}}",
        placement = options.float_placement,
        spec = column_spec,
        header = header.join(" & "),
        body = body,
    )
}

fn row_cells(row: &Element) -> Vec<String> {
    row.element_children()
        .filter(|e| e.kind == ElementKind::TableCell)
        .map(text_content)
        .collect()
}

fn verbatim(element: &Element) -> String {
    let code = element.text_content();
    format!(
        "\\begin{{verbatim}}\n{}\n\\end{{verbatim}}",
        code.trim_end_matches('\n')
    )
}

fn math(element: &Element) -> String {
    let tex = element.text_content();
    if element.attr("display") == Some("true") {
        format!("$${}$$", tex)
    } else {
        format!("${}$", tex)
    }
}
