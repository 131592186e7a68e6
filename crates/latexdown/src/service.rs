//! LatexService - the main entry point for Markdown to LaTeX conversion.

#[cfg(feature = "markdown")]
use std::path::Path;

use tracing::debug;

use crate::node::{Element, Node};
use crate::rules::{latex, Filter, Rule, Rules};
use crate::utilities::{escape_latex, restore_math};
#[cfg(feature = "markdown")]
use crate::{LatexError, Result};

/// Options for the Markdown parsing step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse GFM pipe tables
    pub tables: bool,

    /// Parse `~~strikethrough~~` (rendered as plain text)
    pub strikethrough: bool,

    /// Parse `$…$` and `$$…$$` as math so the delimiters bypass escaping
    pub math: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            math: true,
        }
    }
}

/// Options for LatexService
#[derive(Debug, Clone)]
pub struct LatexOptions {
    /// Options handed to the Markdown parser
    pub parse: ParseOptions,

    /// Float placement specifier for figures and tables (`h`, `htbp`, ...)
    pub float_placement: String,

    /// Rewrite `$…$`/`$$…$$` spans to `\(…\)`/`\[…\]` after rendering
    pub restore_math: bool,
}

impl Default for LatexOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            float_placement: "h".to_string(),
            restore_math: true,
        }
    }
}

/// The main service for converting Markdown to LaTeX
pub struct LatexService {
    options: LatexOptions,
    rules: Rules,
}

impl LatexService {
    /// Create a new LatexService with default options
    pub fn new() -> Self {
        Self {
            options: LatexOptions::default(),
            rules: Rules::new(),
        }
    }

    /// Create a LatexService with custom options
    pub fn with_options(options: LatexOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Convert a Markdown string to a LaTeX body fragment
    #[cfg(feature = "markdown")]
    pub fn convert(&self, markdown: &str) -> Result<String> {
        let document = crate::markdown::parse_markdown(markdown, &self.options.parse);
        self.render(&document)
    }

    /// Convert a Markdown file, writing the LaTeX fragment to `output`.
    ///
    /// The input is read and converted completely before the output file is
    /// created, so a failed read never leaves a partial file behind. An output
    /// path equal to the input (e.g. `notes.tex` with the default output) is
    /// rejected.
    #[cfg(feature = "markdown")]
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<()> {
        if input.file_name().is_none() {
            return Err(LatexError::InvalidInput(format!(
                "input path has no file name: {}",
                input.display()
            )));
        }
        if input == output {
            return Err(LatexError::InvalidInput(format!(
                "output would overwrite the input: {}",
                input.display()
            )));
        }

        let markdown = std::fs::read_to_string(input).map_err(|source| LatexError::Io {
            path: input.to_path_buf(),
            source,
        })?;

        let latex = self.convert(&markdown)?;

        std::fs::write(output, latex).map_err(|source| LatexError::Io {
            path: output.to_path_buf(),
            source,
        })?;

        debug!(input = %input.display(), output = %output.display(), "converted file");
        Ok(())
    }

    /// Render a document tree, then restore math spans over the whole output
    pub fn render(&self, node: &Node) -> crate::Result<String> {
        let rendered = self.process_node(node);
        debug!(bytes = rendered.len(), "rendered document");

        if self.options.restore_math {
            Ok(restore_math(&rendered))
        } else {
            Ok(rendered)
        }
    }

    /// Add a custom rule
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Remove elements matching the filter, subtree included
    pub fn remove(&mut self, filter: Filter) -> &mut Self {
        self.rules.remove(filter);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Escape LaTeX special characters in a string
    pub fn escape(&self, text: &str) -> String {
        escape_latex(text)
    }

    /// Get the current options
    pub fn options(&self) -> &LatexOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut LatexOptions {
        &mut self.options
    }

    fn process_node(&self, node: &Node) -> String {
        latex::render_node(node, &|element: &Element| self.process_element(element))
    }

    /// Process a single element
    fn process_element(&self, element: &Element) -> String {
        if self.rules.should_remove(element, &self.options) {
            return String::new();
        }

        let render = |child: &Element| self.process_element(child);

        // Custom rules receive the rendered children
        if let Some(rule) = self.rules.for_element(element, &self.options) {
            let content = latex::render_children(element, &render);
            return rule.apply(element, &content, &self.options);
        }

        latex::render_element(element, &self.options, &render)
    }
}

impl Default for LatexService {
    fn default() -> Self {
        Self::new()
    }
}
