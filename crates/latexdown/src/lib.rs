//! # latexdown
//!
//! Convert Markdown documents to LaTeX body fragments.
//!
//! ## Design
//!
//! Conversion runs in three steps:
//!
//! - **Parse**: Markdown is folded into a small [`Node`] tree. Any parser can
//!   produce this structure; the bundled one uses pulldown-cmark.
//! - **Render**: each element kind maps to a LaTeX fragment, children first.
//!   Text leaves are escaped at this point and attribute values (URLs, image
//!   paths) are used verbatim.
//! - **Restore math**: `$…$` and `$$…$$` spans in the finished output are
//!   rewritten to `\(…\)` and `\[…\]`.
//!
//! The output is a body fragment: no preamble, no `\documentclass`.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use latexdown::{ElementKind, LatexService, Node};
//!
//! let service = LatexService::new();
//!
//! let mut h2 = Node::element(ElementKind::Heading2);
//! h2.add_child(Node::text("Results & Discussion"));
//!
//! let latex = service.render(&h2).unwrap();
//! assert_eq!(latex, "\\section{Results \\& Discussion}");
//! ```
//!
//! ## Example (Markdown string)
//!
//! ```rust
//! use latexdown::LatexService;
//!
//! let service = LatexService::new();
//! let latex = service.convert("# Title\n\nSome **bold** text.").unwrap();
//! assert!(latex.contains("\\chapter{Title}"));
//! assert!(latex.contains("\\textbf{bold}"));
//! ```

#[cfg(feature = "markdown")]
pub mod markdown;
pub mod node;
mod rules;
mod service;
mod utilities;

use std::path::PathBuf;

#[cfg(feature = "markdown")]
pub use markdown::parse_markdown;
pub use node::{Element, ElementKind, Node};
pub use rules::{Filter, Rule, Rules};
pub use service::{LatexOptions, LatexService, ParseOptions};
pub use utilities::*;

/// Error type for latexdown operations
#[derive(Debug, thiserror::Error)]
pub enum LatexError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LatexError>;
