//! Escaping, math restoration and small helpers shared by the rules.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// LaTeX substitutions, applied in this order.
///
/// The backslash must come first so later replacements are not re-escaped,
/// and `<`/`>` come after `$` because their replacements introduce dollars.
pub const LATEX_ESCAPES: &[(&str, &str)] = &[
    ("\\", "\\textbackslash{}"),
    ("&", "\\&"),
    ("%", "\\%"),
    ("$", "\\$"),
    ("#", "\\#"),
    ("_", "\\_"),
    ("~", "\\textasciitilde{}"),
    ("^", "\\^{}"),
    ("<", "$<$"),
    (">", "$>$"),
];

/// Extension used for derived output paths
pub const OUTPUT_EXTENSION: &str = "tex";

/// Escape LaTeX special characters in literal text.
///
/// This is a plain substitution with no notion of existing escapes, so it is
/// not idempotent: escaping `\` twice yields `\textbackslash{}textbackslash{}`.
pub fn escape_latex(text: &str) -> String {
    LATEX_ESCAPES
        .iter()
        .fold(text.to_string(), |acc, &(from, to)| {
            if acc.contains(from) {
                acc.replace(from, to)
            } else {
                acc
            }
        })
}

// Verbatim blocks, escaped dollars and the `$<$`/`$>$` comparison tokens are
// matched as their own alternatives and kept as they are, so none of them
// opens, closes or sits inside a span.
static DISPLAY_MATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\\begin\{verbatim\}.*?\\end\{verbatim\}|\\\$|\$[<>]\$|\$\$((?:\\.|[^\\$])+?)\$\$")
        .expect("valid regex")
});
static INLINE_MATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\\begin\{verbatim\}.*?\\end\{verbatim\}|\\\$|\$[<>]\$|\$((?:\\.|[^\\$])+?)\$")
        .expect("valid regex")
});

/// Rewrite `$$…$$` spans to `\[…\]`, then remaining `$…$` spans to `\(…\)`.
///
/// Both passes take the shortest span, so `$$a$$ $$b$$` yields two display
/// blocks. Runs once over the complete rendered document.
pub fn restore_math(rendered: &str) -> String {
    let display = rewrite_spans(&DISPLAY_MATH, rendered, "\\[", "\\]");
    rewrite_spans(&INLINE_MATH, &display, "\\(", "\\)").into_owned()
}

fn rewrite_spans<'t>(pattern: &Regex, text: &'t str, open: &str, close: &str) -> Cow<'t, str> {
    pattern.replace_all(text, |caps: &Captures| match caps.get(1) {
        Some(inner) => format!("{}{}{}", open, inner.as_str(), close),
        None => caps[0].to_string(),
    })
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Default output path: the input path with its extension replaced by `.tex`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_latex("Hello World 123"), "Hello World 123");
        assert_eq!(escape_latex(""), "");
    }

    #[test]
    fn test_escape_each_special_character() {
        assert_eq!(escape_latex("\\"), "\\textbackslash{}");
        assert_eq!(escape_latex("&"), "\\&");
        assert_eq!(escape_latex("%"), "\\%");
        assert_eq!(escape_latex("$"), "\\$");
        assert_eq!(escape_latex("#"), "\\#");
        assert_eq!(escape_latex("_"), "\\_");
        assert_eq!(escape_latex("~"), "\\textasciitilde{}");
        assert_eq!(escape_latex("^"), "\\^{}");
        assert_eq!(escape_latex("<"), "$<$");
        assert_eq!(escape_latex(">"), "$>$");
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        let once = escape_latex("\\");
        assert_eq!(escape_latex(&once), "\\textbackslash{}textbackslash{}");

        // `<` becomes `$<$`, whose dollars are escaped on a second pass
        assert_eq!(escape_latex(&escape_latex("<")), "\\$$<$\\$");
    }

    #[test]
    fn test_escape_mixed() {
        assert_eq!(escape_latex("50% of $10 & #1"), "50\\% of \\$10 \\& \\#1");
        assert_eq!(escape_latex("snake_case a<b"), "snake\\_case a$<$b");
    }

    #[test]
    fn test_restore_display_then_inline() {
        assert_eq!(restore_math("$$x^2$$ and $y$"), "\\[x^2\\] and \\(y\\)");
    }

    #[test]
    fn test_restore_does_not_merge_spans() {
        assert_eq!(restore_math("$$a$$ $$b$$"), "\\[a\\] \\[b\\]");
        assert_eq!(restore_math("$a$ and $b$"), "\\(a\\) and \\(b\\)");
    }

    #[test]
    fn test_restore_multiline_display() {
        assert_eq!(
            restore_math("$$\n\\int_0^1 x\\,dx\n$$"),
            "\\[\n\\int_0^1 x\\,dx\n\\]"
        );
    }

    #[test]
    fn test_restore_ignores_escaped_dollars() {
        let escaped = escape_latex("costs $5 and $6");
        assert_eq!(restore_math(&escaped), escaped);
    }

    #[test]
    fn test_restore_keeps_comparison_tokens() {
        assert_eq!(restore_math(&escape_latex("a<b")), "a$<$b");
        assert_eq!(restore_math(&escape_latex(">>>")), "$>$$>$$>$");
        assert_eq!(restore_math(&escape_latex("a <<< b")), "a $<$$<$$<$ b");
    }

    #[test]
    fn test_restore_math_between_comparison_tokens() {
        let rendered = format!("{}$x$$$y$${}", escape_latex("<"), escape_latex(">"));
        assert_eq!(restore_math(&rendered), "$<$\\(x\\)\\[y\\]$>$");
    }

    #[test]
    fn test_restore_skips_verbatim() {
        let rendered = "\\begin{verbatim}\necho $HOME $PATH\n\\end{verbatim}\n$x$";
        assert_eq!(
            restore_math(rendered),
            "\\begin{verbatim}\necho $HOME $PATH\n\\end{verbatim}\n\\(x\\)"
        );
    }

    #[test]
    fn test_clean_attribute() {
        assert_eq!(clean_attribute(Some("  x.png ")), "x.png");
        assert_eq!(clean_attribute(Some("   ")), "");
        assert_eq!(clean_attribute(None), "");
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("notes/intro.md")),
            PathBuf::from("notes/intro.tex")
        );
        assert_eq!(
            default_output_path(Path::new("README")),
            PathBuf::from("README.tex")
        );
    }
}
