//! End-to-end conversion tests.

use std::fs;

use latexdown::{LatexError, LatexOptions, LatexService, ParseOptions};
use pretty_assertions::assert_eq;

#[test]
fn test_title_and_bold_paragraph() {
    let service = LatexService::new();
    let latex = service.convert("# Title\n\nSome **bold** text.").unwrap();

    let chapter = latex.find("\\chapter{Title}").expect("chapter command");
    let paragraph = latex
        .find("Some \\textbf{bold} text.\n\n")
        .expect("paragraph with bold");
    assert!(chapter < paragraph);
    assert!(latex.ends_with("\n\n"));
}

#[test]
fn test_document_with_every_block() {
    let input = "\
# Report

## Method & Data

Items:

- first
- second

1. one
2. two

| Name | Score |
|------|-------|
| Ada  | 10%   |

```
let a_b = 1;
```

![Plot](plot.png)
";
    let service = LatexService::new();
    let latex = service.convert(input).unwrap();

    let expected = "\
\\chapter{Report}
\\section{Method \\& Data}
Items:

\\begin{itemize}
\\item first
\\item second
\\end{itemize}
\\begin{enumerate}
\\item one
\\item two
\\end{enumerate}
\\begin{table}[h]
\\centering
\\begin{tabular}{cc}
\\hline
Name & Score \\\\
\\hline
Ada & 10\\% \\\\
\\hline
\\end{tabular}
\\end{table}
\\begin{verbatim}
let a_b = 1;
\\end{verbatim}
\\begin{figure}[h]
\\centering
\\includegraphics[width=\\textwidth]{plot.png}
\\label{Plot}
\\end{figure}

";
    assert_eq!(latex, expected);
}

#[test]
fn test_math_restoration_end_to_end() {
    let service = LatexService::new();
    let latex = service
        .convert("Energy $$x^2$$ then $y$ for $5.")
        .unwrap();
    assert_eq!(latex, "Energy \\[x^2\\] then \\(y\\) for \\$5.\n\n");
}

#[test]
fn test_math_disabled_escapes_dollars() {
    let options = LatexOptions {
        parse: ParseOptions {
            math: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let service = LatexService::with_options(options);
    let latex = service.convert("Pay $5 or $6").unwrap();
    assert_eq!(latex, "Pay \\$5 or \\$6\n\n");
}

#[test]
fn test_heading_flattens_but_paragraph_nests() {
    let service = LatexService::new();
    let latex = service
        .convert("### A *nested* title\n\nA *nested* body")
        .unwrap();
    assert!(latex.contains("\\subsection{A nested title}"));
    assert!(latex.contains("A \\textit{nested} body"));
}

#[test]
fn test_linked_image() {
    let service = LatexService::new();
    let latex = service
        .convert("[![](badge.svg)](https://example.com/a_b)")
        .unwrap();
    assert!(latex.starts_with("\\href{https://example.com/a_b}{\\begin{figure}[h]"));
    assert!(latex.contains("{badge.svg}"));
    assert!(!latex.contains("\\label"));
}

#[test]
fn test_convert_file_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.md");
    let output = latexdown::default_output_path(&input);
    fs::write(&input, "#### Deep\n\n`a_b`").unwrap();

    LatexService::new().convert_file(&input, &output).unwrap();

    assert_eq!(output, dir.path().join("notes.tex"));
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, "\\subsubsection{Deep}\n\\texttt{a\\_b}\n\n");
}

#[test]
fn test_convert_file_missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.md");
    let output = dir.path().join("missing.tex");

    let err = LatexService::new()
        .convert_file(&input, &output)
        .unwrap_err();

    assert!(matches!(err, LatexError::Io { ref path, .. } if path == &input));
    assert!(!output.exists());
}

#[test]
fn test_convert_file_refuses_to_overwrite_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("draft.tex");
    fs::write(&input, "# Keep me").unwrap();
    let output = latexdown::default_output_path(&input);

    let err = LatexService::new()
        .convert_file(&input, &output)
        .unwrap_err();

    assert!(matches!(err, LatexError::InvalidInput(_)));
    assert_eq!(fs::read_to_string(&input).unwrap(), "# Keep me");
}

#[test]
fn test_comparison_operators_around_math() {
    let service = LatexService::new();
    assert_eq!(
        service.convert("pair <$x$>").unwrap(),
        "pair $<$\\(x\\)$>$\n\n"
    );
    assert_eq!(
        service.convert("Use `>>>` prompts").unwrap(),
        "Use \\texttt{$>$$>$$>$} prompts\n\n"
    );
    assert_eq!(
        service.convert("bash `a <<< b`").unwrap(),
        "bash \\texttt{a $<$$<$$<$ b}\n\n"
    );
}

#[test]
fn test_code_block_dollars_untouched() {
    let service = LatexService::new();
    let latex = service.convert("```\necho $HOME $PATH\n```\n").unwrap();
    assert_eq!(
        latex,
        "\\begin{verbatim}\necho $HOME $PATH\n\\end{verbatim}\n"
    );
}

#[test]
fn test_hard_break_and_list_start() {
    let service = LatexService::new();
    assert_eq!(
        service.convert("line one  \nline two").unwrap(),
        "line one\\\\\nline two\n\n"
    );
    assert_eq!(
        service.convert("3. three\n4. four").unwrap(),
        "\\begin{enumerate}\n\\setcounter{enumi}{2}\n\\item three\n\\item four\n\\end{enumerate}\n"
    );
}
