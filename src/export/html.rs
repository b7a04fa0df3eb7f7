//! HTML Output Generation
//!
//! Renders the document to HTML with the same comrak options the preview
//! parses with, either as a bare fragment or as a standalone page styled
//! from the active `PreviewColors`.

use crate::markdown::MarkdownOptions;
use crate::theme::PreviewColors;
use comrak::markdown_to_html;
use eframe::egui::Color32;

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Render markdown to an HTML fragment (no doctype, head or body).
///
/// Raw HTML in the source is omitted, matching what the preview does with it.
pub fn render_to_html(markdown: &str) -> String {
    render_to_html_with_options(markdown, &MarkdownOptions::default())
}

/// Render markdown to an HTML fragment using specific options.
pub fn render_to_html_with_options(markdown: &str, options: &MarkdownOptions) -> String {
    markdown_to_html(markdown, &options.to_comrak_options())
}

/// Generate a complete HTML page from markdown content.
///
/// The page inlines its CSS so it can be opened on its own.
pub fn generate_html_document(markdown: &str, title: &str, colors: &PreviewColors) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="Markview">
    <title>{title}</title>
    <style>
{base_css}
{theme_css}
    </style>
</head>
<body>
    <article class="markdown-body">
{body}
    </article>
</body>
</html>"#,
        title = html_escape(title),
        base_css = BASE_CSS,
        theme_css = generate_theme_css(colors),
        body = render_to_html(markdown),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Layout and typography shared by both palettes.
const BASE_CSS: &str = r#"
body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
}

.markdown-body {
    max-width: 860px;
    margin: 0 auto;
    padding: 32px 24px;
}

.markdown-body h1, .markdown-body h2 {
    border-bottom: 1px solid;
    padding-bottom: 0.3em;
}

.markdown-body code {
    font-family: 'JetBrains Mono', 'Consolas', monospace;
    font-size: 0.9em;
    padding: 0.2em 0.4em;
    border-radius: 4px;
}

.markdown-body pre {
    padding: 16px;
    overflow: auto;
    border-radius: 6px;
}

.markdown-body pre code {
    padding: 0;
    background: transparent;
}

.markdown-body blockquote {
    margin: 0 0 16px 0;
    padding: 0 1em;
    border-left: 4px solid;
}

.markdown-body table {
    border-collapse: collapse;
    margin-bottom: 16px;
}

.markdown-body th, .markdown-body td {
    padding: 6px 12px;
    border: 1px solid;
}

.markdown-body ul.contains-task-list {
    list-style-type: none;
    padding-left: 1em;
}

.markdown-body hr {
    height: 2px;
    border: none;
}
"#;

/// Palette-specific CSS.
fn generate_theme_css(colors: &PreviewColors) -> String {
    format!(
        r#"
:root {{ color-scheme: {color_scheme}; }}
body {{ background-color: {bg}; color: {text}; }}
.markdown-body h1, .markdown-body h2, .markdown-body h3,
.markdown-body h4, .markdown-body h5, .markdown-body h6 {{ color: {heading}; border-color: {hr}; }}
.markdown-body a {{ color: {link}; }}
.markdown-body blockquote {{ color: {quote_text}; border-left-color: {quote_border}; }}
.markdown-body code, .markdown-body pre {{ background-color: {code_bg}; color: {code_text}; }}
.markdown-body th, .markdown-body td {{ border-color: {hr}; }}
.markdown-body th {{ background-color: {table_header_bg}; }}
.markdown-body hr {{ background-color: {hr}; }}
"#,
        color_scheme = if colors.dark { "dark" } else { "light" },
        bg = color32_to_css(colors.background),
        text = color32_to_css(colors.text),
        heading = color32_to_css(colors.heading),
        link = color32_to_css(colors.link),
        quote_text = color32_to_css(colors.quote_text),
        quote_border = color32_to_css(colors.quote_border),
        code_bg = color32_to_css(colors.code_bg),
        code_text = color32_to_css(colors.code_text),
        table_header_bg = color32_to_css(colors.table_header_bg),
        hr = color32_to_css(colors.hr),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

fn color32_to_css(color: Color32) -> String {
    format!("rgb({}, {}, {})", color.r(), color.g(), color.b())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_emphasis() {
        let html = render_to_html("# Hello\n\n**bold** and _italic_");
        assert!(html.contains("<h1"));
        assert!(html.contains("Hello</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
        assert!(!html.contains("<!DOCTYPE"));
    }

    #[test]
    fn test_strikethrough() {
        assert!(render_to_html("~~gone~~").contains("<del>gone</del>"));
    }

    #[test]
    fn test_code_block_is_not_interpreted() {
        let html = render_to_html("```\nfunction f(){ **x** }\n```");
        assert!(html.contains("<pre><code>function f(){ **x** }"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_raw_html_is_omitted() {
        let html = render_to_html("<script>alert(1)</script>\n\ntext");
        assert!(!html.contains("<script>"));
        assert!(html.contains("text"));
    }

    #[test]
    fn test_gfm_extensions() {
        let html = render_to_html("- [x] done\n\n| a |\n|---|\n| b |\n\nhttps://example.com");
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("<table>"));
        assert!(html.contains("href=\"https://example.com\""));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_to_html(""), "");
    }

    #[test]
    fn test_generate_html_document() {
        let html = generate_html_document("# Test", "Notes & <Drafts>", &PreviewColors::light());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Notes &amp; &lt;Drafts&gt;</title>"));
        assert!(html.contains("<article class=\"markdown-body\">"));
        assert!(html.contains("color-scheme: light"));
        assert!(html.contains("Test</h1>"));
    }

    #[test]
    fn test_theme_css_dark() {
        let colors = PreviewColors::dark();
        let css = generate_theme_css(&colors);
        assert!(css.contains("color-scheme: dark"));
        assert!(css.contains(&color32_to_css(colors.background)));
    }

    #[test]
    fn test_color32_to_css() {
        assert_eq!(color32_to_css(Color32::from_rgb(255, 128, 64)), "rgb(255, 128, 64)");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"it's\""), "&quot;it&#39;s&quot;");
    }
}
