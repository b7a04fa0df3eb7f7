//! Markdown parser implementation using comrak
//!
//! This module wraps comrak's parser and converts its arena-allocated AST
//! into an owned tree (`MarkdownDocument`) that the preview pane can keep
//! between frames and compare for equality.
//!
//! Parsing is total: comrak accepts every input, degrading unrecognised or
//! malformed syntax to literal text, so there is no error path here.

use comrak::{
    nodes::{
        AstNode, ListDelimType, ListType as ComrakListType, NodeValue,
        TableAlignment as ComrakTableAlignment,
    },
    parse_document, Arena, Options,
};

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown parsing and rendering.
///
/// The defaults enable the GitHub Flavored Markdown extensions: tables,
/// strikethrough, autolinks and task lists, plus GFM footnotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Enable footnotes
    pub footnotes: bool,
    /// Enable front matter with the given delimiter
    pub front_matter_delimiter: Option<String>,
    /// Pass raw HTML through to HTML output instead of omitting it
    pub allow_raw_html: bool,
    /// Generate GitHub-style heading anchors in HTML output
    pub header_ids: Option<String>,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            footnotes: true,
            front_matter_delimiter: None,
            allow_raw_html: false,
            header_ids: Some(String::new()),
        }
    }
}

impl MarkdownOptions {
    /// Convert to comrak Options.
    pub(crate) fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();

        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.extension.footnotes = self.footnotes;
        options.extension.front_matter_delimiter = self.front_matter_delimiter.clone();
        options.extension.header_ids = self.header_ids.clone();

        options.render.unsafe_ = self.allow_raw_html;

        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Structured Document Types
// ─────────────────────────────────────────────────────────────────────────────

/// Heading level (H1-H6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
    H4 = 4,
    H5 = 5,
    H6 = 6,
}

impl From<u8> for HeadingLevel {
    fn from(level: u8) -> Self {
        match level {
            1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            4 => HeadingLevel::H4,
            5 => HeadingLevel::H5,
            _ => HeadingLevel::H6,
        }
    }
}

impl HeadingLevel {
    /// Font size multiplier relative to body text.
    pub fn scale(self) -> f32 {
        match self {
            HeadingLevel::H1 => 2.0,
            HeadingLevel::H2 => 1.6,
            HeadingLevel::H3 => 1.35,
            HeadingLevel::H4 => 1.15,
            HeadingLevel::H5 => 1.05,
            HeadingLevel::H6 => 1.0,
        }
    }
}

/// List type (ordered or unordered)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    Bullet,
    Ordered { start: u32, delimiter: char },
}

/// Table cell alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableAlignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl From<ComrakTableAlignment> for TableAlignment {
    fn from(align: ComrakTableAlignment) -> Self {
        match align {
            ComrakTableAlignment::None => TableAlignment::None,
            ComrakTableAlignment::Left => TableAlignment::Left,
            ComrakTableAlignment::Center => TableAlignment::Center,
            ComrakTableAlignment::Right => TableAlignment::Right,
        }
    }
}

/// Represents the type of a markdown node.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkdownNodeType {
    /// Root document node
    Document,
    /// Block quote (>)
    BlockQuote,
    /// List container
    List { list_type: ListType, tight: bool },
    /// List item
    Item,
    /// GFM task list item (- [ ] / - [x])
    TaskItem { checked: bool },
    /// Fenced or indented code block
    CodeBlock {
        info: String,
        literal: String,
        fenced: bool,
    },
    /// HTML block, shown verbatim
    HtmlBlock(String),
    /// Paragraph
    Paragraph,
    /// Heading (H1-H6)
    Heading { level: HeadingLevel, setext: bool },
    /// Thematic break (horizontal rule)
    ThematicBreak,
    /// Table
    Table {
        alignments: Vec<TableAlignment>,
        num_columns: usize,
    },
    /// Table row
    TableRow { header: bool },
    /// Table cell
    TableCell,
    /// Inline text content
    Text(String),
    /// Soft line break
    SoftBreak,
    /// Hard line break
    LineBreak,
    /// Inline code
    Code(String),
    /// Inline HTML, shown verbatim
    HtmlInline(String),
    /// Emphasis (italic)
    Emphasis,
    /// Strong emphasis (bold)
    Strong,
    /// Strikethrough
    Strikethrough,
    /// Link
    Link { url: String, title: String },
    /// Image; children hold the alt text
    Image { url: String, title: String },
    /// Footnote reference
    FootnoteReference(String),
    /// Footnote definition
    FootnoteDefinition(String),
    /// Front matter block
    FrontMatter(String),
    /// Any node kind the preview does not draw specially; children are kept
    Other,
}

impl MarkdownNodeType {
    /// Whether this node type is a block-level container or leaf.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            MarkdownNodeType::Document
                | MarkdownNodeType::BlockQuote
                | MarkdownNodeType::List { .. }
                | MarkdownNodeType::Item
                | MarkdownNodeType::TaskItem { .. }
                | MarkdownNodeType::CodeBlock { .. }
                | MarkdownNodeType::HtmlBlock(_)
                | MarkdownNodeType::Paragraph
                | MarkdownNodeType::Heading { .. }
                | MarkdownNodeType::ThematicBreak
                | MarkdownNodeType::Table { .. }
                | MarkdownNodeType::TableRow { .. }
                | MarkdownNodeType::TableCell
                | MarkdownNodeType::FootnoteDefinition(_)
                | MarkdownNodeType::FrontMatter(_)
        )
    }
}

/// A node in the markdown AST with position information.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownNode {
    /// The type of this node
    pub node_type: MarkdownNodeType,
    /// Child nodes
    pub children: Vec<MarkdownNode>,
    /// Start line in source (1-indexed)
    pub start_line: usize,
    /// End line in source (1-indexed)
    pub end_line: usize,
}

impl MarkdownNode {
    fn new(node_type: MarkdownNodeType, start_line: usize, end_line: usize) -> Self {
        Self {
            node_type,
            children: Vec::new(),
            start_line,
            end_line,
        }
    }

    /// Get all text content from this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, output: &mut String) {
        match &self.node_type {
            MarkdownNodeType::Text(t) => output.push_str(t),
            MarkdownNodeType::Code(t) => output.push_str(t),
            MarkdownNodeType::SoftBreak => output.push(' '),
            MarkdownNodeType::LineBreak => output.push('\n'),
            _ => {}
        }
        for child in &self.children {
            child.collect_text(output);
        }
    }

    /// Depth-first search for the first node matching `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&MarkdownNode) -> bool) -> Option<&MarkdownNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }
}

/// A parsed markdown document: the structured form the preview pane draws.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownDocument {
    /// Root node of the AST
    pub root: MarkdownNode,
}

impl MarkdownDocument {
    /// An empty document, equivalent to parsing `""`.
    pub fn empty() -> Self {
        Self {
            root: MarkdownNode::new(MarkdownNodeType::Document, 1, 0),
        }
    }

    /// Whether the document has no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Top-level blocks of the document.
    pub fn blocks(&self) -> &[MarkdownNode] {
        &self.root.children
    }
}

impl Default for MarkdownDocument {
    fn default() -> Self {
        Self::empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Parse markdown text into a structured document using the GFM defaults.
///
/// # Example
/// ```ignore
/// let doc = parse_markdown("# Hello\n\nWorld");
/// assert_eq!(doc.blocks().len(), 2);
/// ```
pub fn parse_markdown(markdown: &str) -> MarkdownDocument {
    parse_markdown_with_options(markdown, &MarkdownOptions::default())
}

/// Parse markdown text with custom options.
pub fn parse_markdown_with_options(markdown: &str, options: &MarkdownOptions) -> MarkdownDocument {
    let arena = Arena::new();
    let comrak_options = options.to_comrak_options();

    let root = parse_document(&arena, markdown, &comrak_options);

    MarkdownDocument {
        root: convert_node(root),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal Conversion Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a comrak AST node to our MarkdownNode structure.
fn convert_node<'a>(node: &'a AstNode<'a>) -> MarkdownNode {
    let ast = node.data.borrow();
    let sourcepos = ast.sourcepos;

    let node_type = convert_node_value(&ast.value);
    let mut markdown_node = MarkdownNode::new(node_type, sourcepos.start.line, sourcepos.end.line);

    for child in node.children() {
        markdown_node
            .children
            .push(convert_node(child));
    }

    markdown_node
}

/// Convert a comrak NodeValue to our MarkdownNodeType.
fn convert_node_value(value: &NodeValue) -> MarkdownNodeType {
    match value {
        NodeValue::Document => MarkdownNodeType::Document,
        NodeValue::BlockQuote => MarkdownNodeType::BlockQuote,
        NodeValue::List(list) => {
            let list_type = match list.list_type {
                ComrakListType::Bullet => ListType::Bullet,
                ComrakListType::Ordered => ListType::Ordered {
                    start: list.start as u32,
                    delimiter: if list.delimiter == ListDelimType::Period {
                        '.'
                    } else {
                        ')'
                    },
                },
            };
            MarkdownNodeType::List {
                list_type,
                tight: list.tight,
            }
        }
        NodeValue::Item(_) => MarkdownNodeType::Item,
        NodeValue::TaskItem(checked) => MarkdownNodeType::TaskItem {
            checked: checked.map(|c| c == 'x' || c == 'X').unwrap_or(false),
        },
        NodeValue::CodeBlock(code) => MarkdownNodeType::CodeBlock {
            info: code.info.clone(),
            literal: code.literal.clone(),
            fenced: code.fenced,
        },
        NodeValue::HtmlBlock(html) => MarkdownNodeType::HtmlBlock(html.literal.clone()),
        NodeValue::Paragraph => MarkdownNodeType::Paragraph,
        NodeValue::Heading(heading) => MarkdownNodeType::Heading {
            level: HeadingLevel::from(heading.level),
            setext: heading.setext,
        },
        NodeValue::ThematicBreak => MarkdownNodeType::ThematicBreak,
        NodeValue::Table(table) => MarkdownNodeType::Table {
            alignments: table
                .alignments
                .iter()
                .map(|a| TableAlignment::from(*a))
                .collect(),
            num_columns: table.num_columns,
        },
        NodeValue::TableRow(header) => MarkdownNodeType::TableRow { header: *header },
        NodeValue::TableCell => MarkdownNodeType::TableCell,
        NodeValue::Text(text) => MarkdownNodeType::Text(text.clone()),
        NodeValue::SoftBreak => MarkdownNodeType::SoftBreak,
        NodeValue::LineBreak => MarkdownNodeType::LineBreak,
        NodeValue::Code(code) => MarkdownNodeType::Code(code.literal.clone()),
        NodeValue::HtmlInline(html) => MarkdownNodeType::HtmlInline(html.clone()),
        NodeValue::Emph => MarkdownNodeType::Emphasis,
        NodeValue::Strong => MarkdownNodeType::Strong,
        NodeValue::Strikethrough => MarkdownNodeType::Strikethrough,
        NodeValue::Link(link) => MarkdownNodeType::Link {
            url: link.url.clone(),
            title: link.title.clone(),
        },
        NodeValue::Image(image) => MarkdownNodeType::Image {
            url: image.url.clone(),
            title: image.title.clone(),
        },
        NodeValue::FootnoteReference(reference) => {
            MarkdownNodeType::FootnoteReference(reference.name.clone())
        }
        NodeValue::FootnoteDefinition(def) => MarkdownNodeType::FootnoteDefinition(def.name.clone()),
        NodeValue::FrontMatter(fm) => MarkdownNodeType::FrontMatter(fm.clone()),
        _ => MarkdownNodeType::Other,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
