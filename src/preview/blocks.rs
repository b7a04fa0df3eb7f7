//! Drawing a `MarkdownDocument` with egui widgets
//!
//! Block nodes are drawn top to bottom; inline nodes are laid out in a
//! `horizontal_wrapped` row per paragraph, accumulating bold/italic/strike
//! styles from their ancestors. Nothing here mutates the document.

use crate::markdown::{HeadingLevel, ListType, MarkdownDocument, MarkdownNode, MarkdownNodeType};
use crate::theme::PreviewColors;
use eframe::egui::{self, Color32, RichText, Ui, Vec2};

/// Indentation of nested lists and block quote content.
const INDENT: f32 = 18.0;

/// Width of the block quote side bar.
const QUOTE_BAR_WIDTH: f32 = 3.0;

/// Containers nested deeper than this are drawn flat, without indentation.
/// Inline formatting nested deeper than this is drawn as plain text.
const MAX_NESTING_DEPTH: usize = 32;

// ─────────────────────────────────────────────────────────────────────────────
// Render Context
// ─────────────────────────────────────────────────────────────────────────────

/// Per-call drawing parameters, passed down the tree by value.
#[derive(Clone, Copy)]
pub(crate) struct RenderContext<'a> {
    pub colors: &'a PreviewColors,
    pub font_size: f32,
    /// Color for plain text at this depth (block quotes dim it)
    pub text_color: Color32,
    /// Nesting depth of lists, for bullet choice
    pub list_depth: usize,
    /// Nesting depth of indented containers (quotes, list items, footnotes)
    pub depth: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(colors: &'a PreviewColors, font_size: f32) -> Self {
        Self {
            colors,
            font_size,
            text_color: colors.text,
            list_depth: 0,
            depth: 0,
        }
    }

    fn with_text_color(mut self, color: Color32) -> Self {
        self.text_color = color;
        self
    }

    fn nested_list(mut self) -> Self {
        self.list_depth += 1;
        self
    }

    fn nested(mut self) -> Self {
        self.depth += 1;
        self
    }

    fn at_depth_limit(&self) -> bool {
        self.depth >= MAX_NESTING_DEPTH
    }
}

/// Accumulated inline formatting.
#[derive(Debug, Clone, Copy, Default)]
struct TextStyle {
    bold: bool,
    italic: bool,
    strikethrough: bool,
    /// Overrides the context font size (headings)
    size: Option<f32>,
    /// Overrides the context text color (headings, table headers)
    color: Option<Color32>,
    /// Number of enclosing inline containers
    depth: usize,
}

impl TextStyle {
    fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn with_strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    fn nested(mut self) -> Self {
        self.depth += 1;
        self
    }

    fn apply(&self, text: &str, ctx: &RenderContext<'_>) -> RichText {
        let color = match (self.color, self.bold) {
            (Some(color), _) => color,
            (None, true) => ctx.colors.strong,
            (None, false) => ctx.text_color,
        };
        let mut rich = RichText::new(text)
            .size(self.size.unwrap_or(ctx.font_size))
            .color(color);
        if self.bold {
            rich = rich.strong();
        }
        if self.italic {
            rich = rich.italics();
        }
        if self.strikethrough {
            rich = rich.strikethrough();
        }
        rich
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Block Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Draw every block of `document` into `ui`.
pub(crate) fn render_document(ui: &mut Ui, document: &MarkdownDocument, ctx: RenderContext<'_>) {
    for block in document.blocks() {
        render_block(ui, block, ctx);
    }
}

fn render_block(ui: &mut Ui, node: &MarkdownNode, ctx: RenderContext<'_>) {
    match &node.node_type {
        MarkdownNodeType::Heading { level, .. } => render_heading(ui, node, *level, ctx),
        MarkdownNodeType::Paragraph => {
            render_inline_content(ui, node, TextStyle::default(), ctx);
            ui.add_space(ctx.font_size * 0.5);
        }
        MarkdownNodeType::CodeBlock { info, literal, .. } => {
            render_code_block(ui, info, literal, ctx)
        }
        MarkdownNodeType::BlockQuote => render_blockquote(ui, node, ctx),
        MarkdownNodeType::List { list_type, .. } => render_list(ui, node, list_type, ctx),
        MarkdownNodeType::ThematicBreak => render_thematic_break(ui, ctx.colors),
        MarkdownNodeType::Table { .. } => render_table(ui, node, ctx),
        MarkdownNodeType::HtmlBlock(html) => render_literal(ui, html, ctx.colors.code_text, ctx),
        MarkdownNodeType::FrontMatter(content) => render_code_block(ui, "", content, ctx),
        MarkdownNodeType::FootnoteDefinition(name) => render_footnote_definition(ui, node, name, ctx),
        MarkdownNodeType::Item | MarkdownNodeType::TaskItem { .. } => {
            // Only reachable for malformed trees; lists draw their own items
            for child in &node.children {
                render_block(ui, child, ctx);
            }
        }
        _ if node.node_type.is_block() => {
            for child in &node.children {
                render_block(ui, child, ctx);
            }
        }
        _ => {
            // Stray inline content at block level
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                render_inline_node(ui, node, TextStyle::default(), ctx);
            });
        }
    }
}

fn render_heading(ui: &mut Ui, node: &MarkdownNode, level: HeadingLevel, ctx: RenderContext<'_>) {
    let style = TextStyle {
        bold: true,
        size: Some(ctx.font_size * level.scale()),
        color: Some(ctx.colors.heading),
        ..TextStyle::default()
    };

    ui.add_space(ctx.font_size * 0.4);
    render_inline_content(ui, node, style, ctx);

    if matches!(level, HeadingLevel::H1 | HeadingLevel::H2) {
        ui.add_space(2.0);
        render_rule(ui, ctx.colors.hr);
    }
    ui.add_space(ctx.font_size * 0.3);
}

fn render_code_block(ui: &mut Ui, info: &str, literal: &str, ctx: RenderContext<'_>) {
    egui::Frame::none()
        .fill(ctx.colors.code_bg)
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            let language = info.split_whitespace().next().unwrap_or("");
            if !language.is_empty() {
                ui.label(
                    RichText::new(language)
                        .monospace()
                        .size(ctx.font_size * 0.75)
                        .color(ctx.colors.muted),
                );
            }
            ui.label(
                RichText::new(literal.trim_end_matches('\n'))
                    .monospace()
                    .size(ctx.font_size * 0.9)
                    .color(ctx.colors.code_text),
            );
        });
    ui.add_space(ctx.font_size * 0.5);
}

/// Raw HTML and other source shown verbatim.
fn render_literal(ui: &mut Ui, text: &str, color: Color32, ctx: RenderContext<'_>) {
    ui.label(
        RichText::new(text.trim_end_matches('\n'))
            .monospace()
            .size(ctx.font_size * 0.9)
            .color(color),
    );
    ui.add_space(ctx.font_size * 0.5);
}

fn render_blockquote(ui: &mut Ui, node: &MarkdownNode, ctx: RenderContext<'_>) {
    if ctx.at_depth_limit() {
        render_flattened(ui, node, ctx);
        return;
    }

    let inner_ctx = ctx.with_text_color(ctx.colors.quote_text).nested();
    let response = ui
        .horizontal_top(|ui| {
            ui.add_space(QUOTE_BAR_WIDTH + INDENT * 0.5);
            ui.vertical(|ui| {
                for child in &node.children {
                    render_block(ui, child, inner_ctx);
                }
            });
        })
        .response;

    let rect = response.rect;
    let bar = egui::Rect::from_min_size(rect.min, Vec2::new(QUOTE_BAR_WIDTH, rect.height()));
    ui.painter().rect_filled(bar, 0.0, ctx.colors.quote_border);
    ui.add_space(ctx.font_size * 0.3);
}

fn render_list(ui: &mut Ui, node: &MarkdownNode, list_type: &ListType, ctx: RenderContext<'_>) {
    let mut item_number = match list_type {
        ListType::Ordered { start, .. } => *start,
        ListType::Bullet => 0,
    };

    for item in &node.children {
        let task = match item.node_type {
            MarkdownNodeType::Item => None,
            MarkdownNodeType::TaskItem { checked } => Some(checked),
            _ => continue,
        };
        render_list_item(ui, item, list_marker(list_type, item_number, ctx.list_depth), task, ctx);
        item_number = item_number.saturating_add(1);
    }

    if ctx.list_depth == 0 {
        ui.add_space(ctx.font_size * 0.3);
    }
}

fn render_list_item(
    ui: &mut Ui,
    item: &MarkdownNode,
    marker: String,
    task: Option<bool>,
    ctx: RenderContext<'_>,
) {
    if ctx.at_depth_limit() {
        render_flattened(ui, item, ctx);
        return;
    }

    let inner_ctx = ctx.nested_list().nested();
    ui.horizontal_top(|ui| {
        ui.add_space(if ctx.list_depth == 0 { 4.0 } else { INDENT });
        match task {
            Some(checked) => {
                let mut checked = checked;
                ui.add_enabled(false, egui::Checkbox::without_text(&mut checked));
            }
            None => {
                ui.label(
                    RichText::new(marker)
                        .size(ctx.font_size)
                        .color(ctx.colors.list_marker),
                );
            }
        }
        ui.vertical(|ui| {
            for child in &item.children {
                match &child.node_type {
                    // Tight list paragraphs should not add paragraph spacing
                    MarkdownNodeType::Paragraph => {
                        render_inline_content(ui, child, TextStyle::default(), inner_ctx)
                    }
                    _ => render_block(ui, child, inner_ctx),
                }
            }
        });
    });
}

/// Bullet or number shown before a list item.
fn list_marker(list_type: &ListType, item_number: u32, depth: usize) -> String {
    match list_type {
        ListType::Bullet => {
            if depth == 0 {
                "\u{2022}".to_string() // •
            } else {
                "\u{25E6}".to_string() // ◦
            }
        }
        ListType::Ordered { delimiter, .. } => format!("{}{}", item_number, delimiter),
    }
}

fn render_thematic_break(ui: &mut Ui, colors: &PreviewColors) {
    ui.add_space(6.0);
    render_rule(ui, colors.hr);
    ui.add_space(6.0);
}

fn render_rule(ui: &mut Ui, color: Color32) {
    let (rect, _) =
        ui.allocate_exact_size(Vec2::new(ui.available_width(), 1.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 0.0, color);
}

fn render_table(ui: &mut Ui, node: &MarkdownNode, ctx: RenderContext<'_>) {
    let header_style = TextStyle::default().with_bold();

    egui::Grid::new(("markdown_table", node.start_line))
        .striped(true)
        .spacing(Vec2::new(16.0, 4.0))
        .show(ui, |ui| {
            for row in &node.children {
                let is_header = matches!(row.node_type, MarkdownNodeType::TableRow { header: true });
                let style = if is_header {
                    header_style
                } else {
                    TextStyle::default()
                };
                for cell in &row.children {
                    render_inline_content(ui, cell, style, ctx);
                }
                ui.end_row();
            }
        });
    ui.add_space(ctx.font_size * 0.5);
}

fn render_footnote_definition(
    ui: &mut Ui,
    node: &MarkdownNode,
    name: &str,
    ctx: RenderContext<'_>,
) {
    if ctx.at_depth_limit() {
        render_flattened(ui, node, ctx);
        return;
    }

    let inner_ctx = ctx.nested();
    ui.horizontal_top(|ui| {
        ui.label(
            RichText::new(format!("[{}]", name))
                .size(ctx.font_size * 0.8)
                .color(ctx.colors.muted),
        );
        ui.vertical(|ui| {
            for child in &node.children {
                render_block(ui, child, inner_ctx);
            }
        });
    });
}

/// Draw the leaf blocks under `node` one after another, ignoring the
/// containers between them. Walks with an explicit stack, so input nesting
/// depth does not grow the call stack.
fn render_flattened(ui: &mut Ui, node: &MarkdownNode, ctx: RenderContext<'_>) {
    let mut pending: Vec<&MarkdownNode> = node.children.iter().rev().collect();
    while let Some(child) = pending.pop() {
        match &child.node_type {
            MarkdownNodeType::Document
            | MarkdownNodeType::BlockQuote
            | MarkdownNodeType::List { .. }
            | MarkdownNodeType::Item
            | MarkdownNodeType::TaskItem { .. }
            | MarkdownNodeType::FootnoteDefinition(_) => {
                pending.extend(child.children.iter().rev());
            }
            _ => render_block(ui, child, ctx),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Lay out the inline children of `node` as one wrapped row.
fn render_inline_content(ui: &mut Ui, node: &MarkdownNode, style: TextStyle, ctx: RenderContext<'_>) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for child in &node.children {
            render_inline_node(ui, child, style, ctx);
        }
    });
}

fn render_inline_node(ui: &mut Ui, node: &MarkdownNode, style: TextStyle, ctx: RenderContext<'_>) {
    match &node.node_type {
        MarkdownNodeType::Text(text) => {
            ui.label(style.apply(text, &ctx));
        }
        MarkdownNodeType::Strong => render_inline_children(ui, node, style.with_bold(), ctx),
        MarkdownNodeType::Emphasis => render_inline_children(ui, node, style.with_italic(), ctx),
        MarkdownNodeType::Strikethrough => {
            render_inline_children(ui, node, style.with_strikethrough(), ctx)
        }
        MarkdownNodeType::Code(code) => {
            ui.label(
                RichText::new(code)
                    .monospace()
                    .size(style.size.unwrap_or(ctx.font_size) * 0.9)
                    .color(ctx.colors.code_text)
                    .background_color(ctx.colors.code_bg),
            );
        }
        MarkdownNodeType::Link { url, .. } => {
            let text = node.text_content();
            let label = if text.is_empty() { url.as_str() } else { text.as_str() };
            let link_style = TextStyle {
                color: Some(ctx.colors.link),
                ..style
            };
            ui.hyperlink_to(link_style.apply(label, &ctx).underline(), url);
        }
        MarkdownNodeType::Image { url, .. } => {
            let alt = node.text_content();
            let label = if alt.is_empty() {
                format!("[image: {}]", url)
            } else {
                format!("[image: {}]", alt)
            };
            ui.hyperlink_to(
                RichText::new(label)
                    .size(ctx.font_size)
                    .color(ctx.colors.link)
                    .italics(),
                url,
            );
        }
        MarkdownNodeType::HtmlInline(html) => {
            ui.label(
                RichText::new(html)
                    .monospace()
                    .size(ctx.font_size * 0.9)
                    .color(ctx.colors.code_text),
            );
        }
        MarkdownNodeType::FootnoteReference(name) => {
            ui.label(
                RichText::new(format!("[{}]", name))
                    .size(ctx.font_size * 0.75)
                    .color(ctx.colors.link),
            );
        }
        MarkdownNodeType::SoftBreak => {
            ui.label(style.apply(" ", &ctx));
        }
        MarkdownNodeType::LineBreak => {
            ui.end_row();
        }
        _ => render_inline_children(ui, node, style, ctx),
    }
}

fn render_inline_children(ui: &mut Ui, node: &MarkdownNode, style: TextStyle, ctx: RenderContext<'_>) {
    if style.depth >= MAX_NESTING_DEPTH {
        ui.label(style.apply(&node.text_content(), &ctx));
        return;
    }

    let style = style.nested();
    for child in &node.children {
        render_inline_node(ui, child, style, ctx);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
