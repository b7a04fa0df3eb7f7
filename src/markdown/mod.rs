//! Markdown parsing module
//!
//! Wraps comrak, a CommonMark + GFM compatible parser, and exposes the parsed
//! result as an owned, comparable tree that the preview pane draws from.
//!
//! # Example
//! ```ignore
//! use crate::markdown::{parse_markdown, MarkdownNodeType};
//!
//! let doc = parse_markdown("# Hello\n\nThis is **bold** text.");
//! assert!(matches!(doc.blocks()[0].node_type, MarkdownNodeType::Heading { .. }));
//! ```

mod parser;

pub use parser::{
    parse_markdown, parse_markdown_with_options, HeadingLevel, ListType, MarkdownDocument,
    MarkdownNode, MarkdownNodeType, MarkdownOptions,
};
