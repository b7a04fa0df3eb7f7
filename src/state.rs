//! Document state for Markview
//!
//! `DocumentState` is the single source of truth for the markdown being
//! previewed. It is owned by the application and only ever replaced as a
//! whole through [`DocumentState::set_text`], which is also where change
//! notifications originate.

use log::debug;

/// The document shown when the application starts.
pub const SAMPLE_MARKDOWN: &str = r#"# Welcome to Markview!

## A live Markdown preview
### Type on the left, read on the right:

Inline code sits between backticks, like `<section></section>`.

```
// a fenced block keeps its contents verbatim:

function fence(open, close) {
  if (open == '```' && close == '```') {
    return **untouched**;
  }
}
```

Text can be **bold**, or _italic_, or **_both at once_**.
Mistakes can be ~~struck through~~ instead of deleted.

Links work too: [CommonMark](https://commonmark.org), and bare URLs like https://github.github.com/gfm/ become links on their own.

> Block quotes are indented
> with a bar on the side.

- Lists come in bullets.
  - They nest.
     - As deep as you like.
        - See?

1. Numbered lists
2. count for you

- [x] Task lists
- [ ] are checkboxes

| Syntax | Extension |
|:-------|:---------:|
| `~~text~~` | strikethrough |
| `- [ ]` | task list |
"#;

/// Notification that the document text was replaced.
///
/// Carries the revision the text now has, so a receiver can tell which
/// value it is being asked to derive from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChanged {
    pub revision: u64,
}

/// The markdown source being previewed, plus a revision counter.
///
/// The revision starts at 0 and increases by one every time the text
/// actually changes; setting identical text is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    text: String,
    revision: u64,
}

impl DocumentState {
    /// Create a document holding `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            text: initial.into(),
            revision: 0,
        }
    }

    /// Create a document holding the built-in sample.
    pub fn with_sample() -> Self {
        Self::new(SAMPLE_MARKDOWN)
    }

    /// Current markdown source.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Revision of the current text.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the document still holds the built-in sample.
    pub fn is_sample(&self) -> bool {
        self.text == SAMPLE_MARKDOWN
    }

    /// Replace the whole text.
    ///
    /// Returns a notification when the value changed, `None` otherwise.
    pub fn set_text(&mut self, new_text: String) -> Option<TextChanged> {
        if new_text == self.text {
            return None;
        }
        self.text = new_text;
        self.revision += 1;
        debug!(
            "Document text replaced (revision {}, {} bytes)",
            self.revision,
            self.text.len()
        );
        Some(TextChanged {
            revision: self.revision,
        })
    }
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::with_sample()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Toast
// ─────────────────────────────────────────────────────────────────────────────

/// A short-lived status bar message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toast {
    message: Option<String>,
    /// Expiry time in seconds since app start
    expires_at: Option<f64>,
}

impl Toast {
    /// Show `message` until `current_time + duration`.
    pub fn show(&mut self, message: impl Into<String>, current_time: f64, duration: f64) {
        self.message = Some(message.into());
        self.expires_at = Some(current_time + duration);
    }

    /// Clear the message once it has expired.
    pub fn update(&mut self, current_time: f64) {
        if let Some(expires_at) = self.expires_at {
            if current_time >= expires_at {
                self.clear();
            }
        }
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.expires_at = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_non_empty_sample() {
        let state = DocumentState::default();
        assert!(!state.text().is_empty());
        assert!(state.is_sample());
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_set_text_replaces_exactly() {
        let mut state = DocumentState::with_sample();
        let changed = state.set_text("  # raw\t\n".to_string());
        assert_eq!(changed, Some(TextChanged { revision: 1 }));
        assert_eq!(state.text(), "  # raw\t\n");
        assert!(!state.is_sample());
    }

    #[test]
    fn test_set_identical_text_is_noop() {
        let mut state = DocumentState::new("same");
        assert_eq!(state.set_text("same".to_string()), None);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_empty_text_is_accepted() {
        let mut state = DocumentState::new("content");
        assert!(state.set_text(String::new()).is_some());
        assert_eq!(state.text(), "");
    }

    #[test]
    fn test_revision_is_monotonic() {
        let mut state = DocumentState::new("");
        let revisions: Vec<u64> = ["a", "b", "b", "c", ""]
            .iter()
            .filter_map(|t| state.set_text(t.to_string()))
            .map(|c| c.revision)
            .collect();
        assert_eq!(revisions, vec![1, 2, 3, 4]);
        assert_eq!(state.revision(), 4);
    }

    #[test]
    fn test_toast_expires() {
        let mut toast = Toast::default();
        toast.show("Copied", 10.0, 2.0);
        toast.update(11.0);
        assert_eq!(toast.message(), Some("Copied"));
        toast.update(12.0);
        assert_eq!(toast.message(), None);
    }

    #[test]
    fn test_toast_replaced_by_newer_message() {
        let mut toast = Toast::default();
        toast.show("first", 0.0, 1.0);
        toast.show("second", 0.5, 3.0);
        toast.update(2.0);
        assert_eq!(toast.message(), Some("second"));
    }
}
