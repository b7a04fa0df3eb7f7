//! Text statistics shown in the status bar
//!
//! Counts are taken over the raw markdown source, so markup characters are
//! included in the character count.

/// Average silent reading speed used for the reading-time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Statistics for a markdown source string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Whitespace-separated words
    pub words: usize,
    /// Characters including whitespace
    pub characters: usize,
    /// Characters excluding whitespace
    pub characters_no_spaces: usize,
    /// Lines; an empty document has one
    pub lines: usize,
    /// Runs of non-blank lines separated by blank lines
    pub paragraphs: usize,
}

impl TextStats {
    /// Compute statistics for `text`.
    pub fn from_text(text: &str) -> Self {
        let characters = text.chars().count();
        let characters_no_spaces = text.chars().filter(|c| !c.is_whitespace()).count();

        let mut paragraphs = 0;
        let mut in_paragraph = false;
        for line in text.lines() {
            let blank = line.trim().is_empty();
            if !blank && !in_paragraph {
                paragraphs += 1;
            }
            in_paragraph = !blank;
        }

        Self {
            words: text.split_whitespace().count(),
            characters,
            characters_no_spaces,
            lines: count_lines(text),
            paragraphs,
        }
    }

    /// Estimated reading time in whole minutes, at least one for non-empty text.
    pub fn reading_minutes(&self) -> usize {
        if self.words == 0 {
            0
        } else {
            self.words.div_ceil(WORDS_PER_MINUTE)
        }
    }

    /// Compact status-bar form, e.g. `"150 words | 892 chars | 25 lines"`.
    pub fn format_compact(&self) -> String {
        format!(
            "{} words | {} chars | {} lines",
            self.words, self.characters, self.lines
        )
    }
}

/// Number of lines in `text`, counting a trailing newline as starting a new line.
pub fn count_lines(text: &str) -> usize {
    text.matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let stats = TextStats::from_text("");
        assert_eq!(
            stats,
            TextStats {
                words: 0,
                characters: 0,
                characters_no_spaces: 0,
                lines: 1,
                paragraphs: 0,
            }
        );
        assert_eq!(stats.reading_minutes(), 0);
    }

    #[test]
    fn test_simple_sentence() {
        let stats = TextStats::from_text("Hello, World!");
        assert_eq!(stats.words, 2);
        assert_eq!(stats.characters, 13);
        assert_eq!(stats.characters_no_spaces, 12);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.paragraphs, 1);
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let text = "# Title\n\nOne.\nStill one.\n   \nTwo.\n\n\n- three";
        let stats = TextStats::from_text(text);
        assert_eq!(stats.paragraphs, 4);
    }

    #[test]
    fn test_trailing_newline_counts_a_line() {
        let stats = TextStats::from_text("Hello\n");
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.paragraphs, 1);
        assert_eq!(count_lines("\n\n\n"), 4);
    }

    #[test]
    fn test_unicode_counts_chars_not_bytes() {
        let stats = TextStats::from_text("Привет мир! 你好世界");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.characters, 16);
        assert_eq!(stats.characters_no_spaces, 14);
    }

    #[test]
    fn test_reading_minutes_rounds_up() {
        let text = "word ".repeat(201);
        let stats = TextStats::from_text(&text);
        assert_eq!(stats.words, 201);
        assert_eq!(stats.reading_minutes(), 2);
        assert_eq!(TextStats::from_text("a").reading_minutes(), 1);
    }

    #[test]
    fn test_format_compact() {
        let stats = TextStats {
            words: 150,
            characters: 892,
            characters_no_spaces: 743,
            lines: 25,
            paragraphs: 5,
        };
        assert_eq!(stats.format_compact(), "150 words | 892 chars | 25 lines");
    }
}
