use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width-aware text helpers for the message column
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLayout;

impl TextLayout {
    pub fn new() -> Self {
        Self
    }

    /// Calculate display width of a string
    pub fn display_width(&self, text: &str) -> usize {
        UnicodeWidthStr::width(text)
    }

    /// Truncate string to fit width, preserving grapheme boundaries.
    ///
    /// A cut string ends in `…`, which counts toward `max_width`.
    pub fn truncate_to_width(&self, text: &str, max_width: usize) -> String {
        if self.display_width(text) <= max_width {
            return text.to_string();
        }
        if max_width == 0 {
            return String::new();
        }

        let budget = max_width - 1;
        let mut result = String::new();
        let mut current_width = 0;

        for grapheme in text.graphemes(true) {
            let grapheme_width = UnicodeWidthStr::width(grapheme);
            if current_width + grapheme_width > budget {
                break;
            }
            result.push_str(grapheme);
            current_width += grapheme_width;
        }

        result.push('…');
        result
    }
}
