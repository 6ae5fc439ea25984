pub mod ascii;
pub mod text;

pub use ascii::{AsciiRenderer, RenderOptions};
pub use text::TextLayout;

/// Characters for graph rendering
pub mod chars {
    pub const COMMIT: char = '*';
    pub const VERTICAL: char = '|';
    pub const FORK_RIGHT: char = '\\';
    pub const FORK_LEFT: char = '/';
    pub const CONVERGE: char = '/';
    pub const FORK_FILL: char = '-';
    pub const CONVERGE_FILL: char = '_';
    pub const SPACE: char = ' ';
}

/// Display color of a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// 24-bit foreground escape sequence
    pub fn to_ansi(&self) -> String {
        match self {
            Color::Default => "\x1b[0m".to_string(),
            Color::Rgb(r, g, b) => format!("\x1b[38;2;{};{};{}m", r, g, b),
        }
    }

    pub const RESET: &'static str = "\x1b[0m";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#2196f3"), Some(Color::Rgb(0x21, 0x96, 0xf3)));
        assert_eq!(Color::from_hex("607D8B"), Some(Color::Rgb(0x60, 0x7d, 0x8b)));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_color_to_ansi() {
        assert_eq!(Color::Rgb(1, 2, 3).to_ansi(), "\x1b[38;2;1;2;3m");
        assert_eq!(Color::Default.to_ansi(), Color::RESET);
    }
}
