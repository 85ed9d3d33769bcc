use crossterm::style::{StyledContent, Stylize};
use hex::{FromHex, FromHexError};
use serde_with::DeserializeFromStr;
use std::{num::ParseIntError, str::FromStr};

/// The style of a piece of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextStyle {
    flags: u8,
    pub(crate) colors: Colors,
}

impl TextStyle {
    /// Add bold to this style.
    pub(crate) fn bold(self) -> Self {
        self.add_flag(TextFormatFlags::Bold)
    }

    /// Add italics to this style.
    pub(crate) fn italics(self) -> Self {
        self.add_flag(TextFormatFlags::Italics)
    }

    /// Add strikethrough to this style.
    pub(crate) fn strikethrough(self) -> Self {
        self.add_flag(TextFormatFlags::Strikethrough)
    }

    /// Add underline to this style.
    pub(crate) fn underlined(self) -> Self {
        self.add_flag(TextFormatFlags::Underlined)
    }

    /// Set the background color for this text style.
    pub(crate) fn bg_color(mut self, color: Color) -> Self {
        self.colors.background = Some(color);
        self
    }

    /// Set the foreground color for this text style.
    pub(crate) fn fg_color(mut self, color: Color) -> Self {
        self.colors.foreground = Some(color);
        self
    }

    /// Check whether this text style is bold.
    pub(crate) fn is_bold(&self) -> bool {
        self.has_flag(TextFormatFlags::Bold)
    }

    /// Check whether this text style has italics.
    pub(crate) fn is_italics(&self) -> bool {
        self.has_flag(TextFormatFlags::Italics)
    }

    /// Check whether this text style is strikethrough.
    pub(crate) fn is_strikethrough(&self) -> bool {
        self.has_flag(TextFormatFlags::Strikethrough)
    }

    /// Check whether this text style is underlined.
    pub(crate) fn is_underlined(&self) -> bool {
        self.has_flag(TextFormatFlags::Underlined)
    }

    /// Apply this style to a piece of text.
    ///
    /// Applying the default style returns the text untouched.
    pub(crate) fn apply<T: Into<String>>(&self, text: T) -> StyledContent<String> {
        let text: String = text.into();
        let mut styled = text.stylize();
        if self.is_bold() {
            styled = styled.bold();
        }
        if self.is_italics() {
            styled = styled.italic();
        }
        if self.is_strikethrough() {
            styled = styled.crossed_out();
        }
        if self.is_underlined() {
            styled = styled.underlined();
        }
        if let Some(color) = self.colors.background {
            styled = styled.on(color.into());
        }
        if let Some(color) = self.colors.foreground {
            styled = styled.with(color.into());
        }
        styled
    }

    fn add_flag(mut self, flag: TextFormatFlags) -> Self {
        self.flags |= flag as u8;
        self
    }

    fn has_flag(&self, flag: TextFormatFlags) -> bool {
        self.flags & flag as u8 != 0
    }
}

#[derive(Debug)]
enum TextFormatFlags {
    Bold = 1,
    Italics = 2,
    Strikethrough = 4,
    Underlined = 8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, DeserializeFromStr)]
pub(crate) enum Color {
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
    Rgb { r: u8, g: u8, b: u8 },
    Ansi(u8),
}

impl Color {
    pub(crate) fn new(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let output = match input {
            "black" => Self::Black,
            "white" => Self::White,
            "grey" => Self::Grey,
            "dark_grey" => Self::DarkGrey,
            "red" => Self::Red,
            "dark_red" => Self::DarkRed,
            "green" => Self::Green,
            "dark_green" => Self::DarkGreen,
            "blue" => Self::Blue,
            "dark_blue" => Self::DarkBlue,
            "yellow" => Self::Yellow,
            "dark_yellow" => Self::DarkYellow,
            "magenta" => Self::Magenta,
            "dark_magenta" => Self::DarkMagenta,
            "cyan" => Self::Cyan,
            "dark_cyan" => Self::DarkCyan,
            "" => return Err(ParseColorError::Empty),
            // Plain numbers are indexes into the 256 color ANSI table.
            other if other.len() <= 3 && other.bytes().all(|c| c.is_ascii_digit()) => Self::Ansi(other.parse()?),
            // Fallback to hex-encoded rgb
            other => {
                let values = <[u8; 3]>::from_hex(other.trim_start_matches('#'))?;
                Self::Rgb { r: values[0], g: values[1], b: values[2] }
            }
        };
        Ok(output)
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(value: Color) -> Self {
        use crossterm::style::Color as C;
        match value {
            Color::Black => C::Black,
            Color::DarkGrey => C::DarkGrey,
            Color::Red => C::Red,
            Color::DarkRed => C::DarkRed,
            Color::Green => C::Green,
            Color::DarkGreen => C::DarkGreen,
            Color::Yellow => C::Yellow,
            Color::DarkYellow => C::DarkYellow,
            Color::Blue => C::Blue,
            Color::DarkBlue => C::DarkBlue,
            Color::Magenta => C::Magenta,
            Color::DarkMagenta => C::DarkMagenta,
            Color::Cyan => C::Cyan,
            Color::DarkCyan => C::DarkCyan,
            Color::White => C::White,
            Color::Grey => C::Grey,
            Color::Rgb { r, g, b } => C::Rgb { r, g, b },
            Color::Ansi(value) => C::AnsiValue(value),
        }
    }
}

/// Text colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Colors {
    /// The background color.
    pub(crate) background: Option<Color>,

    /// The foreground color.
    pub(crate) foreground: Option<Color>,
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ParseColorError {
    #[error("invalid hex color: {0}")]
    Hex(#[from] FromHexError),

    #[error("invalid ansi color: {0}")]
    Ansi(#[from] ParseIntError),

    #[error("color is empty")]
    Empty,
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::named("dark_blue", Color::DarkBlue)]
    #[case::hex("beef42", Color::new(0xbe, 0xef, 0x42))]
    #[case::hex_with_hash("#F25D94", Color::new(0xf2, 0x5d, 0x94))]
    #[case::ansi("63", Color::Ansi(63))]
    #[case::digits_only_hex("123456", Color::new(0x12, 0x34, 0x56))]
    fn parse_colors(#[case] input: &str, #[case] expected: Color) {
        let color: Color = input.parse().expect("invalid color");
        assert_eq!(color, expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::ansi_too_large("256")]
    #[case::not_hex("potato")]
    fn invalid_colors(#[case] input: &str) {
        Color::from_str(input).expect_err("not an error");
    }

    #[test]
    fn default_style_is_plain() {
        let text = TextStyle::default().apply("hello").to_string();
        assert_eq!(text, "hello");
    }

    #[test]
    fn bold_style_wraps_text() {
        let text = TextStyle::default().bold().apply("hello").to_string();
        assert!(text.contains("hello"));
        assert!(text.starts_with('\x1b'));
        assert!(text.ends_with("\x1b[0m"));
    }
}
