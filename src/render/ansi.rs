use unicode_width::UnicodeWidthChar;
use vte::{Params, Parser, Perform};

/// A piece of a line of text that may contain ANSI escape codes.
#[derive(Clone, Debug, PartialEq, Eq)]
enum AnsiToken {
    Char(char),
    Escape(String),
}

#[derive(Default)]
struct Tokenizer {
    tokens: Vec<AnsiToken>,
}

impl Tokenizer {
    fn tokenize(line: &str) -> Vec<AnsiToken> {
        let mut tokenizer = Self::default();
        let mut parser = Parser::new();
        parser.advance(&mut tokenizer, line.as_bytes());
        tokenizer.tokens
    }

    fn serialize_params(params: &Params) -> String {
        params
            .iter()
            .map(|param| param.iter().map(u16::to_string).collect::<Vec<_>>().join(":"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl Perform for Tokenizer {
    fn print(&mut self, c: char) {
        self.tokens.push(AnsiToken::Char(c));
    }

    fn execute(&mut self, byte: u8) {
        if byte == b'\t' {
            self.tokens.push(AnsiToken::Char(' '));
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if ignore {
            return;
        }
        let intermediates: String = intermediates.iter().map(|b| *b as char).collect();
        let params = Self::serialize_params(params);
        self.tokens.push(AnsiToken::Escape(format!("\x1b[{intermediates}{params}{action}")));
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], ignore: bool, byte: u8) {
        if ignore {
            return;
        }
        let intermediates: String = intermediates.iter().map(|b| *b as char).collect();
        self.tokens.push(AnsiToken::Escape(format!("\x1b{intermediates}{}", byte as char)));
    }
}

/// The number of columns a line takes when printed, ignoring any escape codes in it.
pub(crate) fn line_width(line: &str) -> usize {
    Tokenizer::tokenize(line)
        .into_iter()
        .map(|token| match token {
            AnsiToken::Char(c) => c.width().unwrap_or(0),
            AnsiToken::Escape(_) => 0,
        })
        .sum()
}

/// Measure a piece of text, returning its width and height.
///
/// The width is the width of its longest line.
pub(crate) fn measure(text: &str) -> (usize, usize) {
    let mut width = 0;
    let mut height = 0;
    for line in text.split('\n') {
        width = width.max(line_width(line));
        height += 1;
    }
    (width, height)
}

/// Truncate a line so it takes at most `max_width` columns.
///
/// Escape codes are kept even after the cut point so styles that were opened are closed.
pub(crate) fn truncate(line: &str, max_width: usize) -> String {
    let mut output = String::with_capacity(line.len());
    let mut width = 0;
    let mut cut = false;
    for token in Tokenizer::tokenize(line) {
        match token {
            AnsiToken::Escape(escape) => output.push_str(&escape),
            AnsiToken::Char(c) => {
                let char_width = c.width().unwrap_or(0);
                if cut || width + char_width > max_width {
                    cut = true;
                    continue;
                }
                width += char_width;
                output.push(c);
            }
        }
    }
    output
}

/// Truncate or pad a line so it takes exactly `width` columns.
pub(crate) fn fit_width(line: &str, width: usize) -> String {
    let mut output = truncate(line, width);
    let current = line_width(&output);
    output.push_str(&" ".repeat(width.saturating_sub(current)));
    output
}

/// Remove every escape code from a piece of text.
#[cfg(test)]
pub(crate) fn strip(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            Tokenizer::tokenize(line)
                .into_iter()
                .filter_map(|token| match token {
                    AnsiToken::Char(c) => Some(c),
                    AnsiToken::Escape(_) => None,
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("hello", 5)]
    #[case::styled("\x1b[1mhello\x1b[0m", 5)]
    #[case::rgb("\x1b[38;2;10;20;30mhi\x1b[0m", 2)]
    #[case::wide("日本", 4)]
    #[case::empty("", 0)]
    fn widths(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(line_width(input), expected);
    }

    #[test]
    fn measure_multiline() {
        assert_eq!(measure("a\nabc\n\x1b[1mab\x1b[0m"), (3, 3));
        assert_eq!(measure(""), (0, 1));
    }

    #[test]
    fn truncate_keeps_escapes() {
        let line = "\x1b[1mhello\x1b[0m world";
        let truncated = truncate(line, 3);
        assert_eq!(truncated, "\x1b[1mhel\x1b[0m");
    }

    #[test]
    fn truncate_rgb_round_trip() {
        let line = "\x1b[38;2;10;20;30mhi\x1b[0m";
        assert_eq!(truncate(line, 10), line);
    }

    #[test]
    fn truncate_wide_characters() {
        assert_eq!(truncate("日本", 3), "日");
    }

    #[rstest]
    #[case::pad("ab", 4, "ab  ")]
    #[case::cut("abcdef", 4, "abcd")]
    #[case::wide_cut("日本", 3, "日 ")]
    fn fit(#[case] input: &str, #[case] width: usize, #[case] expected: &str) {
        assert_eq!(fit_width(input, width), expected);
    }

    #[test]
    fn strip_escapes() {
        assert_eq!(strip("\x1b[1mhello\x1b[0m\n\x1b[31mworld\x1b[0m"), "hello\nworld");
    }
}
