use super::ansi::{fit_width, line_width};
use crate::markup::text_style::{Color, TextStyle};
use unicode_width::UnicodeWidthStr;

/// Margins around a block, in columns and rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Margins {
    pub(crate) top: u16,
    pub(crate) bottom: u16,
    pub(crate) left: u16,
    pub(crate) right: u16,
}

/// A rectangular, styled block of text.
///
/// Rendering goes from the inside out: the text is wrapped and padded to the block's width, the
/// style is applied to every line including padding, then the border is drawn and margins are
/// added. Maximum sizes are applied last and cut whatever doesn't fit.
#[derive(Clone, Debug, Default)]
pub(crate) struct StyledBlock {
    style: TextStyle,
    width: Option<u16>,
    height: Option<u16>,
    max_width: Option<u16>,
    max_height: Option<u16>,
    padding: u16,
    margins: Margins,
    border: Option<Option<Color>>,
    wrap: bool,
}

impl StyledBlock {
    pub(crate) fn new(style: TextStyle) -> Self {
        Self { style, ..Default::default() }
    }

    /// Set the width of the block, including padding.
    pub(crate) fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the minimum height of the block, including padding.
    pub(crate) fn height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    pub(crate) fn max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    pub(crate) fn max_height(mut self, height: u16) -> Self {
        self.max_height = Some(height);
        self
    }

    /// Set the padding on every side of the block.
    pub(crate) fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    pub(crate) fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Draw a border around the block using the given color.
    pub(crate) fn border(mut self, color: Option<Color>) -> Self {
        self.border = Some(color);
        self
    }

    /// Word wrap text that doesn't fit in the block's width.
    ///
    /// This is only meant to be used on text that contains no escape codes.
    pub(crate) fn wrap(mut self) -> Self {
        self.wrap = true;
        self
    }

    pub(crate) fn render(&self, text: &str) -> String {
        let padding = self.padding as usize;
        let mut lines: Vec<String> = match (self.wrap, self.width) {
            (true, Some(width)) => {
                let inner = (width as usize).saturating_sub(padding * 2).max(1);
                text.split('\n').flat_map(|line| wrap_words(line, inner)).collect()
            }
            _ => text.split('\n').map(ToString::to_string).collect(),
        };
        let inner_width = match self.width {
            Some(width) => (width as usize).saturating_sub(padding * 2),
            None => lines.iter().map(|line| line_width(line)).max().unwrap_or(0),
        };
        let full_width = inner_width + padding * 2;

        // Pad horizontally and vertically, then apply the style to every line.
        let horizontal_padding = " ".repeat(padding);
        let blank = " ".repeat(inner_width);
        for line in &mut lines {
            *line = format!("{horizontal_padding}{}{horizontal_padding}", fit_width(line, inner_width));
        }
        for _ in 0..padding {
            lines.insert(0, format!("{horizontal_padding}{blank}{horizontal_padding}"));
            lines.push(format!("{horizontal_padding}{blank}{horizontal_padding}"));
        }
        if let Some(height) = self.height {
            while lines.len() < height as usize {
                lines.push(" ".repeat(full_width));
            }
        }
        let mut lines: Vec<String> = lines.into_iter().map(|line| self.style_line(line)).collect();

        let mut full_width = full_width;
        if let Some(color) = self.border {
            lines = Self::draw_border(lines, full_width, color);
            full_width += 2;
        }
        self.apply_margins(lines, full_width)
    }

    fn style_line(&self, line: String) -> String {
        if self.style == TextStyle::default() {
            line
        } else {
            self.style.apply(line).to_string()
        }
    }

    fn draw_border(lines: Vec<String>, width: usize, color: Option<Color>) -> Vec<String> {
        let style = match color {
            Some(color) => TextStyle::default().fg_color(color),
            None => TextStyle::default(),
        };
        let paint = |text: String| -> String {
            if style == TextStyle::default() { text } else { style.apply(text).to_string() }
        };
        let horizontal = "─".repeat(width);
        let mut output = Vec::with_capacity(lines.len() + 2);
        output.push(paint(format!("┌{horizontal}┐")));
        for line in lines {
            output.push(format!("{}{line}{}", paint("│".into()), paint("│".into())));
        }
        output.push(paint(format!("└{horizontal}┘")));
        output
    }

    fn apply_margins(&self, lines: Vec<String>, width: usize) -> String {
        let Margins { top, bottom, left, right } = self.margins;
        let total_width = left as usize + width + right as usize;
        let blank = " ".repeat(total_width);
        let left = " ".repeat(left as usize);
        let right = " ".repeat(right as usize);

        let mut output = Vec::with_capacity(lines.len() + top as usize + bottom as usize);
        output.extend((0..top).map(|_| blank.clone()));
        output.extend(lines.into_iter().map(|line| format!("{left}{line}{right}")));
        output.extend((0..bottom).map(|_| blank.clone()));

        if let Some(max_height) = self.max_height {
            output.truncate(max_height as usize);
        }
        if let Some(max_width) = self.max_width {
            if total_width > max_width as usize {
                for line in &mut output {
                    *line = fit_width(line, max_width as usize);
                }
            }
        }
        output.join("\n")
    }
}

/// Split a line of plain text into lines that are at most `width` columns long.
///
/// Words longer than the width are split wherever they overflow.
pub(crate) fn wrap_words(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut output = Vec::new();
    let mut current = String::new();
    for word in line.split(' ') {
        let separator = if current.is_empty() { 0 } else { 1 };
        if current.width() + separator + word.width() <= width {
            if separator == 1 {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            output.push(std::mem::take(&mut current));
        }
        let mut word = word;
        while word.width() > width {
            let split = split_at_width(word, width);
            output.push(word[..split].to_string());
            word = &word[split..];
        }
        current.push_str(word);
    }
    output.push(current);
    output
}

fn split_at_width(text: &str, width: usize) -> usize {
    let mut total = 0;
    for (index, c) in text.char_indices() {
        let char_width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if total + char_width > width {
            // Always make progress, even if a single character doesn't fit.
            return if index == 0 { c.len_utf8() } else { index };
        }
        total += char_width;
    }
    text.len()
}
