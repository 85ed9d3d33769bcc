use crossterm::style::{Color, Stylize};
use image::{imageops::FilterType, DynamicImage, Rgba};
use itertools::Itertools;

const TOP_CHAR: char = '▀';
const BOTTOM_CHAR: char = '▄';

/// Renders images as text using colored half blocks.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct AsciiPrinter;

impl AsciiPrinter {
    /// Render an image so it fits within the given number of columns and rows.
    ///
    /// The aspect ratio is preserved. Every row of text fits two rows of pixels: the top half block
    /// uses the top pixel's color as foreground and the bottom pixel's color as background.
    pub(crate) fn render(&self, image: &DynamicImage, columns: u16, rows: u16) -> String {
        let columns = columns.max(1) as u32;
        let pixel_rows = rows.max(1) as u32 * 2;
        let image = image.resize(columns, pixel_rows, FilterType::Triangle).into_rgba8();

        let mut lines = Vec::new();
        // An odd number of rows leaves the last chunk with a single row.
        for mut rows in &image.rows().chunks(2) {
            let Some(top_row) = rows.next() else {
                continue;
            };
            let mut bottom_row = rows.next();
            let mut line = String::new();
            for top_pixel in top_row {
                let bottom_pixel = bottom_row.as_mut().and_then(|pixels| pixels.next());

                // A transparent pixel and a missing one are treated the same way.
                let top = Self::pixel_color(top_pixel);
                let bottom = bottom_pixel.and_then(Self::pixel_color);
                let cell = match (top, bottom) {
                    (Some(top), Some(bottom)) => TOP_CHAR.with(top).on(bottom).to_string(),
                    (Some(top), None) => TOP_CHAR.with(top).to_string(),
                    (None, Some(bottom)) => BOTTOM_CHAR.with(bottom).to_string(),
                    (None, None) => " ".to_string(),
                };
                line.push_str(&cell);
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    fn pixel_color(pixel: &Rgba<u8>) -> Option<Color> {
        let [r, g, b, alpha] = pixel.0;
        if alpha == 0 { None } else { Some(Color::Rgb { r, g, b }) }
    }
}
