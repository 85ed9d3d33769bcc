use crate::render::ansi::{fit_width, line_width, truncate};

const PADDING: usize = 2;

/// The line at the bottom of the screen showing the progress and the author.
#[derive(Clone, Debug, Default)]
pub(crate) struct StatusLine {
    author: String,
}

impl StatusLine {
    pub(crate) fn new(author: Option<String>) -> Self {
        Self { author: author.unwrap_or_default() }
    }

    /// Render the status line so it takes exactly `width` columns.
    ///
    /// The progress is left aligned in the left half and the author is right aligned in the right
    /// half.
    pub(crate) fn render(&self, current_slide: usize, total_slides: usize, width: u16) -> String {
        let width = width as usize;
        let left_width = width / 2;
        let right_width = width - left_width;

        let progress = format!("{}[{current_slide}/{total_slides}]", " ".repeat(PADDING));
        let left = fit_width(&progress, left_width);

        let author = truncate(&self.author, right_width.saturating_sub(PADDING));
        let author = format!("{author}{}", " ".repeat(PADDING));
        let used = line_width(&author);
        let right = match right_width.checked_sub(used) {
            Some(remaining) => format!("{}{author}", " ".repeat(remaining)),
            None => fit_width(&author, right_width),
        };
        format!("{left}{right}")
    }
}
