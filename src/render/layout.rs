use super::{
    ansi::measure,
    block::{Margins, StyledBlock},
    properties::ViewportGeometry,
};
use crate::markup::text_style::TextStyle;

/// Centers rendered slides within the viewport.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Layout {
    viewport: ViewportGeometry,
}

impl Layout {
    pub(crate) fn new(viewport: ViewportGeometry) -> Self {
        Self { viewport }
    }

    /// Compute the margins that center a body of the given size.
    ///
    /// Odd differences leave the extra row/column at the bottom/right. Bodies larger than the
    /// viewport get no margin on that axis.
    pub(crate) fn margins(&self, body_width: usize, body_height: usize) -> Margins {
        let vertical = Self::centered_margin(self.viewport.height, body_height);
        let horizontal = Self::centered_margin(self.viewport.width, body_width);
        Margins { top: vertical, bottom: vertical, left: horizontal, right: horizontal }
    }

    /// Lay out a rendered body, producing exactly `width` columns by `height - 1` rows.
    ///
    /// Anything that doesn't fit in that box is cut.
    pub(crate) fn render(&self, body: &str) -> String {
        let (body_width, body_height) = measure(body);
        let margins = self.margins(body_width, body_height);
        let ViewportGeometry { width, .. } = self.viewport;
        let rows = self.viewport.content_rows();
        if rows == 0 || width == 0 {
            return String::new();
        }
        StyledBlock::new(TextStyle::default())
            .width(width)
            .max_width(width)
            .height(rows)
            .max_height(rows)
            .margins(margins)
            .render(body)
    }

    fn centered_margin(available: u16, used: usize) -> u16 {
        let available = available as usize;
        (available.saturating_sub(used) / 2).try_into().unwrap_or(u16::MAX)
    }
}
