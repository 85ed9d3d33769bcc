use super::{
    registry::StyleRegistry,
    scan::{InlineSegment, InlineSegments},
    RenderError,
};
use crate::render::ansi::truncate;

/// Renders style spans within a piece of text.
pub(crate) struct InlineRenderer<'a> {
    styles: &'a StyleRegistry,
}

impl<'a> InlineRenderer<'a> {
    pub(crate) fn new(styles: &'a StyleRegistry) -> Self {
        Self { styles }
    }

    /// Render every style span in the given text.
    ///
    /// Text outside of spans is emitted unchanged. Span contents are not scanned for other spans
    /// and every line in them is cut at `width` columns before being styled.
    pub(crate) fn render_text(&self, text: &str, width: u16) -> Result<String, RenderError> {
        let mut output = String::with_capacity(text.len());
        for segment in InlineSegments::new(text) {
            match segment {
                InlineSegment::Text(text) => output.push_str(text),
                InlineSegment::Span(span) => {
                    let style =
                        self.styles.get(span.name).ok_or_else(|| RenderError::UndefinedStyle(span.name.to_string()))?;
                    let lines: Vec<_> = span
                        .content
                        .split('\n')
                        .map(|line| style.apply(truncate(line, width as usize)).to_string())
                        .collect();
                    output.push_str(&lines.join("\n"));
                }
            }
        }
        Ok(output)
    }
}
