use super::{
    handlers::BlockHandlerRegistry,
    inline::InlineRenderer,
    registry::StyleRegistry,
    scan::{BlockSegment, BlockSegments},
    RenderError,
};
use crate::render::{layout::Layout, properties::ViewportGeometry};

/// Renders slides by dispatching blocks to their handlers and styling everything else.
pub(crate) struct SlideRenderer<'a> {
    styles: &'a StyleRegistry,
    handlers: &'a BlockHandlerRegistry,
}

impl<'a> SlideRenderer<'a> {
    pub(crate) fn new(styles: &'a StyleRegistry, handlers: &'a BlockHandlerRegistry) -> Self {
        Self { styles, handlers }
    }

    /// Render a slide's body without laying it out.
    pub(crate) fn render_body(&self, slide: &str, width: u16) -> Result<String, RenderError> {
        let inline = InlineRenderer::new(self.styles);
        let mut output = String::new();
        for segment in BlockSegments::new(slide) {
            match segment {
                BlockSegment::Text(text) => output.push_str(&inline.render_text(text, width)?),
                BlockSegment::Block(block) => {
                    let handler =
                        self.handlers.get(block.name).ok_or_else(|| RenderError::UndefinedHandler(block.name.into()))?;
                    let rendered = self.handlers.invoke(handler, block.options_or_empty(), block.content, width);
                    output.push_str(&rendered);
                }
            }
        }
        Ok(output)
    }

    /// Render a slide and center it in the viewport.
    pub(crate) fn render_slide(&self, slide: &str, viewport: ViewportGeometry) -> Result<String, RenderError> {
        let body = self.render_body(slide, viewport.width)?;
        Ok(Layout::new(viewport).render(&body))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        media::loader::{ImageLoader, DEFAULT_IMAGE_LOAD_TIMEOUT},
        render::{
            ansi::{line_width, strip},
            highlighting::CodeHighlighter,
        },
    };
    use rstest::rstest;

    fn handlers() -> BlockHandlerRegistry {
        let images = ImageLoader::new(".", DEFAULT_IMAGE_LOAD_TIMEOUT);
        BlockHandlerRegistry::new(CodeHighlighter::default(), images).expect("registry failed")
    }

    fn render_body(slide: &str) -> Result<String, RenderError> {
        let styles = StyleRegistry::default();
        let handlers = handlers();
        SlideRenderer::new(&styles, &handlers).render_body(slide, 40)
    }

    #[rstest]
    #[case::empty("")]
    #[case::plain("nothing to see here")]
    #[case::multiline("one\ntwo\n\nthree")]
    #[case::at_sign("mail me @ home")]
    #[case::unterminated("@code[rust]{fn main() {")]
    fn plain_text_is_unchanged(#[case] slide: &str) {
        assert_eq!(render_body(slide).expect("render failed"), slide);
    }

    #[test]
    fn comment_is_removed() {
        let output = render_body("before @comment{don't show this} after").expect("render failed");
        assert_eq!(output, "before  after");
    }

    #[test]
    fn block_contents_are_not_styled() {
        let output = render_body("@code{!b{not bold}}").expect("render failed");
        assert_eq!(strip(&output), "!b{not bold}");
    }

    #[test]
    fn text_around_blocks_is_styled() {
        let output = render_body("!b{x}@comment{}!i{y}").expect("render failed");
        assert_eq!(output, "\x1b[1mx\x1b[0m\x1b[3my\x1b[0m");
    }

    #[test]
    fn handler_gets_viewport_width() {
        let output = render_body("@note{hi}").expect("render failed");
        for line in output.split('\n') {
            assert_eq!(line_width(line), 40);
        }
    }

    #[test]
    fn undefined_handler() {
        let error = render_body("@potato{hi}").expect_err("render succeeded");
        assert!(matches!(error, RenderError::UndefinedHandler(name) if name == "potato"));
    }

    #[test]
    fn undefined_style_in_text() {
        let error = render_body("@comment{} !potato{hi}").expect_err("render succeeded");
        assert!(matches!(error, RenderError::UndefinedStyle(name) if name == "potato"));
    }

    #[test]
    fn slide_is_centered() {
        let styles = StyleRegistry::default();
        let handlers = handlers();
        let renderer = SlideRenderer::new(&styles, &handlers);
        let output = renderer.render_slide("Hello !b{world}", ViewportGeometry::new(40, 10)).expect("render failed");
        let lines: Vec<_> = output.split('\n').collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(strip(lines[4]), format!("{}Hello world{}", " ".repeat(14), " ".repeat(15)));
        assert!(lines[4].contains("\x1b[1mworld\x1b[0m"));
    }
}
