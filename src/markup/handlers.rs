use super::{
    registry::{merge_unique, RegistryError},
    text_style::{Color, TextStyle},
};
use crate::{
    media::{ascii::AsciiPrinter, loader::{ImageLoader, LoadImageError}},
    render::{ansi::truncate, block::StyledBlock, highlighting::CodeHighlighter},
};
use serde::Deserialize;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

const IMAGE_NOT_FOUND: &str = "IMAGE NOT FOUND";
const IMAGE_NOT_FOUND_BORDER: Color = Color::Ansi(63);

/// The kinds of block handlers available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum BlockHandler {
    /// Syntax highlighted code, using the options as the language.
    Code,

    /// A padded box using a neutral palette.
    Note,

    /// A padded box using an alert palette.
    Warning,

    /// An image loaded from the path in the content.
    Image,

    /// Renders nothing.
    Comment,
}

impl BlockHandler {
    pub(crate) fn name(&self) -> &'static str {
        self.into()
    }
}

/// The set of block handlers that can be invoked from a slide.
#[derive(Debug)]
pub struct BlockHandlerRegistry {
    handlers: BTreeMap<String, BlockHandler>,
    highlighter: CodeHighlighter,
    images: ImageLoader,
}

impl BlockHandlerRegistry {
    pub fn new(highlighter: CodeHighlighter, images: ImageLoader) -> Result<Self, RegistryError> {
        let builtin: Vec<_> = BlockHandler::iter().map(|handler| (handler.name().to_string(), handler)).collect();
        let aliases = vec![("img".to_string(), BlockHandler::Image)];
        let handlers = merge_unique([builtin, aliases])?;
        Ok(Self { handlers, highlighter, images })
    }

    pub(crate) fn get(&self, name: &str) -> Option<BlockHandler> {
        self.handlers.get(name).copied()
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Check whether any image that was too slow to load is now available.
    pub(crate) fn poll_images(&self) -> bool {
        self.images.poll_pending()
    }

    /// Run a handler over a block's options and content.
    ///
    /// Handlers own their styling and never produce lines wider than `max_width`.
    pub(crate) fn invoke(&self, handler: BlockHandler, options: &str, content: &str, max_width: u16) -> String {
        match handler {
            BlockHandler::Code => self.render_code(options, content, max_width),
            BlockHandler::Note => {
                Self::render_box(content, max_width, Color::new(0xc1, 0xc6, 0xb2), Color::new(0x35, 0x35, 0x33))
            }
            BlockHandler::Warning => {
                Self::render_box(content, max_width, Color::new(0xff, 0xfd, 0xf5), Color::new(0xff, 0x5f, 0x87))
            }
            BlockHandler::Image => self.render_image(options, content, max_width),
            BlockHandler::Comment => String::new(),
        }
    }

    fn render_code(&self, language: &str, code: &str, max_width: u16) -> String {
        let lines = self.highlighter.highlight(code, language);
        lines.iter().map(|line| truncate(line, max_width as usize)).collect::<Vec<_>>().join("\n")
    }

    fn render_box(content: &str, max_width: u16, foreground: Color, background: Color) -> String {
        let style = TextStyle::default().fg_color(foreground).bg_color(background);
        StyledBlock::new(style).width(max_width).max_width(max_width).padding(1).wrap().render(content.trim())
    }

    fn render_image(&self, options: &str, path: &str, max_width: u16) -> String {
        let image = match self.images.load(path) {
            Ok(image) => image,
            Err(e) => {
                match e {
                    LoadImageError::Pending(_) => tracing::debug!("{e}"),
                    _ => tracing::warn!("could not load image: {e}"),
                };
                let placeholder = StyledBlock::default().border(Some(IMAGE_NOT_FOUND_BORDER)).max_width(max_width);
                return placeholder.render(IMAGE_NOT_FOUND);
            }
        };
        let size = ImageSize::parse(options, max_width);
        AsciiPrinter.render(&image, size.width, size.height)
    }
}

/// The size of an image, in columns and rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ImageSize {
    width: u16,
    height: u16,
}

impl ImageSize {
    /// Parse the options of an image block.
    ///
    /// Missing or malformed options make the image as wide as allowed and half as tall. The width
    /// never exceeds `max_width`.
    fn parse(options: &str, max_width: u16) -> Self {
        let max_width = max_width.max(1);
        let defaults = Self { width: max_width, height: (max_width / 2).max(1) };
        if options.trim().is_empty() {
            return defaults;
        }
        let options: ImageOptions = match serde_yaml::from_str(options) {
            Ok(options) => options,
            Err(e) => {
                tracing::debug!("invalid image options '{options}': {e}");
                return defaults;
            }
        };
        let width = options.width.unwrap_or(defaults.width).clamp(1, max_width);
        let height = options.height.unwrap_or(defaults.height).max(1);
        Self { width, height }
    }
}

#[derive(Deserialize)]
struct ImageOptions {
    #[serde(default, alias = "Width")]
    width: Option<u16>,

    #[serde(default, alias = "Height")]
    height: Option<u16>,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        media::loader::DEFAULT_IMAGE_LOAD_TIMEOUT,
        render::ansi::{line_width, measure, strip},
    };
    use image::{Rgba, RgbaImage};
    use rstest::rstest;
    use tempfile::{tempdir, TempDir};

    fn registry(base: &TempDir) -> BlockHandlerRegistry {
        let images = ImageLoader::new(base.path(), DEFAULT_IMAGE_LOAD_TIMEOUT);
        BlockHandlerRegistry::new(CodeHighlighter::default(), images).expect("registry failed")
    }

    #[rstest]
    #[case::code("code", BlockHandler::Code)]
    #[case::note("note", BlockHandler::Note)]
    #[case::warning("warning", BlockHandler::Warning)]
    #[case::image("image", BlockHandler::Image)]
    #[case::image_alias("img", BlockHandler::Image)]
    #[case::comment("comment", BlockHandler::Comment)]
    fn builtin_handlers(#[case] name: &str, #[case] expected: BlockHandler) {
        let dir = tempdir().expect("no temp dir");
        let registry = registry(&dir);
        assert_eq!(registry.get(name), Some(expected));
    }

    #[test]
    fn unknown_handler() {
        let dir = tempdir().expect("no temp dir");
        assert!(!registry(&dir).contains("potato"));
    }

    #[test]
    fn comment_renders_nothing() {
        let dir = tempdir().expect("no temp dir");
        assert_eq!(registry(&dir).invoke(BlockHandler::Comment, "", "hidden", 40), "");
    }

    #[test]
    fn code_is_highlighted_and_cut() {
        let dir = tempdir().expect("no temp dir");
        let output = registry(&dir).invoke(BlockHandler::Code, "go", "fmt.Println(\"hi\")\nx := 1", 8);
        assert!(output.contains("\x1b["));
        assert_eq!(strip(&output), "fmt.Prin\nx := 1");
    }

    #[rstest]
    #[case::note(BlockHandler::Note)]
    #[case::warning(BlockHandler::Warning)]
    fn boxes_fill_width(#[case] handler: BlockHandler) {
        let dir = tempdir().expect("no temp dir");
        let output = registry(&dir).invoke(handler, "", "\nsome words that need wrapping\n", 12);
        for line in output.split('\n') {
            assert_eq!(line_width(line), 12);
        }
        let text = strip(&output);
        let lines: Vec<_> = text.split('\n').map(str::trim).filter(|line| !line.is_empty()).collect();
        assert_eq!(lines, &["some words", "that need", "wrapping"]);
    }

    #[test]
    fn missing_image() {
        let dir = tempdir().expect("no temp dir");
        let output = registry(&dir).invoke(BlockHandler::Image, "", "missing.png", 40);
        assert_eq!(strip(&output), "┌───────────────┐\n│IMAGE NOT FOUND│\n└───────────────┘");
    }

    #[cfg(unix)]
    #[test]
    fn slow_image_waits_only_once() {
        use std::{fs, process::Command, time::{Duration, Instant}};

        let dir = tempdir().expect("no temp dir");
        let path = dir.path().join("slow.png");
        assert!(Command::new("mkfifo").arg(&path).status().expect("mkfifo failed").success());
        let images = ImageLoader::new(dir.path(), Duration::from_millis(200));
        let registry = BlockHandlerRegistry::new(CodeHighlighter::default(), images).expect("registry failed");

        let expected = "┌───────────────┐\n│IMAGE NOT FOUND│\n└───────────────┘";
        let output = registry.invoke(BlockHandler::Image, "", "slow.png", 40);
        assert_eq!(strip(&output), expected);

        let start = Instant::now();
        for _ in 0..2 {
            let output = registry.invoke(BlockHandler::Image, "", "slow.png", 40);
            assert_eq!(strip(&output), expected);
        }
        assert!(start.elapsed() < Duration::from_millis(200));

        // Unblock the reader so the worker finishes.
        fs::write(&path, b"").expect("write failed");
    }

    #[test]
    fn existing_image() {
        let dir = tempdir().expect("no temp dir");
        let image = RgbaImage::from_pixel(10, 10, Rgba([1, 2, 3, 255]));
        image.save(dir.path().join("square.png")).expect("save failed");
        let output = registry(&dir).invoke(BlockHandler::Image, "{width: 6, height: 3}", " square.png ", 40);
        assert_eq!(measure(&output), (6, 3));
    }

    #[rstest]
    #[case::empty("", 40, ImageSize { width: 40, height: 20 })]
    #[case::lowercase("{width: 10, height: 4}", 40, ImageSize { width: 10, height: 4 })]
    #[case::capitalized("{Width: 10, Height: 4}", 40, ImageSize { width: 10, height: 4 })]
    #[case::partial("{Height: 4}", 40, ImageSize { width: 40, height: 4 })]
    #[case::malformed("{{nope", 40, ImageSize { width: 40, height: 20 })]
    #[case::too_wide("{width: 100}", 30, ImageSize { width: 30, height: 15 })]
    #[case::zero("{width: 0, height: 0}", 30, ImageSize { width: 1, height: 1 })]
    fn image_sizes(#[case] options: &str, #[case] max_width: u16, #[case] expected: ImageSize) {
        assert_eq!(ImageSize::parse(options, max_width), expected);
    }
}
