use super::{
    handlers::BlockHandlerRegistry,
    registry::StyleRegistry,
    scan::{BlockSegment, BlockSegments, InlineSegment, InlineSegments},
};
use std::fmt;

/// The kind of reference that could not be resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ReferenceKind {
    UnknownStyle,
    UnknownHandler,
}

/// A reference to a style or block handler that doesn't exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ValidationError {
    pub(crate) slide_index: usize,
    pub(crate) kind: ReferenceKind,
    pub(crate) name: String,
    pub(crate) matched_text: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ReferenceKind::UnknownStyle => "style",
            ReferenceKind::UnknownHandler => "block handler",
        };
        // Keep every error in a single line.
        let text = self.matched_text.replace('\n', "\\n");
        write!(f, "slide {}: undefined {kind} '{}' in '{text}'", self.slide_index + 1, self.name)
    }
}

/// Find every reference to an undefined style or block handler in a set of slides.
///
/// Errors are returned in the order they appear in the presentation.
pub(crate) fn validate<S: AsRef<str>>(
    slides: &[S],
    styles: &StyleRegistry,
    handlers: &BlockHandlerRegistry,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (slide_index, slide) in slides.iter().enumerate() {
        for segment in BlockSegments::new(slide.as_ref()) {
            match segment {
                BlockSegment::Block(block) => {
                    if !handlers.contains(block.name) {
                        errors.push(ValidationError {
                            slide_index,
                            kind: ReferenceKind::UnknownHandler,
                            name: block.name.to_string(),
                            matched_text: block.source.to_string(),
                        });
                    }
                }
                // Block contents are never scanned for spans, only the text around them.
                BlockSegment::Text(text) => {
                    for segment in InlineSegments::new(text) {
                        let InlineSegment::Span(span) = segment else {
                            continue;
                        };
                        if !styles.contains(span.name) {
                            errors.push(ValidationError {
                                slide_index,
                                kind: ReferenceKind::UnknownStyle,
                                name: span.name.to_string(),
                                matched_text: span.source.to_string(),
                            });
                        }
                    }
                }
            }
        }
    }
    errors
}
