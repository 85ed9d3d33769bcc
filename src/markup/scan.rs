//! Scanning of the two markup constructs.
//!
//! Both constructs use shortest-match semantics: names are the shortest non empty run of
//! characters (excluding line breaks) that lets the rest of the construct match, and contents end
//! at the first closing brace. This means constructs never nest: `!b{a !i{b} c}` is a single span
//! named `b` containing `a !i{b`.

use std::ops::Range;

const SPAN_PREFIX: char = '!';
const BLOCK_PREFIX: char = '@';

/// A style span: `!<name>{<content>}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SpanMatch<'a> {
    /// The range of the entire span within the scanned text.
    pub(crate) range: Range<usize>,
    pub(crate) name: &'a str,
    pub(crate) content: &'a str,
    /// The entire matched text.
    pub(crate) source: &'a str,
}

/// A block invocation: `@<name>[<options>]{<content>}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BlockMatch<'a> {
    /// The range of the entire block within the scanned text.
    pub(crate) range: Range<usize>,
    pub(crate) name: &'a str,
    pub(crate) options: Option<&'a str>,
    pub(crate) content: &'a str,
    /// The entire matched text.
    pub(crate) source: &'a str,
}

impl BlockMatch<'_> {
    /// The options for this block, or an empty string if there are none.
    pub(crate) fn options_or_empty(&self) -> &str {
        self.options.unwrap_or_default()
    }
}

/// Find the first style span in the given text.
pub(crate) fn find_next_span(text: &str) -> Option<SpanMatch<'_>> {
    text.match_indices(SPAN_PREFIX).find_map(|(start, _)| match_span_at(text, start))
}

/// Find the first block invocation in the given text.
pub(crate) fn find_next_block(text: &str) -> Option<BlockMatch<'_>> {
    text.match_indices(BLOCK_PREFIX).find_map(|(start, _)| match_block_at(text, start))
}

fn match_span_at(text: &str, start: usize) -> Option<SpanMatch<'_>> {
    let name_start = start + SPAN_PREFIX.len_utf8();
    let rest = &text[name_start..];
    for (offset, c) in rest.char_indices() {
        // Names can't span lines so no longer name can match either.
        if c == '\n' {
            return None;
        }
        if offset == 0 || c != '{' {
            continue;
        }
        let content_start = offset + 1;
        if let Some(content_length) = find_closing_brace(&rest[content_start..], 1) {
            let end = name_start + content_start + content_length + 1;
            return Some(SpanMatch {
                range: start..end,
                name: &rest[..offset],
                content: &rest[content_start..content_start + content_length],
                source: &text[start..end],
            });
        }
    }
    None
}

fn match_block_at(text: &str, start: usize) -> Option<BlockMatch<'_>> {
    let name_start = start + BLOCK_PREFIX.len_utf8();
    let rest = &text[name_start..];
    for (offset, c) in rest.char_indices() {
        if c == '\n' {
            return None;
        }
        if offset == 0 {
            continue;
        }
        let parsed = match c {
            '[' => match_options(rest, offset),
            '{' => find_closing_brace(&rest[offset + 1..], 0).map(|length| (None, offset + 1, length)),
            _ => None,
        };
        if let Some((options, content_start, content_length)) = parsed {
            let end = name_start + content_start + content_length + 1;
            return Some(BlockMatch {
                range: start..end,
                name: &rest[..offset],
                options,
                content: &rest[content_start..content_start + content_length],
                source: &text[start..end],
            });
        }
    }
    None
}

// Matches `[<options>]{<content>}` starting at the opening bracket in `text`. Returns the options,
// the start of the content and its length.
fn match_options(text: &str, bracket: usize) -> Option<(Option<&str>, usize, usize)> {
    let options_start = bracket + 1;
    for (offset, c) in text[options_start..].char_indices() {
        if c == '\n' {
            return None;
        }
        let options_end = options_start + offset;
        if !text[options_end..].starts_with("]{") {
            continue;
        }
        let content_start = options_end + 2;
        if let Some(length) = find_closing_brace(&text[content_start..], 0) {
            return Some((Some(&text[options_start..options_end]), content_start, length));
        }
    }
    None
}

// Finds the first `}` in `text` that leaves at least `minimum_length` characters before it.
fn find_closing_brace(text: &str, minimum_length: usize) -> Option<usize> {
    let skip: usize = text.chars().take(minimum_length).map(char::len_utf8).sum();
    if text[..skip].chars().count() < minimum_length {
        return None;
    }
    text[skip..].find('}').map(|index| index + skip)
}

/// A piece of a slide: either plain text or a block invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BlockSegment<'a> {
    Text(&'a str),
    Block(BlockMatch<'a>),
}

/// A piece of text: either plain text or a style span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum InlineSegment<'a> {
    Text(&'a str),
    Span(SpanMatch<'a>),
}

/// Splits a slide into plain text regions and block invocations, in order.
pub(crate) struct BlockSegments<'a> {
    remaining: &'a str,
    pending: Option<BlockMatch<'a>>,
}

impl<'a> BlockSegments<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { remaining: text, pending: None }
    }
}

impl<'a> Iterator for BlockSegments<'a> {
    type Item = BlockSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(block) = self.pending.take() {
            return Some(BlockSegment::Block(block));
        }
        if self.remaining.is_empty() {
            return None;
        }
        let text = self.remaining;
        match find_next_block(text) {
            Some(block) => {
                self.remaining = &text[block.range.end..];
                let before = &text[..block.range.start];
                if before.is_empty() {
                    Some(BlockSegment::Block(block))
                } else {
                    self.pending = Some(block);
                    Some(BlockSegment::Text(before))
                }
            }
            None => {
                self.remaining = "";
                Some(BlockSegment::Text(text))
            }
        }
    }
}

/// Splits text into plain text regions and style spans, in order.
pub(crate) struct InlineSegments<'a> {
    remaining: &'a str,
    pending: Option<SpanMatch<'a>>,
}

impl<'a> InlineSegments<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { remaining: text, pending: None }
    }
}

impl<'a> Iterator for InlineSegments<'a> {
    type Item = InlineSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(span) = self.pending.take() {
            return Some(InlineSegment::Span(span));
        }
        if self.remaining.is_empty() {
            return None;
        }
        let text = self.remaining;
        match find_next_span(text) {
            Some(span) => {
                self.remaining = &text[span.range.end..];
                let before = &text[..span.range.start];
                if before.is_empty() {
                    Some(InlineSegment::Span(span))
                } else {
                    self.pending = Some(span);
                    Some(InlineSegment::Text(before))
                }
            }
            None => {
                self.remaining = "";
                Some(InlineSegment::Text(text))
            }
        }
    }
}
