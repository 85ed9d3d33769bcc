use crate::markup::registry::StyleDefinition;
use serde::Deserialize;
use std::{collections::BTreeMap, fs, io, path::Path};

const HEADER_SEPARATOR: &str = "~~~";
const SLIDE_SEPARATOR: &str = "---";

/// The configuration at the top of a document.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// The author, displayed in the status line.
    #[serde(default)]
    pub author: Option<String>,

    /// Custom styles that can be used in style spans.
    #[serde(default)]
    pub style: BTreeMap<String, StyleDefinition>,
}

/// A document split into its configuration and slides.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub config: DocumentConfig,
    pub slides: Vec<String>,
}

impl Document {
    /// Load a document from a file.
    pub fn load(path: &Path) -> Result<Self, LoadDocumentError> {
        let contents =
            fs::read_to_string(path).map_err(|e| LoadDocumentError::Reading(path.display().to_string(), e))?;
        let document = Self::parse(&contents)?;
        tracing::info!("loaded {} slides from {}", document.slides.len(), path.display());
        Ok(document)
    }

    /// Parse a document.
    ///
    /// Anything before the first `~~~` line is the configuration. The rest is split into slides at
    /// every `---` line. Slides are trimmed and empty ones are dropped, but there's always at least
    /// one slide.
    pub fn parse(contents: &str) -> Result<Self, LoadDocumentError> {
        let (header, body) = Self::split_header(contents);
        let config = match header {
            Some(header) if !header.trim().is_empty() => serde_yaml::from_str(header)?,
            _ => DocumentConfig::default(),
        };
        let mut slides: Vec<String> = Self::split_slides(body)
            .into_iter()
            .map(str::trim)
            .filter(|slide| !slide.is_empty())
            .map(String::from)
            .collect();
        if slides.is_empty() {
            slides.push(String::new());
        }
        Ok(Self { config, slides })
    }

    fn split_header(contents: &str) -> (Option<&str>, &str) {
        let mut offset = 0;
        for line in contents.split_inclusive('\n') {
            if line.trim() == HEADER_SEPARATOR {
                return (Some(&contents[..offset]), &contents[offset + line.len()..]);
            }
            offset += line.len();
        }
        (None, contents)
    }

    fn split_slides(body: &str) -> Vec<&str> {
        let mut slides = Vec::new();
        let mut start = 0;
        let mut offset = 0;
        for line in body.split_inclusive('\n') {
            if line.trim() == SLIDE_SEPARATOR {
                slides.push(&body[start..offset]);
                start = offset + line.len();
            }
            offset += line.len();
        }
        slides.push(&body[start..]);
        slides
    }
}

/// An error loading a document.
#[derive(thiserror::Error, Debug)]
pub enum LoadDocumentError {
    #[error("reading {0}: {1}")]
    Reading(String, io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::markup::text_style::Color;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn header_and_slides() {
        let document = Document::parse("author: Jane\n~~~\nHello !b{world}\n---\n@code[go]{fmt.Println(\"hi\")}")
            .expect("parse failed");
        assert_eq!(document.config.author.as_deref(), Some("Jane"));
        assert_eq!(document.slides, &["Hello !b{world}", "@code[go]{fmt.Println(\"hi\")}"]);
    }

    #[rstest]
    #[case::no_header("first\n---\nsecond", &["first", "second"])]
    #[case::empty_header("~~~\nfirst", &["first"])]
    #[case::padded_separators("first\n  ---  \nsecond\n", &["first", "second"])]
    #[case::dashes_within_line("a --- b\n---\nc", &["a --- b", "c"])]
    #[case::empty_slides("---\nfirst\n---\n\n---\n---\nsecond\n---", &["first", "second"])]
    #[case::crlf("first\r\n---\r\nsecond\r\n", &["first", "second"])]
    #[case::multiline("a\n\nb\n---\nc", &["a\n\nb", "c"])]
    #[case::empty("", &[""])]
    #[case::only_separators("---\n---", &[""])]
    fn slides(#[case] input: &str, #[case] expected: &[&str]) {
        let document = Document::parse(input).expect("parse failed");
        assert_eq!(document.slides, expected);
        assert_eq!(document.config, DocumentConfig::default());
    }

    #[test]
    fn custom_styles() {
        let input = "style:\n  fancy:\n    bold: true\n    fg: '#ff0000'\n  calm:\n    bg: '63'\n~~~\n!fancy{hi}";
        let document = Document::parse(input).expect("parse failed");
        let fancy = &document.config.style["fancy"];
        assert!(fancy.bold);
        assert_eq!(fancy.fg, Some(Color::new(255, 0, 0)));
        assert_eq!(document.config.style["calm"].bg, Some(Color::Ansi(63)));
    }

    #[rstest]
    #[case::not_yaml("author: [\n~~~\nhi")]
    #[case::unknown_key("title: nope\n~~~\nhi")]
    #[case::bad_color("style:\n  x:\n    fg: potato\n~~~\nhi")]
    fn invalid_header(#[case] input: &str) {
        let error = Document::parse(input).expect_err("parse succeeded");
        assert!(matches!(error, LoadDocumentError::InvalidConfig(_)));
    }

    #[test]
    fn load_file() {
        let mut file = NamedTempFile::new().expect("no temp file");
        file.write_all(b"author: Me\n~~~\none\n---\ntwo").expect("write failed");
        let document = Document::load(file.path()).expect("load failed");
        assert_eq!(document.slides.len(), 2);
    }

    #[test]
    fn load_missing_file() {
        let error = Document::load(Path::new("/this/does/not/exist.txt")).expect_err("load succeeded");
        assert!(matches!(error, LoadDocumentError::Reading(..)));
    }
}
