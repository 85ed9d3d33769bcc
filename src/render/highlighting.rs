use once_cell::sync::Lazy;
use syntect::{
    easy::HighlightLines,
    highlighting::{Style, Theme, ThemeSet},
    parsing::{SyntaxReference, SyntaxSet},
    util::{as_24_bit_terminal_escaped, LinesWithEndings},
};

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// The theme used when none is configured.
pub const DEFAULT_HIGHLIGHT_THEME: &str = "base16-ocean.dark";

const TAB_WIDTH: usize = 4;

/// A code highlighter.
#[derive(Clone, Debug)]
pub struct CodeHighlighter {
    theme: Theme,
}

impl CodeHighlighter {
    /// Construct a new highlighted using the given [syntect] theme name.
    pub fn new(theme: &str) -> Result<Self, ThemeNotFound> {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set.themes.remove(theme).ok_or_else(|| ThemeNotFound(theme.to_string()))?;
        Ok(Self { theme })
    }

    /// Highlight a piece of code.
    ///
    /// The language hint can be a language name or a file extension. Unknown languages are
    /// rendered as plain text. Every returned line ends with a style reset.
    pub(crate) fn highlight(&self, code: &str, language_hint: &str) -> Vec<String> {
        let code = code.replace('\t', &" ".repeat(TAB_WIDTH));
        let syntax = Self::find_syntax(language_hint);
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(&code) {
            let formatted = match highlighter.highlight_line(line, &SYNTAX_SET) {
                Ok(ranges) => {
                    let ranges: Vec<(Style, &str)> =
                        ranges.into_iter().map(|(style, text)| (style, text.trim_end_matches(['\r', '\n']))).collect();
                    format!("{}\x1b[0m", as_24_bit_terminal_escaped(&ranges, false))
                }
                Err(e) => {
                    tracing::warn!("failed to highlight line: {e}");
                    line.trim_end_matches(['\r', '\n']).to_string()
                }
            };
            lines.push(formatted);
        }
        lines
    }

    fn find_syntax(language_hint: &str) -> &'static SyntaxReference {
        let language_hint = language_hint.trim();
        if language_hint.is_empty() {
            return SYNTAX_SET.find_syntax_plain_text();
        }
        SYNTAX_SET.find_syntax_by_token(language_hint).unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_THEME).expect("default theme not found")
    }
}

/// A theme could not be found.
#[derive(Debug, thiserror::Error)]
#[error("highlighting theme '{0}' not found")]
pub struct ThemeNotFound(String);
