use crate::{media::loader::DEFAULT_IMAGE_LOAD_TIMEOUT, render::highlighting::DEFAULT_HIGHLIGHT_THEME};
use serde::Deserialize;
use std::{fs, io, path::Path, time::Duration};

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The defaults used for every presentation.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Load the config from a path.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ConfigLoadError::NotFound),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("config file not found")]
    NotFound,

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// The syntect theme used to highlight code blocks.
    #[serde(default = "default_highlight_theme")]
    pub highlight_theme: String,

    /// How long to wait for an image to load before giving up, in milliseconds.
    #[serde(default = "default_image_load_timeout")]
    pub image_load_timeout_ms: u64,
}

impl DefaultsConfig {
    pub fn image_load_timeout(&self) -> Duration {
        Duration::from_millis(self.image_load_timeout_ms)
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { highlight_theme: default_highlight_theme(), image_load_timeout_ms: default_image_load_timeout() }
    }
}

fn default_highlight_theme() -> String {
    DEFAULT_HIGHLIGHT_THEME.to_string()
}

fn default_image_load_timeout() -> u64 {
    DEFAULT_IMAGE_LOAD_TIMEOUT.as_millis() as u64
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load(contents: &str) -> Result<Config, ConfigLoadError> {
        let mut file = NamedTempFile::new().expect("no temp file");
        file.write_all(contents.as_bytes()).expect("write failed");
        Config::load(file.path())
    }

    #[test]
    fn defaults() {
        let config = load("").expect("load failed");
        assert_eq!(config.defaults.highlight_theme, "base16-ocean.dark");
        assert_eq!(config.defaults.image_load_timeout(), DEFAULT_IMAGE_LOAD_TIMEOUT);
    }

    #[test]
    fn overrides() {
        let config = load("defaults:\n  highlight_theme: InspiredGitHub\n  image_load_timeout_ms: 50").expect("load failed");
        assert_eq!(config.defaults.highlight_theme, "InspiredGitHub");
        assert_eq!(config.defaults.image_load_timeout(), Duration::from_millis(50));
    }

    #[test]
    fn partial_defaults() {
        let config = load("defaults:\n  image_load_timeout_ms: 10").expect("load failed");
        assert_eq!(config.defaults.highlight_theme, DEFAULT_HIGHLIGHT_THEME);
    }

    #[test]
    fn unknown_keys() {
        let error = load("defaults:\n  potato: 42").expect_err("load succeeded");
        assert!(matches!(error, ConfigLoadError::Invalid(_)));
    }

    #[test]
    fn missing_file() {
        let error = Config::load(Path::new("/this/does/not/exist.yaml")).expect_err("load succeeded");
        assert!(matches!(error, ConfigLoadError::NotFound));
    }
}
