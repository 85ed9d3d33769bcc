use super::text_style::{Color, TextStyle};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Merge several sources into a single map, failing if any key is defined more than once.
pub(crate) fn merge_unique<V, S, I>(sources: I) -> Result<BTreeMap<String, V>, RegistryError>
where
    S: IntoIterator<Item = (String, V)>,
    I: IntoIterator<Item = S>,
{
    let mut output = BTreeMap::new();
    for source in sources {
        for (name, value) in source {
            if output.contains_key(&name) {
                return Err(RegistryError::Duplicate(name));
            }
            output.insert(name, value);
        }
    }
    Ok(output)
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("'{0}' is defined more than once")]
    Duplicate(String),
}

/// A style as declared in a presentation's configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StyleDefinition {
    #[serde(default)]
    pub(crate) bold: bool,

    #[serde(default)]
    pub(crate) italic: bool,

    #[serde(default)]
    pub(crate) fg: Option<Color>,

    #[serde(default)]
    pub(crate) bg: Option<Color>,
}

impl From<&StyleDefinition> for TextStyle {
    fn from(definition: &StyleDefinition) -> Self {
        let mut style = TextStyle::default();
        if definition.bold {
            style = style.bold();
        }
        if definition.italic {
            style = style.italics();
        }
        if let Some(color) = definition.fg {
            style = style.fg_color(color);
        }
        if let Some(color) = definition.bg {
            style = style.bg_color(color);
        }
        style
    }
}

/// The set of styles that can be referenced in style spans.
#[derive(Clone, Debug)]
pub struct StyleRegistry {
    styles: BTreeMap<String, TextStyle>,
}

impl StyleRegistry {
    /// Build a registry out of the built in styles plus the given custom ones.
    pub fn new<'a, I>(custom: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (&'a String, &'a StyleDefinition)>,
    {
        let custom: Vec<(String, TextStyle)> =
            custom.into_iter().map(|(name, definition)| (name.clone(), definition.into())).collect();
        let styles = merge_unique([Self::builtin(), custom])?;
        Ok(Self { styles })
    }

    /// The styles that are always available.
    pub(crate) fn builtin() -> Vec<(String, TextStyle)> {
        let plain = TextStyle::default();
        [
            ("h1", plain.bold().bg_color(Color::new(0xf2, 0x5d, 0x94))),
            ("b", plain.bold()),
            ("i", plain.italics()),
            ("u", plain.underlined()),
            ("s", plain.strikethrough()),
            ("red", plain.fg_color(Color::Red)),
            ("green", plain.fg_color(Color::Green)),
            ("yellow", plain.fg_color(Color::Yellow)),
            ("blue", plain.fg_color(Color::Blue)),
            ("white", plain.fg_color(Color::White)),
        ]
        .into_iter()
        .map(|(name, style)| (name.to_string(), style))
        .collect()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&TextStyle> {
        self.styles.get(name)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self { styles: Self::builtin().into_iter().collect() }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builtin_styles() {
        let registry = StyleRegistry::default();
        for name in ["h1", "b", "i", "red", "green", "yellow", "blue", "white"] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert!(registry.get("b").unwrap().is_bold());
        assert!(!registry.contains("potato"));
    }

    #[test]
    fn custom_styles() {
        let definition = StyleDefinition { bold: true, fg: Some(Color::Cyan), ..Default::default() };
        let custom = BTreeMap::from([("fancy".to_string(), definition)]);
        let registry = StyleRegistry::new(&custom).expect("merge failed");
        let style = registry.get("fancy").expect("style not found");
        assert!(style.is_bold());
        assert_eq!(style.colors.foreground, Some(Color::Cyan));
        assert!(registry.contains("b"));
    }

    #[test]
    fn duplicate_style_names_name_the_key() {
        let custom = BTreeMap::from([("b".to_string(), StyleDefinition::default())]);
        let error = StyleRegistry::new(&custom).expect_err("merge succeeded");
        let RegistryError::Duplicate(name) = &error;
        assert_eq!(name, "b");
        assert!(error.to_string().contains("'b'"));
    }

    #[test]
    fn merge_many_sources() {
        let sources = vec![vec![("a".to_string(), 1)], vec![("b".to_string(), 2)], vec![("c".to_string(), 3)]];
        let merged = merge_unique(sources).expect("merge failed");
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn merge_duplicate_in_later_source() {
        let sources = vec![vec![("a".to_string(), 1)], vec![("b".to_string(), 2)], vec![("a".to_string(), 3)]];
        let error = merge_unique(sources).expect_err("merge succeeded");
        assert!(matches!(error, RegistryError::Duplicate(name) if name == "a"));
    }

    #[test]
    fn deserialize_definition() {
        let definition: StyleDefinition = serde_yaml::from_str("bold: true\nfg: '#ff0000'\nbg: blue").unwrap();
        assert!(definition.bold);
        assert!(!definition.italic);
        assert_eq!(definition.fg, Some(Color::new(255, 0, 0)));
        assert_eq!(definition.bg, Some(Color::Blue));
    }
}
