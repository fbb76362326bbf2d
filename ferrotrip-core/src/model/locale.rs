use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Requested output language as a BCP 47 style tag, e.g. `en` or `fr-CA`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Primary language subtag: `fr` for `fr-CA`.
    pub fn language(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or(&self.0)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

/// Text with optional per-language translations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalizedText {
    default: String,
    translations: HashMap<String, String>,
}

impl LocalizedText {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            translations: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_translation(mut self, tag: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(tag.into(), text.into());
        self
    }

    /// Best match for the locale: exact tag, then language, then the default.
    pub fn to_locale(&self, locale: &Locale) -> &str {
        self.translations
            .get(locale.tag())
            .or_else(|| self.translations.get(locale.language()))
            .map_or(self.default.as_str(), String::as_str)
    }

    pub fn default_text(&self) -> &str {
        &self.default
    }
}

impl From<&str> for LocalizedText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocalizedText {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
