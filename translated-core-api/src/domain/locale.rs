use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TranslationError;

/// Longest locale identifier accepted (covers tags like `zh-Hant-TW`).
pub const LOCALE_MAX_LEN: usize = 16;

/// # Documentation
/// A language/region identifier such as `en`, `lv` or `pt-BR`.
///
/// Locales are compared as plain strings: `en` and `EN` are different locales.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(HeaplessString<LOCALE_MAX_LEN>);

impl Locale {
    /// Parse a locale identifier
    ///
    /// # Returns
    /// * `Ok(Locale)` - for a non-empty identifier without whitespace
    /// * `Err(TranslationError::InvalidArgument)` - otherwise
    pub fn new(code: &str) -> Result<Self, TranslationError> {
        if code.is_empty() {
            return Err(TranslationError::InvalidArgument(
                "locale must not be empty".to_string(),
            ));
        }
        if code.chars().any(char::is_whitespace) {
            return Err(TranslationError::InvalidArgument(format!(
                "locale '{code}' must not contain whitespace"
            )));
        }
        HeaplessString::try_from(code).map(Locale).map_err(|_| {
            TranslationError::InvalidArgument(format!(
                "locale '{code}' is too long (max {LOCALE_MAX_LEN} chars)"
            ))
        })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Parse a comma separated locale list, skipping empty entries.
    pub fn parse_list(list: &str) -> Result<Vec<Locale>, TranslationError> {
        list.split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(Locale::new)
            .collect()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::new(s)
    }
}

impl TryFrom<&str> for Locale {
    type Error = TranslationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Locale::new(value)
    }
}

impl TryFrom<String> for Locale {
    type Error = TranslationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Locale::new(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.as_str().to_string()
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Locale {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Locale {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_new() {
        let locale = Locale::new("lv").unwrap();
        assert_eq!(locale.as_str(), "lv");
        assert_eq!(locale, "lv");
        assert_eq!(locale.to_string(), "lv");
    }

    #[test]
    fn test_locale_rejects_empty_and_whitespace() {
        assert!(matches!(Locale::new(""), Err(TranslationError::InvalidArgument(_))));
        assert!(matches!(Locale::new("e n"), Err(TranslationError::InvalidArgument(_))));
    }

    #[test]
    fn test_locale_rejects_too_long() {
        let result = Locale::new("abcdefghijklmnopq");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_locale_is_case_sensitive() {
        assert_ne!(Locale::new("en").unwrap(), Locale::new("EN").unwrap());
    }

    #[test]
    fn test_parse_list() {
        let locales = Locale::parse_list("en, lv,,ru ").unwrap();
        let codes: Vec<&str> = locales.iter().map(Locale::as_str).collect();
        assert_eq!(codes, vec!["en", "lv", "ru"]);
    }

    #[test]
    fn test_locale_serde_as_plain_string() {
        let locale = Locale::new("pt-BR").unwrap();
        let json = serde_json::to_string(&locale).unwrap();
        assert_eq!(json, "\"pt-BR\"");

        let parsed: Locale = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, locale);
        assert!(serde_json::from_str::<Locale>("\"\"").is_err());
    }
}
