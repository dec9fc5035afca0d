use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use translated_core_api::{ApiResult, Locale};

/// Environment variable holding the comma separated available locales
pub const AVAILABLE_LOCALES_VAR: &str = "TRANSLATED_AVAILABLE_LOCALES";
/// Environment variable holding the current locale
pub const CURRENT_LOCALE_VAR: &str = "TRANSLATED_LOCALE";
/// Environment variable holding the comma separated mandatory locales
pub const MANDATORY_LOCALES_VAR: &str = "TRANSLATED_MANDATORY_LOCALES";

/// # Documentation
/// Locale settings read by every resolution and validation call.
///
/// - `current`: locale used when an accessor is called without one
/// - `available`: ordered set of locales translations may exist for
/// - `mandatory`: locales `mandatory` attributes must be present in; falls back to
///   `available` when unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleContext {
    current: Locale,
    available: Vec<Locale>,
    mandatory: Option<Vec<Locale>>,
}

impl LocaleContext {
    pub fn new(current: Locale, available: Vec<Locale>) -> Self {
        Self {
            current,
            available,
            mandatory: None,
        }
    }

    /// Build a context from string codes.
    pub fn parse(current: &str, available: &[&str]) -> ApiResult<Self> {
        let available = available
            .iter()
            .map(|code| Locale::new(code))
            .collect::<ApiResult<Vec<_>>>()?;
        Ok(Self::new(Locale::new(current)?, available))
    }

    pub fn with_current(mut self, current: Locale) -> Self {
        self.current = current;
        self
    }

    pub fn with_mandatory(mut self, mandatory: Vec<Locale>) -> Self {
        self.mandatory = Some(mandatory);
        self
    }

    pub fn set_current(&mut self, current: Locale) {
        self.current = current;
    }

    pub fn set_available(&mut self, available: Vec<Locale>) {
        self.available = available;
    }

    /// `None` restores the fallback to the available locales.
    pub fn set_mandatory(&mut self, mandatory: Option<Vec<Locale>>) {
        self.mandatory = mandatory;
    }

    pub fn current(&self) -> &Locale {
        &self.current
    }

    pub fn available(&self) -> &[Locale] {
        &self.available
    }

    pub fn mandatory_locales(&self) -> &[Locale] {
        self.mandatory.as_deref().unwrap_or(&self.available)
    }

    pub fn is_available(&self, locale: &Locale) -> bool {
        self.available.contains(locale)
    }

    /// Load the context from `TRANSLATED_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let available = lookup(AVAILABLE_LOCALES_VAR)
            .context(format!("{AVAILABLE_LOCALES_VAR} not set"))?;
        let available = Locale::parse_list(&available)
            .context(format!("{AVAILABLE_LOCALES_VAR} is malformed"))?;
        if available.is_empty() {
            bail!("{AVAILABLE_LOCALES_VAR} must name at least one locale");
        }

        let current = match lookup(CURRENT_LOCALE_VAR) {
            Some(code) => {
                Locale::new(code.trim()).context(format!("{CURRENT_LOCALE_VAR} is malformed"))?
            }
            None => available[0].clone(),
        };
        if !available.contains(&current) {
            bail!("Current locale '{current}' is not one of the available locales");
        }

        let mandatory = lookup(MANDATORY_LOCALES_VAR)
            .map(|list| Locale::parse_list(&list))
            .transpose()
            .context(format!("{MANDATORY_LOCALES_VAR} is malformed"))?;

        Ok(Self {
            current,
            available,
            mandatory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_mandatory_falls_back_to_available() {
        let ctx = LocaleContext::parse("en", &["en", "lv"]).unwrap();
        assert_eq!(ctx.mandatory_locales(), ctx.available());

        let lv = Locale::new("lv").unwrap();
        let ctx = ctx.with_mandatory(vec![lv.clone()]);
        assert_eq!(ctx.mandatory_locales(), &[lv]);
    }

    #[test]
    fn test_set_mandatory_none_restores_fallback() {
        let mut ctx = LocaleContext::parse("en", &["en", "lv"])
            .unwrap()
            .with_mandatory(vec![]);
        assert!(ctx.mandatory_locales().is_empty());

        ctx.set_mandatory(None);
        assert_eq!(ctx.mandatory_locales().len(), 2);
    }

    #[test]
    fn test_from_lookup_defaults_current_to_first_available() {
        let ctx = LocaleContext::from_lookup(lookup(&[(AVAILABLE_LOCALES_VAR, "lv,ru")])).unwrap();
        assert_eq!(ctx.current(), &Locale::new("lv").unwrap());
        assert_eq!(ctx.available().len(), 2);
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let ctx = LocaleContext::from_lookup(lookup(&[
            (AVAILABLE_LOCALES_VAR, "en, lv, ru"),
            (CURRENT_LOCALE_VAR, "ru"),
            (MANDATORY_LOCALES_VAR, "en"),
        ]))
        .unwrap();

        assert_eq!(ctx.current(), &Locale::new("ru").unwrap());
        assert_eq!(ctx.mandatory_locales(), &[Locale::new("en").unwrap()]);
    }

    #[test]
    fn test_from_lookup_requires_available_locales() {
        let result = LocaleContext::from_lookup(lookup(&[]));
        assert!(result.unwrap_err().to_string().contains("not set"));
    }

    #[test]
    fn test_from_lookup_rejects_unavailable_current() {
        let result = LocaleContext::from_lookup(lookup(&[
            (AVAILABLE_LOCALES_VAR, "en"),
            (CURRENT_LOCALE_VAR, "de"),
        ]));
        assert!(result.is_err());
    }
}
