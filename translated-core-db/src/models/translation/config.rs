use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use translated_core_api::{ApiResult, Locale, TranslationError};

use crate::models::locale_context::LocaleContext;

/// Callable evaluated against the parent model, returning the locales to require.
pub type LocaleResolver<P> = Arc<dyn Fn(&P) -> Vec<Locale> + Send + Sync>;

/// # Documentation
/// Locale set of a `mandatory: {locales: ...}` declaration.
pub enum LocaleSelector<P> {
    One(Locale),
    Many(Vec<Locale>),
    Dynamic(LocaleResolver<P>),
}

impl<P> LocaleSelector<P> {
    pub fn dynamic(resolver: impl Fn(&P) -> Vec<Locale> + Send + Sync + 'static) -> Self {
        LocaleSelector::Dynamic(Arc::new(resolver))
    }

    /// Resolve the locale set for one parent instance.
    pub fn resolve(&self, parent: &P) -> Vec<Locale> {
        match self {
            LocaleSelector::One(locale) => vec![locale.clone()],
            LocaleSelector::Many(locales) => locales.clone(),
            LocaleSelector::Dynamic(resolver) => resolver(parent),
        }
    }
}

impl<P> Clone for LocaleSelector<P> {
    fn clone(&self) -> Self {
        match self {
            LocaleSelector::One(locale) => LocaleSelector::One(locale.clone()),
            LocaleSelector::Many(locales) => LocaleSelector::Many(locales.clone()),
            LocaleSelector::Dynamic(resolver) => LocaleSelector::Dynamic(Arc::clone(resolver)),
        }
    }
}

impl<P> fmt::Debug for LocaleSelector<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleSelector::One(locale) => f.debug_tuple("One").field(locale).finish(),
            LocaleSelector::Many(locales) => f.debug_tuple("Many").field(locales).finish(),
            LocaleSelector::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// # Documentation
/// Presence requirement of a translated attribute. One kind per attribute.
///
/// - `Always`: every mandatory locale of the context
/// - `UnlessDefault`: like `Always`, skipped while the parent's own column is present
/// - `Locales`: exactly the selected locales
pub enum Mandatory<P> {
    Always,
    UnlessDefault,
    Locales(LocaleSelector<P>),
}

impl<P> Clone for Mandatory<P> {
    fn clone(&self) -> Self {
        match self {
            Mandatory::Always => Mandatory::Always,
            Mandatory::UnlessDefault => Mandatory::UnlessDefault,
            Mandatory::Locales(selector) => Mandatory::Locales(selector.clone()),
        }
    }
}

impl<P> fmt::Debug for Mandatory<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mandatory::Always => f.write_str("Always"),
            Mandatory::UnlessDefault => f.write_str("UnlessDefault"),
            Mandatory::Locales(selector) => f.debug_tuple("Locales").field(selector).finish(),
        }
    }
}

/// Options attached to one attribute in a declaration.
pub struct AttributeOptions<P> {
    mandatory: Option<Mandatory<P>>,
}

impl<P> AttributeOptions<P> {
    pub fn new() -> Self {
        Self { mandatory: None }
    }

    /// `mandatory: true`
    pub fn mandatory(mut self) -> Self {
        self.mandatory = Some(Mandatory::Always);
        self
    }

    /// `mandatory: :unless_default`
    pub fn mandatory_unless_default(mut self) -> Self {
        self.mandatory = Some(Mandatory::UnlessDefault);
        self
    }

    /// `mandatory: {locales: ...}`
    pub fn mandatory_for(mut self, locales: LocaleSelector<P>) -> Self {
        self.mandatory = Some(Mandatory::Locales(locales));
        self
    }
}

impl<P> Default for AttributeOptions<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// A declared translated attribute.
pub struct TranslatedAttribute<P> {
    name: String,
    mandatory: Option<Mandatory<P>>,
}

impl<P> TranslatedAttribute<P> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mandatory(&self) -> Option<&Mandatory<P>> {
        self.mandatory.as_ref()
    }

    /// Name of the fixed-locale accessor, e.g. `name_en`.
    pub fn accessor_name(&self, locale: &Locale) -> String {
        accessor_name(&self.name, locale)
    }
}

impl<P> fmt::Debug for TranslatedAttribute<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatedAttribute")
            .field("name", &self.name)
            .field("mandatory", &self.mandatory)
            .finish()
    }
}

pub fn accessor_name(attribute: &str, locale: &Locale) -> String {
    format!("{attribute}_{locale}")
}

/// # Documentation
/// The `translates(...)` declaration of a parent type.
///
/// Holds the declared attributes with their options and a lookup table of fixed-locale
/// accessors (`name_en`, `name_lv`, ...) built once from the locales available when the
/// declaration was made.
pub struct TranslationConfig<P> {
    attributes: Vec<TranslatedAttribute<P>>,
    accessors: HashMap<String, (usize, Locale)>,
    require_all_locales: bool,
}

impl<P> TranslationConfig<P> {
    /// Start a declaration against the locales of `ctx`.
    pub fn translates(ctx: &LocaleContext) -> TranslationConfigBuilder<P> {
        TranslationConfigBuilder {
            available: ctx.available().to_vec(),
            attributes: Vec::new(),
            require_all_locales: false,
        }
    }

    pub fn attributes(&self) -> &[TranslatedAttribute<P>] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&TranslatedAttribute<P>> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    pub fn is_translated(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Declared attribute, or `UnknownAttribute`.
    pub fn require_attribute(&self, name: &str) -> ApiResult<&TranslatedAttribute<P>> {
        self.attribute(name)
            .ok_or_else(|| TranslationError::UnknownAttribute(name.to_string()))
    }

    /// Resolve a fixed-locale accessor name into its attribute and locale.
    pub fn accessor(&self, accessor: &str) -> Option<(&str, &Locale)> {
        self.accessors
            .get(accessor)
            .map(|(index, locale)| (self.attributes[*index].name.as_str(), locale))
    }

    pub fn accessor_names(&self) -> impl Iterator<Item = &str> {
        self.accessors.keys().map(String::as_str)
    }

    pub fn requires_all_locales(&self) -> bool {
        self.require_all_locales
    }
}

impl<P> fmt::Debug for TranslationConfig<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationConfig")
            .field("attributes", &self.attributes)
            .field("require_all_locales", &self.require_all_locales)
            .finish()
    }
}

pub struct TranslationConfigBuilder<P> {
    available: Vec<Locale>,
    attributes: Vec<(String, AttributeOptions<P>)>,
    require_all_locales: bool,
}

impl<P> TranslationConfigBuilder<P> {
    pub fn attribute(self, name: impl Into<String>) -> Self {
        self.attribute_with(name, AttributeOptions::new())
    }

    pub fn attribute_with(mut self, name: impl Into<String>, options: AttributeOptions<P>) -> Self {
        self.attributes.push((name.into(), options));
        self
    }

    /// Require a loaded translation record for every available locale.
    pub fn require_all_locales(mut self) -> Self {
        self.require_all_locales = true;
        self
    }

    pub fn build(self) -> ApiResult<TranslationConfig<P>> {
        let mut attributes: Vec<TranslatedAttribute<P>> = Vec::with_capacity(self.attributes.len());
        for (name, options) in self.attributes {
            validate_attribute_name(&name)?;
            if attributes.iter().any(|a| a.name == name) {
                return Err(TranslationError::InvalidArgument(format!(
                    "attribute '{name}' is declared twice"
                )));
            }
            attributes.push(TranslatedAttribute {
                name,
                mandatory: options.mandatory,
            });
        }

        let mut accessors = HashMap::new();
        for (index, attribute) in attributes.iter().enumerate() {
            for locale in &self.available {
                accessors.insert(attribute.accessor_name(locale), (index, locale.clone()));
            }
        }

        Ok(TranslationConfig {
            attributes,
            accessors,
            require_all_locales: self.require_all_locales,
        })
    }
}

/// Attribute names double as column names, so they are restricted to `[a-z_][a-z0-9_]*`.
pub fn validate_attribute_name(name: &str) -> ApiResult<()> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        Ok(())
    } else {
        Err(TranslationError::InvalidArgument(format!(
            "'{name}' is not a valid attribute name"
        )))
    }
}
