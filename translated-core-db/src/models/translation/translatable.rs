use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use translated_core_api::{is_blank_value, ApiResult, AttributeValue, Locale, TranslationError};

use super::config::TranslationConfig;
use super::record::{TranslationModel, TranslationRecordPolicy};
use crate::models::identifiable::Identifiable;
use crate::models::locale_context::LocaleContext;

/// Trait for parent models whose attributes may be translated.
///
/// Only the parent's own columns are exposed here; translations are held by
/// [`TranslatableEntity`].
pub trait TranslatableModel: Identifiable {
    /// Whether the parent has its own column named `name` (the default column).
    fn has_own_attribute(&self, name: &str) -> bool;

    /// Raw value of the parent's own column, `None` when null or not a column.
    fn own_attribute(&self, name: &str) -> Option<&AttributeValue>;
}

/// # Documentation
/// A parent model together with its declaration and its loaded translation records.
///
/// The entity exclusively owns the translation collection. Records are kept in load
/// order (locale descending) followed by records built in memory.
pub struct TranslatableEntity<P, T = TranslationModel> {
    model: P,
    config: Arc<TranslationConfig<P>>,
    translations: Vec<T>,
    removed_translation_ids: Vec<Uuid>,
}

impl<P, T> TranslatableEntity<P, T>
where
    P: TranslatableModel,
    T: TranslationRecordPolicy,
{
    pub fn new(model: P, config: Arc<TranslationConfig<P>>) -> Self {
        Self {
            model,
            config,
            translations: Vec::new(),
            removed_translation_ids: Vec::new(),
        }
    }

    /// Attach translations loaded from storage, applying the default locale descending order.
    pub fn with_translations(model: P, config: Arc<TranslationConfig<P>>, mut translations: Vec<T>) -> Self {
        translations.sort_by(|a, b| b.locale().cmp(&a.locale()));
        Self {
            model,
            config,
            translations,
            removed_translation_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.model.get_id()
    }

    pub fn model(&self) -> &P {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut P {
        &mut self.model
    }

    pub fn config(&self) -> &TranslationConfig<P> {
        &self.config
    }

    pub fn into_parts(self) -> (P, Vec<T>) {
        (self.model, self.translations)
    }

    pub fn translations(&self) -> &[T] {
        &self.translations
    }

    pub fn translations_mut(&mut self) -> &mut [T] {
        &mut self.translations
    }

    /// Append a new unsaved translation for `locale`, like `translations.build`.
    ///
    /// No check is made for an existing record with the same locale; validation reports
    /// such duplicates.
    pub fn build_translation(&mut self, locale: Option<Locale>) -> &mut T {
        let record = T::new_for_parent(self.id(), locale);
        self.translations.push(record);
        let last = self.translations.len() - 1;
        &mut self.translations[last]
    }

    /// Add an existing record to the collection.
    pub fn push_translation(&mut self, record: T) {
        self.translations.push(record);
    }

    /// Loaded translation for `locale`, never materializing a missing one.
    pub fn translation(&self, locale: &Locale) -> Option<&T> {
        self.translations
            .iter()
            .find(|t| t.locale().is_some_and(|l| l == locale))
    }

    pub fn translation_mut(&mut self, locale: &Locale) -> Option<&mut T> {
        self.translations
            .iter_mut()
            .find(|t| t.locale().is_some_and(|l| l == locale))
    }

    /// Detach the translation for `locale`. Persisted records are remembered so the
    /// repository deletes them on the next save.
    pub fn remove_translation(&mut self, locale: &Locale) -> Option<T> {
        let position = self
            .translations
            .iter()
            .position(|t| t.locale().is_some_and(|l| l == locale))?;
        let record = self.translations.remove(position);
        if !record.is_new_record() {
            self.removed_translation_ids.push(record.get_id());
        }
        Some(record)
    }

    pub fn removed_translation_ids(&self) -> &[Uuid] {
        &self.removed_translation_ids
    }

    pub fn clear_removed_translation_ids(&mut self) {
        self.removed_translation_ids.clear();
    }

    /// One editable translation slot per requested locale, in the order given.
    ///
    /// Existing records are returned as they are; missing ones are built unsaved with the
    /// locale preset and appended to the collection.
    pub fn translations_for_locales(&mut self, locales: &[Locale]) -> Vec<&T> {
        for locale in locales {
            if self.translation(locale).is_none() {
                debug!(parent_id = %self.id(), locale = %locale, "Materializing translation slot");
                self.build_translation(Some(locale.clone()));
            }
        }

        locales
            .iter()
            .filter_map(|locale| self.translation(locale))
            .collect()
    }

    pub fn translations_for_available_locales(&mut self, ctx: &LocaleContext) -> Vec<&T> {
        self.translations_for_locales(ctx.available())
    }

    /// Read a translated attribute.
    ///
    /// Resolution order for the requested locale (the context's current locale when
    /// `locale` is `None`):
    /// 1. the loaded translation's non-blank column value
    /// 2. the parent's own same-named column, as stored
    /// 3. `None`
    pub fn value(
        &self,
        attribute: &str,
        locale: Option<&Locale>,
        ctx: &LocaleContext,
    ) -> ApiResult<Option<&AttributeValue>> {
        let locale = locale.unwrap_or(ctx.current());
        self.value_for_locale(attribute, locale)
    }

    /// Positional form of [`value`](Self::value): zero or one locale argument.
    pub fn value_with_args(
        &self,
        attribute: &str,
        args: &[Locale],
        ctx: &LocaleContext,
    ) -> ApiResult<Option<&AttributeValue>> {
        if args.len() > 1 {
            return Err(TranslationError::InvalidArgument(format!(
                "wrong number of arguments for '{attribute}' (given {}, expected 0..1)",
                args.len()
            )));
        }
        self.value(attribute, args.first(), ctx)
    }

    pub fn value_for_locale(&self, attribute: &str, locale: &Locale) -> ApiResult<Option<&AttributeValue>> {
        self.config.require_attribute(attribute)?;
        Ok(self.resolve(attribute, locale))
    }

    /// Read through a fixed-locale accessor such as `name_en`.
    pub fn read_accessor(&self, accessor: &str) -> ApiResult<Option<&AttributeValue>> {
        let (attribute, locale) = self
            .config
            .accessor(accessor)
            .ok_or_else(|| TranslationError::UnknownAttribute(accessor.to_string()))?;
        Ok(self.resolve(attribute, locale))
    }

    /// The parent's own column value, ignoring translations.
    pub fn default_value(&self, attribute: &str) -> ApiResult<Option<&AttributeValue>> {
        self.config.require_attribute(attribute)?;
        Ok(self.model.own_attribute(attribute))
    }

    pub(crate) fn resolve(&self, attribute: &str, locale: &Locale) -> Option<&AttributeValue> {
        let translated = self
            .translation(locale)
            .and_then(|t| t.attribute(attribute))
            .filter(|value| !value.is_blank());
        if translated.is_some() {
            return translated;
        }

        if self.model.has_own_attribute(attribute) {
            self.model.own_attribute(attribute)
        } else {
            None
        }
    }

    pub(crate) fn default_is_present(&self, attribute: &str) -> bool {
        !is_blank_value(self.model.own_attribute(attribute))
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;
    use crate::models::translation::config::AttributeOptions;

    /// Parent without own columns.
    #[derive(Debug, Clone)]
    pub struct Product {
        pub id: Uuid,
    }

    impl Identifiable for Product {
        fn get_id(&self) -> Uuid {
            self.id
        }
    }

    impl TranslatableModel for Product {
        fn has_own_attribute(&self, _name: &str) -> bool {
            false
        }

        fn own_attribute(&self, _name: &str) -> Option<&AttributeValue> {
            None
        }
    }

    /// Parent with an own `name` column.
    #[derive(Debug, Clone)]
    pub struct NamedProduct {
        pub id: Uuid,
        pub name: Option<AttributeValue>,
    }

    impl Identifiable for NamedProduct {
        fn get_id(&self) -> Uuid {
            self.id
        }
    }

    impl TranslatableModel for NamedProduct {
        fn has_own_attribute(&self, name: &str) -> bool {
            name == "name"
        }

        fn own_attribute(&self, name: &str) -> Option<&AttributeValue> {
            match name {
                "name" => self.name.as_ref(),
                _ => None,
            }
        }
    }

    pub fn locale(code: &str) -> Locale {
        Locale::new(code).unwrap()
    }

    pub fn ctx(current: &str, available: &[&str]) -> LocaleContext {
        LocaleContext::parse(current, available).unwrap()
    }

    pub fn product_entity(ctx: &LocaleContext) -> TranslatableEntity<Product> {
        let config = TranslationConfig::translates(ctx)
            .attribute("name")
            .attribute("description")
            .build()
            .unwrap();
        TranslatableEntity::new(Product { id: Uuid::new_v4() }, Arc::new(config))
    }

    pub fn named_product_entity(
        ctx: &LocaleContext,
        name: Option<&str>,
        options: AttributeOptions<NamedProduct>,
    ) -> TranslatableEntity<NamedProduct> {
        let config = TranslationConfig::translates(ctx)
            .attribute_with("name", options)
            .attribute("description")
            .build()
            .unwrap();
        let model = NamedProduct {
            id: Uuid::new_v4(),
            name: name.map(AttributeValue::from),
        };
        TranslatableEntity::new(model, Arc::new(config))
    }
}
