use tracing::debug;

use translated_core_api::{is_blank_value, AttributeValue, Locale, ValidationErrors};

use super::config::{accessor_name, Mandatory};
use super::record::TranslationRecordPolicy;
use super::translatable::{TranslatableEntity, TranslatableModel};
use crate::models::identifiable::Identifiable;
use crate::models::locale_context::LocaleContext;

pub const BLANK_MESSAGE: &str = "can't be blank";
pub const INCLUSION_MESSAGE: &str = "is not included in the list";
pub const TAKEN_MESSAGE: &str = "has already been taken";
pub const INVALID_MESSAGE: &str = "is invalid";
pub const TRANSLATIONS_FIELD: &str = "translations";

/// Validate one translation record.
///
/// `existing` holds the records the uniqueness check compares against: records of any
/// parent may be passed, only those sharing `record`'s parent count, and `record`
/// itself is skipped by id.
///
/// Checks, in order: parent presence, locale presence, locale inclusion in the
/// available locales, locale uniqueness per parent.
pub fn validate_translation_record<T: TranslationRecordPolicy>(
    record: &T,
    existing: &[T],
    ctx: &LocaleContext,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if record.parent_id().is_none() {
        errors.add(record.parent_association(), BLANK_MESSAGE);
    }

    match record.locale() {
        None => errors.add("locale", BLANK_MESSAGE),
        Some(locale) => {
            if !ctx.is_available(locale) {
                errors.add("locale", INCLUSION_MESSAGE);
            }
            if is_locale_taken(record, locale, existing) {
                errors.add("locale", TAKEN_MESSAGE);
            }
        }
    }

    errors
}

fn is_locale_taken<T: TranslationRecordPolicy>(record: &T, locale: &Locale, existing: &[T]) -> bool {
    existing.iter().any(|other| {
        other.get_id() != record.get_id()
            && other.parent_id() == record.parent_id()
            && other.locale() == Some(locale)
    })
}

impl<P, T> TranslatableEntity<P, T>
where
    P: TranslatableModel,
    T: TranslationRecordPolicy,
{
    /// Run every declared validation and collect the errors.
    pub fn validate(&self, ctx: &LocaleContext) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if self.config().requires_all_locales() {
            self.validate_translations_presence(ctx, &mut errors);
        }
        self.validate_mandatory_locales(ctx, &mut errors);
        self.validate_translation_records(ctx, &mut errors);

        if !errors.is_empty() {
            debug!(parent_id = %self.id(), errors = errors.count(), "Translatable entity is invalid");
        }
        errors
    }

    pub fn is_valid(&self, ctx: &LocaleContext) -> bool {
        self.validate(ctx).is_empty()
    }

    /// Locales an attribute must be present in for this parent, `None` when the
    /// attribute carries no requirement (or `UnlessDefault` is satisfied).
    pub fn required_locales(&self, attribute: &str, ctx: &LocaleContext) -> Option<Vec<Locale>> {
        let declared = self.config().attribute(attribute)?;
        match declared.mandatory()? {
            Mandatory::Always => Some(ctx.mandatory_locales().to_vec()),
            Mandatory::UnlessDefault => {
                if self.default_is_present(attribute) {
                    None
                } else {
                    Some(ctx.mandatory_locales().to_vec())
                }
            }
            Mandatory::Locales(selector) => Some(selector.resolve(self.model())),
        }
    }

    /// The translation record's own value, ignoring the parent's default column.
    fn translated_value(&self, attribute: &str, locale: &Locale) -> Option<&AttributeValue> {
        self.translation(locale).and_then(|t| t.attribute(attribute))
    }

    fn validate_translations_presence(&self, ctx: &LocaleContext, errors: &mut ValidationErrors) {
        for locale in ctx.available() {
            if self.translation(locale).is_none() {
                errors.add_base(format!("Translation with locale {locale} must be present"));
            }
        }
    }

    fn validate_mandatory_locales(&self, ctx: &LocaleContext, errors: &mut ValidationErrors) {
        for attribute in self.config().attributes() {
            let Some(locales) = self.required_locales(attribute.name(), ctx) else {
                continue;
            };
            for locale in &locales {
                if is_blank_value(self.translated_value(attribute.name(), locale)) {
                    errors.add(accessor_name(attribute.name(), locale), BLANK_MESSAGE);
                }
            }
        }
    }

    /// Child records are validated against the records before them, so of two records
    /// sharing a locale only the later one is reported.
    fn validate_translation_records(&self, ctx: &LocaleContext, errors: &mut ValidationErrors) {
        let translations = self.translations();
        let invalid = translations
            .iter()
            .enumerate()
            .filter(|(index, record)| {
                !validate_translation_record(*record, &translations[..*index], ctx).is_empty()
            })
            .count();

        if invalid > 0 {
            debug!(parent_id = %self.id(), invalid, "Translation records are invalid");
            errors.add(TRANSLATIONS_FIELD, INVALID_MESSAGE);
        }
    }
}
