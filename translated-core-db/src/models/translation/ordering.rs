use std::sync::atomic::{AtomicU64, Ordering};

use translated_core_api::{compare_nullable, ApiResult, Locale};

use super::config::validate_attribute_name;
use super::record::TranslationRecordPolicy;
use super::translatable::{TranslatableEntity, TranslatableModel};
use crate::models::locale_context::LocaleContext;

static ALIAS_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// # Documentation
/// An `order_by_translation(attribute)` request, captured against the current locale.
///
/// Each instance carries its own join alias so that several orderings can be composed
/// into one query without name collisions. Ordering is ascending only, absent values first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOrder {
    attribute: String,
    locale: Locale,
    alias: String,
}

impl TranslationOrder {
    pub fn for_attribute(attribute: &str, ctx: &LocaleContext) -> ApiResult<Self> {
        validate_attribute_name(attribute)?;
        let n = ALIAS_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Ok(Self {
            attribute: attribute.to_string(),
            locale: ctx.current().clone(),
            alias: format!("t{n}_translations"),
        })
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }
}

/// Sort loaded entities by the current locale's translation value of `attribute`.
///
/// Only the translation record counts, never the default column. Entities without a
/// value come first; the sort is stable.
pub fn sort_by_translation<P, T>(
    entities: &mut [TranslatableEntity<P, T>],
    attribute: &str,
    ctx: &LocaleContext,
) -> ApiResult<()>
where
    P: TranslatableModel,
    T: TranslationRecordPolicy,
{
    if let Some(first) = entities.first() {
        first.config().require_attribute(attribute)?;
    }

    let locale = ctx.current();
    entities.sort_by(|a, b| {
        let left = a.translation(locale).and_then(|t| t.attribute(attribute));
        let right = b.translation(locale).and_then(|t| t.attribute(attribute));
        compare_nullable(left, right)
    });
    Ok(())
}
