use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use translated_core_api::{is_blank_value, ApiResult, AttributeValue, Locale, TranslationError};

use super::config::TranslationConfig;
use super::record::TranslationRecordPolicy;
use super::translatable::{TranslatableEntity, TranslatableModel};
use crate::models::identifiable::Identifiable;
use crate::models::locale_context::LocaleContext;

/// One nested attribute-set of a `translations_attributes` write.
///
/// With an `id` the set updates the loaded translation carrying that id, otherwise it
/// builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NestedTranslationAttributes {
    pub id: Option<Uuid>,
    pub locale: Option<Locale>,
    pub values: BTreeMap<String, Option<AttributeValue>>,
}

impl NestedTranslationAttributes {
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            locale: Some(locale),
            ..Self::default()
        }
    }

    pub fn for_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.values.insert(name.into(), Some(value.into()));
        self
    }

    pub fn set_null(mut self, name: impl Into<String>) -> Self {
        self.values.insert(name.into(), None);
        self
    }

    /// True when no declared translated attribute carries a non-blank value.
    ///
    /// Keys that are not declared attributes never keep a set alive.
    pub fn is_blank_for<P>(&self, config: &TranslationConfig<P>) -> bool {
        config
            .attribute_names()
            .all(|name| is_blank_value(self.values.get(name).and_then(Option::as_ref)))
    }
}

impl<P, T> TranslatableEntity<P, T>
where
    P: TranslatableModel,
    T: TranslationRecordPolicy,
{
    /// Accept a batch of nested translation attribute-sets.
    ///
    /// The batch may hold at most as many sets as there are available locales. Sets
    /// whose declared attributes are all blank are discarded; the others are assigned
    /// as submitted, blank values included.
    ///
    /// # Returns
    /// * `Ok(n)` - number of sets applied
    /// * `Err(TranslationError::TooManyRecords)` - batch larger than the available locales
    /// * `Err(TranslationError::NotFound)` - a set references an id that is not loaded
    pub fn assign_nested_attributes(
        &mut self,
        sets: Vec<NestedTranslationAttributes>,
        ctx: &LocaleContext,
    ) -> ApiResult<usize> {
        let limit = ctx.available().len();
        if sets.len() > limit {
            return Err(TranslationError::TooManyRecords {
                limit,
                given: sets.len(),
            });
        }

        let parent_id = self.id();
        let mut applied = 0;
        for set in sets {
            if set.is_blank_for(self.config()) {
                debug!(%parent_id, locale = ?set.locale, "Discarding blank nested translation set");
                continue;
            }

            let record = match set.id {
                Some(id) => self
                    .translations_mut()
                    .iter_mut()
                    .find(|t| t.get_id() == id)
                    .ok_or_else(|| TranslationError::NotFound(format!("translation {id} of {parent_id}")))?,
                None => self.build_translation(None),
            };

            if set.locale.is_some() || set.id.is_none() {
                record.set_locale(set.locale);
            }
            for (name, value) in set.values {
                record.set_attribute(&name, value)?;
            }
            applied += 1;
        }

        Ok(applied)
    }
}
