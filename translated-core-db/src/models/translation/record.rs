use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use translated_core_api::{ApiResult, AttributeValue, Locale};

use crate::models::identifiable::{Identifiable, Persistable};

/// Suffix that turns a parent type name into its translation type name.
pub const TRANSLATION_TYPE_SUFFIX: &str = "Translation";

/// Capability implemented by the per-locale child record type.
///
/// Resolution and validation only talk to child records through this trait.
///
/// # Example
/// ```ignore
/// impl TranslationRecordPolicy for ProductTranslation {
///     fn new_for_parent(parent_id: Uuid, locale: Option<Locale>) -> Self { ... }
///     // parent_association() is inferred as "product"
/// }
/// ```
pub trait TranslationRecordPolicy: Persistable + Clone {
    /// Construct an unsaved record belonging to `parent_id`.
    fn new_for_parent(parent_id: Uuid, locale: Option<Locale>) -> Self;

    fn parent_id(&self) -> Option<Uuid>;

    fn locale(&self) -> Option<&Locale>;

    fn set_locale(&mut self, locale: Option<Locale>);

    /// Column value of a translated attribute, `None` when null or not a column.
    fn attribute(&self, name: &str) -> Option<&AttributeValue>;

    /// Assign a column value.
    ///
    /// # Returns
    /// * `Err(TranslationError::UnknownAttribute)` - when `name` is not a column of the record
    fn set_attribute(&mut self, name: &str, value: Option<AttributeValue>) -> ApiResult<()>;

    /// Name of the association back to the parent, used as the error key of the
    /// parent presence check. Inferred from the type name by default.
    fn parent_association(&self) -> String {
        infer_parent_association(std::any::type_name::<Self>())
    }
}

/// `ProductTranslation` → `product`, `my_app::models::LineItemTranslation` → `line_item`.
///
/// Types that do not follow the naming convention map to `parent`.
pub fn infer_parent_association(type_name: &str) -> String {
    let short = type_name
        .split('<')
        .next()
        .and_then(|path| path.rsplit("::").next())
        .unwrap_or(type_name);

    match short.strip_suffix(TRANSLATION_TYPE_SUFFIX) {
        Some(parent) if !parent.is_empty() => to_snake_case(parent),
        _ => "parent".to_string(),
    }
}

/// `Product` → `ProductTranslation`
pub fn translation_type_name(parent_type_name: &str) -> String {
    format!("{parent_type_name}{TRANSLATION_TYPE_SUFFIX}")
}

pub fn to_snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                snake.push('_');
            }
            snake.push(c.to_ascii_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

/// # Documentation
/// Generic translation record: one row of a `<parent>_translation` table.
///
/// Translated columns live in `values`; a key present with `None` is a null column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationModel {
    pub id: Uuid,

    /// Foreign key to the owning parent (required)
    pub parent_id: Option<Uuid>,

    /// Required; must be an available locale, unique per parent
    pub locale: Option<Locale>,

    /// Translated columns keyed by attribute name
    pub values: BTreeMap<String, Option<AttributeValue>>,

    #[serde(skip)]
    persisted: bool,
}

impl TranslationModel {
    pub fn new(parent_id: Uuid, locale: Locale) -> Self {
        Self::new_for_parent(parent_id, Some(locale))
    }

    /// Builder-style assignment used when constructing records by hand.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.values.insert(name.into(), Some(value.into()));
        self
    }

    pub fn with_null(mut self, name: impl Into<String>) -> Self {
        self.values.insert(name.into(), None);
        self
    }

    /// Rebuild a record that already exists in storage.
    pub fn from_storage(
        id: Uuid,
        parent_id: Uuid,
        locale: Locale,
        values: BTreeMap<String, Option<AttributeValue>>,
    ) -> Self {
        Self {
            id,
            parent_id: Some(parent_id),
            locale: Some(locale),
            values,
            persisted: true,
        }
    }
}

impl Identifiable for TranslationModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Persistable for TranslationModel {
    fn is_new_record(&self) -> bool {
        !self.persisted
    }

    fn mark_persisted(&mut self) {
        self.persisted = true;
    }
}

impl TranslationRecordPolicy for TranslationModel {
    fn new_for_parent(parent_id: Uuid, locale: Option<Locale>) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id: Some(parent_id),
            locale,
            values: BTreeMap::new(),
            persisted: false,
        }
    }

    fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }

    fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    fn set_locale(&mut self, locale: Option<Locale>) {
        self.locale = locale;
    }

    fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name).and_then(Option::as_ref)
    }

    // Columns are open-ended here; the storage layer checks them against its table.
    fn set_attribute(&mut self, name: &str, value: Option<AttributeValue>) -> ApiResult<()> {
        self.values.insert(name.to_string(), value);
        Ok(())
    }
}
