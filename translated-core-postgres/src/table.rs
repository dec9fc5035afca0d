use translated_core_api::{ApiResult, TranslationError};
use translated_core_db::models::translation::config::TranslationConfig;
use translated_core_db::models::translation::record::TRANSLATION_TYPE_SUFFIX;

/// PostgreSQL identifiers are truncated beyond this length.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Storage type of a translated column.
///
/// `Integer` is `BIGINT`, `Timestamp` is `TIMESTAMPTZ`, `Json` is `JSONB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Decimal,
    Boolean,
    Date,
    Timestamp,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationColumn {
    name: String,
    column_type: ColumnType,
}

impl TranslationColumn {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }
}

/// # Documentation
/// Table metadata of one translated parent type.
///
/// Every identifier is validated on the way in, so the repository can splice them into
/// SQL text; values are always bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable {
    parent_table: String,
    table: String,
    parent_key: String,
    columns: Vec<TranslationColumn>,
}

impl TranslationTable {
    /// Conventional layout: `product` → table `product_translation`, key `product_id`.
    pub fn for_parent(parent_table: &str) -> ApiResult<Self> {
        validate_identifier(parent_table)?;
        let table = format!("{parent_table}_{}", TRANSLATION_TYPE_SUFFIX.to_lowercase());
        let parent_key = format!("{parent_table}_id");
        validate_identifier(&table)?;
        validate_identifier(&parent_key)?;

        Ok(Self {
            parent_table: parent_table.to_string(),
            table,
            parent_key,
            columns: Vec::new(),
        })
    }

    pub fn with_table_name(mut self, table: &str) -> ApiResult<Self> {
        validate_identifier(table)?;
        self.table = table.to_string();
        Ok(self)
    }

    pub fn with_parent_key(mut self, parent_key: &str) -> ApiResult<Self> {
        validate_identifier(parent_key)?;
        self.parent_key = parent_key.to_string();
        Ok(self)
    }

    pub fn with_column(mut self, name: &str, column_type: ColumnType) -> ApiResult<Self> {
        validate_identifier(name)?;
        if matches!(name, "id" | "locale") || name == self.parent_key {
            return Err(TranslationError::InvalidArgument(format!(
                "'{name}' is reserved in translation table '{}'",
                self.table
            )));
        }
        if self.column(name).is_some() {
            return Err(TranslationError::InvalidArgument(format!(
                "column '{name}' is declared twice"
            )));
        }
        self.columns.push(TranslationColumn {
            name: name.to_string(),
            column_type,
        });
        Ok(self)
    }

    pub fn parent_table(&self) -> &str {
        &self.parent_table
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn parent_key(&self) -> &str {
        &self.parent_key
    }

    pub fn columns(&self) -> &[TranslationColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&TranslationColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn require_column(&self, name: &str) -> ApiResult<&TranslationColumn> {
        self.column(name).ok_or_else(|| {
            TranslationError::UnknownAttribute(format!("{}.{name}", self.table))
        })
    }

    /// Every attribute declared in `config` must have a column here.
    pub fn covers<P>(&self, config: &TranslationConfig<P>) -> ApiResult<()> {
        match config.attribute_names().find(|name| self.column(name).is_none()) {
            Some(missing) => Err(TranslationError::Configuration(format!(
                "translated attribute '{missing}' has no column in '{}'",
                self.table
            ))),
            None => Ok(()),
        }
    }
}

/// `[a-z_][a-z0-9_]*`, at most [`MAX_IDENTIFIER_LEN`] bytes.
pub fn validate_identifier(identifier: &str) -> ApiResult<()> {
    let mut chars = identifier.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_');
    let valid = valid_start
        && identifier.len() <= MAX_IDENTIFIER_LEN
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(TranslationError::InvalidArgument(format!(
            "'{identifier}' is not a valid SQL identifier"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use translated_core_db::models::locale_context::LocaleContext;

    #[test]
    fn test_conventional_names() {
        let table = TranslationTable::for_parent("product").unwrap();
        assert_eq!(table.table(), "product_translation");
        assert_eq!(table.parent_key(), "product_id");
        assert_eq!(table.parent_table(), "product");
    }

    #[test]
    fn test_overridden_names() {
        let table = TranslationTable::for_parent("line_item")
            .and_then(|t| t.with_table_name("line_item_i18n"))
            .and_then(|t| t.with_parent_key("item_id"))
            .unwrap();
        assert_eq!(table.table(), "line_item_i18n");
        assert_eq!(table.parent_key(), "item_id");
    }

    #[test]
    fn test_rejects_unsafe_identifiers() {
        assert!(TranslationTable::for_parent("product; DROP TABLE product").is_err());
        assert!(TranslationTable::for_parent("Product").is_err());
        assert!(validate_identifier(&"a".repeat(MAX_IDENTIFIER_LEN + 1)).is_err());
        assert!(validate_identifier("t0_translations").is_ok());
    }

    #[test]
    fn test_reserved_and_duplicate_columns() {
        let table = TranslationTable::for_parent("product").unwrap();
        assert!(table.clone().with_column("locale", ColumnType::Text).is_err());
        assert!(table.clone().with_column("product_id", ColumnType::Text).is_err());

        let table = table.with_column("name", ColumnType::Text).unwrap();
        assert!(table.with_column("name", ColumnType::Text).is_err());
    }

    #[test]
    fn test_covers_declared_attributes() {
        struct Product;
        let ctx = LocaleContext::parse("en", &["en"]).unwrap();
        let config = TranslationConfig::<Product>::translates(&ctx)
            .attribute("name")
            .attribute("description")
            .build()
            .unwrap();

        let table = TranslationTable::for_parent("product")
            .and_then(|t| t.with_column("name", ColumnType::Text))
            .unwrap();
        assert!(matches!(table.covers(&config), Err(TranslationError::Configuration(_))));

        let table = table.with_column("description", ColumnType::Text).unwrap();
        assert!(table.covers(&config).is_ok());
        assert!(matches!(
            table.require_column("title"),
            Err(TranslationError::UnknownAttribute(_))
        ));
    }
}
