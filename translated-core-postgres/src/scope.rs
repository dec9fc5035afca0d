use sqlx::{Postgres, QueryBuilder};

use translated_core_api::{ApiResult, Locale};
use translated_core_db::models::translation::ordering::TranslationOrder;

use crate::table::{validate_identifier, TranslationTable};

type Condition = Box<dyn FnOnce(&mut QueryBuilder<'static, Postgres>) + Send>;

struct OrderJoin {
    alias: String,
    column: String,
    locale: Locale,
}

/// # Documentation
/// Query against a parent table that translation orders and caller conditions
/// compose into.
///
/// Every order joins the translation table under the alias its `TranslationOrder`
/// carries, so any number of orders fit in one query. Joins come first, then the
/// conditions combined with `AND`, then the orders in the sequence they were added.
/// The parent id breaks remaining ties.
///
/// # Example
/// ```rust,ignore
/// let ids = repo
///     .fetch_parent_ids(
///         repo.scope()
///             .filter(|q| {
///                 q.push("product.name IS NOT NULL");
///             })
///             .order_by_translation(&TranslationOrder::for_attribute("name", &ctx)?)?,
///     )
///     .await?;
/// ```
pub struct TranslationScope<'t> {
    table: &'t TranslationTable,
    joins: Vec<OrderJoin>,
    conditions: Vec<Condition>,
}

impl<'t> TranslationScope<'t> {
    pub fn new(table: &'t TranslationTable) -> Self {
        Self {
            table,
            joins: Vec::new(),
            conditions: Vec::new(),
        }
    }

    pub fn table(&self) -> &TranslationTable {
        self.table
    }

    /// Order ascending by the attribute's value in the order's locale, absent values first.
    pub fn order_by_translation(mut self, order: &TranslationOrder) -> ApiResult<Self> {
        let column = self.table.require_column(order.attribute())?.name().to_string();
        validate_identifier(order.alias())?;
        self.joins.push(OrderJoin {
            alias: order.alias().to_string(),
            column,
            locale: order.locale().clone(),
        });
        Ok(self)
    }

    /// Add a condition. The closure pushes SQL text and bound values onto the query.
    pub fn filter(mut self, condition: impl FnOnce(&mut QueryBuilder<'static, Postgres>) + Send + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }

    /// `alias.column` of the first order, if any.
    pub fn primary_sort_column(&self) -> Option<String> {
        self.joins.first().map(|join| format!("{}.{}", join.alias, join.column))
    }

    pub fn build(self) -> QueryBuilder<'static, Postgres> {
        let select = format!("{}.*", self.table.parent_table());
        self.build_with_select(&select)
    }

    pub fn build_with_select(self, select: &str) -> QueryBuilder<'static, Postgres> {
        let parent = self.table.parent_table();
        let mut builder = QueryBuilder::new(format!("SELECT {select} FROM {parent}"));

        for join in &self.joins {
            builder.push(format!(
                " LEFT OUTER JOIN {translations} {alias} ON {alias}.{key} = {parent}.id AND {alias}.locale = ",
                translations = self.table.table(),
                alias = join.alias,
                key = self.table.parent_key(),
            ));
            builder.push_bind(join.locale.to_string());
        }

        for (index, condition) in self.conditions.into_iter().enumerate() {
            builder.push(if index == 0 { " WHERE (" } else { " AND (" });
            condition(&mut builder);
            builder.push(")");
        }

        builder.push(" ORDER BY ");
        for join in &self.joins {
            builder.push(format!("{}.{} ASC NULLS FIRST, ", join.alias, join.column));
        }
        builder.push(format!("{parent}.id"));
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helper::product_translation_table;
    use translated_core_api::TranslationError;
    use translated_core_db::models::locale_context::LocaleContext;

    #[test]
    fn test_orders_and_conditions_compose() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let table = product_translation_table()?;
        let lv = TranslationOrder::for_attribute("name", &LocaleContext::parse("lv", &["en", "lv"])?)?;
        let en = TranslationOrder::for_attribute("description", &LocaleContext::parse("en", &["en", "lv"])?)?;

        let sql = TranslationScope::new(&table)
            .order_by_translation(&lv)?
            .filter(|q| {
                q.push("product.name = ").push_bind("keep".to_string());
            })
            .order_by_translation(&en)?
            .filter(|q| {
                q.push("product.name IS NOT NULL");
            })
            .build()
            .sql()
            .to_string();

        let (lv_alias, en_alias) = (lv.alias(), en.alias());
        assert_eq!(
            sql,
            format!(
                "SELECT product.* FROM product \
                 LEFT OUTER JOIN product_translation {lv_alias} ON {lv_alias}.product_id = product.id AND {lv_alias}.locale = $1 \
                 LEFT OUTER JOIN product_translation {en_alias} ON {en_alias}.product_id = product.id AND {en_alias}.locale = $2 \
                 WHERE (product.name = $3) AND (product.name IS NOT NULL) \
                 ORDER BY {lv_alias}.name ASC NULLS FIRST, {en_alias}.description ASC NULLS FIRST, product.id"
            )
        );
        Ok(())
    }

    #[test]
    fn test_unordered_scope_sorts_by_parent_id() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let table = product_translation_table()?;
        let scope = TranslationScope::new(&table);
        assert!(scope.primary_sort_column().is_none());
        assert_eq!(scope.build().sql(), "SELECT product.* FROM product ORDER BY product.id");
        Ok(())
    }

    #[test]
    fn test_unknown_attribute_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let table = product_translation_table()?;
        let order = TranslationOrder::for_attribute("title", &LocaleContext::parse("lv", &["lv"])?)?;
        assert!(matches!(
            TranslationScope::new(&table).order_by_translation(&order),
            Err(TranslationError::UnknownAttribute(_))
        ));
        Ok(())
    }
}
