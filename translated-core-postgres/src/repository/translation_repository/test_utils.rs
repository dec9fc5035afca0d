#[cfg(test)]
pub mod test_utils {
    use std::error::Error;
    use std::sync::Arc;
    use uuid::Uuid;

    use translated_core_api::{AttributeValue, Locale};
    use translated_core_db::models::identifiable::Identifiable;
    use translated_core_db::models::locale_context::LocaleContext;
    use translated_core_db::models::translation::config::{AttributeOptions, TranslationConfig};
    use translated_core_db::models::translation::record::TranslationModel;
    use translated_core_db::models::translation::translatable::{TranslatableEntity, TranslatableModel};
    use translated_core_db::repository::load_by_parent_ids::LoadByParentIds;

    use crate::repository::TranslationRepositoryImpl;
    use crate::test_helper::TestContext;

    pub use crate::test_helper::product_translation_table;

    /// Row of the fixture `product` table.
    #[derive(Debug, Clone)]
    pub struct TestProduct {
        pub id: Uuid,
        pub name: Option<AttributeValue>,
    }

    impl Identifiable for TestProduct {
        fn get_id(&self) -> Uuid {
            self.id
        }
    }

    impl TranslatableModel for TestProduct {
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

    pub fn locale_context(current: &str, available: &[&str]) -> LocaleContext {
        LocaleContext::parse(current, available).unwrap()
    }

    pub fn create_test_translation(parent_id: Uuid, code: &str, name: &str) -> TranslationModel {
        TranslationModel::new(parent_id, locale(code)).with_value("name", name)
    }

    /// Insert a parent row on the context's transaction.
    pub async fn create_test_product(
        ctx: &TestContext,
        name: Option<&str>,
    ) -> Result<Uuid, Box<dyn Error + Send + Sync>> {
        let id = Uuid::new_v4();
        let repo = ctx.product_translation_repository();
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        sqlx::query("INSERT INTO product (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(name)
            .execute(&mut **transaction)
            .await?;
        Ok(id)
    }

    fn product_config(
        locales: &LocaleContext,
        name_options: AttributeOptions<TestProduct>,
    ) -> Arc<TranslationConfig<TestProduct>> {
        let config = TranslationConfig::translates(locales)
            .attribute_with("name", name_options)
            .attribute("description")
            .build()
            .unwrap();
        Arc::new(config)
    }

    pub fn product_entity(
        id: Uuid,
        name: Option<&str>,
        locales: &LocaleContext,
        name_options: AttributeOptions<TestProduct>,
    ) -> TranslatableEntity<TestProduct> {
        let model = TestProduct {
            id,
            name: name.map(AttributeValue::from),
        };
        TranslatableEntity::new(model, product_config(locales, name_options))
    }

    pub async fn load_product_entity(
        repo: &TranslationRepositoryImpl,
        id: Uuid,
        name: Option<&str>,
        locales: &LocaleContext,
    ) -> Result<TranslatableEntity<TestProduct>, Box<dyn Error + Send + Sync>> {
        let mut loaded = repo.load_by_parent_ids(&[id]).await?;
        let (_, translations) = loaded.pop().ok_or("no translations returned")?;
        let model = TestProduct {
            id,
            name: name.map(AttributeValue::from),
        };
        Ok(TranslatableEntity::with_translations(
            model,
            product_config(locales, AttributeOptions::new()),
            translations,
        ))
    }
}
