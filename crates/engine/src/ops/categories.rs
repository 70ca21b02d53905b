use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{Category, EngineError, ResultEngine, categories, events, participations};

use super::{Engine, ensure_non_negative, normalize_optional_text, normalize_required_name, with_tx};

impl Engine {
    /// Adds an expense category to an event.
    pub async fn add_category(
        &self,
        event_id: Uuid,
        name: &str,
        subcategory: Option<&str>,
        amount: f64,
    ) -> ResultEngine<Category> {
        let name = normalize_required_name(name, "category")?;
        let subcategory = normalize_optional_text(subcategory);
        let amount = ensure_non_negative(amount, "amount")?;
        with_tx!(self, |db_tx| {
            events::Entity::find_by_id(event_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("event not exists".to_string()))?;

            let category = Category::new(event_id, name, subcategory, amount);
            let model: categories::ActiveModel = (&category).into();
            model.insert(&db_tx).await?;
            Ok(category)
        })
    }

    /// Updates a category's name, subcategory and amount.
    pub async fn update_category(
        &self,
        category_id: Uuid,
        name: &str,
        subcategory: Option<&str>,
        amount: f64,
    ) -> ResultEngine<Category> {
        let name = normalize_required_name(name, "category")?;
        let subcategory = normalize_optional_text(subcategory);
        let amount = ensure_non_negative(amount, "amount")?;
        with_tx!(self, |db_tx| {
            categories::Entity::find_by_id(category_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;

            let active = categories::ActiveModel {
                id: ActiveValue::Set(category_id),
                name: ActiveValue::Set(name),
                subcategory: ActiveValue::Set(subcategory),
                amount: ActiveValue::Set(amount),
                ..Default::default()
            };
            let updated = active.update(&db_tx).await?;
            Ok(Category::from(updated))
        })
    }

    /// Deletes a category together with its participation rows.
    pub async fn delete_category(&self, category_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            categories::Entity::find_by_id(category_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;

            participations::Entity::delete_many()
                .filter(participations::Column::CategoryId.eq(category_id))
                .exec(&db_tx)
                .await?;
            categories::Entity::delete_by_id(category_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
