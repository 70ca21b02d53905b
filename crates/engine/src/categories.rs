//! The module contains the representation of an expense category.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One shareable expense of an event.
///
/// `amount` is the total cost of the category; it is divided equally among
/// the attendees that participate in it. `subcategory` is a free-text
/// refinement ("Food / Veg"); whether it takes part in report labels is the
/// caller's choice (see `CategoryKey`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub subcategory: Option<String>,
    pub amount: f64,
}

impl Category {
    pub fn new(event_id: Uuid, name: String, subcategory: Option<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            name,
            subcategory,
            amount,
        }
    }

    /// Label that keeps same-named categories apart, `"Name (Subcategory)"`.
    pub fn qualified_label(&self) -> String {
        match &self.subcategory {
            Some(subcategory) => format!("{} ({})", self.name, subcategory),
            None => self.name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub subcategory: Option<String>,
    pub amount: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Events,
    #[sea_orm(has_many = "super::participations::Entity")]
    Participations,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::participations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Category> for ActiveModel {
    fn from(category: &Category) -> Self {
        Self {
            id: ActiveValue::Set(category.id),
            event_id: ActiveValue::Set(category.event_id),
            name: ActiveValue::Set(category.name.clone()),
            subcategory: ActiveValue::Set(category.subcategory.clone()),
            amount: ActiveValue::Set(category.amount),
        }
    }
}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            event_id: model.event_id,
            name: model.name,
            subcategory: model.subcategory,
            amount: model.amount,
        }
    }
}
