//! Participation join rows between attendees and categories.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether one attendee takes part in one category.
///
/// At most one row exists per `(attendee, category)` pair; a missing row is
/// equivalent to `participates = false`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Participation {
    pub attendee_id: Uuid,
    pub category_id: Uuid,
    pub participates: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "participations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub attendee_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub category_id: Uuid,
    pub participates: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::attendees::Entity",
        from = "Column::AttendeeId",
        to = "super::attendees::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Attendees,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Categories,
}

impl Related<super::attendees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendees.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Participation> for ActiveModel {
    fn from(participation: &Participation) -> Self {
        Self {
            attendee_id: ActiveValue::Set(participation.attendee_id),
            category_id: ActiveValue::Set(participation.category_id),
            participates: ActiveValue::Set(participation.participates),
        }
    }
}

impl From<Model> for Participation {
    fn from(model: Model) -> Self {
        Self {
            attendee_id: model.attendee_id,
            category_id: model.category_id,
            participates: model.participates,
        }
    }
}
