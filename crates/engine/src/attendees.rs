//! The module contains the `Attendee` struct and its implementation.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An attendee of an event.
///
/// `contribution` is money the attendee has already paid into the shared
/// pool. It is independent of what the attendee owes for categories; the
/// allocation engine subtracts the allocated expenses from it to obtain the
/// attendee's balance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attendee {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub contribution: f64,
}

impl Attendee {
    pub fn new(event_id: Uuid, name: String, contribution: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            name,
            contribution,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub contribution: f64,
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

impl From<&Attendee> for ActiveModel {
    fn from(attendee: &Attendee) -> Self {
        Self {
            id: ActiveValue::Set(attendee.id),
            event_id: ActiveValue::Set(attendee.event_id),
            name: ActiveValue::Set(attendee.name.clone()),
            contribution: ActiveValue::Set(attendee.contribution),
        }
    }
}

impl From<Model> for Attendee {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            event_id: model.event_id,
            name: model.name,
            contribution: model.contribution,
        }
    }
}
