//! The module contains the representation of an event.

use chrono::{NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared event.
///
/// An event is the aggregate root: it owns the attendees who took part, the
/// expense categories they split, and the participation rows connecting the
/// two. Deleting an event removes the whole aggregate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    /// Stable identifier for this event.
    ///
    /// This is a UUID generated once and persisted in the database, so the
    /// event can be renamed without breaking references.
    pub id: Uuid,
    pub name: String,
    pub event_date: Option<NaiveDate>,
    pub created_at: DateTimeUtc,
}

impl Event {
    /// Creates a new event. A missing `event_date` defaults to today.
    pub fn new(name: String, event_date: Option<NaiveDate>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            event_date: Some(event_date.unwrap_or_else(|| now.date_naive())),
            created_at: now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub event_date: Option<Date>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendees::Entity")]
    Attendees,
    #[sea_orm(has_many = "super::categories::Entity")]
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

impl From<&Event> for ActiveModel {
    fn from(event: &Event) -> Self {
        Self {
            id: ActiveValue::Set(event.id),
            name: ActiveValue::Set(event.name.clone()),
            event_date: ActiveValue::Set(event.event_date),
            created_at: ActiveValue::Set(event.created_at),
        }
    }
}

impl From<Model> for Event {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            event_date: model.event_date,
            created_at: model.created_at,
        }
    }
}
