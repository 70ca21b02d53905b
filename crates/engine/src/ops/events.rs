use chrono::NaiveDate;
use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use serde::Serialize;

use crate::{
    Attendee, Category, EngineError, Event, Participation, ResultEngine, attendees, categories,
    events, participations,
};

use super::{Engine, normalize_required_name, with_tx};

/// Consistent snapshot of one event aggregate.
///
/// The allocation engine is a pure function of whatever snapshot it is given:
/// callers re-fetch after every write instead of mutating a snapshot in
/// place. Attendees and categories are ordered by name so reports derived
/// from a snapshot are stable.
#[derive(Clone, Debug, Serialize)]
pub struct EventSnapshot {
    pub event: Event,
    pub attendees: Vec<Attendee>,
    pub categories: Vec<Category>,
    pub participations: Vec<Participation>,
}

impl Engine {
    /// Creates a new event. A missing `event_date` defaults to today.
    pub async fn new_event(
        &self,
        name: &str,
        event_date: Option<NaiveDate>,
    ) -> ResultEngine<Event> {
        let name = normalize_required_name(name, "event")?;
        let event = Event::new(name, event_date);
        let model: events::ActiveModel = (&event).into();
        model.insert(&self.database).await?;
        Ok(event)
    }

    /// Renames an event and optionally moves its date.
    ///
    /// A `None` date keeps the stored one.
    pub async fn update_event(
        &self,
        event_id: Uuid,
        name: &str,
        event_date: Option<NaiveDate>,
    ) -> ResultEngine<Event> {
        let name = normalize_required_name(name, "event")?;
        with_tx!(self, |db_tx| {
            let model = events::Entity::find_by_id(event_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("event not exists".to_string()))?;

            let active = events::ActiveModel {
                id: ActiveValue::Set(event_id),
                name: ActiveValue::Set(name),
                event_date: ActiveValue::Set(event_date.or(model.event_date)),
                ..Default::default()
            };
            let updated = active.update(&db_tx).await?;
            Ok(Event::from(updated))
        })
    }

    /// Return a single [`Event`].
    pub async fn event(&self, event_id: Uuid) -> ResultEngine<Event> {
        let model = events::Entity::find_by_id(event_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("event not exists".to_string()))?;
        Ok(Event::from(model))
    }

    /// Lists all events, newest first.
    pub async fn list_events(&self) -> ResultEngine<Vec<Event>> {
        let models = events::Entity::find()
            .order_by_desc(events::Column::CreatedAt)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Event::from).collect())
    }

    /// Deletes an event and everything it owns.
    ///
    /// Participations, categories and attendees go in the same DB
    /// transaction, so a failure leaves the aggregate untouched.
    pub async fn delete_event(&self, event_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            events::Entity::find_by_id(event_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("event not exists".to_string()))?;

            let attendee_ids: Vec<Uuid> = attendees::Entity::find()
                .filter(attendees::Column::EventId.eq(event_id))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|model| model.id)
                .collect();

            if !attendee_ids.is_empty() {
                participations::Entity::delete_many()
                    .filter(participations::Column::AttendeeId.is_in(attendee_ids))
                    .exec(&db_tx)
                    .await?;
            }
            categories::Entity::delete_many()
                .filter(categories::Column::EventId.eq(event_id))
                .exec(&db_tx)
                .await?;
            attendees::Entity::delete_many()
                .filter(attendees::Column::EventId.eq(event_id))
                .exec(&db_tx)
                .await?;
            events::Entity::delete_by_id(event_id).exec(&db_tx).await?;

            Ok(())
        })
    }

    /// Reads the full event aggregate in one DB transaction.
    pub async fn event_snapshot(&self, event_id: Uuid) -> ResultEngine<EventSnapshot> {
        with_tx!(self, |db_tx| {
            let event_model = events::Entity::find_by_id(event_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("event not exists".to_string()))?;

            let attendee_models = attendees::Entity::find()
                .filter(attendees::Column::EventId.eq(event_id))
                .order_by_asc(attendees::Column::Name)
                .all(&db_tx)
                .await?;

            let category_models = categories::Entity::find()
                .filter(categories::Column::EventId.eq(event_id))
                .order_by_asc(categories::Column::Name)
                .all(&db_tx)
                .await?;

            let attendee_ids: Vec<Uuid> = attendee_models.iter().map(|model| model.id).collect();
            let participation_models = if attendee_ids.is_empty() {
                Vec::new()
            } else {
                participations::Entity::find()
                    .filter(participations::Column::AttendeeId.is_in(attendee_ids))
                    .all(&db_tx)
                    .await?
            };

            Ok(EventSnapshot {
                event: Event::from(event_model),
                attendees: attendee_models.into_iter().map(Attendee::from).collect(),
                categories: category_models.into_iter().map(Category::from).collect(),
                participations: participation_models
                    .into_iter()
                    .map(Participation::from)
                    .collect(),
            })
        })
    }
}
