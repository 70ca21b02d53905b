use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{Attendee, EngineError, ResultEngine, attendees, events, participations};

use super::{Engine, ensure_non_negative, normalize_required_name, with_tx};

impl Engine {
    /// Adds an attendee to an event.
    pub async fn add_attendee(
        &self,
        event_id: Uuid,
        name: &str,
        contribution: f64,
    ) -> ResultEngine<Attendee> {
        let name = normalize_required_name(name, "attendee")?;
        let contribution = ensure_non_negative(contribution, "contribution")?;
        with_tx!(self, |db_tx| {
            events::Entity::find_by_id(event_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("event not exists".to_string()))?;

            let attendee = Attendee::new(event_id, name, contribution);
            let model: attendees::ActiveModel = (&attendee).into();
            model.insert(&db_tx).await?;
            Ok(attendee)
        })
    }

    /// Updates an attendee's name and contribution.
    pub async fn update_attendee(
        &self,
        attendee_id: Uuid,
        name: &str,
        contribution: f64,
    ) -> ResultEngine<Attendee> {
        let name = normalize_required_name(name, "attendee")?;
        let contribution = ensure_non_negative(contribution, "contribution")?;
        with_tx!(self, |db_tx| {
            attendees::Entity::find_by_id(attendee_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("attendee not exists".to_string()))?;

            let active = attendees::ActiveModel {
                id: ActiveValue::Set(attendee_id),
                name: ActiveValue::Set(name),
                contribution: ActiveValue::Set(contribution),
                ..Default::default()
            };
            let updated = active.update(&db_tx).await?;
            Ok(Attendee::from(updated))
        })
    }

    /// Deletes an attendee together with their participation rows.
    pub async fn delete_attendee(&self, attendee_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            attendees::Entity::find_by_id(attendee_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("attendee not exists".to_string()))?;

            participations::Entity::delete_many()
                .filter(participations::Column::AttendeeId.eq(attendee_id))
                .exec(&db_tx)
                .await?;
            attendees::Entity::delete_by_id(attendee_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
