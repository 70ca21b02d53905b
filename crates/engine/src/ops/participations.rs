use uuid::Uuid;

use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{EngineError, Participation, ResultEngine, attendees, categories, participations};

use super::{Engine, with_tx};

impl Engine {
    /// Upserts the participation flag for an `(attendee, category)` pair.
    ///
    /// At most one row exists per pair: an existing row is updated in place,
    /// otherwise one is inserted. Both sides must belong to the same event.
    pub async fn set_participation(
        &self,
        attendee_id: Uuid,
        category_id: Uuid,
        participates: bool,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let attendee = attendees::Entity::find_by_id(attendee_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("attendee not exists".to_string()))?;
            let category = categories::Entity::find_by_id(category_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;

            if attendee.event_id != category.event_id {
                return Err(EngineError::InvalidId(
                    "attendee and category belong to different events".to_string(),
                ));
            }

            let existing = participations::Entity::find_by_id((attendee_id, category_id))
                .one(&db_tx)
                .await?;

            match existing {
                Some(_) => {
                    let active = participations::ActiveModel {
                        attendee_id: ActiveValue::Set(attendee_id),
                        category_id: ActiveValue::Set(category_id),
                        participates: ActiveValue::Set(participates),
                    };
                    active.update(&db_tx).await?;
                }
                None => {
                    let participation = Participation {
                        attendee_id,
                        category_id,
                        participates,
                    };
                    let model: participations::ActiveModel = (&participation).into();
                    model.insert(&db_tx).await?;
                }
            }

            Ok(())
        })
    }
}
