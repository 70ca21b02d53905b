use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    AttendeeBalance, CategoryKey, ResultEngine, SettlementStrategy, SettlementTransfer,
    allocation, settlement,
};

use super::{Engine, EventSnapshot};

/// Output of a full expense calculation for one event.
///
/// Ephemeral: recomputed on every call, never persisted.
#[derive(Clone, Debug, Serialize)]
pub struct EventReport {
    pub balances: HashMap<Uuid, AttendeeBalance>,
    pub transfers: Vec<SettlementTransfer>,
    pub fully_settled: bool,
}

impl EventReport {
    /// Runs the allocation engine and the settlement planner on a snapshot.
    pub fn from_snapshot(
        snapshot: &EventSnapshot,
        key: CategoryKey,
        strategy: SettlementStrategy,
    ) -> Self {
        let balances = allocation::allocate(
            &snapshot.attendees,
            &snapshot.categories,
            &snapshot.participations,
            key,
        );
        let transfers = settlement::plan(&balances, strategy);
        let fully_settled = settlement::is_fully_settled(&balances);
        Self {
            balances,
            transfers,
            fully_settled,
        }
    }
}

impl Engine {
    /// Recomputes the per-attendee breakdown and settlement plan for an event.
    pub async fn calculate(
        &self,
        event_id: Uuid,
        key: CategoryKey,
        strategy: SettlementStrategy,
    ) -> ResultEngine<EventReport> {
        let snapshot = self.event_snapshot(event_id).await?;
        Ok(EventReport::from_snapshot(&snapshot, key, strategy))
    }
}
