//! Per-attendee expense allocation.
//!
//! [`allocate`] turns an event snapshot (attendees, categories, participation
//! rows) into one [`AttendeeBalance`] per attendee. It is a pure function of
//! its inputs: no storage access, no hidden state, recomputed on every call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Attendee, Category, Participation};

/// How category shares are keyed in the per-attendee expense map.
///
/// Keying by name alone matches the historical behavior: two categories that
/// share a name (e.g. "Food / Veg" and "Food / Non Veg") collide, and the
/// later share overwrites the earlier one in the map while `total_expense`
/// still accumulates both. `NameAndSubcategory` keeps them apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    #[default]
    Name,
    NameAndSubcategory,
}

impl CategoryKey {
    fn label(self, category: &Category) -> String {
        match self {
            CategoryKey::Name => category.name.clone(),
            CategoryKey::NameAndSubcategory => category.qualified_label(),
        }
    }
}

/// Financial breakdown for one attendee.
///
/// `balance = contribution - total_expense`; negative means the attendee
/// still owes money, positive means the pool owes the attendee.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttendeeBalance {
    pub attendee_id: Uuid,
    pub name: String,
    pub contribution: f64,
    pub category_expenses: HashMap<String, f64>,
    pub total_expense: f64,
    pub balance: f64,
}

/// Splits every category's amount equally among its participants.
///
/// Each category with `k > 0` participants charges `amount / k` to every
/// participant; the division is plain `f64` arithmetic with no rounding, so
/// the shares of one category always sum back to its amount. Categories
/// nobody joined allocate nothing, and attendees with no participation rows
/// end with `total_expense = 0` and `balance = contribution`. Neither case
/// is an error.
pub fn allocate(
    attendees: &[Attendee],
    categories: &[Category],
    participations: &[Participation],
    key: CategoryKey,
) -> HashMap<Uuid, AttendeeBalance> {
    let mut balances: HashMap<Uuid, AttendeeBalance> = attendees
        .iter()
        .map(|attendee| {
            (
                attendee.id,
                AttendeeBalance {
                    attendee_id: attendee.id,
                    name: attendee.name.clone(),
                    contribution: attendee.contribution,
                    category_expenses: HashMap::new(),
                    total_expense: 0.0,
                    balance: 0.0,
                },
            )
        })
        .collect();

    for category in categories {
        let participants: Vec<Uuid> = participations
            .iter()
            .filter(|p| p.category_id == category.id && p.participates)
            .map(|p| p.attendee_id)
            .collect();

        // Guard keeps the division below away from zero; the category simply
        // contributes nothing.
        if participants.is_empty() {
            continue;
        }

        let share = category.amount / participants.len() as f64;
        let label = key.label(category);

        for attendee_id in participants {
            let Some(balance) = balances.get_mut(&attendee_id) else {
                continue;
            };
            balance.category_expenses.insert(label.clone(), share);
            balance.total_expense += share;
        }
    }

    for balance in balances.values_mut() {
        balance.balance = balance.contribution - balance.total_expense;
    }

    balances
}
