//! Calculation and export API endpoints

use api_types::report::{CalculateQuery, CategoryKeyParam, StrategyParam};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use engine::{CategoryKey, EventReport, SettlementStrategy};
use serde::Serialize;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn category_key(param: Option<CategoryKeyParam>) -> CategoryKey {
    match param.unwrap_or_default() {
        CategoryKeyParam::Name => CategoryKey::Name,
        CategoryKeyParam::NameAndSubcategory => CategoryKey::NameAndSubcategory,
    }
}

fn settlement_strategy(param: Option<StrategyParam>) -> SettlementStrategy {
    match param.unwrap_or_default() {
        StrategyParam::SingleCreditorSuggestion => SettlementStrategy::SingleCreditorSuggestion,
        StrategyParam::MinimalTransferCount => SettlementStrategy::MinimalTransferCount,
    }
}

/// Handle requests for the per-attendee breakdown and settlement plan.
pub async fn calculate(
    State(state): State<ServerState>,
    Path(event_id): Path<Uuid>,
    Query(query): Query<CalculateQuery>,
) -> Result<Json<EventReport>, ServerError> {
    let report = state
        .engine
        .calculate(
            event_id,
            category_key(query.key),
            settlement_strategy(query.strategy),
        )
        .await?;
    Ok(Json(report))
}

#[derive(Serialize)]
struct SummaryRow {
    person: String,
    total_expense: String,
    contribution: String,
    balance: String,
}

#[derive(Serialize)]
struct DetailRow {
    person: String,
    category: String,
    amount: String,
    participates: &'static str,
}

/// Handle requests for the per-attendee summary as a CSV attachment.
pub async fn export_summary(
    State(state): State<ServerState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, ServerError> {
    let snapshot = state.engine.event_snapshot(event_id).await?;
    let report = EventReport::from_snapshot(
        &snapshot,
        CategoryKey::Name,
        SettlementStrategy::SingleCreditorSuggestion,
    );

    let mut rows = Vec::with_capacity(snapshot.attendees.len());
    for attendee in &snapshot.attendees {
        let Some(balance) = report.balances.get(&attendee.id) else {
            continue;
        };
        rows.push(SummaryRow {
            person: attendee.name.clone(),
            total_expense: format!("{:.2}", balance.total_expense),
            contribution: format!("{:.2}", balance.contribution),
            balance: format!("{:.2}", balance.balance),
        });
    }

    let data = write_csv(&rows)?;
    Ok(csv_attachment(
        export_filename(&snapshot.event.name, "expenses"),
        data,
    ))
}

/// Handle requests for the attendee x category matrix as a CSV attachment.
pub async fn export_details(
    State(state): State<ServerState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, ServerError> {
    let snapshot = state.engine.event_snapshot(event_id).await?;
    let report = EventReport::from_snapshot(
        &snapshot,
        CategoryKey::Name,
        SettlementStrategy::SingleCreditorSuggestion,
    );

    let mut rows = Vec::with_capacity(snapshot.attendees.len() * snapshot.categories.len());
    for attendee in &snapshot.attendees {
        for category in &snapshot.categories {
            let participates = snapshot.participations.iter().any(|p| {
                p.attendee_id == attendee.id && p.category_id == category.id && p.participates
            });
            // Shares are keyed by name alone, the label stays qualified.
            let amount = report
                .balances
                .get(&attendee.id)
                .and_then(|balance| balance.category_expenses.get(&category.name))
                .copied()
                .unwrap_or(0.0);

            rows.push(DetailRow {
                person: attendee.name.clone(),
                category: category.qualified_label(),
                amount: format!("{amount:.2}"),
                participates: if participates { "Yes" } else { "No" },
            });
        }
    }

    let data = write_csv(&rows)?;
    Ok(csv_attachment(
        export_filename(&snapshot.event.name, "expenses_details"),
        data,
    ))
}

fn write_csv<T: Serialize>(rows: &[T]) -> Result<Vec<u8>, ServerError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    for row in rows {
        if let Err(err) = writer.serialize(row) {
            tracing::error!("failed to serialize export row: {err}");
            return Err(ServerError::Generic("failed to build export".to_string()));
        }
    }

    writer.into_inner().map_err(|err| {
        tracing::error!("failed to finalize export: {err}");
        ServerError::Generic("failed to build export".to_string())
    })
}

fn csv_attachment(filename: String, data: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        data,
    )
        .into_response()
}

fn export_filename(event_name: &str, suffix: &str) -> String {
    let sanitized: String = event_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{sanitized}_{suffix}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_sanitized_and_lowercased() {
        assert_eq!(
            export_filename("Ferragosto 2026!", "expenses"),
            "ferragosto_2026__expenses.csv"
        );
    }
}
