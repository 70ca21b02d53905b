use chrono::NaiveDate;
use sea_orm::Database;

use engine::{CategoryKey, Engine, EngineError, SettlementStrategy};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

#[tokio::test]
async fn new_event_defaults_date_to_today() {
    let engine = engine_with_db().await;

    let event = engine.new_event("Ferragosto", None).await.unwrap();
    assert!(event.event_date.is_some());

    let fetched = engine.event(event.id).await.unwrap();
    assert_eq!(fetched.name, "Ferragosto");
    assert_eq!(fetched.event_date, event.event_date);
}

#[tokio::test]
async fn list_events_newest_first() {
    let engine = engine_with_db().await;

    engine.new_event("First", None).await.unwrap();
    let second = engine.new_event("Second", None).await.unwrap();

    let events = engine.list_events().await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, second.id);
}

#[tokio::test]
async fn update_event_keeps_date_when_not_provided() {
    let engine = engine_with_db().await;

    let date = NaiveDate::from_ymd_opt(2026, 8, 15).unwrap();
    let event = engine.new_event("Ferragosto", Some(date)).await.unwrap();

    let updated = engine
        .update_event(event.id, "Ferragosto al mare", None)
        .await
        .unwrap();
    assert_eq!(updated.name, "Ferragosto al mare");
    assert_eq!(updated.event_date, Some(date));
}

#[tokio::test]
async fn blank_names_are_rejected() {
    let engine = engine_with_db().await;

    let err = engine.new_event("   ", None).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));

    let event = engine.new_event("Cena", None).await.unwrap();
    let err = engine.add_attendee(event.id, "", 0.0).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
}

#[tokio::test]
async fn negative_amounts_are_rejected() {
    let engine = engine_with_db().await;
    let event = engine.new_event("Cena", None).await.unwrap();

    let err = engine.add_attendee(event.id, "Anna", -1.0).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_category(event.id, "Food", None, -10.0)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn set_participation_upserts_a_single_row() {
    let engine = engine_with_db().await;
    let event = engine.new_event("Cena", None).await.unwrap();
    let anna = engine.add_attendee(event.id, "Anna", 0.0).await.unwrap();
    let food = engine
        .add_category(event.id, "Food", None, 60.0)
        .await
        .unwrap();

    engine.set_participation(anna.id, food.id, true).await.unwrap();
    engine.set_participation(anna.id, food.id, true).await.unwrap();
    engine
        .set_participation(anna.id, food.id, false)
        .await
        .unwrap();

    let snapshot = engine.event_snapshot(event.id).await.unwrap();
    assert_eq!(snapshot.participations.len(), 1);
    assert!(!snapshot.participations[0].participates);
}

#[tokio::test]
async fn participation_requires_matching_event() {
    let engine = engine_with_db().await;
    let dinner = engine.new_event("Cena", None).await.unwrap();
    let picnic = engine.new_event("Picnic", None).await.unwrap();
    let anna = engine.add_attendee(dinner.id, "Anna", 0.0).await.unwrap();
    let food = engine
        .add_category(picnic.id, "Food", None, 60.0)
        .await
        .unwrap();

    let err = engine
        .set_participation(anna.id, food.id, true)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidId(_)));
}

#[tokio::test]
async fn calculate_splits_and_plans_settlement() {
    let engine = engine_with_db().await;
    let event = engine.new_event("Cena", None).await.unwrap();
    let anna = engine.add_attendee(event.id, "Anna", 200.0).await.unwrap();
    let bruno = engine.add_attendee(event.id, "Bruno", 0.0).await.unwrap();
    let food = engine
        .add_category(event.id, "Food", None, 200.0)
        .await
        .unwrap();

    engine.set_participation(anna.id, food.id, true).await.unwrap();
    engine
        .set_participation(bruno.id, food.id, true)
        .await
        .unwrap();

    let report = engine
        .calculate(
            event.id,
            CategoryKey::Name,
            SettlementStrategy::SingleCreditorSuggestion,
        )
        .await
        .unwrap();

    let anna_balance = &report.balances[&anna.id];
    assert_eq!(anna_balance.total_expense, 100.0);
    assert_eq!(anna_balance.balance, 100.0);
    let bruno_balance = &report.balances[&bruno.id];
    assert_eq!(bruno_balance.balance, -100.0);

    assert!(!report.fully_settled);
    assert_eq!(report.transfers.len(), 1);
    assert_eq!(report.transfers[0].from_attendee_id, bruno.id);
    assert_eq!(report.transfers[0].to_attendee_id, anna.id);
    assert_eq!(report.transfers[0].amount, 100.0);
}

#[tokio::test]
async fn calculate_without_creditor_suggests_nothing() {
    let engine = engine_with_db().await;
    let event = engine.new_event("Cena", None).await.unwrap();
    let anna = engine.add_attendee(event.id, "Anna", 100.0).await.unwrap();
    let bruno = engine.add_attendee(event.id, "Bruno", 0.0).await.unwrap();
    let food = engine
        .add_category(event.id, "Food", None, 200.0)
        .await
        .unwrap();

    engine.set_participation(anna.id, food.id, true).await.unwrap();
    engine
        .set_participation(bruno.id, food.id, true)
        .await
        .unwrap();

    let report = engine
        .calculate(
            event.id,
            CategoryKey::Name,
            SettlementStrategy::SingleCreditorSuggestion,
        )
        .await
        .unwrap();

    // Anna lands exactly at zero, so Bruno's debt has no creditor to go to.
    assert_eq!(report.balances[&anna.id].balance, 0.0);
    assert_eq!(report.balances[&bruno.id].balance, -100.0);
    assert!(report.transfers.is_empty());
}

#[tokio::test]
async fn delete_attendee_removes_their_participations() {
    let engine = engine_with_db().await;
    let event = engine.new_event("Cena", None).await.unwrap();
    let anna = engine.add_attendee(event.id, "Anna", 0.0).await.unwrap();
    let bruno = engine.add_attendee(event.id, "Bruno", 0.0).await.unwrap();
    let food = engine
        .add_category(event.id, "Food", None, 60.0)
        .await
        .unwrap();

    engine.set_participation(anna.id, food.id, true).await.unwrap();
    engine
        .set_participation(bruno.id, food.id, true)
        .await
        .unwrap();

    engine.delete_attendee(anna.id).await.unwrap();

    let snapshot = engine.event_snapshot(event.id).await.unwrap();
    assert_eq!(snapshot.attendees.len(), 1);
    assert_eq!(snapshot.participations.len(), 1);
    assert_eq!(snapshot.participations[0].attendee_id, bruno.id);

    // Bruno now carries the whole category.
    let report = engine
        .calculate(
            event.id,
            CategoryKey::Name,
            SettlementStrategy::SingleCreditorSuggestion,
        )
        .await
        .unwrap();
    assert_eq!(report.balances[&bruno.id].total_expense, 60.0);
}

#[tokio::test]
async fn delete_category_removes_its_participations() {
    let engine = engine_with_db().await;
    let event = engine.new_event("Cena", None).await.unwrap();
    let anna = engine.add_attendee(event.id, "Anna", 0.0).await.unwrap();
    let food = engine
        .add_category(event.id, "Food", None, 60.0)
        .await
        .unwrap();

    engine.set_participation(anna.id, food.id, true).await.unwrap();
    engine.delete_category(food.id).await.unwrap();

    let snapshot = engine.event_snapshot(event.id).await.unwrap();
    assert!(snapshot.categories.is_empty());
    assert!(snapshot.participations.is_empty());
}

#[tokio::test]
async fn delete_event_removes_the_whole_aggregate() {
    let engine = engine_with_db().await;
    let event = engine.new_event("Cena", None).await.unwrap();
    let anna = engine.add_attendee(event.id, "Anna", 0.0).await.unwrap();
    let food = engine
        .add_category(event.id, "Food", None, 60.0)
        .await
        .unwrap();
    engine.set_participation(anna.id, food.id, true).await.unwrap();

    engine.delete_event(event.id).await.unwrap();

    let err = engine.event_snapshot(event.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
    assert!(engine.list_events().await.unwrap().is_empty());
}

#[tokio::test]
async fn snapshot_orders_attendees_and_categories_by_name() {
    let engine = engine_with_db().await;
    let event = engine.new_event("Cena", None).await.unwrap();
    engine.add_attendee(event.id, "Bruno", 0.0).await.unwrap();
    engine.add_attendee(event.id, "Anna", 0.0).await.unwrap();
    engine
        .add_category(event.id, "Transport", None, 10.0)
        .await
        .unwrap();
    engine
        .add_category(event.id, "Food", None, 20.0)
        .await
        .unwrap();

    let snapshot = engine.event_snapshot(event.id).await.unwrap();
    let names: Vec<&str> = snapshot.attendees.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Anna", "Bruno"]);
    let categories: Vec<&str> = snapshot
        .categories
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(categories, ["Food", "Transport"]);
}
