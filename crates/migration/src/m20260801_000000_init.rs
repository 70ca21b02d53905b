//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Romana:
//!
//! - `events`: the aggregate roots
//! - `attendees`: people attending an event, with their pool contribution
//! - `categories`: shareable expenses of an event
//! - `participations`: which attendee takes part in which category

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Events {
    Table,
    Id,
    Name,
    EventDate,
    CreatedAt,
}

#[derive(Iden)]
enum Attendees {
    Table,
    Id,
    EventId,
    Name,
    Contribution,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    EventId,
    Name,
    Subcategory,
    Amount,
}

#[derive(Iden)]
enum Participations {
    Table,
    AttendeeId,
    CategoryId,
    Participates,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id).blob().not_null().primary_key())
                    .col(ColumnDef::new(Events::Name).string().not_null())
                    .col(ColumnDef::new(Events::EventDate).date())
                    .col(ColumnDef::new(Events::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Attendees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendees::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendees::EventId).blob().not_null())
                    .col(ColumnDef::new(Attendees::Name).string().not_null())
                    .col(
                        ColumnDef::new(Attendees::Contribution)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attendees-event_id")
                            .from(Attendees::Table, Attendees::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-attendees-event_id")
                    .table(Attendees::Table)
                    .col(Attendees::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::EventId).blob().not_null())
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::Subcategory).string())
                    .col(ColumnDef::new(Categories::Amount).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-categories-event_id")
                            .from(Categories::Table, Categories::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categories-event_id")
                    .table(Categories::Table)
                    .col(Categories::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Participations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participations::AttendeeId)
                            .blob()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participations::CategoryId)
                            .blob()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participations::Participates)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .primary_key(
                        Index::create()
                            .col(Participations::AttendeeId)
                            .col(Participations::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-participations-attendee_id")
                            .from(Participations::Table, Participations::AttendeeId)
                            .to(Attendees::Table, Attendees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-participations-category_id")
                            .from(Participations::Table, Participations::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-participations-category_id")
                    .table(Participations::Table)
                    .col(Participations::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Participations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        Ok(())
    }
}
