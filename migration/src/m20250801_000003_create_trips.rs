use sea_orm_migration::{prelude::*, schema::*};

use super::m20250801_000001_create_users::User;
use super::m20250801_000002_create_boats::Boat;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trip::Table)
                    .if_not_exists()
                    .col(uuid(Trip::Id).primary_key())
                    .col(string_len(Trip::Name, 150).not_null())
                    .col(string_len_null(Trip::Description, 1000))
                    .col(date(Trip::Date).not_null())
                    .col(time(Trip::StartTime).not_null())
                    .col(time(Trip::EndTime).not_null())
                    .col(integer(Trip::Duration).not_null())
                    .col(integer(Trip::Capacity).not_null())
                    .col(decimal_len(Trip::Price, 10, 2).not_null())
                    .col(string_len_null(Trip::Location, 150))
                    .col(string_len_null(Trip::Route, 255))
                    .col(string_len_null(Trip::ImageUrl, 255))
                    .col(uuid_null(Trip::BoatId))
                    .col(uuid_null(Trip::GuideId))
                    .col(
                        timestamp_with_time_zone(Trip::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trip_boat")
                            .from(Trip::Table, Trip::BoatId)
                            .to(Boat::Table, Boat::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trip_guide")
                            .from(Trip::Table, Trip::GuideId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trip::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Trip {
    Table,
    Id,
    Name,
    Description,
    Date,
    StartTime,
    EndTime,
    Duration,
    Capacity,
    Price,
    Location,
    Route,
    ImageUrl,
    BoatId,
    GuideId,
    CreatedAt,
}
