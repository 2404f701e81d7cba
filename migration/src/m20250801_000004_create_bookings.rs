use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20250801_000001_create_users::User;
use super::m20250801_000003_create_trips::Trip;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create booking status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(BookingStatus::Enum)
                    .values([
                        BookingStatus::Provisional,
                        BookingStatus::Confirmed,
                        BookingStatus::Expired,
                        BookingStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(uuid(Booking::Id).primary_key())
                    .col(uuid(Booking::TripId).not_null())
                    .col(uuid(Booking::CustomerId).not_null())
                    .col(string_len(Booking::Name, 100).not_null())
                    .col(string_len(Booking::Contact, 30).not_null())
                    .col(string_len(Booking::Email, 255).not_null())
                    .col(integer(Booking::Passengers).not_null())
                    .col(
                        ColumnDef::new(Booking::Status)
                            .custom(BookingStatus::Enum)
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Booking::HoldExpiresAt))
                    .col(decimal_len(Booking::TotalCost, 10, 2).not_null())
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_trip")
                            .from(Booking::Table, Booking::TripId)
                            .to(Trip::Table, Trip::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_customer")
                            .from(Booking::Table, Booking::CustomerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BookingStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    TripId,
    CustomerId,
    Name,
    Contact,
    Email,
    Passengers,
    Status,
    HoldExpiresAt,
    TotalCost,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum BookingStatus {
    #[sea_orm(iden = "booking_status")]
    Enum,
    #[sea_orm(iden = "provisional")]
    Provisional,
    #[sea_orm(iden = "confirmed")]
    Confirmed,
    #[sea_orm(iden = "expired")]
    Expired,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
